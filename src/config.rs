//! Query configuration.

use std::str::FromStr;
use std::time::Instant;

use serde::{Deserialize, Serialize};

use crate::model::{Event, Timestamp};
use crate::{Error, Result};

// ============================================================================
// Mode
// ============================================================================

/// How reactions are attributed to earlier events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Actors reacting to the root event of a tree.
    #[default]
    Root,
    /// Actors reacting to the direct parent event (one hop up the tree).
    Hop,
}

impl Mode {
    /// Columns the input relation must provide in this mode.
    pub fn required_columns(self) -> &'static [&'static str] {
        match self {
            Mode::Root => &["event_id", "actor_id", "time", "root_id"],
            Mode::Hop => &["event_id", "actor_id", "time", "root_id", "parent_id"],
        }
    }

    /// Label of the target column in the output table.
    pub fn target_column(self) -> &'static str {
        match self {
            Mode::Root => "root",
            Mode::Hop => "parent",
        }
    }

    /// Check `events` against this mode's required schema.
    ///
    /// Meant for the ingestion boundary; the strategies assume it passed.
    /// Rows with an unknown parent are still valid: hop mode drops them.
    pub fn validate_events(self, events: &[Event]) -> Result<()> {
        for (row, e) in events.iter().enumerate() {
            let missing = if e.id.as_str().is_empty() {
                "event_id"
            } else if e.actor.as_str().is_empty() {
                "actor_id"
            } else if e.root.as_str().is_empty() {
                "root_id"
            } else {
                continue;
            };
            return Err(Error::Schema(format!("row {row}: empty {missing}")));
        }

        if self == Mode::Hop {
            let mut replies = events.iter().filter(|e| !e.is_root()).peekable();
            if replies.peek().is_some() && replies.all(|e| e.parent.is_none()) {
                return Err(Error::Schema("hop mode requires parent_id on reply events".into()));
            }
        }
        Ok(())
    }
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Mode::Root => write!(f, "root"),
            Mode::Hop => write!(f, "hop"),
        }
    }
}

impl FromStr for Mode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "root" => Ok(Mode::Root),
            "hop" => Ok(Mode::Hop),
            _ => Err(Error::InvalidMode(s.to_string())),
        }
    }
}

// ============================================================================
// MotifConfig
// ============================================================================

/// Parameters of one motif query.
///
/// | Field | Meaning |
/// |-------|---------|
/// | `reaction_window` | `dt`: max delay from root/parent event to a reaction (s) |
/// | `repetition_window` | `dT`: max span of the `h` root events in one motif (s) |
/// | `h` | distinct root events per motif, at least 2 |
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MotifConfig {
    pub reaction_window: Timestamp,
    pub repetition_window: Timestamp,
    pub h: usize,
    pub mode: Mode,
    /// Record the root-id tuple of every motif instance.
    pub verbose: bool,
    pub return_table: bool,
    pub return_bipartite: bool,
    /// Abort counting once this instant has passed.
    #[serde(skip)]
    pub deadline: Option<Instant>,
}

impl Default for MotifConfig {
    fn default() -> Self {
        Self {
            reaction_window: 0,
            repetition_window: 0,
            h: 2,
            mode: Mode::Root,
            verbose: false,
            return_table: false,
            return_bipartite: true,
            deadline: None,
        }
    }
}

impl MotifConfig {
    pub fn new(reaction_window: Timestamp, repetition_window: Timestamp, h: usize) -> Self {
        Self { reaction_window, repetition_window, h, ..Self::default() }
    }

    pub fn with_mode(mut self, mode: Mode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn with_table(mut self, return_table: bool) -> Self {
        self.return_table = return_table;
        self
    }

    pub fn with_bipartite(mut self, return_bipartite: bool) -> Self {
        self.return_bipartite = return_bipartite;
        self
    }

    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Reject parameters no query can run with.
    pub fn validate(&self) -> Result<()> {
        if self.h < 2 {
            return Err(Error::InvalidConfig(format!("h must be >= 2, got {}", self.h)));
        }
        if self.reaction_window < 0 {
            return Err(Error::InvalidConfig(format!(
                "reaction window (dt) must be >= 0, got {}", self.reaction_window
            )));
        }
        if self.repetition_window < 0 {
            return Err(Error::InvalidConfig(format!(
                "repetition window (dT) must be >= 0, got {}", self.repetition_window
            )));
        }
        Ok(())
    }
}
