//! Actor-to-actor edges produced by a motif query.
//!
//! Each query walks `ReactionEdge → AggregateEdge → MotifEdge`; none of
//! these outlive the query that produced them.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::{ActorId, EventId, Timestamp};

/// `h` root ids making up one motif instance, in time order.
pub type Witness = SmallVec<[EventId; 4]>;

/// One qualifying reaction: `source` reacted to `target` under `root`.
///
/// `time` is the time of the event reacted to (the root event in root
/// mode, the parent event in hop mode).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ReactionEdge {
    pub source: ActorId,
    pub target: ActorId,
    pub time: Timestamp,
    pub root: EventId,
}

/// Parallel reaction edges merged into one weighted edge.
///
/// `timestamps[i]` and `roots[i]` describe the same reaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateEdge {
    pub source: ActorId,
    pub target: ActorId,
    pub weight: usize,
    pub timestamps: Vec<Timestamp>,
    pub roots: Vec<EventId>,
}

impl AggregateEdge {
    pub fn new(source: ActorId, target: ActorId) -> Self {
        Self {
            source,
            target,
            weight: 0,
            timestamps: Vec::new(),
            roots: Vec::new(),
        }
    }

    pub fn push(&mut self, time: Timestamp, root: EventId) {
        self.timestamps.push(time);
        self.roots.push(root);
        self.weight += 1;
    }

    /// Sort the observations ascending by time, ties by root id, keeping
    /// `timestamps` and `roots` paired.
    pub fn sort_by_time(&mut self) {
        let mut pairs: Vec<(Timestamp, EventId)> = self
            .timestamps
            .drain(..)
            .zip(self.roots.drain(..))
            .collect();
        pairs.sort();
        (self.timestamps, self.roots) = pairs.into_iter().unzip();
    }
}

/// A motif edge: `source` repeatedly reacted to `target`.
///
/// `weight` counts the valid h-windows; `witnesses` lists the root tuple
/// of every window when the query was verbose.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MotifEdge {
    pub source: ActorId,
    pub target: ActorId,
    pub weight: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub witnesses: Option<Vec<Witness>>,
}
