//! Motif session: one event relation, many queries.
//!
//! Building the bipartite relation is the expensive, parameter-free part
//! of a query. A session builds it at most once per mode and hands the
//! same `Arc<BipartiteGraph>` to every later query.
//!
//! ## Concurrency
//!
//! The cache sits behind a `parking_lot::RwLock`. The first query in a mode
//! builds under the write lock; every other query clones the `Arc` under
//! the read lock and runs without holding any lock. `MotifSession` is
//! `Send + Sync` and can be shared across threads.

use std::sync::Arc;

use hashbrown::HashMap;
use parking_lot::RwLock;

use crate::bipartite::BipartiteGraph;
use crate::config::{Mode, MotifConfig};
use crate::model::Event;
use crate::strategy::strategy_for;
use crate::{MotifOutput, Result};

/// A cached event relation.
pub struct MotifSession {
    events: Arc<[Event]>,
    cache: RwLock<HashMap<Mode, Arc<BipartiteGraph>>>,
}

impl MotifSession {
    pub fn new(events: impl Into<Arc<[Event]>>) -> Self {
        Self {
            events: events.into(),
            cache: RwLock::new(HashMap::new()),
        }
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// The bipartite relation for `mode`, built on first use.
    pub fn bipartite(&self, mode: Mode) -> Arc<BipartiteGraph> {
        if let Some(graph) = self.cache.read().get(&mode) {
            return Arc::clone(graph);
        }

        let mut cache = self.cache.write();
        // another query may have built it while we waited for the lock
        Arc::clone(cache.entry(mode).or_insert_with(|| {
            tracing::debug!(%mode, events = self.events.len(), "building bipartite graph");
            Arc::new(strategy_for(mode).build(&self.events))
        }))
    }

    /// True if the relation for `mode` has been built.
    pub fn is_cached(&self, mode: Mode) -> bool {
        self.cache.read().contains_key(&mode)
    }

    /// Run a query against the cached relation.
    pub fn query(&self, config: &MotifConfig) -> Result<MotifOutput> {
        config.validate()?;
        crate::find_motifs_with(self.bipartite(config.mode), config)
    }
}
