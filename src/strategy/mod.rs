//! # Motif Strategies
//!
//! A strategy decides what a "reaction" is. It builds the bipartite
//! relation from raw events and turns it into actor-to-actor reaction
//! edges for a given reaction window. Everything after that (simplify,
//! count, label) is shared.
//!
//! ## Implementations
//!
//! | Strategy | Module | A reaction is... |
//! |----------|--------|------------------|
//! | `RootStrategy` | `root` | any event under a root, by another actor, within `dt` of the root |
//! | `HopStrategy` | `hop` | the first reply of one actor to another's event, within `dt` of it |

pub mod root;
pub mod hop;

use crate::bipartite::BipartiteGraph;
use crate::config::Mode;
use crate::model::{Event, ReactionEdge, Timestamp};

pub use hop::HopStrategy;
pub use root::RootStrategy;

/// The contract between the bipartite relation and the shared pipeline.
///
/// `build` runs once per event relation; `reactions` runs once per query
/// and must not mutate the graph.
pub trait MotifStrategy: Send + Sync + 'static {
    /// Mode this strategy implements.
    fn mode(&self) -> Mode;

    /// Build the reusable bipartite relation.
    ///
    /// Input is assumed to satisfy [`Mode::required_columns`]; rows the
    /// strategy cannot use are dropped, never reported.
    fn build(&self, events: &[Event]) -> BipartiteGraph;

    /// Reaction edges whose delay is at most `reaction_window`.
    ///
    /// Never yields an edge from an actor to itself.
    fn reactions(&self, graph: &BipartiteGraph, reaction_window: Timestamp) -> Vec<ReactionEdge>;
}

static ROOT: RootStrategy = RootStrategy;
static HOP: HopStrategy = HopStrategy;

/// The strategy implementing `mode`.
pub fn strategy_for(mode: Mode) -> &'static dyn MotifStrategy {
    match mode {
        Mode::Root => &ROOT,
        Mode::Hop => &HOP,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strategy_for_mode() {
        assert_eq!(strategy_for(Mode::Root).mode(), Mode::Root);
        assert_eq!(strategy_for(Mode::Hop).mode(), Mode::Hop);
    }
}
