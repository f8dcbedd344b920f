//! # k2h: Temporal Motifs in Causal Event Logs
//!
//! Finds K2h motifs: one actor repeatedly reacting to another, quickly
//! (within a reaction window `dt`) and across at least `h` distinct root
//! events that themselves fall within a repetition window `dT`.
//!
//! ## Design Principles
//!
//! 1. **Build once, query often**: the bipartite relation depends only on
//!    the events, never on `dt`/`dT`/`h`, and is shared as an immutable
//!    `Arc<BipartiteGraph>`
//! 2. **Strategy seam**: root mode and hop mode differ only in
//!    `MotifStrategy`; simplify → count → label is shared
//! 3. **Pure pipeline**: every query stage is a function from owned input
//!    to owned output
//! 4. **Deterministic output**: edge and row order never depend on input
//!    order or thread scheduling
//!
//! ## Quick Start
//!
//! ```rust
//! use k2h::{find_motifs, find_motifs_with, Event, MotifConfig};
//!
//! # fn example() -> k2h::Result<()> {
//! let events = vec![
//!     Event::new("r1", "alice", 0, "r1"),
//!     Event::new("c1", "bob", 10, "r1"),
//!     Event::new("r2", "alice", 20, "r2"),
//!     Event::new("c2", "bob", 25, "r2"),
//! ];
//!
//! let config = MotifConfig::new(15, 25, 2).with_verbose(true).with_table(true);
//! let out = find_motifs(&events, &config)?;
//! assert_eq!(out.graph.edge_count(), 1);
//!
//! // Re-query with a tighter repetition window, reusing the bipartite graph
//! let again = find_motifs_with(out.bipartite.unwrap(), &MotifConfig::new(15, 10, 2))?;
//! assert!(again.graph.is_empty());
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```
//!
//! ## Modes
//!
//! | Mode | Reaction to | Table target column |
//! |------|-------------|---------------------|
//! | `Root` | the root event of the tree | `root` |
//! | `Hop` | the direct parent event | `parent` |

// ============================================================================
// Modules
// ============================================================================

pub mod model;
pub mod config;
pub mod bipartite;
pub mod strategy;
pub mod pipeline;
pub mod graph;
pub mod export;
pub mod session;

use std::sync::Arc;

// ============================================================================
// Re-exports
// ============================================================================

pub use model::{
    Event, EventId, ActorId, Timestamp, Value, PropertyMap,
    ReactionEdge, AggregateEdge, MotifEdge, Witness,
};
pub use config::{Mode, MotifConfig};
pub use bipartite::{BipartiteGraph, BipartiteEdge, EdgeMeta, Vertex, VertexId};
pub use strategy::{MotifStrategy, RootStrategy, HopStrategy, strategy_for};
pub use pipeline::{Components, WindowSpec};
pub use graph::MotifGraph;
pub use export::{MotifTable, MotifRow};
pub use session::MotifSession;

// ============================================================================
// Entry points
// ============================================================================

/// Everything a query returns.
#[derive(Debug, Clone)]
pub struct MotifOutput {
    pub graph: MotifGraph,
    /// Present when `return_table` was set.
    pub table: Option<MotifTable>,
    /// Present when `return_bipartite` was set; pass it to
    /// [`find_motifs_with`] to skip rebuilding.
    pub bipartite: Option<Arc<BipartiteGraph>>,
}

/// Find motifs in an event relation.
///
/// Configuration is validated before anything is built.
pub fn find_motifs(events: &[Event], config: &MotifConfig) -> Result<MotifOutput> {
    config.validate()?;
    let bipartite = Arc::new(strategy_for(config.mode).build(events));
    find_motifs_with(bipartite, config)
}

/// Find motifs in a previously built bipartite relation.
pub fn find_motifs_with(bipartite: Arc<BipartiteGraph>, config: &MotifConfig) -> Result<MotifOutput> {
    config.validate()?;
    if bipartite.mode() != config.mode {
        return Err(Error::ModeMismatch { expected: config.mode, got: bipartite.mode() });
    }

    // Phase 1: reactions within dt
    let reactions = strategy_for(config.mode).reactions(&bipartite, config.reaction_window);

    // Phase 2: merge parallel edges, drop weight < h
    let aggregates = pipeline::simplify(reactions, config.h);

    // Phase 3: count h-windows within dT
    let motifs = pipeline::count_motifs(aggregates, WindowSpec::from(config), config.deadline)?;

    // Phase 4: assemble
    let graph = MotifGraph::from_edges(motifs);
    let table = config
        .return_table
        .then(|| MotifTable::from_graph(&graph, config.mode, config.verbose));

    tracing::info!(
        mode = %config.mode,
        reaction_window = config.reaction_window,
        repetition_window = config.repetition_window,
        h = config.h,
        actors = graph.actor_count(),
        motif_edges = graph.edge_count(),
        "motif query complete"
    );

    Ok(MotifOutput {
        graph,
        table,
        bipartite: config.return_bipartite.then_some(bipartite),
    })
}

// ============================================================================
// Error Types
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Invalid mode '{0}': expected 'root' or 'hop'")]
    InvalidMode(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Bipartite graph mode mismatch: query is {expected}, graph was built for {got}")]
    ModeMismatch { expected: Mode, got: Mode },

    #[error("Schema error: {0}")]
    Schema(String),

    #[error("Deadline exceeded after {processed} of {total} edges")]
    DeadlineExceeded { processed: usize, total: usize },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
