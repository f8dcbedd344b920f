//! # Event and Motif Model
//!
//! Plain data types that cross every stage of a motif query:
//! events in, actor-to-actor edges out.
//!
//! Design rule: no indices, no adjacency, no query parameters here.
//! This module is pure data: no I/O, no state.

pub mod event;
pub mod edge;
pub mod value;

pub use event::{Event, EventId, ActorId, Timestamp};
pub use edge::{ReactionEdge, AggregateEdge, MotifEdge, Witness};
pub use value::{PropertyMap, Value};
