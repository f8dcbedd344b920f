//! Hop mode: reactions to the direct parent event.
//!
//! Building the relation resolves each event's parent to the parent's
//! actor and time, then keeps one edge per `(actor, root, parent actor)`:
//! the earliest. The edge stores the parent time and the delay from the
//! parent, so a query only has to filter on `delay <= dt`.
//!
//! ## Dropped rows
//!
//! - Parent not in the log, or no parent on a non-root event.
//! - Actor replying to itself (root events always fall here: their
//!   parent is normalized to themselves).
//! - Later exchanges between the same actors under the same root.

use hashbrown::HashMap;

use crate::bipartite::{BipartiteBuilder, BipartiteGraph, EdgeMeta, Vertex};
use crate::config::Mode;
use crate::model::{ActorId, Event, EventId, ReactionEdge, Timestamp};
use super::MotifStrategy;

/// Reactions attributed to the parent event.
#[derive(Debug, Clone, Copy, Default)]
pub struct HopStrategy;

/// A surviving row with its parent resolved.
struct Hop<'e> {
    event: &'e Event,
    parent: &'e EventId,
    parent_actor: &'e ActorId,
}

impl MotifStrategy for HopStrategy {
    fn mode(&self) -> Mode {
        Mode::Hop
    }

    fn build(&self, events: &[Event]) -> BipartiteGraph {
        let mut actor_of: HashMap<&EventId, &ActorId> = HashMap::with_capacity(events.len());
        let mut time_of: HashMap<&EventId, Timestamp> = HashMap::with_capacity(events.len());
        for e in events {
            actor_of.insert(&e.id, &e.actor);
            time_of.insert(&e.id, e.time);
        }

        let mut unresolved = 0usize;
        let mut self_loops = 0usize;
        let mut first: HashMap<(&ActorId, &EventId, &ActorId), Hop<'_>> = HashMap::new();

        for event in events {
            let parent = if event.is_root() {
                &event.id
            } else {
                match &event.parent {
                    Some(p) => p,
                    None => {
                        unresolved += 1;
                        continue;
                    }
                }
            };
            let Some(&parent_actor) = actor_of.get(parent) else {
                unresolved += 1;
                continue;
            };
            if event.actor == *parent_actor {
                self_loops += 1;
                continue;
            }

            let hop = Hop { event, parent, parent_actor };
            first
                .entry((&event.actor, &event.root, parent_actor))
                .and_modify(|kept| {
                    if (event.time, &event.id) < (kept.event.time, &kept.event.id) {
                        *kept = Hop { event, parent, parent_actor };
                    }
                })
                .or_insert(hop);
        }

        let mut hops: Vec<Hop<'_>> = first.into_values().collect();
        hops.sort_by(|a, b| (a.event.time, &a.event.id).cmp(&(b.event.time, &b.event.id)));

        let mut builder = BipartiteBuilder::with_capacity(Mode::Hop, hops.len());
        for hop in &hops {
            // parent is in actor_of, so it is in time_of
            let Some(&parent_time) = time_of.get(hop.parent) else { continue };
            builder.add_edge(
                Vertex::Actor(hop.event.actor.clone()),
                Vertex::Actor(hop.parent_actor.clone()),
                parent_time,
                EdgeMeta::Hop { delay: hop.event.time.saturating_sub(parent_time) },
                hop.event.root.clone(),
                hop.event.properties.clone(),
            );
        }

        let graph = builder.finish();
        tracing::debug!(
            vertices = graph.vertex_count(),
            edges = graph.edge_count(),
            unresolved,
            self_loops,
            "built hop-mode bipartite graph"
        );
        graph
    }

    fn reactions(&self, graph: &BipartiteGraph, reaction_window: Timestamp) -> Vec<ReactionEdge> {
        let reactions: Vec<ReactionEdge> = graph
            .edges()
            .filter(|e| e.delay().is_some_and(|d| d <= reaction_window))
            .filter_map(|e| {
                let source = e.source.as_actor()?;
                let target = e.target.as_actor()?;
                Some(ReactionEdge {
                    source: source.clone(),
                    target: target.clone(),
                    time: e.time,
                    root: e.root.clone(),
                })
            })
            .collect();

        tracing::debug!(
            reactions = reactions.len(),
            filtered = graph.edge_count() - reactions.len(),
            "hop-mode reactions"
        );
        reactions
    }
}
