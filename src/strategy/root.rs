//! Root mode: reactions to the root event of each tree.
//!
//! The bipartite relation has one edge per event, from its actor to its
//! root. For each root with at least two incoming edges, the edge flagged
//! `is_root` gives the root time and root actor; every other actor with
//! an event under that root within `dt` reacted to the root actor.
//!
//! ## Policies
//!
//! - Root groups without an `is_root` edge are skipped (the root event is
//!   not in the log).
//! - If a group has several `is_root` edges, the earliest (then smallest
//!   actor id) defines the root.
//! - An actor with several qualifying events under one root reacts once.

use hashbrown::HashSet;

use crate::bipartite::{BipartiteBuilder, BipartiteEdge, BipartiteGraph, EdgeMeta, Vertex};
use crate::config::Mode;
use crate::model::{Event, ReactionEdge, Timestamp};
use super::MotifStrategy;

/// Reactions attributed to the root event.
#[derive(Debug, Clone, Copy, Default)]
pub struct RootStrategy;

impl MotifStrategy for RootStrategy {
    fn mode(&self) -> Mode {
        Mode::Root
    }

    fn build(&self, events: &[Event]) -> BipartiteGraph {
        let mut builder = BipartiteBuilder::with_capacity(Mode::Root, events.len());
        for event in events {
            builder.add_edge(
                Vertex::Actor(event.actor.clone()),
                Vertex::Root(event.root.clone()),
                event.time,
                EdgeMeta::Root { is_root: event.is_root() },
                event.root.clone(),
                event.properties.clone(),
            );
        }
        let graph = builder.finish();
        tracing::debug!(
            vertices = graph.vertex_count(),
            edges = graph.edge_count(),
            "built root-mode bipartite graph"
        );
        graph
    }

    fn reactions(&self, graph: &BipartiteGraph, reaction_window: Timestamp) -> Vec<ReactionEdge> {
        let mut reactions = Vec::new();
        let mut skipped = 0usize;

        for v in graph.vertex_ids() {
            if graph.in_degree(v) < 2 {
                continue;
            }

            let Some(root_edge) = defining_root(graph.incoming(v)) else {
                skipped += 1;
                tracing::trace!(root = graph.vertex(v).name(), "root event missing, group skipped");
                continue;
            };
            let Some(root_actor) = root_edge.source.as_actor() else { continue };
            let t_min = root_edge.time;

            let mut seen = HashSet::new();
            for edge in graph.incoming(v) {
                if edge.is_root() || edge.time.saturating_sub(t_min) > reaction_window {
                    continue;
                }
                let Some(actor) = edge.source.as_actor() else { continue };
                if actor == root_actor {
                    continue;
                }
                if seen.insert(actor) {
                    reactions.push(ReactionEdge {
                        source: actor.clone(),
                        target: root_actor.clone(),
                        time: t_min,
                        root: edge.root.clone(),
                    });
                }
            }
        }

        tracing::debug!(reactions = reactions.len(), skipped, "root-mode reactions");
        reactions
    }
}

/// The edge that defines a root group: earliest `is_root` edge.
fn defining_root<'g>(edges: impl Iterator<Item = BipartiteEdge<'g>>) -> Option<BipartiteEdge<'g>> {
    edges
        .filter(BipartiteEdge::is_root)
        .min_by(|a, b| (a.time, a.source.name()).cmp(&(b.time, b.source.name())))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reactions(events: &[Event], dt: Timestamp) -> Vec<ReactionEdge> {
        let s = RootStrategy;
        s.reactions(&s.build(events), dt)
    }

    #[test]
    fn test_single_reaction() {
        let events = vec![
            Event::new("r1", "A", 0, "r1"),
            Event::new("e1", "B", 10, "r1"),
        ];
        let r = reactions(&events, 15);
        assert_eq!(r, vec![ReactionEdge {
            source: "B".into(),
            target: "A".into(),
            time: 0,
            root: "r1".into(),
        }]);
    }

    #[test]
    fn test_reaction_window_is_inclusive() {
        let events = vec![
            Event::new("r1", "A", 0, "r1"),
            Event::new("e1", "B", 10, "r1"),
            Event::new("e2", "C", 11, "r1"),
        ];
        let r = reactions(&events, 10);
        assert_eq!(r.len(), 1);
        assert_eq!(r[0].source.as_str(), "B");
    }

    #[test]
    fn test_duplicate_reactions_counted_once() {
        let events = vec![
            Event::new("r1", "A", 0, "r1"),
            Event::new("e1", "B", 1, "r1"),
            Event::new("e2", "B", 2, "r1"),
            Event::new("e3", "B", 3, "r1"),
        ];
        assert_eq!(reactions(&events, 100).len(), 1);
    }

    #[test]
    fn test_self_reaction_excluded() {
        let events = vec![
            Event::new("r1", "A", 0, "r1"),
            Event::new("e1", "A", 1, "r1"),
            Event::new("e2", "A", 2, "r1"),
        ];
        assert!(reactions(&events, 100).is_empty());
    }

    #[test]
    fn test_group_without_root_skipped() {
        // root event r1 never appears in the log
        let events = vec![
            Event::new("e1", "B", 1, "r1"),
            Event::new("e2", "C", 2, "r1"),
        ];
        assert!(reactions(&events, 100).is_empty());
    }

    #[test]
    fn test_root_alone_yields_nothing() {
        let events = vec![Event::new("r1", "A", 0, "r1")];
        assert!(reactions(&events, 100).is_empty());
    }

    #[test]
    fn test_extra_properties_copied_to_edges() {
        let events = vec![Event::new("r1", "A", 0, "r1").with_property("lang", "en")];
        let g = RootStrategy.build(&events);
        assert_eq!(g.edge(0).attributes.get("lang").and_then(|v| v.as_str()), Some("en"));
        assert!(g.edge(0).is_root());
    }

    #[test]
    fn test_earliest_root_flag_defines_group() {
        // two rows claim to be root event r1; C's is earlier
        let events = vec![
            Event::new("r1", "A", 5, "r1"),
            Event::new("r1", "C", 0, "r1"),
            Event::new("e1", "B", 3, "r1"),
        ];
        let r = reactions(&events, 10);
        assert_eq!(r.len(), 1);
        assert_eq!((r[0].source.as_str(), r[0].target.as_str()), ("B", "C"));
        assert_eq!(r[0].time, 0);
    }

    #[test]
    fn test_reaction_before_root_qualifies() {
        let events = vec![
            Event::new("r1", "A", 100, "r1"),
            Event::new("e1", "B", 90, "r1"),
            Event::new("r2", "A", 200, "r2"),
            Event::new("e2", "B", 190, "r2"),
        ];
        let r = reactions(&events, 0);
        assert_eq!(r.len(), 2);
        assert!(r.iter().all(|e| e.source.as_str() == "B" && e.target.as_str() == "A"));
    }
}
