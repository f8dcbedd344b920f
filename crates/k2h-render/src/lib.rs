//! Rendering helpers for k2h motif graphs.
//!
//! This crate keeps presentation concerns out of the motif engine. It
//! prunes a motif graph for display and labels each actor by its role:
//!
//! | Role | Degree | Colour |
//! |------|--------|--------|
//! | Instigator | only outgoing edges | blue |
//! | Follower | only incoming edges | red |
//! | Broker | both | gold |

use k2h::{ActorId, MotifGraph};
use serde::Serialize;

/// Role of an actor in a pruned motif graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Instigator,
    Follower,
    Broker,
}

impl Role {
    pub fn color(self) -> &'static str {
        match self {
            Role::Instigator => "blue",
            Role::Follower => "red",
            Role::Broker => "gold",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderNode {
    pub actor: ActorId,
    pub role: Role,
    pub component: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderEdge {
    pub source: ActorId,
    pub target: ActorId,
    pub weight: usize,
    /// `1 + log2(weight)`
    pub width: f64,
}

/// A motif graph ready to draw.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RenderGraph {
    pub nodes: Vec<RenderNode>,
    pub edges: Vec<RenderEdge>,
}

impl RenderGraph {
    pub fn node(&self, actor: &ActorId) -> Option<&RenderNode> {
        self.nodes.iter().find(|n| &n.actor == actor)
    }
}

/// Edge width for a motif weight.
pub fn edge_width(weight: usize) -> f64 {
    1.0 + (weight.max(1) as f64).log2()
}

/// Prune `graph` for display.
///
/// Drops edges lighter than `min_weight`, then actors left without edges,
/// then whole components with at most `min_size` actors.
pub fn prune_and_color(graph: &MotifGraph, min_weight: usize, min_size: usize) -> RenderGraph {
    let heavy = MotifGraph::from_edges(
        graph.edges().iter().filter(|e| e.weight >= min_weight).cloned().collect(),
    );

    let components = heavy.components();
    let pruned = MotifGraph::from_edges(
        heavy
            .edges()
            .iter()
            .filter(|e| {
                components
                    .of(&heavy, &e.source)
                    .is_some_and(|c| components.size_of(c) > min_size)
            })
            .cloned()
            .collect(),
    );

    let components = pruned.components();
    let nodes = pruned
        .actors()
        .iter()
        .map(|actor| RenderNode {
            actor: actor.clone(),
            role: role_of(&pruned, actor),
            component: components.of(&pruned, actor).unwrap_or_default(),
        })
        .collect();
    let edges = pruned
        .edges()
        .iter()
        .map(|e| RenderEdge {
            source: e.source.clone(),
            target: e.target.clone(),
            weight: e.weight,
            width: edge_width(e.weight),
        })
        .collect();

    tracing::debug!(
        before = graph.actor_count(),
        after = pruned.actor_count(),
        components = components.count(),
        "pruned motif graph for rendering"
    );
    RenderGraph { nodes, edges }
}

fn role_of(graph: &MotifGraph, actor: &ActorId) -> Role {
    if graph.in_degree(actor) == 0 {
        Role::Instigator
    } else if graph.out_degree(actor) == 0 {
        Role::Follower
    } else {
        Role::Broker
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use k2h::MotifEdge;
    use pretty_assertions::assert_eq;

    fn e(source: &str, target: &str, weight: usize) -> MotifEdge {
        MotifEdge { source: source.into(), target: target.into(), weight, witnesses: None }
    }

    fn chain() -> MotifGraph {
        // C → B → A, plus a separate pair X → Y
        MotifGraph::from_edges(vec![e("C", "B", 4), e("B", "A", 2), e("X", "Y", 8)])
    }

    #[test]
    fn test_roles() {
        let r = prune_and_color(&chain(), 1, 2);
        assert_eq!(r.node(&"C".into()).map(|n| n.role), Some(Role::Instigator));
        assert_eq!(r.node(&"B".into()).map(|n| n.role), Some(Role::Broker));
        assert_eq!(r.node(&"A".into()).map(|n| n.role), Some(Role::Follower));
        assert_eq!(Role::Broker.color(), "gold");
    }

    #[test]
    fn test_small_components_dropped() {
        let r = prune_and_color(&chain(), 1, 2);
        assert!(r.node(&"X".into()).is_none());
        assert_eq!(r.edges.len(), 2);

        let keep_all = prune_and_color(&chain(), 1, 1);
        assert_eq!(keep_all.nodes.len(), 5);
    }

    #[test]
    fn test_weight_pruning_changes_roles() {
        let r = prune_and_color(&chain(), 3, 1);
        let actors: Vec<&str> = r.nodes.iter().map(|n| n.actor.as_str()).collect();
        assert_eq!(actors, vec!["B", "C", "X", "Y"]);
        assert_eq!(r.node(&"B".into()).map(|n| n.role), Some(Role::Follower));
    }

    #[test]
    fn test_edge_width() {
        assert_eq!(edge_width(1), 1.0);
        assert_eq!(edge_width(8), 4.0);
        let r = prune_and_color(&chain(), 1, 1);
        let xy = r.edges.iter().find(|e| e.source.as_str() == "X").unwrap();
        assert_eq!(xy.width, 4.0);
    }
}
