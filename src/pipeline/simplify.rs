//! Merge parallel reaction edges into weighted aggregate edges.

use hashbrown::HashMap;

use crate::model::{ActorId, AggregateEdge, ReactionEdge};

/// Merge reactions sharing `(source, target)` and drop merged edges with
/// fewer than `h` reactions.
///
/// Returned edges are ordered by `(source, target)`. Actors are implied by
/// edge endpoints, so an actor whose edges were all dropped disappears with
/// them.
pub fn simplify(reactions: Vec<ReactionEdge>, h: usize) -> Vec<AggregateEdge> {
    let total = reactions.len();
    let mut merged: HashMap<(ActorId, ActorId), AggregateEdge> = HashMap::new();

    for r in reactions {
        merged
            .entry((r.source, r.target))
            .or_insert_with_key(|(s, t)| AggregateEdge::new(s.clone(), t.clone()))
            .push(r.time, r.root);
    }

    let pairs = merged.len();
    let mut edges: Vec<AggregateEdge> = merged
        .into_values()
        .filter(|e| e.weight >= h)
        .collect();
    edges.sort_by(|a, b| (&a.source, &a.target).cmp(&(&b.source, &b.target)));

    tracing::debug!(reactions = total, pairs, kept = edges.len(), h, "simplified reaction edges");
    edges
}
