//! Weakly connected components of a motif graph.

use std::collections::VecDeque;

use crate::graph::MotifGraph;
use crate::model::ActorId;

/// Component membership per actor.
///
/// Ids are dense from 0, numbered in order of each component's smallest
/// actor id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Components {
    /// `membership[i]` is the component of `graph.actors()[i]`.
    pub membership: Vec<usize>,
    /// Actor count per component.
    pub sizes: Vec<usize>,
}

impl Components {
    pub fn count(&self) -> usize {
        self.sizes.len()
    }

    pub fn of(&self, graph: &MotifGraph, actor: &ActorId) -> Option<usize> {
        graph.actor_index(actor).map(|i| self.membership[i])
    }

    pub fn size_of(&self, component: usize) -> usize {
        self.sizes.get(component).copied().unwrap_or(0)
    }
}

/// Label weak components by BFS over the undirected edge set.
pub fn weak_components(graph: &MotifGraph) -> Components {
    let n = graph.actor_count();
    let mut adjacency: Vec<Vec<usize>> = vec![Vec::new(); n];
    for e in graph.edges() {
        if let (Some(s), Some(t)) = (graph.actor_index(&e.source), graph.actor_index(&e.target)) {
            adjacency[s].push(t);
            adjacency[t].push(s);
        }
    }

    let mut membership = vec![usize::MAX; n];
    let mut sizes = Vec::new();
    let mut queue = VecDeque::new();

    // actors are sorted, so the first unvisited actor is its component's smallest
    for start in 0..n {
        if membership[start] != usize::MAX {
            continue;
        }
        let id = sizes.len();
        let mut size = 0;
        membership[start] = id;
        queue.push_back(start);
        while let Some(v) = queue.pop_front() {
            size += 1;
            for &w in &adjacency[v] {
                if membership[w] == usize::MAX {
                    membership[w] = id;
                    queue.push_back(w);
                }
            }
        }
        sizes.push(size);
    }

    tracing::debug!(actors = n, components = sizes.len(), "labelled weak components");
    Components { membership, sizes }
}
