//! Motif graph: directed, weighted actor-to-actor result of a query.

use hashbrown::HashMap;
use serde::Serialize;

use crate::model::{ActorId, MotifEdge};
use crate::pipeline::components::{weak_components, Components};

/// Directed weighted graph over actors.
///
/// An edge `source → target` means `source` repeatedly reacted to
/// `target`; its weight is the number of motif instances. There is at most
/// one edge per ordered pair. Actors are exactly the edge endpoints.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MotifGraph {
    /// Sorted ascending.
    actors: Vec<ActorId>,
    /// Sorted by `(source, target)`.
    edges: Vec<MotifEdge>,
    #[serde(skip)]
    index: HashMap<ActorId, usize>,
    #[serde(skip)]
    in_degree: Vec<usize>,
    #[serde(skip)]
    out_degree: Vec<usize>,
}

impl MotifGraph {
    pub fn from_edges(mut edges: Vec<MotifEdge>) -> Self {
        edges.sort_by(|a, b| (&a.source, &a.target).cmp(&(&b.source, &b.target)));

        let mut actors: Vec<ActorId> = edges
            .iter()
            .flat_map(|e| [e.source.clone(), e.target.clone()])
            .collect();
        actors.sort();
        actors.dedup();

        let index: HashMap<ActorId, usize> = actors
            .iter()
            .enumerate()
            .map(|(i, a)| (a.clone(), i))
            .collect();

        let mut in_degree = vec![0; actors.len()];
        let mut out_degree = vec![0; actors.len()];
        for e in &edges {
            out_degree[index[&e.source]] += 1;
            in_degree[index[&e.target]] += 1;
        }

        Self { actors, edges, index, in_degree, out_degree }
    }

    pub fn actors(&self) -> &[ActorId] {
        &self.actors
    }

    pub fn edges(&self) -> &[MotifEdge] {
        &self.edges
    }

    pub fn actor_count(&self) -> usize {
        self.actors.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Position of `actor` in [`MotifGraph::actors`].
    pub fn actor_index(&self, actor: &ActorId) -> Option<usize> {
        self.index.get(actor).copied()
    }

    /// Number of actors reacting to `actor`. Zero for unknown actors.
    pub fn in_degree(&self, actor: &ActorId) -> usize {
        self.actor_index(actor).map_or(0, |i| self.in_degree[i])
    }

    /// Number of actors `actor` reacts to. Zero for unknown actors.
    pub fn out_degree(&self, actor: &ActorId) -> usize {
        self.actor_index(actor).map_or(0, |i| self.out_degree[i])
    }

    pub fn edge(&self, source: &ActorId, target: &ActorId) -> Option<&MotifEdge> {
        self.edges
            .binary_search_by(|e| (&e.source, &e.target).cmp(&(source, target)))
            .ok()
            .map(|i| &self.edges[i])
    }

    pub fn total_weight(&self) -> usize {
        self.edges.iter().map(|e| e.weight).sum()
    }

    /// Weakly connected components (edge direction ignored).
    pub fn components(&self) -> Components {
        weak_components(self)
    }
}
