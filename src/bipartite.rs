//! # Bipartite Relation
//!
//! The reusable intermediate of every motif query: actors linked to the
//! roots (root mode) or parent actors (hop mode) they reacted to, with
//! per-edge time metadata.
//!
//! The graph is an immutable arena. Edges live in parallel arrays indexed
//! by edge number; incoming adjacency is a CSR index built once in
//! [`BipartiteBuilder::finish`]. Nothing in it depends on `dt`, `dT` or
//! `h`, so one graph serves any number of queries, including concurrent
//! ones through an `Arc`.
//!
//! ```text
//!  root mode:  (actor) ──time, is_root──▶ [root event]
//!  hop mode:   (actor) ──parent time, delay, root──▶ (parent actor)
//! ```

use hashbrown::HashMap;

use crate::config::Mode;
use crate::model::{ActorId, EventId, PropertyMap, Timestamp};

// ============================================================================
// Vertices
// ============================================================================

/// Dense vertex index into a [`BipartiteGraph`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VertexId(pub usize);

/// A vertex: an actor, or a root event (root mode only).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Vertex {
    Actor(ActorId),
    Root(EventId),
}

impl Vertex {
    pub fn as_actor(&self) -> Option<&ActorId> {
        match self {
            Vertex::Actor(a) => Some(a),
            Vertex::Root(_) => None,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Vertex::Actor(a) => a.as_str(),
            Vertex::Root(r) => r.as_str(),
        }
    }
}

// ============================================================================
// Edges
// ============================================================================

/// Mode-specific edge metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeMeta {
    /// Root mode: whether this edge is the root event itself.
    Root { is_root: bool },
    /// Hop mode: delay between the parent event and the reaction.
    Hop { delay: Timestamp },
}

/// Borrowed view of one bipartite edge.
#[derive(Debug, Clone, Copy)]
pub struct BipartiteEdge<'g> {
    pub index: usize,
    pub source: &'g Vertex,
    pub target: &'g Vertex,
    /// Event time in root mode, parent event time in hop mode.
    pub time: Timestamp,
    pub meta: EdgeMeta,
    pub root: &'g EventId,
    pub attributes: &'g PropertyMap,
}

impl BipartiteEdge<'_> {
    pub fn is_root(&self) -> bool {
        matches!(self.meta, EdgeMeta::Root { is_root: true })
    }

    pub fn delay(&self) -> Option<Timestamp> {
        match self.meta {
            EdgeMeta::Hop { delay } => Some(delay),
            EdgeMeta::Root { .. } => None,
        }
    }
}

// ============================================================================
// BipartiteGraph
// ============================================================================

/// Immutable actor ↔ root / actor ↔ parent-actor relation.
#[derive(Debug, Clone)]
pub struct BipartiteGraph {
    mode: Mode,
    vertices: Vec<Vertex>,
    vertex_index: HashMap<Vertex, VertexId>,
    sources: Vec<VertexId>,
    targets: Vec<VertexId>,
    times: Vec<Timestamp>,
    meta: Vec<EdgeMeta>,
    roots: Vec<EventId>,
    attributes: Vec<PropertyMap>,
    /// `incoming_edges[incoming_offsets[v]..incoming_offsets[v + 1]]`
    incoming_offsets: Vec<usize>,
    incoming_edges: Vec<usize>,
}

impl BipartiteGraph {
    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn edge_count(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    pub fn vertex(&self, id: VertexId) -> &Vertex {
        &self.vertices[id.0]
    }

    pub fn vertex_id(&self, vertex: &Vertex) -> Option<VertexId> {
        self.vertex_index.get(vertex).copied()
    }

    /// All vertex ids, in interning order.
    pub fn vertex_ids(&self) -> impl Iterator<Item = VertexId> + '_ {
        (0..self.vertices.len()).map(VertexId)
    }

    pub fn edge(&self, index: usize) -> BipartiteEdge<'_> {
        BipartiteEdge {
            index,
            source: self.vertex(self.sources[index]),
            target: self.vertex(self.targets[index]),
            time: self.times[index],
            meta: self.meta[index],
            root: &self.roots[index],
            attributes: &self.attributes[index],
        }
    }

    pub fn edges(&self) -> impl Iterator<Item = BipartiteEdge<'_>> + '_ {
        (0..self.edge_count()).map(move |i| self.edge(i))
    }

    pub fn in_degree(&self, v: VertexId) -> usize {
        let v = v.0;
        self.incoming_offsets[v + 1] - self.incoming_offsets[v]
    }

    /// Incoming edges of `v`, in insertion order.
    pub fn incoming(&self, v: VertexId) -> impl Iterator<Item = BipartiteEdge<'_>> + '_ {
        let v = v.0;
        self.incoming_edges[self.incoming_offsets[v]..self.incoming_offsets[v + 1]]
            .iter()
            .map(move |&e| self.edge(e))
    }
}

// ============================================================================
// Builder
// ============================================================================

/// One-shot writer for a [`BipartiteGraph`].
#[derive(Debug)]
pub struct BipartiteBuilder {
    mode: Mode,
    vertices: Vec<Vertex>,
    vertex_index: HashMap<Vertex, VertexId>,
    sources: Vec<VertexId>,
    targets: Vec<VertexId>,
    times: Vec<Timestamp>,
    meta: Vec<EdgeMeta>,
    roots: Vec<EventId>,
    attributes: Vec<PropertyMap>,
}

impl BipartiteBuilder {
    pub fn new(mode: Mode) -> Self {
        Self::with_capacity(mode, 0)
    }

    pub fn with_capacity(mode: Mode, edges: usize) -> Self {
        Self {
            mode,
            vertices: Vec::new(),
            vertex_index: HashMap::new(),
            sources: Vec::with_capacity(edges),
            targets: Vec::with_capacity(edges),
            times: Vec::with_capacity(edges),
            meta: Vec::with_capacity(edges),
            roots: Vec::with_capacity(edges),
            attributes: Vec::with_capacity(edges),
        }
    }

    /// Intern a vertex, returning its id.
    pub fn vertex(&mut self, vertex: Vertex) -> VertexId {
        if let Some(&id) = self.vertex_index.get(&vertex) {
            return id;
        }
        let id = VertexId(self.vertices.len());
        self.vertices.push(vertex.clone());
        self.vertex_index.insert(vertex, id);
        id
    }

    pub fn add_edge(
        &mut self,
        source: Vertex,
        target: Vertex,
        time: Timestamp,
        meta: EdgeMeta,
        root: EventId,
        attributes: PropertyMap,
    ) {
        let s = self.vertex(source);
        let t = self.vertex(target);
        self.sources.push(s);
        self.targets.push(t);
        self.times.push(time);
        self.meta.push(meta);
        self.roots.push(root);
        self.attributes.push(attributes);
    }

    /// Freeze the graph and build the incoming index.
    pub fn finish(self) -> BipartiteGraph {
        let n = self.vertices.len();
        let mut incoming_offsets = vec![0usize; n + 1];
        for t in &self.targets {
            incoming_offsets[t.0 + 1] += 1;
        }
        for v in 0..n {
            incoming_offsets[v + 1] += incoming_offsets[v];
        }

        let mut cursor = incoming_offsets.clone();
        let mut incoming_edges = vec![0usize; self.targets.len()];
        for (e, t) in self.targets.iter().enumerate() {
            let slot = &mut cursor[t.0];
            incoming_edges[*slot] = e;
            *slot += 1;
        }

        BipartiteGraph {
            mode: self.mode,
            vertices: self.vertices,
            vertex_index: self.vertex_index,
            sources: self.sources,
            targets: self.targets,
            times: self.times,
            meta: self.meta,
            roots: self.roots,
            attributes: self.attributes,
            incoming_offsets,
            incoming_edges,
        }
    }
}
