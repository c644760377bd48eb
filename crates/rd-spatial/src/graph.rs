//! Undirected waypoint graph derived from driver routes.
//!
//! # Construction
//!
//! Every route `[w0, w1, …, wn]` contributes the undirected edges
//! `w0–w1, w1–w2, …`.  Duplicate edges collapse; a repeated waypoint
//! (`[…, 3, 3, …]`) contributes its node but no self-loop.  A one-waypoint
//! route still adds its node, as an isolated vertex.
//!
//! The graph is derived state.  It carries no link back to the routes it was
//! built from, so it must be rebuilt whenever a route changes.
//!
//! # Data layout
//!
//! Node ids are caller-assigned and sparse, so [`build`](RouteGraphBuilder::build)
//! maps them to dense indices `0..n` (ascending by `NodeId`) and stores
//! adjacency in **Compressed Sparse Row** form:
//!
//! ```text
//! neighbors of dense node i = adj[ adj_start[i] .. adj_start[i+1] ]
//! ```
//!
//! Each row is sorted ascending, so traversal order is deterministic.

use rustc_hash::{FxHashMap, FxHashSet};

use rd_core::{Driver, NodeId};

// ── RouteGraph ────────────────────────────────────────────────────────────────

/// Immutable undirected graph in CSR format.  Use [`RouteGraphBuilder`] or
/// one of the `from_*` helpers to construct.
#[derive(Clone, Debug, Default)]
pub struct RouteGraph {
    /// Dense index → node id, ascending.
    nodes: Vec<NodeId>,
    /// Node id → dense index.
    index: FxHashMap<NodeId, u32>,
    /// CSR row pointer.  Length = `node_count + 1`.
    adj_start: Vec<u32>,
    /// Dense neighbour indices, each row sorted ascending.
    adj: Vec<u32>,
}

impl RouteGraph {
    /// A graph with no nodes.  Any path query between distinct nodes fails.
    pub fn empty() -> Self {
        RouteGraphBuilder::new().build()
    }

    /// Fold every route's consecutive waypoint pairs into edges.
    pub fn from_routes<I, R>(routes: I) -> Self
    where
        I: IntoIterator<Item = R>,
        R: AsRef<[NodeId]>,
    {
        let mut b = RouteGraphBuilder::new();
        for route in routes {
            b.add_route(route.as_ref());
        }
        b.build()
    }

    /// Build from the planned routes of a driver snapshot.
    pub fn from_drivers(drivers: &[Driver]) -> Self {
        Self::from_routes(drivers.iter().map(|d| d.route.as_slice()))
    }

    // ── Graph dimensions ──────────────────────────────────────────────────

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of undirected edges.
    pub fn edge_count(&self) -> usize {
        self.adj.len() / 2
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn contains(&self, node: NodeId) -> bool {
        self.index.contains_key(&node)
    }

    /// All node ids, ascending.
    pub fn nodes(&self) -> &[NodeId] {
        &self.nodes
    }

    // ── Adjacency ─────────────────────────────────────────────────────────

    /// Neighbours of `node` in ascending order.  Empty for unknown nodes.
    pub fn neighbors(&self, node: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        let row = self.dense(node).map(|i| self.row(i)).unwrap_or(&[]);
        row.iter().map(|&j| self.nodes[j as usize])
    }

    pub fn degree(&self, node: NodeId) -> usize {
        self.dense(node).map_or(0, |i| self.row(i).len())
    }

    /// `true` if `a` and `b` share an edge.
    pub fn has_edge(&self, a: NodeId, b: NodeId) -> bool {
        match (self.dense(a), self.dense(b)) {
            (Some(i), Some(j)) => self.row(i).binary_search(&j).is_ok(),
            _ => false,
        }
    }

    /// `true` if a path (possibly of length zero) joins `a` and `b`.
    pub fn is_connected(&self, a: NodeId, b: NodeId) -> bool {
        crate::router::shortest_path(self, a, b).is_ok()
    }

    // ── Dense-index access for search internals ───────────────────────────

    #[inline]
    pub(crate) fn dense(&self, node: NodeId) -> Option<u32> {
        self.index.get(&node).copied()
    }

    #[inline]
    pub(crate) fn node_at(&self, i: u32) -> NodeId {
        self.nodes[i as usize]
    }

    #[inline]
    pub(crate) fn row(&self, i: u32) -> &[u32] {
        let start = self.adj_start[i as usize] as usize;
        let end   = self.adj_start[i as usize + 1] as usize;
        &self.adj[start..end]
    }
}

// ── RouteGraphBuilder ─────────────────────────────────────────────────────────

/// Accumulate nodes and undirected edges, then call [`build`](Self::build).
///
/// # Example
///
/// ```
/// use rd_core::NodeId;
/// use rd_spatial::RouteGraphBuilder;
///
/// let mut b = RouteGraphBuilder::new();
/// b.add_route(&[NodeId(1), NodeId(2), NodeId(3)]);
/// b.add_route(&[NodeId(3), NodeId(2)]); // duplicate edge, collapses
/// let g = b.build();
/// assert_eq!(g.node_count(), 3);
/// assert_eq!(g.edge_count(), 2);
/// ```
#[derive(Default)]
pub struct RouteGraphBuilder {
    adj: FxHashMap<NodeId, FxHashSet<NodeId>>,
}

impl RouteGraphBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an isolated node (no-op if already present).
    pub fn add_node(&mut self, node: NodeId) {
        self.adj.entry(node).or_default();
    }

    /// Add the undirected edge `a–b`.  Both endpoints become nodes; `a == b`
    /// adds the node only.
    pub fn add_edge(&mut self, a: NodeId, b: NodeId) {
        if a == b {
            self.add_node(a);
            return;
        }
        self.adj.entry(a).or_default().insert(b);
        self.adj.entry(b).or_default().insert(a);
    }

    /// Add every consecutive pair of `route` as an edge.
    pub fn add_route(&mut self, route: &[NodeId]) {
        if let [only] = route {
            self.add_node(*only);
        }
        for pair in route.windows(2) {
            self.add_edge(pair[0], pair[1]);
        }
    }

    pub fn node_count(&self) -> usize {
        self.adj.len()
    }

    /// Consume the builder and produce a [`RouteGraph`].
    ///
    /// Time complexity: O(N log N + E log E) for sorting nodes and rows.
    pub fn build(self) -> RouteGraph {
        let mut nodes: Vec<NodeId> = self.adj.keys().copied().collect();
        nodes.sort_unstable();

        let index: FxHashMap<NodeId, u32> = nodes
            .iter()
            .enumerate()
            .map(|(i, &n)| (n, i as u32))
            .collect();

        let mut adj_start = Vec::with_capacity(nodes.len() + 1);
        let mut adj = Vec::new();
        adj_start.push(0u32);
        for node in &nodes {
            let row_start = adj.len();
            if let Some(set) = self.adj.get(node) {
                adj.extend(set.iter().map(|n| index[n]));
            }
            // Dense indices follow NodeId order, so sorting them sorts by id.
            adj[row_start..].sort_unstable();
            adj_start.push(adj.len() as u32);
        }
        debug_assert_eq!(adj.len() % 2, 0, "undirected adjacency must be symmetric");

        RouteGraph { nodes, index, adj_start, adj }
    }
}
