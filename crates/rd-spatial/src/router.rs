//! Shortest-path search over a [`RouteGraph`].
//!
//! # Pluggability
//!
//! Matching code calls path search through the [`PathFinder`] trait, so an
//! application can swap in a weighted search without touching the matcher.
//! The default [`BfsPathFinder`] is exact for this graph: edges mean
//! "consecutive waypoints on some route", not distance, so the shortest path
//! is the one with the fewest hops.

use std::collections::VecDeque;

use rustc_hash::FxHashSet;

use rd_core::NodeId;

use crate::graph::RouteGraph;
use crate::{SpatialError, SpatialResult};

// ── Path ──────────────────────────────────────────────────────────────────────

/// An ordered node sequence from source to destination, both inclusive.
///
/// Never empty: a zero-hop path holds the single source node.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "Vec<NodeId>", into = "Vec<NodeId>"))]
pub struct Path {
    nodes: Vec<NodeId>,
}

impl Path {
    pub fn nodes(&self) -> &[NodeId] {
        &self.nodes
    }

    pub fn into_nodes(self) -> Vec<NodeId> {
        self.nodes
    }

    /// Number of edges traversed.
    pub fn hops(&self) -> usize {
        self.nodes.len() - 1
    }

    pub fn source(&self) -> NodeId {
        self.nodes[0]
    }

    pub fn destination(&self) -> NodeId {
        self.nodes[self.nodes.len() - 1]
    }

    /// `true` if source and destination are the same node.
    pub fn is_trivial(&self) -> bool {
        self.nodes.len() == 1
    }

    /// The path's nodes as a set, for O(1) membership tests.
    pub fn node_set(&self) -> FxHashSet<NodeId> {
        self.nodes.iter().copied().collect()
    }
}

impl TryFrom<Vec<NodeId>> for Path {
    type Error = SpatialError;

    fn try_from(nodes: Vec<NodeId>) -> SpatialResult<Self> {
        if nodes.is_empty() {
            return Err(SpatialError::EmptyPath);
        }
        Ok(Path { nodes })
    }
}

impl From<Path> for Vec<NodeId> {
    fn from(path: Path) -> Self {
        path.nodes
    }
}

// ── PathFinder trait ──────────────────────────────────────────────────────────

/// Pluggable path search.
///
/// # Thread safety
///
/// Implementations must be `Send + Sync` so one finder can serve concurrent
/// matching queries.
pub trait PathFinder: Send + Sync {
    /// Compute a path from `from` to `to`.
    ///
    /// `from == to` yields a one-node path even if the node is absent from
    /// the graph.
    ///
    /// # Errors
    ///
    /// [`SpatialError::NoPath`] if `to` is unreachable from `from`.
    fn shortest_path(&self, graph: &RouteGraph, from: NodeId, to: NodeId) -> SpatialResult<Path>;
}

// ── BfsPathFinder ─────────────────────────────────────────────────────────────

/// Breadth-first search; returns a minimum-hop path.
#[derive(Debug, Default, Clone, Copy)]
pub struct BfsPathFinder;

impl PathFinder for BfsPathFinder {
    fn shortest_path(&self, graph: &RouteGraph, from: NodeId, to: NodeId) -> SpatialResult<Path> {
        shortest_path(graph, from, to)
    }
}

// ── BFS internals ─────────────────────────────────────────────────────────────

const UNVISITED: u32 = u32::MAX;

/// Minimum-hop path from `from` to `to`.
///
/// Each node records the neighbour it was first discovered from; since
/// neighbours are expanded in ascending id order the result is deterministic
/// among equal-length alternatives.  The search stops as soon as `to` is
/// dequeued.
pub fn shortest_path(graph: &RouteGraph, from: NodeId, to: NodeId) -> SpatialResult<Path> {
    if from == to {
        return Ok(Path { nodes: vec![from] });
    }
    let no_path = SpatialError::NoPath { from, to };
    let (Some(src), Some(dst)) = (graph.dense(from), graph.dense(to)) else {
        return Err(no_path);
    };

    // prev[v] = dense node v was discovered from; the source points at itself.
    let mut prev = vec![UNVISITED; graph.node_count()];
    prev[src as usize] = src;

    let mut queue = VecDeque::new();
    queue.push_back(src);

    while let Some(cur) = queue.pop_front() {
        if cur == dst {
            return Ok(reconstruct(graph, &prev, src, dst));
        }
        for &next in graph.row(cur) {
            if prev[next as usize] == UNVISITED {
                prev[next as usize] = cur;
                queue.push_back(next);
            }
        }
    }

    Err(no_path)
}

fn reconstruct(graph: &RouteGraph, prev: &[u32], src: u32, dst: u32) -> Path {
    let mut nodes = vec![graph.node_at(dst)];
    let mut cur = dst;
    while cur != src {
        cur = prev[cur as usize];
        nodes.push(graph.node_at(cur));
    }
    nodes.reverse();
    Path { nodes }
}
