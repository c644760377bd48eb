//! Route-overlap matching.
//!
//! # Pipeline
//!
//! ```text
//! ① Graph  : fold every driver's route into a RouteGraph.
//! ② Path   : shortest (fewest-hop) path from the rider's pickup node to
//!            their destination.  No path → SpatialError::NoPath.
//! ③ Score  : for each driver, count route entries that lie on the path.
//! ④ Select : highest score wins; ties go to the lowest DriverId.
//!            Every score zero → MatchError::NoMatch.
//! ```
//!
//! # Scoring
//!
//! Overlap counts **occurrences**, not distinct nodes: a route that visits
//! a path node twice scores two for it.  A distinct-node score would be an
//! equally valid contract but ranks loops differently.

#[cfg(feature = "parallel")]
use rayon::prelude::*;
use rustc_hash::FxHashSet;

use rd_core::{Driver, NodeId};
use rd_spatial::{BfsPathFinder, Path, PathFinder, RouteGraph, SpatialError};

use crate::{MatchError, MatchResult};

/// Number of entries of `route` that are members of `path_nodes`.
#[inline]
pub fn overlap_score(route: &[NodeId], path_nodes: &FxHashSet<NodeId>) -> u32 {
    route.iter().filter(|n| path_nodes.contains(n)).count() as u32
}

/// The winning driver of a route-overlap query.
#[derive(Debug, Clone, PartialEq)]
pub struct OverlapMatch<'a> {
    pub driver:     &'a Driver,
    pub score:      u32,
    /// The rider's shortest path the score was computed against.
    pub rider_path: Path,
}

/// Route-overlap matcher, generic over the path search.
///
/// Stateless apart from the finder; one instance can serve any number of
/// concurrent queries.
#[derive(Debug, Default, Clone)]
pub struct OverlapMatcher<P: PathFinder = BfsPathFinder> {
    finder: P,
}

impl OverlapMatcher<BfsPathFinder> {
    pub fn new() -> Self {
        Self { finder: BfsPathFinder }
    }
}

impl<P: PathFinder> OverlapMatcher<P> {
    pub fn with_finder(finder: P) -> Self {
        Self { finder }
    }

    /// Pick the driver whose route best overlaps the rider's shortest path
    /// from `from` to `to`.
    ///
    /// The route graph is rebuilt from `drivers` on every call, so the result
    /// always reflects the routes as passed.  Use
    /// [`best_overlap_in`](Self::best_overlap_in) to reuse a graph across
    /// queries on an unchanged roster.
    ///
    /// # Errors
    ///
    /// - `SpatialError::EmptyDriverPool` if `drivers` is empty.
    /// - `SpatialError::NoPath` if `to` is unreachable from `from`.
    /// - `MatchError::NoMatch` if every driver scores zero.
    pub fn best_overlap<'a>(
        &self,
        drivers: &'a [Driver],
        from:    NodeId,
        to:      NodeId,
    ) -> MatchResult<OverlapMatch<'a>> {
        if drivers.is_empty() {
            return Err(SpatialError::EmptyDriverPool.into());
        }
        let graph = RouteGraph::from_drivers(drivers);
        self.best_overlap_in(&graph, drivers, from, to)
    }

    /// As [`best_overlap`](Self::best_overlap), against a caller-supplied
    /// graph.  The caller is responsible for `graph` matching `drivers`.
    pub fn best_overlap_in<'a>(
        &self,
        graph:   &RouteGraph,
        drivers: &'a [Driver],
        from:    NodeId,
        to:      NodeId,
    ) -> MatchResult<OverlapMatch<'a>> {
        if drivers.is_empty() {
            return Err(SpatialError::EmptyDriverPool.into());
        }
        let rider_path = self.finder.shortest_path(graph, from, to)?;
        let scores = score_drivers(drivers, &rider_path.node_set());

        let (slot, score) = select_best(drivers, &scores).ok_or(MatchError::NoMatch { from, to })?;
        Ok(OverlapMatch { driver: &drivers[slot], score, rider_path })
    }

    /// Overlap score of every driver, in input order, against the rider's
    /// shortest path.  Useful for diagnostics and ranking displays.
    ///
    /// Fails like [`best_overlap`](Self::best_overlap), except that an
    /// all-zero result is returned as is rather than as `NoMatch`.
    pub fn scores<'a>(
        &self,
        drivers: &'a [Driver],
        from:    NodeId,
        to:      NodeId,
    ) -> MatchResult<Vec<(&'a Driver, u32)>> {
        if drivers.is_empty() {
            return Err(SpatialError::EmptyDriverPool.into());
        }
        let graph = RouteGraph::from_drivers(drivers);
        let rider_path = self.finder.shortest_path(&graph, from, to)?;
        let scores = score_drivers(drivers, &rider_path.node_set());
        Ok(drivers.iter().zip(scores).collect())
    }
}

fn score_drivers(drivers: &[Driver], path_nodes: &FxHashSet<NodeId>) -> Vec<u32> {
    #[cfg(feature = "parallel")]
    {
        score_parallel(drivers, path_nodes)
    }
    #[cfg(not(feature = "parallel"))]
    {
        score_sequential(drivers, path_nodes)
    }
}

#[cfg(any(not(feature = "parallel"), test))]
pub(crate) fn score_sequential(drivers: &[Driver], path_nodes: &FxHashSet<NodeId>) -> Vec<u32> {
    drivers
        .iter()
        .map(|d| overlap_score(&d.route, path_nodes))
        .collect()
}

/// Same scores as the sequential pass, in input order.
#[cfg(feature = "parallel")]
pub(crate) fn score_parallel(drivers: &[Driver], path_nodes: &FxHashSet<NodeId>) -> Vec<u32> {
    drivers
        .par_iter()
        .map(|d| overlap_score(&d.route, path_nodes))
        .collect()
}

/// Slot and score of the best positive score; ties go to the lowest id.
fn select_best(drivers: &[Driver], scores: &[u32]) -> Option<(usize, u32)> {
    let mut best: Option<(usize, u32)> = None;
    for (slot, (driver, &score)) in drivers.iter().zip(scores).enumerate() {
        if score == 0 {
            continue;
        }
        best = match best {
            None => Some((slot, score)),
            Some((b, s)) if score > s || (score == s && driver.id < drivers[b].id) => {
                Some((slot, score))
            }
            keep => keep,
        };
    }
    best
}
