//! Proximity search over a driver snapshot.
//!
//! Two entry points answer the same question with identical results:
//!
//! - [`nearest`]: a one-shot min-heap scan over a driver slice.  O(n log n)
//!   worst case, no setup.  This is what immediate dispatch calls.
//! - [`GeoIndex`]: an R-tree (via `rstar`) bulk-loaded from a snapshot, for
//!   callers that issue many proximity queries against the same roster
//!   (k-nearest, radius search).
//!
//! # Tie-breaking
//!
//! Candidates are ranked by the total order `(squared distance, DriverId)`.
//! Equidistant drivers therefore resolve to the **lowest `DriverId`**, in
//! both entry points, regardless of input order.

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

use rstar::{PointDistance, RTree, RTreeObject, AABB};

use rd_core::{Driver, DriverId, Point};

use crate::{SpatialError, SpatialResult};

// ── Ranking key ───────────────────────────────────────────────────────────────

/// Compare squared distances, sorting NaN after every real value.
#[inline]
fn cmp_distance(a: f64, b: f64) -> Ordering {
    a.partial_cmp(&b)
        .unwrap_or_else(|| a.is_nan().cmp(&b.is_nan()))
}

/// Heap key: `(squared distance, driver id, slice position)`.
///
/// The slice position only matters if a caller violates id uniqueness; it
/// keeps the result stable (first occurrence) in that case.
#[derive(Copy, Clone, Debug)]
struct Rank {
    distance_2: f64,
    id:         DriverId,
    slot:       usize,
}

impl Ord for Rank {
    fn cmp(&self, other: &Self) -> Ordering {
        cmp_distance(self.distance_2, other.distance_2)
            .then(self.id.cmp(&other.id))
            .then(self.slot.cmp(&other.slot))
    }
}

impl PartialOrd for Rank {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Rank {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Rank {}

// ── One-shot search ───────────────────────────────────────────────────────────

/// The winner of a proximity query.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Nearest<'a> {
    pub driver:      &'a Driver,
    /// Straight-line distance from the query point, in kilometres.
    pub distance_km: f64,
}

/// Return the driver closest to `at`.
///
/// # Errors
///
/// [`SpatialError::EmptyDriverPool`] if `drivers` is empty.
pub fn nearest(drivers: &[Driver], at: Point) -> SpatialResult<Nearest<'_>> {
    // Min-heap via Reverse; heapify from the iterator is O(n).
    let mut heap: BinaryHeap<Reverse<Rank>> = drivers
        .iter()
        .enumerate()
        .map(|(slot, d)| {
            Reverse(Rank {
                distance_2: d.position.distance_2(at),
                id:         d.id,
                slot,
            })
        })
        .collect();

    let Reverse(best) = heap.pop().ok_or(SpatialError::EmptyDriverPool)?;
    Ok(Nearest {
        driver:      &drivers[best.slot],
        distance_km: best.distance_2.sqrt(),
    })
}

// ── R-tree entry ──────────────────────────────────────────────────────────────

/// Entry stored in the R-tree: a 2-D `[x, y]` point with the owning driver.
#[derive(Clone, Debug)]
struct DriverEntry {
    point: [f64; 2],
    id:    DriverId,
}

impl RTreeObject for DriverEntry {
    type Envelope = AABB<[f64; 2]>;
    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.point)
    }
}

impl PointDistance for DriverEntry {
    /// Squared Euclidean distance, computed exactly as [`Point::distance_2`]
    /// so both search paths rank identically.
    fn distance_2(&self, point: &[f64; 2]) -> f64 {
        let dx = self.point[0] - point[0];
        let dy = self.point[1] - point[1];
        dx * dx + dy * dy
    }
}

// ── GeoIndex ──────────────────────────────────────────────────────────────────

/// A driver id with its distance from a query point.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Neighbor {
    pub id:          DriverId,
    pub distance_km: f64,
}

/// R-tree over driver positions, built from a roster snapshot.
///
/// The index holds ids and positions only.  It is derived state: rebuild it
/// whenever a driver is added, removed, or moves.
pub struct GeoIndex {
    tree: RTree<DriverEntry>,
}

impl GeoIndex {
    /// Bulk-load an index from `drivers`.  O(n log n).
    ///
    /// Positions must be finite; NaN coordinates produce unspecified
    /// rankings.
    pub fn build(drivers: &[Driver]) -> Self {
        let entries = drivers
            .iter()
            .map(|d| DriverEntry { point: d.position.to_array(), id: d.id })
            .collect();
        Self { tree: RTree::bulk_load(entries) }
    }

    pub fn len(&self) -> usize {
        self.tree.size()
    }

    pub fn is_empty(&self) -> bool {
        self.tree.size() == 0
    }

    /// Closest driver to `at`; equidistant drivers resolve to the lowest id.
    pub fn nearest(&self, at: Point) -> SpatialResult<Neighbor> {
        let mut iter = self.tree.nearest_neighbor_iter_with_distance_2(&at.to_array());
        let (first, best_d2) = iter.next().ok_or(SpatialError::EmptyDriverPool)?;
        let id = iter
            .take_while(|(_, d2)| *d2 == best_d2)
            .map(|(e, _)| e.id)
            .fold(first.id, DriverId::min);
        Ok(Neighbor { id, distance_km: best_d2.sqrt() })
    }

    /// Up to `k` closest drivers, ordered by `(distance, id)`.
    pub fn k_nearest(&self, at: Point, k: usize) -> Vec<Neighbor> {
        if k == 0 {
            return Vec::new();
        }
        let mut found: Vec<(f64, DriverId)> = Vec::with_capacity(k);
        for (e, d2) in self.tree.nearest_neighbor_iter_with_distance_2(&at.to_array()) {
            // Keep pulling past k while the boundary distance is tied, so the
            // id tie-break below sees every candidate at that distance.
            if found.len() >= k && found.last().is_some_and(|&(last, _)| d2 > last) {
                break;
            }
            found.push((d2, e.id));
        }
        finish(found, Some(k))
    }

    /// Every driver within `radius_km` of `at` (inclusive), ordered by
    /// `(distance, id)`.  A negative or NaN radius finds nothing.
    pub fn within_radius(&self, at: Point, radius_km: f64) -> Vec<Neighbor> {
        // Squaring would turn a negative radius into a positive one.
        if radius_km.is_nan() || radius_km < 0.0 {
            return Vec::new();
        }
        let query = at.to_array();
        let found = self
            .tree
            .locate_within_distance(query, radius_km * radius_km)
            .map(|e| (e.distance_2(&query), e.id))
            .collect();
        finish(found, None)
    }
}

fn finish(mut found: Vec<(f64, DriverId)>, limit: Option<usize>) -> Vec<Neighbor> {
    found.sort_unstable_by(|a, b| cmp_distance(a.0, b.0).then(a.1.cmp(&b.1)));
    if let Some(k) = limit {
        found.truncate(k);
    }
    found
        .into_iter()
        .map(|(d2, id)| Neighbor { id, distance_km: d2.sqrt() })
        .collect()
}
