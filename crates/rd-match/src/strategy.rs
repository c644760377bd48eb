//! Strategy trait shared by the proximity and route-overlap matchers.

use std::fmt;

use rd_core::{Driver, Rider};
use rd_spatial::{Path, PathFinder, nearest};

use crate::{MatchError, MatchResult, OverlapMatcher};

/// Which selection rule produced (or should produce) an assignment.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Strategy {
    /// Closest driver by straight-line distance.
    #[default]
    Nearest,
    /// Driver whose planned route best overlaps the rider's trip.
    RouteOverlap,
}

impl Strategy {
    pub fn as_str(self) -> &'static str {
        match self {
            Strategy::Nearest      => "nearest",
            Strategy::RouteOverlap => "route_overlap",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A driver chosen by a [`MatchStrategy`], with the evidence behind it.
#[derive(Debug, Clone, PartialEq)]
pub struct Selection<'a> {
    pub driver:             &'a Driver,
    /// Straight-line distance from the driver to the rider, in kilometres.
    pub pickup_distance_km: f64,
    /// Route-overlap score; `None` for proximity selection.
    pub overlap:            Option<u32>,
    /// The rider's shortest path; `None` for proximity selection.
    pub rider_path:         Option<Path>,
}

/// A rule for choosing one driver for one rider.
///
/// Implementations are pure: they read the snapshot and never mutate it.
/// Applying the result (e.g. moving the driver) is the caller's job.
///
/// # Thread safety
///
/// `Send + Sync` so a dispatcher can share one strategy across threads.
pub trait MatchStrategy: Send + Sync {
    fn kind(&self) -> Strategy;

    fn select<'a>(&self, drivers: &'a [Driver], rider: &Rider) -> MatchResult<Selection<'a>>;
}

/// Proximity strategy: delegates to [`rd_spatial::nearest`].
#[derive(Debug, Default, Clone, Copy)]
pub struct NearestDriver;

impl MatchStrategy for NearestDriver {
    fn kind(&self) -> Strategy {
        Strategy::Nearest
    }

    fn select<'a>(&self, drivers: &'a [Driver], rider: &Rider) -> MatchResult<Selection<'a>> {
        let hit = nearest(drivers, rider.position)?;
        Ok(Selection {
            driver:             hit.driver,
            pickup_distance_km: hit.distance_km,
            overlap:            None,
            rider_path:         None,
        })
    }
}

impl<P: PathFinder> MatchStrategy for OverlapMatcher<P> {
    fn kind(&self) -> Strategy {
        Strategy::RouteOverlap
    }

    fn select<'a>(&self, drivers: &'a [Driver], rider: &Rider) -> MatchResult<Selection<'a>> {
        let (from, to) = rider.trip().ok_or(MatchError::RiderNotRouted(rider.id))?;
        let m = self.best_overlap(drivers, from, to)?;
        Ok(Selection {
            driver:             m.driver,
            pickup_distance_km: m.driver.position.distance(rider.position),
            overlap:            Some(m.score),
            rider_path:         Some(m.rider_path),
        })
    }
}
