//! Driver and rider records.
//!
//! Both are plain owned values constructed by the caller.  The matching
//! crates only ever borrow them for the duration of one query; the
//! dispatch layer owns the driver roster.
//!
//! A driver carries two independent notions of "where":
//!
//! - `position`: a planar [`Point`], used by proximity dispatch;
//! - `route`   : an ordered list of waypoint [`NodeId`]s, used by
//!   route-overlap dispatch.
//!
//! The two are never mixed within one query.

use crate::{DriverId, NodeId, Point, RiderId};

/// A driver available for dispatch.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Driver {
    pub id: DriverId,
    /// Current position.  Overwritten with the rider's position on pickup.
    pub position: Point,
    /// Cruising speed in km/h.  Zero is valid and yields an unknown ETA.
    pub speed_kmh: f64,
    /// Planned waypoints in travel order.  May be empty.
    #[cfg_attr(feature = "serde", serde(default))]
    pub route: Vec<NodeId>,
}

impl Driver {
    pub fn new(id: impl Into<DriverId>, position: Point, speed_kmh: f64) -> Self {
        Self {
            id: id.into(),
            position,
            speed_kmh,
            route: Vec::new(),
        }
    }

    /// Replace the planned route, builder style.
    pub fn with_route<I>(mut self, route: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<NodeId>,
    {
        self.route = route.into_iter().map(Into::into).collect();
        self
    }

    pub fn has_route(&self) -> bool {
        !self.route.is_empty()
    }
}

/// A ride request.
///
/// `pickup_node` and `destination` are only consulted by route-overlap
/// dispatch; proximity dispatch uses `position` alone.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rider {
    pub id: RiderId,
    pub position: Point,
    #[cfg_attr(feature = "serde", serde(default))]
    pub pickup_node: Option<NodeId>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub destination: Option<NodeId>,
}

impl Rider {
    /// A rider known only by planar position.
    pub fn new(id: impl Into<RiderId>, position: Point) -> Self {
        Self {
            id: id.into(),
            position,
            pickup_node: None,
            destination: None,
        }
    }

    /// Attach waypoint-graph endpoints, builder style.
    pub fn with_trip(mut self, pickup: impl Into<NodeId>, destination: impl Into<NodeId>) -> Self {
        self.pickup_node = Some(pickup.into());
        self.destination = Some(destination.into());
        self
    }

    /// `(pickup, destination)` when both graph endpoints are known.
    pub fn trip(&self) -> Option<(NodeId, NodeId)> {
        self.pickup_node.zip(self.destination)
    }
}
