//! The dispatch facade.

use parking_lot::RwLockUpgradableReadGuard;
use tracing::{debug, info};

use rd_core::{DispatchConfig, DriverId, FareQuote, NodeId, Rider, RiderId};
use rd_match::{MatchStrategy, NearestDriver, OverlapMatcher, Selection, Strategy};
use rd_spatial::{BfsPathFinder, PathFinder};

use crate::{DispatchError, DispatchResult, RideQueue, ScheduledOutcome, SharedRoster};

/// A committed driver-rider pairing.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Assignment {
    pub rider:    RiderId,
    pub driver:   DriverId,
    pub strategy: Strategy,
    /// Fare and ETA for the pickup leg.
    pub quote:    FareQuote,
    /// Route-overlap score; `None` for proximity dispatch.
    pub overlap:  Option<u32>,
    /// The rider's shortest waypoint path; empty for proximity dispatch.
    pub rider_path: Vec<NodeId>,
    /// `true` if the driver was relocated to the rider.
    pub picked_up: bool,
}

/// Selects drivers for riders against a [`SharedRoster`].
///
/// `Dispatcher` is `Sync`; wrap it in an `Arc` to serve requests from many
/// threads.
pub struct Dispatcher<P: PathFinder = BfsPathFinder> {
    roster:  SharedRoster,
    config:  DispatchConfig,
    overlap: OverlapMatcher<P>,
}

impl Dispatcher<BfsPathFinder> {
    /// Create a dispatcher using breadth-first route search.
    pub fn new(roster: SharedRoster, config: DispatchConfig) -> DispatchResult<Self> {
        Self::with_path_finder(roster, config, BfsPathFinder)
    }
}

impl<P: PathFinder> Dispatcher<P> {
    pub fn with_path_finder(
        roster: SharedRoster,
        config: DispatchConfig,
        finder: P,
    ) -> DispatchResult<Self> {
        config.validate()?;
        Ok(Self { roster, config, overlap: OverlapMatcher::with_finder(finder) })
    }

    pub fn roster(&self) -> &SharedRoster {
        &self.roster
    }

    pub fn config(&self) -> &DispatchConfig {
        &self.config
    }

    /// Assign the closest driver to `rider` and, if configured, move that
    /// driver to the rider's position.
    ///
    /// Selection and relocation happen under one upgradable lock, so no
    /// other writer can move or remove the chosen driver in between.
    ///
    /// Fails with [`DispatchError::InvalidRiderPosition`] before touching the
    /// roster if the rider's coordinates are not finite.
    pub fn assign_immediate(&self, rider: &Rider) -> DispatchResult<Assignment> {
        check_rider(rider)?;
        let roster = self.roster.upgradable_read();
        let mut assignment = {
            let sel = NearestDriver.select(roster.drivers(), rider)?;
            self.price(rider, Strategy::Nearest, sel)
        };

        if self.config.move_on_pickup {
            let mut roster = RwLockUpgradableReadGuard::upgrade(roster);
            roster.update_position(assignment.driver, rider.position)?;
            assignment.picked_up = true;
        }

        info!(
            rider = %assignment.rider,
            driver = %assignment.driver,
            distance_km = assignment.quote.distance_km,
            fare = assignment.quote.fare,
            eta = %assignment.quote.eta,
            "immediate ride assigned",
        );
        Ok(assignment)
    }

    /// Assign the driver whose planned route best overlaps the rider's trip.
    /// The roster is not modified.
    pub fn assign_by_route(&self, rider: &Rider) -> DispatchResult<Assignment> {
        check_rider(rider)?;
        let roster = self.roster.read();
        let sel = self.overlap.select(roster.drivers(), rider)?;
        let assignment = self.price(rider, Strategy::RouteOverlap, sel);
        drop(roster);

        info!(
            rider = %assignment.rider,
            driver = %assignment.driver,
            overlap = assignment.overlap,
            hops = assignment.rider_path.len().saturating_sub(1),
            "route ride assigned",
        );
        Ok(assignment)
    }

    /// Dispatch `rider` with the given strategy.
    pub fn assign(&self, rider: &Rider, strategy: Strategy) -> DispatchResult<Assignment> {
        match strategy {
            Strategy::Nearest      => self.assign_immediate(rider),
            Strategy::RouteOverlap => self.assign_by_route(rider),
        }
    }

    /// Drain `queue` in FIFO order, dispatching each request with its own
    /// strategy.  A failed request is reported in its outcome and does not
    /// stop the drain.
    pub fn process_scheduled(&self, queue: &mut RideQueue) -> Vec<ScheduledOutcome> {
        let mut outcomes = Vec::with_capacity(queue.len());
        while let Some(request) = queue.pop() {
            debug!(rider = %request.rider.id, at = %request.at, strategy = %request.strategy, "replaying scheduled ride");
            let result = self.assign(&request.rider, request.strategy);
            if let Err(e) = &result {
                debug!(rider = %request.rider.id, error = %e, "scheduled ride not assigned");
            }
            outcomes.push(ScheduledOutcome { request, result });
        }
        outcomes
    }

    fn price(&self, rider: &Rider, strategy: Strategy, sel: Selection<'_>) -> Assignment {
        debug!(
            rider = %rider.id,
            driver = %sel.driver.id,
            %strategy,
            pickup_distance_km = sel.pickup_distance_km,
            overlap = sel.overlap,
            "driver selected",
        );
        Assignment {
            rider:      rider.id,
            driver:     sel.driver.id,
            strategy,
            quote:      self.config.fare.quote(sel.pickup_distance_km, sel.driver.speed_kmh),
            overlap:    sel.overlap,
            rider_path: sel.rider_path.map(|p| p.into_nodes()).unwrap_or_default(),
            picked_up:  false,
        }
    }
}

/// The pickup distance, and with it the fare and ETA, is only defined for a
/// finite rider position.
fn check_rider(rider: &Rider) -> DispatchResult<()> {
    if rider.position.x.is_finite() && rider.position.y.is_finite() {
        Ok(())
    } else {
        Err(DispatchError::InvalidRiderPosition(rider.id))
    }
}
