//! `rd-dispatch`: the coordinator that turns a match into an assignment.
//!
//! # Request flow
//!
//! ```text
//! assign_immediate(rider):
//!   ① Snapshot : take an upgradable read lock on the roster.
//!   ② Select   : NearestDriver over the snapshot.
//!   ③ Price    : FareConfig::quote(pickup distance, driver speed).
//!   ④ Pickup   : upgrade to a write lock and move the driver to the rider
//!                (if `move_on_pickup`).
//!
//! assign_by_route(rider):
//!   ① Snapshot : shared read lock held for the whole query.
//!   ② Select   : OverlapMatcher over the snapshot (graph rebuilt per call).
//!   ③ Price    : as above.  No mutation.
//! ```
//!
//! Readers never observe a half-applied mutation: every query runs under a
//! lock held from selection to commit, and writers are serialised by the
//! roster's `RwLock`.
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use rd_core::{DispatchConfig, Driver, Point, Rider};
//! use rd_dispatch::{Dispatcher, SharedRoster};
//!
//! let roster = SharedRoster::from_drivers([Driver::new(1, Point::new(0.0, 0.0), 40.0)])?;
//! let dispatcher = Dispatcher::new(roster, DispatchConfig::default())?;
//! let a = dispatcher.assign_immediate(&Rider::new(1001, Point::new(1.0, 1.0)))?;
//! ```

pub mod dispatcher;
pub mod error;
pub mod roster;
pub mod schedule;


pub use dispatcher::{Assignment, Dispatcher};
pub use error::{DispatchError, DispatchResult};
pub use roster::{Roster, SharedRoster};
pub use schedule::{RideQueue, RideRequest, ScheduledOutcome};
