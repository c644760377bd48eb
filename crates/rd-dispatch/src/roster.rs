//! The driver roster: owned storage for every dispatchable driver.
//!
//! # Ownership
//!
//! [`Roster`] is a plain single-owner structure.  Concurrent use goes through
//! [`SharedRoster`], an `Arc<RwLock<Roster>>` handle: many matching queries
//! read at once, mutations (add, move, reroute) take the write lock one at a
//! time.
//!
//! Drivers are kept in insertion order.  Matching results do not depend on
//! that order because both strategies break ties by `DriverId`.

use std::sync::Arc;

use parking_lot::{RwLock, RwLockReadGuard, RwLockUpgradableReadGuard, RwLockWriteGuard};
use rustc_hash::FxHashMap;

use rd_core::{Driver, DriverId, NodeId, Point};

use crate::{DispatchError, DispatchResult};

// ── Roster ────────────────────────────────────────────────────────────────────

/// Drivers indexed by id.
#[derive(Debug, Default, Clone)]
pub struct Roster {
    drivers:  Vec<Driver>,
    slots:    FxHashMap<DriverId, usize>,
    /// Bumped on every mutation; lets callers detect a changed roster
    /// (e.g. to invalidate a cached route graph).
    revision: u64,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a roster, rejecting duplicate ids and invalid drivers.
    pub fn from_drivers<I>(drivers: I) -> DispatchResult<Self>
    where
        I: IntoIterator<Item = Driver>,
    {
        let mut roster = Self::new();
        for d in drivers {
            roster.add_driver(d)?;
        }
        Ok(roster)
    }

    // ── Queries ───────────────────────────────────────────────────────────

    /// All drivers, in insertion order.  This is the snapshot matching runs on.
    pub fn drivers(&self) -> &[Driver] {
        &self.drivers
    }

    pub fn driver(&self, id: DriverId) -> DispatchResult<&Driver> {
        let slot = self.slot(id)?;
        Ok(&self.drivers[slot])
    }

    pub fn contains(&self, id: DriverId) -> bool {
        self.slots.contains_key(&id)
    }

    /// The planned route of `id`.  Empty if the driver has none.
    pub fn route(&self, id: DriverId) -> DispatchResult<&[NodeId]> {
        Ok(&self.driver(id)?.route)
    }

    pub fn len(&self) -> usize {
        self.drivers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.drivers.is_empty()
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    // ── Mutations ─────────────────────────────────────────────────────────

    /// Add a driver.
    ///
    /// Speed must be finite and non-negative (zero is allowed; its ETA is
    /// reported as unknown).  Position must be finite.
    pub fn add_driver(&mut self, driver: Driver) -> DispatchResult<()> {
        if self.slots.contains_key(&driver.id) {
            return Err(DispatchError::DuplicateDriver(driver.id));
        }
        validate(&driver)?;
        self.slots.insert(driver.id, self.drivers.len());
        self.drivers.push(driver);
        self.revision += 1;
        Ok(())
    }

    /// Remove and return a driver.  O(n): later slots shift down to keep
    /// insertion order.
    pub fn remove_driver(&mut self, id: DriverId) -> DispatchResult<Driver> {
        let slot = self.slot(id)?;
        let driver = self.drivers.remove(slot);
        self.slots.remove(&id);
        for (i, d) in self.drivers.iter().enumerate().skip(slot) {
            self.slots.insert(d.id, i);
        }
        self.revision += 1;
        Ok(driver)
    }

    /// Replace the planned route of `id`.
    pub fn set_route(&mut self, id: DriverId, route: Vec<NodeId>) -> DispatchResult<()> {
        let slot = self.slot(id)?;
        self.drivers[slot].route = route;
        self.revision += 1;
        Ok(())
    }

    /// Move `id` to `position`.
    pub fn update_position(&mut self, id: DriverId, position: Point) -> DispatchResult<()> {
        if !(position.x.is_finite() && position.y.is_finite()) {
            return Err(DispatchError::InvalidPosition(id));
        }
        let slot = self.slot(id)?;
        self.drivers[slot].position = position;
        self.revision += 1;
        Ok(())
    }

    fn slot(&self, id: DriverId) -> DispatchResult<usize> {
        self.slots.get(&id).copied().ok_or(DispatchError::DriverNotFound(id))
    }
}

fn validate(driver: &Driver) -> DispatchResult<()> {
    if !driver.speed_kmh.is_finite() || driver.speed_kmh < 0.0 {
        return Err(DispatchError::InvalidSpeed { driver: driver.id, speed: driver.speed_kmh });
    }
    if !(driver.position.x.is_finite() && driver.position.y.is_finite()) {
        return Err(DispatchError::InvalidPosition(driver.id));
    }
    Ok(())
}

// ── SharedRoster ──────────────────────────────────────────────────────────────

/// Cloneable, thread-safe handle to one [`Roster`].
#[derive(Debug, Default, Clone)]
pub struct SharedRoster {
    inner: Arc<RwLock<Roster>>,
}

impl SharedRoster {
    pub fn new(roster: Roster) -> Self {
        Self { inner: Arc::new(RwLock::new(roster)) }
    }

    pub fn from_drivers<I>(drivers: I) -> DispatchResult<Self>
    where
        I: IntoIterator<Item = Driver>,
    {
        Roster::from_drivers(drivers).map(Self::new)
    }

    /// Shared access; blocks while a writer holds the lock.
    pub fn read(&self) -> RwLockReadGuard<'_, Roster> {
        self.inner.read()
    }

    /// Exclusive access.
    pub fn write(&self) -> RwLockWriteGuard<'_, Roster> {
        self.inner.write()
    }

    /// Shared access that can later be upgraded to exclusive without letting
    /// another writer in between.
    pub fn upgradable_read(&self) -> RwLockUpgradableReadGuard<'_, Roster> {
        self.inner.upgradable_read()
    }

    /// Copy of the current drivers, for callers that want to run long
    /// computations without holding the lock.
    pub fn snapshot(&self) -> Vec<Driver> {
        self.inner.read().drivers().to_vec()
    }

    pub fn add_driver(&self, driver: Driver) -> DispatchResult<()> {
        self.inner.write().add_driver(driver)
    }

    pub fn set_route(&self, id: DriverId, route: Vec<NodeId>) -> DispatchResult<()> {
        self.inner.write().set_route(id, route)
    }

    pub fn update_position(&self, id: DriverId, position: Point) -> DispatchResult<()> {
        self.inner.write().update_position(id, position)
    }
}
