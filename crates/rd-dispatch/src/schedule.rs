//! Scheduled rides: a FIFO buffer of requests replayed through the
//! dispatcher later.
//!
//! The queue does not look at the clock.  Requests are processed strictly in
//! the order they were scheduled, whatever their `at` time; the time is
//! carried along for the caller's reporting.

use std::collections::VecDeque;

use rd_core::{ClockTime, Rider};
use rd_match::Strategy;

use crate::{Assignment, DispatchResult};

/// One deferred ride request.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RideRequest {
    pub rider:    Rider,
    pub at:       ClockTime,
    pub strategy: Strategy,
}

/// First-in, first-out queue of [`RideRequest`]s.
#[derive(Debug, Default, Clone)]
pub struct RideQueue {
    inner: VecDeque<RideRequest>,
}

impl RideQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enqueue `rider` for dispatch with `strategy` at `at`.
    pub fn schedule(&mut self, rider: Rider, at: ClockTime, strategy: Strategy) {
        self.push(RideRequest { rider, at, strategy });
    }

    pub fn push(&mut self, request: RideRequest) {
        self.inner.push_back(request);
    }

    /// Remove and return the oldest request.
    pub fn pop(&mut self) -> Option<RideRequest> {
        self.inner.pop_front()
    }

    pub fn peek(&self) -> Option<&RideRequest> {
        self.inner.front()
    }

    /// Pending requests, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &RideRequest> {
        self.inner.iter()
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

/// The result of replaying one scheduled request.
#[derive(Debug, Clone)]
pub struct ScheduledOutcome {
    pub request: RideRequest,
    pub result:  DispatchResult<Assignment>,
}
