use thiserror::Error;

use rd_core::{CoreError, DriverId, RiderId};
use rd_match::MatchError;
use rd_spatial::SpatialError;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum DispatchError {
    #[error("driver {0} is already on the roster")]
    DuplicateDriver(DriverId),

    #[error("driver {0} not found")]
    DriverNotFound(DriverId),

    #[error("driver {driver} has invalid speed {speed} km/h")]
    InvalidSpeed { driver: DriverId, speed: f64 },

    #[error("driver {0} has a non-finite position")]
    InvalidPosition(DriverId),

    #[error("rider {0} has a non-finite position")]
    InvalidRiderPosition(RiderId),

    #[error(transparent)]
    Match(#[from] MatchError),

    #[error(transparent)]
    Core(#[from] CoreError),
}

impl From<SpatialError> for DispatchError {
    fn from(e: SpatialError) -> Self {
        DispatchError::Match(MatchError::Spatial(e))
    }
}

impl DispatchError {
    /// No drivers were available to consider.
    pub fn is_empty_pool(&self) -> bool {
        matches!(self, DispatchError::Match(MatchError::Spatial(SpatialError::EmptyDriverPool)))
    }

    /// The rider's destination is unreachable on the route graph.
    pub fn is_no_path(&self) -> bool {
        matches!(self, DispatchError::Match(MatchError::Spatial(SpatialError::NoPath { .. })))
    }

    /// A path exists but no driver's route overlaps it.
    pub fn is_no_match(&self) -> bool {
        matches!(self, DispatchError::Match(MatchError::NoMatch { .. }))
    }
}

pub type DispatchResult<T> = Result<T, DispatchError>;
