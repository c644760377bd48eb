use thiserror::Error;

use rd_core::{NodeId, RiderId};
use rd_spatial::SpatialError;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MatchError {
    /// A path exists but no driver's route touches it.
    #[error("no driver route overlaps the path from {from} to {to}")]
    NoMatch { from: NodeId, to: NodeId },

    #[error("rider {0} has no pickup node and destination for route matching")]
    RiderNotRouted(RiderId),

    #[error(transparent)]
    Spatial(#[from] SpatialError),
}

pub type MatchResult<T> = Result<T, MatchError>;
