//! Spatial-subsystem error type.

use thiserror::Error;

use rd_core::NodeId;

/// Errors produced by `rd-spatial`.
///
/// `EmptyDriverPool` and `NoPath` are expected outcomes of a well-formed
/// query, not faults.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SpatialError {
    #[error("no drivers available")]
    EmptyDriverPool,

    #[error("no path from {from} to {to}")]
    NoPath { from: NodeId, to: NodeId },

    #[error("a path needs at least one node")]
    EmptyPath,
}

pub type SpatialResult<T> = Result<T, SpatialError>;
