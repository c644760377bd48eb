//! `rd-core`: foundational types for the `ride_dispatch` matching engine.
//!
//! This crate is a dependency of every other `rd-*` crate.  It has no `rd-*`
//! dependencies and a single required external one (`thiserror`, plus
//! optional `serde`).
//!
//! # What lives here
//!
//! | Module      | Contents                                              |
//! |-------------|-------------------------------------------------------|
//! | [`ids`]     | `DriverId`, `RiderId`, `NodeId`                       |
//! | [`geo`]     | `Point`, Euclidean distance                           |
//! | [`model`]   | `Driver`, `Rider`                                     |
//! | [`fare`]    | `FareConfig`, `FareQuote`, `Eta`                      |
//! | [`time`]    | `ClockTime` (`"HH:MM"` schedule times)                |
//! | [`config`]  | `DispatchConfig`                                      |
//! | [`error`]   | `CoreError`, `CoreResult`                             |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod config;
pub mod error;
pub mod fare;
pub mod geo;
pub mod ids;
pub mod model;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::DispatchConfig;
pub use error::{CoreError, CoreResult};
pub use fare::{Eta, FareConfig, FareQuote};
pub use geo::Point;
pub use ids::{DriverId, NodeId, RiderId};
pub use model::{Driver, Rider};
pub use time::ClockTime;
