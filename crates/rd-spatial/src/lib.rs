//! `rd-spatial`: proximity search and waypoint routing.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                  |
//! |---------------|-----------------------------------------------------------|
//! | [`geo_index`] | `nearest` (heap scan), `GeoIndex` (R-tree), `Neighbor`    |
//! | [`graph`]     | `RouteGraph` (CSR), `RouteGraphBuilder`                   |
//! | [`router`]    | `PathFinder` trait, `BfsPathFinder`, `Path`               |
//! | [`error`]     | `SpatialError`, `SpatialResult<T>`                        |
//!
//! Everything here is a pure function of the snapshot passed in.  Nothing
//! blocks, allocates beyond the query's own scratch space, or performs I/O.
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                       |
//! |---------|--------------------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on public types.           |

pub mod error;
pub mod geo_index;
pub mod graph;
pub mod router;

#[cfg(test)]
mod tests;

pub use error::{SpatialError, SpatialResult};
pub use geo_index::{GeoIndex, Nearest, Neighbor, nearest};
pub use graph::{RouteGraph, RouteGraphBuilder};
pub use router::{BfsPathFinder, Path, PathFinder, shortest_path};
