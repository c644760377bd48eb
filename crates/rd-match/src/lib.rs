//! `rd-match`: driver selection for one rider against one roster snapshot.
//!
//! # Strategies
//!
//! | Strategy                  | Input used                     | Picks                        |
//! |---------------------------|--------------------------------|------------------------------|
//! | [`NearestDriver`]         | planar positions               | minimum Euclidean distance   |
//! | [`OverlapMatcher`]        | waypoint routes + rider trip   | maximum route overlap        |
//!
//! Both implement [`MatchStrategy`] so the dispatch layer can hold either
//! behind one interface.  Both break ties toward the lowest `DriverId`.
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                 |
//! |------------|--------------------------------------------------------|
//! | `parallel` | Scores route overlap on Rayon's thread pool.           |
//! | `serde`    | Derives `Serialize`/`Deserialize` on `Strategy`.       |

pub mod error;
pub mod overlap;
pub mod strategy;


pub use error::{MatchError, MatchResult};
pub use overlap::{OverlapMatch, OverlapMatcher, overlap_score};
pub use strategy::{MatchStrategy, NearestDriver, Selection, Strategy};
