//! Fare and ETA arithmetic.
//!
//! This is the downstream collaborator of the matching engine: given the
//! pickup distance and the chosen driver's speed it derives a fare and an
//! arrival estimate.
//!
//! ```text
//! fare        = base_fare + fare_per_km * distance_km
//! eta_minutes = 60 * distance_km / speed_kmh
//! ```
//!
//! A speed of zero is not an error; the ETA is reported as [`Eta::Unknown`].

use std::fmt;

/// Default flat charge per ride.
pub const DEFAULT_BASE_FARE: f64 = 50.0;

/// Default charge per kilometre.
pub const DEFAULT_FARE_PER_KM: f64 = 10.0;

/// Pricing parameters.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct FareConfig {
    pub base_fare:   f64,
    pub fare_per_km: f64,
}

impl Default for FareConfig {
    fn default() -> Self {
        Self {
            base_fare:   DEFAULT_BASE_FARE,
            fare_per_km: DEFAULT_FARE_PER_KM,
        }
    }
}

impl FareConfig {
    #[inline]
    pub fn fare(&self, distance_km: f64) -> f64 {
        self.base_fare + self.fare_per_km * distance_km
    }

    /// Price a pickup of `distance_km` by a driver travelling at `speed_kmh`.
    pub fn quote(&self, distance_km: f64, speed_kmh: f64) -> FareQuote {
        FareQuote {
            distance_km,
            fare: self.fare(distance_km),
            eta: Eta::from_distance(distance_km, speed_kmh),
        }
    }
}

/// Estimated time of arrival.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Eta {
    Minutes(f64),
    /// The driver's speed is zero, so no finite estimate exists.
    Unknown,
}

impl Eta {
    pub fn from_distance(distance_km: f64, speed_kmh: f64) -> Self {
        if speed_kmh == 0.0 {
            return Eta::Unknown;
        }
        Eta::Minutes(60.0 * distance_km / speed_kmh)
    }

    pub fn minutes(self) -> Option<f64> {
        match self {
            Eta::Minutes(m) => Some(m),
            Eta::Unknown => None,
        }
    }

    pub fn is_known(self) -> bool {
        matches!(self, Eta::Minutes(_))
    }
}

impl fmt::Display for Eta {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Eta::Minutes(m) => write!(f, "{m:.1} min"),
            Eta::Unknown    => f.write_str("unknown"),
        }
    }
}

/// The priced result of one assignment.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FareQuote {
    pub distance_km: f64,
    pub fare:        f64,
    pub eta:         Eta,
}
