//! Dispatch configuration.

use crate::{CoreError, CoreResult, FareConfig};

/// Top-level dispatch configuration.
///
/// Typically loaded from a TOML/JSON file by the application crate (enable
/// the `serde` feature) and handed to the dispatcher at construction.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DispatchConfig {
    /// Pricing parameters applied to every assignment.
    pub fare: FareConfig,

    /// When `true`, immediate (proximity) dispatch relocates the chosen
    /// driver to the rider's position, simulating pickup.  Route dispatch
    /// never moves drivers.
    pub move_on_pickup: bool,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            fare:           FareConfig::default(),
            move_on_pickup: true,
        }
    }
}

impl DispatchConfig {
    /// Reject pricing values that would produce meaningless fares.
    pub fn validate(&self) -> CoreResult<()> {
        let FareConfig { base_fare, fare_per_km } = self.fare;
        if !base_fare.is_finite() || base_fare < 0.0 {
            return Err(CoreError::Config(format!("base_fare must be >= 0, got {base_fare}")));
        }
        if !fare_per_km.is_finite() || fare_per_km < 0.0 {
            return Err(CoreError::Config(format!("fare_per_km must be >= 0, got {fare_per_km}")));
        }
        Ok(())
    }
}
