//! Wall-clock schedule times.
//!
//! Scheduled rides are tagged with a time of day written as `"HH:MM"`.  The
//! value is stored as minutes since midnight so comparisons are integer
//! compares; nothing in the engine depends on a calendar.

use std::fmt;
use std::str::FromStr;

use crate::CoreError;

const MINUTES_PER_DAY: u16 = 24 * 60;

/// A time of day with minute resolution.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ClockTime(u16);

impl ClockTime {
    pub const MIDNIGHT: ClockTime = ClockTime(0);

    /// Returns `None` if `hour > 23` or `minute > 59`.
    pub fn new(hour: u8, minute: u8) -> Option<Self> {
        if hour > 23 || minute > 59 {
            return None;
        }
        Some(ClockTime(hour as u16 * 60 + minute as u16))
    }

    #[inline]
    pub fn hour(self) -> u8 {
        (self.0 / 60) as u8
    }

    #[inline]
    pub fn minute(self) -> u8 {
        (self.0 % 60) as u8
    }

    #[inline]
    pub fn minutes_since_midnight(self) -> u16 {
        self.0
    }

    /// Add `minutes`, wrapping past midnight.
    pub fn wrapping_add_minutes(self, minutes: u32) -> Self {
        let total = (self.0 as u32 + minutes) % MINUTES_PER_DAY as u32;
        ClockTime(total as u16)
    }
}

impl FromStr for ClockTime {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || CoreError::InvalidClockTime(s.to_owned());
        let (h, m) = s.trim().split_once(':').ok_or_else(invalid)?;
        if h.is_empty() || h.len() > 2 || m.len() != 2 {
            return Err(invalid());
        }
        let hour: u8 = h.parse().map_err(|_| invalid())?;
        let minute: u8 = m.parse().map_err(|_| invalid())?;
        ClockTime::new(hour, minute).ok_or_else(invalid)
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}
