//! Layer 0: Time primitives
//!
//! WallClock: millisecond wall time for stamps and SLA arithmetic.
//! All deadline math happens in whole milliseconds; hour rounding is
//! always a floor.

use serde::{Deserialize, Serialize};

/// Milliseconds in one hour.
pub const HOUR_MS: u64 = 60 * 60 * 1000;

/// Wall clock in milliseconds since the Unix epoch.
///
/// Copy is fine here - it's a measurement, not causality.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WallClock(pub u64);

impl WallClock {
    pub fn now() -> Self {
        use std::time::{SystemTime, UNIX_EPOCH};
        let ms = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis() as u64;
        Self(ms)
    }

    pub fn as_millis(self) -> u64 {
        self.0
    }

    /// Shift forward by a whole number of hours (saturating).
    pub fn plus_hours(self, hours: u32) -> Self {
        Self(self.0.saturating_add(u64::from(hours) * HOUR_MS))
    }

    /// Signed millisecond delta `self - other`.
    ///
    /// Positive when `self` is later than `other`.
    pub fn delta_ms(self, other: WallClock) -> i64 {
        self.0 as i64 - other.0 as i64
    }
}

/// Floor a non-negative millisecond span to whole hours.
pub fn whole_hours(ms: u64) -> u64 {
    ms / HOUR_MS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plus_hours_adds_whole_hours() {
        let t = WallClock(1_000);
        assert_eq!(t.plus_hours(24), WallClock(1_000 + 24 * HOUR_MS));
        assert_eq!(t.plus_hours(0), t);
    }

    #[test]
    fn delta_is_signed() {
        let earlier = WallClock(5_000);
        let later = WallClock(9_000);
        assert_eq!(later.delta_ms(earlier), 4_000);
        assert_eq!(earlier.delta_ms(later), -4_000);
    }

    #[test]
    fn whole_hours_floors() {
        assert_eq!(whole_hours(0), 0);
        assert_eq!(whole_hours(HOUR_MS - 1), 0);
        assert_eq!(whole_hours(HOUR_MS), 1);
        assert_eq!(whole_hours(25 * HOUR_MS + 59), 25);
    }
}
