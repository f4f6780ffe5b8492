use chrono::{DateTime, TimeDelta, TimeZone, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::core::types::AxisDirection;
use crate::error::{TimelineError, TimelineResult};

/// Two-point affine calibration between index coordinates and UTC instants.
///
/// The mapping is linear in elapsed real time: one index unit always spans
/// the same number of real seconds, regardless of calendar or DST shape.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Calibration {
    index_0: f64,
    time_0: DateTime<Utc>,
    index_1: f64,
    time_1: DateTime<Utc>,
}

impl Calibration {
    pub fn two_point(
        index_0: f64,
        time_0: DateTime<Utc>,
        index_1: f64,
        time_1: DateTime<Utc>,
    ) -> TimelineResult<Self> {
        let calibration = Self {
            index_0,
            time_0,
            index_1,
            time_1,
        };
        calibration.validate()?;
        Ok(calibration)
    }

    /// Unit calibration: index 0 maps to `time_0`, index 1 maps to `time_1`.
    pub fn unit(time_0: DateTime<Utc>, time_1: DateTime<Utc>) -> TimelineResult<Self> {
        Self::two_point(0.0, time_0, 1.0, time_1)
    }

    /// One anchor point plus an explicit scale in seconds per index unit.
    pub fn anchored(
        index_0: f64,
        time_0: DateTime<Utc>,
        seconds_per_index: f64,
    ) -> TimelineResult<Self> {
        if !seconds_per_index.is_finite() || seconds_per_index == 0.0 {
            return Err(TimelineError::InvalidConfiguration {
                detail: format!("seconds_per_index must be finite and non-zero, got {seconds_per_index}"),
            });
        }
        let micros = (seconds_per_index * 1e6).round() as i64;
        let time_1 = time_0
            .checked_add_signed(TimeDelta::microseconds(micros))
            .ok_or_else(|| TimelineError::InvalidConfiguration {
                detail: format!("scale {seconds_per_index} s/index overflows the representable time range"),
            })?;
        Self::two_point(index_0, time_0, index_0 + 1.0, time_1)
    }

    /// Rejects degenerate calibrations (non-finite indices, equal indices, or
    /// equal instants), which would leave the axis scale undefined.
    pub fn validate(&self) -> TimelineResult<()> {
        if !self.index_0.is_finite() || !self.index_1.is_finite() {
            return Err(TimelineError::InvalidConfiguration {
                detail: format!(
                    "calibration indices must be finite, got {} and {}",
                    self.index_0, self.index_1
                ),
            });
        }
        if self.index_0 == self.index_1 {
            return Err(TimelineError::InvalidConfiguration {
                detail: format!("both calibration points map index {}", self.index_0),
            });
        }
        if self.time_0 == self.time_1 {
            return Err(TimelineError::InvalidConfiguration {
                detail: format!("both calibration points map instant {}", self.time_0),
            });
        }
        Ok(())
    }

    #[must_use]
    pub fn seconds_per_index(&self) -> f64 {
        let elapsed = self.time_1.signed_duration_since(self.time_0);
        let seconds = elapsed
            .num_microseconds()
            .map(|micros| micros as f64 / 1e6)
            .unwrap_or_else(|| elapsed.num_seconds() as f64);
        seconds / (self.index_1 - self.index_0)
    }

    #[must_use]
    pub fn reference(&self) -> (f64, DateTime<Utc>) {
        (self.index_0, self.time_0)
    }
}

/// The index <-> instant mapper: a validated calibration bound to the
/// resolved axis timezone.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Timebase {
    calibration: Calibration,
    tz: Tz,
}

impl Timebase {
    pub fn new(calibration: Calibration, tz: Tz) -> TimelineResult<Self> {
        calibration.validate()?;
        Ok(Self { calibration, tz })
    }

    /// Converts an index coordinate to an instant in the axis timezone.
    ///
    /// The offset is rounded to whole microseconds. Indices whose offset
    /// exceeds the representable time range clamp to the nearest extreme
    /// instead of panicking.
    #[must_use]
    pub fn to_instant(&self, index: f64) -> DateTime<Tz> {
        let offset_seconds = (index - self.calibration.index_0) * self.calibration.seconds_per_index();
        let micros = (offset_seconds * 1e6).round() as i64;
        let utc = self
            .calibration
            .time_0
            .checked_add_signed(TimeDelta::microseconds(micros))
            .unwrap_or(if micros >= 0 {
                DateTime::<Utc>::MAX_UTC
            } else {
                DateTime::<Utc>::MIN_UTC
            });
        utc.with_timezone(&self.tz)
    }

    /// Converts an instant (in any timezone) to its index coordinate.
    #[must_use]
    pub fn to_index<Z: TimeZone>(&self, instant: &DateTime<Z>) -> f64 {
        let elapsed = instant
            .clone()
            .signed_duration_since(self.calibration.time_0);
        let seconds = elapsed
            .num_microseconds()
            .map(|micros| micros as f64 / 1e6)
            .unwrap_or_else(|| elapsed.num_seconds() as f64);
        self.calibration.index_0 + seconds / self.calibration.seconds_per_index()
    }

    /// Maps a timeframe to the index range its endpoints occupy.
    #[must_use]
    pub fn index_range_for<Z: TimeZone>(&self, start: &DateTime<Z>, end: &DateTime<Z>) -> (f64, f64) {
        (self.to_index(start), self.to_index(end))
    }

    #[must_use]
    pub fn direction(&self) -> AxisDirection {
        if self.calibration.seconds_per_index() > 0.0 {
            AxisDirection::Forward
        } else {
            AxisDirection::Backward
        }
    }

    #[must_use]
    pub fn seconds_per_index(&self) -> f64 {
        self.calibration.seconds_per_index()
    }

    #[must_use]
    pub fn timezone(&self) -> Tz {
        self.tz
    }

    #[must_use]
    pub fn calibration(&self) -> Calibration {
        self.calibration
    }
}
