use chrono::{DateTime, Days, LocalResult, NaiveDateTime, NaiveTime, TimeDelta, TimeZone, Timelike};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::core::types::SnapMode;
use crate::error::{TimelineError, TimelineResult};

/// Upper bound, in one-minute probes, when searching past a DST gap for the
/// first wall time that exists again. Covers even calendar-day skips such as
/// Kiribati's 1994 dateline move.
const GAP_PROBE_LIMIT_MINUTES: u32 = 48 * 60;

/// The closed catalog of supported tick intervals, coarsest first.
///
/// `Day` is calendar-aligned: consecutive day ticks sit on local midnights,
/// which are 23 to 25 real hours apart across DST transitions. Every other
/// entry is a fixed real duration, aligned on the local wall clock within a
/// day. The derived ordering follows catalog order, so `Day` sorts before
/// `Second`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
pub enum TickInterval {
    #[default]
    #[serde(rename = "day")]
    Day,
    #[serde(rename = "12 hours")]
    Hours12,
    #[serde(rename = "6 hours")]
    Hours6,
    #[serde(rename = "4 hours")]
    Hours4,
    #[serde(rename = "2 hours")]
    Hours2,
    #[serde(rename = "hour")]
    Hour,
    #[serde(rename = "30 minutes")]
    Minutes30,
    #[serde(rename = "15 minutes")]
    Minutes15,
    #[serde(rename = "10 minutes")]
    Minutes10,
    #[serde(rename = "5 minutes")]
    Minutes5,
    #[serde(rename = "minute")]
    Minute,
    #[serde(rename = "30 seconds")]
    Seconds30,
    #[serde(rename = "15 seconds")]
    Seconds15,
    #[serde(rename = "10 seconds")]
    Seconds10,
    #[serde(rename = "5 seconds")]
    Seconds5,
    #[serde(rename = "second")]
    Second,
}

impl TickInterval {
    /// All catalog entries, coarsest first.
    pub const ALL: [Self; 16] = [
        Self::Day,
        Self::Hours12,
        Self::Hours6,
        Self::Hours4,
        Self::Hours2,
        Self::Hour,
        Self::Minutes30,
        Self::Minutes15,
        Self::Minutes10,
        Self::Minutes5,
        Self::Minute,
        Self::Seconds30,
        Self::Seconds15,
        Self::Seconds10,
        Self::Seconds5,
        Self::Second,
    ];

    /// The subset that fills a default axis adequately without overwhelming it.
    #[must_use]
    pub fn default_selection() -> [Self; 9] {
        [
            Self::Day,
            Self::Hours4,
            Self::Hour,
            Self::Minutes15,
            Self::Minutes5,
            Self::Minute,
            Self::Seconds15,
            Self::Seconds5,
            Self::Second,
        ]
    }

    /// Stable catalog key, also used as the serde name.
    #[must_use]
    pub fn key(self) -> &'static str {
        match self {
            Self::Day => "day",
            Self::Hours12 => "12 hours",
            Self::Hours6 => "6 hours",
            Self::Hours4 => "4 hours",
            Self::Hours2 => "2 hours",
            Self::Hour => "hour",
            Self::Minutes30 => "30 minutes",
            Self::Minutes15 => "15 minutes",
            Self::Minutes10 => "10 minutes",
            Self::Minutes5 => "5 minutes",
            Self::Minute => "minute",
            Self::Seconds30 => "30 seconds",
            Self::Seconds15 => "15 seconds",
            Self::Seconds10 => "10 seconds",
            Self::Seconds5 => "5 seconds",
            Self::Second => "second",
        }
    }

    pub fn from_key(key: &str) -> TimelineResult<Self> {
        Self::ALL
            .into_iter()
            .find(|interval| interval.key() == key)
            .ok_or_else(|| TimelineError::UnsupportedInterval {
                key: key.to_owned(),
            })
    }

    /// Nominal step in seconds. For `Day` this is the nominal 24 hours; the
    /// real spacing of day ticks varies with DST.
    #[must_use]
    pub fn step_seconds(self) -> u32 {
        match self {
            Self::Day => 86_400,
            Self::Hours12 => 43_200,
            Self::Hours6 => 21_600,
            Self::Hours4 => 14_400,
            Self::Hours2 => 7_200,
            Self::Hour => 3_600,
            Self::Minutes30 => 1_800,
            Self::Minutes15 => 900,
            Self::Minutes10 => 600,
            Self::Minutes5 => 300,
            Self::Minute => 60,
            Self::Seconds30 => 30,
            Self::Seconds15 => 15,
            Self::Seconds10 => 10,
            Self::Seconds5 => 5,
            Self::Second => 1,
        }
    }

    /// Nominal number of ticks per day, the granularity key used for
    /// coarseness comparisons.
    #[must_use]
    pub fn ticks_per_day(self) -> u32 {
        86_400 / self.step_seconds()
    }

    #[must_use]
    pub fn is_coarser_than(self, other: Self) -> bool {
        self.step_seconds() > other.step_seconds()
    }

    /// Whether the step rule follows calendar units rather than a constant
    /// real duration.
    #[must_use]
    pub fn is_calendar_aligned(self) -> bool {
        matches!(self, Self::Day)
    }

    /// Whether labels for this interval carry seconds precision.
    #[must_use]
    pub fn has_seconds_precision(self) -> bool {
        self.step_seconds() < 60
    }

    /// Snaps an instant onto this interval's grid.
    ///
    /// Alignment is exact local-field arithmetic, never repeated stepping
    /// from an epoch, so snapping stays precise arbitrarily far from the
    /// calibration reference. Sub-second fields are zeroed; `Day` snaps to
    /// local midnight.
    ///
    /// DST resolution is deterministic: an ambiguous local result takes the
    /// earlier UTC offset, a nonexistent local result takes the first valid
    /// instant at or after the gap.
    #[must_use]
    pub fn snap(self, instant: DateTime<Tz>, mode: SnapMode) -> DateTime<Tz> {
        let down = self.snap_down(instant);
        match mode {
            SnapMode::Down => down,
            SnapMode::Up => {
                if down == instant {
                    down
                } else {
                    self.advance(down).unwrap_or(down)
                }
            }
            SnapMode::Nearest => {
                if down == instant {
                    return down;
                }
                let up = self.advance(down).unwrap_or(down);
                let below = instant.signed_duration_since(down);
                let above = up.signed_duration_since(instant);
                if below < above { down } else { up }
            }
        }
    }

    /// Aligned instant at or before the input.
    #[must_use]
    pub fn snap_down(self, instant: DateTime<Tz>) -> DateTime<Tz> {
        let local = instant.naive_local();
        let midnight = NaiveDateTime::new(local.date(), NaiveTime::MIN);
        let floored = if self.is_calendar_aligned() {
            midnight
        } else {
            let step = i64::from(self.step_seconds());
            let into_day = i64::from(local.time().num_seconds_from_midnight());
            midnight + TimeDelta::seconds((into_day / step) * step)
        };
        resolve_local(instant.timezone(), floored)
    }

    /// Aligned instant at or after the input.
    #[must_use]
    pub fn snap_up(self, instant: DateTime<Tz>) -> DateTime<Tz> {
        self.snap(instant, SnapMode::Up)
    }

    /// The next aligned instant after `instant`, assuming `instant` is
    /// already aligned. `None` past the representable time range.
    #[must_use]
    pub fn advance(self, instant: DateTime<Tz>) -> Option<DateTime<Tz>> {
        if self.is_calendar_aligned() {
            let next_day = instant.date_naive().checked_add_days(Days::new(1))?;
            Some(resolve_local(
                instant.timezone(),
                NaiveDateTime::new(next_day, NaiveTime::MIN),
            ))
        } else {
            instant.checked_add_signed(TimeDelta::seconds(i64::from(self.step_seconds())))
        }
    }

    /// The previous aligned instant before `instant`, assuming `instant` is
    /// already aligned. `None` past the representable time range.
    #[must_use]
    pub fn retreat(self, instant: DateTime<Tz>) -> Option<DateTime<Tz>> {
        if self.is_calendar_aligned() {
            let previous_day = instant.date_naive().checked_sub_days(Days::new(1))?;
            Some(resolve_local(
                instant.timezone(),
                NaiveDateTime::new(previous_day, NaiveTime::MIN),
            ))
        } else {
            instant.checked_sub_signed(TimeDelta::seconds(i64::from(self.step_seconds())))
        }
    }
}

/// Resolves a local wall time in `tz` under the crate's DST policy: the
/// earlier offset wins a fold, and a wall time inside a spring-forward gap
/// materializes as the first valid instant at or after the gap.
pub(crate) fn resolve_local(tz: Tz, naive: NaiveDateTime) -> DateTime<Tz> {
    match tz.from_local_datetime(&naive) {
        LocalResult::Single(instant) => instant,
        LocalResult::Ambiguous(earlier, _later) => earlier,
        LocalResult::None => {
            let mut probe = naive;
            for _ in 0..GAP_PROBE_LIMIT_MINUTES {
                probe += TimeDelta::minutes(1);
                match tz.from_local_datetime(&probe) {
                    LocalResult::Single(instant) => return instant,
                    LocalResult::Ambiguous(earlier, _later) => return earlier,
                    LocalResult::None => {}
                }
            }
            // No transition in tzdata is this long; interpret as UTC rather
            // than fail a per-frame query.
            tz.from_utc_datetime(&naive)
        }
    }
}
