mod frame;
mod provider;

pub use frame::TickFrame;
pub use provider::{IndexTicks, TickProvider};

use chrono::{DateTime, TimeZone, Utc};
use chrono_tz::Tz;
use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::{debug, trace};

use crate::core::{
    AnchorPolicy, AxisDirection, Calibration, SnapMode, Tick, TickInterval, TickLabelConfig,
    TickMark, TickSequence, Timebase, format_tick_label, resolve_timezone,
};
use crate::error::{TimelineError, TimelineResult};

/// Host-supplied configuration for a `TimelineAxis`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimelineAxisConfig {
    pub calibration: Calibration,
    /// Explicit axis timezone; `None` resolves the platform-local zone.
    #[serde(default)]
    pub timezone: Option<Tz>,
    #[serde(default)]
    pub labels: TickLabelConfig,
    #[serde(default)]
    pub anchor_policy: AnchorPolicy,
    /// Interval used when the axis is queried through `TickProvider`.
    #[serde(default)]
    pub primary_interval: TickInterval,
}

impl TimelineAxisConfig {
    /// Unit calibration: index 0 maps to `time_at_index0`, index 1 to
    /// `time_at_index1`.
    pub fn new(
        time_at_index0: DateTime<Utc>,
        time_at_index1: DateTime<Utc>,
    ) -> TimelineResult<Self> {
        Ok(Self::from_calibration(Calibration::unit(
            time_at_index0,
            time_at_index1,
        )?))
    }

    #[must_use]
    pub fn from_calibration(calibration: Calibration) -> Self {
        Self {
            calibration,
            timezone: None,
            labels: TickLabelConfig::default(),
            anchor_policy: AnchorPolicy::default(),
            primary_interval: TickInterval::default(),
        }
    }

    #[must_use]
    pub fn with_timezone(mut self, timezone: Tz) -> Self {
        self.timezone = Some(timezone);
        self
    }

    #[must_use]
    pub fn with_labels(mut self, labels: TickLabelConfig) -> Self {
        self.labels = labels;
        self
    }

    #[must_use]
    pub fn with_anchor_policy(mut self, anchor_policy: AnchorPolicy) -> Self {
        self.anchor_policy = anchor_policy;
        self
    }

    #[must_use]
    pub fn with_primary_interval(mut self, interval: TickInterval) -> Self {
        self.primary_interval = interval;
        self
    }
}

/// The host-facing tick engine: index <-> instant mapping plus tick
/// enumeration and labeling for any catalog interval.
///
/// The axis holds no mutable state across queries beyond its resolved
/// configuration; every `ticks_*` call is request/response and deterministic.
#[derive(Debug, Clone)]
pub struct TimelineAxis {
    config: TimelineAxisConfig,
    timebase: Timebase,
}

impl TimelineAxis {
    pub fn new(config: TimelineAxisConfig) -> TimelineResult<Self> {
        let tz = resolve_timezone(config.timezone)?;
        let timebase = Timebase::new(config.calibration, tz)?;
        debug!(
            timezone = %tz,
            seconds_per_index = timebase.seconds_per_index(),
            "timeline axis created"
        );
        Ok(Self { config, timebase })
    }

    /// Recalibrates the axis with a fresh unit calibration.
    pub fn configure(
        &mut self,
        time_at_index0: DateTime<Utc>,
        time_at_index1: DateTime<Utc>,
    ) -> TimelineResult<()> {
        let calibration = Calibration::unit(time_at_index0, time_at_index1)?;
        self.timebase = Timebase::new(calibration, self.timebase.timezone())?;
        self.config.calibration = calibration;
        debug!(
            seconds_per_index = self.timebase.seconds_per_index(),
            "timeline axis recalibrated"
        );
        Ok(())
    }

    /// Replaces the axis calibration wholesale.
    pub fn set_calibration(&mut self, calibration: Calibration) -> TimelineResult<()> {
        self.timebase = Timebase::new(calibration, self.timebase.timezone())?;
        self.config.calibration = calibration;
        Ok(())
    }

    /// Switches the axis timezone; `None` re-resolves the platform zone.
    pub fn set_timezone(&mut self, timezone: Option<Tz>) -> TimelineResult<()> {
        let tz = resolve_timezone(timezone)?;
        self.timebase = Timebase::new(self.config.calibration, tz)?;
        self.config.timezone = timezone;
        debug!(timezone = %tz, "timeline axis timezone changed");
        Ok(())
    }

    /// Labeled marks for one interval over an index range, using the
    /// configured anchor policy.
    pub fn ticks_for(
        &self,
        interval: TickInterval,
        index_lo: f64,
        index_hi: f64,
    ) -> TimelineResult<Vec<TickMark>> {
        let sequence =
            self.ticks_with_policy(interval, index_lo, index_hi, self.config.anchor_policy)?;
        let marks = self.label_sequence(sequence);
        trace!(
            interval = interval.key(),
            index_lo,
            index_hi,
            count = marks.len(),
            "ticks generated"
        );
        Ok(marks)
    }

    /// `ticks_for` addressed by catalog key, for hosts driven by
    /// configuration strings.
    pub fn ticks_for_key(
        &self,
        key: &str,
        index_lo: f64,
        index_hi: f64,
    ) -> TimelineResult<Vec<TickMark>> {
        self.ticks_for(TickInterval::from_key(key)?, index_lo, index_hi)
    }

    /// The lazy, unlabeled tick sequence with an explicit anchor policy.
    pub fn ticks_with_policy(
        &self,
        interval: TickInterval,
        index_lo: f64,
        index_hi: f64,
        policy: AnchorPolicy,
    ) -> TimelineResult<TickSequence> {
        TickSequence::generate(&self.timebase, interval, index_lo, index_hi, policy)
    }

    /// Snaps an index coordinate to the closest aligned tick of `interval`.
    pub fn nearest_tick(&self, interval: TickInterval, index: f64) -> TimelineResult<Tick> {
        if !index.is_finite() {
            return Err(TimelineError::EmptyRange {
                lo: index,
                hi: index,
            });
        }

        let instant = self.timebase.to_instant(index);
        let mut candidates: SmallVec<[(OrderedFloat<f64>, Tick); 2]> = SmallVec::new();
        for aligned in [
            interval.snap(instant, SnapMode::Down),
            interval.snap(instant, SnapMode::Up),
        ] {
            let aligned_index = self.timebase.to_index(&aligned);
            candidates.push((
                OrderedFloat((aligned_index - index).abs()),
                Tick::new(aligned, aligned_index, interval),
            ));
        }

        candidates
            .into_iter()
            .min_by_key(|candidate| candidate.0)
            .map(|(_, tick)| tick)
            .ok_or_else(|| TimelineError::EmptyRange {
                lo: index,
                hi: index,
            })
    }

    #[must_use]
    pub fn instant_at(&self, index: f64) -> DateTime<Tz> {
        self.timebase.to_instant(index)
    }

    #[must_use]
    pub fn index_of<Z: TimeZone>(&self, instant: &DateTime<Z>) -> f64 {
        self.timebase.to_index(instant)
    }

    /// Maps a timeframe to the index range its endpoints occupy, e.g. to
    /// center the visible window on it.
    #[must_use]
    pub fn index_range_for<Z: TimeZone>(
        &self,
        start: &DateTime<Z>,
        end: &DateTime<Z>,
    ) -> (f64, f64) {
        self.timebase.index_range_for(start, end)
    }

    #[must_use]
    pub fn timezone(&self) -> Tz {
        self.timebase.timezone()
    }

    #[must_use]
    pub fn direction(&self) -> AxisDirection {
        self.timebase.direction()
    }

    #[must_use]
    pub fn config(&self) -> &TimelineAxisConfig {
        &self.config
    }

    #[must_use]
    pub fn timebase(&self) -> &Timebase {
        &self.timebase
    }

    fn label_sequence(&self, sequence: TickSequence) -> Vec<TickMark> {
        let mut marks = Vec::new();
        let mut previous: Option<Tick> = None;
        for tick in sequence {
            let label = format_tick_label(&tick, previous.as_ref(), &self.config.labels);
            marks.push(TickMark::timed(tick.index, tick.instant, Some(label)));
            previous = Some(tick);
        }
        marks
    }
}
