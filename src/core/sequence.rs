use chrono::DateTime;
use chrono_tz::Tz;

use crate::core::interval::TickInterval;
use crate::core::timebase::Timebase;
use crate::core::types::{AnchorPolicy, AxisDirection, Tick};
use crate::error::{TimelineError, TimelineResult};

/// Lazy, restartable sequence of aligned ticks over an index range.
///
/// Ticks come out ordered by strictly increasing index regardless of axis
/// direction; on a backward axis the walk runs time-descending. Generation is
/// bounded by the range, pure, and side-effect free, so two sequences built
/// from the same arguments yield identical ticks and any number of them may
/// be consumed concurrently.
#[derive(Debug, Clone)]
pub struct TickSequence {
    timebase: Timebase,
    interval: TickInterval,
    lo: f64,
    hi: f64,
    epsilon: f64,
    policy: AnchorPolicy,
    ascending_time: bool,
    next: Option<DateTime<Tz>>,
    done: bool,
}

impl TickSequence {
    /// Starts a sequence for `interval` covering `[index_lo, index_hi]`.
    ///
    /// `index_lo > index_hi` (or a non-finite bound) is an `EmptyRange`;
    /// an equal pair is a legal point query.
    ///
    /// The walk anchors at the aligned instant at or just outside the low
    /// index edge, computed by exact field arithmetic, then steps fixed
    /// intervals by their constant real duration and the day interval by one
    /// local calendar day at a time.
    pub fn generate(
        timebase: &Timebase,
        interval: TickInterval,
        index_lo: f64,
        index_hi: f64,
        policy: AnchorPolicy,
    ) -> TimelineResult<Self> {
        if !index_lo.is_finite() || !index_hi.is_finite() || index_lo > index_hi {
            return Err(TimelineError::EmptyRange {
                lo: index_lo,
                hi: index_hi,
            });
        }

        let ascending_time = timebase.direction() == AxisDirection::Forward;
        let edge_instant = timebase.to_instant(index_lo);
        // At-or-outside the low edge: one extra candidate that `Inside`
        // filters out and `Straddle` keeps.
        let anchor = if ascending_time {
            interval.snap_down(edge_instant)
        } else {
            interval.snap_up(edge_instant)
        };
        let epsilon = (index_hi - index_lo).abs().max(1.0) * 1e-9;

        Ok(Self {
            timebase: *timebase,
            interval,
            lo: index_lo,
            hi: index_hi,
            epsilon,
            policy,
            ascending_time,
            next: Some(anchor),
            done: false,
        })
    }

    #[must_use]
    pub fn interval(&self) -> TickInterval {
        self.interval
    }

    #[must_use]
    pub fn index_range(&self) -> (f64, f64) {
        (self.lo, self.hi)
    }

    fn step(&self, instant: DateTime<Tz>) -> Option<DateTime<Tz>> {
        if self.ascending_time {
            self.interval.advance(instant)
        } else {
            self.interval.retreat(instant)
        }
    }
}

impl Iterator for TickSequence {
    type Item = Tick;

    fn next(&mut self) -> Option<Tick> {
        loop {
            if self.done {
                return None;
            }
            let current = self.next.take()?;
            let index = self.timebase.to_index(&current);
            match self.step(current) {
                Some(stepped) => self.next = Some(stepped),
                None => self.done = true,
            }

            if index < self.lo - self.epsilon {
                match self.policy {
                    // Only the anchor can sit below the low edge.
                    AnchorPolicy::Inside => continue,
                    AnchorPolicy::Straddle => {
                        return Some(Tick::new(current, index, self.interval));
                    }
                }
            }

            match self.policy {
                AnchorPolicy::Inside => {
                    if index > self.hi + self.epsilon {
                        self.done = true;
                        return None;
                    }
                }
                AnchorPolicy::Straddle => {
                    if index >= self.hi - self.epsilon {
                        self.done = true;
                    }
                }
            }
            return Some(Tick::new(current, index, self.interval));
        }
    }
}

impl std::iter::FusedIterator for TickSequence {}
