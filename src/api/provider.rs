use serde::{Deserialize, Serialize};

use crate::core::TickMark;
use crate::error::{TimelineError, TimelineResult};

use super::TimelineAxis;

/// Contract implemented by any axis-content provider.
///
/// The host widget only needs positioned, labeled marks for the index range
/// it currently shows; what the marks mean (calendar time, plain numbers,
/// anything custom) stays with the implementation. New content types
/// implement this trait rather than subclassing a concrete axis.
pub trait TickProvider {
    fn marks_in(&self, index_lo: f64, index_hi: f64) -> TimelineResult<Vec<TickMark>>;
}

impl TickProvider for TimelineAxis {
    fn marks_in(&self, index_lo: f64, index_hi: f64) -> TimelineResult<Vec<TickMark>> {
        self.ticks_for(self.config().primary_interval, index_lo, index_hi)
    }
}

/// Fixed-step numeric ticks: the non-time reference implementation of
/// `TickProvider`.
///
/// The grid is `origin + k * step` for every integer `k`, so it extends in
/// both directions; `origin` anchors the grid phase, it is not a lower
/// bound. `marks_in` emits the grid points inside the queried range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IndexTicks {
    origin: f64,
    step: f64,
    precision: u8,
}

impl IndexTicks {
    pub fn new(origin: f64, step: f64, precision: u8) -> TimelineResult<Self> {
        if !origin.is_finite() || !step.is_finite() || step <= 0.0 {
            return Err(TimelineError::InvalidConfiguration {
                detail: format!("numeric ticks need a finite origin and positive step, got origin={origin}, step={step}"),
            });
        }
        Ok(Self {
            origin,
            step,
            precision,
        })
    }

    #[must_use]
    pub fn step(&self) -> f64 {
        self.step
    }
}

impl TickProvider for IndexTicks {
    fn marks_in(&self, index_lo: f64, index_hi: f64) -> TimelineResult<Vec<TickMark>> {
        if !index_lo.is_finite() || !index_hi.is_finite() || index_lo > index_hi {
            return Err(TimelineError::EmptyRange {
                lo: index_lo,
                hi: index_hi,
            });
        }

        let first = ((index_lo - self.origin) / self.step).ceil();
        let last = ((index_hi - self.origin) / self.step).floor();
        let mut marks = Vec::new();
        let mut multiple = first;
        while multiple <= last {
            let index = self.origin + multiple * self.step;
            let precision = usize::from(self.precision);
            marks.push(TickMark::numeric(index, format!("{index:.precision$}")));
            multiple += 1.0;
        }
        Ok(marks)
    }
}
