use std::collections::HashSet;

use indexmap::IndexMap;
use serde::Serialize;
use tracing::{trace, warn};

use crate::core::{TickInterval, TickMark};
use crate::error::{TimelineError, TimelineResult};

use super::TimelineAxis;

/// One redraw's worth of ticks for several intervals at once.
///
/// Rows are keyed by catalog key in request order. When the same instant
/// appears in several rows, only the coarsest row keeps its label; the finer
/// rows emit the mark unlabeled so the host draws the tick without repeating
/// the text.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TickFrame {
    pub index_lo: f64,
    pub index_hi: f64,
    pub rows: IndexMap<String, Vec<TickMark>>,
}

impl TickFrame {
    #[must_use]
    pub fn row(&self, interval: TickInterval) -> Option<&[TickMark]> {
        self.rows.get(interval.key()).map(Vec::as_slice)
    }

    #[must_use]
    pub fn mark_count(&self) -> usize {
        self.rows.values().map(Vec::len).sum()
    }
}

impl TimelineAxis {
    /// Generates marks for every requested interval over one index range.
    ///
    /// Duplicate intervals in the request are dropped with a warning. Label
    /// deduplication registers each labeled instant by its whole epoch
    /// second, claimed coarsest interval first.
    pub fn frame_for(
        &self,
        intervals: &[TickInterval],
        index_lo: f64,
        index_hi: f64,
    ) -> TimelineResult<TickFrame> {
        if !index_lo.is_finite() || !index_hi.is_finite() || index_lo > index_hi {
            return Err(TimelineError::EmptyRange {
                lo: index_lo,
                hi: index_hi,
            });
        }

        let mut requested: Vec<TickInterval> = Vec::with_capacity(intervals.len());
        for interval in intervals {
            if requested.contains(interval) {
                warn!(
                    interval = interval.key(),
                    "duplicate interval in frame request dropped"
                );
                continue;
            }
            requested.push(*interval);
        }

        let mut rows: IndexMap<String, Vec<TickMark>> = requested
            .iter()
            .map(|interval| (interval.key().to_owned(), Vec::new()))
            .collect();

        // Coarsest rows claim shared instants first.
        let mut by_coarseness = requested.clone();
        by_coarseness.sort_by_key(|interval| std::cmp::Reverse(interval.step_seconds()));

        let mut labeled_seconds: HashSet<i64> = HashSet::new();
        for interval in by_coarseness {
            let mut marks = self.ticks_for(interval, index_lo, index_hi)?;
            for mark in &mut marks {
                let Some(instant) = mark.instant else {
                    continue;
                };
                if !labeled_seconds.insert(instant.timestamp()) {
                    mark.label = None;
                }
            }
            // Insert keeps the prepopulated request-order slot.
            rows.insert(interval.key().to_owned(), marks);
        }

        trace!(
            index_lo,
            index_hi,
            intervals = rows.len(),
            "tick frame generated"
        );
        Ok(TickFrame {
            index_lo,
            index_hi,
            rows,
        })
    }
}
