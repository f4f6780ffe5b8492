use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::core::interval::TickInterval;
use crate::core::types::Tick;

/// Formatter options for tick labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct TickLabelConfig {
    /// Prefix rendered dates with the abbreviated weekday ("Mon 2024-01-01").
    pub weekday_on_dates: bool,
}

/// Formats one tick given its immediate predecessor in the same sequence.
///
/// The rules minimize redundant text: day ticks are date-only and carry the
/// year exactly at sequence start and year changes; sub-day ticks are
/// time-of-day at the interval's precision, with the date prepended only when
/// it changed since the previous tick. A pure function of the pair, no wider
/// lookahead.
#[must_use]
pub fn format_tick_label(tick: &Tick, previous: Option<&Tick>, config: &TickLabelConfig) -> String {
    let local = tick.instant.naive_local();

    if tick.interval == TickInterval::Day {
        let with_year = match previous {
            None => true,
            Some(prev) => prev.instant.naive_local().year() != local.year(),
        };
        return date_text(local.date(), with_year, config);
    }

    let time_pattern = if tick.interval.has_seconds_precision() {
        "%H:%M:%S"
    } else {
        "%H:%M"
    };
    let time_text = local.format(time_pattern).to_string();

    match previous {
        None => time_text,
        Some(prev) => {
            let prev_local = prev.instant.naive_local();
            if prev_local.date() == local.date() {
                time_text
            } else {
                let with_year = prev_local.year() != local.year();
                format!("{} {time_text}", date_text(local.date(), with_year, config))
            }
        }
    }
}

fn date_text(date: NaiveDate, with_year: bool, config: &TickLabelConfig) -> String {
    let pattern = match (config.weekday_on_dates, with_year) {
        (false, true) => "%Y-%m-%d",
        (false, false) => "%m-%d",
        (true, true) => "%a %Y-%m-%d",
        (true, false) => "%a %m-%d",
    };
    date.format(pattern).to_string()
}
