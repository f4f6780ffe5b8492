use chrono::DateTime;
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::core::interval::TickInterval;

/// Direction of the index axis relative to time.
///
/// `Forward` maps later instants to greater indices. The direction is derived
/// from the calibration slope and only affects the sign of the conversion,
/// never tick alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AxisDirection {
    Forward,
    Backward,
}

/// Boundary handling for tick generation over an index range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum AnchorPolicy {
    /// Every emitted index lies within `[lo, hi]`, boundaries inclusive.
    #[default]
    Inside,
    /// Additionally one aligned tick at or beyond each edge, so the host can
    /// draw continuously while panning fast.
    Straddle,
}

/// Rounding mode used when snapping an instant onto the interval grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SnapMode {
    /// Aligned instant at or before the input.
    Down,
    /// Aligned instant at or after the input.
    Up,
    /// Closer of the two; ties resolve upward.
    Nearest,
}

/// One generated tick: an aligned instant and its index coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Tick {
    pub instant: DateTime<Tz>,
    pub index: f64,
    pub interval: TickInterval,
}

impl Tick {
    #[must_use]
    pub fn new(instant: DateTime<Tz>, index: f64, interval: TickInterval) -> Self {
        Self {
            instant,
            index,
            interval,
        }
    }
}

/// A positioned, optionally labeled mark as handed to the host.
///
/// `instant` is `None` for non-time content providers. `label` is `None`
/// only inside multi-interval frames, when a coarser row already labels the
/// same instant.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TickMark {
    pub index: f64,
    pub instant: Option<DateTime<Tz>>,
    pub label: Option<String>,
}

impl TickMark {
    #[must_use]
    pub fn timed(index: f64, instant: DateTime<Tz>, label: Option<String>) -> Self {
        Self {
            index,
            instant: Some(instant),
            label,
        }
    }

    #[must_use]
    pub fn numeric(index: f64, label: String) -> Self {
        Self {
            index,
            instant: None,
            label: Some(label),
        }
    }
}
