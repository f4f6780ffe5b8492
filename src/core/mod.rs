mod interval;
mod label;
mod sequence;
mod timebase;
mod timezone;
mod types;

pub use interval::TickInterval;
pub use label::{TickLabelConfig, format_tick_label};
pub use sequence::TickSequence;
pub use timebase::{Calibration, Timebase};
pub use timezone::{local_timezone, resolve_timezone};
pub use types::{AnchorPolicy, AxisDirection, SnapMode, Tick, TickMark};
