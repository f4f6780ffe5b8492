//! timeline-rs: timezone- and DST-aware tick generation for zoomable,
//! pannable time axes.
//!
//! The crate maps an abstract linear index coordinate to absolute instants,
//! lazily enumerates calendar-aligned ticks of a chosen interval inside any
//! index range, and formats redundancy-minimized labels for them. Pixel
//! layout, gestures, and drawing stay with the host widget.

pub mod api;
pub mod core;
pub mod error;
pub mod telemetry;

pub use api::{IndexTicks, TickFrame, TickProvider, TimelineAxis, TimelineAxisConfig};
pub use core::{
    AnchorPolicy, AxisDirection, Calibration, SnapMode, Tick, TickInterval, TickLabelConfig,
    TickMark, TickSequence, Timebase, format_tick_label,
};
pub use error::{TimelineError, TimelineResult};
