//! Logging facilities for CMK.
//!
//! CMK uses the `tracing` crate for instrumentation. To see logs, install a
//! subscriber in your application:
//!
//! ```ignore
//! fn main() {
//!     tracing_subscriber::fmt::init();
//!     // ...
//! }
//! ```
//!
//! Guarded failures (for example an operation on a destroyed widget handle)
//! are reported at `warn` level and never abort the process. Input handling
//! and repaint activity is reported at `debug`/`trace`.

/// Target names for log filtering.
///
/// Use these with `tracing` directives to filter logs by subsystem, e.g.
/// `RUST_LOG=cmk::button=debug`.
pub mod targets {
    /// Signal/slot system target.
    pub const SIGNAL: &str = "cmk_core::signal";
    /// Button widget target.
    pub const BUTTON: &str = "cmk::button";
    /// Stage (scene graph and event queue) target.
    pub const STAGE: &str = "cmk::stage";
    /// Canvas raster target.
    pub const CANVAS: &str = "cmk::canvas";
    /// Style provider target.
    pub const STYLE: &str = "cmk::style";
}

/// Span names used for tracing.
pub mod span_names {
    /// Event queue processing span.
    pub const PROCESS_EVENTS: &str = "cmk::process_events";
    /// Canvas redraw span.
    pub const CANVAS_REDRAW: &str = "cmk::canvas_redraw";
}
