//! Logging and debugging facilities for Meridian Dialog.
//!
//! This module provides:
//! - Integration with the `tracing` crate for structured logging
//! - Performance tracing hooks for profiling
//!
//! # Tracing Integration
//!
//! Meridian Dialog uses the `tracing` crate for instrumentation. To see logs,
//! you need to install a tracing subscriber in your application:
//!
//! ```ignore
//! use tracing_subscriber;
//!
//! fn main() {
//!     // Initialize tracing (you can customize this)
//!     tracing_subscriber::fmt::init();
//!
//!     // Your application code...
//! }
//! ```

/// Span names used throughout Meridian Dialog for tracing.
///
/// These constants can be used to filter traces for specific subsystems.
pub mod span_names {
    /// Signal emission span.
    pub const SIGNAL: &str = "meridian_dialog::signal";
    /// UI task queue processing span.
    pub const QUEUE: &str = "meridian_dialog::queue";
    /// Worker thread span.
    pub const WORKER: &str = "meridian_dialog::worker";
}

/// Target names for log filtering.
///
/// Use these with `tracing` directives to filter logs by subsystem.
pub mod targets {
    /// Core framework target.
    pub const CORE: &str = "meridian_dialog_core";
    /// Signal/slot system target.
    pub const SIGNAL: &str = "meridian_dialog_core::signal";
    /// UI task queue target.
    pub const QUEUE: &str = "meridian_dialog_core::queue";
    /// Cancellation token target.
    pub const CANCEL: &str = "meridian_dialog_core::cancel";
    /// Worker thread target.
    pub const WORKER: &str = "meridian_dialog_core::worker";
}

/// A guard that emits a tracing span when dropped.
///
/// This is useful for tracking the duration of operations.
#[derive(Debug)]
pub struct PerfSpan {
    #[allow(dead_code)]
    span: tracing::span::EnteredSpan,
}

impl PerfSpan {
    /// Create a new performance span.
    ///
    /// The span will be active until the guard is dropped.
    pub fn new(name: &'static str) -> Self {
        let span = tracing::info_span!(target: "meridian_dialog::perf", "perf", operation = name);
        Self {
            span: span.entered(),
        }
    }
}

/// Macros for common tracing patterns.
///
/// These are re-exported for convenience but are just wrappers around
/// the `tracing` crate macros with consistent target naming.
#[macro_export]
macro_rules! meridian_trace {
    ($($arg:tt)*) => {
        tracing::trace!(target: "meridian_dialog_core", $($arg)*)
    };
}

#[macro_export]
macro_rules! meridian_debug {
    ($($arg:tt)*) => {
        tracing::debug!(target: "meridian_dialog_core", $($arg)*)
    };
}

#[macro_export]
macro_rules! meridian_info {
    ($($arg:tt)*) => {
        tracing::info!(target: "meridian_dialog_core", $($arg)*)
    };
}

#[macro_export]
macro_rules! meridian_warn {
    ($($arg:tt)*) => {
        tracing::warn!(target: "meridian_dialog_core", $($arg)*)
    };
}

#[macro_export]
macro_rules! meridian_error {
    ($($arg:tt)*) => {
        tracing::error!(target: "meridian_dialog_core", $($arg)*)
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_perf_span() {
        // Just ensure it compiles and doesn't panic
        let _span = PerfSpan::new("test_operation");
    }

    #[test]
    fn test_macros_compile() {
        meridian_trace!("trace message");
        meridian_debug!("debug message with value {}", 42);
        meridian_info!("info message");
        meridian_warn!("warn message");
        meridian_error!("error message");
    }
}
