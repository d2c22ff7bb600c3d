//! Error types for dialog configuration.

/// Result type alias for configuration validation.
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Errors produced when a dialog configuration fails validation.
///
/// Validation happens once, when a [`DialogBuilder`](crate::DialogBuilder)
/// is built. A [`Dialog`](crate::Dialog) constructed from a valid
/// configuration never re-validates at runtime.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// A horizontal progress bar was configured with a non-positive maximum.
    #[error("progress maximum must be positive, got {maximum}")]
    ProgressMaximumNotPositive { maximum: i32 },

    /// The initial progress value falls outside `0..=maximum`.
    #[error("initial progress {current} is outside 0..={maximum}")]
    ProgressOutOfRange { current: i32, maximum: i32 },

    /// A single-choice list was given a preselected index past the end.
    #[error("preselected index {index} is out of bounds for {item_count} items")]
    CheckedIndexOutOfBounds { index: usize, item_count: usize },

    /// A multi-choice list was given a checked-flag slice of the wrong length.
    #[error("got {flag_count} checked flags for {item_count} items")]
    MismatchedCheckedFlags { flag_count: usize, item_count: usize },
}
