//! Error types for Meridian Dialog core.

use std::fmt;

/// The main error type for Meridian Dialog core operations.
#[derive(Debug)]
pub enum CoreError {
    /// The UI task queue has been dropped and no longer accepts tasks.
    QueueClosed,
    /// Signal-related error.
    Signal(SignalError),
    /// Worker-related error.
    Worker(WorkerError),
}

impl fmt::Display for CoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::QueueClosed => {
                write!(f, "UI task queue has been closed")
            }
            Self::Signal(err) => write!(f, "Signal error: {err}"),
            Self::Worker(err) => write!(f, "Worker error: {err}"),
        }
    }
}

impl std::error::Error for CoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Signal(err) => Some(err),
            Self::Worker(err) => Some(err),
            _ => None,
        }
    }
}

/// Signal-specific errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignalError {
    /// The connection ID is invalid or has already been disconnected.
    InvalidConnection,
}

impl fmt::Display for SignalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidConnection => write!(f, "Invalid or disconnected connection ID"),
        }
    }
}

impl std::error::Error for SignalError {}

impl From<SignalError> for CoreError {
    fn from(err: SignalError) -> Self {
        Self::Signal(err)
    }
}

/// Worker-specific errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkerError {
    /// The worker thread has been stopped and no longer accepts tasks.
    Stopped,
    /// The worker task queue is full.
    QueueFull,
}

impl fmt::Display for WorkerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Stopped => write!(f, "Worker has been stopped"),
            Self::QueueFull => write!(f, "Worker task queue is full"),
        }
    }
}

impl std::error::Error for WorkerError {}

impl From<WorkerError> for CoreError {
    fn from(err: WorkerError) -> Self {
        Self::Worker(err)
    }
}

/// A specialized Result type for Meridian Dialog core operations.
pub type Result<T> = std::result::Result<T, CoreError>;
