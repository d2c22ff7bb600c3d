//! Core systems for Meridian Dialog.
//!
//! This crate provides the foundational components of the Meridian Dialog
//! widget toolkit:
//!
//! - **Signal/Slot System**: Type-safe change notification
//! - **UI Task Queue**: FIFO delivery of closures to the UI thread
//! - **Cancellation**: Cooperative cancellation tokens
//! - **Worker**: Dedicated background thread with sequential task processing
//!
//! # Signal/Slot Example
//!
//! ```
//! use meridian_dialog_core::Signal;
//!
//! // Create a signal that notifies when a value changes
//! let value_changed = Signal::<i32>::new();
//!
//! // Connect a slot to handle the signal
//! let conn_id = value_changed.connect(|value| {
//!     println!("Value changed to: {}", value);
//! });
//!
//! // Emit the signal
//! value_changed.emit(42);
//!
//! // Disconnect when done
//! value_changed.disconnect(conn_id);
//! ```
//!
//! # Worker Example
//!
//! ```no_run
//! use meridian_dialog_core::{UiHandle, Worker};
//!
//! let ui = UiHandle::new();
//! let worker = Worker::<u64>::new();
//!
//! // Background computation, result delivered on the UI thread
//! worker.send_with_callback(
//!     || (1..=20u64).product(),
//!     &ui,
//!     |result| println!("20! = {}", result),
//! );
//!
//! // The UI thread drains the queue as part of its loop
//! ui.process_all();
//! ```

pub mod cancel;
mod error;
pub mod logging;
pub mod queue;
pub mod signal;
pub mod worker;

pub use cancel::CancellationToken;
pub use error::{CoreError, Result, SignalError, WorkerError};
pub use logging::PerfSpan;
pub use queue::{TaskId, UiHandle, UiQueue};
pub use signal::{ConnectionGuard, ConnectionId, ConnectionType, Signal};
pub use worker::{Worker, WorkerBuilder, WorkerConfig};
