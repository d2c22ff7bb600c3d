//! Signal/slot system for Meridian Dialog.
//!
//! This module provides a type-safe signal/slot mechanism for widget change
//! notification. Signals are emitted by dialogs when their state changes, and
//! connected slots (callbacks) are invoked in response.
//!
//! # Key Types
//!
//! - [`Signal<Args>`] - The main signal type for emitting notifications
//! - [`ConnectionId`] - Unique identifier returned when connecting a slot
//! - [`ConnectionType`] - How a slot should be invoked (Direct or Queued)
//! - [`ConnectionGuard`] - RAII guard that disconnects when dropped
//!
//! # Connection Types
//!
//! - **Direct**: Slot is called immediately in the emitting thread
//! - **Queued**: Slot execution is posted to a [`UiHandle`] and runs when the
//!   UI thread drains its queue (cross-thread safe)
//!
//! # Thread Safety
//!
//! Signals support cross-thread communication through queued connections.
//! When a worker thread emits a signal with a queued connection, the slot
//! invocation is posted to the UI task queue and runs in FIFO order with all
//! other posted work, so queued slot runs are totally ordered.
//!
//! # Example
//!
//! ```
//! use meridian_dialog_core::Signal;
//!
//! // Create a signal that passes a string argument
//! let text_changed = Signal::<String>::new();
//!
//! // Connect a slot (closure)
//! let conn_id = text_changed.connect(|text| {
//!     println!("Text changed to: {}", text);
//! });
//!
//! // Emit the signal
//! text_changed.emit("Hello, World!".to_string());
//!
//! // Disconnect when done
//! text_changed.disconnect(conn_id);
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use parking_lot::Mutex;
use slotmap::{SlotMap, new_key_type};

use crate::queue::UiHandle;

new_key_type! {
    /// A unique identifier for a signal-slot connection.
    ///
    /// Use this ID to disconnect a specific connection via [`Signal::disconnect`].
    /// The ID remains valid until the connection is explicitly disconnected or
    /// the signal is dropped.
    pub struct ConnectionId;
}

/// Specifies how a connected slot should be invoked when the signal is emitted.
///
/// Use with [`Signal::connect_with_type`] to control invocation behavior.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ConnectionType {
    /// Invoke the slot immediately in the emitting thread.
    ///
    /// This is the fastest option but requires the slot to be safe to call
    /// from any thread that might emit.
    #[default]
    Direct,

    /// Post the slot invocation to the UI task queue.
    ///
    /// This is safe for cross-thread communication. The slot will be invoked
    /// when the UI thread drains its queue. Connections made through
    /// [`Signal::connect_queued`] carry the handle to post to; a queued
    /// connection without a handle falls back to direct invocation.
    Queued,
}

/// Internal storage for a single connection.
struct Connection<Args> {
    /// The slot function to invoke (Arc-wrapped for safe cross-thread capture).
    slot: Arc<dyn Fn(&Args) + Send + Sync>,
    /// How to invoke this slot.
    connection_type: ConnectionType,
    /// Where queued invocations are posted.
    ui: Option<UiHandle>,
}

/// A type-safe signal that can have multiple connected slots.
///
/// Signals are the core of the observer pattern in Meridian Dialog. When a
/// signal is emitted, all connected slots are invoked with the provided
/// arguments.
///
/// # Type Parameter
///
/// - `Args`: The argument type passed to connected slots. Use `()` for signals
///   with no arguments, or a tuple like `(String, i32)` for multiple arguments.
///
/// # Thread Safety
///
/// `Signal<Args>` is `Send + Sync` and can be safely shared between threads.
/// The [`ConnectionType`] determines how slots are invoked across thread
/// boundaries.
pub struct Signal<Args> {
    /// All active connections.
    connections: Mutex<SlotMap<ConnectionId, Connection<Args>>>,
    /// Whether signal emission is temporarily blocked.
    blocked: AtomicBool,
}

impl<Args: Clone + Send + 'static> Default for Signal<Args> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Args: Clone + Send + 'static> Signal<Args> {
    /// Create a new signal with no connections.
    pub fn new() -> Self {
        Self {
            connections: Mutex::new(SlotMap::with_key()),
            blocked: AtomicBool::new(false),
        }
    }

    /// Connect a slot (closure) to this signal.
    ///
    /// The slot will be invoked directly in the emitting thread.
    ///
    /// Returns a `ConnectionId` that can be used to disconnect the slot later.
    ///
    /// # Example
    ///
    /// ```
    /// use meridian_dialog_core::Signal;
    ///
    /// let signal = Signal::<String>::new();
    /// let id = signal.connect(|s| println!("Got: {}", s));
    /// signal.emit("Hello".to_string());
    /// ```
    pub fn connect<F>(&self, slot: F) -> ConnectionId
    where
        F: Fn(&Args) + Send + Sync + 'static,
    {
        self.connect_with_type(slot, ConnectionType::Direct)
    }

    /// Connect a slot whose invocations are posted to the UI task queue.
    ///
    /// Each emission clones the arguments and posts a closure to `ui`. The
    /// slot runs when the UI thread drains the queue, in emission order.
    ///
    /// # Example
    ///
    /// ```
    /// use meridian_dialog_core::{Signal, UiHandle};
    ///
    /// let ui = UiHandle::new();
    /// let signal = Signal::<i32>::new();
    /// signal.connect_queued(&ui, |n| println!("{}", n));
    ///
    /// signal.emit(42);    // nothing printed yet
    /// ui.process_all();   // slot runs here
    /// ```
    pub fn connect_queued<F>(&self, ui: &UiHandle, slot: F) -> ConnectionId
    where
        F: Fn(&Args) + Send + Sync + 'static,
    {
        let connection = Connection {
            slot: Arc::new(slot),
            connection_type: ConnectionType::Queued,
            ui: Some(ui.clone()),
        };
        self.connections.lock().insert(connection)
    }

    /// Connect a slot with a specific connection type.
    ///
    /// A [`ConnectionType::Queued`] connection made through this method has
    /// no UI handle to post to and falls back to direct invocation; prefer
    /// [`Signal::connect_queued`] for cross-thread delivery.
    pub fn connect_with_type<F>(&self, slot: F, connection_type: ConnectionType) -> ConnectionId
    where
        F: Fn(&Args) + Send + Sync + 'static,
    {
        let connection = Connection {
            slot: Arc::new(slot),
            connection_type,
            ui: None,
        };
        self.connections.lock().insert(connection)
    }

    /// Disconnect a specific slot by its connection ID.
    ///
    /// Returns `true` if the connection was found and removed, `false` otherwise.
    pub fn disconnect(&self, id: ConnectionId) -> bool {
        self.connections.lock().remove(id).is_some()
    }

    /// Disconnect all slots from this signal.
    pub fn disconnect_all(&self) {
        self.connections.lock().clear();
    }

    /// Get the number of connected slots.
    pub fn connection_count(&self) -> usize {
        self.connections.lock().len()
    }

    /// Block signal emission temporarily.
    ///
    /// While blocked, calls to `emit()` will do nothing. This is useful
    /// during initialization or batch updates to prevent cascading
    /// notifications.
    pub fn set_blocked(&self, blocked: bool) {
        self.blocked.store(blocked, Ordering::SeqCst);
    }

    /// Check if signal emission is currently blocked.
    pub fn is_blocked(&self) -> bool {
        self.blocked.load(Ordering::SeqCst)
    }

    /// Emit the signal, invoking all connected slots.
    ///
    /// If the signal is blocked, this does nothing. Otherwise, all connected
    /// slots are invoked according to their connection type:
    ///
    /// - `Direct`: Called immediately in the current thread
    /// - `Queued`: Posted to the connection's UI handle; the arguments are
    ///   cloned for each queued connection
    #[tracing::instrument(skip_all, target = "meridian_dialog_core::signal", level = "trace")]
    pub fn emit(&self, args: Args) {
        if self.is_blocked() {
            tracing::trace!(target: "meridian_dialog_core::signal", "signal blocked, skipping emit");
            return;
        }

        let connections = self.connections.lock();
        tracing::trace!(target: "meridian_dialog_core::signal", connection_count = connections.len(), "emitting signal");

        for (_, conn) in connections.iter() {
            match conn.connection_type {
                ConnectionType::Direct => {
                    (conn.slot)(&args);
                }
                ConnectionType::Queued => match &conn.ui {
                    Some(ui) => {
                        let slot = Arc::clone(&conn.slot);
                        let args = args.clone();
                        ui.post(move || {
                            slot(&args);
                        });
                    }
                    None => {
                        // No queue available - execute immediately as fallback
                        tracing::warn!(
                            target: "meridian_dialog_core::signal",
                            "No UI handle for queued connection, executing immediately"
                        );
                        (conn.slot)(&args);
                    }
                },
            }
        }
    }
}

// Signal is Send + Sync when Args is Send
unsafe impl<Args: Send> Send for Signal<Args> {}
unsafe impl<Args: Send> Sync for Signal<Args> {}

/// A connection guard that automatically disconnects when dropped.
///
/// This is useful for RAII-style connection management, ensuring connections
/// are cleaned up when the receiver goes out of scope. Created via
/// [`Signal::connect_scoped`].
///
/// # Example
///
/// ```
/// use meridian_dialog_core::Signal;
/// use std::sync::atomic::{AtomicI32, Ordering};
/// use std::sync::Arc;
///
/// let signal = Signal::<i32>::new();
/// let counter = Arc::new(AtomicI32::new(0));
/// {
///     let counter_clone = counter.clone();
///     let _guard = signal.connect_scoped(move |&n| {
///         counter_clone.fetch_add(n, Ordering::SeqCst);
///     });
///     signal.emit(42);  // counter = 42
/// }
/// signal.emit(43);  // Nothing happens - connection was dropped
/// assert_eq!(counter.load(Ordering::SeqCst), 42);
/// ```
pub struct ConnectionGuard<Args: Clone + Send + 'static> {
    signal: *const Signal<Args>,
    id: ConnectionId,
}

impl<Args: Clone + Send + 'static> Signal<Args> {
    /// Connect a slot with automatic disconnection when the guard is dropped.
    ///
    /// # Safety
    ///
    /// The returned guard holds a raw pointer to this signal. The signal must
    /// outlive the guard. Using `Arc<Signal<Args>>` is recommended for shared
    /// ownership.
    pub fn connect_scoped<F>(&self, slot: F) -> ConnectionGuard<Args>
    where
        F: Fn(&Args) + Send + Sync + 'static,
    {
        let id = self.connect(slot);
        ConnectionGuard {
            signal: self as *const Signal<Args>,
            id,
        }
    }
}

impl<Args: Clone + Send + 'static> Drop for ConnectionGuard<Args> {
    fn drop(&mut self) {
        // SAFETY: The signal pointer is valid if the guard is used correctly.
        // The caller must ensure the signal outlives the guard.
        unsafe {
            if !self.signal.is_null() {
                let _ = (*self.signal).disconnect(self.id);
            }
        }
    }
}

// SAFETY: ConnectionGuard is Send + Sync because:
// - The raw pointer `signal` is only dereferenced in `drop()`, which is called
//   on the owning thread or when the guard is moved to another thread.
// - Signal<Args> itself is Send + Sync (uses Mutex internally for connections).
// - The ConnectionId is a simple Copy type (slotmap key).
// - The guard's safety contract (documented in `connect_scoped`) requires the
//   Signal to outlive the guard, which the caller must ensure.
unsafe impl<Args: Clone + Send + 'static> Send for ConnectionGuard<Args> {}
unsafe impl<Args: Clone + Send + 'static> Sync for ConnectionGuard<Args> {}
