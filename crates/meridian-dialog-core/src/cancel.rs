//! Cooperative cancellation.
//!
//! A [`CancellationToken`] is a plain boolean flag shared between threads.
//! Setting it never interrupts work already in flight; tasks check the token
//! between steps and exit gracefully when it is set. Dialog update closures
//! posted to the UI queue follow the same rule and check the token before
//! applying their step.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use parking_lot::{Condvar, Mutex};

/// A cancellation token for cooperative task cancellation.
///
/// Cancellation tokens allow signaling that a task should stop its work.
/// Tasks must periodically check the token and exit gracefully when cancelled.
/// Clones share the same underlying state.
#[derive(Debug, Clone)]
pub struct CancellationToken {
    inner: Arc<CancellationState>,
}

#[derive(Debug)]
struct CancellationState {
    cancelled: AtomicBool,
    waiters: Mutex<Vec<Arc<Wakeup>>>,
}

impl CancellationToken {
    /// Create a new cancellation token.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(CancellationState {
                cancelled: AtomicBool::new(false),
                waiters: Mutex::new(Vec::new()),
            }),
        }
    }

    /// Check if cancellation has been requested.
    #[inline]
    pub fn is_cancelled(&self) -> bool {
        self.inner.cancelled.load(Ordering::Acquire)
    }

    /// Request cancellation.
    ///
    /// This sets the cancellation flag. Tasks checking `is_cancelled()` will
    /// see the cancellation and should exit gracefully.
    pub fn cancel(&self) {
        if !self.inner.cancelled.swap(true, Ordering::Release) {
            tracing::debug!(target: "meridian_dialog_core::cancel", "cancellation requested");
            // Notify all waiters
            let mut waiters = self.inner.waiters.lock();
            for waker in waiters.drain(..) {
                waker.wake();
            }
        }
    }

    /// Reset the token to non-cancelled state.
    ///
    /// This allows reusing a token for multiple operations.
    pub fn reset(&self) {
        self.inner.cancelled.store(false, Ordering::Release);
    }

    /// Block the calling thread until cancellation is requested.
    pub fn wait(&self) {
        if self.is_cancelled() {
            return;
        }
        let waker = Arc::new(Wakeup::new());
        self.register_waker(Arc::clone(&waker));
        waker.wait();
    }

    /// Block until cancellation is requested or the timeout elapses.
    ///
    /// Returns `true` if the token was cancelled, `false` on timeout.
    pub fn wait_timeout(&self, timeout: Duration) -> bool {
        if self.is_cancelled() {
            return true;
        }
        let waker = Arc::new(Wakeup::new());
        self.register_waker(Arc::clone(&waker));
        waker.wait_timeout(timeout)
    }

    /// Register a waker to be notified on cancellation.
    fn register_waker(&self, waker: Arc<Wakeup>) {
        if self.is_cancelled() {
            waker.wake();
        } else {
            self.inner.waiters.lock().push(waker);
        }
    }
}

impl Default for CancellationToken {
    fn default() -> Self {
        Self::new()
    }
}

/// Internal wakeup mechanism for blocked waiters.
#[derive(Debug)]
struct Wakeup {
    ready: AtomicBool,
    condvar: Condvar,
    mutex: Mutex<()>,
}

impl Wakeup {
    fn new() -> Self {
        Self {
            ready: AtomicBool::new(false),
            condvar: Condvar::new(),
            mutex: Mutex::new(()),
        }
    }

    fn wake(&self) {
        // Hold the lock while setting ready to avoid lost wakeup race condition
        let _guard = self.mutex.lock();
        self.ready.store(true, Ordering::Release);
        self.condvar.notify_all();
    }

    fn wait(&self) {
        let mut guard = self.mutex.lock();
        while !self.ready.load(Ordering::Acquire) {
            self.condvar.wait(&mut guard);
        }
    }

    fn wait_timeout(&self, timeout: Duration) -> bool {
        let mut guard = self.mutex.lock();
        if self.ready.load(Ordering::Acquire) {
            return true;
        }
        let result = self.condvar.wait_for(&mut guard, timeout);
        self.ready.load(Ordering::Acquire) || !result.timed_out()
    }
}

// Compile-time assertions that our types are Send + Sync
static_assertions::assert_impl_all!(CancellationToken: Send, Sync);
