//! UI task queue with ordered delivery.
//!
//! Background threads post closures here; the UI thread drains them in FIFO
//! order. This is the "run this on the UI thread" primitive that dialog
//! updates and queued signal connections are built on.

use std::collections::VecDeque;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::Mutex;

/// A unique identifier for a posted task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskId(u64);

impl TaskId {
    /// Get the raw u64 value of this task ID.
    pub fn as_u64(self) -> u64 {
        self.0
    }
}

/// Global counter for generating unique task IDs.
static NEXT_TASK_ID: AtomicU64 = AtomicU64::new(1);

fn next_task_id() -> TaskId {
    TaskId(NEXT_TASK_ID.fetch_add(1, Ordering::Relaxed))
}

/// A boxed task closure.
type BoxedTask = Box<dyn FnOnce() + Send + 'static>;

/// Internal task data.
struct TaskData {
    id: TaskId,
    task: BoxedTask,
}

/// Manages the UI task queue.
///
/// This is the single-owner form used when the queue never leaves the UI
/// thread. Use [`UiHandle`] to post from other threads.
pub struct UiQueue {
    /// Pending tasks to execute.
    tasks: VecDeque<TaskData>,
    /// Maximum number of tasks to process per drain cycle.
    batch_size: usize,
}

impl UiQueue {
    /// Create a new task queue.
    pub fn new() -> Self {
        Self {
            tasks: VecDeque::new(),
            batch_size: 10,
        }
    }

    /// Create a new task queue with a custom batch size.
    pub fn with_batch_size(batch_size: usize) -> Self {
        Self {
            tasks: VecDeque::new(),
            batch_size,
        }
    }

    /// Post a task to be executed on the next drain.
    ///
    /// Returns the task ID that can be used to cancel the task.
    pub fn post<F>(&mut self, task: F) -> TaskId
    where
        F: FnOnce() + Send + 'static,
    {
        let id = next_task_id();
        self.tasks.push_back(TaskData {
            id,
            task: Box::new(task),
        });
        id
    }

    /// Cancel a pending task.
    ///
    /// Returns `true` if the task was found and cancelled. A cancelled task
    /// is removed without running.
    pub fn cancel(&mut self, id: TaskId) -> bool {
        if let Some(pos) = self.tasks.iter().position(|t| t.id == id) {
            self.tasks.remove(pos);
            true
        } else {
            false
        }
    }

    /// Check if there are any pending tasks.
    pub fn has_pending(&self) -> bool {
        !self.tasks.is_empty()
    }

    /// Get the number of pending tasks.
    pub fn pending_count(&self) -> usize {
        self.tasks.len()
    }

    /// Process up to `batch_size` tasks.
    ///
    /// Returns the number of tasks processed.
    pub fn process_batch(&mut self) -> usize {
        let count = self.tasks.len().min(self.batch_size);
        for _ in 0..count {
            if let Some(task_data) = self.tasks.pop_front() {
                (task_data.task)();
            }
        }
        count
    }

    /// Process all pending tasks.
    ///
    /// Returns the number of tasks processed.
    pub fn process_all(&mut self) -> usize {
        let count = self.tasks.len();
        while let Some(task_data) = self.tasks.pop_front() {
            (task_data.task)();
        }
        count
    }

    /// Set the batch size for drain cycles.
    pub fn set_batch_size(&mut self, size: usize) {
        self.batch_size = size;
    }

    /// Pop the next task without running it.
    fn take_next(&mut self) -> Option<BoxedTask> {
        self.tasks.pop_front().map(|data| data.task)
    }
}

impl Default for UiQueue {
    fn default() -> Self {
        Self::new()
    }
}

/// A thread-safe handle to a [`UiQueue`].
///
/// Clones share the same queue. Any thread may post or cancel; by convention
/// exactly one thread (the UI thread) calls the `process_*` methods. The lock
/// is released while each task runs, so tasks are free to post further tasks
/// through a clone of the handle.
#[derive(Clone)]
pub struct UiHandle {
    inner: Arc<Mutex<UiQueue>>,
}

impl UiHandle {
    /// Create a handle to a fresh queue.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(UiQueue::new())),
        }
    }

    /// Post a task to be executed on the next drain.
    ///
    /// Returns the task ID that can be used to cancel the task.
    pub fn post<F>(&self, task: F) -> TaskId
    where
        F: FnOnce() + Send + 'static,
    {
        self.inner.lock().post(task)
    }

    /// Cancel a pending task.
    ///
    /// Returns `true` if the task was found and cancelled.
    pub fn cancel(&self, id: TaskId) -> bool {
        let cancelled = self.inner.lock().cancel(id);
        if cancelled {
            tracing::trace!(
                target: "meridian_dialog_core::queue",
                task_id = id.as_u64(),
                "cancelled pending UI task"
            );
        }
        cancelled
    }

    /// Check if there are any pending tasks.
    pub fn has_pending(&self) -> bool {
        self.inner.lock().has_pending()
    }

    /// Get the number of pending tasks.
    pub fn pending_count(&self) -> usize {
        self.inner.lock().pending_count()
    }

    /// Process up to the configured batch size of tasks.
    ///
    /// The batch length is fixed when the call starts; tasks posted while the
    /// batch runs wait for the next drain. Returns the number of tasks
    /// processed.
    pub fn process_batch(&self) -> usize {
        let count = {
            let queue = self.inner.lock();
            queue.tasks.len().min(queue.batch_size)
        };
        for _ in 0..count {
            let Some(task) = self.inner.lock().take_next() else {
                break;
            };
            task();
        }
        count
    }

    /// Process pending tasks until the queue is empty.
    ///
    /// Tasks posted by tasks during the drain are processed in the same call,
    /// in post order. Returns the number of tasks processed.
    pub fn process_all(&self) -> usize {
        let mut count = 0;
        loop {
            let Some(task) = self.inner.lock().take_next() else {
                break;
            };
            task();
            count += 1;
        }
        if count > 0 {
            tracing::trace!(
                target: "meridian_dialog_core::queue",
                count,
                "drained UI task queue"
            );
        }
        count
    }

    /// Set the batch size for drain cycles.
    pub fn set_batch_size(&self, size: usize) {
        self.inner.lock().set_batch_size(size);
    }
}

impl Default for UiHandle {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for UiHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UiHandle")
            .field("pending", &self.pending_count())
            .finish()
    }
}

// Compile-time assertions that our types are Send + Sync
static_assertions::assert_impl_all!(UiHandle: Send, Sync);
