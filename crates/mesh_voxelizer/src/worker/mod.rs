//! Bounded worker pool over OS threads.
//!
//! ```text
//!  enqueue ──► FIFO queue ──► idle worker?  ──yes──► Run {task_id, request}
//!                                 │ no                       │
//!                                 ▼                          ▼
//!                        below concurrency cap?        worker thread
//!                           │ yes        │ no          handle(request)
//!                           ▼            ▼                   │
//!                     spawn + Init     stay queued           ▼
//!                                                  complete: resolve task,
//!                                                  mark Idle, drain queue
//! ```
//!
//! Worker state machine: `Idle → Busy → Idle`, terminal `Terminated`.
//!
//! Requests and responses move through channels, so large buffers change
//! owner instead of being copied. Every task resolves exactly once: with its
//! response, with a [`TaskError`] when the handler fails or panics, or with
//! [`TaskError::Abandoned`] when the pool is destroyed first.
//!
//! # Module Structure
//!
//! - [`handle`]: `TaskHandle` - future side of a submitted task
//! - [`pool`]: `WorkerPool` - queue, dispatch and worker threads
//! - `batch`: per-chunk fan-out and join used by the drivers

mod batch;
pub mod handle;
pub mod pool;

pub(crate) use batch::run_chunk_batch;
pub use handle::{TaskHandle, TaskResult};
pub use pool::WorkerPool;

use crate::constants::DEFAULT_MAX_WORKERS;
use crate::error::TaskError;

/// Per-thread task handler.
///
/// One value is built per worker thread from the pool's init payload and then
/// serves every request dispatched to that thread.
pub trait Worker: Sized + Send + 'static {
  /// Payload sent once to each new worker.
  type Init: Clone + Send + Sync + 'static;
  type Request: Send + 'static;
  type Response: Send + 'static;

  /// Build the worker context.
  fn init(init: Self::Init) -> Result<Self, TaskError>;

  /// Short name of the task a request describes, for logs.
  fn task_name(request: &Self::Request) -> &'static str;

  fn handle(&mut self, request: Self::Request) -> Result<Self::Response, TaskError>;
}

/// Identifier of a submitted task, unique within its pool.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskId(pub u64);

/// Lifecycle of one worker thread.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WorkerState {
  Idle,
  Busy,
  Terminated,
}

/// Pool sizing and thread naming.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PoolConfig {
  /// Maximum number of worker threads.
  pub concurrency: usize,
  /// Prefix for worker thread names.
  pub thread_name: String,
}

impl Default for PoolConfig {
  fn default() -> Self {
    Self::with_max_workers(DEFAULT_MAX_WORKERS)
  }
}

impl PoolConfig {
  /// Size the pool to the available parallelism, capped at `max_workers`.
  pub fn with_max_workers(max_workers: usize) -> Self {
    let available = std::thread::available_parallelism()
      .map(|n| n.get())
      .unwrap_or(1);
    Self {
      concurrency: available.min(max_workers).max(1),
      thread_name: "mesh-voxelizer-worker".to_string(),
    }
  }

  pub fn with_concurrency(mut self, concurrency: usize) -> Self {
    self.concurrency = concurrency.max(1);
    self
  }

  pub fn with_thread_name(mut self, name: impl Into<String>) -> Self {
    self.thread_name = name.into();
    self
  }
}
