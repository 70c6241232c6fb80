//! Task completion: callbacks and future-style handles.

use std::time::Instant;

use crossbeam_channel::{self as channel, Receiver, RecvTimeoutError, Sender, TryRecvError};

use super::TaskId;
use crate::error::TaskError;

pub type TaskResult<R> = Result<R, TaskError>;

/// Boxed completion callback.
pub type Callback<R> = Box<dyn FnOnce(TaskResult<R>) + Send>;

/// Where a task's result goes.
pub(crate) enum Completion<R> {
  Callback(Callback<R>),
  Future(Sender<TaskResult<R>>),
}

impl<R> Completion<R> {
  /// Create a future-style completion and the handle that receives it.
  pub(crate) fn future(id: TaskId) -> (Self, TaskHandle<R>) {
    let (sender, receiver) = channel::bounded(1);
    (Self::Future(sender), TaskHandle { id, receiver })
  }

  /// Deliver the result. Consumes the completion, so it runs at most once.
  pub(crate) fn resolve(self, result: TaskResult<R>) {
    match self {
      Self::Callback(callback) => callback(result),
      // Receiver dropped = caller stopped waiting.
      Self::Future(sender) => {
        let _ = sender.send(result);
      }
    }
  }
}

/// Future side of a task submitted with [`WorkerPool::enqueue`].
///
/// [`WorkerPool::enqueue`]: super::WorkerPool::enqueue
#[derive(Debug)]
pub struct TaskHandle<R> {
  id: TaskId,
  receiver: Receiver<TaskResult<R>>,
}

impl<R> TaskHandle<R> {
  pub fn id(&self) -> TaskId {
    self.id
  }

  /// Block until the task resolves.
  pub fn wait(self) -> TaskResult<R> {
    self.receiver.recv().unwrap_or(Err(TaskError::Abandoned))
  }

  /// Block until the task resolves or `deadline` passes (`None`).
  pub fn wait_deadline(&self, deadline: Instant) -> Option<TaskResult<R>> {
    match self.receiver.recv_deadline(deadline) {
      Ok(result) => Some(result),
      Err(RecvTimeoutError::Timeout) => None,
      Err(RecvTimeoutError::Disconnected) => Some(Err(TaskError::Abandoned)),
    }
  }

  /// Non-blocking check; `None` while the task is still queued or running.
  pub fn poll(&self) -> Option<TaskResult<R>> {
    match self.receiver.try_recv() {
      Ok(result) => Some(result),
      Err(TryRecvError::Empty) => None,
      Err(TryRecvError::Disconnected) => Some(Err(TaskError::Abandoned)),
    }
  }
}
