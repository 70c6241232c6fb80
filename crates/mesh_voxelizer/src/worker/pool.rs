//! WorkerPool - FIFO queue dispatched to lazily spawned worker threads.

use std::any::Any;
use std::collections::VecDeque;
use std::panic::{self, AssertUnwindSafe};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use std::thread::{self, JoinHandle};

use crossbeam_channel::{self as channel, Receiver, SendError, Sender};

use super::handle::{Completion, TaskResult};
use super::{PoolConfig, TaskHandle, TaskId, Worker, WorkerState};
use crate::error::{Result, TaskError, VoxelizeError};

/// Messages from the pool to one worker thread.
enum WorkerMessage<W: Worker> {
  Init(W::Init),
  Run { task_id: TaskId, request: W::Request },
  Terminate,
}

struct QueuedTask<W: Worker> {
  id: TaskId,
  name: &'static str,
  request: W::Request,
  completion: Completion<W::Response>,
}

struct WorkerEntry<W: Worker> {
  sender: Sender<WorkerMessage<W>>,
  state: WorkerState,
  current_task: Option<(TaskId, Completion<W::Response>)>,
  // Detached on destroy; worker threads exit on Terminate.
  thread: Option<JoinHandle<()>>,
}

struct PoolState<W: Worker> {
  queue: VecDeque<QueuedTask<W>>,
  workers: Vec<WorkerEntry<W>>,
  next_task_id: u64,
  terminated: bool,
}

struct PoolShared<W: Worker> {
  config: PoolConfig,
  init: W::Init,
  state: Mutex<PoolState<W>>,
}

impl<W: Worker> PoolShared<W> {
  fn lock(&self) -> MutexGuard<'_, PoolState<W>> {
    self.state.lock().unwrap_or_else(PoisonError::into_inner)
  }
}

/// Bounded pool of worker threads running `W`.
///
/// Workers are created on demand, up to `config.concurrency`. Tasks wait in a
/// FIFO queue until a worker is idle. Dropping the pool destroys it.
pub struct WorkerPool<W: Worker> {
  shared: Arc<PoolShared<W>>,
}

impl<W: Worker> WorkerPool<W> {
  /// Create a pool. No thread is spawned until the first task arrives.
  pub fn new(config: PoolConfig, init: W::Init) -> Self {
    Self {
      shared: Arc::new(PoolShared {
        config,
        init,
        state: Mutex::new(PoolState {
          queue: VecDeque::new(),
          workers: Vec::new(),
          next_task_id: 0,
          terminated: false,
        }),
      }),
    }
  }

  pub fn config(&self) -> &PoolConfig {
    &self.shared.config
  }

  /// Submit a task; `callback` receives its result exactly once.
  pub fn enqueue_with_callback<F>(&self, request: W::Request, callback: F) -> Result<TaskId>
  where
    F: FnOnce(TaskResult<W::Response>) + Send + 'static,
  {
    self.submit(request, |_| (Completion::Callback(Box::new(callback)), ()))
      .map(|(id, ())| id)
  }

  /// Submit a task and get a handle to wait on.
  pub fn enqueue(&self, request: W::Request) -> Result<TaskHandle<W::Response>> {
    self.submit(request, Completion::future).map(|(_, handle)| handle)
  }

  fn submit<T>(
    &self,
    request: W::Request,
    completion: impl FnOnce(TaskId) -> (Completion<W::Response>, T),
  ) -> Result<(TaskId, T)> {
    let mut state = self.shared.lock();
    if state.terminated {
      return Err(VoxelizeError::PoolTerminated);
    }

    let id = TaskId(state.next_task_id);
    state.next_task_id += 1;
    let (completion, out) = completion(id);
    let name = W::task_name(&request);
    tracing::trace!(task = name, id = id.0, "enqueue");
    state.queue.push_back(QueuedTask {
      id,
      name,
      request,
      completion,
    });

    if let Err(err) = dispatch(&self.shared, &mut state) {
      // Without any live worker the task could never run.
      if live_workers(&state) == 0 {
        state.queue.pop_back();
        return Err(err);
      }
      tracing::warn!("worker spawn failed, task stays queued: {err}");
    }

    Ok((id, out))
  }

  /// Terminate all workers and resolve every outstanding task with
  /// [`TaskError::Abandoned`]. Later submissions fail with `PoolTerminated`.
  pub fn destroy(&self) {
    let abandoned: Vec<_> = {
      let mut state = self.shared.lock();
      if state.terminated {
        return;
      }
      state.terminated = true;

      let mut abandoned = Vec::new();
      for entry in &mut state.workers {
        // A closed channel means the thread already exited.
        let _ = entry.sender.send(WorkerMessage::Terminate);
        entry.state = WorkerState::Terminated;
        entry.thread.take();
        if let Some((_, completion)) = entry.current_task.take() {
          abandoned.push(completion);
        }
      }
      abandoned.extend(state.queue.drain(..).map(|task| task.completion));
      abandoned
    };

    tracing::debug!(abandoned = abandoned.len(), "worker pool destroyed");
    for completion in abandoned {
      completion.resolve(Err(TaskError::Abandoned));
    }
  }

  pub fn is_terminated(&self) -> bool {
    self.shared.lock().terminated
  }

  /// Number of worker threads created so far.
  pub fn worker_count(&self) -> usize {
    self.shared.lock().workers.len()
  }

  pub fn busy_count(&self) -> usize {
    self
      .shared
      .lock()
      .workers
      .iter()
      .filter(|w| w.state == WorkerState::Busy)
      .count()
  }

  /// Tasks waiting for a worker.
  pub fn queued_count(&self) -> usize {
    self.shared.lock().queue.len()
  }

  pub fn worker_states(&self) -> Vec<WorkerState> {
    self.shared.lock().workers.iter().map(|w| w.state).collect()
  }
}

impl<W: Worker> Drop for WorkerPool<W> {
  fn drop(&mut self) {
    self.destroy();
  }
}

fn live_workers<W: Worker>(state: &PoolState<W>) -> usize {
  state
    .workers
    .iter()
    .filter(|w| w.state != WorkerState::Terminated)
    .count()
}

/// Hand queued tasks to idle workers, spawning new ones below the cap.
///
/// Runs with the state lock held; only non-blocking sends happen here.
fn dispatch<W: Worker>(shared: &Arc<PoolShared<W>>, state: &mut PoolState<W>) -> Result<()> {
  while !state.queue.is_empty() {
    let index = match state
      .workers
      .iter()
      .position(|w| w.state == WorkerState::Idle)
    {
      Some(index) => index,
      None if live_workers(state) < shared.config.concurrency => spawn_worker(shared, state)?,
      None => break,
    };

    let Some(task) = state.queue.pop_front() else {
      break;
    };
    let entry = &mut state.workers[index];
    let message = WorkerMessage::Run {
      task_id: task.id,
      request: task.request,
    };
    match entry.sender.send(message) {
      Ok(()) => {
        tracing::trace!(task = task.name, id = task.id.0, worker = index, "dispatch");
        entry.state = WorkerState::Busy;
        entry.current_task = Some((task.id, task.completion));
      }
      Err(SendError(message)) => {
        // The thread died outside a task; retire it and retry elsewhere.
        tracing::warn!(worker = index, "worker thread exited unexpectedly");
        entry.state = WorkerState::Terminated;
        if let WorkerMessage::Run { task_id, request } = message {
          state.queue.push_front(QueuedTask {
            id: task_id,
            name: task.name,
            request,
            completion: task.completion,
          });
        }
      }
    }
  }
  Ok(())
}

fn spawn_worker<W: Worker>(shared: &Arc<PoolShared<W>>, state: &mut PoolState<W>) -> Result<usize> {
  let index = state.workers.len();
  let (sender, receiver) = channel::unbounded();
  let weak = Arc::downgrade(shared);

  let thread = thread::Builder::new()
    .name(format!("{}-{}", shared.config.thread_name, index))
    .spawn(move || run_worker::<W>(index, receiver, weak))
    .map_err(VoxelizeError::ResourceUnavailable)?;

  // Init is always the first message a worker sees.
  let _ = sender.send(WorkerMessage::Init(shared.init.clone()));
  state.workers.push(WorkerEntry {
    sender,
    state: WorkerState::Idle,
    current_task: None,
    thread: Some(thread),
  });
  tracing::debug!(worker = index, "spawned worker thread");
  Ok(index)
}

fn run_worker<W: Worker>(
  index: usize,
  receiver: Receiver<WorkerMessage<W>>,
  pool: Weak<PoolShared<W>>,
) {
  let mut context: std::result::Result<W, TaskError> =
    Err(TaskError::Init("no init message received".to_string()));

  while let Ok(message) = receiver.recv() {
    match message {
      WorkerMessage::Init(init) => {
        context = match panic::catch_unwind(AssertUnwindSafe(|| W::init(init))) {
          Ok(Ok(worker)) => Ok(worker),
          Ok(Err(TaskError::Init(msg))) => Err(TaskError::Init(msg)),
          Ok(Err(err)) => Err(TaskError::Init(err.to_string())),
          Err(payload) => Err(TaskError::Init(panic_message(payload.as_ref()))),
        };
        if let Err(err) = &context {
          tracing::warn!(worker = index, "{err}");
        }
      }
      WorkerMessage::Run { task_id, request } => {
        let name = W::task_name(&request);
        let result = match &mut context {
          Ok(worker) => panic::catch_unwind(AssertUnwindSafe(|| worker.handle(request)))
            .unwrap_or_else(|payload| Err(TaskError::Panicked(panic_message(payload.as_ref())))),
          Err(err) => Err(err.clone()),
        };
        if let Err(err) = &result {
          tracing::warn!(worker = index, task = name, "{err}");
        }

        let Some(shared) = pool.upgrade() else {
          break;
        };
        complete(&shared, index, task_id, result);
      }
      WorkerMessage::Terminate => break,
    }
  }
}

/// Record a finished task, feed the worker the next one, then resolve.
fn complete<W: Worker>(
  shared: &Arc<PoolShared<W>>,
  index: usize,
  task_id: TaskId,
  result: TaskResult<W::Response>,
) {
  let completion = {
    let mut state = shared.lock();
    let entry = &mut state.workers[index];
    let completion = match entry.current_task.take() {
      Some((id, completion)) if id == task_id => Some(completion),
      other => {
        entry.current_task = other;
        None
      }
    };
    if entry.state == WorkerState::Busy {
      entry.state = WorkerState::Idle;
    }
    if !state.terminated {
      if let Err(err) = dispatch(shared, &mut state) {
        tracing::warn!("worker spawn failed during dispatch: {err}");
      }
    }
    completion
  };

  // Outside the lock: callbacks may take their time. The next task may
  // already be queued on this thread, so a panicking callback must not
  // unwind out of the worker loop.
  if let Some(completion) = completion {
    if let Err(payload) = panic::catch_unwind(AssertUnwindSafe(|| completion.resolve(result))) {
      tracing::warn!(
        worker = index,
        task = task_id.0,
        "completion callback panicked: {}",
        panic_message(payload.as_ref())
      );
    }
  }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
  if let Some(msg) = payload.downcast_ref::<&str>() {
    (*msg).to_string()
  } else if let Some(msg) = payload.downcast_ref::<String>() {
    msg.clone()
  } else {
    "unknown panic payload".to_string()
  }
}

#[cfg(test)]
#[path = "pool_test.rs"]
mod pool_test;
