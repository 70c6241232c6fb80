//! Fan a batch of per-chunk requests out to a pool and join on the results.

use std::time::{Duration, Instant};

use crossbeam_channel::{self as channel, RecvTimeoutError};

use super::{Worker, WorkerPool};
use crate::error::{Result, VoxelizeError};
use crate::voxel::ChunkCoord;

/// Submit every `(coord, request)` pair and hand each response to
/// `on_response` on the calling thread, in completion order.
///
/// Returns the number of tasks joined. The first failed task aborts the join
/// with [`VoxelizeError::Task`]; an elapsed `timeout` with
/// [`VoxelizeError::Timeout`]. Tasks still in flight are left to the pool,
/// whose destruction resolves them.
pub(crate) fn run_chunk_batch<W, I, F>(
  pool: &WorkerPool<W>,
  requests: I,
  timeout: Option<Duration>,
  mut on_response: F,
) -> Result<usize>
where
  W: Worker,
  I: IntoIterator<Item = (ChunkCoord, W::Request)>,
  F: FnMut(ChunkCoord, W::Response),
{
  let (sender, receiver) = channel::unbounded();
  let mut total = 0;
  for (coord, request) in requests {
    let sender = sender.clone();
    pool.enqueue_with_callback(request, move |result| {
      // Receiver gone = join already failed.
      let _ = sender.send((coord, result));
    })?;
    total += 1;
  }
  drop(sender);

  let deadline = timeout.map(|timeout| Instant::now() + timeout);
  for received in 0..total {
    let next = match deadline {
      Some(deadline) => receiver.recv_deadline(deadline),
      None => receiver.recv().map_err(|_| RecvTimeoutError::Disconnected),
    };
    let (coord, result) = match next {
      Ok(message) => message,
      Err(RecvTimeoutError::Timeout) => {
        return Err(VoxelizeError::Timeout {
          pending: total - received,
          total,
        })
      }
      Err(RecvTimeoutError::Disconnected) => return Err(VoxelizeError::PoolTerminated),
    };

    let response = result.map_err(|source| VoxelizeError::Task { coord, source })?;
    on_response(coord, response);
  }

  Ok(total)
}
