//! Thread Pool Operations - Pure DOP Functions
//!
//! No methods, no self, just transformations.

use super::thread_pool_data::{BlendThreadPoolConfig, BlendThreadPoolData};
use crate::constants::WORKER_THREAD_PREFIX;
use crate::error::BlendShapeResult;

/// Create the worker pool described by `config`
pub fn create_thread_pool_data(config: BlendThreadPoolConfig) -> BlendShapeResult<BlendThreadPoolData> {
    if config.worker_threads == 0 {
        let worker_count = rayon::current_num_threads();
        log::debug!(
            "[create_thread_pool_data] Using rayon global pool ({} threads)",
            worker_count
        );
        return Ok(BlendThreadPoolData {
            pool: None,
            worker_count,
        });
    }

    let available = num_cpus::get();
    let worker_count = if config.worker_threads > available {
        log::warn!(
            "[create_thread_pool_data] Requested {} workers but only {} CPUs available, clamping",
            config.worker_threads,
            available
        );
        available
    } else {
        config.worker_threads
    };

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(worker_count)
        .thread_name(|index| format!("{}-{}", WORKER_THREAD_PREFIX, index))
        .build()?;

    log::info!(
        "[create_thread_pool_data] Dedicated worker pool created ({} threads)",
        worker_count
    );

    Ok(BlendThreadPoolData {
        pool: Some(pool),
        worker_count,
    })
}

/// Run `op` inside the pool so nested rayon iterators use its workers.
/// Blocks until `op` and all work it spawned has finished.
pub fn run_on_pool<R, F>(data: &BlendThreadPoolData, op: F) -> R
where
    R: Send,
    F: FnOnce() -> R + Send,
{
    match &data.pool {
        Some(pool) => pool.install(op),
        None => op(),
    }
}

/// Threads available to a dispatch
pub fn worker_count(data: &BlendThreadPoolData) -> usize {
    data.worker_count
}
