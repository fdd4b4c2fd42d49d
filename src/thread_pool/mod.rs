//! Worker pool for the per-tick vertex fan-out

pub mod thread_pool_data;
pub mod thread_pool_operations;

pub use thread_pool_data::{BlendThreadPoolConfig, BlendThreadPoolData};
pub use thread_pool_operations::{create_thread_pool_data, run_on_pool, worker_count};
