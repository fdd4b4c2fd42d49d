//! Thread Pool Data - Pure DOP
//!
//! NO METHODS. Just data.
//! All transformations happen in thread_pool_operations.rs

/// Worker pool used to fan a tick out across vertex chunks
pub struct BlendThreadPoolData {
    /// Dedicated pool, or None to run on rayon's global pool
    pub pool: Option<rayon::ThreadPool>,

    /// Threads available to a dispatch
    pub worker_count: usize,
}

/// Worker pool configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlendThreadPoolConfig {
    /// Dedicated worker threads (0 = rayon global pool)
    pub worker_threads: usize,
}

impl Default for BlendThreadPoolConfig {
    fn default() -> Self {
        Self { worker_threads: 0 }
    }
}

impl std::fmt::Debug for BlendThreadPoolData {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BlendThreadPoolData")
            .field("dedicated", &self.pool.is_some())
            .field("worker_count", &self.worker_count)
            .finish()
    }
}
