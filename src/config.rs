/// Worker pool configuration for [`ParallelExecutor`](crate::ParallelExecutor).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExecutorConfig {
    /// Number of worker threads built for each parallel call.
    pub pool_size: usize,
    /// Batches with fewer items than this run inline on the calling thread.
    pub min_parallel_items: usize,
}

impl Default for ExecutorConfig {
    fn default() -> Self {
        Self {
            pool_size: 4,
            min_parallel_items: 1024,
        }
    }
}

impl ExecutorConfig {
    /// Always run inline, regardless of batch size.
    pub fn sequential() -> Self {
        Self {
            pool_size: 1,
            ..Default::default()
        }
    }

    /// Size the pool from the parallelism the host reports.
    pub fn for_host() -> Self {
        let cores = std::thread::available_parallelism().map_or(4, |n| n.get());
        // Leave one core to the caller, which blocks on the pool anyway.
        let pool_size = match cores {
            1..=2 => cores,
            _ => cores - 1,
        };
        Self {
            pool_size,
            ..Default::default()
        }
    }

    pub fn with_pool_size(mut self, pool_size: usize) -> Self {
        self.pool_size = pool_size;
        self
    }

    pub fn with_min_parallel_items(mut self, min_parallel_items: usize) -> Self {
        self.min_parallel_items = min_parallel_items;
        self
    }

    /// Whether a batch of `items` would be dispatched to a worker pool.
    pub fn runs_parallel(&self, items: usize) -> bool {
        cfg!(feature = "parallel") && self.pool_size > 1 && items >= self.min_parallel_items
    }
}
