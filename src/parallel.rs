//! Blocking fan-out helpers used by the set algebra.
//!
//! Every parallel call builds its own worker pool, feeds it from a single
//! shared work source and returns only once the pool has drained. Small
//! batches (per [`ExecutorConfig::min_parallel_items`]) run inline, which is
//! observably identical because callers only submit order-independent work.

use crate::config::ExecutorConfig;
#[cfg(feature = "parallel")]
use tracing::warn;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParallelExecutor {
    cfg: ExecutorConfig,
}

impl ParallelExecutor {
    pub fn new(cfg: ExecutorConfig) -> Self {
        Self { cfg }
    }

    /// Executor that never leaves the calling thread.
    pub fn sequential() -> Self {
        Self::new(ExecutorConfig::sequential())
    }

    /// Apply `body` to every item. Returns after all items have completed.
    pub fn for_each<I, F>(&self, items: I, body: F)
    where
        I: IntoIterator,
        I::IntoIter: Send,
        I::Item: Send,
        F: Fn(I::Item) + Send + Sync,
    {
        let items = items.into_iter();
        #[cfg(feature = "parallel")]
        if let Some(pool) = self.pool_for(items.size_hint().0) {
            use rayon::prelude::*;
            pool.install(|| items.par_bridge().for_each(body));
            return;
        }
        items.for_each(body);
    }

    /// Return some item satisfying `predicate`, or `None`.
    ///
    /// Which match is returned is unspecified when several items qualify.
    /// Once a match is seen no further items are started; items already
    /// running finish normally.
    pub fn find<I, P>(&self, items: I, predicate: P) -> Option<I::Item>
    where
        I: IntoIterator,
        I::IntoIter: Send,
        I::Item: Send,
        P: Fn(&I::Item) -> bool + Send + Sync,
    {
        let mut items = items.into_iter();
        #[cfg(feature = "parallel")]
        if let Some(pool) = self.pool_for(items.size_hint().0) {
            use rayon::prelude::*;
            return pool.install(|| items.par_bridge().find_any(|item| predicate(item)));
        }
        items.find(|item| predicate(item))
    }

    /// Apply `f` to every item and collect the results in unspecified order.
    pub fn map<I, F, R>(&self, items: I, f: F) -> Vec<R>
    where
        I: IntoIterator,
        I::IntoIter: Send,
        I::Item: Send,
        F: Fn(I::Item) -> R + Send + Sync,
        R: Send,
    {
        let items = items.into_iter();
        #[cfg(feature = "parallel")]
        if let Some(pool) = self.pool_for(items.size_hint().0) {
            use rayon::prelude::*;
            return pool.install(|| items.par_bridge().map(f).collect());
        }
        items.map(f).collect()
    }

    #[cfg(feature = "parallel")]
    fn pool_for(&self, items: usize) -> Option<rayon::ThreadPool> {
        if !self.cfg.runs_parallel(items) {
            return None;
        }
        match rayon::ThreadPoolBuilder::new()
            .num_threads(self.cfg.pool_size)
            .thread_name(|i| format!("bitset-worker-{i}"))
            .build()
        {
            Ok(pool) => Some(pool),
            Err(err) => {
                warn!(
                    %err,
                    pool_size = self.cfg.pool_size,
                    "worker pool unavailable, running inline"
                );
                None
            }
        }
    }
}
