use eyre::Result;
use mutperiod_core_rs::parallelism;
use rayon::ThreadPool;
use thread_local::ThreadLocal;

use crate::config::Config;
use crate::engine::Engine;

#[derive(Default)]
pub struct EngineBuilder {
    thread_pool: Option<ThreadPool>,
}

impl EngineBuilder {
    pub fn set_thread_pool(mut self, pool: ThreadPool) -> Self {
        self.thread_pool = Some(pool);
        self
    }

    /// Build a dedicated pool, see [`parallelism::threads`] for the meaning of `threads`.
    pub fn set_threads(self, threads: isize) -> Result<Self> {
        Ok(self.set_thread_pool(parallelism::pool(threads)?))
    }

    pub fn build(self, config: Config) -> Engine {
        Engine::new(config, self.thread_pool, ThreadLocal::new())
    }
}
