use eyre::Result;
use rayon::ThreadPool;

use motiflab_core_rs::parallelism;

use crate::binner::Binner;
use crate::config::Config;
use crate::visibility::{AllVisible, Visibility};

pub struct BinnerBuilder {
    config: Config,
    visibility: Option<Box<dyn Visibility>>,
    thread_pool: Option<ThreadPool>,
}

impl BinnerBuilder {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            visibility: None,
            thread_pool: None,
        }
    }

    pub fn set_config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    pub fn set_visibility(mut self, visibility: impl Visibility + 'static) -> Self {
        self.visibility = Some(Box::new(visibility));
        self
    }

    pub fn set_thread_pool(mut self, pool: ThreadPool) -> Self {
        self.thread_pool = Some(pool);
        self
    }

    /// Run on a dedicated pool with the given number of threads (see [`parallelism::available`]).
    pub fn set_threads(self, threads: isize) -> Result<Self> {
        Ok(self.set_thread_pool(parallelism::pool(threads)?))
    }

    pub fn build(self) -> Binner {
        let visibility = self.visibility.unwrap_or_else(|| Box::new(AllVisible));
        Binner::new(self.config, visibility, self.thread_pool)
    }
}
