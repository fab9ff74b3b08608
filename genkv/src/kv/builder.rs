use super::generation_cache::{GenerationCache, DEFAULT_CACHE_SIZE, MAX_CACHE_SIZE};
use super::store::VersionedStore;
use crate::storage::engine::Engine;
use crate::storage::parallelism::{available_parallelism, get_number_of_shards};
use std::sync::Arc;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StoreConfig {
    pub cache_size: usize,
    /// 0 picks a stripe count from available parallelism
    pub lock_stripes: usize,
}

impl StoreConfig {
    pub fn new(cache_size: usize, lock_stripes: usize) -> StoreConfig {
        StoreConfig {
            cache_size,
            lock_stripes,
        }
    }

    fn effective_stripes(&self) -> usize {
        match self.lock_stripes {
            0 => get_number_of_shards(available_parallelism()),
            stripes => stripes,
        }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        StoreConfig::new(DEFAULT_CACHE_SIZE, 0)
    }
}

pub struct VersionedStoreBuilder {}

impl VersionedStoreBuilder {
    pub fn from_config(
        config: StoreConfig,
        engine: Arc<dyn Engine + Send + Sync>,
    ) -> Result<Arc<VersionedStore>, String> {
        if !(1..=MAX_CACHE_SIZE).contains(&config.cache_size) {
            return Err(format!(
                "cache size must be between 1 and {}, got {}",
                MAX_CACHE_SIZE, config.cache_size
            ));
        }
        let cache = GenerationCache::new(config.cache_size, config.effective_stripes());
        info!(
            "Generation cache: {} buckets, {} lock stripes",
            cache.capacity(),
            cache.stripes()
        );
        Ok(Arc::new(VersionedStore::new(engine, cache)))
    }
}
