use super::faulty_engine::FaultyEngine;
use crate::kv::generation_cache::{GenerationCache, DEFAULT_CACHE_SIZE};
use crate::kv::store::VersionedStore;
use std::sync::Arc;

pub struct MockServer {
    pub engine: Arc<FaultyEngine>,
    pub storage: Arc<VersionedStore>,
}

impl MockServer {
    pub fn new(cache_size: usize, lock_stripes: usize) -> Self {
        let engine = Arc::new(FaultyEngine::new());
        let cache = GenerationCache::new(cache_size, lock_stripes);
        MockServer {
            storage: Arc::new(VersionedStore::new(engine.clone(), cache)),
            engine,
        }
    }
}

/// Every write serialized by a single lock
pub fn create_global_lock_server() -> MockServer {
    MockServer::new(DEFAULT_CACHE_SIZE, 1)
}

pub fn create_striped_server() -> MockServer {
    MockServer::new(DEFAULT_CACHE_SIZE, 16)
}

/// Single cache bucket, every key collides with every other key
pub fn create_colliding_server() -> MockServer {
    MockServer::new(1, 1)
}
