use super::error::{KvError, Result};
use super::generation_cache::GenerationCache;
use super::object::{KeyType, Object, SetStatus};
use crate::storage::engine::Engine;
use crate::storage::error::EngineError;

use std::sync::Arc;

/**
 * Generation-versioned key value store on top of a durable engine.
 *
 * Every accepted write advances the key's generation by one. A small
 * direct-mapped cache of the last seen generation per key lets most
 * writes be checked without reading the engine.
 */
pub struct VersionedStore {
    engine: Arc<dyn Engine + Send + Sync>,
    cache: GenerationCache,
}

impl VersionedStore {
    pub fn new(engine: Arc<dyn Engine + Send + Sync>, cache: GenerationCache) -> VersionedStore {
        VersionedStore { engine, cache }
    }

    /// Returns the object stored under `key`.
    ///
    /// The read itself runs without holding any cache lock; the cache
    /// refresh afterwards is dropped if a write committed in the same
    /// stripe in the meantime, so it can never roll a generation back.
    pub fn get(&self, key: &KeyType) -> Result<Object> {
        let bucket = self.cache.bucket_of(key);
        let epoch = self.cache.lock(bucket).epoch();

        let object = {
            let txn = self.engine.begin(false)?;
            let raw = txn.get(key)?;
            Object::decode(&raw)?
        };

        let mut slot = self.cache.lock(bucket);
        if slot.epoch() == epoch {
            slot.refresh(key.clone(), object.gen);
        } else {
            trace!("Bucket {} changed during get, skipping refresh", bucket);
        }
        Ok(object)
    }

    /// Stores `object.value` under `key` as generation `object.gen + 1`.
    ///
    /// Fails with `OldGeneration` when a newer generation than
    /// `object.gen` is already committed. The stripe lock is held from
    /// the generation check until the cache reflects the commit.
    pub fn set(&self, key: KeyType, object: Object) -> Result<SetStatus> {
        let mut txn = self.engine.begin(true)?;

        let bucket = self.cache.bucket_of(&key);
        let mut slot = self.cache.lock(bucket);

        match slot.generation_of(&key) {
            Some(cached_gen) => {
                if cached_gen > object.gen {
                    debug!(
                        "Rejecting set, cached generation {} > {}",
                        cached_gen, object.gen
                    );
                    return Err(KvError::OldGeneration);
                }
            }
            None => match txn.get(&key) {
                Ok(raw) => {
                    let current = Object::decode(&raw)?;
                    if current.gen > object.gen {
                        debug!(
                            "Rejecting set, stored generation {} > {}",
                            current.gen, object.gen
                        );
                        return Err(KvError::OldGeneration);
                    }
                }
                Err(EngineError::NotFound) => {}
                Err(err) => return Err(err.into()),
            },
        }

        let gen = object
            .gen
            .checked_add(1)
            .ok_or(KvError::GenerationOverflow)?;
        let record = Object::new(object.value, gen);
        txn.set(key.clone(), record.encode())?;
        txn.commit()?;

        slot.record_commit(key, gen);
        Ok(SetStatus { gen })
    }

    pub fn close(&self) -> Result<()> {
        info!("Closing versioned store");
        self.engine.close().map_err(KvError::from)
    }

    pub fn cache_capacity(&self) -> usize {
        self.cache.capacity()
    }

    pub fn lock_stripes(&self) -> usize {
        self.cache.stripes()
    }

    pub fn bucket_of(&self, key: &[u8]) -> u16 {
        self.cache.bucket_of(key)
    }

    #[cfg(test)]
    pub(crate) fn cache(&self) -> &GenerationCache {
        &self.cache
    }
}
