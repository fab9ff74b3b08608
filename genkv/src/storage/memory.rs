use super::engine::{Engine, KeyType, Transaction, ValueType};
use super::error::{EngineError, Result};
use super::parallelism::{available_parallelism, get_number_of_shards};

use dashmap::DashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, PoisonError};

type Storage = DashMap<KeyType, ValueType>;

/// In-memory transactional engine.
///
/// Reads see committed data, writes are buffered per transaction and
/// applied under a commit lock so concurrent commits never interleave.
pub struct MemoryEngine {
    memory: Storage,
    commit_lock: Mutex<()>,
    closed: AtomicBool,
}

impl MemoryEngine {
    pub fn new() -> MemoryEngine {
        let shards = get_number_of_shards(available_parallelism());
        info!("Memory engine number of shards: {}", shards);
        MemoryEngine {
            memory: DashMap::with_shard_amount(shards),
            commit_lock: Mutex::new(()),
            closed: AtomicBool::new(false),
        }
    }

    pub fn len(&self) -> usize {
        self.memory.len()
    }

    pub fn is_empty(&self) -> bool {
        self.memory.is_empty()
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::Acquire)
    }

    fn check_open(&self) -> Result<()> {
        if self.is_closed() {
            return Err(EngineError::Closed);
        }
        Ok(())
    }
}

impl Default for MemoryEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine for MemoryEngine {
    fn begin(&self, writable: bool) -> Result<Box<dyn Transaction + '_>> {
        self.check_open()?;
        Ok(Box::new(MemoryTransaction {
            engine: self,
            writable,
            pending: Vec::new(),
        }))
    }

    fn close(&self) -> Result<()> {
        if self.closed.swap(true, Ordering::AcqRel) {
            return Ok(());
        }
        let _guard = self
            .commit_lock
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        debug!("Closing memory engine, dropping {} records", self.memory.len());
        self.memory.clear();
        Ok(())
    }
}

struct MemoryTransaction<'a> {
    engine: &'a MemoryEngine,
    writable: bool,
    pending: Vec<(KeyType, ValueType)>,
}

impl Transaction for MemoryTransaction<'_> {
    fn get(&self, key: &[u8]) -> Result<ValueType> {
        self.engine.check_open()?;
        if let Some((_, value)) = self.pending.iter().rev().find(|(k, _)| k[..] == *key) {
            return Ok(value.clone());
        }
        self.engine
            .memory
            .get(key)
            .map(|entry| entry.value().clone())
            .ok_or(EngineError::NotFound)
    }

    fn set(&mut self, key: KeyType, value: ValueType) -> Result<()> {
        if !self.writable {
            return Err(EngineError::ReadOnly);
        }
        self.pending.push((key, value));
        Ok(())
    }

    fn commit(self: Box<Self>) -> Result<()> {
        let MemoryTransaction {
            engine, pending, ..
        } = *self;
        if pending.is_empty() {
            return Ok(());
        }

        let _guard = engine
            .commit_lock
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        // checked under the lock, close() clears the map while holding it
        engine.check_open()?;
        for (key, value) in pending {
            engine.memory.insert(key, value);
        }
        Ok(())
    }
}
