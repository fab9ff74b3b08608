use crate::storage::engine::{Engine, KeyType, Transaction, ValueType};
use crate::storage::error::{EngineError, Result};
use crate::storage::memory::MemoryEngine;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

/// Memory engine that counts reads and fails on demand
pub struct FaultyEngine {
    inner: MemoryEngine,
    fail_commits: AtomicBool,
    fail_reads: AtomicBool,
    reads: AtomicUsize,
}

impl FaultyEngine {
    pub fn new() -> Self {
        FaultyEngine {
            inner: MemoryEngine::new(),
            fail_commits: AtomicBool::new(false),
            fail_reads: AtomicBool::new(false),
            reads: AtomicUsize::new(0),
        }
    }

    pub fn fail_commits(&self, fail: bool) {
        self.fail_commits.store(fail, Ordering::SeqCst);
    }

    pub fn fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    /// Number of transactional reads made so far
    pub fn reads(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }

    /// Stores a raw record bypassing any store logic
    pub fn put_raw(&self, key: KeyType, value: ValueType) {
        let mut txn = self.inner.begin(true).unwrap();
        txn.set(key, value).unwrap();
        txn.commit().unwrap();
    }

    pub fn get_raw(&self, key: &[u8]) -> Result<ValueType> {
        self.inner.begin(false)?.get(key)
    }
}

impl Default for FaultyEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine for FaultyEngine {
    fn begin(&self, writable: bool) -> Result<Box<dyn Transaction + '_>> {
        let inner = self.inner.begin(writable)?;
        Ok(Box::new(FaultyTransaction {
            engine: self,
            inner,
        }))
    }

    fn close(&self) -> Result<()> {
        self.inner.close()
    }
}

struct FaultyTransaction<'a> {
    engine: &'a FaultyEngine,
    inner: Box<dyn Transaction + 'a>,
}

impl Transaction for FaultyTransaction<'_> {
    fn get(&self, key: &[u8]) -> Result<ValueType> {
        self.engine.reads.fetch_add(1, Ordering::SeqCst);
        if self.engine.fail_reads.load(Ordering::SeqCst) {
            return Err(EngineError::Failure(String::from("injected read failure")));
        }
        self.inner.get(key)
    }

    fn set(&mut self, key: KeyType, value: ValueType) -> Result<()> {
        self.inner.set(key, value)
    }

    fn commit(self: Box<Self>) -> Result<()> {
        let FaultyTransaction { engine, inner } = *self;
        if engine.fail_commits.load(Ordering::SeqCst) {
            return Err(EngineError::Failure(String::from("injected commit failure")));
        }
        inner.commit()
    }
}
