use super::error::Result;
use bytes::Bytes;

/// Engine key type
pub type KeyType = Bytes;

/// Raw, encoded value stored under a key
pub type ValueType = Bytes;

/// A unit of work against the durable engine.
///
/// Writes are buffered until [`Transaction::commit`]. Dropping a
/// transaction without committing discards everything it buffered.
pub trait Transaction {
    /// Returns the value stored under `key`, seeing this transaction's
    /// own pending writes first. Fails with `EngineError::NotFound`
    /// when there is no value.
    fn get(&self, key: &[u8]) -> Result<ValueType>;

    /// Buffers a write. Read-only transactions fail with `ReadOnly`.
    fn set(&mut self, key: KeyType, value: ValueType) -> Result<()>;

    /// Applies all buffered writes as a unit.
    fn commit(self: Box<Self>) -> Result<()>;
}

// An abstraction over a transactional, crash consistent byte store
pub trait Engine {
    /// Opens a new transaction, fails with `Closed` once the engine
    /// has been closed.
    fn begin(&self, writable: bool) -> Result<Box<dyn Transaction + '_>>;

    /// Releases the engine, every later `begin` fails.
    fn close(&self) -> Result<()>;
}
