use super::error::{KvError, Result};
use bytes::Bytes;
use serde_derive::{Deserialize, Serialize};

/// Store key type
pub type KeyType = crate::storage::engine::KeyType;

/// User value kept inside an object
pub type ValueType = Bytes;

/// Value together with its generation.
///
/// `gen` is owned by the store: every accepted write stores the
/// input generation plus one.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Object {
    pub value: ValueType,
    pub gen: u64,
}

impl Object {
    pub fn new(value: ValueType, gen: u64) -> Object {
        Object { value, gen }
    }

    pub(crate) fn encode(&self) -> Bytes {
        let encoded = bincode::serialize(self).expect("Object is always serializable");
        Bytes::from(encoded)
    }

    pub(crate) fn decode(raw: &[u8]) -> Result<Object> {
        bincode::deserialize(raw).map_err(|err| KvError::Corrupted(err.to_string()))
    }
}

/// Result of set operation on store,
/// gen is the generation now stored for the key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SetStatus {
    pub gen: u64,
}
