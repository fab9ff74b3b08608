use crate::kv::object::{KeyType, ValueType};
use bytes::{BufMut, BytesMut};

pub fn from_string(val: &str) -> ValueType {
    let mut value = BytesMut::with_capacity(val.len());
    value.put_slice(val.as_bytes());
    value.freeze()
}

pub fn key(val: &str) -> KeyType {
    KeyType::copy_from_slice(val.as_bytes())
}
