#[macro_use]
extern crate log;

pub mod cli;
pub mod kv;
pub mod protocol;
pub mod server;
pub mod storage;
pub mod version;

#[cfg(test)]
mod mock;
