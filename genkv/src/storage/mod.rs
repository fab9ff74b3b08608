pub mod engine;
pub mod error;
pub mod memory;
pub mod parallelism;
