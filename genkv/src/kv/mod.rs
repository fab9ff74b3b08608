pub mod builder;
pub mod error;
pub mod generation_cache;
pub mod object;
pub mod store;
