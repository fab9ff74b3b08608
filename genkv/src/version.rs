pub const GENKV_VERSION: &str = env!("CARGO_PKG_VERSION");
