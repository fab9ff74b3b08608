pub mod client_handler;
pub mod handler;
pub mod main;
pub mod runtime_builder;
pub mod tcp;
