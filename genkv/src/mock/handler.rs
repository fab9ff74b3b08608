use super::faulty_engine::FaultyEngine;
use super::mock_server::{create_global_lock_server, create_striped_server, MockServer};
use crate::server::handler::{Handler, HandlerConfig};
use std::sync::Arc;
use tokio::io::{AsyncReadExt, AsyncWriteExt};

pub struct HandlerWithEngine {
    pub handler: Handler,
    pub engine: Arc<FaultyEngine>,
}

impl HandlerWithEngine {
    pub fn new(server: MockServer, config: HandlerConfig) -> HandlerWithEngine {
        HandlerWithEngine {
            handler: Handler::new(server.storage, config),
            engine: server.engine,
        }
    }

    /// Sends `input` over a fresh in-process connection, closes the
    /// input and returns everything written back.
    pub async fn session(&self, input: &[u8]) -> Vec<u8> {
        let (mut writer, mut reader) = self.handler.new_conn();
        let write = async {
            writer.write_all(input).await.unwrap();
            writer.shutdown().await.unwrap();
        };
        let read = async {
            let mut output = Vec::new();
            reader.read_to_end(&mut output).await.unwrap();
            output
        };
        let ((), output) = tokio::join!(write, read);
        output
    }
}

pub fn create_global_lock_handler() -> HandlerWithEngine {
    HandlerWithEngine::new(create_global_lock_server(), HandlerConfig::default())
}

pub fn create_striped_handler() -> HandlerWithEngine {
    HandlerWithEngine::new(create_striped_server(), HandlerConfig::default())
}

pub fn create_handler_with_config(config: HandlerConfig) -> HandlerWithEngine {
    HandlerWithEngine::new(create_striped_server(), config)
}
