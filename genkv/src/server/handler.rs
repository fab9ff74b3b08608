use super::client_handler::{Client, ClientConfig};
use crate::kv::error::KvError;
use crate::kv::object::{KeyType, Object, ValueType};
use crate::kv::store::VersionedStore;
use crate::protocol::command::{Command, ParseError};
use crate::protocol::reply::Reply;
use bytes::Bytes;
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{self, AsyncRead, AsyncWrite, BufReader, DuplexStream, ReadHalf, WriteHalf};
use tokio_util::sync::CancellationToken;
use tracing::debug;

pub const DEFAULT_RX_TIMEOUT: Duration = Duration::from_secs(60);
pub const DEFAULT_PIPE_CAPACITY: usize = 64 * 1024;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HandlerConfig {
    /// Idle time after which a connection is closed, `None` waits forever
    pub rx_timeout: Option<Duration>,
    /// Buffer size of in-process connections
    pub pipe_capacity: usize,
    pub max_line_length: Option<usize>,
}

impl Default for HandlerConfig {
    fn default() -> Self {
        HandlerConfig {
            rx_timeout: Some(DEFAULT_RX_TIMEOUT),
            pipe_capacity: DEFAULT_PIPE_CAPACITY,
            max_line_length: None,
        }
    }
}

/// Translates protocol lines into store operations.
///
/// Cloning is cheap, every clone shares the store and the cancellation
/// token, so `shutdown` on any clone stops all of their connections.
#[derive(Clone)]
pub struct Handler {
    storage: Arc<VersionedStore>,
    config: HandlerConfig,
    cancellation_token: CancellationToken,
}

impl Handler {
    pub fn new(storage: Arc<VersionedStore>, config: HandlerConfig) -> Handler {
        Handler::with_cancellation_token(storage, config, CancellationToken::new())
    }

    pub fn with_cancellation_token(
        storage: Arc<VersionedStore>,
        config: HandlerConfig,
        cancellation_token: CancellationToken,
    ) -> Handler {
        Handler {
            storage,
            config,
            cancellation_token,
        }
    }

    pub fn handle_command(&self, command: Command) -> Reply {
        match command {
            Command::Ping => Reply::Pong,
            Command::Get { key } => self.get(&key),
            Command::Set { key, value } => self.set(key, value),
        }
    }

    /// Handles one line without its terminator,
    /// returns `None` when nothing should be written back
    pub fn handle_line(&self, line: Bytes) -> Option<Reply> {
        match Command::parse(line) {
            Ok(command) => Some(self.handle_command(command)),
            Err(ParseError::WrongArity { expected }) => Some(Reply::WrongArity(expected)),
            Err(ParseError::Unknown(token)) => {
                debug!("Ignoring unknown command {:?}", token);
                None
            }
            Err(err) => Some(Reply::error(err)),
        }
    }

    fn get(&self, key: &KeyType) -> Reply {
        match self.storage.get(key) {
            Ok(object) => Reply::Bulk(object.value),
            Err(KvError::NotFound) => Reply::Null,
            Err(err) => Reply::error(err),
        }
    }

    fn set(&self, key: KeyType, value: ValueType) -> Reply {
        let mut object = match self.storage.get(&key) {
            Ok(object) => object,
            Err(KvError::NotFound) => Object::default(),
            Err(err) => return Reply::error(err),
        };
        object.value = value;
        match self.storage.set(key, object) {
            Ok(_) => Reply::Ok,
            Err(err) => Reply::error(err),
        }
    }

    /// Opens an in-process connection.
    ///
    /// Returns the write end and the buffered read end of a pipe whose
    /// other side is served by a newly spawned task. Shutting the write
    /// end down signals end of input. Must be called inside a tokio
    /// runtime.
    pub fn new_conn(&self) -> (WriteHalf<DuplexStream>, BufReader<ReadHalf<DuplexStream>>) {
        let (local, remote) = io::duplex(self.config.pipe_capacity);
        let (remote_rx, remote_tx) = io::split(remote);
        let handler = self.clone();
        tokio::spawn(async move {
            handler
                .serve(remote_rx, remote_tx, String::from("in-process"))
                .await
        });

        let (local_rx, local_tx) = io::split(local);
        (local_tx, BufReader::new(local_rx))
    }

    /// Runs the connection loop until the peer stops sending,
    /// the read deadline passes or the handler is shut down.
    pub async fn serve<R, W>(&self, reader: R, writer: W, peer: String)
    where
        R: AsyncRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut client = Client::new(
            self.clone(),
            reader,
            writer,
            peer,
            self.client_config(),
        );
        client.handle().await
    }

    pub fn shutdown(&self) {
        debug!("Handler shutdown requested");
        self.cancellation_token.cancel();
    }

    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancellation_token.clone()
    }

    pub fn storage(&self) -> Arc<VersionedStore> {
        self.storage.clone()
    }

    fn client_config(&self) -> ClientConfig {
        ClientConfig {
            rx_timeout: self.config.rx_timeout,
            max_line_length: self.config.max_line_length,
        }
    }
}
