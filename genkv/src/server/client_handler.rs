use std::time::Duration;
use tokio::io::{self, AsyncRead, AsyncWrite};
use tokio::time::{error::Elapsed, timeout};
use tokio_util::codec::{FramedRead, FramedWrite};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error};

use futures::{SinkExt, StreamExt};

use super::handler::Handler;
use crate::protocol::line_codec::LineCodec;
use bytes::Bytes;

pub struct ClientConfig {
    pub(crate) rx_timeout: Option<Duration>,
    pub(crate) max_line_length: Option<usize>,
}

type Frame = Result<Option<Result<Bytes, io::Error>>, Elapsed>;

pub struct Client<R, W> {
    reader: FramedRead<R, LineCodec>,
    writer: FramedWrite<W, LineCodec>,
    peer: String,
    config: ClientConfig,
    handler: Handler,
    cancellation_token: CancellationToken,
}

impl<R, W> Client<R, W>
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin,
{
    pub fn new(handler: Handler, reader: R, writer: W, peer: String, config: ClientConfig) -> Self {
        Client {
            reader: FramedRead::new(reader, LineCodec::new(config.max_line_length)),
            writer: FramedWrite::new(writer, LineCodec::default()),
            peer,
            config,
            cancellation_token: handler.cancellation_token(),
            handler,
        }
    }

    pub async fn handle(&mut self) {
        debug!("New client connected: {}", self.peer);

        loop {
            let frame = tokio::select! {
                _ = self.cancellation_token.cancelled() => {
                    debug!("Shutting down, disconnecting client: {}", self.peer);
                    break;
                }
                frame = read_frame(&mut self.reader, self.config.rx_timeout) => frame,
            };

            match self.handle_frame(frame).await {
                Next::Continue => {}
                Next::Close => break,
                Next::Abort => return,
            }
        }
        self.close().await
    }

    async fn handle_frame(&mut self, frame: Frame) -> Next {
        match frame {
            Ok(Some(Ok(line))) => self.handle_line(line).await,
            Ok(Some(Err(err))) => {
                match err.kind() {
                    io::ErrorKind::UnexpectedEof | io::ErrorKind::InvalidData => {
                        debug!("Invalid line from {}: {}", self.peer, err)
                    }
                    _ => error!("Error when reading frame; error = {:?}", err),
                }
                Next::Close
            }
            Ok(None) => {
                debug!("Connection closed: {}", self.peer);
                Next::Close
            }
            Err(_elapsed) => {
                debug!(
                    "Timeout {:?} elapsed, disconnecting client: {}",
                    self.config.rx_timeout, self.peer
                );
                Next::Close
            }
        }
    }

    async fn handle_line(&mut self, line: Bytes) -> Next {
        let reply = match self.handler.handle_line(line) {
            Some(reply) => reply,
            None => return Next::Continue,
        };
        debug!("Sending reply {:?}", reply);
        if let Err(err) = self.writer.send(reply).await {
            error!("error on sending reply; error = {:?}", err);
            return Next::Abort;
        }
        Next::Continue
    }

    async fn close(&mut self) {
        if let Err(err) = self.writer.close().await {
            log_error(err)
        }
    }
}

enum Next {
    Continue,
    Close,
    // the output is broken, closing it would fail again
    Abort,
}

async fn read_frame<R: AsyncRead + Unpin>(
    reader: &mut FramedRead<R, LineCodec>,
    rx_timeout: Option<Duration>,
) -> Frame {
    match rx_timeout {
        Some(rx_timeout) => timeout(rx_timeout, reader.next()).await,
        None => Ok(reader.next().await),
    }
}

fn log_error(e: io::Error) {
    // the peer may already be gone
    if e.kind() == io::ErrorKind::NotConnected || e.kind() == io::ErrorKind::BrokenPipe {
        debug!("Error: {}", e);
    } else {
        error!("Error: {}", e);
    }
}
