use socket2::{Domain, SockAddr, Socket, Type};
use std::net::SocketAddr;
use std::sync::Arc;

use tokio::io;
use tokio::net::TcpListener;
use tokio::sync::Semaphore;
use tokio_util::sync::CancellationToken;

use tracing::{debug, error, info};

use super::handler::Handler;

#[derive(Clone, Copy, Debug)]
pub struct GenkvServerConfig {
    connection_limit: u32,
    listen_backlog: u32,
}

impl GenkvServerConfig {
    pub fn new(connection_limit: u32, listen_backlog: u32) -> Self {
        GenkvServerConfig {
            connection_limit,
            listen_backlog,
        }
    }
}

/// Accepts TCP clients and serves each of them on its own task.
///
/// Stops accepting once the handler's cancellation token fires, the
/// same token closes every connection already being served.
pub struct GenkvTcpServer {
    handler: Handler,
    limit_connections: Arc<Semaphore>,
    config: GenkvServerConfig,
    cancellation_token: CancellationToken,
}

impl GenkvTcpServer {
    pub fn new(config: GenkvServerConfig, handler: Handler) -> GenkvTcpServer {
        GenkvTcpServer {
            cancellation_token: handler.cancellation_token(),
            handler,
            limit_connections: Arc::new(Semaphore::new(config.connection_limit as usize)),
            config,
        }
    }

    pub async fn run(&mut self, addr: SocketAddr) -> io::Result<()> {
        let listener = self.get_tcp_listener(addr)?;
        info!("Listening on: {}", listener.local_addr()?);
        loop {
            // wait for a free slot before accepting, the permit goes
            // back when the client task ends
            let permit = tokio::select! {
                _ = self.cancellation_token.cancelled() => break,
                permit = self.limit_connections.clone().acquire_owned() => {
                    permit.map_err(|err| io::Error::new(io::ErrorKind::Other, err))?
                }
            };

            tokio::select! {
                _ = self.cancellation_token.cancelled() => break,
                connection = listener.accept() => {
                    match connection {
                        Ok((socket, peer_addr)) => {
                            if let Err(err) = socket.set_nodelay(true) {
                                debug!("Cannot set TCP_NODELAY for {}: {}", peer_addr, err);
                            }
                            let handler = self.handler.clone();
                            tokio::spawn(async move {
                                let (rx, tx) = socket.into_split();
                                handler.serve(rx, tx, peer_addr.to_string()).await;
                                debug!("Client task finished: {}", peer_addr);
                                drop(permit);
                            });
                        }
                        Err(err) => {
                            error!("Accept error: {}", err);
                        }
                    }
                }
            }
        }
        info!("Server stopped accepting connections");
        Ok(())
    }

    fn get_tcp_listener(&self, addr: SocketAddr) -> Result<TcpListener, std::io::Error> {
        let socket = Socket::new(Domain::for_address(addr), Type::STREAM, None)?;
        socket.set_reuse_address(true)?;
        socket.set_nonblocking(true)?;
        debug!("Binding to addr: {:?}", addr);
        let sock_addr = SockAddr::from(addr);
        if let Err(err) = socket.bind(&sock_addr) {
            error!("Can't bind to: {:?}, err {:?}", addr, err);
            return Err(err);
        }

        if let Err(err) = socket.listen(self.config.listen_backlog as i32) {
            error!("Listen error: {:?}", err);
            return Err(err);
        }

        let std_listener: std::net::TcpListener = socket.into();
        TcpListener::from_std(std_listener)
    }
}
