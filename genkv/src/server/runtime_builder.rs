use super::handler::Handler;
use super::tcp::{GenkvServerConfig, GenkvTcpServer};
use crate::cli::parser::{GenkvdConfig, RuntimeType};
use std::io;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::runtime::{Builder, Runtime};

fn get_worker_thread_name() -> String {
    static ATOMIC_ID: AtomicUsize = AtomicUsize::new(0);
    let id = ATOMIC_ID.fetch_add(1, Ordering::SeqCst);
    format!("genkvd-wrk-{}", id)
}

fn create_multi_thread_runtime(worker_threads: usize) -> io::Result<Runtime> {
    Builder::new_multi_thread()
        .thread_name_fn(get_worker_thread_name)
        .worker_threads(worker_threads)
        .enable_all()
        .build()
}

fn create_current_thread_runtime() -> io::Result<Runtime> {
    Builder::new_current_thread()
        .thread_name_fn(get_worker_thread_name)
        .enable_all()
        .build()
}

pub fn create_runtime(runtime_type: RuntimeType, threads: usize) -> io::Result<Runtime> {
    match runtime_type {
        RuntimeType::CurrentThread => create_current_thread_runtime(),
        RuntimeType::MultiThread => create_multi_thread_runtime(threads),
    }
}

pub fn create_genkv_server(config: &GenkvdConfig, handler: Handler) -> (GenkvTcpServer, SocketAddr) {
    let addr = SocketAddr::new(config.listen_address, config.port);
    let server_config = GenkvServerConfig::new(config.connection_limit, config.listen_backlog);
    (GenkvTcpServer::new(server_config, handler), addr)
}

/// Serves `handler` on the configured address,
/// blocks until the handler's cancellation token fires.
pub fn start_genkv_server(config: GenkvdConfig, handler: Handler) -> io::Result<()> {
    let runtime = create_runtime(config.runtime_type, config.threads)?;
    let (mut server, addr) = create_genkv_server(&config, handler);
    runtime.block_on(server.run(addr))
}
