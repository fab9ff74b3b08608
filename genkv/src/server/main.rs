use crate::cli::parser;
use crate::kv::builder::{StoreConfig, VersionedStoreBuilder};
use crate::server::handler::{Handler, HandlerConfig, DEFAULT_PIPE_CAPACITY};
use crate::server::runtime_builder;
use crate::storage::memory::MemoryEngine;
use crate::version::GENKV_VERSION;
use log::{error, info};
use std::process;
use std::sync::Arc;
use tracing_log::LogTracer;

fn get_log_level(verbose: u8) -> tracing::Level {
    // Vary the output based on how many times the user used the "verbose" flag
    // (i.e. 'myprog -v -v -v' or 'myprog -vvv' vs 'myprog -v'
    match verbose {
        0 => tracing::Level::ERROR,
        1 => tracing::Level::WARN,
        2 => tracing::Level::INFO,
        3 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    }
}

pub fn run(args: Vec<String>) {
    LogTracer::init().expect("Cannot initialize logger");

    let cli_config = match parser::parse(args) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{}", err);
            process::exit(1);
        }
    };
    tracing_subscriber::fmt()
        .with_max_level(get_log_level(cli_config.verbose))
        .init();

    info!("genkvd version: {}", GENKV_VERSION);
    info!("Listen address: {}", cli_config.listen_address);
    info!("Listen port: {}", cli_config.port);
    info!("Connection limit: {}", cli_config.connection_limit);
    info!("Number of threads: {}", cli_config.threads);
    info!("Runtime type: {}", cli_config.runtime_type.as_str());
    info!("Cache size: {}", cli_config.cache_size);
    info!("Idle timeout: {:?}", cli_config.rx_timeout());
    info!("Max line length: {:?}", cli_config.max_line_length());

    let store_config = StoreConfig::new(cli_config.cache_size, cli_config.lock_stripes);
    let store = match VersionedStoreBuilder::from_config(store_config, Arc::new(MemoryEngine::new())) {
        Ok(store) => store,
        Err(err) => {
            eprintln!("{}", err);
            process::exit(1);
        }
    };
    let handler = Handler::new(
        store.clone(),
        HandlerConfig {
            rx_timeout: cli_config.rx_timeout(),
            pipe_capacity: DEFAULT_PIPE_CAPACITY,
            max_line_length: cli_config.max_line_length(),
        },
    );

    let runtime = match runtime_builder::create_runtime(cli_config.runtime_type, cli_config.threads) {
        Ok(runtime) => runtime,
        Err(err) => {
            eprintln!("Cannot create runtime: {}", err);
            process::exit(1);
        }
    };
    let (mut server, addr) = runtime_builder::create_genkv_server(&cli_config, handler.clone());

    let cancellation_token = handler.cancellation_token();
    runtime.spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                info!("Ctrl-C received, shutting down");
                cancellation_token.cancel();
            }
            Err(err) => error!("Cannot listen for shutdown signal: {}", err),
        }
    });

    let result = runtime.block_on(server.run(addr));
    // connections observe the cancellation on their own, give them a moment
    runtime.shutdown_timeout(std::time::Duration::from_secs(1));
    if let Err(err) = store.close() {
        error!("Error closing store: {}", err);
    }
    if let Err(err) = result {
        error!("Server error: {}", err);
        process::exit(1);
    }
}
