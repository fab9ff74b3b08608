#![no_main]
use libfuzzer_sys::fuzz_target;
extern crate genkv;
use genkv::kv::builder::{StoreConfig, VersionedStoreBuilder};
use genkv::server::handler::{Handler, HandlerConfig};
use genkv::storage::memory::MemoryEngine;
use std::sync::Arc;
use tokio::io::{AsyncReadExt, AsyncWriteExt};

fuzz_target!(|data: &[u8]| {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap();

    let mut input = Vec::with_capacity(data.len() + 6);
    for line in data.split(|byte| *byte == b'\n') {
        input.extend_from_slice(line);
        input.push(b'\n');
    }
    input.extend_from_slice(b"PING\n");

    let output = runtime.block_on(async {
        let store = VersionedStoreBuilder::from_config(
            StoreConfig::new(16, 0),
            Arc::new(MemoryEngine::new()),
        )
        .unwrap();
        let handler = Handler::new(store.clone(), HandlerConfig::default());
        let (mut writer, mut reader) = handler.new_conn();
        let write = async {
            writer.write_all(&input).await.unwrap();
            writer.shutdown().await.unwrap();
        };
        let read = async {
            let mut output = Vec::new();
            reader.read_to_end(&mut output).await.unwrap();
            output
        };
        let ((), output) = tokio::join!(write, read);
        store.close().unwrap();
        output
    });

    if !output.ends_with(b"+PONG\n") {
        panic!(
            "Input: {:?}\nOutput: {:?}",
            String::from_utf8_lossy(&input),
            String::from_utf8_lossy(&output)
        );
    }
});
