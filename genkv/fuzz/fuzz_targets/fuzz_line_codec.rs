#![no_main]
use libfuzzer_sys::fuzz_target;
extern crate genkv;
use bytes::{BufMut, BytesMut};
use tokio_util::codec::Decoder;

fuzz_target!(|data: &[u8]| {
    let mut codec = genkv::protocol::line_codec::LineCodec::new(Some(64));
    let mut src = BytesMut::with_capacity(data.len());
    src.put(data);
    while let Ok(Some(line)) = codec.decode(&mut src) {
        assert!(!line.contains(&b'\n'));
        let _ = genkv::protocol::command::Command::parse(line);
    }
});
