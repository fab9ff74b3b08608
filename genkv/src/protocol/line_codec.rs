use crate::protocol::reply::Reply;
use bytes::{Bytes, BytesMut};
use std::io;
use tokio_util::codec::{Decoder, Encoder};

/// Splits the input on `\n` and writes [`Reply`] frames.
///
/// A trailing fragment without terminator at end of stream is reported
/// as `UnexpectedEof`, a line over `max_length` as `InvalidData`.
pub struct LineCodec {
    max_length: Option<usize>,
    // bytes already searched for a terminator
    next_index: usize,
}

impl Default for LineCodec {
    fn default() -> Self {
        Self::new(None)
    }
}

impl LineCodec {
    pub fn new(max_length: Option<usize>) -> LineCodec {
        LineCodec {
            max_length,
            next_index: 0,
        }
    }

    fn check_length(&self, length: usize) -> Result<(), io::Error> {
        match self.max_length {
            Some(max_length) if length > max_length => Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!("line longer than {} bytes", max_length),
            )),
            _ => Ok(()),
        }
    }
}

impl Decoder for LineCodec {
    type Item = Bytes;
    type Error = io::Error;

    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        let newline = src[self.next_index..].iter().position(|byte| *byte == b'\n');
        match newline {
            Some(offset) => {
                let line_end = self.next_index + offset;
                self.next_index = 0;
                self.check_length(line_end)?;
                let mut line = src.split_to(line_end + 1);
                line.truncate(line_end);
                Ok(Some(line.freeze()))
            }
            None => {
                self.check_length(src.len())?;
                self.next_index = src.len();
                Ok(None)
            }
        }
    }

    fn decode_eof(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        match self.decode(src)? {
            Some(line) => Ok(Some(line)),
            None if src.is_empty() => Ok(None),
            None => Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                format!("{} bytes without line terminator", src.len()),
            )),
        }
    }
}

impl Encoder<Reply> for LineCodec {
    type Error = io::Error;

    fn encode(&mut self, msg: Reply, dst: &mut BytesMut) -> Result<(), Self::Error> {
        msg.encode(dst);
        Ok(())
    }
}
