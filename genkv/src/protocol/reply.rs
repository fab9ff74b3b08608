use bytes::{BufMut, Bytes, BytesMut};

/// Server reply
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Reply {
    Pong,
    Ok,
    Bulk(Bytes),
    Null,
    /// `-ERR <message>.`
    Error(String),
    /// `-ERR <expected token count>`
    WrongArity(usize),
}

impl Reply {
    pub fn error<E: ToString>(err: E) -> Reply {
        Reply::Error(err.to_string())
    }

    pub fn encode(&self, dst: &mut BytesMut) {
        match self {
            Reply::Pong => dst.put_slice(b"+PONG\n"),
            Reply::Ok => dst.put_slice(b"+OK\n"),
            Reply::Bulk(value) => {
                let header = format!("${}\n", value.len());
                dst.reserve(header.len() + value.len() + 1);
                dst.put_slice(header.as_bytes());
                dst.put_slice(value);
                dst.put_u8(b'\n');
            }
            Reply::Null => dst.put_slice(b"$-1\n"),
            Reply::Error(message) => {
                dst.put_slice(b"-ERR ");
                dst.put_slice(message.as_bytes());
                dst.put_slice(b".\n");
            }
            Reply::WrongArity(expected) => {
                dst.put_slice(format!("-ERR {}\n", expected).as_bytes());
            }
        }
    }

    pub fn to_bytes(&self) -> Bytes {
        let mut dst = BytesMut::new();
        self.encode(&mut dst);
        dst.freeze()
    }
}
