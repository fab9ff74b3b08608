use tokio::io::{AsyncBufReadExt, AsyncReadExt, AsyncWriteExt, BufReader};
use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};
use tokio::net::TcpStream;

/// Line oriented client for the text protocol
pub struct TestClient {
    reader: BufReader<OwnedReadHalf>,
    writer: OwnedWriteHalf,
}

impl TestClient {
    pub fn new(stream: TcpStream) -> TestClient {
        let (rx, tx) = stream.into_split();
        TestClient {
            reader: BufReader::new(rx),
            writer: tx,
        }
    }

    pub async fn send(&mut self, raw: &[u8]) {
        self.writer.write_all(raw).await.unwrap();
    }

    pub async fn send_line(&mut self, line: &str) {
        self.send(format!("{line}\n").as_bytes()).await;
    }

    pub async fn read_line(&mut self) -> String {
        let mut line = String::new();
        self.reader.read_line(&mut line).await.unwrap();
        line
    }

    /// Sends a command and returns one reply, bulk replies include
    /// their payload line
    pub async fn request(&mut self, line: &str) -> String {
        self.send_line(line).await;
        let mut reply = self.read_line().await;
        if reply.starts_with('$') && reply != "$-1\n" {
            reply.push_str(&self.read_line().await);
        }
        reply
    }

    /// Closes the sending side and returns whatever the server still sends
    pub async fn finish(mut self) -> Vec<u8> {
        self.writer.shutdown().await.unwrap();
        let mut rest = Vec::new();
        self.reader.read_to_end(&mut rest).await.unwrap();
        rest
    }

    /// Reads until the server closes the connection, a reset counts as closed
    pub async fn read_remaining(mut self) -> Vec<u8> {
        let mut rest = Vec::new();
        let mut buf = [0u8; 1024];
        loop {
            match self.reader.read(&mut buf).await {
                Ok(0) | Err(_) => return rest,
                Ok(read) => rest.extend_from_slice(&buf[..read]),
            }
        }
    }
}
