//! FakeGameProcess — an in-memory stand-in for a game server's stdout.
//!
//! The writer half pushes raw bytes into a `tokio::io::duplex` pipe; the reader
//! half is an [`AsyncBufRead`](tokio::io::AsyncBufRead) that can be handed
//! straight to `rpgshare::feed::feed_lines`. Dropping the writer is EOF.

use tokio::io::{AsyncWriteExt, BufReader, DuplexStream};

/// Pipe capacity. Large enough that tests never block on a full pipe.
const PIPE_BYTES: usize = 1 << 20;

/// Handle for pushing log output into a [`fake_game_process`] stream.
pub struct FakeGameWriter {
    inner: DuplexStream,
}

impl FakeGameWriter {
    /// Write a line. Adds a trailing newline if not already present.
    pub async fn send_line(&mut self, line: impl Into<String>) {
        let mut s = line.into();
        if !s.ends_with('\n') {
            s.push('\n');
        }
        self.send_bytes(s.as_bytes()).await;
    }

    /// Write several lines at once (simulates a burst).
    pub async fn send_burst(&mut self, lines: &[&str]) {
        for line in lines {
            self.send_line(*line).await;
        }
    }

    /// Write raw bytes, e.g. invalid UTF-8 or a line without a newline.
    pub async fn send_bytes(&mut self, bytes: &[u8]) {
        self.inner
            .write_all(bytes)
            .await
            .expect("fake process pipe closed");
    }

    /// Close the stream, causing the reader to see EOF.
    pub fn close(self) {
        // inner is dropped, closing the pipe.
    }
}

/// Create a linked writer/reader pair.
///
/// ```rust
/// let (mut game, log) = fake_game_process();
/// game.send_line(share_line("P1")).await;
/// game.close();
/// feed_lines(&monitor, log).await?;
/// ```
pub fn fake_game_process() -> (FakeGameWriter, BufReader<DuplexStream>) {
    let (writer, reader) = tokio::io::duplex(PIPE_BYTES);
    (FakeGameWriter { inner: writer }, BufReader::new(reader))
}
