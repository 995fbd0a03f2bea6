//! Line feed — pushes lines from any async reader into a [`Monitor`].
//!
//! The reader is whatever the deployment pipes in (process stdout, stdin, a
//! socket). Lines are processed strictly in arrival order. Invalid UTF-8 is
//! converted lossily rather than ending the feed.

use rpgshare_core::Monitor;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

/// Read `reader` to EOF, feeding every line to `monitor`. Returns the number
/// of lines read.
pub async fn feed_lines<R>(monitor: &Monitor, mut reader: R) -> std::io::Result<u64>
where
    R: AsyncBufRead + Unpin,
{
    let mut buf = Vec::new();
    let mut count = 0;
    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf).await? == 0 {
            break;
        }
        let line = String::from_utf8_lossy(&buf);
        let line = line.trim_end_matches(['\n', '\r']);
        monitor.process_line(line);
        count += 1;
    }
    tracing::debug!(lines = count, "feed reached EOF");
    Ok(count)
}
