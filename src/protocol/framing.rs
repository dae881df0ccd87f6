//! Frame reader
//!
//! Accumulates bytes from an async reader until a CR LF delimiter is seen,
//! then yields the decoded, trimmed frame text. Bytes after the delimiter are
//! kept for the next frame.

use tokio::io::{AsyncRead, AsyncReadExt};

use crate::error::SessionError;
use crate::protocol::responses::DELIMITER;

pub struct FrameReader<R> {
    reader: R,
    buffer: Vec<u8>,
    chunk: Vec<u8>,
    // Offset in `buffer` already known to hold no complete delimiter.
    scanned: usize,
    max_frame_length: Option<usize>,
}

impl<R: AsyncRead + Unpin> FrameReader<R> {
    /// Create a reader that requests `chunk_size` bytes per read.
    ///
    /// `chunk_size` must be non-zero; a zero-sized read buffer would be
    /// indistinguishable from end of stream.
    pub fn new(reader: R, chunk_size: usize, max_frame_length: Option<usize>) -> Self {
        Self {
            reader,
            buffer: Vec::new(),
            chunk: vec![0; chunk_size.max(1)],
            scanned: 0,
            max_frame_length,
        }
    }

    /// Read the next complete frame.
    ///
    /// Returns `PeerClosed` if the stream ends before a delimiter arrives,
    /// even when partial bytes are buffered.
    pub async fn read_frame(&mut self) -> Result<String, SessionError> {
        loop {
            if let Some(end) = find_delimiter(&self.buffer, self.scanned) {
                let mut frame: Vec<u8> = self.buffer.drain(..end + DELIMITER.len()).collect();
                frame.truncate(end);
                self.scanned = 0;
                let text = String::from_utf8(frame)?;
                return Ok(text.trim().to_string());
            }

            // The last byte may be a '\r' whose '\n' has not arrived yet.
            self.scanned = self.buffer.len().saturating_sub(DELIMITER.len() - 1);

            if let Some(limit) = self.max_frame_length {
                if self.buffer.len() > limit {
                    return Err(SessionError::FrameTooLong(limit));
                }
            }

            let n = self.reader.read(&mut self.chunk).await?;
            if n == 0 {
                return Err(SessionError::PeerClosed);
            }
            self.buffer.extend_from_slice(&self.chunk[..n]);
        }
    }

    /// Bytes received but not yet returned as a frame
    pub fn buffered(&self) -> &[u8] {
        &self.buffer
    }
}

/// Position of the first delimiter at or after `from`.
fn find_delimiter(buffer: &[u8], from: usize) -> Option<usize> {
    buffer
        .get(from..)?
        .windows(DELIMITER.len())
        .position(|window| window == DELIMITER)
        .map(|pos| pos + from)
}
