//! `Content-Length` message framing.
//!
//! A frame is one or more `Name: value` header lines, a blank line, then
//! exactly `Content-Length` bytes of body. Both `\r\n` and `\n` line endings
//! are accepted; frames are always written with `\r\n`.

use std::io::{self, BufRead, Read, Write};

use thiserror::Error;

pub const CONTENT_LENGTH: &str = "Content-Length";

/// Largest body accepted. Longer declarations are rejected before reading.
pub const MAX_FRAME_LEN: usize = 64 * 1024 * 1024;

#[derive(Debug, Error)]
pub enum FrameError {
  #[error("I/O error on protocol stream: {0}")]
  Io(#[from] io::Error),

  #[error("frame header has no {CONTENT_LENGTH}")]
  MissingLength,

  #[error("invalid {CONTENT_LENGTH} value {0:?}")]
  InvalidLength(String),

  #[error("stream ended in the middle of a frame")]
  Truncated,
}

impl FrameError {
  /// Whether the stream can still be read after this error.
  pub fn is_recoverable(&self) -> bool {
    matches!(self, Self::MissingLength | Self::InvalidLength(_))
  }
}

/// Read one frame body. Returns `Ok(None)` on a clean end of input, i.e. when
/// the stream ends before any header byte of a new frame.
pub fn read_frame<R: BufRead>(reader: &mut R) -> Result<Option<Vec<u8>>, FrameError> {
  let mut length: Option<Result<usize, String>> = None;
  let mut saw_header = false;
  let mut line = String::new();

  loop {
    line.clear();
    if reader.read_line(&mut line)? == 0 {
      return if saw_header { Err(FrameError::Truncated) } else { Ok(None) };
    }

    let trimmed = line.trim_end_matches(['\r', '\n']);
    if trimmed.is_empty() {
      // Stray blank lines between frames.
      if !saw_header {
        continue;
      }
      break;
    }
    saw_header = true;

    if let Some(value) = content_length_value(trimmed) {
      length = Some(
        value
          .parse::<usize>()
          .ok()
          .filter(|n| *n <= MAX_FRAME_LEN)
          .ok_or_else(|| value.to_string()),
      );
    }
  }

  let length = match length {
    Some(Ok(n)) => n,
    Some(Err(raw)) => return Err(FrameError::InvalidLength(raw)),
    None => return Err(FrameError::MissingLength),
  };

  let mut body = Vec::with_capacity(length.min(64 * 1024));
  reader.by_ref().take(length as u64).read_to_end(&mut body)?;
  if body.len() < length {
    return Err(FrameError::Truncated);
  }
  Ok(Some(body))
}

/// Value of a `Content-Length` header on `line`.
///
/// Bytes before the header name are skipped: after a rejected frame the unread
/// body runs into the next frame's first header line.
fn content_length_value(line: &str) -> Option<&str> {
  let start = line.to_ascii_lowercase().find(&CONTENT_LENGTH.to_ascii_lowercase())?;
  let rest = line[start + CONTENT_LENGTH.len()..].trim_start();
  rest.strip_prefix(':').map(str::trim)
}

/// Write one frame and flush it.
pub fn write_frame<W: Write>(out: &mut W, body: &[u8]) -> io::Result<()> {
  write!(out, "{}: {}\r\n\r\n", CONTENT_LENGTH, body.len())?;
  out.write_all(body)?;
  out.flush()
}
