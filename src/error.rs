//! Error types shared by stream endpoints and the relay.

use std::io::{Error as IoError, ErrorKind as IoErrorKind};

/// Result type alias using [`StreamError`].
pub type Result<T> = std::result::Result<T, StreamError>;

/// Failure of a stream endpoint operation.
///
/// A graceful end-of-stream is not an error: it is a read returning zero bytes.
#[derive(Debug, thiserror::Error)]
pub enum StreamError {
    /// The peer forcefully terminated the connection.
    #[error("stream closed by peer")]
    Closed,

    /// The operation observed a cancellation request.
    #[error("operation was cancelled")]
    Cancelled,

    /// Any other I/O failure.
    #[error("I/O error: {0}")]
    Io(#[from] IoError),
}

impl StreamError {
    /// Classify an I/O error coming from a socket-like stream.
    ///
    /// Resets, aborts and broken pipes mean the remote end went away without a
    /// proper shutdown, which the relay treats as a forceful close.
    pub fn from_io(err: IoError) -> Self {
        match err.kind() {
            IoErrorKind::ConnectionReset
            | IoErrorKind::ConnectionAborted
            | IoErrorKind::BrokenPipe
            | IoErrorKind::UnexpectedEof
            | IoErrorKind::NotConnected => StreamError::Closed,
            _ => StreamError::Io(err),
        }
    }

    pub fn is_closed(&self) -> bool {
        matches!(self, StreamError::Closed)
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, StreamError::Cancelled)
    }
}
