use crate::config::{DEFAULT_BUFFER_SIZE, RelayParams};
use crate::error::{Result, StreamError};
use crate::io::NetworkStream;
use std::io::{Error as IoError, ErrorKind as IoErrorKind};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, trace, warn};

/// How a relay that ran to completion ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    /// The source reported end-of-stream.
    Graceful,
    /// The source or destination was torn down by its peer.
    Forceful,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RelayReport {
    pub completion: Completion,
    /// Bytes written to the destination
    pub bytes: u64,
    /// Number of non-empty reads relayed
    pub chunks: u64,
}

/// Outcome of a spawned relay. The endpoints are handed back so the caller
/// can tear them down, which it must do itself after an error.
pub struct Finished<S, D> {
    pub source: S,
    pub destination: D,
    pub result: Result<RelayReport>,
}

/// Size of the transfer buffer for a source/destination pair.
///
/// Uses at least `default_size` or whatever the source needs per read, but
/// never more than the destination takes per write, and never zero.
pub fn negotiate_buffer_size(
    default_size: usize,
    min_read_size: usize,
    max_write_size: usize,
) -> usize {
    max_write_size.min(default_size.max(min_read_size)).max(1)
}

/// Unidirectional relay builder, pumping bytes from `source` to `destination` until:
/// - the source reports EOF (destination gets closed)
/// - either side reports a forceful close (destination gets closed)
/// - the cancellation token fires (destination left alone)
/// - any other error occurs (destination left alone, error returned)
pub struct Relay<S, D> {
    source: S,
    destination: D,
    buffer_size: usize,
    cancellation_token: CancellationToken,
    stats_callback: Option<Box<dyn FnMut(usize) + Send>>,
}

impl<S, D> Relay<S, D>
where
    S: NetworkStream,
    D: NetworkStream,
{
    pub fn new(source: S, destination: D) -> Self {
        Self {
            source,
            destination,
            buffer_size: DEFAULT_BUFFER_SIZE,
            cancellation_token: CancellationToken::new(),
            stats_callback: None,
        }
    }

    /// Set the preferred buffer size; still subject to the endpoints' limits
    pub fn buffer_size(mut self, size: usize) -> Self {
        self.buffer_size = size;
        self
    }

    pub fn with_params(mut self, params: &RelayParams) -> Self {
        self.buffer_size = params.buffer_size;
        self
    }

    pub fn cancellation_token(mut self, token: CancellationToken) -> Self {
        self.cancellation_token = token;
        self
    }

    /// Set statistics callback, called with the size of every relayed chunk
    pub fn with_stats<F>(mut self, callback: F) -> Self
    where
        F: FnMut(usize) + Send + 'static,
    {
        self.stats_callback = Some(Box::new(callback));
        self
    }

    /// Run the relay on the current task.
    pub async fn execute(mut self) -> Result<RelayReport> {
        self.run().await
    }

    /// Run the relay on its own tokio task.
    pub fn spawn(mut self) -> JoinHandle<Finished<S, D>>
    where
        S: 'static,
        D: 'static,
    {
        tokio::spawn(async move {
            let result = self.run().await;
            Finished {
                source: self.source,
                destination: self.destination,
                result,
            }
        })
    }

    async fn run(&mut self) -> Result<RelayReport> {
        let label = format!("{} > {}", self.source.name(), self.destination.name());
        let size = negotiate_buffer_size(
            self.buffer_size,
            self.source.min_read_size(),
            self.destination.max_write_size(),
        );
        let mut buffer = vec![0u8; size];
        let token = self.cancellation_token.clone();
        let mut bytes = 0u64;
        let mut chunks = 0u64;

        loop {
            if token.is_cancelled() {
                debug!("relay [{}]: cancelled", label);
                return Err(StreamError::Cancelled);
            }

            let completion = match self.transfer(&label, &mut buffer, &token).await {
                Ok(0) => {
                    debug!("relay [{}]: gracefully closed connection", label);
                    Completion::Graceful
                }
                Ok(n) => {
                    bytes += n as u64;
                    chunks += 1;
                    if let Some(ref mut callback) = self.stats_callback {
                        callback(n);
                    }
                    continue;
                }
                Err(StreamError::Closed) => {
                    debug!("relay [{}]: forcefully closed connection", label);
                    Completion::Forceful
                }
                Err(StreamError::Cancelled) => {
                    debug!("relay [{}]: cancelled during transfer", label);
                    return Err(StreamError::Cancelled);
                }
                Err(e) => {
                    warn!("relay [{}]: caught unexpected error: {}", label, e);
                    return Err(e);
                }
            };

            // A destination that is already gone counts as closed.
            return match self.destination.close(&token).await {
                Ok(()) | Err(StreamError::Closed) => Ok(RelayReport {
                    completion,
                    bytes,
                    chunks,
                }),
                Err(e) => {
                    warn!("relay [{}]: failed to close destination: {}", label, e);
                    Err(e)
                }
            };
        }
    }

    /// One read-then-write step. Returns the number of bytes moved, zero on EOF.
    async fn transfer(
        &mut self,
        label: &str,
        buffer: &mut [u8],
        token: &CancellationToken,
    ) -> Result<usize> {
        trace!("relay [{}]: reading...", label);
        let n = self.source.read(buffer, token).await?;
        if n > buffer.len() {
            return Err(IoError::new(
                IoErrorKind::InvalidData,
                format!("read reported {} bytes into a {} byte buffer", n, buffer.len()),
            )
            .into());
        }
        if n > 0 {
            trace!("relay [{}]: read {} bytes", label, n);
            self.destination.write(&buffer[..n], token).await?;
        }
        Ok(n)
    }
}

/// Spawn a relay from `source` to `destination` with default parameters.
pub fn relay<S, D>(
    source: S,
    destination: D,
    token: CancellationToken,
) -> JoinHandle<Finished<S, D>>
where
    S: NetworkStream + 'static,
    D: NetworkStream + 'static,
{
    Relay::new(source, destination)
        .cancellation_token(token)
        .spawn()
}
