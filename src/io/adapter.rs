use crate::error::{Result, StreamError};
use crate::io::NetworkStream;
use async_trait::async_trait;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tokio_util::sync::CancellationToken;

/// Exposes any tokio byte stream (TCP, TLS, duplex pipe...) as a [`NetworkStream`].
///
/// In-flight reads and writes are raced against the cancellation token, so a
/// relay blocked on a silent peer stops as soon as the caller cancels.
#[derive(Debug)]
pub struct IoStream<T> {
    name: String,
    inner: T,
    min_read_size: usize,
    max_write_size: usize,
}

impl<T> IoStream<T>
where
    T: AsyncRead + AsyncWrite + Unpin + Send,
{
    pub fn new(name: impl Into<String>, inner: T) -> Self {
        Self {
            name: name.into(),
            inner,
            min_read_size: 1,
            max_write_size: usize::MAX,
        }
    }

    pub fn with_min_read_size(mut self, size: usize) -> Self {
        self.min_read_size = size;
        self
    }

    /// Cap the chunk size the relay hands to a single write
    pub fn with_max_write_size(mut self, size: usize) -> Self {
        self.max_write_size = size;
        self
    }

    pub fn get_ref(&self) -> &T {
        &self.inner
    }

    pub fn into_inner(self) -> T {
        self.inner
    }
}

#[async_trait]
impl<T> NetworkStream for IoStream<T>
where
    T: AsyncRead + AsyncWrite + Unpin + Send,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn min_read_size(&self) -> usize {
        self.min_read_size
    }

    fn max_write_size(&self) -> usize {
        self.max_write_size
    }

    async fn read(&mut self, buf: &mut [u8], token: &CancellationToken) -> Result<usize> {
        tokio::select! {
            ret = self.inner.read(buf) => ret.map_err(StreamError::from_io),
            _ = token.cancelled() => Err(StreamError::Cancelled),
        }
    }

    async fn write(&mut self, buf: &[u8], token: &CancellationToken) -> Result<()> {
        let inner = &mut self.inner;
        tokio::select! {
            ret = async {
                inner.write_all(buf).await?;
                inner.flush().await
            } => ret.map_err(StreamError::from_io),
            _ = token.cancelled() => Err(StreamError::Cancelled),
        }
    }

    async fn close(&mut self, _token: &CancellationToken) -> Result<()> {
        // not raced against the token
        self.inner.shutdown().await.map_err(StreamError::from_io)
    }
}
