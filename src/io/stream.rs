use crate::error::Result;
use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

/// One side of a byte stream, as consumed by the relay.
///
/// Implementations report a forceful peer termination as
/// [`StreamError::Closed`](crate::error::StreamError::Closed) and a graceful
/// one as a read of zero bytes. The token is the same one the relay polls, so
/// implementations may use it to abort an in-flight operation.
#[async_trait]
pub trait NetworkStream: Send {
    /// Label used in diagnostics
    fn name(&self) -> &str;

    /// Smallest chunk this stream can usefully produce per read.
    fn min_read_size(&self) -> usize {
        1
    }

    /// Largest chunk this stream accepts per write.
    fn max_write_size(&self) -> usize {
        usize::MAX
    }

    /// Read into `buf`, returning the number of bytes read. Zero means EOF.
    async fn read(&mut self, buf: &mut [u8], token: &CancellationToken) -> Result<usize>;

    /// Write the whole of `buf`.
    async fn write(&mut self, buf: &[u8], token: &CancellationToken) -> Result<()>;

    async fn close(&mut self, token: &CancellationToken) -> Result<()>;
}

#[async_trait]
impl<S> NetworkStream for &mut S
where
    S: NetworkStream + ?Sized,
{
    fn name(&self) -> &str {
        (**self).name()
    }
    fn min_read_size(&self) -> usize {
        (**self).min_read_size()
    }
    fn max_write_size(&self) -> usize {
        (**self).max_write_size()
    }
    async fn read(&mut self, buf: &mut [u8], token: &CancellationToken) -> Result<usize> {
        (**self).read(buf, token).await
    }
    async fn write(&mut self, buf: &[u8], token: &CancellationToken) -> Result<()> {
        (**self).write(buf, token).await
    }
    async fn close(&mut self, token: &CancellationToken) -> Result<()> {
        (**self).close(token).await
    }
}

#[async_trait]
impl<S> NetworkStream for Box<S>
where
    S: NetworkStream + ?Sized,
{
    fn name(&self) -> &str {
        (**self).name()
    }
    fn min_read_size(&self) -> usize {
        (**self).min_read_size()
    }
    fn max_write_size(&self) -> usize {
        (**self).max_write_size()
    }
    async fn read(&mut self, buf: &mut [u8], token: &CancellationToken) -> Result<usize> {
        (**self).read(buf, token).await
    }
    async fn write(&mut self, buf: &[u8], token: &CancellationToken) -> Result<()> {
        (**self).write(buf, token).await
    }
    async fn close(&mut self, token: &CancellationToken) -> Result<()> {
        (**self).close(token).await
    }
}
