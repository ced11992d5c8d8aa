//! Scripted endpoints for relay tests.

use crate::error::{Result, StreamError};
use crate::io::NetworkStream;
use async_trait::async_trait;
use std::collections::VecDeque;
use std::io::{Error as IoError, ErrorKind as IoErrorKind};
use std::sync::{Arc, Mutex};
use tokio_util::sync::CancellationToken;

/// One scripted read result.
#[derive(Debug, Clone)]
pub enum Chunk {
    Data(Vec<u8>),
    Eof,
    Closed,
    Fail(IoErrorKind),
    /// Block until the token is cancelled, then report cancellation.
    Hang,
    /// Claim more bytes than were actually read.
    Overreport(usize),
}

/// Scripted result of a write or close.
#[derive(Debug, Clone, Copy)]
pub enum Outcome {
    Ok,
    Closed,
    Fail(IoErrorKind),
}

impl Outcome {
    fn into_result(self) -> Result<()> {
        match self {
            Outcome::Ok => Ok(()),
            Outcome::Closed => Err(StreamError::Closed),
            Outcome::Fail(kind) => Err(IoError::new(kind, "scripted failure").into()),
        }
    }
}

#[derive(Debug, Default)]
struct LogInner {
    writes: Vec<Vec<u8>>,
    closes: usize,
    read_lens: Vec<usize>,
}

/// Shared view of what happened to a [`MockStream`], usable after the stream
/// has been moved into a relay.
#[derive(Debug, Clone, Default)]
pub struct MockLog(Arc<Mutex<LogInner>>);

impl MockLog {
    pub fn writes(&self) -> Vec<Vec<u8>> {
        self.0.lock().unwrap().writes.clone()
    }
    pub fn written(&self) -> Vec<u8> {
        self.writes().concat()
    }
    pub fn closes(&self) -> usize {
        self.0.lock().unwrap().closes
    }
    /// Buffer lengths offered to each read call.
    pub fn read_lens(&self) -> Vec<usize> {
        self.0.lock().unwrap().read_lens.clone()
    }
}

#[derive(Debug)]
pub struct MockStream {
    name: String,
    min_read_size: usize,
    max_write_size: usize,
    reads: VecDeque<Chunk>,
    writes: VecDeque<Outcome>,
    close: Outcome,
    log: MockLog,
}

impl MockStream {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            min_read_size: 1,
            max_write_size: usize::MAX,
            reads: VecDeque::new(),
            writes: VecDeque::new(),
            close: Outcome::Ok,
            log: MockLog::default(),
        }
    }
    pub fn with_min_read_size(mut self, size: usize) -> Self {
        self.min_read_size = size;
        self
    }
    pub fn with_max_write_size(mut self, size: usize) -> Self {
        self.max_write_size = size;
        self
    }
    /// Reads beyond the script report EOF.
    pub fn with_reads(mut self, reads: Vec<Chunk>) -> Self {
        self.reads = reads.into();
        self
    }
    /// Writes beyond the script succeed.
    pub fn with_writes(mut self, writes: Vec<Outcome>) -> Self {
        self.writes = writes.into();
        self
    }
    pub fn with_close(mut self, close: Outcome) -> Self {
        self.close = close;
        self
    }
    pub fn log(&self) -> MockLog {
        self.log.clone()
    }
}

#[async_trait]
impl NetworkStream for MockStream {
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
        self.log.0.lock().unwrap().read_lens.push(buf.len());
        match self.reads.pop_front().unwrap_or(Chunk::Eof) {
            Chunk::Data(data) => {
                assert!(data.len() <= buf.len(), "scripted chunk exceeds buffer");
                buf[..data.len()].copy_from_slice(&data);
                Ok(data.len())
            }
            Chunk::Eof => Ok(0),
            Chunk::Closed => Err(StreamError::Closed),
            Chunk::Fail(kind) => Err(IoError::new(kind, "scripted failure").into()),
            Chunk::Overreport(n) => Ok(n),
            Chunk::Hang => {
                token.cancelled().await;
                Err(StreamError::Cancelled)
            }
        }
    }

    async fn write(&mut self, buf: &[u8], _token: &CancellationToken) -> Result<()> {
        let outcome = self.writes.pop_front().unwrap_or(Outcome::Ok);
        if let Outcome::Ok = outcome {
            self.log.0.lock().unwrap().writes.push(buf.to_vec());
        }
        outcome.into_result()
    }

    async fn close(&mut self, _token: &CancellationToken) -> Result<()> {
        self.log.0.lock().unwrap().closes += 1;
        self.close.into_result()
    }
}
