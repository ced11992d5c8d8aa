//! Stream endpoints and the relay that pumps bytes between them
//!
//! This module provides:
//! - `NetworkStream` trait describing an endpoint with bounded read/write sizes
//! - `IoStream` adapter exposing tokio streams as endpoints
//! - `Relay` for unidirectional transfer with graceful/forceful close propagation

mod adapter;
#[cfg(test)]
pub(crate) mod mocks;
mod relay;
mod stream;

pub use adapter::IoStream;
pub use relay::{Completion, Finished, Relay, RelayReport, negotiate_buffer_size, relay};
pub use stream::NetworkStream;
