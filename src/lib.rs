//! NetRelay Library
//!
//! A unidirectional byte relay between abstract network stream endpoints.
//! Two relays, one per direction, make a full-duplex tunnel.

pub mod config;
pub mod error;
pub mod io;
pub mod logging;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// Re-export commonly used types for convenience
pub use config::RelayParams;
pub use error::StreamError;
pub use io::{Completion, IoStream, NetworkStream, Relay, RelayReport};
