//! Shared primitives for the reverse-tunnel agent and server: the
//! bidirectional byte-pump, env-var config helpers, and the error type both
//! binaries use to distinguish fatal startup failures from retryable ones.

pub mod config;
pub mod error;
pub mod pipe;

pub use config::{get_env, normalize_listen_addr};
pub use error::{Error, Result};
pub use pipe::{bridge, BridgeStats};
