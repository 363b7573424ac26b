//! The agent half of the reverse tunnel: keeps a warm pool of outbound
//! connections to the server and, on wake, splices each one onto the local
//! backend service.

pub mod armed;
pub mod config;
pub mod logger;
pub mod maintainer;
