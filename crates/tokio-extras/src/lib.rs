//! Small tokio helpers shared by the agent and server binaries: instrumented
//! task spawning and `Drop`-scoped task lifetimes.

pub mod future_ext;
pub mod tasks;
pub mod time;

pub use future_ext::FutureExt;
pub use tasks::TaskMap;
