//! In-process end-to-end harness: runs the real `server` and `agent` task
//! graphs inside the test process, wired together over loopback sockets
//! exactly as they would be over a real network.

pub mod echo_backend;
pub mod harness;

pub use harness::Harness;

/// Polls `$expr` with exponential backoff (starting at 10ms) until it is
/// true or 5 seconds elapse, at which point the calling test panics.
#[macro_export]
macro_rules! wait_until {
    ($expr:expr) => {{
        let timeout = std::time::Duration::from_secs(5);
        let result = tokio::time::timeout(timeout, async {
            let mut wait_time = std::time::Duration::from_millis(10);
            loop {
                if $expr {
                    break;
                }
                tokio::time::sleep(wait_time).await;
                wait_time *= 2;
            }
        })
        .await;

        if result.is_err() {
            panic!(
                "condition `{}` did not hold within {:?}",
                stringify!($expr),
                timeout
            );
        }
    }};
}
