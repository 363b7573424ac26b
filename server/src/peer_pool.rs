use std::time::Duration;

use tokio::io::AsyncReadExt;
use tokio::net::TcpStream;
use tokio::sync::Mutex;
use tokio::time::timeout;

/// Probe deadline for the liveness sweep. Kept well under a millisecond so
/// holding the pool mutex for the whole sweep is cheap.
const PROBE_DEADLINE: Duration = Duration::from_micros(1);

/// Idle peer connections the agent has pre-established, waiting to be
/// matched with a frontend. `take` is LIFO: the most recently added peer is
/// handed out first, since a peer that has been idle the longest is the one
/// most likely to have died behind a NAT timeout.
#[derive(Default)]
pub struct PeerPool {
    slots: Mutex<Vec<TcpStream>>,
}

impl PeerPool {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn add(&self, stream: TcpStream) {
        self.slots.lock().await.push(stream);
    }

    pub async fn take(&self) -> Option<TcpStream> {
        self.slots.lock().await.pop()
    }

    pub async fn len(&self) -> usize {
        self.slots.lock().await.len()
    }

    /// Probes every pooled connection with a sub-millisecond, non-blocking
    /// read and evicts any that report end-of-stream.
    ///
    /// The agent's contract is to never write unsolicited bytes to a pooled
    /// connection, so in practice the probe either times out (still alive)
    /// or observes EOF (dead). If the agent ever violated that contract the
    /// probe would consume and discard the stray byte; this implementation
    /// documents that assumption rather than buffering against it, matching
    /// the source it was distilled from (see DESIGN.md).
    pub async fn sweep(&self) {
        let mut slots = self.slots.lock().await;
        let mut alive = Vec::with_capacity(slots.len());

        for mut stream in slots.drain(..) {
            let mut probe = [0u8; 1];
            match timeout(PROBE_DEADLINE, stream.read(&mut probe)).await {
                // Deadline hit before anything arrived: still alive.
                Err(_elapsed) => alive.push(stream),
                Ok(Ok(0)) => {
                    tracing::debug!(peer = ?stream.peer_addr().ok(), "sweep evicted dead peer");
                }
                Ok(Ok(n)) => {
                    tracing::warn!(
                        bytes = n,
                        "peer sent unsolicited data before being matched; byte(s) discarded"
                    );
                    alive.push(stream);
                }
                Ok(Err(err)) => {
                    tracing::debug!(%err, "sweep evicted peer after read error");
                }
            }
        }

        *slots = alive;
    }
}
