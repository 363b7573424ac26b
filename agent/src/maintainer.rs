use std::time::Duration;

use tokio::net::TcpStream;
use tokio::sync::mpsc;

use tokio_extras::TaskMap;

use crate::armed;
use crate::config::Config;

const INITIAL_BACKOFF: Duration = Duration::from_millis(10);
const MAX_BACKOFF: Duration = Duration::from_secs(30);

/// Keeps at most `config.conn_count` outbound connections to the server
/// alive. Each successful dial is handed off to [`armed::arm_and_bridge`] and
/// tracked in `tasks` under a monotonically increasing id until it reports
/// itself done over `done_tx`.
///
/// A failed dial doubles the retry delay, capped at [`MAX_BACKOFF`]; a
/// successful one resets it to [`INITIAL_BACKOFF`].
pub async fn run(config: Config) -> ! {
    let mut tasks: TaskMap<u64> = TaskMap::default();
    let (done_tx, mut done_rx) = mpsc::unbounded_channel::<u64>();
    let mut next_id: u64 = 0;
    let mut backoff = INITIAL_BACKOFF;

    loop {
        while let Ok(id) = done_rx.try_recv() {
            tasks.remove(&id);
        }

        if tasks.len() >= config.conn_count {
            tokio::select! {
                id = done_rx.recv() => {
                    if let Some(id) = id {
                        tasks.remove(&id);
                    }
                }
                _ = tokio_extras::time::sleep(INITIAL_BACKOFF) => {}
            }
            continue;
        }

        match TcpStream::connect(&config.server_address).await {
            Ok(peer) => {
                tracing::debug!(addr = %config.server_address, "dialed server, peer added to pool");
                backoff = INITIAL_BACKOFF;

                let id = next_id;
                next_id += 1;
                let done_tx = done_tx.clone();
                let backend_address = config.backend_address.clone();

                tasks.add(id, async move {
                    armed::arm_and_bridge(peer, &backend_address).await;
                    let _ = done_tx.send(id);
                });
            }
            Err(err) => {
                tracing::warn!(%err, addr = %config.server_address, ?backoff, "dial to server failed");
                tokio_extras::time::sleep(backoff).await;
                backoff = (backoff * 2).min(MAX_BACKOFF);
            }
        }
    }
}
