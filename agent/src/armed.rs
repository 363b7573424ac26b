use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;

use tunnel_core::bridge;

/// Drives one pooled peer connection through its armed state machine: wait
/// for the wake byte, dial the backend, replay the byte, then splice.
///
/// Every exit path is silent by design — the maintainer only needs to know
/// that this slot has freed up, which it learns by this future returning,
/// not by an error value.
pub async fn arm_and_bridge(mut peer: TcpStream, backend_address: &str) {
    let mut wake = [0u8; 1];
    match peer.read_exact(&mut wake).await {
        Ok(()) => {}
        Err(err) => {
            tracing::debug!(%err, "peer closed before sending the wake byte");
            return;
        }
    }

    let mut backend = match TcpStream::connect(backend_address).await {
        Ok(backend) => backend,
        Err(err) => {
            tracing::warn!(%err, addr = backend_address, "failed to dial backend after wake");
            return;
        }
    };

    if let Err(err) = backend.write_all(&wake).await {
        tracing::warn!(%err, "failed to replay wake byte to backend");
        return;
    }

    match bridge(peer, backend).await {
        Ok(stats) => {
            tracing::debug!(a_to_b = stats.a_to_b, b_to_a = stats.b_to_a, "bridge closed");
        }
        Err(err) => {
            tracing::debug!(%err, "bridge closed with error");
        }
    }
}
