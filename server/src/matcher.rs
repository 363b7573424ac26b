use std::sync::Arc;

use tokio::net::{TcpListener, TcpStream};

use tunnel_core::bridge;

use crate::peer_pool::PeerPool;

/// Accepts frontend clients and pairs each with a warm peer from `pool`.
///
/// Never blocks waiting for a peer: a frontend that arrives with no warm
/// connection available is rejected immediately rather than stalled, which
/// keeps tail latency bounded and makes undercapacity visible to the caller
/// as a closed connection instead of a hang.
pub async fn run(listener: TcpListener, pool: Arc<PeerPool>) -> ! {
    loop {
        let frontend = match listener.accept().await {
            Ok((stream, _addr)) => stream,
            Err(err) => {
                tracing::warn!(%err, "frontend accept failed");
                continue;
            }
        };

        match pool.take().await {
            Some(peer) => {
                tokio::spawn(bridge_peer(frontend, peer));
            }
            None => {
                tracing::warn!("rejecting frontend: peer pool empty");
                drop(frontend);
            }
        }
    }
}

async fn bridge_peer(frontend: TcpStream, peer: TcpStream) {
    let frontend_addr = frontend.peer_addr().ok();
    let peer_addr = peer.peer_addr().ok();

    match bridge(frontend, peer).await {
        Ok(stats) => {
            tracing::debug!(
                ?frontend_addr,
                ?peer_addr,
                a_to_b = stats.a_to_b,
                b_to_a = stats.b_to_a,
                "bridge closed"
            );
        }
        Err(err) => {
            tracing::debug!(?frontend_addr, ?peer_addr, %err, "bridge closed with error");
        }
    }
}

/// Accepts agent-initiated peer connections and drops each straight into the
/// warm pool. Accept errors are logged and the loop continues; they are
/// never fatal.
pub async fn accept_peers(listener: TcpListener, pool: Arc<PeerPool>) -> ! {
    loop {
        match listener.accept().await {
            Ok((stream, addr)) => {
                tracing::debug!(%addr, "accepted peer connection");
                pool.add(stream).await;
            }
            Err(err) => {
                tracing::warn!(%err, "peer accept failed");
            }
        }
    }
}
