use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tokio::net::TcpListener;

use server::config::Config;
use server::peer_pool::PeerPool;
use server::{logger, matcher};

/// How often the peer pool is swept for dead connections.
const SWEEP_INTERVAL: Duration = Duration::from_millis(1);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    logger::init_tracing()?;

    let config = Config::from_env();
    let pool = Arc::new(PeerPool::new());

    let frontend_listener = TcpListener::bind(&config.server_addr)
        .await
        .with_context(|| format!("failed to bind frontend listener on {}", config.server_addr))?;
    tracing::info!(addr = %config.server_addr, "listening for frontend connections");

    let peer_listener = TcpListener::bind(&config.peer_addr)
        .await
        .with_context(|| format!("failed to bind peer listener on {}", config.peer_addr))?;
    tracing::info!(addr = %config.peer_addr, "listening for peer connections");

    tokio::spawn(sweep_loop(Arc::clone(&pool)));
    tokio::spawn(matcher::accept_peers(peer_listener, Arc::clone(&pool)));

    matcher::run(frontend_listener, pool).await
}

async fn sweep_loop(pool: Arc<PeerPool>) {
    let mut ticker = tokio::time::interval(SWEEP_INTERVAL);
    loop {
        ticker.tick().await;
        pool.sweep().await;
    }
}
