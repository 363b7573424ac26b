use std::sync::Arc;
use std::time::Duration;

use tokio::net::TcpListener;

use agent::config::Config as AgentConfig;
use server::peer_pool::PeerPool;

const SWEEP_INTERVAL: Duration = Duration::from_millis(1);

/// A running server (frontend + peer listeners, sweep loop) paired with a
/// running agent maintainer, both spawned as background tasks for the
/// lifetime of the test.
pub struct Harness {
    pub frontend_addr: String,
    pub pool: Arc<PeerPool>,
    agent_task: tokio::task::JoinHandle<()>,
}

impl Harness {
    /// Starts the server, then points a fresh agent maintainer at it with
    /// the given `conn_count` and `backend_addr`.
    pub async fn start(conn_count: usize, backend_addr: String) -> Self {
        let pool = Arc::new(PeerPool::new());

        let frontend_listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let frontend_addr = frontend_listener.local_addr().unwrap().to_string();

        let peer_listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let peer_addr = peer_listener.local_addr().unwrap().to_string();

        tokio::spawn(sweep_loop(Arc::clone(&pool)));
        tokio::spawn(server::matcher::accept_peers(
            peer_listener,
            Arc::clone(&pool),
        ));
        tokio::spawn(server::matcher::run(frontend_listener, Arc::clone(&pool)));

        let agent_task = tokio::spawn(async move {
            agent::maintainer::run(AgentConfig {
                server_address: peer_addr,
                backend_address: backend_addr,
                conn_count,
            })
            .await;
        });

        Self {
            frontend_addr,
            pool,
            agent_task,
        }
    }

    /// Simulates the agent process disappearing: aborting its maintainer
    /// task drops every armed connection's `TaskMap` entry, which closes
    /// the agent-side socket of each one.
    pub fn kill_agent(&self) {
        self.agent_task.abort();
    }
}

async fn sweep_loop(pool: Arc<PeerPool>) {
    let mut ticker = tokio::time::interval(SWEEP_INTERVAL);
    loop {
        ticker.tick().await;
        pool.sweep().await;
    }
}
