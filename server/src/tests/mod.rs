use std::sync::Arc;
use std::sync::Once;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

use crate::matcher;
use crate::peer_pool::PeerPool;

static INIT: Once = Once::new();

fn init_tracing() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt().with_test_writer().try_init();
    });
}

async fn bind_local() -> TcpListener {
    TcpListener::bind("127.0.0.1:0").await.unwrap()
}

#[tokio::test]
async fn frontend_is_bridged_to_a_warm_peer() {
    init_tracing();

    let pool = Arc::new(PeerPool::new());
    let frontend_listener = bind_local().await;
    let frontend_addr = frontend_listener.local_addr().unwrap();

    tokio::spawn(matcher::run(frontend_listener, Arc::clone(&pool)));

    // Simulate the agent dialing in and being accepted into the pool.
    let peer_listener = bind_local().await;
    let peer_listener_addr = peer_listener.local_addr().unwrap();
    let agent_side = TcpStream::connect(peer_listener_addr).await.unwrap();
    let (server_side_peer, _) = peer_listener.accept().await.unwrap();
    pool.add(server_side_peer).await;

    let mut frontend = TcpStream::connect(frontend_addr).await.unwrap();
    frontend.write_all(b"PING").await.unwrap();

    let mut agent_side = agent_side;
    let mut buf = [0u8; 4];
    agent_side.read_exact(&mut buf).await.unwrap();
    assert_eq!(&buf, b"PING");

    agent_side.write_all(b"PONG").await.unwrap();
    let mut reply = [0u8; 4];
    frontend.read_exact(&mut reply).await.unwrap();
    assert_eq!(&reply, b"PONG");
}

#[tokio::test]
async fn frontend_is_rejected_when_pool_is_empty() {
    init_tracing();

    let pool = Arc::new(PeerPool::new());
    let frontend_listener = bind_local().await;
    let frontend_addr = frontend_listener.local_addr().unwrap();

    tokio::spawn(matcher::run(frontend_listener, pool));

    let mut frontend = TcpStream::connect(frontend_addr).await.unwrap();
    let mut buf = [0u8; 1];
    let n = frontend.read(&mut buf).await.unwrap();
    assert_eq!(n, 0, "rejected frontend should see EOF with no bytes");
}

#[tokio::test]
async fn accept_peers_feeds_the_pool() {
    init_tracing();

    let pool = Arc::new(PeerPool::new());
    let peer_listener = bind_local().await;
    let peer_addr = peer_listener.local_addr().unwrap();

    tokio::spawn(matcher::accept_peers(peer_listener, Arc::clone(&pool)));

    let _agent_side = TcpStream::connect(peer_addr).await.unwrap();

    // Give the spawned accept loop a chance to run.
    for _ in 0..50 {
        if pool.len().await == 1 {
            return;
        }
        tokio::time::sleep(std::time::Duration::from_millis(10)).await;
    }
    panic!("peer was never added to the pool");
}
