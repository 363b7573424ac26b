use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;

use e2e::echo_backend::spawn_echo_backend;
use e2e::wait_until;
use e2e::Harness;

#[tokio::test]
async fn happy_path_single_client() {
    let backend_addr = spawn_echo_backend().await;
    let harness = Harness::start(1, backend_addr).await;

    wait_until!(harness.pool.len().await == 1);

    let mut frontend = TcpStream::connect(&harness.frontend_addr).await.unwrap();
    frontend.write_all(b"PING").await.unwrap();

    let mut reply = [0u8; 4];
    frontend.read_exact(&mut reply).await.unwrap();
    assert_eq!(&reply, b"PING");

    drop(frontend);

    // The agent replaces the consumed peer with a fresh warm one.
    wait_until!(harness.pool.len().await == 1);
}

#[tokio::test]
async fn rejection_when_pool_is_empty() {
    // No agent is started, so the pool never fills.
    let frontend_listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let frontend_addr = frontend_listener.local_addr().unwrap();
    let pool = std::sync::Arc::new(server::peer_pool::PeerPool::new());
    tokio::spawn(server::matcher::run(frontend_listener, pool));

    let mut frontend = TcpStream::connect(frontend_addr).await.unwrap();
    let mut buf = [0u8; 1];
    let n = tokio::time::timeout(Duration::from_millis(100), frontend.read(&mut buf))
        .await
        .expect("rejection should happen well within the timeout")
        .unwrap();
    assert_eq!(n, 0);
}

#[tokio::test]
async fn concurrent_bridges_do_not_cross_streams() {
    let backend_addr = spawn_echo_backend().await;
    let harness = Harness::start(5, backend_addr).await;

    wait_until!(harness.pool.len().await == 5);

    let mut clients = Vec::new();
    for i in 0..5u8 {
        let frontend_addr = harness.frontend_addr.clone();
        clients.push(tokio::spawn(async move {
            let mut frontend = TcpStream::connect(&frontend_addr).await.unwrap();
            let payload = vec![i; 64 * 1024];
            frontend.write_all(&payload).await.unwrap();
            frontend.shutdown().await.unwrap();

            let mut received = Vec::new();
            frontend.read_to_end(&mut received).await.unwrap();
            assert_eq!(received, payload, "client {i} got cross-talk");
        }));
    }

    for client in clients {
        client.await.unwrap();
    }
}
