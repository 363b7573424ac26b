use tokio::io::{self, AsyncRead, AsyncWrite};

/// Bytes copied in each direction of a completed [`bridge`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BridgeStats {
    pub a_to_b: u64,
    pub b_to_a: u64,
}

/// Splice two streams together until either side is done.
///
/// Both directions are copied concurrently. A graceful EOF in one direction
/// shuts down the write half of the other stream (propagating the half-close,
/// so a backend can still finish replying after the frontend stops sending)
/// and the remaining direction keeps draining until it, too, reaches EOF. A
/// read/write error in either direction tears the whole bridge down
/// immediately. Either way, both streams are dropped — and therefore fully
/// closed — only after both directions have finished; callers should treat
/// the returned `Result` as "the bridge is gone" regardless of which branch
/// produced it.
pub async fn bridge<A, B>(mut a: A, mut b: B) -> io::Result<BridgeStats>
where
    A: AsyncRead + AsyncWrite + Unpin,
    B: AsyncRead + AsyncWrite + Unpin,
{
    let (a_to_b, b_to_a) = io::copy_bidirectional(&mut a, &mut b).await?;
    Ok(BridgeStats { a_to_b, b_to_a })
}
