//! Shard delivery.

use crate::{checksum::shard_checksum, errors::SendError, integrity::SecretHash, record::WireRecord};
use sharding::shard::Shard;
use std::{net::SocketAddr, time::Duration};
use tokio::{io::AsyncWriteExt, net::TcpStream, time::timeout};
use tracing::debug;

/// Delivers the shards of one dealing to their endpoints.
///
/// Every endpoint gets a dedicated connection carrying the hash announcement first and its
/// shard second. Endpoint position is the only routing key: the shard at index `i` goes to
/// the endpoint at index `i`, so the two slices must be equally long.
pub struct ShardSender {
    timeout: Duration,
}

impl ShardSender {
    /// Creates a sender whose per-endpoint deliveries are bounded by `timeout`.
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    /// Delivers one shard to each endpoint, in order.
    ///
    /// There are no retries: the first failing endpoint aborts the delivery and the session
    /// with it.
    pub async fn send_shards(
        &self,
        endpoints: &[SocketAddr],
        shards: &[Shard],
        announcement: &SecretHash,
    ) -> Result<(), SendError> {
        if endpoints.len() != shards.len() {
            return Err(SendError::CountMismatch { shards: shards.len(), endpoints: endpoints.len() });
        }
        for (endpoint, shard) in endpoints.iter().zip(shards) {
            match timeout(self.timeout, deliver(*endpoint, shard, announcement)).await {
                Ok(result) => result?,
                Err(_) => return Err(SendError::Timeout { endpoint: *endpoint }),
            }
            debug!(%endpoint, "shard delivered");
        }
        Ok(())
    }
}

async fn deliver(endpoint: SocketAddr, shard: &Shard, announcement: &SecretHash) -> Result<(), SendError> {
    let io = |source| SendError::Io { endpoint, source };

    let x = shard.x.to_string();
    let y = shard.y.to_string();
    let nonce = shard.nonce.to_string();
    let checksum = shard_checksum(&x, &y, &nonce);
    let hash_line = WireRecord::Hash { data: announcement.as_hex().to_string() }.to_line()?;
    let shard_line = WireRecord::Shard { x, y, nonce, checksum }.to_line()?;

    let mut stream = TcpStream::connect(endpoint).await.map_err(io)?;
    stream.write_all(hash_line.as_bytes()).await.map_err(io)?;
    stream.write_all(shard_line.as_bytes()).await.map_err(io)?;
    stream.flush().await.map_err(io)?;
    stream.shutdown().await.map_err(io)?;
    Ok(())
}
