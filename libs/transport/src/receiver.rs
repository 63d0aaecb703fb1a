//! Shard collection sessions.

use crate::{
    checksum::verify_shard_checksum,
    errors::{CollectError, ProtocolViolation},
    integrity::SecretHash,
    record::WireRecord,
};
use math_lib::fields::PrimeField;
use rustc_hash::FxHashSet;
use sharding::shard::Shard;
use std::{net::SocketAddr, time::Duration};
use tokio::{
    io::{AsyncBufReadExt, BufReader},
    net::TcpListener,
};
use tracing::{debug, warn};

/// Everything one collection session produced.
#[derive(Debug)]
pub struct CollectedSession {
    /// The accepted shards, ordered by endpoint and arrival.
    pub shards: Vec<Shard>,

    /// The hash announcement the session settled on, if any connection carried one.
    pub announced: Option<SecretHash>,
}

/// One endpoint's view of its finished connection.
#[derive(Default)]
struct EndpointReport {
    announced: Option<SecretHash>,
    shards: Vec<Shard>,
}

/// Collects the shards of one dealing across a set of endpoints.
///
/// Each endpoint accepts exactly one inbound connection and reads records until the peer
/// closes. All endpoint results meet at a join barrier and merge in endpoint order; any
/// failure anywhere discards the whole session.
pub struct ShardCollector {
    listeners: Vec<(SocketAddr, TcpListener)>,
    field: PrimeField,
    timeout: Duration,
}

impl ShardCollector {
    /// Binds a listener on every endpoint.
    ///
    /// Nothing is accepted until [collect](Self::collect) runs, but once this returns a
    /// sender can start delivering. Port 0 binds an arbitrary free port; see
    /// [local_addrs](Self::local_addrs) for the resolved addresses.
    pub async fn bind(endpoints: &[SocketAddr], field: PrimeField, timeout: Duration) -> Result<Self, CollectError> {
        let mut listeners = Vec::with_capacity(endpoints.len());
        for endpoint in endpoints {
            let io = |source| CollectError::Io { endpoint: *endpoint, source };
            let listener = TcpListener::bind(endpoint).await.map_err(io)?;
            let local = listener.local_addr().map_err(io)?;
            debug!(endpoint = %local, "listener bound");
            listeners.push((local, listener));
        }
        Ok(Self { listeners, field, timeout })
    }

    /// The resolved addresses of the bound endpoints, in endpoint order.
    pub fn local_addrs(&self) -> Vec<SocketAddr> {
        self.listeners.iter().map(|(endpoint, _)| *endpoint).collect()
    }

    /// Runs the collection session to completion.
    ///
    /// One task serves each endpoint, bounded by the collector's timeout. The first failure
    /// in endpoint order is reported once every endpoint has settled.
    pub async fn collect(self) -> Result<CollectedSession, CollectError> {
        let Self { listeners, field, timeout } = self;
        let mut handles = Vec::with_capacity(listeners.len());
        for (endpoint, listener) in listeners {
            let field = field.clone();
            let handle = tokio::spawn(async move {
                match tokio::time::timeout(timeout, serve_endpoint(listener, field, endpoint)).await {
                    Ok(result) => result,
                    Err(_) => Err(CollectError::Timeout { endpoint }),
                }
            });
            handles.push((endpoint, handle));
        }

        // Join barrier: no result is used until every endpoint has reported.
        let mut reports = Vec::with_capacity(handles.len());
        let mut failure = None;
        for (endpoint, handle) in handles {
            match handle.await {
                Ok(Ok(report)) => reports.push(report),
                Ok(Err(error)) => {
                    if failure.is_none() {
                        failure = Some(error);
                    }
                }
                Err(_) => {
                    if failure.is_none() {
                        failure = Some(CollectError::WorkerStopped { endpoint });
                    }
                }
            }
        }
        match failure {
            Some(error) => Err(error),
            None => merge_reports(reports),
        }
    }
}

/// Serves one endpoint: accept a single connection and drain it.
async fn serve_endpoint(
    listener: TcpListener,
    field: PrimeField,
    endpoint: SocketAddr,
) -> Result<EndpointReport, CollectError> {
    let io = |source| CollectError::Io { endpoint, source };
    let (stream, peer) = listener.accept().await.map_err(io)?;
    debug!(%endpoint, %peer, "connection accepted");

    let mut reader = BufReader::new(stream);
    let mut line = String::new();
    let mut report = EndpointReport::default();
    loop {
        line.clear();
        let read = reader.read_line(&mut line).await.map_err(io)?;
        if read == 0 {
            break;
        }
        if !line.ends_with('\n') {
            return Err(CollectError::Protocol { endpoint, source: ProtocolViolation::TruncatedRecord });
        }
        handle_line(&line, &field, endpoint, &mut report)?;
    }
    debug!(%endpoint, shards = report.shards.len(), "connection closed");
    Ok(report)
}

/// Processes one received line.
///
/// Shard records are checksum-verified over the received strings before any parsing. A
/// connection's first hash announcement sticks; later ones are ignored.
fn handle_line(
    line: &str,
    field: &PrimeField,
    endpoint: SocketAddr,
    report: &mut EndpointReport,
) -> Result<(), CollectError> {
    let record = WireRecord::from_line(line)
        .map_err(|source| CollectError::Protocol { endpoint, source: source.into() })?;
    match record {
        WireRecord::Hash { data } => {
            let hash = SecretHash::from_hex(data);
            match &report.announced {
                None => report.announced = Some(hash),
                Some(first) if *first != hash => {
                    warn!(%endpoint, "conflicting hash announcement on connection, keeping the first");
                }
                Some(_) => {}
            }
        }
        WireRecord::Shard { x, y, nonce, checksum } => {
            if !verify_shard_checksum(&x, &y, &nonce, &checksum) {
                return Err(CollectError::ChecksumMismatch { endpoint });
            }
            let shard = parse_shard(field, &x, &y, &nonce)
                .map_err(|source| CollectError::Protocol { endpoint, source })?;
            report.shards.push(shard);
        }
    }
    Ok(())
}

/// Parses checksum-verified shard strings into a shard.
fn parse_shard(field: &PrimeField, x: &str, y: &str, nonce: &str) -> Result<Shard, ProtocolViolation> {
    let x = field.parse_element(x).map_err(|_| ProtocolViolation::InvalidField { field: "x" })?;
    let y = field.parse_element(y).map_err(|_| ProtocolViolation::InvalidField { field: "y" })?;
    let nonce = nonce.parse::<u64>().map_err(|_| ProtocolViolation::InvalidField { field: "nonce" })?;
    Ok(Shard { x, y, nonce })
}

/// Merges endpoint reports in endpoint order into one session result.
///
/// The session-wide nonce set lives here: replays are caught whether the duplicate arrived
/// on one endpoint or across two. The first hash announcement wins; a conflicting later one
/// is only logged.
fn merge_reports(reports: Vec<EndpointReport>) -> Result<CollectedSession, CollectError> {
    let mut announced: Option<SecretHash> = None;
    let mut shards = Vec::new();
    let mut seen_nonces = FxHashSet::default();
    for report in reports {
        if let Some(hash) = report.announced {
            match &announced {
                None => announced = Some(hash),
                Some(first) if *first != hash => {
                    warn!(kept = %first, ignored = %hash, "conflicting hash announcements across endpoints");
                }
                Some(_) => {}
            }
        }
        for shard in report.shards {
            if !seen_nonces.insert(shard.nonce) {
                return Err(CollectError::NonceReplayed { nonce: shard.nonce });
            }
            shards.push(shard);
        }
    }
    Ok(CollectedSession { shards, announced })
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::checksum::shard_checksum;

    fn endpoint() -> SocketAddr {
        "127.0.0.1:9999".parse().expect("bad address")
    }

    fn shard_line(field: &PrimeField, x: u64, y: u64, nonce: u64) -> String {
        let x = field.element_from_u64(x).to_string();
        let y = field.element_from_u64(y).to_string();
        let nonce = nonce.to_string();
        let checksum = shard_checksum(&x, &y, &nonce);
        WireRecord::Shard { x, y, nonce, checksum }.to_line().expect("serialization failed")
    }

    #[test]
    fn valid_shard_is_accepted() {
        let field = PrimeField::mersenne_521();
        let mut report = EndpointReport::default();
        let line = shard_line(&field, 3, 77, 12);
        handle_line(&line, &field, endpoint(), &mut report).expect("line rejected");
        assert_eq!(report.shards.len(), 1);
        let shard = report.shards.first().expect("no shard");
        assert_eq!(shard.x, field.element_from_u64(3));
        assert_eq!(shard.y, field.element_from_u64(77));
        assert_eq!(shard.nonce, 12);
    }

    #[test]
    fn tampered_shard_is_rejected() {
        let field = PrimeField::mersenne_521();
        let mut report = EndpointReport::default();
        let line = shard_line(&field, 3, 77, 12).replace("\"77\"", "\"78\"");
        let result = handle_line(&line, &field, endpoint(), &mut report);
        assert!(matches!(result, Err(CollectError::ChecksumMismatch { .. })));
        assert!(report.shards.is_empty());
    }

    #[test]
    fn overflowing_nonce_is_invalid() {
        let field = PrimeField::mersenne_521();
        let mut report = EndpointReport::default();
        let nonce = "99999999999999999999999999";
        let x = "1".to_string();
        let y = "2".to_string();
        let checksum = shard_checksum(&x, &y, nonce);
        let line = WireRecord::Shard { x, y, nonce: nonce.into(), checksum }
            .to_line()
            .expect("serialization failed");
        let result = handle_line(&line, &field, endpoint(), &mut report);
        assert!(matches!(
            result,
            Err(CollectError::Protocol { source: ProtocolViolation::InvalidField { field: "nonce" }, .. })
        ));
    }

    #[test]
    fn first_announcement_sticks() {
        let field = PrimeField::mersenne_521();
        let mut report = EndpointReport::default();
        let first = WireRecord::Hash { data: "aa".into() }.to_line().expect("serialization failed");
        let second = WireRecord::Hash { data: "bb".into() }.to_line().expect("serialization failed");
        handle_line(&first, &field, endpoint(), &mut report).expect("line rejected");
        handle_line(&second, &field, endpoint(), &mut report).expect("line rejected");
        assert_eq!(report.announced, Some(SecretHash::from_hex("aa".into())));
    }

    #[test]
    fn merge_keeps_endpoint_order() {
        let field = PrimeField::mersenne_521();
        let make = |x: u64, nonce: u64| Shard {
            x: field.element_from_u64(x),
            y: field.element_from_u64(1),
            nonce,
        };
        let reports = vec![
            EndpointReport { announced: None, shards: vec![make(1, 10)] },
            EndpointReport { announced: Some(SecretHash::from_hex("aa".into())), shards: vec![make(2, 20), make(3, 30)] },
        ];
        let session = merge_reports(reports).expect("merge failed");
        let abscissas: Vec<_> = session.shards.iter().map(|s| s.x.clone()).collect();
        assert_eq!(
            abscissas,
            vec![field.element_from_u64(1), field.element_from_u64(2), field.element_from_u64(3)]
        );
        assert_eq!(session.announced, Some(SecretHash::from_hex("aa".into())));
    }

    #[test]
    fn merge_detects_cross_endpoint_replay() {
        let field = PrimeField::mersenne_521();
        let make = |x: u64, nonce: u64| Shard {
            x: field.element_from_u64(x),
            y: field.element_from_u64(1),
            nonce,
        };
        let reports = vec![
            EndpointReport { announced: None, shards: vec![make(1, 10)] },
            EndpointReport { announced: None, shards: vec![make(2, 10)] },
        ];
        let result = merge_reports(reports);
        assert!(matches!(result, Err(CollectError::NonceReplayed { nonce: 10 })));
    }

    #[test]
    fn merge_keeps_first_announcement_across_endpoints() {
        let reports = vec![
            EndpointReport { announced: Some(SecretHash::from_hex("aa".into())), shards: Vec::new() },
            EndpointReport { announced: Some(SecretHash::from_hex("bb".into())), shards: Vec::new() },
        ];
        let session = merge_reports(reports).expect("merge failed");
        assert_eq!(session.announced, Some(SecretHash::from_hex("aa".into())));
    }
}
