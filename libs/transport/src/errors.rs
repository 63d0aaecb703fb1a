//! Transport errors.

use crate::record::{DecodeRecordError, EncodeRecordError};
use std::net::SocketAddr;
use thiserror::Error;

/// A violation of the record protocol on one connection.
#[derive(Error, Debug)]
pub enum ProtocolViolation {
    /// The line was not a valid record.
    #[error(transparent)]
    MalformedRecord(#[from] DecodeRecordError),

    /// A shard field failed to parse after checksum verification.
    #[error("invalid shard field {field}")]
    InvalidField {
        /// The name of the offending record field.
        field: &'static str,
    },

    /// The connection closed in the middle of a record.
    #[error("connection closed mid record")]
    TruncatedRecord,
}

/// Shard delivery failure.
#[derive(Error, Debug)]
pub enum SendError {
    /// Endpoint and shard counts do not line up.
    #[error("have {shards} shards for {endpoints} endpoints")]
    CountMismatch {
        /// The number of shards to deliver.
        shards: usize,

        /// The number of configured endpoints.
        endpoints: usize,
    },

    /// A record could not be serialized.
    #[error(transparent)]
    Encode(#[from] EncodeRecordError),

    /// Connecting or writing to an endpoint failed.
    #[error("io error on {endpoint}: {source}")]
    Io {
        /// The endpoint the failure happened on.
        endpoint: SocketAddr,

        /// The underlying error.
        source: std::io::Error,
    },

    /// The endpoint did not accept the shard in time.
    #[error("timed out delivering shard to {endpoint}")]
    Timeout {
        /// The endpoint that timed out.
        endpoint: SocketAddr,
    },
}

/// Shard collection failure.
///
/// Any of these is fatal to the whole session: partial results are discarded, never
/// reconstructed from.
#[derive(Error, Debug)]
pub enum CollectError {
    /// Binding, accepting or reading on an endpoint failed.
    #[error("io error on {endpoint}: {source}")]
    Io {
        /// The endpoint the failure happened on.
        endpoint: SocketAddr,

        /// The underlying error.
        source: std::io::Error,
    },

    /// The endpoint saw no complete session in time.
    #[error("timed out collecting on {endpoint}")]
    Timeout {
        /// The endpoint that timed out.
        endpoint: SocketAddr,
    },

    /// A connection violated the record protocol.
    #[error("protocol violation on {endpoint}: {source}")]
    Protocol {
        /// The endpoint the violation happened on.
        endpoint: SocketAddr,

        /// The violation itself.
        source: ProtocolViolation,
    },

    /// A shard record does not match its claimed checksum.
    #[error("checksum mismatch on {endpoint}")]
    ChecksumMismatch {
        /// The endpoint the record arrived on.
        endpoint: SocketAddr,
    },

    /// A nonce was seen more than once within the session.
    #[error("nonce already used: {nonce}")]
    NonceReplayed {
        /// The replayed nonce.
        nonce: u64,
    },

    /// An endpoint worker stopped without reporting.
    #[error("endpoint worker for {endpoint} stopped unexpectedly")]
    WorkerStopped {
        /// The endpoint whose worker stopped.
        endpoint: SocketAddr,
    },
}
