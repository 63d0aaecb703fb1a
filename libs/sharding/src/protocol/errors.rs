//! Shard dealing and recovery errors.

use math_lib::errors::InterpolationError;
use thiserror::Error;

/// Shard dealing failure.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum DealError {
    /// The threshold does not fit the shard count.
    #[error("threshold {threshold} invalid for {shard_count} shards")]
    InvalidThreshold {
        /// The requested recovery threshold.
        threshold: usize,

        /// The requested number of shards.
        shard_count: usize,
    },
}

/// Secret recovery failure.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum RecoverError {
    /// The polynomial interpolation failed.
    #[error(transparent)]
    Interpolation(#[from] InterpolationError),
}
