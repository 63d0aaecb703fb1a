//! Threshold secret sharding built on polynomial interpolation.
//!
//! A secret becomes the constant term of a random polynomial; shards are evaluations of that
//! polynomial at distinct abscissas. Any `threshold` shards pin the polynomial down and
//! recover the constant term, while fewer reveal nothing about it.
#![deny(missing_docs)]
#![forbid(unsafe_code)]
#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    clippy::indexing_slicing,
    clippy::iterator_step_by_zero,
    clippy::invalid_regex,
    clippy::string_slice,
    clippy::unimplemented,
    clippy::todo
)]
#![allow(clippy::module_inception)]

pub mod encoding;
pub mod protocol;
pub mod shard;
