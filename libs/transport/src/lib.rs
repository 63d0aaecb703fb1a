//! Shard transport protocol.
//!
//! Shards travel from a dealer to one endpoint each as newline-delimited JSON records over
//! plain stream sockets. The protocol protects integrity, not confidentiality: every record
//! is checksummed and replay-protected, but travels in the clear.
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

pub mod checksum;
pub mod errors;
pub mod integrity;
pub mod receiver;
pub mod record;
pub mod sender;
