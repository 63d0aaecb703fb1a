//! End-to-end content integrity.

use sha2::{Digest, Sha256};
use std::fmt::{Debug, Display, Formatter};
use thiserror::Error;

/// A content hash pinning down what a dealt secret must reconstruct to.
///
/// The dealer computes it over the original secret bytes before splitting and announces it
/// along every shard; the collecting side recomputes it over the reconstructed bytes. The two
/// digests matching is the end-to-end success criterion of a session.
#[derive(Clone, PartialEq, Eq)]
pub struct SecretHash(String);

impl SecretHash {
    /// Computes the hash of the given secret bytes.
    pub fn of(secret: &[u8]) -> Self {
        Self(hex::encode(Sha256::digest(secret)))
    }

    /// Wraps a hex digest announced by a peer.
    pub fn from_hex(digest: String) -> Self {
        Self(digest.to_lowercase())
    }

    /// The lowercase hex digest.
    pub fn as_hex(&self) -> &str {
        &self.0
    }
}

impl Display for SecretHash {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Debug for SecretHash {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "SecretHash({})", self.0)
    }
}

/// End-to-end integrity verification failure.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum VerifyError {
    /// No hash announcement was seen in the session.
    #[error("no hash announcement received")]
    MissingAnnouncement,

    /// The reconstructed secret does not hash to the announced digest.
    #[error("reconstructed secret hashes to {recovered}, sender announced {announced}")]
    HashMismatch {
        /// The digest the sender announced.
        announced: SecretHash,

        /// The digest of the reconstructed bytes.
        recovered: SecretHash,
    },
}

/// Checks reconstructed secret bytes against the announced content hash.
pub fn verify_announcement(announced: Option<&SecretHash>, reconstructed: &[u8]) -> Result<(), VerifyError> {
    let announced = announced.ok_or(VerifyError::MissingAnnouncement)?;
    let recovered = SecretHash::of(reconstructed);
    if recovered != *announced {
        return Err(VerifyError::HashMismatch { announced: announced.clone(), recovered });
    }
    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn known_digest() {
        let hash = SecretHash::of(b"abc");
        assert_eq!(hash.as_hex(), "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad");
    }

    #[test]
    fn empty_digest() {
        let hash = SecretHash::of(b"");
        assert_eq!(hash.as_hex(), "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855");
    }

    #[test]
    fn uppercase_announcements_are_normalized() {
        let announced = SecretHash::from_hex("BA7816BF8F01CFEA414140DE5DAE2223B00361A396177A9CB410FF61F20015AD".into());
        assert_eq!(announced, SecretHash::of(b"abc"));
    }

    #[test]
    fn matching_announcement() {
        let announced = SecretHash::of(b"HELLO");
        assert_eq!(verify_announcement(Some(&announced), b"HELLO"), Ok(()));
    }

    #[test]
    fn mismatched_announcement() {
        let announced = SecretHash::of(b"HELLO");
        let result = verify_announcement(Some(&announced), b"AB");
        assert_eq!(
            result,
            Err(VerifyError::HashMismatch { announced, recovered: SecretHash::of(b"AB") })
        );
    }

    #[test]
    fn missing_announcement() {
        assert_eq!(verify_announcement(None, b"HELLO"), Err(VerifyError::MissingAnnouncement));
    }
}
