//! Per-record checksums.

use md5::{Digest, Md5};

/// Computes the checksum for a shard record.
///
/// The digest covers the exact decimal strings that travel on the wire, joined as
/// `"x,y,nonce"`. Both sides must hash byte-identical text, so the receiving side verifies
/// against the strings it received, never against re-rendered values.
pub fn shard_checksum(x: &str, y: &str, nonce: &str) -> String {
    let mut hasher = Md5::new();
    hasher.update(x.as_bytes());
    hasher.update(b",");
    hasher.update(y.as_bytes());
    hasher.update(b",");
    hasher.update(nonce.as_bytes());
    hex::encode(hasher.finalize())
}

/// Checks a received shard record against its claimed checksum.
pub fn verify_shard_checksum(x: &str, y: &str, nonce: &str, claimed: &str) -> bool {
    shard_checksum(x, y, nonce) == claimed
}

#[cfg(test)]
mod test {
    use super::*;
    use rstest::rstest;

    #[test]
    fn checksum_shape() {
        let checksum = shard_checksum("12", "3456", "789");
        assert_eq!(checksum.len(), 32);
        assert!(checksum.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn checksum_is_deterministic() {
        assert_eq!(shard_checksum("12", "3456", "789"), shard_checksum("12", "3456", "789"));
    }

    #[rstest]
    #[case::x_changed("13", "3456", "789")]
    #[case::y_changed("12", "3457", "789")]
    #[case::nonce_changed("12", "3456", "780")]
    #[case::values_swapped("3456", "12", "789")]
    fn checksum_is_sensitive(#[case] x: &str, #[case] y: &str, #[case] nonce: &str) {
        let original = shard_checksum("12", "3456", "789");
        assert_ne!(shard_checksum(x, y, nonce), original);
    }

    #[test]
    fn verification() {
        let checksum = shard_checksum("12", "3456", "789");
        assert!(verify_shard_checksum("12", "3456", "789", &checksum));
        assert!(!verify_shard_checksum("12", "3456", "788", &checksum));
        assert!(!verify_shard_checksum("12", "3456", "789", "0000"));
    }
}
