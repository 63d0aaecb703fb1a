//! Shards of a split secret.

use math_lib::fields::FieldElement;
use std::fmt::{Debug, Formatter};

/// One shard of a split secret.
///
/// A shard is a point on the dealing polynomial together with the freshness nonce it travels
/// with. Holding fewer shards than the dealing threshold reveals nothing about the secret.
#[derive(Clone, PartialEq, Eq)]
pub struct Shard {
    /// The abscissa the dealing polynomial was evaluated at.
    pub x: FieldElement,

    /// The polynomial value at `x`.
    pub y: FieldElement,

    /// Freshness nonce bound to this shard in transit.
    pub nonce: u64,
}

impl Debug for Shard {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        // The ordinate is the sensitive half of the point.
        f.debug_struct("Shard").field("x", &self.x).field("y", &"<redacted>").field("nonce", &self.nonce).finish()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use math_lib::fields::PrimeField;

    #[test]
    fn debug_redacts_ordinate() {
        let field = PrimeField::mersenne_521();
        let shard = Shard { x: field.element_from_u64(3), y: field.element_from_u64(1234), nonce: 7 };
        let formatted = format!("{shard:?}");
        assert!(formatted.contains("<redacted>"));
        assert!(!formatted.contains("1234"));
    }
}
