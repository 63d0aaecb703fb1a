//! Threshold Shard Dealing Protocol

use crate::{
    protocol::errors::{DealError, RecoverError},
    shard::Shard,
};
use math_lib::{
    fields::{FieldElement, PrimeField},
    polynomial::{point::Point, point_sequence::PointSequence, Polynomial},
};
use rand::{CryptoRng, Rng};
use rustc_hash::FxHashSet;

/// Threshold Shard Dealer.
///
/// Splits a field element into `shard_count` shards of which any `threshold` recover the
/// original value via [recover_secret].
pub struct ShardDealer {
    /// The field shards are dealt in.
    field: PrimeField,

    /// The number of shards dealt per secret.
    shard_count: usize,

    /// The number of shards required for recovery.
    threshold: usize,
}

impl ShardDealer {
    /// Creates a new shard dealer.
    ///
    /// The threshold must be between 1 and `shard_count`.
    pub fn new(field: PrimeField, shard_count: usize, threshold: usize) -> Result<Self, DealError> {
        if threshold < 1 || threshold > shard_count {
            return Err(DealError::InvalidThreshold { threshold, shard_count });
        }
        Ok(Self { field, shard_count, threshold })
    }

    /// The field shards are dealt in.
    pub fn field(&self) -> &PrimeField {
        &self.field
    }

    /// The number of shards dealt per secret.
    pub fn shard_count(&self) -> usize {
        self.shard_count
    }

    /// The number of shards required for recovery.
    pub fn threshold(&self) -> usize {
        self.threshold
    }

    /// Generate the shards for a secret.
    ///
    /// The secret becomes the constant term of a random polynomial of degree `threshold - 1`,
    /// and every shard is an evaluation of that polynomial. Abscissas are drawn at random,
    /// pairwise distinct and nonzero: the polynomial at zero is the secret itself. Nonces are
    /// drawn pairwise distinct so one dealing never trips the receiving side's replay
    /// protection.
    pub fn deal<R: Rng + CryptoRng>(&self, secret: &FieldElement, rng: &mut R) -> Vec<Shard> {
        let degree = self.threshold.saturating_sub(1);
        let polynomial = Polynomial::random(secret.clone(), degree, rng);

        let mut abscissas = Vec::with_capacity(self.shard_count);
        let mut seen_abscissas = FxHashSet::default();
        while abscissas.len() < self.shard_count {
            let x = self.field.gen_random_element(rng);
            if x.is_zero() || !seen_abscissas.insert(x.value().clone()) {
                continue;
            }
            abscissas.push(x);
        }

        let mut nonces = Vec::with_capacity(self.shard_count);
        let mut seen_nonces = FxHashSet::default();
        while nonces.len() < self.shard_count {
            let nonce: u64 = rng.gen();
            if seen_nonces.insert(nonce) {
                nonces.push(nonce);
            }
        }

        abscissas
            .into_iter()
            .zip(nonces)
            .map(|(x, nonce)| {
                let y = polynomial.eval(&x);
                Shard { x, y, nonce }
            })
            .collect()
    }
}

/// Recover the secret from the given shards.
///
/// Any shards from one dealing recover the dealt secret as long as at least `threshold` of
/// them are present, in any order. The caller passes exactly the shards it trusts: with fewer
/// shards than the threshold this yields a value unrelated to the secret rather than an error.
pub fn recover_secret(shards: &[Shard]) -> Result<FieldElement, RecoverError> {
    let mut point_sequence = PointSequence::default();
    for shard in shards {
        point_sequence.push(Point::new(shard.x.clone(), shard.y.clone()));
    }
    Ok(point_sequence.interpolate_at_zero()?)
}
