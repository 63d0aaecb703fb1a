//! Secret byte encoding.
//!
//! Secrets are byte strings while shards live in a prime field, so the dealing pipeline embeds
//! the bytes into a field element first. The embedding prepends a `0x01` marker byte and reads
//! the result as a big-endian integer: the marker keeps leading `0x00` bytes of the secret from
//! vanishing when the integer is written back out, and gives decoding a mandatory prefix to
//! check. The raw variant without the marker is kept for the plain big-endian convention; it
//! cannot represent secrets that start with `0x00` and silently shortens them.

use math_lib::fields::{FieldElement, PrimeField};
use num_bigint::BigUint;

/// The secret does not fit in the field.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("secret too large for the field")]
pub struct SecretTooLarge;

/// The field element does not carry a marker-prefixed secret.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("malformed secret encoding")]
pub struct MalformedSecret;

const MARKER: u8 = 0x01;

/// Embeds secret bytes into a field element.
///
/// Fails when the marker-prefixed value does not fit below the field modulus; for the 521-bit
/// Mersenne field this admits every secret of up to 64 bytes.
pub fn encode_secret(field: &PrimeField, secret: &[u8]) -> Result<FieldElement, SecretTooLarge> {
    let mut bytes = Vec::with_capacity(secret.len().saturating_add(1));
    bytes.push(MARKER);
    bytes.extend_from_slice(secret);
    let value = BigUint::from_bytes_be(&bytes);
    if &value >= field.modulus() {
        return Err(SecretTooLarge);
    }
    Ok(field.element(value))
}

/// Recovers the secret bytes embedded in a field element.
///
/// Fails when the marker byte is missing, which is the common symptom of interpolating with
/// wrong or too few shards.
pub fn decode_secret(element: &FieldElement) -> Result<Vec<u8>, MalformedSecret> {
    let bytes = element.value().to_bytes_be();
    match bytes.split_first() {
        Some((&MARKER, secret)) => Ok(secret.to_vec()),
        _ => Err(MalformedSecret),
    }
}

/// Embeds secret bytes into a field element using the plain big-endian convention.
pub fn encode_secret_raw(field: &PrimeField, secret: &[u8]) -> Result<FieldElement, SecretTooLarge> {
    let value = BigUint::from_bytes_be(secret);
    if &value >= field.modulus() {
        return Err(SecretTooLarge);
    }
    Ok(field.element(value))
}

/// Writes a field element back out as plain big-endian bytes.
///
/// Leading `0x00` bytes of the original secret are not representable and do not come back.
pub fn decode_secret_raw(element: &FieldElement) -> Vec<u8> {
    element.value().to_bytes_be()
}
