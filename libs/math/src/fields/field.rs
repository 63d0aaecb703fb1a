//! Definitions for fields.

use crate::fields::element::{FieldElement, ParseError};
use num_bigint::{BigUint, RandBigInt};
use num_traits::{One, Zero};
use rand::{CryptoRng, Rng};
use std::{
    fmt::{Debug, Formatter},
    str::FromStr,
    sync::Arc,
};

/// A prime field defined by its modulus.
///
/// The handle is cheap to clone: every element of a field keeps one, and all of them share the
/// same underlying modulus allocation. Two fields compare equal when their moduli are equal,
/// with a pointer comparison as the fast path.
///
/// # Examples
///
/// ```
/// use math_lib::fields::{FieldOps, PrimeField};
/// use num_bigint::BigUint;
///
/// let field = PrimeField::new(BigUint::from(11u32));
/// let two = field.element(BigUint::from(2u32));
/// let six = field.element(BigUint::from(6u32));
///
/// assert_eq!(two.mul(&six), field.element(BigUint::from(1u32)));
/// ```
#[derive(Clone)]
pub struct PrimeField(Arc<BigUint>);

impl PrimeField {
    /// Creates a field with the given modulus.
    ///
    /// The modulus must be a prime number; arithmetic does not verify primality but inverses
    /// only exist when it holds. Panics if the modulus is smaller than 2.
    pub fn new(modulus: BigUint) -> Self {
        assert!(modulus > BigUint::one(), "modulus must be greater than one");
        Self(Arc::new(modulus))
    }

    /// The field over the Mersenne prime `2^521 - 1`.
    pub fn mersenne_521() -> Self {
        let modulus = (BigUint::one() << 521u32) - BigUint::one();
        Self(Arc::new(modulus))
    }

    /// The field modulus.
    pub fn modulus(&self) -> &BigUint {
        &self.0
    }

    /// Constructs an element of this field.
    ///
    /// The value is reduced into `[0, modulus)` so elements are always in canonical form.
    pub fn element(&self, value: BigUint) -> FieldElement {
        let value = if &value >= self.modulus() { value % self.modulus() } else { value };
        FieldElement::new_reduced(value, self.clone())
    }

    /// Constructs an element of this field from a u64.
    pub fn element_from_u64(&self, value: u64) -> FieldElement {
        self.element(BigUint::from(value))
    }

    /// Parses an element of this field from a decimal string.
    ///
    /// The parsed value is reduced into canonical form like [PrimeField::element] does.
    pub fn parse_element(&self, input: &str) -> Result<FieldElement, ParseError> {
        let parsed = BigUint::from_str(input).map_err(|_| ParseError)?;
        Ok(self.element(parsed))
    }

    /// The additive identity.
    pub fn zero(&self) -> FieldElement {
        FieldElement::new_reduced(BigUint::zero(), self.clone())
    }

    /// The multiplicative identity.
    pub fn one(&self) -> FieldElement {
        self.element(BigUint::one())
    }

    /// Generates a random element using the provided random number generator.
    ///
    /// The element is drawn uniformly from `[0, modulus)`.
    pub fn gen_random_element<R: Rng + CryptoRng>(&self, rng: &mut R) -> FieldElement {
        let value = rng.gen_biguint_below(self.modulus());
        FieldElement::new_reduced(value, self.clone())
    }
}

impl PartialEq for PrimeField {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0) || self.0 == other.0
    }
}

impl Eq for PrimeField {}

impl Debug for PrimeField {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "PrimeField({})", self.0)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::fields::element::FieldOps;
    use rstest::rstest;

    #[test]
    fn mersenne_modulus() {
        let field = PrimeField::mersenne_521();
        assert_eq!(field.modulus().bits(), 521);
        assert_eq!(field.modulus() + BigUint::one(), BigUint::one() << 521u32);
    }

    #[rstest]
    #[case(0, 0)]
    #[case(10, 10)]
    #[case(11, 0)]
    #[case(12, 1)]
    #[case(15, 4)]
    fn construction_mod_11(#[case] value: u64, #[case] expected: u64) {
        let field = PrimeField::new(BigUint::from(11u32));
        assert_eq!(field.element_from_u64(value), field.element_from_u64(expected));
    }

    #[test]
    fn field_equality() {
        let field = PrimeField::new(BigUint::from(11u32));
        assert_eq!(field, field.clone());
        assert_eq!(field, PrimeField::new(BigUint::from(11u32)));
        assert_ne!(field, PrimeField::new(BigUint::from(13u32)));
    }

    #[rstest]
    #[case::small("42")]
    #[case::larger("115792089237316195423570985008687907853269984665640564039457584007911397392386")]
    fn parse_valid_element(#[case] input: &str) {
        let field = PrimeField::mersenne_521();
        let parsed = field.parse_element(input).expect("parsing failed");
        assert_eq!(parsed, field.element(BigUint::from_str(input).expect("invalid input")));
    }

    #[rstest]
    #[case::empty("")]
    #[case::invalid_value("potato")]
    #[case::partially_invalid_value("42potato")]
    #[case::negative("-42")]
    fn parse_invalid_element(#[case] input: &str) {
        let field = PrimeField::mersenne_521();
        assert!(field.parse_element(input).is_err());
    }

    #[test]
    fn random_element_in_range() {
        let field = PrimeField::new(BigUint::from(11u32));
        let mut rng = rand::thread_rng();
        for _ in 0..100 {
            let element = field.gen_random_element(&mut rng);
            assert!(element.value() < field.modulus());
        }
    }

    #[test]
    fn one_times_one() {
        let field = PrimeField::new(BigUint::from(2u32));
        assert_eq!(field.one().mul(&field.one()), field.one());
    }
}
