//! Field elements and their arithmetic.

use crate::{errors::DivByZero, fields::field::PrimeField};
use num_bigint::BigUint;
use num_traits::Zero;
use std::fmt::{Debug, Display, Formatter};

/// Modular arithmetic on field elements.
///
/// Every operation reduces its result into the canonical `[0, modulus)` range. Binary
/// operations require both operands to belong to the same field and assert that their moduli
/// are equal; mixing fields is a programming error, not a recoverable condition.
pub trait FieldOps: Sized {
    /// Modular addition.
    fn add(&self, other: &Self) -> Self;

    /// Modular subtraction.
    fn sub(&self, other: &Self) -> Self;

    /// Modular multiplication.
    fn mul(&self, other: &Self) -> Self;

    /// Modular exponentiation.
    fn pow(&self, exponent: &BigUint) -> Self;

    /// Multiplicative inverse.
    ///
    /// Fails with [DivByZero] for the zero element, which has no inverse.
    fn inverse(&self) -> Result<Self, DivByZero>;
}

/// An element of a prime field.
///
/// The value is kept fully reduced modulo the field's modulus from construction onwards, so
/// equality is plain value equality.
///
/// # Examples
///
/// ```
/// use math_lib::fields::{FieldOps, PrimeField};
/// use num_bigint::BigUint;
///
/// let field = PrimeField::new(BigUint::from(11u32));
/// let two = field.element(BigUint::from(2u32));
/// let three = two.add(&field.element(BigUint::from(1u32)));
/// let six = three.mul(&two);
///
/// assert_eq!(six, field.element(BigUint::from(6u32)));
/// ```
#[derive(Clone)]
pub struct FieldElement {
    value: BigUint,
    field: PrimeField,
}

impl FieldElement {
    /// Constructs an element from a value already reduced into `[0, modulus)`.
    pub(crate) fn new_reduced(value: BigUint, field: PrimeField) -> Self {
        Self { value, field }
    }

    /// The field this element belongs to.
    pub fn field(&self) -> &PrimeField {
        &self.field
    }

    /// The canonical value of this element.
    pub fn value(&self) -> &BigUint {
        &self.value
    }

    /// Consume the element and return its canonical value.
    pub fn into_value(self) -> BigUint {
        self.value
    }

    /// Check if this element is zero.
    pub fn is_zero(&self) -> bool {
        self.value.is_zero()
    }

    fn assert_same_field(&self, other: &Self) {
        assert_eq!(self.field, other.field, "field elements have mismatched moduli");
    }
}

impl FieldOps for FieldElement {
    fn add(&self, other: &Self) -> Self {
        self.assert_same_field(other);
        let value = (&self.value + &other.value) % self.field.modulus();
        Self { value, field: self.field.clone() }
    }

    fn sub(&self, other: &Self) -> Self {
        self.assert_same_field(other);
        let value = (&self.value + self.field.modulus() - &other.value) % self.field.modulus();
        Self { value, field: self.field.clone() }
    }

    fn mul(&self, other: &Self) -> Self {
        self.assert_same_field(other);
        let value = (&self.value * &other.value) % self.field.modulus();
        Self { value, field: self.field.clone() }
    }

    fn pow(&self, exponent: &BigUint) -> Self {
        let value = self.value.modpow(exponent, self.field.modulus());
        Self { value, field: self.field.clone() }
    }

    fn inverse(&self) -> Result<Self, DivByZero> {
        if self.is_zero() {
            return Err(DivByZero);
        }
        let exponent = self.field.modulus() - 2u32;
        Ok(self.pow(&exponent))
    }
}

impl PartialEq for FieldElement {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value && self.field == other.field
    }
}

impl Eq for FieldElement {}

// String conversions.

impl Debug for FieldElement {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} mod {}", self.value, self.field.modulus())
    }
}

impl Display for FieldElement {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.value)
    }
}

impl From<&FieldElement> for BigUint {
    fn from(element: &FieldElement) -> Self {
        element.value.clone()
    }
}

/// An error when parsing a field element.
#[derive(Debug, thiserror::Error, Eq, PartialEq)]
#[error("invalid digits")]
pub struct ParseError;

#[cfg(test)]
mod test {
    use super::*;
    use rstest::rstest;

    fn field(modulus: u64) -> PrimeField {
        PrimeField::new(BigUint::from(modulus))
    }

    #[rstest]
    #[case(3, 5, 8)]
    #[case(6, 5, 0)]
    #[case(9, 9, 7)]
    fn addition_mod_11(#[case] left: u64, #[case] right: u64, #[case] expected: u64) {
        let field = field(11);
        let result = field.element_from_u64(left).add(&field.element_from_u64(right));
        assert_eq!(result, field.element_from_u64(expected));
    }

    #[rstest]
    #[case(5, 3, 2)]
    #[case(3, 5, 9)]
    #[case(0, 1, 10)]
    #[case(7, 7, 0)]
    fn subtraction_mod_11(#[case] left: u64, #[case] right: u64, #[case] expected: u64) {
        let field = field(11);
        let result = field.element_from_u64(left).sub(&field.element_from_u64(right));
        assert_eq!(result, field.element_from_u64(expected));
    }

    #[rstest]
    #[case(3, 5, 4)]
    #[case(6, 0, 0)]
    #[case(10, 10, 1)]
    fn multiplication_mod_11(#[case] left: u64, #[case] right: u64, #[case] expected: u64) {
        let field = field(11);
        let result = field.element_from_u64(left).mul(&field.element_from_u64(right));
        assert_eq!(result, field.element_from_u64(expected));
    }

    #[rstest]
    #[case(2, 5, 10)]
    #[case(3, 0, 1)]
    #[case(7, 10, 1)]
    fn exponentiation_mod_11(#[case] base: u64, #[case] exponent: u64, #[case] expected: u64) {
        let field = field(11);
        let result = field.element_from_u64(base).pow(&BigUint::from(exponent));
        assert_eq!(result, field.element_from_u64(expected));
    }

    #[test]
    fn inverses_mod_11() {
        let field = field(11);
        for value in 1..11 {
            let element = field.element_from_u64(value);
            let inverse = element.inverse().expect("inverse failed");
            assert_eq!(element.mul(&inverse), field.one(), "{value} * {inverse} != 1");
        }
    }

    #[test]
    fn zero_has_no_inverse() {
        let field = field(11);
        assert_eq!(field.zero().inverse(), Err(DivByZero));
    }

    #[test]
    fn inverse_in_large_field() {
        let field = PrimeField::mersenne_521();
        let element = field.element_from_u64(123456789);
        let inverse = element.inverse().expect("inverse failed");
        assert_eq!(element.mul(&inverse), field.one());
    }

    #[test]
    #[should_panic(expected = "mismatched moduli")]
    fn mismatched_moduli() {
        let left = field(11).element_from_u64(1);
        let right = field(13).element_from_u64(1);
        left.add(&right);
    }

    #[test]
    fn formatting() {
        let element = field(11).element_from_u64(42);
        assert_eq!(element.to_string(), "9");
        assert_eq!(format!("{element:?}"), "9 mod 11");
    }

    #[test]
    fn string_round_trip() {
        let field = PrimeField::mersenne_521();
        let value = "16045690985374408367";
        let parsed = field.parse_element(value).expect("parsing failed");
        assert_eq!(parsed.to_string(), value);
    }
}
