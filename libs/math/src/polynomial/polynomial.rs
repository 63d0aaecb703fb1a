//! Polynomial in Finite Field.

use crate::fields::{FieldElement, FieldOps, PrimeField};
use rand::{CryptoRng, Rng};

/// Polynomial Expression.
///
/// Coefficients are ordered by ascending degree: index 0 holds the constant term.
#[derive(Debug, Clone, PartialEq)]
pub struct Polynomial {
    /// Coefficients of the polynomial.
    coefficients: Vec<FieldElement>,
}

impl Polynomial {
    /// Creates a new polynomial expression.
    pub fn new(coefficients: Vec<FieldElement>) -> Polynomial {
        Polynomial { coefficients }
    }

    /// Creates a random polynomial of the given degree with a fixed constant term.
    ///
    /// The coefficients for degrees 1 through `degree` are drawn independently and uniformly
    /// at random from the constant term's field.
    pub fn random<R: Rng + CryptoRng>(constant: FieldElement, degree: usize, rng: &mut R) -> Polynomial {
        let field: PrimeField = constant.field().clone();
        let mut coefficients = Vec::with_capacity(degree.saturating_add(1));
        coefficients.push(constant);
        for _ in 0..degree {
            coefficients.push(field.gen_random_element(rng));
        }
        Polynomial { coefficients }
    }

    /// Get coefficients.
    pub fn coefficients(&self) -> &[FieldElement] {
        &self.coefficients
    }

    /// Get the constant term, if any.
    pub fn constant_term(&self) -> Option<&FieldElement> {
        self.coefficients.first()
    }

    /// Get the degree of the polynomial.
    pub fn degree(&self) -> usize {
        self.coefficients.len().saturating_sub(1)
    }

    /// Evaluates the polynomial at a given x using Horner's method.
    pub fn eval(&self, x: &FieldElement) -> FieldElement {
        let mut eval = x.field().zero();
        for coefficient in self.coefficients.iter().rev() {
            eval = eval.mul(x).add(coefficient);
        }
        eval
    }
}
