//! Finite Fields in number theory.

pub mod element;
pub mod field;

pub use element::{FieldElement, FieldOps, ParseError};
pub use field::PrimeField;
