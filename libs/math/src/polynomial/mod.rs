//! Polynomial operations

pub mod point;
pub mod point_sequence;
pub mod polynomial;

pub use point::Point;
pub use point_sequence::PointSequence;
pub use polynomial::*;
