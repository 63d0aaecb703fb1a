//! Point Sequence.

use crate::{
    errors::InterpolationError,
    fields::{FieldElement, FieldOps},
    polynomial::point::Point,
};
use std::collections::HashSet;

/// Point sequence.
#[derive(Clone, Debug, Default)]
pub struct PointSequence {
    points: Vec<Point>,
}

impl PointSequence {
    /// Get the points in the sequence.
    pub fn points(&self) -> &Vec<Point> {
        &self.points
    }

    /// Consume the point sequence and return the points in it.
    pub fn into_points(self) -> Vec<Point> {
        self.points
    }

    /// Check if points is empty.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// The number of points in the sequence.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Checks if there are any duplicated abscissas.
    pub fn has_duplicates(&self) -> bool {
        let mut x_set = HashSet::new();
        for p in self.points.iter() {
            x_set.insert(p.x.value());
        }
        x_set.len() != self.points.len()
    }

    /// Add a point to the point sequence.
    pub fn push(&mut self, point: Point) {
        self.points.push(point)
    }

    /// Lagrange interpolation for Point Sequence at Zero.
    ///
    /// Computes the value at x = 0 of the unique polynomial of degree `len() - 1` passing
    /// through every point. The sequence must be non-empty and its abscissas pairwise
    /// distinct.
    pub fn interpolate_at_zero(&self) -> Result<FieldElement, InterpolationError> {
        let first = self.points.first().ok_or(InterpolationError::EmptySequence)?;
        if self.has_duplicates() {
            return Err(InterpolationError::DuplicateAbscissas);
        }

        let field = first.x.field().clone();
        let mut res = field.zero();

        for (i, pi) in self.points().iter().enumerate() {
            let mut num = field.one();
            let mut den = field.one();
            for (j, pj) in self.points().iter().enumerate() {
                if j != i {
                    num = num.mul(&pj.x);
                    den = den.mul(&pj.x.sub(&pi.x));
                }
            }
            let basis = num.mul(&den.inverse()?);
            res = res.add(&basis.mul(&pi.y));
        }
        Ok(res)
    }
}
