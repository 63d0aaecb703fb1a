//! Point
use crate::fields::FieldElement;
use std::fmt::Debug;

/// Point
#[derive(Clone, PartialEq, Eq)]
pub struct Point {
    pub(crate) x: FieldElement,
    pub(crate) y: FieldElement,
}

impl Point {
    /// Creates a new point.
    pub fn new(x: FieldElement, y: FieldElement) -> Point {
        Point { x, y }
    }

    /// The abscissa of the point.
    pub fn x(&self) -> &FieldElement {
        &self.x
    }

    /// The ordinate of the point.
    pub fn y(&self) -> &FieldElement {
        &self.y
    }

    /// Consumes the point and returns the (x, y) coordinates in it.
    pub fn into_coordinates(self) -> (FieldElement, FieldElement) {
        (self.x, self.y)
    }
}

impl Debug for Point {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Point").field("x", &self.x).field("y", &self.y).finish()
    }
}
