//! Point type for representing spatial coordinates.
//!
//! Points represent positions in physical space.

use super::Vector;
use nalgebra::Point as NaPoint;
use serde::{Deserialize, Serialize};

/// A point in D-dimensional space.
///
/// Points represent positions in physical coordinate systems.
/// Used for image origins, centers of rotation, and as the query
/// locations at which transforms and their differentials are evaluated.
///
/// This is a thin wrapper around nalgebra's Point to provide
/// domain-specific functionality while maintaining all nalgebra operations.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point<const D: usize>(pub NaPoint<f64, D>);

impl<const D: usize> Point<D> {
    /// Create a new point from coordinates.
    pub fn new(coords: [f64; D]) -> Self {
        Self(NaPoint::from(coords))
    }

    /// Create a point at the origin (all coordinates zero).
    pub fn origin() -> Self {
        Self(NaPoint::origin())
    }

    /// Create a new point from a slice of coordinates.
    pub fn from_slice(coords: &[f64]) -> Self {
        assert!(
            coords.len() == D,
            "Coordinate slice length must match dimension"
        );
        let mut point = Self::origin();
        for i in 0..D {
            point.0.coords[i] = coords[i];
        }
        point
    }

    /// Convert point to a vector of coordinates.
    pub fn to_vec(&self) -> Vec<f64> {
        (0..D).map(|i| self.0.coords[i]).collect()
    }

    /// Get the inner nalgebra point.
    pub fn inner(&self) -> &NaPoint<f64, D> {
        &self.0
    }

    /// Get mutable reference to inner nalgebra point.
    pub fn inner_mut(&mut self) -> &mut NaPoint<f64, D> {
        &mut self.0
    }
}

impl<const D: usize> std::ops::Index<usize> for Point<D> {
    type Output = f64;

    fn index(&self, index: usize) -> &Self::Output {
        &self.0.coords[index]
    }
}

impl<const D: usize> std::ops::IndexMut<usize> for Point<D> {
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        &mut self.0.coords[index]
    }
}

impl<const D: usize> std::ops::Sub for Point<D> {
    type Output = Vector<D>;

    fn sub(self, other: Self) -> Self::Output {
        Vector(self.0.coords - other.0.coords)
    }
}

impl<const D: usize> std::ops::Add<Vector<D>> for Point<D> {
    type Output = Self;

    fn add(self, vector: Vector<D>) -> Self::Output {
        Self(self.0 + vector.0)
    }
}
