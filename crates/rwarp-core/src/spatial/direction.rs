//! Direction type for representing image orientation.
//!
//! Direction matrices represent orientation of image axes in physical space.

use super::Vector;
use nalgebra::SMatrix;
use serde::{Deserialize, Serialize};

/// Direction matrix representing image orientation.
///
/// The direction matrix is a D×D matrix where each column represents the
/// direction of the corresponding image axis in physical space.
///
/// This is a thin wrapper around nalgebra's SMatrix to provide
/// domain-specific functionality while maintaining all nalgebra operations.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Direction<const D: usize>(pub SMatrix<f64, D, D>);

impl<const D: usize> Direction<D> {
    /// Create an identity direction matrix (no rotation).
    pub fn identity() -> Self {
        Self(SMatrix::identity())
    }

    /// Check if the direction matrix is orthogonal (rotation or reflection).
    pub fn is_orthogonal(&self) -> bool {
        let product = self.0 * self.0.transpose();
        let identity = Self::identity();
        (0..D).all(|i| (0..D).all(|j| (product[(i, j)] - identity.0[(i, j)]).abs() < 1e-6))
    }

    /// Get the direction of the i-th image axis as a vector (column i).
    pub fn axis_direction(&self, axis: usize) -> Vector<D> {
        let mut v = Vector::zeros();
        for k in 0..D {
            v[k] = self.0[(k, axis)];
        }
        v
    }

    /// Get the inner nalgebra matrix.
    pub fn inner(&self) -> &SMatrix<f64, D, D> {
        &self.0
    }

    /// Get mutable reference to inner nalgebra matrix.
    pub fn inner_mut(&mut self) -> &mut SMatrix<f64, D, D> {
        &mut self.0
    }
}

impl<const D: usize> std::ops::Index<(usize, usize)> for Direction<D> {
    type Output = f64;

    fn index(&self, index: (usize, usize)) -> &Self::Output {
        &self.0[index]
    }
}

impl<const D: usize> std::ops::IndexMut<(usize, usize)> for Direction<D> {
    fn index_mut(&mut self, index: (usize, usize)) -> &mut Self::Output {
        &mut self.0[index]
    }
}

impl<const D: usize> std::ops::Mul<Vector<D>> for Direction<D> {
    type Output = Vector<D>;

    fn mul(self, vector: Vector<D>) -> Self::Output {
        Vector(self.0 * vector.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Type aliases for testing
    type Direction3 = Direction<3>;
    type Vector3 = Vector<3>;

    #[test]
    fn test_direction_identity() {
        let d = Direction3::identity();
        assert_eq!(d[(0, 0)], 1.0);
        assert_eq!(d[(1, 1)], 1.0);
        assert_eq!(d[(2, 2)], 1.0);
        assert_eq!(d[(0, 1)], 0.0);
    }

    #[test]
    fn test_direction_is_orthogonal() {
        let identity = Direction3::identity();
        assert!(identity.is_orthogonal());

        // 90 degrees around Z
        let mut rot = Direction3::identity();
        rot[(0, 0)] = 0.0;
        rot[(0, 1)] = -1.0;
        rot[(1, 0)] = 1.0;
        rot[(1, 1)] = 0.0;
        assert!(rot.is_orthogonal());

        let mut sheared = Direction3::identity();
        sheared[(0, 1)] = 0.5;
        assert!(!sheared.is_orthogonal());
    }

    #[test]
    fn test_direction_axis_direction() {
        let identity = Direction3::identity();
        assert_eq!(identity.axis_direction(0), Vector3::new([1.0, 0.0, 0.0]));
        assert_eq!(identity.axis_direction(1), Vector3::new([0.0, 1.0, 0.0]));
        assert_eq!(identity.axis_direction(2), Vector3::new([0.0, 0.0, 1.0]));
    }
}
