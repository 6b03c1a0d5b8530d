//! Shared matrix+offset core for the linear transform family.
//!
//! Rigid and affine transforms all map a point as `A(x - c) + c + t` for a
//! matrix `A`, a fixed center `c`, and a translation `t`. This value object
//! holds that state once, with the derived offset `t + c - A * c` kept in sync,
//! so each variant composes it instead of inheriting it.

use crate::spatial::{Point, Vector};
use nalgebra::SMatrix;

/// Matrix, center, translation, and the derived offset of a linear mapping.
///
/// The mapping is `T(x) = A * x + offset` with `offset = t + c - A * c`,
/// equivalent to `A(x - c) + c + t`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatrixOffset<const D: usize> {
    matrix: SMatrix<f64, D, D>,
    center: Point<D>,
    translation: Vector<D>,
    offset: Vector<D>,
}

impl<const D: usize> MatrixOffset<D> {
    /// Create a core from matrix, translation, and fixed center.
    pub fn new(matrix: SMatrix<f64, D, D>, translation: Vector<D>, center: Point<D>) -> Self {
        let mut core = Self {
            matrix,
            center,
            translation,
            offset: Vector::zeros(),
        };
        core.compute_offset();
        core
    }

    /// The identity mapping centered at the origin.
    pub fn identity() -> Self {
        Self::new(SMatrix::identity(), Vector::zeros(), Point::origin())
    }

    /// The linear part.
    pub fn matrix(&self) -> &SMatrix<f64, D, D> {
        &self.matrix
    }

    /// The fixed center.
    pub fn center(&self) -> &Point<D> {
        &self.center
    }

    /// The translation.
    pub fn translation(&self) -> &Vector<D> {
        &self.translation
    }

    /// The derived offset `t + c - A * c`.
    pub fn offset(&self) -> &Vector<D> {
        &self.offset
    }

    /// Replace the linear part, recomputing the offset.
    pub fn set_matrix(&mut self, matrix: SMatrix<f64, D, D>) {
        self.matrix = matrix;
        self.compute_offset();
    }

    /// Replace the center, recomputing the offset.
    pub fn set_center(&mut self, center: Point<D>) {
        self.center = center;
        self.compute_offset();
    }

    /// Replace the translation, recomputing the offset.
    pub fn set_translation(&mut self, translation: Vector<D>) {
        self.translation = translation;
        self.compute_offset();
    }

    fn compute_offset(&mut self) {
        let center = self.center.0.coords;
        self.offset = Vector(self.translation.0 + center - self.matrix * center);
    }

    /// Apply the mapping to a point.
    pub fn transform_point(&self, point: &Point<D>) -> Point<D> {
        Point(nalgebra::Point::from(
            self.matrix * point.0.coords + self.offset.0,
        ))
    }

    /// Apply the linear part to a vector.
    pub fn transform_vector(&self, vector: &Vector<D>) -> Vector<D> {
        Vector(self.matrix * vector.0)
    }

    /// The inverse mapping's core, if the matrix is non-singular.
    ///
    /// The inverse is `x = A^-1 * y - A^-1 * offset`, expressed with its center at
    /// the origin.
    pub fn inverse(&self) -> Option<Self> {
        let inverse_matrix = self.matrix.try_inverse()?;
        Some(Self::new(
            inverse_matrix,
            Vector(-(inverse_matrix * self.offset.0)),
            Point::origin(),
        ))
    }
}

impl<const D: usize> Default for MatrixOffset<D> {
    fn default() -> Self {
        Self::identity()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_maps_points_unchanged() {
        let core = MatrixOffset::<3>::identity();
        let p = Point::new([1.0, 2.0, 3.0]);
        assert_eq!(core.transform_point(&p), p);
    }

    #[test]
    fn test_centered_form_equivalence() {
        // T(x) = A(x - c) + c + t must equal A.x + offset
        let matrix = SMatrix::<f64, 2, 2>::new(2.0, 0.5, 0.0, 3.0);
        let translation = Vector::new([1.0, -1.0]);
        let center = Point::new([10.0, 20.0]);
        let core = MatrixOffset::new(matrix, translation, center);

        let x = Point::new([4.0, 5.0]);
        let centered = Vector(matrix * (x.0.coords - center.0.coords));
        let expected = Point(nalgebra::Point::from(
            centered.0 + center.0.coords + translation.0,
        ));
        let actual = core.transform_point(&x);

        assert!((actual[0] - expected[0]).abs() < 1e-12);
        assert!((actual[1] - expected[1]).abs() < 1e-12);

        // offset = t + c - A * c
        let offset = Vector(translation.0 + center.0.coords - matrix * center.0.coords);
        assert_eq!(core.offset(), &offset);
    }

    #[test]
    fn test_transform_vector_applies_linear_part_only() {
        let matrix = SMatrix::<f64, 2, 2>::new(2.0, 0.0, 0.0, 3.0);
        let core = MatrixOffset::new(matrix, Vector::new([5.0, 5.0]), Point::new([1.0, 2.0]));

        // Translation and center do not act on vectors.
        let v = core.transform_vector(&Vector::new([1.0, 1.0]));
        assert_eq!(v, Vector::new([2.0, 3.0]));
    }

    #[test]
    fn test_point_at_center_moves_by_translation() {
        let matrix = SMatrix::<f64, 2, 2>::new(0.0, -1.0, 1.0, 0.0);
        let translation = Vector::new([1.0, 1.0]);
        let center = Point::new([10.0, 10.0]);
        let core = MatrixOffset::new(matrix, translation, center);

        // T(c) = c + t
        let mapped = core.transform_point(&center);
        assert_eq!(mapped, Point::new([11.0, 11.0]));
    }

    #[test]
    fn test_inverse_roundtrip() {
        let matrix = SMatrix::<f64, 2, 2>::new(2.0, 1.0, 0.0, 0.5);
        let core = MatrixOffset::new(matrix, Vector::new([3.0, -2.0]), Point::new([1.0, 1.0]));
        let inverse = core.inverse().unwrap();

        let p = Point::new([0.25, -4.0]);
        let roundtrip = inverse.transform_point(&core.transform_point(&p));
        assert!((roundtrip[0] - p[0]).abs() < 1e-12);
        assert!((roundtrip[1] - p[1]).abs() < 1e-12);
    }

    #[test]
    fn test_singular_matrix_has_no_inverse() {
        let matrix = SMatrix::<f64, 2, 2>::new(1.0, 2.0, 2.0, 4.0);
        let core = MatrixOffset::new(matrix, Vector::zeros(), Point::origin());
        assert!(core.inverse().is_none());
    }
}
