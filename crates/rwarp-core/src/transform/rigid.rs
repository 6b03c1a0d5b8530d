//! Rigid transform implementation.
//!
//! This module provides a rigid transform (rotation + translation).

use std::any::Any;

use nalgebra::SMatrix;

use super::affine::AffineTransform;
use super::jacobian::PositionJacobian;
use super::matrix_offset::MatrixOffset;
use super::parameters::{ParameterStore, ParameterVector};
use super::trait_::Transform;
use crate::error::Result;
use crate::spatial::{Point, Vector};

/// Rigid Transform (Rotation + Translation).
///
/// Supports 2D (1 angle) and 3D (3 Euler angles, `R = Rz * Ry * Rx`); other
/// dimensions fall back to a rotation-free transform. Rotation happens about
/// a fixed center: `T(x) = R(x - c) + c + t`.
///
/// Parameters are the rotation angles followed by the D translation
/// components; the fixed parameters are the center coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct RigidTransform<const D: usize> {
    angles: [f64; 3],
    core: MatrixOffset<D>,
    store: ParameterStore,
}

impl<const D: usize> RigidTransform<D> {
    /// Number of rotation parameters for the dimension.
    pub const fn rotation_parameter_count() -> usize {
        match D {
            2 => 1,
            3 => 3,
            _ => 0,
        }
    }

    /// Create a new rigid transform.
    ///
    /// # Arguments
    /// * `angles` - Rotation angles in radians: 1 for 2D, 3 (x, y, z) for 3D
    /// * `translation` - The translation vector
    /// * `center` - The fixed center of rotation
    pub fn new(angles: &[f64], translation: Vector<D>, center: Point<D>) -> Self {
        assert!(
            angles.len() == Self::rotation_parameter_count(),
            "Rotation angle count must match dimension"
        );
        let mut all = [0.0; 3];
        all[..angles.len()].copy_from_slice(angles);

        let core = MatrixOffset::new(Self::rotation_matrix(&all), translation, center);
        let store = ParameterStore::from_vectors(
            Self::build_parameters(&all, &translation),
            ParameterVector::from_vec(center.to_vec()),
        );
        Self {
            angles: all,
            core,
            store,
        }
    }

    /// Create an identity rigid transform (no rotation, no translation).
    ///
    /// # Arguments
    /// * `center` - Optional center of rotation. If None, uses the origin.
    pub fn identity(center: Option<Point<D>>) -> Self {
        let angles = [0.0; 3];
        Self::new(
            &angles[..Self::rotation_parameter_count()],
            Vector::zeros(),
            center.unwrap_or_else(Point::origin),
        )
    }

    /// Get the rotation angles.
    pub fn angles(&self) -> &[f64] {
        &self.angles[..Self::rotation_parameter_count()]
    }

    /// Get the rotation matrix.
    pub fn matrix(&self) -> &SMatrix<f64, D, D> {
        self.core.matrix()
    }

    /// Get the translation vector.
    pub fn translation(&self) -> &Vector<D> {
        self.core.translation()
    }

    /// Get the center of rotation.
    pub fn center(&self) -> &Point<D> {
        self.core.center()
    }

    /// Build the rotation matrix from the angles.
    fn rotation_matrix(angles: &[f64; 3]) -> SMatrix<f64, D, D> {
        let mut matrix = SMatrix::<f64, D, D>::identity();
        if D == 2 {
            let (s, c) = angles[0].sin_cos();
            matrix[(0, 0)] = c;
            matrix[(0, 1)] = -s;
            matrix[(1, 0)] = s;
            matrix[(1, 1)] = c;
        } else if D == 3 {
            // Euler angles x (alpha), y (beta), z (gamma): R = Rz * Ry * Rx
            let (sx, cx) = angles[0].sin_cos();
            let (sy, cy) = angles[1].sin_cos();
            let (sz, cz) = angles[2].sin_cos();

            matrix[(0, 0)] = cz * cy;
            matrix[(0, 1)] = cz * sy * sx - sz * cx;
            matrix[(0, 2)] = cz * sy * cx + sz * sx;
            matrix[(1, 0)] = sz * cy;
            matrix[(1, 1)] = sz * sy * sx + cz * cx;
            matrix[(1, 2)] = sz * sy * cx - cz * sx;
            matrix[(2, 0)] = -sy;
            matrix[(2, 1)] = cy * sx;
            matrix[(2, 2)] = cy * cx;
        }
        matrix
    }

    fn build_parameters(angles: &[f64; 3], translation: &Vector<D>) -> ParameterVector {
        let rotation = Self::rotation_parameter_count();
        let mut parameters = ParameterVector::zeros(rotation + D);
        for k in 0..rotation {
            parameters[k] = angles[k];
        }
        for i in 0..D {
            parameters[rotation + i] = translation[i];
        }
        parameters
    }
}

impl<const D: usize> Transform<D, D> for RigidTransform<D> {
    fn transform_point(&self, point: &Point<D>) -> Point<D> {
        self.core.transform_point(point)
    }

    fn jacobian_with_respect_to_position(&self, _point: &Point<D>) -> PositionJacobian<D, D> {
        *self.core.matrix()
    }

    fn parameter_store(&self) -> &ParameterStore {
        &self.store
    }

    fn parameter_store_mut(&mut self) -> &mut ParameterStore {
        &mut self.store
    }

    fn parameters(&self) -> ParameterVector {
        Self::build_parameters(&self.angles, self.core.translation())
    }

    fn set_parameters(&mut self, parameters: &ParameterVector) -> Result<()> {
        self.store.assign_parameters(parameters.as_slice())?;

        let rotation = Self::rotation_parameter_count();
        for k in 0..rotation {
            self.angles[k] = parameters[k];
        }
        let mut translation = Vector::zeros();
        for i in 0..D {
            translation[i] = parameters[rotation + i];
        }
        self.core.set_matrix(Self::rotation_matrix(&self.angles));
        self.core.set_translation(translation);
        Ok(())
    }

    fn set_fixed_parameters(&mut self, parameters: &ParameterVector) -> Result<()> {
        self.store.assign_fixed_parameters(parameters.as_slice())?;
        self.core.set_center(Point::from_slice(parameters.as_slice()));
        Ok(())
    }

    fn is_linear(&self) -> bool {
        true
    }

    fn inverse(&self) -> Option<Box<dyn Transform<D, D>>> {
        self.core
            .inverse()
            .map(|core| Box::new(AffineTransform::from_core(core)) as Box<dyn Transform<D, D>>)
    }

    fn clone_boxed(&self) -> Box<dyn Transform<D, D>> {
        Box::new(self.clone())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn test_rigid_transform_2d_no_rotation() {
        let transform =
            RigidTransform::<2>::new(&[0.0], Vector::new([1.0, 2.0]), Point::origin());

        let p = transform.transform_point(&Point::new([0.0, 0.0]));
        assert_eq!(p, Point::new([1.0, 2.0]));

        let q = transform.transform_point(&Point::new([1.0, 1.0]));
        assert_eq!(q, Point::new([2.0, 3.0]));
    }

    #[test]
    fn test_rigid_transform_2d_rotation() {
        // 90 degrees: (1, 0) -> (0, 1)
        let transform =
            RigidTransform::<2>::new(&[FRAC_PI_2], Vector::zeros(), Point::origin());
        let p = transform.transform_point(&Point::new([1.0, 0.0]));
        assert!((p[0] - 0.0).abs() < 1e-12);
        assert!((p[1] - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_rigid_transform_3d_rotation_z() {
        // 90 degrees around Z: (1, 0, 0) -> (0, 1, 0)
        let transform = RigidTransform::<3>::new(
            &[0.0, 0.0, FRAC_PI_2],
            Vector::zeros(),
            Point::origin(),
        );
        let p = transform.transform_point(&Point::new([1.0, 0.0, 0.0]));
        assert!((p[0] - 0.0).abs() < 1e-12);
        assert!((p[1] - 1.0).abs() < 1e-12);
        assert!((p[2] - 0.0).abs() < 1e-12);
    }

    #[test]
    fn test_rigid_parameter_layout() {
        let transform = RigidTransform::<2>::new(
            &[0.5],
            Vector::new([1.0, 2.0]),
            Point::new([3.0, 4.0]),
        );
        assert_eq!(transform.number_of_parameters(), 3);
        assert_eq!(transform.parameters().as_slice(), &[0.5, 1.0, 2.0]);
        assert_eq!(transform.fixed_parameters().as_slice(), &[3.0, 4.0]);
        assert_eq!(transform.angles(), &[0.5]);
        assert_eq!(transform.translation(), &Vector::new([1.0, 2.0]));
        assert_eq!(transform.center(), &Point::new([3.0, 4.0]));
    }

    #[test]
    fn test_rigid_set_parameters_rebuilds_rotation() {
        let mut transform = RigidTransform::<2>::identity(None);
        transform
            .set_parameters(&ParameterVector::from_vec(vec![FRAC_PI_2, 0.0, 0.0]))
            .unwrap();
        let p = transform.transform_point(&Point::new([1.0, 0.0]));
        assert!((p[0] - 0.0).abs() < 1e-12);
        assert!((p[1] - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_rigid_inverse_roundtrip() {
        let transform = RigidTransform::<3>::new(
            &[0.2, -0.4, 0.7],
            Vector::new([1.0, 2.0, 3.0]),
            Point::new([5.0, 5.0, 5.0]),
        );
        let inverse = transform.inverse().unwrap();
        let p = Point::new([2.0, -1.0, 0.5]);
        let roundtrip = inverse.transform_point(&transform.transform_point(&p));
        for i in 0..3 {
            assert!(
                (roundtrip[i] - p[i]).abs() < 1e-12,
                "coordinate {}: {} vs {}",
                i,
                roundtrip[i],
                p[i]
            );
        }
    }

    #[test]
    fn test_rigid_rotation_matrix_is_orthogonal() {
        let transform = RigidTransform::<3>::new(
            &[0.3, 0.6, -0.9],
            Vector::zeros(),
            Point::origin(),
        );
        let r = transform.matrix();
        let product = r * r.transpose();
        for i in 0..3 {
            for j in 0..3 {
                let expected = if i == j { 1.0 } else { 0.0 };
                assert!((product[(i, j)] - expected).abs() < 1e-12);
            }
        }
    }
}
