//! Affine transform implementation.
//!
//! This module provides an affine transform (linear transformation + translation).

use std::any::Any;

use nalgebra::SMatrix;

use super::jacobian::PositionJacobian;
use super::matrix_offset::MatrixOffset;
use super::parameters::{ParameterStore, ParameterVector};
use super::trait_::Transform;
use crate::error::Result;
use crate::spatial::{Point, Vector};

/// Affine Transform (Linear transformation + Translation).
///
/// Represents a general affine transformation with a fixed center:
/// `T(x) = A(x - c) + c + t`
///
/// where:
/// * A is a D×D matrix (linear transformation: rotation, scale, shear)
/// * t is a D-dimensional translation vector
/// * c is a D-dimensional fixed center of rotation/scaling
///
/// Parameters are the D*D matrix entries in row-major order followed by the
/// D translation components; the fixed parameters are the center
/// coordinates. The matrix core, not the stored vector, is the source of
/// truth: `parameters()` rebuilds the vector from it.
#[derive(Debug, Clone, PartialEq)]
pub struct AffineTransform<const D: usize> {
    core: MatrixOffset<D>,
    store: ParameterStore,
}

impl<const D: usize> AffineTransform<D> {
    /// Create a new affine transform.
    ///
    /// # Arguments
    /// * `matrix` - The D×D linear transformation matrix
    /// * `translation` - The translation vector
    /// * `center` - The fixed center
    pub fn new(matrix: SMatrix<f64, D, D>, translation: Vector<D>, center: Point<D>) -> Self {
        Self::from_core(MatrixOffset::new(matrix, translation, center))
    }

    /// Create an identity affine transform.
    ///
    /// # Arguments
    /// * `center` - Optional center of rotation. If None, uses the origin.
    pub fn identity(center: Option<Point<D>>) -> Self {
        Self::new(
            SMatrix::identity(),
            Vector::zeros(),
            center.unwrap_or_else(Point::origin),
        )
    }

    /// Create an affine transform around an existing matrix+offset core.
    pub fn from_core(core: MatrixOffset<D>) -> Self {
        let store = ParameterStore::from_vectors(
            Self::build_parameters(&core),
            ParameterVector::from_vec(core.center().to_vec()),
        );
        Self { core, store }
    }

    /// Get the transformation matrix.
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

    fn build_parameters(core: &MatrixOffset<D>) -> ParameterVector {
        let mut parameters = ParameterVector::zeros(D * D + D);
        for i in 0..D {
            for j in 0..D {
                parameters[i * D + j] = core.matrix()[(i, j)];
            }
        }
        for i in 0..D {
            parameters[D * D + i] = core.translation()[i];
        }
        parameters
    }
}

impl<const D: usize> Transform<D, D> for AffineTransform<D> {
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
        Self::build_parameters(&self.core)
    }

    fn set_parameters(&mut self, parameters: &ParameterVector) -> Result<()> {
        self.store.assign_parameters(parameters.as_slice())?;

        let mut matrix = SMatrix::<f64, D, D>::zeros();
        for i in 0..D {
            for j in 0..D {
                matrix[(i, j)] = parameters[i * D + j];
            }
        }
        let mut translation = Vector::zeros();
        for i in 0..D {
            translation[i] = parameters[D * D + i];
        }
        self.core.set_matrix(matrix);
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
            .map(|core| Box::new(Self::from_core(core)) as Box<dyn Transform<D, D>>)
    }

    fn clone_boxed(&self) -> Box<dyn Transform<D, D>> {
        Box::new(self.clone())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
