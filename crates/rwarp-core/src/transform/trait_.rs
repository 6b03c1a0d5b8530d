//! Transform trait for spatial coordinate transformations.
//!
//! This module defines the core Transform trait that all spatial transforms
//! must implement, together with the differential machinery provided on top
//! of it: vector and covariant-vector transport, diffusion-tensor
//! reorientation, symmetric-tensor conjugation, and the parameter-update
//! protocol driven by an external optimizer.

use std::any::Any;

use nalgebra::SMatrix;

use crate::error::{Result, TransformError};
use crate::spatial::{CovariantVector, DiffusionTensor3, Point, SymmetricTensor, Vector};

use super::jacobian::{pseudo_invert, InversePositionJacobian, PositionJacobian};
use super::parameters::{ParameterStore, ParameterVector};

/// Transform trait for spatial coordinate transformations.
///
/// Maps points from one physical space to another and propagates directional
/// and tensor quantities through the mapping's local differential. All
/// transforms must implement this trait to be used in registration.
///
/// Implementors supply the point mapping, the forward Jacobian at a point,
/// and the interpretation of raw parameter values into internal state;
/// everything else is provided. Evaluation methods (`transform_*`,
/// `jacobian_*`) are pure functions of current state and the supplied point
/// with no per-call cache, so a single instance is safe for concurrent
/// read-only evaluation; mutation (`set_*`, `update_parameters`,
/// `copy_in_*`) takes `&mut self` and must not overlap with other use.
///
/// # Type Parameters
/// * `IN` - Dimension of the input space
/// * `OUT` - Dimension of the output space (may differ from `IN`)
pub trait Transform<const IN: usize, const OUT: usize> {
    /// Apply the transform to a point.
    fn transform_point(&self, point: &Point<IN>) -> Point<OUT>;

    /// The forward differential of the mapping at `point`.
    ///
    /// Pure function of the parameters, the fixed parameters, and the point.
    /// Position-independent (globally linear) transforms return the same
    /// matrix for every point; non-linear variants vary per point.
    fn jacobian_with_respect_to_position(&self, point: &Point<IN>) -> PositionJacobian<IN, OUT>;

    /// The parameter store owned by this transform.
    fn parameter_store(&self) -> &ParameterStore;

    /// Mutable access to the parameter store.
    fn parameter_store_mut(&mut self) -> &mut ParameterStore;

    /// Interpret a raw parameter vector into transform state.
    ///
    /// Fails with a size mismatch (and no mutation) when the length is
    /// wrong; otherwise the store and any derived internal state (rotation
    /// matrices, offsets, ...) are rebuilt from the new values.
    fn set_parameters(&mut self, parameters: &ParameterVector) -> Result<()>;

    /// Interpret a raw fixed-parameter vector (e.g. a center of rotation).
    fn set_fixed_parameters(&mut self, parameters: &ParameterVector) -> Result<()>;

    /// Deep copy with identical parameter state and no shared ownership.
    fn clone_boxed(&self) -> Box<dyn Transform<IN, OUT>>;

    /// Upcast for concrete-type recovery; see [`downcast_clone`].
    fn as_any(&self) -> &dyn Any;

    /// The transform's parameters.
    ///
    /// For transforms whose internal state, not the stored vector, is the
    /// source of truth, this rebuilds the vector from that state.
    fn parameters(&self) -> ParameterVector {
        self.parameter_store().parameters().clone()
    }

    /// The transform's fixed parameters.
    fn fixed_parameters(&self) -> ParameterVector {
        self.parameter_store().fixed_parameters().clone()
    }

    /// Number of optimizable parameters.
    fn number_of_parameters(&self) -> usize {
        self.parameter_store().parameters().len()
    }

    /// Whether the mapping is linear in its input point.
    fn is_linear(&self) -> bool {
        false
    }

    /// The inverse transform, if one exists.
    fn inverse(&self) -> Option<Box<dyn Transform<OUT, IN>>> {
        None
    }

    /// The inverse differential at `point`, via SVD pseudo-inverse of the
    /// forward Jacobian. Recomputed on every call; an ill-conditioned
    /// Jacobian degrades silently rather than failing.
    fn inverse_jacobian_with_respect_to_position(
        &self,
        point: &Point<IN>,
    ) -> InversePositionJacobian<IN, OUT> {
        pseudo_invert(&self.jacobian_with_respect_to_position(point))
    }

    /// Map a (contravariant) vector through the differential at `point`.
    ///
    /// Only the Jacobian acts; no translation term is applied.
    fn transform_vector(&self, vector: &Vector<IN>, point: &Point<IN>) -> Vector<OUT> {
        let jacobian = self.jacobian_with_respect_to_position(point);
        let mut result = Vector::zeros();
        for i in 0..OUT {
            for j in 0..IN {
                result[i] += jacobian[(i, j)] * vector[j];
            }
        }
        result
    }

    /// Variable-length counterpart of [`Transform::transform_vector`].
    ///
    /// Fails with a size error unless `vector` has exactly `IN` components.
    fn transform_vector_dyn(&self, vector: &[f64], point: &Point<IN>) -> Result<Vec<f64>> {
        if vector.len() != IN {
            return Err(TransformError::VectorSizeMismatch {
                expected: IN,
                actual: vector.len(),
            });
        }
        let jacobian = self.jacobian_with_respect_to_position(point);
        let mut result = vec![0.0; OUT];
        for i in 0..OUT {
            for j in 0..IN {
                result[i] += jacobian[(i, j)] * vector[j];
            }
        }
        Ok(result)
    }

    /// Map a covariant vector (e.g. a gradient) through the transpose of
    /// the inverse differential at `point`.
    fn transform_covariant_vector(
        &self,
        vector: &CovariantVector<IN>,
        point: &Point<IN>,
    ) -> CovariantVector<OUT> {
        let inverse_jacobian = self.inverse_jacobian_with_respect_to_position(point);
        let mut result = CovariantVector::zeros();
        for i in 0..OUT {
            for j in 0..IN {
                result[i] += inverse_jacobian[(j, i)] * vector[j];
            }
        }
        result
    }

    /// Variable-length counterpart of [`Transform::transform_covariant_vector`].
    fn transform_covariant_vector_dyn(
        &self,
        vector: &[f64],
        point: &Point<IN>,
    ) -> Result<Vec<f64>> {
        if vector.len() != IN {
            return Err(TransformError::VectorSizeMismatch {
                expected: IN,
                actual: vector.len(),
            });
        }
        let inverse_jacobian = self.inverse_jacobian_with_respect_to_position(point);
        let mut result = vec![0.0; OUT];
        for i in 0..OUT {
            for j in 0..IN {
                result[i] += inverse_jacobian[(j, i)] * vector[j];
            }
        }
        Ok(result)
    }

    /// Reorient a 3-D diffusion tensor at `point`, preserving the principal
    /// diffusion direction.
    ///
    /// Naively conjugating a diffusion tensor by the Jacobian can break
    /// positive-definiteness or scramble principal directions under shear.
    /// Instead, the tensor's eigenframe is mapped through the differential
    /// and re-orthonormalized, and the output is rebuilt from the mapped
    /// frame with the original eigenvalues.
    fn transform_diffusion_tensor_3d(
        &self,
        tensor: &DiffusionTensor3,
        point: &Point<IN>,
    ) -> DiffusionTensor3 {
        let inverse_jacobian = self.inverse_jacobian_with_respect_to_position(point);

        // Only the leading 3x3 block of the inverse Jacobian participates,
        // identity-padded for transforms of fewer than three dimensions.
        let mut block = SMatrix::<f64, 3, 3>::identity();
        for i in 0..IN {
            for j in 0..OUT {
                if i < 3 && j < 3 {
                    block[(i, j)] = inverse_jacobian[(i, j)];
                }
            }
        }

        let (eigenvalues, eigenvectors) = tensor.eigen_system();

        // Primary direction: map and renormalize.
        let mut ev1 = block * eigenvectors[2].0;
        ev1.normalize_mut();

        // Secondary direction: map, keep the aspect perpendicular to the
        // mapped primary direction.
        let mut ev2 = block * eigenvectors[1].0;
        let mut dp = ev2.dot(&ev1);
        if dp < 0.0 {
            ev2 = -ev2;
            dp = -dp;
        }
        ev2 -= ev1 * dp;
        ev2.normalize_mut();

        let ev3 = ev1.cross(&ev2);

        // Eigenvalue-weighted sum of outer products, original eigenvalues.
        let rotated = ev1 * ev1.transpose() * eigenvalues[2]
            + ev2 * ev2.transpose() * eigenvalues[1]
            + ev3 * ev3.transpose() * eigenvalues[0];

        DiffusionTensor3::new([
            rotated[(0, 0)],
            rotated[(0, 1)],
            rotated[(0, 2)],
            rotated[(1, 1)],
            rotated[(1, 2)],
            rotated[(2, 2)],
        ])
    }

    /// Variable-length counterpart of [`Transform::transform_diffusion_tensor_3d`].
    ///
    /// Fails with a size error unless `tensor` has exactly 6 components.
    fn transform_diffusion_tensor_3d_dyn(
        &self,
        tensor: &[f64],
        point: &Point<IN>,
    ) -> Result<Vec<f64>> {
        if tensor.len() != 6 {
            return Err(TransformError::TensorSizeMismatch {
                expected: 6,
                actual: tensor.len(),
            });
        }
        let mut components = [0.0; 6];
        components.copy_from_slice(tensor);
        let result = self.transform_diffusion_tensor_3d(&DiffusionTensor3::new(components), point);
        Ok(result.components().to_vec())
    }

    /// Transform a general symmetric second-rank tensor at `point` by
    /// congruent conjugation with the differential: `J * T * J^-1`.
    fn transform_symmetric_tensor(
        &self,
        tensor: &SymmetricTensor<IN>,
        point: &Point<IN>,
    ) -> SymmetricTensor<OUT> {
        let jacobian = self.jacobian_with_respect_to_position(point);
        let inverse_jacobian = self.inverse_jacobian_with_respect_to_position(point);
        SymmetricTensor::from_matrix(jacobian * tensor.matrix() * inverse_jacobian)
    }

    /// Variable-length counterpart of [`Transform::transform_symmetric_tensor`].
    ///
    /// Takes `IN^2` components in row-major order and produces `OUT^2`.
    fn transform_symmetric_tensor_dyn(&self, tensor: &[f64], point: &Point<IN>) -> Result<Vec<f64>> {
        if tensor.len() != IN * IN {
            return Err(TransformError::TensorSizeMismatch {
                expected: IN * IN,
                actual: tensor.len(),
            });
        }
        let input = SymmetricTensor::from_matrix(SMatrix::from_fn(|i, j| tensor[j + IN * i]));
        let output = self.transform_symmetric_tensor(&input, point);
        let mut result = vec![0.0; OUT * OUT];
        for i in 0..OUT {
            for j in 0..OUT {
                result[j + OUT * i] = output[(i, j)];
            }
        }
        Ok(result)
    }

    /// Apply an optimizer update: `parameters[k] += update[k] * factor`.
    ///
    /// Fails with a size mismatch (leaving parameters unchanged) when the
    /// update length disagrees with the parameter count. On success the
    /// updated vector is re-submitted through [`Transform::set_parameters`]
    /// and the store's modification counter is bumped.
    fn update_parameters(&mut self, update: &ParameterVector, factor: f64) -> Result<()> {
        let count = self.number_of_parameters();
        if update.len() != count {
            return Err(TransformError::ParameterSizeMismatch {
                expected: count,
                actual: update.len(),
            });
        }

        // Re-read first: for matrix-backed transforms the internal state,
        // not the stored vector, is the source of truth.
        let mut parameters = self.parameters();
        if factor == 1.0 {
            for k in 0..count {
                parameters[k] += update[k];
            }
        } else {
            for k in 0..count {
                parameters[k] += update[k] * factor;
            }
        }
        self.set_parameters(&parameters)?;
        self.parameter_store_mut().touch();
        Ok(())
    }

    /// Bulk-assign raw parameter values, then reinterpret them.
    ///
    /// An empty slice is a no-op. A source slice aliasing the store's own
    /// buffer skips the copy but still reinterprets; a non-aliasing copy is
    /// bounds-checked and fails with a size mismatch before any mutation.
    fn copy_in_parameters(&mut self, values: &[f64]) -> Result<()> {
        if values.is_empty() {
            return Ok(());
        }
        let aliased = std::ptr::eq(
            values.as_ptr(),
            self.parameter_store().parameters().as_slice().as_ptr(),
        );
        if !aliased {
            self.parameter_store_mut().assign_parameters(values)?;
        }
        let parameters = self.parameter_store().parameters().clone();
        self.set_parameters(&parameters)
    }

    /// Bulk-assign raw fixed-parameter values, then reinterpret them.
    ///
    /// Same protocol as [`Transform::copy_in_parameters`].
    fn copy_in_fixed_parameters(&mut self, values: &[f64]) -> Result<()> {
        if values.is_empty() {
            return Ok(());
        }
        let aliased = std::ptr::eq(
            values.as_ptr(),
            self.parameter_store().fixed_parameters().as_slice().as_ptr(),
        );
        if !aliased {
            self.parameter_store_mut().assign_fixed_parameters(values)?;
        }
        let parameters = self.parameter_store().fixed_parameters().clone();
        self.set_fixed_parameters(&parameters)
    }
}

/// Clone a transform behind the trait and recover its concrete type.
///
/// Fails with [`TransformError::DowncastFailed`] when the transform is not
/// actually a `T`. The returned value is a fully independent deep copy.
pub fn downcast_clone<T, const IN: usize, const OUT: usize>(
    transform: &dyn Transform<IN, OUT>,
) -> Result<T>
where
    T: Transform<IN, OUT> + Clone + 'static,
{
    transform
        .as_any()
        .downcast_ref::<T>()
        .cloned()
        .ok_or(TransformError::DowncastFailed(std::any::type_name::<T>()))
}
