//! Parameter storage for transforms.
//!
//! Every transform owns a `ParameterStore`: the optimized parameter vector,
//! the non-optimized fixed parameters (e.g. a center of rotation), and a
//! modification counter consumers can watch to invalidate caches.

use crate::error::{Result, TransformError};
use nalgebra::DVector;

/// The raw value vector of a transform's (fixed) parameters.
pub type ParameterVector = DVector<f64>;

/// Owns a transform's mutable parameter vector and its fixed parameters.
///
/// The store holds raw values only; interpreting them into transform state
/// (rotation matrices, control grids, ...) is the owning variant's job. The
/// parameter length is fixed at construction: assignments are bounds-checked
/// and a length disagreement fails before any value is written.
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterStore {
    parameters: ParameterVector,
    fixed_parameters: ParameterVector,
    modified: u64,
}

impl ParameterStore {
    /// Create a store with zeroed parameters of the given lengths.
    pub fn new(parameters: usize, fixed_parameters: usize) -> Self {
        Self::from_vectors(
            ParameterVector::zeros(parameters),
            ParameterVector::zeros(fixed_parameters),
        )
    }

    /// Create a store seeded with the given vectors.
    pub fn from_vectors(parameters: ParameterVector, fixed_parameters: ParameterVector) -> Self {
        Self {
            parameters,
            fixed_parameters,
            modified: 0,
        }
    }

    /// The stored parameter vector.
    pub fn parameters(&self) -> &ParameterVector {
        &self.parameters
    }

    /// The stored fixed-parameter vector.
    pub fn fixed_parameters(&self) -> &ParameterVector {
        &self.fixed_parameters
    }

    /// Bulk-assign the parameter vector from a raw slice.
    ///
    /// Fails without mutation when the length does not match.
    pub fn assign_parameters(&mut self, values: &[f64]) -> Result<()> {
        if values.len() != self.parameters.len() {
            return Err(TransformError::ParameterSizeMismatch {
                expected: self.parameters.len(),
                actual: values.len(),
            });
        }
        self.parameters.as_mut_slice().copy_from_slice(values);
        self.touch();
        Ok(())
    }

    /// Bulk-assign the fixed-parameter vector from a raw slice.
    ///
    /// Fails without mutation when the length does not match.
    pub fn assign_fixed_parameters(&mut self, values: &[f64]) -> Result<()> {
        if values.len() != self.fixed_parameters.len() {
            return Err(TransformError::ParameterSizeMismatch {
                expected: self.fixed_parameters.len(),
                actual: values.len(),
            });
        }
        self.fixed_parameters.as_mut_slice().copy_from_slice(values);
        self.touch();
        Ok(())
    }

    /// Record that observable transform state changed.
    pub fn touch(&mut self) {
        self.modified = self.modified.wrapping_add(1);
    }

    /// Monotonic modification counter; consumers compare snapshots of this
    /// value to decide whether cached derived data is stale.
    pub fn modified_count(&self) -> u64 {
        self.modified
    }
}
