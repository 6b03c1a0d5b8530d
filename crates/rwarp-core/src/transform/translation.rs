//! Translation transform implementation.
//!
//! This module provides a simple translation transform.

use std::any::Any;

use super::jacobian::PositionJacobian;
use super::parameters::{ParameterStore, ParameterVector};
use super::trait_::Transform;
use crate::error::Result;
use crate::spatial::{Point, Vector};

/// Simple Translation Transform.
///
/// Translates points by a fixed offset vector. Parameters are the D
/// translation components; there are no fixed parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct TranslationTransform<const D: usize> {
    translation: Vector<D>,
    store: ParameterStore,
}

impl<const D: usize> TranslationTransform<D> {
    /// Create a new translation transform.
    pub fn new(translation: Vector<D>) -> Self {
        let store = ParameterStore::from_vectors(
            ParameterVector::from_vec(translation.to_vec()),
            ParameterVector::zeros(0),
        );
        Self { translation, store }
    }

    /// Create an identity translation transform.
    pub fn identity() -> Self {
        Self::new(Vector::zeros())
    }

    /// Get the translation vector.
    pub fn translation(&self) -> &Vector<D> {
        &self.translation
    }
}

impl<const D: usize> Transform<D, D> for TranslationTransform<D> {
    fn transform_point(&self, point: &Point<D>) -> Point<D> {
        *point + self.translation
    }

    fn jacobian_with_respect_to_position(&self, _point: &Point<D>) -> PositionJacobian<D, D> {
        PositionJacobian::identity()
    }

    fn parameter_store(&self) -> &ParameterStore {
        &self.store
    }

    fn parameter_store_mut(&mut self) -> &mut ParameterStore {
        &mut self.store
    }

    fn parameters(&self) -> ParameterVector {
        ParameterVector::from_vec(self.translation.to_vec())
    }

    fn set_parameters(&mut self, parameters: &ParameterVector) -> Result<()> {
        self.store.assign_parameters(parameters.as_slice())?;
        for i in 0..D {
            self.translation[i] = parameters[i];
        }
        Ok(())
    }

    fn set_fixed_parameters(&mut self, parameters: &ParameterVector) -> Result<()> {
        // No fixed parameters; only the empty vector is accepted.
        self.store.assign_fixed_parameters(parameters.as_slice())
    }

    fn is_linear(&self) -> bool {
        true
    }

    fn inverse(&self) -> Option<Box<dyn Transform<D, D>>> {
        Some(Box::new(Self::new(-self.translation)))
    }

    fn clone_boxed(&self) -> Box<dyn Transform<D, D>> {
        Box::new(self.clone())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
