//! Error types for transform operations.
//!
//! This module provides structured error types for the transform layer,
//! enabling better error handling and debugging.

use thiserror::Error;

/// Main error type for transform operations.
///
/// All validation failures abort the offending call with no partial
/// mutation; parameter vectors are left unchanged when an update fails.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransformError {
    /// An update or assignment vector does not match the transform's
    /// parameter count.
    #[error("parameter vector size {actual} must match transform parameter size {expected}")]
    ParameterSizeMismatch { expected: usize, actual: usize },

    /// A variable-length vector argument does not match the input dimension.
    #[error("input vector has {actual} components, expected {expected}")]
    VectorSizeMismatch { expected: usize, actual: usize },

    /// A variable-length tensor argument has the wrong component count.
    #[error("input tensor has {actual} components, expected {expected}")]
    TensorSizeMismatch { expected: usize, actual: usize },

    /// A cloned transform could not be downcast to the requested concrete type.
    #[error("downcast to type {0} failed")]
    DowncastFailed(&'static str),

    /// The transform has no inverse.
    #[error("transform is not invertible")]
    NotInvertible,
}

/// Result type for transform operations.
pub type Result<T> = std::result::Result<T, TransformError>;
