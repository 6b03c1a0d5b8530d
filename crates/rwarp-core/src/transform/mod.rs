//! Transform types and operations.
//!
//! This module provides the transform trait, its differential machinery,
//! and implementations for spatial coordinate transformations.

pub mod affine;
pub mod image_metadata;
pub mod jacobian;
pub mod matrix_offset;
pub mod parameters;
pub mod rigid;
pub mod trait_;
pub mod translation;

pub use affine::AffineTransform;
pub use image_metadata::apply_to_image_metadata;
pub use jacobian::{InversePositionJacobian, PositionJacobian};
pub use matrix_offset::MatrixOffset;
pub use parameters::{ParameterStore, ParameterVector};
pub use rigid::RigidTransform;
pub use trait_::{downcast_clone, Transform};
pub use translation::TranslationTransform;
