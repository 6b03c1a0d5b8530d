//! Image geometry types.
//!
//! This module provides the geometric descriptor of an image: how its
//! indices map to physical coordinates.

pub mod metadata;

pub use metadata::ImageMetadata;
