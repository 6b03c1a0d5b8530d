//! Image metadata types.
//!
//! This module provides the geometric descriptor of an image:
//! origin, spacing, and direction.

use crate::spatial::{Direction, Point, Spacing};

/// Image metadata containing physical space information.
///
/// Metadata describes how image indices map to physical coordinates. It is
/// the descriptor a transform acts on when an image is carried from one
/// physical space into another without resampling its pixels.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageMetadata<const D: usize> {
    /// Physical coordinate of the first pixel (index 0, 0, ...).
    origin: Point<D>,
    /// Physical distance between pixels along each axis.
    spacing: Spacing<D>,
    /// Orientation of the image axes.
    direction: Direction<D>,
}

impl<const D: usize> ImageMetadata<D> {
    /// Create new image metadata.
    pub fn new(origin: Point<D>, spacing: Spacing<D>, direction: Direction<D>) -> Self {
        Self {
            origin,
            spacing,
            direction,
        }
    }

    /// Get the origin.
    pub fn origin(&self) -> &Point<D> {
        &self.origin
    }

    /// Get the spacing.
    pub fn spacing(&self) -> &Spacing<D> {
        &self.spacing
    }

    /// Get the direction.
    pub fn direction(&self) -> &Direction<D> {
        &self.direction
    }

    /// Set the origin.
    pub fn set_origin(&mut self, origin: Point<D>) {
        self.origin = origin;
    }

    /// Set the spacing.
    pub fn set_spacing(&mut self, spacing: Spacing<D>) {
        self.spacing = spacing;
    }

    /// Set the direction.
    pub fn set_direction(&mut self, direction: Direction<D>) {
        self.direction = direction;
    }
}

impl<const D: usize> Default for ImageMetadata<D> {
    fn default() -> Self {
        Self {
            origin: Point::origin(),
            spacing: Spacing::uniform(1.0),
            direction: Direction::identity(),
        }
    }
}
