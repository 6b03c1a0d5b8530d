pub mod error;
pub mod image;
pub mod spatial;
pub mod transform;

pub use error::{Result, TransformError};
pub use image::ImageMetadata;
pub use spatial::{CovariantVector, Direction, Point, Spacing, Vector};
pub use transform::Transform;
