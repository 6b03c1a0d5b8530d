//! Projection of a transform onto an image's geometric descriptor.
//!
//! Carrying an image into another physical space without resampling its
//! pixels means rewriting its origin, spacing, and direction cosines so the
//! grid lands where the transform's inverse would place it.

use tracing::warn;

use super::trait_::Transform;
use crate::error::{Result, TransformError};
use crate::image::ImageMetadata;
use crate::spatial::Spacing;

/// Apply a transform to an image's geometric descriptor in place.
///
/// The origin is mapped through the inverse transform; for each grid axis
/// the spacing-scaled direction-cosine column is mapped through the inverse
/// transform's differential, its new magnitude becomes the spacing and its
/// unit direction the new cosine column.
///
/// Meant for linear transforms. A non-linear transform produces a warning
/// rather than a failure, since the result may still be approximately
/// useful. Fails with [`TransformError::NotInvertible`] when the transform
/// has no inverse.
pub fn apply_to_image_metadata<T, const D: usize>(
    transform: &T,
    metadata: &mut ImageMetadata<D>,
) -> Result<()>
where
    T: Transform<D, D> + ?Sized,
{
    if !transform.is_linear() {
        warn!("apply_to_image_metadata invoked with a non-linear transform; results may be unexpected");
    }

    let inverse = transform.inverse().ok_or(TransformError::NotInvertible)?;

    let origin = inverse.transform_point(metadata.origin());
    metadata.set_origin(origin);

    let spacing = *metadata.spacing();
    let direction = *metadata.direction();
    let mut new_spacing = Spacing::zeros();
    let mut new_direction = direction;
    for i in 0..D {
        let axis = direction.axis_direction(i) * spacing[i];
        let mut mapped = inverse.transform_vector(&axis, &origin);
        new_spacing[i] = mapped.normalize_mut();
        for k in 0..D {
            new_direction[(k, i)] = mapped[k];
        }
    }
    metadata.set_direction(new_direction);
    metadata.set_spacing(new_spacing);
    Ok(())
}
