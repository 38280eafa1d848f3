//! Analytic `object-fit: cover` for the media fragment shader.
//!
//! The shader remaps plane UVs as `(uv - 0.5) * cover_scale + 0.5`, so
//! shrinking one axis of the sampling window crops the image to fill the
//! element exactly like CSS would, without any DOM reflow.

use crate::error::LayoutError;
use glam::Vec2;

/// `width / height`, or an error when either side is zero or not finite.
#[inline]
pub fn aspect_ratio(width: f32, height: f32) -> Result<f32, LayoutError> {
    if !(width.is_finite() && height.is_finite()) || width <= 0.0 || height <= 0.0 {
        return Err(LayoutError::ZeroSize { width, height });
    }
    Ok(width / height)
}

/// Texture sampling scale for a `container_aspect` box showing media of
/// `media_aspect`. Both components are in `(0, 1]` and exactly one is 1.
#[inline]
pub fn cover_scale(container_aspect: f32, media_aspect: f32) -> Result<Vec2, LayoutError> {
    for a in [container_aspect, media_aspect] {
        if !(a.is_finite() && a > 0.0) {
            return Err(LayoutError::InvalidAspect(a));
        }
    }
    if container_aspect > media_aspect {
        Ok(Vec2::new(1.0, media_aspect / container_aspect))
    } else {
        Ok(Vec2::new(container_aspect / media_aspect, 1.0))
    }
}
