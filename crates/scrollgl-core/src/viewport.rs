//! Viewport size, pixel-ratio clamp and pixel-exact camera calibration.

use crate::error::LayoutError;
use glam::{Mat4, Vec2, Vec3};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewportState {
    pub width: f32,
    pub height: f32,
    pub device_pixel_ratio: f32,
}

/// Backing-store size in physical pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SurfaceSize {
    pub width: u32,
    pub height: u32,
}

/// Perspective camera on the +Z axis looking at the origin.
///
/// After [`ViewportController::resize`] the vertical field of view is chosen
/// so that a plane at z = 0 spans exactly one world unit per CSS pixel.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraState {
    pub distance: f32,
    pub fov_degrees: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

impl CameraState {
    pub fn eye(&self) -> Vec3 {
        Vec3::new(0.0, 0.0, self.distance)
    }
    /// Compute the clip-space projection matrix (depth in `[0, 1]`).
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(
            self.fov_degrees.to_radians(),
            self.aspect,
            self.near,
            self.far,
        )
    }
    /// Compute the view matrix that transforms world to view space.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye(), Vec3::ZERO, Vec3::Y)
    }
    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }
}

/// Vertical field of view (degrees) that makes one world unit cover one
/// pixel on a plane `distance` away from the eye.
#[inline]
pub fn pixel_fov_degrees(viewport_height: f32, distance: f32) -> f32 {
    (2.0 * (viewport_height / 2.0 / distance).atan()).to_degrees()
}

pub struct ViewportController {
    state: Option<ViewportState>,
    camera: CameraState,
    max_pixel_ratio: f32,
}

impl ViewportController {
    pub fn new(camera_distance: f32, near: f32, far: f32, max_pixel_ratio: f32) -> Self {
        Self {
            state: None,
            camera: CameraState {
                distance: camera_distance,
                fov_degrees: 45.0,
                aspect: 1.0,
                near,
                far,
            },
            max_pixel_ratio,
        }
    }

    /// Recompute viewport state and recalibrate the camera. Returns the new
    /// physical surface size for the render and post-processing targets.
    pub fn resize(
        &mut self,
        width: f32,
        height: f32,
        device_pixel_ratio: f32,
    ) -> Result<SurfaceSize, LayoutError> {
        if !(width.is_finite() && height.is_finite()) || width <= 0.0 || height <= 0.0 {
            return Err(LayoutError::EmptyViewport { width, height });
        }
        let ratio = if device_pixel_ratio.is_finite() && device_pixel_ratio > 0.0 {
            device_pixel_ratio.min(self.max_pixel_ratio)
        } else {
            1.0
        };
        let state = ViewportState {
            width,
            height,
            device_pixel_ratio: ratio,
        };
        self.state = Some(state);
        self.camera.fov_degrees = pixel_fov_degrees(height, self.camera.distance);
        self.camera.aspect = width / height;
        Ok(self.surface_size().unwrap_or(SurfaceSize {
            width: 1,
            height: 1,
        }))
    }

    pub fn state(&self) -> Option<ViewportState> {
        self.state
    }

    pub fn camera(&self) -> &CameraState {
        &self.camera
    }

    pub fn surface_size(&self) -> Option<SurfaceSize> {
        self.state.map(|s| SurfaceSize {
            width: ((s.width * s.device_pixel_ratio).round() as u32).max(1),
            height: ((s.height * s.device_pixel_ratio).round() as u32).max(1),
        })
    }

    /// `resolution` uniform: viewport size scaled by the clamped pixel ratio.
    pub fn resolution(&self) -> Vec2 {
        self.state
            .map(|s| Vec2::new(s.width, s.height) * s.device_pixel_ratio)
            .unwrap_or(Vec2::ZERO)
    }
}
