//! Seam between the compositor and the GPU pipeline.

use crate::geometry::PlaneGeometry;
use crate::viewport::{CameraState, SurfaceSize};
use glam::Vec2;

/// Opaque per-plane id handed out by a [`RenderBackend`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PlaneHandle(pub u32);

/// Per-plane shader uniforms. The layout matches the `Plane` struct in
/// `media.wgsl`, so backends may upload it with `bytemuck::bytes_of`.
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct PlaneUniforms {
    pub position: Vec2,
    pub resolution: Vec2,
    pub pointer: Vec2,
    pub cover_scale: Vec2,
    pub time: f32,
    pub scroll_speed: f32,
    pub hover: f32,
    _pad: f32,
}

impl PlaneUniforms {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        position: Vec2,
        resolution: Vec2,
        pointer: Vec2,
        cover_scale: Vec2,
        time: f32,
        scroll_speed: f32,
        hover: f32,
    ) -> Self {
        Self {
            position,
            resolution,
            pointer,
            cover_scale,
            time,
            scroll_speed,
            hover,
            _pad: 0.0,
        }
    }
}

/// Uniforms of the full-screen background pass (`background.wgsl`).
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct BackgroundUniforms {
    pub resolution: Vec2,
    pub scroll_speed: f32,
    _pad: f32,
}

impl BackgroundUniforms {
    pub fn new(resolution: Vec2, scroll_speed: f32) -> Self {
        Self {
            resolution,
            scroll_speed,
            _pad: 0.0,
        }
    }
}

/// Mesh/camera/shader primitives the compositor drives. `E` is the host's
/// media element type, used as the texture source for new planes.
///
/// Implementations are expected to degrade on their own (placeholder
/// textures, logged render errors) rather than surface failures.
pub trait RenderBackend<E> {
    fn create_plane(&mut self, element: &E, geometry: &PlaneGeometry) -> PlaneHandle;
    /// Replace the plane's live vertex positions.
    fn update_plane_geometry(&mut self, plane: PlaneHandle, positions: &[[f32; 3]]);
    fn set_plane_uniforms(&mut self, plane: PlaneHandle, uniforms: &PlaneUniforms);
    fn set_background_uniforms(&mut self, uniforms: &BackgroundUniforms);
    /// Resize the render surface and every post-processing target.
    fn resize_surface(&mut self, size: SurfaceSize);
    fn set_camera(&mut self, camera: &CameraState);
    /// One composited frame: scene pass followed by the background pass.
    fn render(&mut self);
    /// Detach a plane from the scene and free its GPU resources.
    fn remove_plane(&mut self, plane: PlaneHandle);
    /// Release everything; later calls must be no-ops.
    fn release(&mut self);
}
