//! DOM media elements mirrored as world-space planes.

use crate::backend::{PlaneHandle, PlaneUniforms, RenderBackend};
use crate::constants::NEUTRAL_COVER_SCALE;
use crate::cover::{aspect_ratio, cover_scale};
use crate::error::LayoutError;
use crate::geometry::PlaneGeometry;
use crate::viewport::ViewportState;
use glam::Vec2;

/// Bounding rectangle in CSS pixels, relative to the viewport.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }
    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.left && x <= self.left + self.width && y >= self.top && y <= self.top + self.height
    }
}

/// Read-only view of a host media element.
pub trait MediaElement {
    /// Current bounding client rect.
    fn bounding_rect(&self) -> Rect;
    /// Rendered layout size (`offsetWidth`, `offsetHeight`).
    fn rendered_size(&self) -> (f32, f32);
    /// Intrinsic pixel size, `None` when the asset never decoded.
    fn natural_size(&self) -> Option<(f32, f32)>;
}

/// Axis-aligned world rectangle: center plus size.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WorldRect {
    pub center: Vec2,
    pub size: Vec2,
}

/// Convert a DOM rect to the world-space center of its plane.
///
/// Screen Y grows downward while world Y grows upward; the scroll offset is
/// subtracted so the plane stays glued to the page content.
#[inline]
pub fn world_center(rect: &Rect, viewport_width: f32, viewport_height: f32, offset_y: f32) -> Vec2 {
    Vec2::new(
        -viewport_width / 2.0 + rect.left + rect.width / 2.0,
        viewport_height / 2.0 - rect.top - rect.height / 2.0 - offset_y,
    )
}

pub struct MediaPlane<E> {
    element: E,
    handle: PlaneHandle,
    rect: Rect,
    world: Vec2,
    size: Vec2,
    cover_scale: Vec2,
    positions: Vec<[f32; 3]>,
    hover_progress: f32,
    hover_target: f32,
    pointer: Vec2,
}

impl<E: MediaElement> MediaPlane<E> {
    pub fn element(&self) -> &E {
        &self.element
    }
    pub fn handle(&self) -> PlaneHandle {
        self.handle
    }
    /// Last non-empty DOM rect read by a layout update.
    pub fn rect(&self) -> Rect {
        self.rect
    }
    pub fn world_position(&self) -> Vec2 {
        self.world
    }
    pub fn size(&self) -> Vec2 {
        self.size
    }
    pub fn world_rect(&self) -> WorldRect {
        WorldRect {
            center: self.world,
            size: self.size,
        }
    }
    pub fn cover_scale(&self) -> Vec2 {
        self.cover_scale
    }
    /// Live vertex positions, derived from the shared template.
    pub fn positions(&self) -> &[[f32; 3]] {
        &self.positions
    }
    pub fn hover_progress(&self) -> f32 {
        self.hover_progress
    }
    pub fn hover_target(&self) -> f32 {
        self.hover_target
    }
    pub fn pointer(&self) -> Vec2 {
        self.pointer
    }

    /// Read the element's rect and rebuild position, size and geometry. A
    /// zero-size rect leaves the plane at its last good placement.
    fn update_placement(
        &mut self,
        viewport: &ViewportState,
        offset_y: f32,
        template: &PlaneGeometry,
    ) -> Result<(), LayoutError> {
        let rect = self.element.bounding_rect();
        aspect_ratio(rect.width, rect.height)?;
        self.rect = rect;
        self.size = Vec2::new(rect.width, rect.height);
        self.world = world_center(&rect, viewport.width, viewport.height, offset_y);
        template.scale_into(rect.width, rect.height, &mut self.positions);
        Ok(())
    }

    /// Recompute the cover scale from rendered and natural sizes. On error
    /// the previous scale is kept.
    fn update_cover_scale(&mut self) -> Result<(), LayoutError> {
        let (w, h) = self.element.rendered_size();
        let container_aspect = aspect_ratio(w, h)?;
        self.cover_scale = match self
            .element
            .natural_size()
            .and_then(|(nw, nh)| aspect_ratio(nw, nh).ok())
        {
            Some(media_aspect) => cover_scale(container_aspect, media_aspect)?,
            None => Vec2::from(NEUTRAL_COVER_SCALE),
        };
        Ok(())
    }

    fn set_pointer(&mut self, x: f32, y: f32) {
        let r = self.rect;
        if r.width > 0.0 && r.height > 0.0 {
            self.pointer = Vec2::new((x - r.left) / r.width, 1.0 - (y - r.top) / r.height);
        }
        self.hover_target = if r.contains(x, y) { 1.0 } else { 0.0 };
    }

    fn ease_hover(&mut self, ease: f32) {
        self.hover_progress += (self.hover_target - self.hover_progress) * ease;
    }

    pub fn uniforms(&self, time: f32, scroll_speed: f32, resolution: Vec2, offset_y: f32) -> PlaneUniforms {
        PlaneUniforms::new(
            self.world + Vec2::new(0.0, offset_y),
            resolution,
            self.pointer,
            self.cover_scale,
            time,
            scroll_speed,
            self.hover_progress,
        )
    }
}

/// The fixed set of planes discovered at initialization.
pub struct MediaPlaneRegistry<E> {
    template: PlaneGeometry,
    planes: Vec<MediaPlane<E>>,
}

impl<E: MediaElement> MediaPlaneRegistry<E> {
    /// Build one plane per element, in the order given.
    pub fn discover<B, I>(elements: I, template: PlaneGeometry, backend: &mut B) -> Self
    where
        B: RenderBackend<E>,
        I: IntoIterator<Item = E>,
    {
        let planes = elements
            .into_iter()
            .map(|element| {
                let handle = backend.create_plane(&element, &template);
                MediaPlane {
                    element,
                    handle,
                    rect: Rect::default(),
                    world: Vec2::ZERO,
                    size: Vec2::ZERO,
                    cover_scale: Vec2::from(NEUTRAL_COVER_SCALE),
                    positions: template.template().to_vec(),
                    hover_progress: 0.0,
                    hover_target: 0.0,
                    pointer: Vec2::ZERO,
                }
            })
            .collect::<Vec<_>>();
        log::info!("[media] discovered {} planes", planes.len());
        Self { template, planes }
    }

    pub fn len(&self) -> usize {
        self.planes.len()
    }
    pub fn is_empty(&self) -> bool {
        self.planes.is_empty()
    }
    pub fn planes(&self) -> &[MediaPlane<E>] {
        &self.planes
    }
    pub fn template(&self) -> &PlaneGeometry {
        &self.template
    }

    /// Rect update for every plane, pushing the rescaled geometry to the
    /// backend. Planes measuring zero keep their previous layout and push
    /// nothing; planes whose cover scale could not be computed keep the
    /// previous one.
    pub fn update_all<B: RenderBackend<E>>(
        &mut self,
        viewport: &ViewportState,
        offset_y: f32,
        backend: &mut B,
    ) {
        for (i, plane) in self.planes.iter_mut().enumerate() {
            if let Err(e) = plane.update_placement(viewport, offset_y, &self.template) {
                log::warn!("[media] plane {i}: keeping previous layout ({e})");
                continue;
            }
            backend.update_plane_geometry(plane.handle, &plane.positions);
            if let Err(e) = plane.update_cover_scale() {
                log::warn!("[media] plane {i}: keeping previous cover scale ({e})");
            }
        }
    }

    pub fn pointer_move(&mut self, x: f32, y: f32) {
        for plane in &mut self.planes {
            plane.set_pointer(x, y);
        }
    }

    pub fn ease_hover(&mut self, ease: f32) {
        for plane in &mut self.planes {
            plane.ease_hover(ease);
        }
    }

    /// Detach every plane from the backend. The registry is empty afterwards.
    pub fn clear<B: RenderBackend<E>>(&mut self, backend: &mut B) {
        for plane in self.planes.drain(..) {
            backend.remove_plane(plane.handle);
        }
    }
}
