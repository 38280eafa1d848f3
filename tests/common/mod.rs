// Hand-written fakes for driving the core compositor on the host.

#![allow(dead_code)]
use scrollgl_core::*;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

pub struct MediaSpec {
    pub rect: Rect,
    pub rendered: (f32, f32),
    pub natural: Option<(f32, f32)>,
}

/// Media element whose layout can be changed after the compositor owns it.
#[derive(Clone)]
pub struct FakeMedia(pub Rc<RefCell<MediaSpec>>);

impl FakeMedia {
    pub fn new(rect: Rect, natural: Option<(f32, f32)>) -> Self {
        Self(Rc::new(RefCell::new(MediaSpec {
            rect,
            rendered: (rect.width, rect.height),
            natural,
        })))
    }
    pub fn set_rect(&self, rect: Rect) {
        let mut s = self.0.borrow_mut();
        s.rect = rect;
        s.rendered = (rect.width, rect.height);
    }
    pub fn set_rendered(&self, w: f32, h: f32) {
        self.0.borrow_mut().rendered = (w, h);
    }
}

impl MediaElement for FakeMedia {
    fn bounding_rect(&self) -> Rect {
        self.0.borrow().rect
    }
    fn rendered_size(&self) -> (f32, f32) {
        self.0.borrow().rendered
    }
    fn natural_size(&self) -> Option<(f32, f32)> {
        self.0.borrow().natural
    }
}

#[derive(Default)]
pub struct FakeBackend {
    pub created: u32,
    pub geometry: HashMap<PlaneHandle, Vec<[f32; 3]>>,
    pub geometry_writes: usize,
    pub plane_uniforms: HashMap<PlaneHandle, PlaneUniforms>,
    pub uniform_writes: usize,
    pub background: Option<BackgroundUniforms>,
    pub surfaces: Vec<SurfaceSize>,
    pub camera: Option<CameraState>,
    pub renders: usize,
    pub removed: Vec<PlaneHandle>,
    pub released: bool,
}

impl RenderBackend<FakeMedia> for FakeBackend {
    fn create_plane(&mut self, _element: &FakeMedia, geometry: &PlaneGeometry) -> PlaneHandle {
        let h = PlaneHandle(self.created);
        self.created += 1;
        self.geometry.insert(h, geometry.template().to_vec());
        h
    }
    fn update_plane_geometry(&mut self, plane: PlaneHandle, positions: &[[f32; 3]]) {
        self.geometry_writes += 1;
        self.geometry.insert(plane, positions.to_vec());
    }
    fn set_plane_uniforms(&mut self, plane: PlaneHandle, uniforms: &PlaneUniforms) {
        self.uniform_writes += 1;
        self.plane_uniforms.insert(plane, *uniforms);
    }
    fn set_background_uniforms(&mut self, uniforms: &BackgroundUniforms) {
        self.uniform_writes += 1;
        self.background = Some(*uniforms);
    }
    fn resize_surface(&mut self, size: SurfaceSize) {
        self.surfaces.push(size);
    }
    fn set_camera(&mut self, camera: &CameraState) {
        self.camera = Some(*camera);
    }
    fn render(&mut self) {
        self.renders += 1;
    }
    fn remove_plane(&mut self, plane: PlaneHandle) {
        self.removed.push(plane);
        self.geometry.remove(&plane);
    }
    fn release(&mut self) {
        self.released = true;
    }
}

#[derive(Default)]
pub struct FakeScheduler {
    pub scheduled: usize,
    pub cancelled: usize,
    pub pending: bool,
}

impl FrameScheduler for FakeScheduler {
    fn schedule(&mut self) {
        self.scheduled += 1;
        self.pending = true;
    }
    fn cancel_pending(&mut self) {
        if self.pending {
            self.cancelled += 1;
        }
        self.pending = false;
    }
}

pub type TestCompositor = Compositor<FakeMedia, FakeBackend, FakeScheduler>;

pub fn compositor(media: &[FakeMedia]) -> TestCompositor {
    Compositor::new(
        Settings::default(),
        media.to_vec(),
        FakeBackend::default(),
        FakeScheduler::default(),
    )
}

pub fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() <= 1e-4 * (1.0 + a.abs().max(b.abs()))
}
