use crate::dom::WebMedia;
use fnv::FnvHashMap;
use scrollgl_core::{
    BackgroundUniforms, CameraState, PlaneGeometry, PlaneHandle, PlaneUniforms, RenderBackend,
    SurfaceSize,
};
use web_sys as web;

mod background;
mod helpers;
mod planes;
mod targets;
mod texture;

use background::{create_background_resources, BackgroundResources};
use planes::{create_plane_mesh, create_plane_resources, CameraUniforms, PlaneMesh, PlaneResources};
use targets::SceneTarget;

// Shaders bundled as string constants
pub(crate) static MEDIA_WGSL: &str = include_str!("../shaders/media.wgsl");
pub(crate) static BACKGROUND_WGSL: &str = include_str!("../shaders/background.wgsl");

struct GpuContext {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    scene: SceneTarget,
    planes: PlaneResources,
    background: BackgroundResources,
    meshes: FnvHashMap<PlaneHandle, PlaneMesh>,
    // Draw in discovery order; the map has none.
    draw_order: Vec<PlaneHandle>,
    clear_color: wgpu::Color,
}

/// `wgpu` implementation of the compositor's render backend.
///
/// Frames are drawn in two passes: every media plane into an offscreen
/// scene target, then the background pass from that target to the canvas.
/// After [`RenderBackend::release`] all calls are no-ops.
pub struct GpuBackend {
    canvas: web::HtmlCanvasElement,
    gpu: Option<GpuContext>,
    next_id: u32,
}

impl GpuBackend {
    pub async fn new(canvas: web::HtmlCanvasElement) -> anyhow::Result<Self> {
        let width = canvas.width().max(1);
        let height = canvas.height().max(1);

        let instance = wgpu::Instance::default();
        let surface = instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| anyhow::anyhow!("No GPU adapter"))?;
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    required_features: wgpu::Features::empty(),
                    // WebGL2-compatible limits so the same build runs on both web backends
                    required_limits: wgpu::Limits::downlevel_webgl2_defaults()
                        .using_resolution(adapter.limits()),
                    memory_hints: wgpu::MemoryHints::Performance,
                    label: None,
                },
                None,
            )
            .await
            .map_err(|e| anyhow::anyhow!(format!("request_device error: {:?}", e)))?;
        let caps = surface.get_capabilities(&adapter);
        // Image bytes are uploaded untouched, so stay out of sRGB formats.
        let format = caps
            .formats
            .iter()
            .copied()
            .find(|f| {
                matches!(
                    f,
                    wgpu::TextureFormat::Bgra8Unorm | wgpu::TextureFormat::Rgba8Unorm
                )
            })
            .or_else(|| caps.formats.first().copied())
            .ok_or_else(|| anyhow::anyhow!("surface reports no formats"))?;
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width,
            height,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: caps
                .alpha_modes
                .first()
                .copied()
                .unwrap_or(wgpu::CompositeAlphaMode::Auto),
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let scene = SceneTarget::new(&device, width, height);
        let planes = create_plane_resources(&device, scene.format);
        let background = create_background_resources(&device, format, &scene.view, &planes.sampler);
        log::info!("[gpu] surface {}x{} {:?}", width, height, format);

        Ok(Self {
            canvas,
            gpu: Some(GpuContext {
                surface,
                device,
                queue,
                config,
                scene,
                planes,
                background,
                meshes: FnvHashMap::default(),
                draw_order: Vec::new(),
                clear_color: wgpu::Color {
                    r: 1.0,
                    g: 1.0,
                    b: 1.0,
                    a: 0.0,
                },
            }),
            next_id: 0,
        })
    }
}

impl RenderBackend<WebMedia> for GpuBackend {
    fn create_plane(&mut self, element: &WebMedia, geometry: &PlaneGeometry) -> PlaneHandle {
        let handle = PlaneHandle(self.next_id);
        self.next_id += 1;
        if let Some(g) = &mut self.gpu {
            let tex = texture::media_texture(&g.device, &g.queue, element.image());
            let mesh = create_plane_mesh(&g.device, &g.planes, geometry, tex);
            g.meshes.insert(handle, mesh);
            g.draw_order.push(handle);
        }
        handle
    }

    fn update_plane_geometry(&mut self, plane: PlaneHandle, positions: &[[f32; 3]]) {
        if let Some(g) = &self.gpu {
            if let Some(mesh) = g.meshes.get(&plane) {
                g.queue
                    .write_buffer(&mesh.positions, 0, bytemuck::cast_slice(positions));
            }
        }
    }

    fn set_plane_uniforms(&mut self, plane: PlaneHandle, uniforms: &PlaneUniforms) {
        if let Some(g) = &self.gpu {
            if let Some(mesh) = g.meshes.get(&plane) {
                g.queue
                    .write_buffer(&mesh.uniform_buffer, 0, bytemuck::bytes_of(uniforms));
            }
        }
    }

    fn set_background_uniforms(&mut self, uniforms: &BackgroundUniforms) {
        if let Some(g) = &self.gpu {
            g.queue
                .write_buffer(&g.background.uniform_buffer, 0, bytemuck::bytes_of(uniforms));
        }
    }

    fn resize_surface(&mut self, size: SurfaceSize) {
        let Some(g) = &mut self.gpu else {
            return;
        };
        let limit = g.device.limits().max_texture_dimension_2d;
        let width = size.width.clamp(1, limit);
        let height = size.height.clamp(1, limit);
        self.canvas.set_width(width);
        self.canvas.set_height(height);
        if width == g.config.width && height == g.config.height {
            return;
        }
        g.config.width = width;
        g.config.height = height;
        g.surface.configure(&g.device, &g.config);
        g.scene.recreate(&g.device, width, height);
        g.background
            .rebuild_bind_group(&g.device, &g.scene.view, &g.planes.sampler);
    }

    fn set_camera(&mut self, camera: &CameraState) {
        if let Some(g) = &self.gpu {
            let u = CameraUniforms {
                view_proj: camera.view_projection().to_cols_array_2d(),
            };
            g.queue
                .write_buffer(&g.planes.camera_buffer, 0, bytemuck::bytes_of(&u));
        }
    }

    fn render(&mut self) {
        let Some(g) = &mut self.gpu else {
            return;
        };
        let frame = match g.surface.get_current_texture() {
            Ok(f) => f,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                g.surface.configure(&g.device, &g.config);
                return;
            }
            Err(e) => {
                log::error!("render error: {:?}", e);
                return;
            }
        };
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = g
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("encoder"),
            });
        {
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("scene_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &g.scene.view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(g.clear_color),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            rpass.set_pipeline(&g.planes.pipeline);
            rpass.set_bind_group(0, &g.planes.camera_bind_group, &[]);
            for handle in &g.draw_order {
                let Some(mesh) = g.meshes.get(handle) else {
                    continue;
                };
                rpass.set_bind_group(1, &mesh.bind_group, &[]);
                rpass.set_vertex_buffer(0, mesh.positions.slice(..));
                rpass.set_vertex_buffer(1, mesh.uvs.slice(..));
                rpass.set_index_buffer(mesh.indices.slice(..), wgpu::IndexFormat::Uint16);
                rpass.draw_indexed(0..mesh.index_count, 0, 0..1);
            }
        }
        g.background.draw(&mut encoder, &view);

        g.queue.submit(Some(encoder.finish()));
        frame.present();
    }

    fn remove_plane(&mut self, plane: PlaneHandle) {
        if let Some(g) = &mut self.gpu {
            if let Some(mesh) = g.meshes.remove(&plane) {
                mesh.destroy();
            }
            g.draw_order.retain(|h| *h != plane);
        }
    }

    fn release(&mut self) {
        if let Some(g) = self.gpu.take() {
            for mesh in g.meshes.values() {
                mesh.destroy();
            }
            g.scene.tex.destroy();
            log::info!("[gpu] released");
        }
    }
}
