use super::helpers;
use wgpu;

/// Offscreen color target the media planes are drawn into before the
/// background pass composites it onto the swapchain. Sized to the surface.
pub(crate) struct SceneTarget {
    pub(crate) format: wgpu::TextureFormat,
    pub(crate) tex: wgpu::Texture,
    pub(crate) view: wgpu::TextureView,
}

impl SceneTarget {
    pub(crate) fn new(device: &wgpu::Device, width: u32, height: u32) -> Self {
        let format = wgpu::TextureFormat::Rgba8Unorm;
        let (tex, view) = Self::create(device, format, width, height);
        Self { format, tex, view }
    }

    pub(crate) fn recreate(&mut self, device: &wgpu::Device, width: u32, height: u32) {
        self.tex.destroy();
        (self.tex, self.view) = Self::create(device, self.format, width, height);
    }

    fn create(
        device: &wgpu::Device,
        format: wgpu::TextureFormat,
        width: u32,
        height: u32,
    ) -> (wgpu::Texture, wgpu::TextureView) {
        helpers::create_color_texture(
            device,
            "scene_tex",
            width,
            height,
            format,
            wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::TEXTURE_BINDING,
        )
    }
}
