use crate::constants::PLACEHOLDER_PIXEL;
use crate::dom;
use anyhow::anyhow;
use wasm_bindgen::JsCast;
use web_sys as web;
use wgpu;

/// Decoded RGBA8 pixels of an image, read back through a 2D canvas and
/// downscaled to fit `max_dim` if needed.
pub(crate) fn image_pixels(
    img: &web::HtmlImageElement,
    max_dim: u32,
) -> anyhow::Result<(u32, u32, Vec<u8>)> {
    let (nw, nh) = (img.natural_width(), img.natural_height());
    if nw == 0 || nh == 0 {
        return Err(anyhow!("image `{}` has no natural size", img.src()));
    }
    let scale = (max_dim as f64 / nw.max(nh) as f64).min(1.0);
    let w = ((nw as f64 * scale).round() as u32).max(1);
    let h = ((nh as f64 * scale).round() as u32).max(1);

    let document = dom::window_document().ok_or_else(|| anyhow!("no document"))?;
    let canvas: web::HtmlCanvasElement = document
        .create_element("canvas")
        .map_err(|e| anyhow!("{:?}", e))?
        .dyn_into()
        .map_err(|e| anyhow!("{:?}", e))?;
    canvas.set_width(w);
    canvas.set_height(h);
    let ctx: web::CanvasRenderingContext2d = canvas
        .get_context("2d")
        .map_err(|e| anyhow!("{:?}", e))?
        .ok_or_else(|| anyhow!("2d context unavailable"))?
        .dyn_into()
        .map_err(|e| anyhow!("{:?}", e))?;
    ctx.draw_image_with_html_image_element_and_dw_and_dh(img, 0.0, 0.0, w as f64, h as f64)
        .map_err(|e| anyhow!("{:?}", e))?;
    // Throws for cross-origin images without CORS headers.
    let data = ctx
        .get_image_data(0.0, 0.0, w as f64, h as f64)
        .map_err(|e| anyhow!("{:?}", e))?;
    Ok((w, h, data.data().0))
}

pub(crate) fn upload_rgba(
    device: &wgpu::Device,
    queue: &wgpu::Queue,
    width: u32,
    height: u32,
    pixels: &[u8],
) -> wgpu::Texture {
    let size = wgpu::Extent3d {
        width,
        height,
        depth_or_array_layers: 1,
    };
    let tex = device.create_texture(&wgpu::TextureDescriptor {
        label: Some("media_tex"),
        size,
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: wgpu::TextureFormat::Rgba8Unorm,
        usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
        view_formats: &[],
    });
    queue.write_texture(
        wgpu::TexelCopyTextureInfo {
            texture: &tex,
            mip_level: 0,
            origin: wgpu::Origin3d::ZERO,
            aspect: wgpu::TextureAspect::All,
        },
        pixels,
        wgpu::TexelCopyBufferLayout {
            offset: 0,
            bytes_per_row: Some(4 * width),
            rows_per_image: Some(height),
        },
        size,
    );
    tex
}

/// Texture for an image, or a 1x1 placeholder when its pixels cannot be read.
pub(crate) fn media_texture(
    device: &wgpu::Device,
    queue: &wgpu::Queue,
    img: &web::HtmlImageElement,
) -> wgpu::Texture {
    let max_dim = device.limits().max_texture_dimension_2d;
    match image_pixels(img, max_dim) {
        Ok((w, h, pixels)) => upload_rgba(device, queue, w, h, &pixels),
        Err(e) => {
            log::warn!("[texture] using placeholder: {:?}", e);
            upload_rgba(device, queue, 1, 1, &PLACEHOLDER_PIXEL)
        }
    }
}
