use crate::constants::*;
use anyhow::anyhow;
use scrollgl_core::{MediaElement, Rect, Settings, SETTING_KEYS};
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys as web;

#[inline]
pub fn window_document() -> Option<web::Document> {
    web::window().and_then(|w| w.document())
}

#[inline]
pub fn device_pixel_ratio() -> f32 {
    web::window()
        .map(|w| w.device_pixel_ratio() as f32)
        .unwrap_or(1.0)
}

#[inline]
pub fn container_size(container: &web::HtmlElement) -> (f32, f32) {
    (
        container.offset_width() as f32,
        container.offset_height() as f32,
    )
}

/// Every media element under `container`, in document order.
pub fn collect_images(container: &web::HtmlElement) -> Vec<web::HtmlImageElement> {
    let list = match container.query_selector_all(MEDIA_SELECTOR) {
        Ok(l) => l,
        Err(e) => {
            log::warn!("[dom] media query failed: {:?}", e);
            return Vec::new();
        }
    };
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|n| n.dyn_into::<web::HtmlImageElement>().ok())
        .collect()
}

/// Resolve once every image has either loaded or failed.
pub async fn wait_for_images(images: &[web::HtmlImageElement]) {
    for img in images {
        if img.complete() {
            continue;
        }
        let mut listener: Option<js_sys::Function> = None;
        let promise = js_sys::Promise::new(&mut |resolve, _reject| {
            for event in IMAGE_SETTLE_EVENTS {
                _ = img.add_event_listener_with_callback(event, &resolve);
            }
            listener = Some(resolve);
        });
        if let Err(e) = JsFuture::from(promise).await {
            log::warn!("[dom] waiting for {} failed: {:?}", img.src(), e);
        }
        if let Some(resolve) = listener {
            for event in IMAGE_SETTLE_EVENTS {
                _ = img.remove_event_listener_with_callback(event, &resolve);
            }
        }
    }
}

/// Defaults overridden by `data-scrollgl-*` attributes on the container.
/// Invalid combinations fall back to the defaults.
pub fn read_settings(container: &web::Element) -> Settings {
    let mut settings = Settings::default();
    for key in SETTING_KEYS {
        if let Some(value) = container.get_attribute(&format!("{SETTINGS_ATTR_PREFIX}{key}")) {
            if let Err(e) = settings.apply_override(key, &value) {
                log::warn!("[config] {e}");
            }
        }
    }
    if let Err(e) = settings.validate() {
        log::warn!("[config] {e}; using defaults");
        return Settings::default();
    }
    settings
}

pub fn create_canvas(
    document: &web::Document,
    container: &web::HtmlElement,
) -> anyhow::Result<web::HtmlCanvasElement> {
    let canvas: web::HtmlCanvasElement = document
        .create_element("canvas")
        .map_err(|e| anyhow!("{:?}", e))?
        .dyn_into()
        .map_err(|e| anyhow!("{:?}", e))?;
    canvas
        .set_attribute("style", CANVAS_STYLE)
        .map_err(|e| anyhow!("{:?}", e))?;
    let (w, h) = container_size(container);
    size_canvas_css(&canvas, w, h);
    canvas.set_width((w * device_pixel_ratio()).max(1.0) as u32);
    canvas.set_height((h * device_pixel_ratio()).max(1.0) as u32);
    container
        .append_child(&canvas)
        .map_err(|e| anyhow!("{:?}", e))?;
    Ok(canvas)
}

pub fn size_canvas_css(canvas: &web::HtmlCanvasElement, width: f32, height: f32) {
    let style = canvas.style();
    _ = style.set_property("width", &format!("{width}px"));
    _ = style.set_property("height", &format!("{height}px"));
}

/// An `img` mirrored by a media plane.
pub struct WebMedia {
    img: web::HtmlImageElement,
}

impl WebMedia {
    pub fn new(img: web::HtmlImageElement) -> Self {
        Self { img }
    }

    pub fn image(&self) -> &web::HtmlImageElement {
        &self.img
    }

    /// Hide the element visually while it keeps its place in layout.
    pub fn hide(&self) {
        _ = self.img.style().set_property("visibility", "hidden");
    }
}

impl MediaElement for WebMedia {
    fn bounding_rect(&self) -> Rect {
        let r = self.img.get_bounding_client_rect();
        Rect::new(
            r.left() as f32,
            r.top() as f32,
            r.width() as f32,
            r.height() as f32,
        )
    }

    fn rendered_size(&self) -> (f32, f32) {
        (self.img.offset_width() as f32, self.img.offset_height() as f32)
    }

    fn natural_size(&self) -> Option<(f32, f32)> {
        let (w, h) = (self.img.natural_width(), self.img.natural_height());
        (w > 0 && h > 0).then_some((w as f32, h as f32))
    }
}
