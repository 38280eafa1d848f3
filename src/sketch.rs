use crate::debug::{DebugPane, Pane};
use crate::dom::{self, WebMedia};
use crate::events::{self, EventSubscription};
use crate::render::GpuBackend;
use crate::resize::{self, ResizeSubscription};
use crate::scheduler::RafScheduler;
use crate::scroll::{ScrollEngine, ScrollSubscription};
use scrollgl_core::{Compositor, ScrollEvent, TickTrigger};
use std::cell::RefCell;
use std::rc::{Rc, Weak};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

type WebCompositor = Compositor<WebMedia, GpuBackend, RafScheduler>;

struct SketchState {
    container: web::HtmlElement,
    canvas: Option<web::HtmlCanvasElement>,
    compositor: Option<WebCompositor>,
    oninit: Option<js_sys::Function>,
    run_requested: bool,
    destroyed: bool,
    scroll_sub: Option<ScrollSubscription>,
    pointer_sub: Option<EventSubscription>,
    resize_sub: Option<ResizeSubscription>,
    debug: Option<DebugPane>,
}

impl SketchState {
    fn resize(&mut self) {
        let Some(c) = self.compositor.as_mut() else {
            return;
        };
        let (w, h) = dom::container_size(&self.container);
        if let Some(canvas) = &self.canvas {
            dom::size_canvas_css(canvas, w, h);
        }
        c.resize(w, h, dom::device_pixel_ratio());
    }

    fn run(&mut self) {
        if self.destroyed {
            return;
        }
        match self.compositor.as_mut() {
            Some(c) => {
                c.run();
            }
            None => self.run_requested = true,
        }
    }

    fn frame(&mut self) {
        let Some(c) = self.compositor.as_mut() else {
            return;
        };
        if let Some(d) = &self.debug {
            c.set_tunables(d.tunables(c.settings().tunables()));
        }
        c.tick(TickTrigger::Scheduled);
    }

    fn on_scroll(&mut self, ev: ScrollEvent) {
        if let Some(c) = self.compositor.as_mut() {
            c.on_scroll(ev);
        }
    }

    fn pointer_move(&mut self, x: f32, y: f32) {
        if let Some(c) = self.compositor.as_mut() {
            c.pointer_move(x, y);
        }
    }

    fn destroy(&mut self) {
        if self.destroyed {
            return;
        }
        self.destroyed = true;
        self.run_requested = false;
        self.oninit = None;
        self.scroll_sub = None;
        self.pointer_sub = None;
        self.resize_sub = None;
        self.debug = None;
        if let Some(c) = self.compositor.as_mut() {
            c.destroy();
        }
    }
}

/// Run `f` on the sketch state unless it is gone or already borrowed. A
/// trigger arriving while another one is being handled is dropped.
fn with_state(weak: &Weak<RefCell<SketchState>>, f: impl FnOnce(&mut SketchState)) {
    if let Some(shared) = weak.upgrade() {
        if let Ok(mut st) = shared.try_borrow_mut() {
            f(&mut st);
        }
    }
}

/// Renders every `img` under a container as GPU planes kept in sync with a
/// smooth-scroll engine.
#[wasm_bindgen]
pub struct Sketch {
    shared: Rc<RefCell<SketchState>>,
}

#[wasm_bindgen]
impl Sketch {
    #[wasm_bindgen(constructor)]
    pub fn new(container: web::HtmlElement, scroll: ScrollEngine, pane: Option<Pane>) -> Sketch {
        let shared = Rc::new(RefCell::new(SketchState {
            container,
            canvas: None,
            compositor: None,
            oninit: None,
            run_requested: false,
            destroyed: false,
            scroll_sub: None,
            pointer_sub: None,
            resize_sub: None,
            debug: None,
        }));
        let init_shared = shared.clone();
        spawn_local(async move {
            if let Err(e) = init(init_shared, scroll, pane).await {
                log::error!("init error: {:?}", e);
            }
        });
        Sketch { shared }
    }

    /// Called once after initialization, before the first frame.
    #[wasm_bindgen(setter)]
    pub fn set_oninit(&self, callback: Option<js_sys::Function>) {
        if let Ok(mut st) = self.shared.try_borrow_mut() {
            if !st.destroyed {
                st.oninit = callback;
            }
        }
    }

    pub fn resize(&self) {
        with_state(&Rc::downgrade(&self.shared), |st| st.resize());
    }

    pub fn run(&self) {
        with_state(&Rc::downgrade(&self.shared), |st| st.run());
    }

    pub fn destroy(&self) {
        with_state(&Rc::downgrade(&self.shared), |st| st.destroy());
    }
}

impl Sketch {
    /// Resize on window resize, debounced by the configured delay.
    pub(crate) fn watch_window_resize(&self) {
        let weak = Rc::downgrade(&self.shared);
        let delay_ms = {
            let st = self.shared.borrow();
            dom::read_settings(&st.container).resize_debounce_ms
        };
        let sub = resize::wire_debounced_resize(delay_ms, move || {
            with_state(&weak, |st| st.resize());
        });
        self.shared.borrow_mut().resize_sub = sub;
    }
}

async fn init(
    shared: Rc<RefCell<SketchState>>,
    scroll: ScrollEngine,
    pane: Option<Pane>,
) -> anyhow::Result<()> {
    let container = shared.borrow().container.clone();
    let images = dom::collect_images(&container);
    dom::wait_for_images(&images).await;
    if shared.borrow().destroyed {
        return Ok(());
    }

    let settings = dom::read_settings(&container);
    let document = dom::window_document().ok_or_else(|| anyhow::anyhow!("no document"))?;
    let canvas = dom::create_canvas(&document, &container)?;
    let backend = GpuBackend::new(canvas.clone()).await?;
    if shared.borrow().destroyed {
        canvas.remove();
        return Ok(());
    }

    let weak = Rc::downgrade(&shared);
    let frame_weak = weak.clone();
    let scheduler = RafScheduler::new(move || with_state(&frame_weak, |st| st.frame()));

    let scroll_weak = weak.clone();
    let scroll_sub = ScrollSubscription::subscribe(&scroll, move |ev| {
        with_state(&scroll_weak, |st| st.on_scroll(ev));
    });

    let media = images
        .into_iter()
        .map(|img| {
            let m = WebMedia::new(img);
            m.hide();
            m
        })
        .collect::<Vec<_>>();
    let tunables = settings.tunables();
    let compositor = Compositor::new(settings, media, backend, scheduler);

    let pointer_weak = weak.clone();
    let pointer_sub = events::wire_pointer_move(move |x, y| {
        with_state(&pointer_weak, |st| st.pointer_move(x, y));
    });

    let oninit = {
        let mut st = shared.borrow_mut();
        st.canvas = Some(canvas);
        st.compositor = Some(compositor);
        st.scroll_sub = scroll_sub;
        st.pointer_sub = pointer_sub;
        st.resize();
        st.debug = pane.map(|p| DebugPane::bind(p, tunables));
        st.oninit.take()
    };
    log::info!("[sketch] initialized");

    if let Some(cb) = oninit {
        if let Err(e) = cb.call0(&JsValue::NULL) {
            log::error!("oninit threw: {:?}", e);
        }
    }

    let mut st = shared.borrow_mut();
    if st.run_requested {
        st.run_requested = false;
        st.run();
    }
    Ok(())
}
