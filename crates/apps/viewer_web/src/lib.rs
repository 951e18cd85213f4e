use console_error_panic_hook::set_once;
use gloo_events::{EventListener, EventListenerOptions};
use gloo_render::{AnimationFrame, request_animation_frame};
use rand::SeedableRng;
use rand::rngs::SmallRng;
use std::cell::RefCell;
use std::rc::{Rc, Weak};
use tracing::debug;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, HtmlCanvasElement, HtmlElement, HtmlImageElement};

use render::{FrameStats, SphereRenderer, ViewerConfig};
use runtime::AnimationHandle;
use scene::camera::SphereController;
use scene::cloud::PointCloud;
use scene::config::SphereConfig;
use scene::files::FileRef;
use streaming::{ImageCache, LoadProbe};

mod canvas;
use canvas::CanvasSurface;

const CAPTION: &str = "Drag to Rotate \u{2022} Scroll to Zoom";

const CANVAS_STYLE: &str = "display:block;width:100%;height:100%;cursor:grab;touch-action:none;";
const CAPTION_STYLE: &str = "position:absolute;left:0;right:0;bottom:12px;text-align:center;\
font:12px system-ui,-apple-system,Segoe UI,Roboto,sans-serif;color:#64748b;\
pointer-events:none;user-select:none;";

#[wasm_bindgen(start)]
pub fn start() {
    set_once();
}

/// Per-instance state shared between the frame loop and the input listeners.
struct Visualizer {
    container: HtmlElement,
    surface: CanvasSurface,
    caption: Element,
    config: SphereConfig,
    renderer: SphereRenderer,
    controller: SphereController,
    cloud: PointCloud,
    files: Vec<FileRef>,
    images: ImageCache<HtmlImageElement>,
    rng: SmallRng,
    animation: AnimationHandle<AnimationFrame>,
    last_stats: FrameStats,
}

impl Visualizer {
    fn set_files(&mut self, files: Vec<FileRef>) {
        let regenerated = self
            .cloud
            .sync(&files, &self.config.generator, &mut self.rng);
        self.files = files;
        if regenerated {
            let dropped = self.images.reset();
            debug!(dropped, files = self.files.len(), "file list changed");
        }

        for file in self.files.iter().filter(|f| f.is_image()) {
            self.images.request(&file.id, || load_image(&file.content));
        }
    }

    fn draw(&mut self) {
        let width = self.container.client_width().max(0) as u32;
        let height = self.container.client_height().max(0) as u32;
        self.surface.resize(width, height);

        self.images.poll(probe_image);

        let camera = self.controller.camera();
        self.last_stats = self.renderer.render(
            &mut self.surface,
            self.cloud.points(),
            &self.files,
            &camera,
            &self.images,
        );
    }

    fn set_cursor(&self, cursor: &str) {
        let _ = self.surface.canvas().style().set_property("cursor", cursor);
    }
}

fn load_image(src: &str) -> Result<HtmlImageElement, String> {
    let img = HtmlImageElement::new().map_err(|e| format!("{e:?}"))?;
    img.set_src(src);
    Ok(img)
}

fn probe_image(img: &HtmlImageElement) -> LoadProbe {
    if !img.complete() {
        LoadProbe::Pending
    } else if img.natural_width() > 0 {
        LoadProbe::Ready
    } else {
        LoadProbe::Failed
    }
}

fn schedule_frame(state: &Rc<RefCell<Visualizer>>) {
    let weak = Rc::downgrade(state);
    let handle = request_animation_frame(move |_timestamp| run_frame(&weak));
    state.borrow_mut().animation.schedule(handle);
}

fn run_frame(weak: &Weak<RefCell<Visualizer>>) {
    let Some(state) = weak.upgrade() else {
        return;
    };
    {
        let mut v = state.borrow_mut();
        let Some(frame) = v.animation.begin_frame() else {
            return;
        };
        if frame.is_first() {
            debug!(points = v.cloud.points().len(), "sphere loop started");
        }
        v.draw();
    }
    schedule_frame(&state);
}

fn pointer_pos(event: &web_sys::Event) -> Option<[f64; 2]> {
    let event = event.dyn_ref::<web_sys::MouseEvent>()?;
    Some([event.client_x() as f64, event.client_y() as f64])
}

fn install_listeners(
    state: &Rc<RefCell<Visualizer>>,
    canvas: &HtmlCanvasElement,
) -> Vec<EventListener> {
    let mut listeners = Vec::new();

    let s = Rc::clone(state);
    listeners.push(EventListener::new(canvas, "pointerdown", move |event| {
        let Some(pos) = pointer_pos(event) else {
            return;
        };
        let mut v = s.borrow_mut();
        v.controller.on_pointer_down(pos);
        v.set_cursor("grabbing");
    }));

    let s = Rc::clone(state);
    listeners.push(EventListener::new(canvas, "pointermove", move |event| {
        if let Some(pos) = pointer_pos(event) {
            s.borrow_mut().controller.on_pointer_move(pos);
        }
    }));

    for kind in ["pointerup", "pointerleave"] {
        let s = Rc::clone(state);
        listeners.push(EventListener::new(canvas, kind, move |_event| {
            let mut v = s.borrow_mut();
            if kind == "pointerleave" {
                v.controller.on_pointer_leave();
            } else {
                v.controller.on_pointer_up();
            }
            v.set_cursor("grab");
        }));
    }

    let s = Rc::clone(state);
    listeners.push(EventListener::new_with_options(
        canvas,
        "wheel",
        EventListenerOptions::enable_prevent_default(),
        move |event| {
            let Some(wheel) = event.dyn_ref::<web_sys::WheelEvent>() else {
                return;
            };
            wheel.prevent_default();
            s.borrow_mut().controller.on_wheel(wheel.delta_y());
        },
    ));

    listeners
}

fn create_child(
    document: &Document,
    parent: &HtmlElement,
    tag: &str,
    style: &str,
) -> Result<Element, JsValue> {
    let el = document.create_element(tag)?;
    el.set_attribute("style", style)?;
    parent.append_child(&el)?;
    Ok(el)
}

/// Interactive point-cloud sphere mounted inside a container element.
#[wasm_bindgen]
pub struct ContextVisualizer {
    state: Rc<RefCell<Visualizer>>,
    listeners: Vec<EventListener>,
}

#[wasm_bindgen]
impl ContextVisualizer {
    #[wasm_bindgen(constructor)]
    pub fn new(container_id: &str) -> Result<ContextVisualizer, JsValue> {
        Self::mount(container_id, ViewerConfig::default())
    }

    /// Mount with a JSON configuration (`{ "sphere": ..., "style": ... }`).
    pub fn with_config(
        container_id: &str,
        config_json: &str,
    ) -> Result<ContextVisualizer, JsValue> {
        let config = ViewerConfig::from_json(config_json).map_err(|e| JsValue::from_str(&e))?;
        Self::mount(container_id, config)
    }

    /// Replace the file list from a JSON array of file records.
    pub fn set_files(&self, files_json: &str) -> Result<(), JsValue> {
        let files: Vec<FileRef> =
            serde_json::from_str(files_json).map_err(|e| JsValue::from_str(&e.to_string()))?;
        self.state.borrow_mut().set_files(files);
        Ok(())
    }

    /// Counters from the most recent frame, as JSON.
    pub fn last_stats(&self) -> Result<String, JsValue> {
        serde_json::to_string(&self.state.borrow().last_stats)
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Stop the loop, detach listeners and remove the canvas. Idempotent.
    pub fn dispose(&mut self) {
        self.listeners.clear();
        let mut v = self.state.borrow_mut();
        if !v.animation.is_active() {
            return;
        }
        v.animation.stop();
        v.surface.canvas().remove();
        v.caption.remove();
    }
}

impl ContextVisualizer {
    fn mount(container_id: &str, config: ViewerConfig) -> Result<ContextVisualizer, JsValue> {
        Self::mount_inner(container_id, config).inspect_err(|err| {
            let msg = format!("sphere init error: {err:?}");
            web_sys::console::error_1(&JsValue::from_str(&msg));
        })
    }

    fn mount_inner(
        container_id: &str,
        config: ViewerConfig,
    ) -> Result<ContextVisualizer, JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("no document"))?;
        let container = document
            .get_element_by_id(container_id)
            .ok_or_else(|| JsValue::from_str(&format!("missing container #{container_id}")))?
            .dyn_into::<HtmlElement>()?;
        container.style().set_property("position", "relative")?;

        let canvas = create_child(&document, &container, "canvas", CANVAS_STYLE)?
            .dyn_into::<HtmlCanvasElement>()?;
        let caption = create_child(&document, &container, "div", CAPTION_STYLE)?;
        caption.set_text_content(Some(CAPTION));

        let seed = (js_sys::Math::random() * u64::MAX as f64) as u64;
        let mut visualizer = Visualizer {
            surface: CanvasSurface::new(canvas.clone())?,
            container,
            caption,
            renderer: config.renderer(),
            controller: SphereController::new(config.sphere.controls.clone()),
            config: config.sphere,
            cloud: PointCloud::new(),
            files: Vec::new(),
            images: ImageCache::new(),
            rng: SmallRng::seed_from_u64(seed),
            animation: AnimationHandle::new(),
            last_stats: FrameStats::default(),
        };
        visualizer.set_files(Vec::new());

        let state = Rc::new(RefCell::new(visualizer));
        let listeners = install_listeners(&state, &canvas);
        schedule_frame(&state);
        debug!(container_id, "sphere mounted");

        Ok(ContextVisualizer { state, listeners })
    }
}

impl Drop for ContextVisualizer {
    fn drop(&mut self) {
        self.dispose();
    }
}
