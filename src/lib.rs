#![cfg(target_arch = "wasm32")]
use instant::Instant;
use museum_core::{
    DetectionSource, FaceSample, Gallery, HeadInput, Mailbox, TrackingError, TrackingReport,
    TrackingStatus, Viewer, ViewerSettings,
};
use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod constants;
mod dom;
mod events;
mod frame;
mod hud;
mod input;
mod render;

// ---------------- Face tracker glue (module script in web/index.html) ----------------

#[wasm_bindgen]
extern "C" {
    /// Opens the camera and starts the landmark loop. Results arrive through
    /// `push_face_landmarks` and `report_tracking_status`.
    #[wasm_bindgen(js_namespace = museumTracker, js_name = start, catch)]
    fn tracker_start() -> Result<(), JsValue>;

    #[wasm_bindgen(js_namespace = museumTracker, js_name = stop, catch)]
    fn tracker_stop() -> Result<(), JsValue>;
}

struct WebDetector;

impl DetectionSource for WebDetector {
    fn start(&mut self) -> Result<(), TrackingError> {
        tracker_start().map_err(|e| TrackingError::classify(js_error_text(&e)))
    }

    fn stop(&mut self) {
        if let Err(e) = tracker_stop() {
            log::warn!("[tracking] stop failed: {}", js_error_text(&e));
        }
    }
}

fn js_error_text(e: &JsValue) -> String {
    e.as_string()
        .or_else(|| {
            e.dyn_ref::<js_sys::Error>()
                .map(|err| String::from(err.message()))
        })
        .unwrap_or_else(|| format!("{e:?}"))
}

/// Inboxes the tracker glue posts into; the frame loop drains them.
struct Bridge {
    head: Arc<Mailbox<HeadInput>>,
    status: Arc<Mailbox<TrackingReport>>,
}

thread_local! {
    static BRIDGE: RefCell<Option<Bridge>> = const { RefCell::new(None) };
}

/// Landmarks of the first detected face as a flat `[x0, y0, x1, y1, ...]` buffer
/// in normalized video coordinates.
#[wasm_bindgen]
pub fn push_face_landmarks(xy: &[f32]) {
    let Some(sample) = FaceSample::from_flat_xy(xy) else {
        return;
    };
    BRIDGE.with(|b| {
        if let Some(b) = b.borrow().as_ref() {
            b.head.post(HeadInput::Face(sample));
        }
    });
}

/// Status change from the tracker glue: `starting`, `ready`, `denied` or `error`.
#[wasm_bindgen]
pub fn report_tracking_status(status: &str, detail: &str) {
    let report = match TrackingStatus::parse(status) {
        // failures are re-classified so permission errors read as denied
        TrackingStatus::Error => TrackingError::classify(detail).report(),
        s => TrackingReport::new(s, detail),
    };
    BRIDGE.with(|b| {
        if let Some(b) = b.borrow().as_ref() {
            b.status.post(report);
        }
    });
}

fn wire_canvas_resize(canvas: &web::HtmlCanvasElement) {
    dom::sync_canvas_backing_size(canvas);
    let canvas_resize = canvas.clone();
    let resize_closure = Closure::wrap(Box::new(move || {
        dom::sync_canvas_backing_size(&canvas_resize);
    }) as Box<dyn FnMut()>);
    if let Some(window) = web::window() {
        _ = window
            .add_event_listener_with_callback("resize", resize_closure.as_ref().unchecked_ref());
    }
    resize_closure.forget();
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("museum-web starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

async fn init() -> anyhow::Result<()> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;

    let canvas_el = document
        .get_element_by_id(constants::CANVAS_ID)
        .ok_or_else(|| anyhow::anyhow!("missing #{}", constants::CANVAS_ID))?;
    let canvas: web::HtmlCanvasElement = canvas_el
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;

    // Maintain canvas internal pixel size to match CSS size * devicePixelRatio
    wire_canvas_resize(&canvas);

    // The renderer must own the canvas before the tracker asks for the camera
    let gpu = frame::init_gpu(&canvas).await;

    // Tracking starts only once the bridge can receive the tracker's reports
    let settings = ViewerSettings::default();
    let viewer = Viewer::new(
        Gallery::default(),
        Box::new(WebDetector),
        ViewerSettings {
            tracking_enabled: false,
            ..settings
        },
    );
    BRIDGE.with(|b| {
        *b.borrow_mut() = Some(Bridge {
            head: viewer.head_inbox(),
            status: viewer.status_inbox(),
        });
    });
    let viewer = Rc::new(RefCell::new(viewer));
    viewer
        .borrow_mut()
        .set_tracking_enabled(settings.tracking_enabled);

    hud::wire_controls(&document, &viewer);
    events::wire_global_keydown(viewer.clone(), canvas.clone());
    events::wire_input_handlers(events::InputWiring {
        canvas: canvas.clone(),
        viewer: viewer.clone(),
        drag: Rc::new(RefCell::new(input::DragTracker::default())),
    });

    let frame_ctx = Rc::new(RefCell::new(frame::FrameContext {
        viewer,
        canvas,
        gpu,
        hud: hud::Hud::new(document),
        last_instant: Instant::now(),
    }));
    frame::start_loop(frame_ctx);
    Ok(())
}
