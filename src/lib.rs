#![cfg(target_arch = "wasm32")]
use flame_core::{CandleOptions, CandleSnapshot, ChangeNotifier, FlameDynamics};
use instant::Instant;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod blow;
mod camera;
mod constants;
mod controls;
mod dom;
mod events;
mod frame;
mod input;
mod mesh;
mod overlay;
mod render;
mod status;

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
    log::info!("candle-web starting");

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
        .get_element_by_id("candle-canvas")
        .ok_or_else(|| anyhow::anyhow!("missing #candle-canvas"))?;
    let canvas: web::HtmlCanvasElement = canvas_el
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;

    // Maintain canvas internal pixel size to match CSS size * devicePixelRatio
    wire_canvas_resize(&canvas);

    let options = CandleOptions::default();
    let notifier: Rc<ChangeNotifier<CandleSnapshot>> = Rc::new(ChangeNotifier::new());
    let candle = FlameDynamics::new(&options, notifier.clone())?;
    let initial = candle.snapshot();
    let candle = Rc::new(RefCell::new(candle));

    // handle lives as long as the page; nothing unsubscribes
    let _status = overlay::wire_status_panel(&document, &notifier, &initial);

    let aspect = canvas.width().max(1) as f32 / canvas.height().max(1) as f32;
    let camera = Rc::new(RefCell::new(camera::OrbitCamera::new(
        options.camera_distance,
        options.camera_height,
        aspect,
    )));
    let blow = Rc::new(RefCell::new(blow::BlowGesture::default()));
    let values = Rc::new(RefCell::new(controls::ControlValues::default()));

    events::wire_canvas_pointer(events::PointerWiring {
        canvas: canvas.clone(),
        candle: candle.clone(),
        camera: camera.clone(),
        tracker: Rc::new(RefCell::new(input::PointerTracker::default())),
    });
    events::wire_device_orientation(candle.clone());
    controls::wire_controls(
        &document,
        controls::ControlWiring {
            candle: candle.clone(),
            camera: camera.clone(),
            blow: blow.clone(),
            values: values.clone(),
        },
    );

    let gpu = frame::init_gpu(&canvas).await;
    if gpu.is_none() {
        log::warn!("[gpu] unavailable, candle state still runs without rendering");
    }

    let frame_ctx = Rc::new(RefCell::new(frame::FrameContext {
        candle,
        camera,
        blow,
        controls: values,
        canvas,
        gpu,
        last_instant: Instant::now(),
    }));
    frame::start_loop(frame_ctx);
    Ok(())
}
