use crate::blow::{self, BlowGesture};
use crate::camera::OrbitCamera;
use crate::constants::*;
use crate::controls::ControlValues;
use crate::render;
use flame_core::FlameDynamics;
use instant::Instant;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub struct FrameContext<'a> {
    pub candle: Rc<RefCell<FlameDynamics>>,
    pub camera: Rc<RefCell<OrbitCamera>>,
    pub blow: Rc<RefCell<BlowGesture>>,
    pub controls: Rc<RefCell<ControlValues>>,

    pub canvas: web::HtmlCanvasElement,
    pub gpu: Option<render::GpuState<'a>>,

    pub last_instant: Instant,
}

impl<'a> FrameContext<'a> {
    pub fn frame(&mut self) {
        let now = Instant::now();
        let dt = now - self.last_instant;
        self.last_instant = now;
        let dt_sec = dt.as_secs_f32().min(MAX_FRAME_DT_SEC);

        let outputs = {
            let mut candle = self.candle.borrow_mut();
            let controls = *self.controls.borrow();
            let command = self.blow.borrow_mut().update(
                dt_sec,
                controls.max_blow,
                controls.blow_speed,
                candle.recovery_speed(),
            );
            if let Some(command) = command {
                blow::apply_blow_command(&mut candle, command);
            }
            candle.tick(dt_sec * FLAME_CLOCK_RATE)
        };

        if let Some(g) = &mut self.gpu {
            let w = self.canvas.width();
            let h = self.canvas.height();
            g.resize_if_needed(w, h);
            let scene = {
                let mut cam = self.camera.borrow_mut();
                cam.set_aspect_from_size(w, h);
                render::SceneFrame {
                    view_proj: cam.view_proj(),
                    eye: cam.eye(),
                    flame: outputs,
                }
            };
            if let Err(e) = g.render(&scene) {
                log::error!("render error: {:?}", e);
            }
        }
    }
}

pub async fn init_gpu(canvas: &web::HtmlCanvasElement) -> Option<render::GpuState<'static>> {
    // leak a canvas clone to satisfy 'static lifetime for surface
    let leaked_canvas = Box::leak(Box::new(canvas.clone()));
    match render::GpuState::new(leaked_canvas).await {
        Ok(g) => Some(g),
        Err(e) => {
            log::error!("WebGPU init error: {:?}", e);
            None
        }
    }
}

pub fn start_loop(frame_ctx: Rc<RefCell<FrameContext<'static>>>) {
    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    let frame_ctx_tick = frame_ctx.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        frame_ctx_tick.borrow_mut().frame();
        request_frame(&tick_clone);
    }) as Box<dyn FnMut()>));
    request_frame(&tick);
}

fn request_frame(tick: &Rc<RefCell<Option<Closure<dyn FnMut()>>>>) {
    if let (Some(w), Some(cb)) = (web::window(), tick.borrow().as_ref()) {
        _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
    }
}
