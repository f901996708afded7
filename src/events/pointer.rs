use crate::camera::{self, OrbitCamera};
use crate::dom;
use crate::events::orientation;
use crate::input::{self, PointerRelease, PointerTracker};
use flame_core::FlameDynamics;
use glam::Vec2;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use web_sys as web;

#[derive(Clone)]
pub struct PointerWiring {
    pub canvas: web::HtmlCanvasElement,
    pub candle: Rc<RefCell<FlameDynamics>>,
    pub camera: Rc<RefCell<OrbitCamera>>,
    pub tracker: Rc<RefCell<PointerTracker>>,
}

/// Orbit on drag, toggle the candle on a click that hits it.
pub fn wire_canvas_pointer(w: PointerWiring) {
    wire_pointerdown(&w);
    wire_pointermove(&w);
    wire_pointerup(&w);
    wire_pointerleave(&w);
}

#[inline]
fn pointer_canvas_px(ev: &web::PointerEvent, canvas: &web::HtmlCanvasElement) -> Vec2 {
    let rect = canvas.get_bounding_client_rect();
    Vec2::new(
        (ev.client_x() as f64 - rect.left()) as f32,
        (ev.client_y() as f64 - rect.top()) as f32,
    )
}

fn wire_pointerdown(w: &PointerWiring) {
    let w = w.clone();
    let asked_permission = Rc::new(Cell::new(false));
    let target = w.canvas.clone();
    dom::add_pointer_listeners(&target, &["pointerdown"], move |ev| {
        if !asked_permission.replace(true) {
            orientation::request_orientation_permission();
        }
        let pos = pointer_canvas_px(&ev, &w.canvas);
        w.tracker.borrow_mut().press(pos);
        _ = w.canvas.set_pointer_capture(ev.pointer_id());
    });
}

fn wire_pointermove(w: &PointerWiring) {
    let w = w.clone();
    let target = w.canvas.clone();
    dom::add_pointer_listeners(&target, &["pointermove"], move |ev| {
        let pos = pointer_canvas_px(&ev, &w.canvas);
        let dx = w.tracker.borrow_mut().move_to(pos);
        if let Some(dx) = dx {
            w.camera.borrow_mut().orbit_by_pixels(dx);
        }
    });
}

fn wire_pointerup(w: &PointerWiring) {
    let w = w.clone();
    let target = w.canvas.clone();
    dom::add_pointer_listeners(&target, &["pointerup"], move |ev| {
        let pos = pointer_canvas_px(&ev, &w.canvas);
        _ = w.canvas.release_pointer_capture(ev.pointer_id());
        let release = w.tracker.borrow_mut().release(pos);
        if let PointerRelease::Click(px) = release {
            let rect = w.canvas.get_bounding_client_rect();
            let ndc = camera::css_px_to_ndc(px, rect.width() as f32, rect.height() as f32);
            let (ro, rd) = w.camera.borrow().ray_from_ndc(ndc);
            if input::pick_candle(ro, rd).is_some() {
                log::info!("[pointer] candle clicked");
                w.candle.borrow_mut().toggle();
            }
        }
    });
}

fn wire_pointerleave(w: &PointerWiring) {
    let tracker = w.tracker.clone();
    dom::add_pointer_listeners(&w.canvas, &["pointerleave", "pointercancel"], move |_ev| {
        tracker.borrow_mut().cancel();
    });
}
