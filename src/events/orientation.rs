use crate::input;
use flame_core::{FlameDynamics, DEFAULT_GRAVITY};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys as web;

/// Lean the flame with the device's tilt.
pub fn wire_device_orientation(candle: Rc<RefCell<FlameDynamics>>) {
    let Some(window) = web::window() else {
        return;
    };
    let closure = Closure::wrap(Box::new(move |ev: web::DeviceOrientationEvent| {
        let g = input::gravity_from_orientation(ev.beta(), ev.gamma(), DEFAULT_GRAVITY[1]);
        candle.borrow_mut().set_gravity(g.x, g.y, g.z);
    }) as Box<dyn FnMut(_)>);
    _ = window.add_event_listener_with_callback("deviceorientation", closure.as_ref().unchecked_ref());
    closure.forget();
}

/// Ask for motion sensor access where the browser gates it (iOS Safari).
/// Must run inside a user gesture; a no-op elsewhere.
pub fn request_orientation_permission() {
    let global = js_sys::global();
    let Ok(ctor) = js_sys::Reflect::get(&global, &JsValue::from_str("DeviceOrientationEvent")) else {
        return;
    };
    let Ok(request) = js_sys::Reflect::get(&ctor, &JsValue::from_str("requestPermission")) else {
        return;
    };
    let Some(request) = request.dyn_ref::<js_sys::Function>() else {
        return;
    };
    let promise = match request.call0(&ctor) {
        Ok(p) => p,
        Err(e) => {
            log::warn!("[tilt] requestPermission failed: {:?}", e);
            return;
        }
    };
    let Ok(promise) = promise.dyn_into::<js_sys::Promise>() else {
        return;
    };
    spawn_local(async move {
        match JsFuture::from(promise).await {
            Ok(state) => log::info!("[tilt] permission {:?}", state.as_string()),
            Err(e) => log::warn!("[tilt] permission denied: {:?}", e),
        }
    });
}
