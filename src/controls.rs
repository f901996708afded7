use crate::blow::{self, BlowGesture};
use crate::camera::OrbitCamera;
use crate::constants::{DEFAULT_BLOW_SPEED, DEFAULT_MAX_BLOW};
use crate::dom;
use crate::status;
use flame_core::FlameDynamics;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

const CONTROL_PANEL_ID: &str = "control-panel";

/// Slider values read by the frame loop rather than pushed into the flame.
#[derive(Clone, Copy, Debug)]
pub struct ControlValues {
    pub max_blow: f32,
    pub blow_speed: f32,
}

impl Default for ControlValues {
    fn default() -> Self {
        Self {
            max_blow: DEFAULT_MAX_BLOW,
            blow_speed: DEFAULT_BLOW_SPEED,
        }
    }
}

#[derive(Clone)]
pub struct ControlWiring {
    pub candle: Rc<RefCell<FlameDynamics>>,
    pub camera: Rc<RefCell<OrbitCamera>>,
    pub blow: Rc<RefCell<BlowGesture>>,
    pub values: Rc<RefCell<ControlValues>>,
}

pub fn wire_controls(document: &web::Document, w: ControlWiring) {
    if document.get_element_by_id(CONTROL_PANEL_ID).is_none() {
        log::info!("[controls] no #{} in page, controls disabled", CONTROL_PANEL_ID);
        return;
    }

    let candle = w.candle.clone();
    dom::add_click_listener(document, "toggle-btn", move || {
        candle.borrow_mut().toggle();
    });
    wire_blow_button(document, &w);

    let (values, blow, candle) = (w.values.clone(), w.blow.clone(), w.candle.clone());
    on_slider(document, "blow-strength", move |v| {
        values.borrow_mut().max_blow = v;
        let command = blow.borrow_mut().set_max(v);
        if let Some(command) = command {
            blow::apply_blow_command(&mut candle.borrow_mut(), command);
        }
    });
    let values = w.values.clone();
    on_slider(document, "blow-increment", move |v| {
        values.borrow_mut().blow_speed = v;
    });

    let candle = w.candle.clone();
    on_slider(document, "flame-size", move |v| candle.borrow_mut().set_flame_size(v));
    let candle = w.candle.clone();
    on_slider(document, "recovery-speed", move |v| {
        candle.borrow_mut().set_recovery_speed(v)
    });
    let candle = w.candle.clone();
    on_slider(document, "light-intensity", move |v| {
        candle.borrow_mut().set_light_intensity(v)
    });
    let candle = w.candle.clone();
    on_slider(document, "light-distance", move |v| {
        candle.borrow_mut().set_light_distance(v)
    });

    let camera = w.camera.clone();
    on_slider(document, "camera-distance", move |v| {
        camera.borrow_mut().distance = v.max(1e-3);
    });
    let camera = w.camera.clone();
    on_slider(document, "camera-height", move |v| {
        camera.borrow_mut().height = v;
    });

    // seed from whatever the markup starts with
    let slider_value =
        |id: &str| dom::input_by_id(document, id).and_then(|i| dom::input_value_f32(&i));
    if let Some(v) = slider_value("blow-strength") {
        w.values.borrow_mut().max_blow = v;
    }
    if let Some(v) = slider_value("blow-increment") {
        w.values.borrow_mut().blow_speed = v;
    }
}

fn wire_blow_button(document: &web::Document, w: &ControlWiring) {
    let Some(btn) = document.get_element_by_id("blow-btn") else {
        return;
    };
    let blow = w.blow.clone();
    dom::add_pointer_listeners(&btn, &["pointerdown"], move |_ev| {
        blow.borrow_mut().press();
    });
    let blow = w.blow.clone();
    dom::add_pointer_listeners(
        &btn,
        &["pointerup", "pointerleave", "pointercancel"],
        move |_ev| {
            blow.borrow_mut().release();
        },
    );
}

/// Run `handler` on every `input` event of a range slider and mirror the
/// value into the label that follows it.
fn on_slider(document: &web::Document, id: &str, mut handler: impl FnMut(f32) + 'static) {
    let Some(input) = dom::input_by_id(document, id) else {
        log::warn!("[controls] missing slider #{}", id);
        return;
    };
    let step = input.step().parse::<f32>().unwrap_or(1.0);
    let label = input.next_element_sibling();
    let update_label = move |v: f32| {
        if let Some(label) = &label {
            label.set_text_content(Some(&status::format_slider_value(v, step)));
        }
    };
    if let Some(v) = dom::input_value_f32(&input) {
        update_label(v);
    }

    let input_for_cb = input.clone();
    let closure = Closure::wrap(Box::new(move |_ev: web::Event| {
        if let Some(v) = dom::input_value_f32(&input_for_cb) {
            update_label(v);
            handler(v);
        }
    }) as Box<dyn FnMut(_)>);
    _ = input.add_event_listener_with_callback("input", closure.as_ref().unchecked_ref());
    closure.forget();
}
