use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

#[inline]
pub fn window_document() -> Option<web::Document> {
    web::window().and_then(|w| w.document())
}

#[inline]
pub fn add_click_listener(
    document: &web::Document,
    element_id: &str,
    mut handler: impl FnMut() + 'static,
) {
    if let Some(el) = document.get_element_by_id(element_id) {
        let closure = Closure::wrap(Box::new(move || handler()) as Box<dyn FnMut()>);
        _ = el.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}

/// Attach the same pointer handler to several event types on one target.
pub fn add_pointer_listeners(
    target: &web::EventTarget,
    events: &[&str],
    handler: impl FnMut(web::PointerEvent) + 'static,
) {
    let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(web::PointerEvent)>);
    for ev in events {
        _ = target.add_event_listener_with_callback(ev, closure.as_ref().unchecked_ref());
    }
    closure.forget();
}

pub fn input_by_id(document: &web::Document, id: &str) -> Option<web::HtmlInputElement> {
    document
        .get_element_by_id(id)
        .and_then(|el| el.dyn_into::<web::HtmlInputElement>().ok())
}

#[inline]
pub fn input_value_f32(input: &web::HtmlInputElement) -> Option<f32> {
    input.value().trim().parse::<f32>().ok().filter(|v| v.is_finite())
}

pub fn sync_canvas_backing_size(canvas: &web::HtmlCanvasElement) {
    if let Some(w) = web::window() {
        let dpr = w.device_pixel_ratio();
        let rect = canvas.get_bounding_client_rect();
        let w_px = (rect.width() * dpr) as u32;
        let h_px = (rect.height() * dpr) as u32;
        canvas.set_width(w_px.max(1));
        canvas.set_height(h_px.max(1));
    }
}
