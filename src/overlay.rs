use crate::status;
use flame_core::{CandleSnapshot, ChangeNotifier, SubscriptionHandle, CANDLE_STATE_CHANGED};
use web_sys as web;

const STATUS_PANEL_ID: &str = "status-panel";

#[inline]
pub fn has_status_panel(document: &web::Document) -> bool {
    document.get_element_by_id(STATUS_PANEL_ID).is_some()
}

fn set_text(document: &web::Document, id: &str, text: &str) -> anyhow::Result<web::Element> {
    let el = document
        .get_element_by_id(id)
        .ok_or_else(|| anyhow::anyhow!("missing #{}", id))?;
    el.set_text_content(Some(text));
    Ok(el)
}

/// Write one snapshot into the status panel.
pub fn render_status(document: &web::Document, snapshot: &CandleSnapshot) -> anyhow::Result<()> {
    let text = status::format_status(snapshot);
    let state_el = set_text(document, "flame-status", text.state_label)?;
    state_el.set_class_name(text.state_class);
    set_text(document, "current-blow-strength", &text.blow_strength)?;
    set_text(document, "current-flame-size", &text.flame_size)?;
    set_text(document, "current-light-intensity", &text.light_intensity)?;
    Ok(())
}

/// Keep the status panel in sync with candle state changes.
pub fn wire_status_panel(
    document: &web::Document,
    notifier: &ChangeNotifier<CandleSnapshot>,
    initial: &CandleSnapshot,
) -> Option<SubscriptionHandle> {
    if !has_status_panel(document) {
        log::info!("[status] no #{} in page, panel disabled", STATUS_PANEL_ID);
        return None;
    }
    if let Err(e) = render_status(document, initial) {
        log::warn!("[status] initial render failed: {:#}", e);
    }
    let doc = document.clone();
    Some(notifier.subscribe(CANDLE_STATE_CHANGED, move |snapshot| {
        render_status(&doc, snapshot)
    }))
}
