use flame_core::CandleSnapshot;

/// Text shown in the status panel for one snapshot.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StatusText {
    pub state_label: &'static str,
    pub state_class: &'static str,
    pub blow_strength: String,
    pub flame_size: String,
    pub light_intensity: String,
}

pub fn format_status(snapshot: &CandleSnapshot) -> StatusText {
    let (state_label, state_class) = if snapshot.is_lit {
        ("Lit", "status-value on")
    } else {
        ("Out", "status-value off")
    };
    StatusText {
        state_label,
        state_class,
        blow_strength: format!("{:.2}", snapshot.blow_strength),
        flame_size: format!("{:.2}", snapshot.flame_size),
        light_intensity: format!("{:.1}", snapshot.light_intensity),
    }
}

/// Label next to a slider, trimmed the way the slider step implies.
pub fn format_slider_value(value: f32, step: f32) -> String {
    let decimals = if step >= 1.0 {
        0
    } else if step >= 0.1 {
        1
    } else {
        2
    };
    format!("{:.*}", decimals, value)
}
