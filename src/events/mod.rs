mod orientation;
mod pointer;

pub use orientation::wire_device_orientation;
pub use pointer::{wire_canvas_pointer, PointerWiring};
