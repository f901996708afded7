pub mod constants;
pub mod flame;
pub mod notifier;
pub mod options;

pub static CANDLE_WGSL: &str = include_str!("../../../shaders/candle.wgsl");

pub use constants::*;
pub use flame::*;
pub use notifier::*;
pub use options::*;
