mod chrome;
mod layout;

pub use chrome::{controls_segments, draw_controls, draw_opening_overlay};
pub use layout::{UiLayout, split_layout};
