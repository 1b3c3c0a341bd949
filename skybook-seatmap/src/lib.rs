pub mod element;
pub mod render;
pub mod picker;

pub use element::{SeatElement, StateTag};
pub use render::{class_benefits, format_price, render_seat_info, SeatInfoView, UiPatch};
pub use picker::{PickerError, PickerSnapshot, PickerTargets, SeatPicker};
