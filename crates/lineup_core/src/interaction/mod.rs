pub mod controller;
pub mod pointer;
pub mod status;
pub mod throttle;

pub use controller::{ClickOutcome, ControllerState, DragController};
pub use pointer::{FieldRect, PointerPosition};
pub use status::{StatusBoard, StatusKind, StatusMessage, StatusSeverity, StatusSink};
pub use throttle::Throttle;
