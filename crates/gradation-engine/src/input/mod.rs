//! Input subsystem.
//!
//! Public API is platform-agnostic. Hosts translate their native pointer
//! events (DOM, winit, …) into `InputEvent`s before handing them to the editor.

mod types;

pub use types::{InputEvent, MouseButton, MouseButtonState, PointerButtonEvent, PointerMoveEvent};
