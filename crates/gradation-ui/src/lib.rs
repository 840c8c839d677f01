//! Gradation UI: editing state for a gradient stop editor.
//!
//! The host owns rendering and native event plumbing. This crate owns what
//! sits between them: the stop store, the per-handle drag state machine, and
//! the editor that routes pointer events to them.
//!
//! # Structure
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`store`] | `StopStore`, `StopId`, `StopPatch` |
//! | [`capture`] | `PointerCapture`, `CaptureLease` (global listener pairing) |
//! | [`handle`] | `Handle`, `HandleState`, `StopOp` |
//! | [`editor`] | `GradationEditor`, `EditorConfig`, `EditorLayout`, `HandleView` |
//! | [`event`] | `UiEvent`, `EventResult` |

pub mod capture;
pub mod editor;
pub mod event;
pub mod handle;
pub mod store;

pub use editor::{EditorConfig, EditorLayout, GradationEditor, HandleView};
pub use event::{EventResult, UiEvent};
pub use store::{StopId, StopPatch, StopStore};

/// Everything a host needs to embed the editor.
pub mod prelude {
    pub use crate::capture::{CaptureLease, PointerCapture};
    pub use crate::editor::{EditorConfig, EditorLayout, GradationEditor, HandleView};
    pub use crate::event::{EventResult, UiEvent};
    pub use crate::handle::{DEFAULT_REMOVE_THRESHOLD, Handle, HandleState, StopOp};
    pub use crate::store::{StopEntry, StopId, StopPatch, StopStore};

    pub use gradation_engine::coords::{Rect, Vec2};
    pub use gradation_engine::input::InputEvent;
    pub use gradation_engine::paint::{ColorStop, Gradation, Rgba8};
}
