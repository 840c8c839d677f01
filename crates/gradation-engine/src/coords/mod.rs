//! Geometry shared by the editor and its host.
//!
//! Canonical space:
//! - Logical pixels, the same units the host reports pointer coordinates in
//! - Origin top-left
//! - +X right, +Y down

mod rect;
mod vec2;

pub use rect::Rect;
pub use vec2::Vec2;
