//! Color model and gradient math shared between the editor and renderers.
//!
//! Scope:
//! - 8-bit straight-alpha color with hex (de)serialization
//! - color stops and the sorted `Gradation`
//! - position → color resolution and fixed-size palette sampling
//!
//! Everything here is pure; editing state lives in `gradation-ui`.

pub mod color;
pub mod gradient;
mod resolve;
mod sample;

pub use color::Rgba8;
pub use gradient::{ColorStop, Gradation, sort_stops};
pub use resolve::resolve_color_at;
pub use sample::{DEFAULT_STEPS, palette_bytes, sample_colors, sample_gradient};
