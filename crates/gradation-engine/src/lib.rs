//! Gradation engine crate.
//!
//! Owns the pure parts of the gradient editor: the color model, the sorted
//! color-stop list, position → color resolution, palette sampling, and the
//! geometry/input types the interaction layer is expressed in.
//!
//! ```
//! use gradation_engine::paint::{ColorStop, Gradation, Rgba8};
//!
//! let g = Gradation::new(vec![
//!     ColorStop::new(0.0, Rgba8::BLACK),
//!     ColorStop::new(1.0, Rgba8::WHITE),
//! ]);
//! assert_eq!(g.color_at(0.5).unwrap().to_hex(), "#808080ff");
//! assert_eq!(g.sample(256).unwrap().len(), 256);
//! ```

pub mod coords;
pub mod error;
pub mod input;
pub mod logging;
pub mod paint;

pub use error::{GradientError, Result};
