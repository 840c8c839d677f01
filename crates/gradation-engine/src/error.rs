use thiserror::Error;

/// Errors produced by the color model and the resolver.
///
/// Store-level no-ops (unknown stop id, add beyond the stop cap) are not
/// errors and never surface here.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GradientError {
    /// The resolver was handed a gradation with no stops.
    #[error("invalid gradation: at least one color stop is required")]
    EmptyGradation,

    /// A color string could not be parsed as hex RGB(A).
    #[error("invalid color {0:?}: expected #rgb, #rgba, #rrggbb or #rrggbbaa")]
    InvalidColor(String),
}

pub type Result<T> = std::result::Result<T, GradientError>;
