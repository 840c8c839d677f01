use crate::error::{GradientError, Result};

use super::{ColorStop, Rgba8};

/// Interpolated color of a sorted stop list at `position`.
///
/// Policy:
/// - `position` at or left of the first stop → first stop's color.
/// - `position` at or right of the last stop → last stop's color.
/// - otherwise the bracketing pair `[left, right]` is the last stop strictly
///   left of `position` and its successor; the result is their RGBA blend.
/// - a zero-width (or non-finite) bracket yields the left stop's color.
///
/// `stops` must already be sorted by position (a [`super::Gradation`] always is).
///
/// # Errors
/// [`GradientError::EmptyGradation`] when `stops` is empty.
pub fn resolve_color_at(stops: &[ColorStop], position: f32) -> Result<Rgba8> {
    let (first, last) = match (stops.first(), stops.last()) {
        (Some(first), Some(last)) => (first, last),
        _ => return Err(GradientError::EmptyGradation),
    };

    if position <= first.position {
        return Ok(first.color);
    }
    if position >= last.position {
        return Ok(last.color);
    }

    // Number of leading stops strictly left of `position`; the bracket is
    // `[count - 1, count]`. `count == 0` only happens for NaN input here.
    let count = stops.iter().take_while(|s| s.position < position).count();
    if count == 0 {
        return Ok(first.color);
    }
    let Some(right) = stops.get(count) else {
        return Ok(last.color);
    };
    let left = &stops[count - 1];

    let width = right.position - left.position;
    let t = (position - left.position) / width;
    if width <= 0.0 || !t.is_finite() {
        log::trace!(
            "degenerate interval [{}, {}] at {position}; using left stop",
            left.position,
            right.position
        );
        return Ok(left.color);
    }

    Ok(left.color.mix(right.color, t))
}
