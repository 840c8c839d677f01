use crate::error::{GradientError, Result};

use super::{ColorStop, Rgba8, resolve_color_at};

/// Palette length used when a caller has no preference (one lookup-texture row).
pub const DEFAULT_STEPS: usize = 256;

/// Resolves `steps` evenly spaced colors from position 0 to 1 inclusive.
///
/// Sample `i` sits at `i / (steps - 1)`. A single-entry palette samples
/// position 0; `steps == 0` yields an empty palette.
///
/// # Errors
/// [`GradientError::EmptyGradation`] when `stops` is empty, even for `steps == 0`.
pub fn sample_colors(stops: &[ColorStop], steps: usize) -> Result<Vec<Rgba8>> {
    if stops.is_empty() {
        return Err(GradientError::EmptyGradation);
    }
    let denom = steps.saturating_sub(1);
    (0..steps)
        .map(|i| {
            let position = if denom == 0 { 0.0 } else { i as f32 / denom as f32 };
            resolve_color_at(stops, position)
        })
        .collect()
}

/// Like [`sample_colors`], packed as `0xRRGGBBAA`.
///
/// # Errors
/// [`GradientError::EmptyGradation`] when `stops` is empty.
pub fn sample_gradient(stops: &[ColorStop], steps: usize) -> Result<Vec<u32>> {
    Ok(sample_colors(stops, steps)?.into_iter().map(Rgba8::to_u32).collect())
}

/// Raw RGBA bytes of a palette, suitable for an `Rgba8Unorm` texture row.
#[inline]
pub fn palette_bytes(palette: &[Rgba8]) -> &[u8] {
    bytemuck::cast_slice(palette)
}
