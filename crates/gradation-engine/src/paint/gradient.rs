use std::ops::Deref;

use serde::{Deserialize, Serialize};

use crate::error::Result;

use super::Rgba8;

/// A single gradient stop.
///
/// `position` is a fraction along the gradient axis, normally in [0, 1].
/// Positions need not be unique.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColorStop {
    pub position: f32,
    pub color: Rgba8,
}

impl ColorStop {
    #[inline]
    pub const fn new(position: f32, color: Rgba8) -> Self {
        Self { position, color }
    }
}

/// Ordered list of color stops defining a gradient.
///
/// Invariant: stops are sorted ascending by `position`. Sorting is stable, so
/// stops sharing a position keep their relative order. Deserialized input is
/// sorted the same way, which lets the resolver assume monotonic order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<ColorStop>", into = "Vec<ColorStop>")]
pub struct Gradation(Vec<ColorStop>);

impl Gradation {
    pub fn new(mut stops: Vec<ColorStop>) -> Self {
        sort_stops(&mut stops);
        Self(stops)
    }

    #[inline]
    pub fn stops(&self) -> &[ColorStop] {
        &self.0
    }

    #[inline]
    pub fn into_stops(self) -> Vec<ColorStop> {
        self.0
    }

    /// Interpolated color at `position`. See [`super::resolve_color_at`].
    pub fn color_at(&self, position: f32) -> Result<Rgba8> {
        super::resolve_color_at(&self.0, position)
    }

    /// Packed `0xRRGGBBAA` palette of `steps` entries. See [`super::sample_gradient`].
    pub fn sample(&self, steps: usize) -> Result<Vec<u32>> {
        super::sample_gradient(&self.0, steps)
    }

    /// CSS background equivalent to this gradation, left to right.
    ///
    /// ```
    /// use gradation_engine::paint::{ColorStop, Gradation, Rgba8};
    ///
    /// let g = Gradation::new(vec![
    ///     ColorStop::new(0.0, Rgba8::BLACK),
    ///     ColorStop::new(0.5, Rgba8::WHITE),
    /// ]);
    /// assert_eq!(g.to_css(), "linear-gradient(to right, #000000ff 0%, #ffffffff 50%)");
    /// ```
    pub fn to_css(&self) -> String {
        let stops: Vec<String> = self
            .0
            .iter()
            .map(|s| format!("{} {}%", s.color, s.position * 100.0))
            .collect();
        format!("linear-gradient(to right, {})", stops.join(", "))
    }
}

impl Deref for Gradation {
    type Target = [ColorStop];

    fn deref(&self) -> &[ColorStop] {
        &self.0
    }
}

impl From<Vec<ColorStop>> for Gradation {
    fn from(stops: Vec<ColorStop>) -> Self {
        Self::new(stops)
    }
}

impl From<Gradation> for Vec<ColorStop> {
    fn from(g: Gradation) -> Self {
        g.0
    }
}

impl FromIterator<ColorStop> for Gradation {
    fn from_iter<I: IntoIterator<Item = ColorStop>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// Stable ascending sort by position.
///
/// `total_cmp` keeps the ordering total even if a NaN slips in; NaN sorts last.
pub fn sort_stops(stops: &mut [ColorStop]) {
    stops.sort_by(|a, b| a.position.total_cmp(&b.position));
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn stop(p: f32, hex: &str) -> ColorStop {
        ColorStop::new(p, Rgba8::from_hex(hex).unwrap())
    }

    #[test]
    fn new_sorts_by_position() {
        let g = Gradation::new(vec![stop(1.0, "#fff"), stop(0.0, "#000"), stop(0.5, "#f00")]);
        let positions: Vec<f32> = g.iter().map(|s| s.position).collect();
        assert_eq!(positions, vec![0.0, 0.5, 1.0]);
    }

    #[test]
    fn sort_is_stable_for_equal_positions() {
        let g = Gradation::new(vec![stop(0.5, "#f00"), stop(0.0, "#000"), stop(0.5, "#0f0")]);
        assert_eq!(g[1].color, Rgba8::from_hex("#f00").unwrap());
        assert_eq!(g[2].color, Rgba8::from_hex("#0f0").unwrap());
    }

    #[test]
    fn serializes_as_plain_array() {
        let g = Gradation::new(vec![stop(0.0, "#ff0000ff"), stop(1.0, "#0000ffff")]);
        let json = serde_json::to_string(&g).unwrap();
        assert_eq!(
            json,
            r##"[{"position":0.0,"color":"#ff0000ff"},{"position":1.0,"color":"#0000ffff"}]"##
        );
    }

    #[test]
    fn deserialization_sorts() {
        let g: Gradation = serde_json::from_str(
            r##"[{"position":0.75,"color":"#ffffff"},{"position":0.25,"color":"#000000"}]"##,
        )
        .unwrap();
        assert_eq!(g[0].position, 0.25);
        assert_eq!(g[1].position, 0.75);
    }

    #[test]
    fn css_lists_stops_in_order() {
        let g = Gradation::new(vec![stop(1.0, "#0000ffff"), stop(0.25, "#ff0000ff")]);
        assert_eq!(
            g.to_css(),
            "linear-gradient(to right, #ff0000ff 25%, #0000ffff 100%)"
        );
    }
}
