use std::fmt;
use std::str::FromStr;

use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};

use crate::error::{GradientError, Result};

/// Straight-alpha sRGB color with 8 bits per channel.
///
/// The canonical serialized form is the lowercase 8-digit hex string
/// `#rrggbbaa`. The layout is `#[repr(C)]` RGBA so a sampled palette can be
/// reinterpreted as texture bytes without copying.
#[repr(C)]
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash, Pod, Zeroable, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgba8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba8 {
    pub const WHITE: Self = Self::new(0xff, 0xff, 0xff, 0xff);
    pub const BLACK: Self = Self::new(0x00, 0x00, 0x00, 0xff);
    pub const TRANSPARENT: Self = Self::new(0x00, 0x00, 0x00, 0x00);

    #[inline]
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Unpacks `0xRRGGBBAA`.
    #[inline]
    pub const fn from_u32(v: u32) -> Self {
        let [r, g, b, a] = v.to_be_bytes();
        Self { r, g, b, a }
    }

    /// Packs into `0xRRGGBBAA`.
    #[inline]
    pub const fn to_u32(self) -> u32 {
        u32::from_be_bytes([self.r, self.g, self.b, self.a])
    }

    /// Parses `rgb`, `rgba`, `rrggbb` or `rrggbbaa`, with an optional leading `#`.
    ///
    /// Short forms expand each digit (`f` → `ff`). A missing alpha channel
    /// means fully opaque.
    pub fn from_hex(s: &str) -> Result<Self> {
        let invalid = || GradientError::InvalidColor(s.to_string());
        let hex = s.trim();
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid());
        }

        // Every char is an ascii hex digit, so byte slicing stays on char
        // boundaries and `from_str_radix` cannot fail on the pieces below.
        let digit = |i: usize| u8::from_str_radix(&hex[i..=i], 16).map(|d| d * 17);
        let pair = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16);

        let parsed = match hex.len() {
            3 => (digit(0), digit(1), digit(2), Ok(0xff)),
            4 => (digit(0), digit(1), digit(2), digit(3)),
            6 => (pair(0), pair(2), pair(4), Ok(0xff)),
            8 => (pair(0), pair(2), pair(4), pair(6)),
            _ => return Err(invalid()),
        };
        match parsed {
            (Ok(r), Ok(g), Ok(b), Ok(a)) => Ok(Self { r, g, b, a }),
            _ => Err(invalid()),
        }
    }

    /// Lowercase `#rrggbbaa`.
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
    }

    /// Linear blend of every channel, alpha included.
    ///
    /// `t` is clamped to `[0, 1]`; a non-finite `t` is treated as `0`.
    /// Channels round half away from zero, so the midpoint of `#000000ff` and
    /// `#ffffffff` is `#808080ff`.
    pub fn mix(self, other: Self, t: f32) -> Self {
        let t = if t.is_finite() { t.clamp(0.0, 1.0) } else { 0.0 };
        let lerp = |a: u8, b: u8| -> u8 {
            let (a, b) = (f32::from(a), f32::from(b));
            (a + (b - a) * t).round().clamp(0.0, 255.0) as u8
        };
        Self {
            r: lerp(self.r, other.r),
            g: lerp(self.g, other.g),
            b: lerp(self.b, other.b),
            a: lerp(self.a, other.a),
        }
    }
}

impl fmt::Display for Rgba8 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for Rgba8 {
    type Err = GradientError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_hex(s)
    }
}

impl TryFrom<String> for Rgba8 {
    type Error = GradientError;

    fn try_from(s: String) -> Result<Self> {
        Self::from_hex(&s)
    }
}

impl From<Rgba8> for String {
    fn from(c: Rgba8) -> Self {
        c.to_hex()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hex(s: &str) -> Rgba8 { Rgba8::from_hex(s).unwrap() }

    // ── parsing ───────────────────────────────────────────────────────────

    #[test]
    fn parses_eight_digits() {
        assert_eq!(hex("#11223344"), Rgba8::new(0x11, 0x22, 0x33, 0x44));
    }

    #[test]
    fn parses_six_digits_as_opaque() {
        assert_eq!(hex("#aabbcc"), Rgba8::new(0xaa, 0xbb, 0xcc, 0xff));
    }

    #[test]
    fn parses_short_forms() {
        assert_eq!(hex("#f0a"), Rgba8::new(0xff, 0x00, 0xaa, 0xff));
        assert_eq!(hex("f0a8"), Rgba8::new(0xff, 0x00, 0xaa, 0x88));
    }

    #[test]
    fn parsing_is_case_insensitive() {
        assert_eq!(hex("#FFffFF00"), Rgba8::new(0xff, 0xff, 0xff, 0x00));
    }

    #[test]
    fn rejects_bad_length_and_digits() {
        assert!(Rgba8::from_hex("#12345").is_err());
        assert!(Rgba8::from_hex("#xyz").is_err());
        assert!(Rgba8::from_hex("").is_err());
        assert!(Rgba8::from_hex("#ééé").is_err());
    }

    // ── formatting / packing ──────────────────────────────────────────────

    #[test]
    fn to_hex_is_lowercase_eight_digits() {
        assert_eq!(Rgba8::new(0xAB, 0x01, 0xFF, 0x7F).to_hex(), "#ab01ff7f");
        assert_eq!(Rgba8::WHITE.to_string(), "#ffffffff");
    }

    #[test]
    fn packs_rrggbbaa() {
        let c = Rgba8::new(0x12, 0x34, 0x56, 0x78);
        assert_eq!(c.to_u32(), 0x1234_5678);
        assert_eq!(Rgba8::from_u32(0x1234_5678), c);
    }

    #[test]
    fn serde_uses_hex_string() {
        let c = Rgba8::new(0xff, 0x00, 0x00, 0xff);
        assert_eq!(serde_json::to_string(&c).unwrap(), "\"#ff0000ff\"");
        let back: Rgba8 = serde_json::from_str("\"#00f\"").unwrap();
        assert_eq!(back, Rgba8::new(0, 0, 0xff, 0xff));
        assert!(serde_json::from_str::<Rgba8>("\"nope\"").is_err());
    }

    // ── mix ───────────────────────────────────────────────────────────────

    #[test]
    fn mix_endpoints_are_exact() {
        let a = hex("#102030ff");
        let b = hex("#f0e0d000");
        assert_eq!(a.mix(b, 0.0), a);
        assert_eq!(a.mix(b, 1.0), b);
    }

    #[test]
    fn mix_midpoint_rounds_up() {
        assert_eq!(Rgba8::BLACK.mix(Rgba8::WHITE, 0.5), hex("#808080ff"));
    }

    #[test]
    fn mix_blends_alpha() {
        assert_eq!(Rgba8::TRANSPARENT.mix(Rgba8::BLACK, 0.5), hex("#00000080"));
    }

    #[test]
    fn mix_clamps_t() {
        let a = hex("#000000ff");
        let b = hex("#ffffffff");
        assert_eq!(a.mix(b, -3.0), a);
        assert_eq!(a.mix(b, 7.0), b);
        assert_eq!(a.mix(b, f32::NAN), a);
    }
}
