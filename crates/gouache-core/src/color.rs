use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{GouacheError, GouacheResult};

/// An opaque RGB color parsed from a `#rrggbb` hex string.
///
/// The canonical in-document representation of a color is the textual
/// `rgba(r, g, b, 1)` form produced by [`Color::to_rgba_string`]; hex is the
/// interchange form used by pickers and presets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    /// Create a color from its components.
    pub fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse a strict `#rrggbb` hex string (exactly 7 characters).
    pub fn from_hex(hex: &str) -> GouacheResult<Self> {
        let digits = hex
            .strip_prefix('#')
            .ok_or_else(|| GouacheError::invalid_color(hex, "missing leading '#'"))?;
        if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(GouacheError::invalid_color(hex, "expected six hex digits"));
        }
        let component = |range| {
            u8::from_str_radix(&digits[range], 16)
                .map_err(|_| GouacheError::invalid_color(hex, "non-hex digit"))
        };
        Ok(Self {
            r: component(0..2)?,
            g: component(2..4)?,
            b: component(4..6)?,
        })
    }

    /// The canonical in-document textual form. Always fully opaque.
    pub fn to_rgba_string(&self) -> String {
        format!("rgba({}, {}, {}, 1)", self.r, self.g, self.b)
    }

    // --- Named constants ---

    pub const BLACK: Color = Color { r: 0, g: 0, b: 0 };
    pub const WHITE: Color = Color {
        r: 255,
        g: 255,
        b: 255,
    };
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Best-effort conversion of an in-document color text to `#rrggbb` hex.
///
/// A `#`-prefixed input is returned unchanged. Otherwise the first three
/// integers of an `rgb(...)`/`rgba(...)` form are extracted; anything
/// unrecognized maps to `#000000`. This is a display conversion for color
/// pickers, not a validator — callers must treat the fallback as lossy.
pub fn hex_from_color_text(text: &str) -> String {
    if text.starts_with('#') {
        return text.to_string();
    }
    match parse_rgb_triplet(text) {
        Some([r, g, b]) => Color::new(r, g, b).to_string(),
        None => "#000000".to_string(),
    }
}

/// Scan for `rgb(`/`rgba(` and read the three leading comma-separated
/// integers. Whitespace is tolerated after commas only.
fn parse_rgb_triplet(text: &str) -> Option<[u8; 3]> {
    let start = text.find("rgb")?;
    let mut rest = &text[start + 3..];
    if let Some(stripped) = rest.strip_prefix('a') {
        rest = stripped;
    }
    let mut rest = rest.strip_prefix('(')?;

    let mut out = [0u8; 3];
    for (i, slot) in out.iter_mut().enumerate() {
        let digits = rest
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(rest.len());
        if digits == 0 {
            return None;
        }
        *slot = rest[..digits].parse().ok()?;
        rest = &rest[digits..];
        if i < 2 {
            rest = rest.strip_prefix(',')?.trim_start();
        }
    }
    Some(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_hex() {
        let c = Color::from_hex("#3355ff").unwrap();
        assert_eq!((c.r, c.g, c.b), (0x33, 0x55, 0xff));
    }

    #[test]
    fn test_from_hex_rejects_bad_input() {
        assert!(Color::from_hex("3355ff").is_err());
        assert!(Color::from_hex("#3355f").is_err());
        assert!(Color::from_hex("#3355ffaa").is_err());
        assert!(Color::from_hex("#gg55ff").is_err());
        assert!(Color::from_hex("#ÿÿ55ff").is_err());
    }

    #[test]
    fn test_to_rgba_string_format() {
        let c = Color::from_hex("#3355ff").unwrap();
        assert_eq!(c.to_rgba_string(), "rgba(51, 85, 255, 1)");
    }

    #[test]
    fn test_display_is_lowercase_hex() {
        assert_eq!(Color::from_hex("#FF00AA").unwrap().to_string(), "#ff00aa");
    }

    #[test]
    fn test_hex_passthrough() {
        assert_eq!(hex_from_color_text("#123abc"), "#123abc");
    }

    #[test]
    fn test_rgba_text_to_hex() {
        assert_eq!(hex_from_color_text("rgba(51, 85, 255, 1)"), "#3355ff");
        assert_eq!(hex_from_color_text("rgb(0,0,0)"), "#000000");
        assert_eq!(hex_from_color_text("rgba(255,255,255,0.5)"), "#ffffff");
    }

    #[test]
    fn test_unrecognized_text_falls_back_to_black() {
        assert_eq!(hex_from_color_text("tomato"), "#000000");
        assert_eq!(hex_from_color_text("rgba(a, b, c)"), "#000000");
        assert_eq!(hex_from_color_text("rgba(300, 0, 0)"), "#000000");
        assert_eq!(hex_from_color_text(""), "#000000");
    }

    #[test]
    fn test_round_trip_recovers_hex() {
        for hex in ["#000000", "#ffffff", "#3355ff", "#a9c4c4", "#0b1e2d"] {
            let text = Color::from_hex(hex).unwrap().to_rgba_string();
            assert_eq!(hex_from_color_text(&text), hex);
        }
    }
}
