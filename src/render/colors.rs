//! Color handling for overlay rendering.
//!
//! Colors are kept as [`Rgb`] triples and turned into CSS strings (directly
//! usable by Canvas 2D) only at draw time, with the alpha of the command.

use serde::{Deserialize, Serialize};

/// A CSS color string (e.g., "#FF0000", "rgba(255, 0, 0, 0.5)")
pub type CssColor = String;

/// RGB color with u8 components.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse from a hex string (with or without #).
    /// Returns None if the format is invalid.
    pub fn from_hex(s: &str) -> Option<Self> {
        let hex = s.trim().strip_prefix('#').unwrap_or(s.trim());
        if hex.len() != 6 {
            return None;
        }
        let r = u8::from_str_radix(hex.get(0..2)?, 16).ok()?;
        let g = u8::from_str_radix(hex.get(2..4)?, 16).ok()?;
        let b = u8::from_str_radix(hex.get(4..6)?, 16).ok()?;
        Some(Self { r, g, b })
    }

    /// CSS hex string (#RRGGBB).
    pub fn to_hex(self) -> CssColor {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }

    /// CSS color with alpha; opaque colors come back as hex.
    pub fn to_css(self, alpha: f64) -> CssColor {
        let alpha = alpha.clamp(0.0, 1.0);
        if alpha >= 1.0 {
            self.to_hex()
        } else {
            format!("rgba({}, {}, {}, {:.3})", self.r, self.g, self.b, alpha)
        }
    }

    /// Blend with white. 0.0 = no change, 1.0 = pure white.
    pub fn lighten(self, factor: f64) -> Self {
        Self {
            r: Self::blend_component(self.r, 255, factor),
            g: Self::blend_component(self.g, 255, factor),
            b: Self::blend_component(self.b, 255, factor),
        }
    }

    /// Blend with black. 0.0 = no change, 1.0 = pure black.
    pub fn darken(self, factor: f64) -> Self {
        Self {
            r: Self::blend_component(self.r, 0, factor),
            g: Self::blend_component(self.g, 0, factor),
            b: Self::blend_component(self.b, 0, factor),
        }
    }

    /// The cast is safe because we clamp to [0, 255] before converting.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn blend_component(from: u8, to: u8, factor: f64) -> u8 {
        let from = f64::from(from);
        let to = f64::from(to);
        let blended = from + (to - from) * factor.clamp(0.0, 1.0);
        blended.clamp(0.0, 255.0).round() as u8
    }
}

/// Fixed colors used by the overlay layers.
pub mod palette {
    use super::Rgb;

    pub const WHITE: Rgb = Rgb::new(0xFF, 0xFF, 0xFF);

    /// Default theme accent (cursor, selection, active table).
    pub const ACCENT: Rgb = Rgb::new(0x24, 0x63, 0xEB);

    /// Inactive table headers and borders.
    pub const MUTED: Rgb = Rgb::new(0x64, 0x70, 0x88);

    /// Grid line color (light gray)
    pub const GRID_LINE: Rgb = Rgb::new(0xE0, 0xE0, 0xE0);

    /// Shade drawn left of column 1 / above row 1.
    pub const OUT_OF_GRID: Rgb = Rgb::new(0xF5, 0xF5, 0xF5);

    pub const HEADING_BG: Rgb = Rgb::new(0xF8, 0xF9, 0xFA);
    pub const HEADING_TEXT: Rgb = Rgb::new(0x5F, 0x63, 0x68);
    pub const HEADING_BORDER: Rgb = Rgb::new(0xDA, 0xDC, 0xE0);

    pub const TABLE_HEADER_BG: Rgb = Rgb::new(0xF1, 0xF3, 0xF4);
    pub const TABLE_HEADER_TEXT: Rgb = Rgb::new(0x20, 0x21, 0x24);

    /// Invalid drop target border.
    pub const WARNING: Rgb = Rgb::new(0xD9, 0x30, 0x25);

    /// Checkbox / dropdown glyph color.
    pub const SPRITE: Rgb = Rgb::new(0x5F, 0x63, 0x68);

    /// Reference highlight colors, cycled per reference.
    pub const HIGHLIGHTS: [Rgb; 4] = [
        Rgb::new(0x24, 0x63, 0xEB),
        Rgb::new(0xE0, 0x7A, 0x00),
        Rgb::new(0x0F, 0x9D, 0x58),
        Rgb::new(0xA1, 0x42, 0xF4),
    ];
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_round_trip() {
        let c = Rgb::from_hex("#2463EB").unwrap();
        assert_eq!(c, palette::ACCENT);
        assert_eq!(c.to_hex(), "#2463EB");
        assert_eq!(Rgb::from_hex("2463eb"), Some(c));
        assert_eq!(Rgb::from_hex("#123"), None);
    }

    #[test]
    fn test_css_alpha() {
        assert_eq!(palette::WHITE.to_css(1.0), "#FFFFFF");
        assert_eq!(Rgb::new(255, 0, 0).to_css(0.5), "rgba(255, 0, 0, 0.500)");
        assert_eq!(Rgb::new(255, 0, 0).to_css(7.0), "#FF0000");
    }

    #[test]
    fn test_lighten_darken() {
        assert_eq!(Rgb::new(0, 0, 0).lighten(1.0), palette::WHITE);
        assert_eq!(palette::WHITE.darken(1.0), Rgb::new(0, 0, 0));
        assert_eq!(Rgb::new(100, 100, 100).lighten(0.0), Rgb::new(100, 100, 100));
    }
}
