//! Theme palettes: map a [`Theme`] to the six colors the renderer needs.
//!
//! Palettes are plain values recomputed on every draw; nothing is cached.

use crate::models::Theme;
use serde::{Deserialize, Serialize};

/// RGBA color with an opacity in `0.0..=1.0`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f64,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Same color with a different opacity.
    pub fn with_alpha(self, a: f64) -> Self {
        Self {
            a: a.clamp(0.0, 1.0),
            ..self
        }
    }

    /// Parse `#rgb` or `#rrggbb`.
    pub fn from_hex(s: &str) -> Option<Self> {
        let hex = s.strip_prefix('#').filter(|h| h.is_ascii())?;
        let nibble = |i: usize| u8::from_str_radix(&hex[i..i + 1], 16).ok();
        let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
        match hex.len() {
            3 => Some(Self::rgb(nibble(0)? * 17, nibble(1)? * 17, nibble(2)? * 17)),
            6 => Some(Self::rgb(byte(0)?, byte(2)?, byte(4)?)),
            _ => None,
        }
    }

    pub fn to_hex(&self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

/// Named colors for one theme.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Palette {
    pub grid: Color,
    pub bg: Color,
    pub text: Color,
    pub line1: Color,
    pub line2: Color,
    pub line3: Color,
}

impl Palette {
    /// Series colors in drawing order.
    pub fn series(&self) -> [Color; 3] {
        [self.line1, self.line2, self.line3]
    }

    /// All six fields with their names, for legends and debugging.
    pub fn named(&self) -> [(&'static str, Color); 6] {
        [
            ("grid", self.grid),
            ("bg", self.bg),
            ("text", self.text),
            ("line1", self.line1),
            ("line2", self.line2),
            ("line3", self.line3),
        ]
    }
}

// CSS named colors used by the light theme.
const GRAY: Color = Color::rgb(128, 128, 128);
const WHITE: Color = Color::rgb(255, 255, 255);
const BLACK: Color = Color::rgb(0, 0, 0);
const GREEN: Color = Color::rgb(0, 128, 0);
const BLUE: Color = Color::rgb(0, 0, 255);
const RED: Color = Color::rgb(255, 0, 0);

const LIGHT: Palette = Palette {
    grid: GRAY,
    bg: WHITE,
    text: BLACK,
    line1: GREEN,
    line2: BLUE,
    line3: RED,
};

const DARK: Palette = Palette {
    grid: Color::rgb(0x55, 0x55, 0x55),
    bg: Color::rgb(0x2a, 0x2a, 0x2a),
    text: Color::rgb(0xcc, 0xcc, 0xcc),
    line1: Color::rgb(0x4c, 0xaf, 0x50),
    line2: Color::rgb(0x21, 0x96, 0xf3),
    line3: Color::rgb(0xf4, 0x43, 0x36),
};

const CONTRAST: Palette = Palette {
    grid: Color::rgb(0xff, 0xff, 0xff),
    bg: Color::rgb(0x00, 0x00, 0x00),
    text: Color::rgb(0xff, 0xff, 0xff),
    line1: Color::rgb(0x00, 0xff, 0x00),
    line2: Color::rgb(0x00, 0x00, 0xff),
    line3: Color::rgb(0xff, 0x00, 0x00),
};

/// Resolve the palette for a theme.
pub fn resolve(theme: Theme) -> Palette {
    match theme {
        Theme::Light => LIGHT,
        Theme::Dark => DARK,
        Theme::Contrast => CONTRAST,
    }
}

/// Resolve from a host-supplied identifier; unknown names get the light palette.
pub fn resolve_named(theme: &str) -> Palette {
    resolve(Theme::parse_or_default(theme))
}
