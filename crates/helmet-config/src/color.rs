//! Byte colors and their `r, g, b[, a]` text form.

use std::fmt;

use serde::Serialize;

/// An 8-bit RGBA color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    pub const WHITE: Self = Self::rgb(255, 255, 255);
    pub const RED: Self = Self::rgb(255, 0, 0);
    pub const GREEN: Self = Self::rgb(0, 128, 0);
    pub const YELLOW: Self = Self::rgb(255, 255, 0);
    pub const PURPLE: Self = Self::rgb(128, 0, 128);

    /// Opaque color.
    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    #[must_use]
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Parse `r, g, b, a`. Components past the fourth are ignored.
    ///
    /// Returns `None` if fewer than four components are present or any of
    /// the first four is not a byte.
    #[must_use]
    pub fn parse_rgba(text: &str) -> Option<Self> {
        let [r, g, b, a] = parse_components::<4>(text)?;
        Some(Self::rgba(r, g, b, a))
    }

    /// Parse `r, g, b`; alpha is always 255.
    #[must_use]
    pub fn parse_rgb(text: &str) -> Option<Self> {
        let [r, g, b] = parse_components::<3>(text)?;
        Some(Self::rgb(r, g, b))
    }

    /// Display adapter for the `r, g, b` form (alpha omitted).
    #[must_use]
    pub fn display_rgb(self) -> impl fmt::Display {
        Rgb(self)
    }
}

fn parse_components<const N: usize>(text: &str) -> Option<[u8; N]> {
    let mut out = [0u8; N];
    let mut parts = text.split(',');
    for slot in &mut out {
        *slot = parts.next()?.trim().parse().ok()?;
    }
    Some(out)
}

/// Renders `r, g, b, a`.
impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}, {}, {}", self.r, self.g, self.b, self.a)
    }
}

struct Rgb(Color);

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}, {}", self.0.r, self.0.g, self.0.b)
    }
}
