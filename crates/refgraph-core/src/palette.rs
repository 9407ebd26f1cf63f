//! Cyclic lane color palette.
//!
//! A palette is owned by one lane build and reset at its start, so two
//! builds over the same history always hand out the same colors.

use std::fmt;

use serde::{Serialize, Serializer};

use crate::error::{Error, Result};

/// An RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    /// Create a color from its components.
    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse a `#rrggbb` (or `rrggbb`) string.
    ///
    /// # Errors
    /// Returns [`Error::InvalidColor`] if the string is not six hex digits.
    pub fn from_hex(hex: &str) -> Result<Self> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(Error::InvalidColor(hex.to_string()));
        }

        let component = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&digits[range], 16).map_err(|_| Error::InvalidColor(hex.to_string()))
        };
        Ok(Self::rgb(component(0..2)?, component(2..4)?, component(4..6)?))
    }

    /// Format as `#rrggbb`.
    #[must_use]
    pub fn to_hex(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl Serialize for Color {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

/// Colors used when no palette is configured.
pub const DEFAULT_COLORS: [Color; 8] = [
    Color::rgb(0x3b, 0x82, 0xf6), // blue
    Color::rgb(0x22, 0xc5, 0x5e), // green
    Color::rgb(0xf5, 0x9e, 0x0b), // amber
    Color::rgb(0xa8, 0x55, 0xf7), // purple
    Color::rgb(0xef, 0x44, 0x44), // red
    Color::rgb(0x06, 0xb6, 0xd4), // cyan
    Color::rgb(0xec, 0x48, 0x99), // pink
    Color::rgb(0x84, 0xcc, 0x16), // lime
];

/// Fixed cyclic set of colors with an advancing counter.
#[derive(Debug, Clone)]
pub struct ColorPalette {
    colors: Vec<Color>,
    counter: usize,
}

impl ColorPalette {
    /// Create a palette cycling through `colors`.
    ///
    /// An empty list falls back to [`DEFAULT_COLORS`].
    #[must_use]
    pub fn new(colors: Vec<Color>) -> Self {
        let colors = if colors.is_empty() {
            DEFAULT_COLORS.to_vec()
        } else {
            colors
        };
        Self { colors, counter: 0 }
    }

    /// Parse a palette from hex strings.
    ///
    /// # Errors
    /// Returns [`Error::InvalidColor`] for the first malformed entry.
    pub fn from_hex<S: AsRef<str>>(colors: &[S]) -> Result<Self> {
        let colors = colors
            .iter()
            .map(|c| Color::from_hex(c.as_ref()))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self::new(colors))
    }

    /// Hand out the color at the counter and advance it.
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> Color {
        let color = self.colors[self.counter % self.colors.len()];
        self.counter = (self.counter + 1) % self.colors.len();
        color
    }

    /// Rewind the counter to the first color.
    pub fn reset(&mut self) {
        self.counter = 0;
    }

    /// The palette's colors in cycle order.
    #[must_use]
    pub fn colors(&self) -> &[Color] {
        &self.colors
    }

    /// Number of distinct colors.
    #[must_use]
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Whether the palette has no colors. Never true after construction.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }
}

impl Default for ColorPalette {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}
