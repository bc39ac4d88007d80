//! Packed 8-bit RGB color.
//!
//! Colors are stored as a single `u32` in `0xAARRGGBB` order. Channels are
//! read back with shifts and masks, so the layout is the same on every
//! platform. The alpha byte is always opaque and never takes part in
//! distance calculations.

use std::fmt;

const RED_SHIFT: u32 = 16;
const GREEN_SHIFT: u32 = 8;
const BLUE_SHIFT: u32 = 0;
const ALPHA_SHIFT: u32 = 24;

/// An opaque 8-bit-per-channel RGB color.
///
/// Equality and hashing use the raw packed value.
///
/// # Example
///
/// ```
/// use allrgb_engine::Color;
///
/// let teal = Color::from_rgb(0, 128, 128);
/// assert_eq!(teal.g(), 128);
/// assert_eq!(teal.to_bytes(), [0, 128, 128]);
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Color(u32);

impl Color {
    /// Pure black.
    pub const BLACK: Color = Color::from_rgb(0, 0, 0);

    /// Pure white.
    pub const WHITE: Color = Color::from_rgb(255, 255, 255);

    /// Create a color from its three channels.
    #[inline]
    pub const fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Self(
            (0xFF << ALPHA_SHIFT)
                | ((r as u32) << RED_SHIFT)
                | ((g as u32) << GREEN_SHIFT)
                | ((b as u32) << BLUE_SHIFT),
        )
    }

    /// Red channel.
    #[inline]
    pub const fn r(self) -> u8 {
        ((self.0 >> RED_SHIFT) & 0xFF) as u8
    }

    /// Green channel.
    #[inline]
    pub const fn g(self) -> u8 {
        ((self.0 >> GREEN_SHIFT) & 0xFF) as u8
    }

    /// Blue channel.
    #[inline]
    pub const fn b(self) -> u8 {
        ((self.0 >> BLUE_SHIFT) & 0xFF) as u8
    }

    /// Alpha channel. Always 255 for colors built through [`Color::from_rgb`].
    #[inline]
    pub const fn a(self) -> u8 {
        ((self.0 >> ALPHA_SHIFT) & 0xFF) as u8
    }

    /// The packed `0xAARRGGBB` value.
    #[inline]
    pub const fn to_u32(self) -> u32 {
        self.0
    }

    /// Channels as `[R, G, B]`.
    #[inline]
    pub const fn to_bytes(self) -> [u8; 3] {
        [self.r(), self.g(), self.b()]
    }

    /// Squared Euclidean distance over the three color channels.
    ///
    /// The largest possible value is `3 * 255²`, which fits in a `u32`.
    #[inline]
    pub fn distance_sq(self, other: Color) -> u32 {
        let dr = self.r() as i32 - other.r() as i32;
        let dg = self.g() as i32 - other.g() as i32;
        let db = self.b() as i32 - other.b() as i32;
        (dr * dr + dg * dg + db * db) as u32
    }
}

impl From<[u8; 3]> for Color {
    fn from(bytes: [u8; 3]) -> Self {
        Color::from_rgb(bytes[0], bytes[1], bytes[2])
    }
}

impl fmt::Debug for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Color(#{:02X}{:02X}{:02X})", self.r(), self.g(), self.b())
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r(), self.g(), self.b())
    }
}
