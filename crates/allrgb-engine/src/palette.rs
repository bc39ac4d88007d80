//! Evenly spaced RGB palette generation.
//!
//! A palette of depth `d` holds every combination of `d` levels per channel,
//! `d³` colors in total, with level `i` mapped to `i * 255 / (d - 1)`.
//! Enumeration order is red-major, then green, then blue.

use crate::color::Color;
use crate::error::{ConfigError, MAX_COLOR_DEPTH, MIN_COLOR_DEPTH};

/// Check that `depth` is a supported palette depth.
pub fn validate_depth(depth: u32) -> Result<(), ConfigError> {
    if (MIN_COLOR_DEPTH..=MAX_COLOR_DEPTH).contains(&depth) {
        Ok(())
    } else {
        Err(ConfigError::ColorDepthOutOfRange(depth))
    }
}

/// Number of colors in a palette of the given depth.
#[inline]
pub fn palette_len(depth: u32) -> u64 {
    let d = depth as u64;
    d * d * d
}

/// Map a channel level in `0..depth` onto `0..=255`.
#[inline]
pub fn channel_value(level: u32, depth: u32) -> u8 {
    (level * 255 / (depth - 1)) as u8
}

/// Enumerate all `depth³` colors of the palette.
///
/// Deterministic: the same depth always yields the same sequence, and every
/// entry is distinct.
///
/// # Example
///
/// ```
/// use allrgb_engine::{generate_palette, Color};
///
/// let palette = generate_palette(2).unwrap();
/// assert_eq!(palette.len(), 8);
/// assert_eq!(palette[0], Color::BLACK);
/// assert_eq!(palette[7], Color::WHITE);
/// ```
pub fn generate_palette(depth: u32) -> Result<Vec<Color>, ConfigError> {
    validate_depth(depth)?;

    let levels: Vec<u8> = (0..depth).map(|i| channel_value(i, depth)).collect();
    let mut colors = Vec::with_capacity(palette_len(depth) as usize);
    for &r in &levels {
        for &g in &levels {
            for &b in &levels {
                colors.push(Color::from_rgb(r, g, b));
            }
        }
    }

    tracing::debug!(depth, colors = colors.len(), "Generated palette");
    Ok(colors)
}
