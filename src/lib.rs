//! allrgb - every color, exactly once
//!
//! Builds mosaics that use each color of an evenly spaced RGB palette in
//! exactly one pixel, placing colors next to their closest neighbors.
//! This library exposes modules for integration testing.

pub mod error;
pub mod models;
pub mod rendering;
pub mod services;
