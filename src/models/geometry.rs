use allrgb_engine::{palette_len, validate_depth, ConfigError};
use serde::Serialize;
use std::fmt;

/// Grid dimensions for a palette depth
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Geometry {
    pub width: u32,
    pub height: u32,
}

impl fmt::Display for Geometry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Every `width x height == depth³` factorisation with `width >= height`,
/// squarest first
pub fn candidate_geometries(depth: u32) -> Result<Vec<Geometry>, ConfigError> {
    validate_depth(depth)?;
    let cells = palette_len(depth);

    Ok((1..=isqrt(cells))
        .rev()
        .filter(|h| cells % h == 0)
        .map(|h| Geometry {
            width: (cells / h) as u32,
            height: h as u32,
        })
        .collect())
}

/// The squarest geometry that holds exactly `depth³` cells
pub fn geometry_for_depth(depth: u32) -> Result<Geometry, ConfigError> {
    validate_depth(depth)?;
    let cells = palette_len(depth);
    // 1 always divides, so the search cannot come up empty
    let height = (1..=isqrt(cells)).rev().find(|h| cells % h == 0).unwrap_or(1);
    Ok(Geometry {
        width: (cells / height) as u32,
        height: height as u32,
    })
}

fn isqrt(n: u64) -> u64 {
    let mut r = (n as f64).sqrt() as u64;
    while r * r > n {
        r -= 1;
    }
    while (r + 1) * (r + 1) <= n {
        r += 1;
    }
    r
}
