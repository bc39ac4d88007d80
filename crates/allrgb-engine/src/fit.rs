//! Fit scoring for a candidate color in an empty cell.
//!
//! Lower is better. Only filled neighbors count; a cell with no filled
//! neighbor scores [`NO_FIT`], which a frontier member never does.

use std::fmt;
use std::str::FromStr;

use crate::color::Color;
use crate::error::ConfigError;
use crate::grid::{CellId, Grid};

/// Score for a cell with no filled neighbors.
pub const NO_FIT: u32 = u32::MAX;

/// How a cell's filled neighbors are turned into one score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FitMetric {
    /// Minimum squared RGB distance to any filled neighbor.
    #[default]
    Nearest,
    /// Squared RGB distance to the mean of the filled neighbors.
    ///
    /// Produces smoother, blurrier fills. Not the default.
    Average,
}

impl FitMetric {
    pub const NAMES: &'static str = "nearest, average";

    /// Score `color` placed at `id`.
    #[inline]
    pub fn score(self, grid: &Grid, id: CellId, color: Color) -> u32 {
        match self {
            FitMetric::Nearest => nearest_fit(grid, id, color),
            FitMetric::Average => average_fit(grid, id, color),
        }
    }
}

/// Minimum squared channel distance between `color` and the filled
/// neighbors of `id`.
pub fn nearest_fit(grid: &Grid, id: CellId, color: Color) -> u32 {
    grid.cell(id)
        .neighbors()
        .iter()
        .filter_map(|&n| grid.cell(n).color())
        .map(|c| c.distance_sq(color))
        .min()
        .unwrap_or(NO_FIT)
}

/// Squared channel distance between `color` and the integer mean of the
/// filled neighbors of `id`.
pub fn average_fit(grid: &Grid, id: CellId, color: Color) -> u32 {
    let mut sum = [0u32; 3];
    let mut count = 0u32;
    for c in grid
        .cell(id)
        .neighbors()
        .iter()
        .filter_map(|&n| grid.cell(n).color())
    {
        sum[0] += c.r() as u32;
        sum[1] += c.g() as u32;
        sum[2] += c.b() as u32;
        count += 1;
    }
    if count == 0 {
        return NO_FIT;
    }
    let mean = Color::from_rgb(
        (sum[0] / count) as u8,
        (sum[1] / count) as u8,
        (sum[2] / count) as u8,
    );
    mean.distance_sq(color)
}

impl FromStr for FitMetric {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "nearest" | "min" => Ok(FitMetric::Nearest),
            "average" | "avg" => Ok(FitMetric::Average),
            _ => Err(ConfigError::UnknownOption {
                kind: "metric",
                value: s.to_string(),
                expected: Self::NAMES,
            }),
        }
    }
}

impl fmt::Display for FitMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FitMetric::Nearest => f.write_str("nearest"),
            FitMetric::Average => f.write_str("average"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 3x3 grid, center empty, two filled neighbors.
    fn grid_with(left: Color, right: Color) -> (Grid, CellId) {
        let mut grid = Grid::new(3, 3);
        grid.fill(grid.id_at(0, 1).unwrap(), left);
        grid.fill(grid.id_at(2, 1).unwrap(), right);
        let center = grid.id_at(1, 1).unwrap();
        (grid, center)
    }

    #[test]
    fn test_nearest_takes_minimum() {
        let (grid, center) = grid_with(Color::from_rgb(0, 0, 0), Color::from_rgb(100, 0, 0));
        let probe = Color::from_rgb(90, 0, 0);
        assert_eq!(nearest_fit(&grid, center, probe), 100);
    }

    #[test]
    fn test_exact_match_scores_zero() {
        let (grid, center) = grid_with(Color::from_rgb(7, 8, 9), Color::WHITE);
        assert_eq!(nearest_fit(&grid, center, Color::from_rgb(7, 8, 9)), 0);
    }

    #[test]
    fn test_empty_neighbors_are_skipped() {
        let mut grid = Grid::new(3, 3);
        grid.fill(grid.id_at(0, 0).unwrap(), Color::from_rgb(10, 10, 10));
        let center = grid.id_at(1, 1).unwrap();
        // Only one filled neighbor; the seven empty ones must not count as black.
        assert_eq!(nearest_fit(&grid, center, Color::from_rgb(10, 10, 13)), 9);
    }

    #[test]
    fn test_no_filled_neighbor() {
        let grid = Grid::new(3, 3);
        let center = grid.id_at(1, 1).unwrap();
        assert_eq!(nearest_fit(&grid, center, Color::BLACK), NO_FIT);
        assert_eq!(average_fit(&grid, center, Color::BLACK), NO_FIT);
    }

    #[test]
    fn test_average_uses_mean_color() {
        let (grid, center) = grid_with(Color::from_rgb(0, 0, 0), Color::from_rgb(100, 50, 0));
        // Mean is (50, 25, 0)
        assert_eq!(average_fit(&grid, center, Color::from_rgb(50, 25, 0)), 0);
        assert_eq!(average_fit(&grid, center, Color::from_rgb(53, 25, 4)), 9 + 16);
        assert_eq!(
            FitMetric::Average.score(&grid, center, Color::from_rgb(50, 25, 0)),
            0
        );
    }

    #[test]
    fn test_metric_dispatch_default_is_nearest() {
        let (grid, center) = grid_with(Color::from_rgb(0, 0, 0), Color::from_rgb(100, 0, 0));
        let probe = Color::from_rgb(100, 0, 0);
        assert_eq!(FitMetric::default(), FitMetric::Nearest);
        assert_eq!(FitMetric::default().score(&grid, center, probe), 0);
    }

    #[test]
    fn test_metric_from_str() {
        assert_eq!("nearest".parse::<FitMetric>(), Ok(FitMetric::Nearest));
        assert_eq!("AVERAGE".parse::<FitMetric>(), Ok(FitMetric::Average));
        assert!("median".parse::<FitMetric>().is_err());
    }
}
