use crate::error::AppError;
use crate::models::{Geometry, RunConfig};
use crate::rendering::{encode_rgb, optimize};
use allrgb_engine::{Grid, PlacementEngine};
use serde::Serialize;
use std::path::PathBuf;

/// Outcome of one generation run, printed as JSON by `--report`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunReport {
    #[serde(flatten)]
    pub geometry: Geometry,
    pub depth: u32,
    pub colors: usize,
    /// Seed actually used, so unseeded runs can be replayed
    pub seed: u64,
    pub elapsed_ms: u64,
    pub compactions: usize,
    pub frontier: String,
    pub tie_break: String,
    pub metric: String,
    pub threads: Option<usize>,
    pub optimized: bool,
    pub bytes: usize,
    pub output: Option<PathBuf>,
}

/// A finished mosaic: the filled grid and its PNG encoding
#[derive(Debug)]
pub struct Mosaic {
    pub grid: Grid,
    pub png: Vec<u8>,
    pub report: RunReport,
}

/// Runs the placement engine for a [`RunConfig`] and renders the result
pub struct Generator {
    config: RunConfig,
}

impl Generator {
    pub fn new(config: RunConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RunConfig {
        &self.config
    }

    /// Place every color and encode the grid as PNG, in memory
    pub fn generate(&self) -> Result<Mosaic, AppError> {
        let engine_config = self.config.to_engine_config()?;
        let geometry = Geometry {
            width: engine_config.width,
            height: engine_config.height,
        };
        tracing::info!(
            %geometry,
            depth = engine_config.color_depth,
            frontier = %engine_config.frontier,
            "Generating mosaic"
        );

        let mut engine = PlacementEngine::new(engine_config.clone())?;
        let summary = engine.run()?;
        let grid = engine.into_grid();

        let mut png = encode_rgb(grid.width(), grid.height(), &grid.to_rgb_bytes())?;
        if self.config.optimize {
            png = optimize(&png)?;
        }

        let report = RunReport {
            geometry,
            depth: engine_config.color_depth,
            colors: summary.placed,
            seed: summary.seed,
            elapsed_ms: summary.elapsed.as_millis() as u64,
            compactions: summary.compactions,
            frontier: engine_config.frontier.to_string(),
            tie_break: engine_config.tie_break.to_string(),
            metric: engine_config.metric.to_string(),
            threads: engine_config.threads,
            optimized: self.config.optimize,
            bytes: png.len(),
            output: None,
        };

        Ok(Mosaic { grid, png, report })
    }

    /// Generate and write the PNG to the configured output path
    pub fn generate_to_file(&self) -> Result<RunReport, AppError> {
        let Mosaic { png, mut report, .. } = self.generate()?;
        let output = &self.config.output;

        if let Some(parent) = output.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(output, &png)?;

        tracing::info!(
            path = %output.display(),
            bytes = png.len(),
            seed = report.seed,
            "Wrote mosaic"
        );
        report.output = Some(output.clone());
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn small_config() -> RunConfig {
        RunConfig {
            depth: 2,
            seed: Some(7),
            threads: Some(1),
            ..Default::default()
        }
    }

    #[test]
    fn test_generate_in_memory() {
        let mosaic = Generator::new(small_config()).generate().unwrap();

        assert!(mosaic.grid.is_full());
        assert_eq!(mosaic.report.geometry.to_string(), "4x2");
        assert_eq!(mosaic.report.colors, 8);
        assert_eq!(mosaic.report.seed, 7);
        assert_eq!(mosaic.report.bytes, mosaic.png.len());
        assert_eq!(mosaic.report.output, None);
        assert_eq!(&mosaic.png[..4], b"\x89PNG");

        let distinct: HashSet<_> = mosaic.grid.colors().into_iter().collect();
        assert_eq!(distinct.len(), 8);
    }

    #[test]
    fn test_same_seed_same_png() {
        let a = Generator::new(small_config()).generate().unwrap();
        let b = Generator::new(small_config()).generate().unwrap();
        assert_eq!(a.png, b.png);
    }

    #[test]
    fn test_report_reflects_options() {
        let config = RunConfig {
            frontier: "arena".to_string(),
            metric: "average".to_string(),
            ..small_config()
        };
        let report = Generator::new(config).generate().unwrap().report;

        assert_eq!(report.frontier, "arena");
        assert_eq!(report.metric, "average");
        assert_eq!(report.tie_break, "position");
        assert_eq!(report.threads, Some(1));
        assert!(!report.optimized);
    }

    #[test]
    fn test_report_json_shape() {
        let report = Generator::new(small_config()).generate().unwrap().report;
        let json = serde_json::to_value(&report).unwrap();

        assert_eq!(json["width"], 4);
        assert_eq!(json["height"], 2);
        assert_eq!(json["seed"], 7);
        assert_eq!(json["output"], serde_json::Value::Null);
    }

    #[test]
    fn test_invalid_config_surfaces_before_running() {
        let config = RunConfig {
            depth: 1,
            ..Default::default()
        };
        assert!(matches!(
            Generator::new(config).generate(),
            Err(AppError::Option(_))
        ));
    }
}
