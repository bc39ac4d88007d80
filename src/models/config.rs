use crate::error::AppError;
use crate::models::geometry::{geometry_for_depth, Geometry};
use allrgb_engine::{CompactionPolicy, EngineConfig, FitMetric, FrontierKind, TieBreak};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Run configuration loaded from a YAML file and/or CLI flags
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct RunConfig {
    /// Levels per channel; the palette has depth³ colors
    #[serde(default = "default_depth")]
    pub depth: u32,

    /// Grid width (auto-selected together with height when both are absent)
    #[serde(default)]
    pub width: Option<u32>,

    #[serde(default)]
    pub height: Option<u32>,

    /// Shuffle seed; a random one is drawn and reported when absent
    #[serde(default)]
    pub seed: Option<u64>,

    /// Worker threads for the frontier scan (default: all cores)
    #[serde(default)]
    pub threads: Option<usize>,

    /// "indexed" or "arena"
    #[serde(default = "default_frontier")]
    pub frontier: String,

    /// "position" or "coin-flip"
    #[serde(default = "default_tie_break")]
    pub tie_break: String,

    /// "nearest" or "average"
    #[serde(default = "default_metric")]
    pub metric: String,

    /// Frontier size below which the scan stays single-threaded
    #[serde(default = "default_parallel_threshold")]
    pub parallel_threshold: usize,

    #[serde(default)]
    pub compaction: CompactionConfig,

    /// Output PNG path
    #[serde(default = "default_output")]
    pub output: PathBuf,

    /// Re-compress the PNG with oxipng
    #[serde(default)]
    pub optimize: bool,
}

/// Arena frontier compaction thresholds
#[derive(Debug, Deserialize, Clone, Copy, PartialEq)]
pub struct CompactionConfig {
    #[serde(default = "default_compaction_ratio")]
    pub ratio: f64,

    #[serde(default = "default_compaction_min_holes")]
    pub min_holes: usize,
}

fn default_depth() -> u32 {
    16
}

fn default_frontier() -> String {
    FrontierKind::default().to_string()
}

fn default_tie_break() -> String {
    TieBreak::default().to_string()
}

fn default_metric() -> String {
    FitMetric::default().to_string()
}

fn default_parallel_threshold() -> usize {
    allrgb_engine::DEFAULT_PARALLEL_THRESHOLD
}

fn default_output() -> PathBuf {
    PathBuf::from("allrgb.png")
}

fn default_compaction_ratio() -> f64 {
    CompactionPolicy::default().ratio
}

fn default_compaction_min_holes() -> usize {
    CompactionPolicy::default().min_holes
}

impl Default for CompactionConfig {
    fn default() -> Self {
        Self {
            ratio: default_compaction_ratio(),
            min_holes: default_compaction_min_holes(),
        }
    }
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            depth: default_depth(),
            width: None,
            height: None,
            seed: None,
            threads: None,
            frontier: default_frontier(),
            tie_break: default_tie_break(),
            metric: default_metric(),
            parallel_threshold: default_parallel_threshold(),
            compaction: CompactionConfig::default(),
            output: default_output(),
            optimize: false,
        }
    }
}

impl RunConfig {
    /// Load configuration from a YAML file
    pub fn load(path: &Path) -> Result<Self, AppError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| AppError::ConfigFile(format!("{}: {e}", path.display())))?;
        let config = Self::from_yaml(&content)?;
        tracing::info!(
            path = %path.display(),
            depth = config.depth,
            seed = ?config.seed,
            "Loaded configuration"
        );
        Ok(config)
    }

    /// Parse configuration from YAML text. An empty document yields defaults.
    pub fn from_yaml(content: &str) -> Result<Self, AppError> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(content).map_err(|e| AppError::ConfigFile(e.to_string()))
    }

    /// Explicit width/height, or the squarest geometry for the depth
    pub fn geometry(&self) -> Result<Geometry, AppError> {
        match (self.width, self.height) {
            (Some(width), Some(height)) => Ok(Geometry { width, height }),
            (Some(_), None) => Err(AppError::PartialGeometry { which: "width" }),
            (None, Some(_)) => Err(AppError::PartialGeometry { which: "height" }),
            (None, None) => Ok(geometry_for_depth(self.depth)?),
        }
    }

    /// Resolve string options and geometry into a validated engine config
    pub fn to_engine_config(&self) -> Result<EngineConfig, AppError> {
        let geometry = self.geometry()?;
        let mut config = EngineConfig::new(geometry.width, geometry.height, self.depth)
            .frontier(self.frontier.parse()?)
            .tie_break(self.tie_break.parse()?)
            .metric(self.metric.parse()?)
            .parallel_threshold(self.parallel_threshold)
            .compaction(CompactionPolicy::new(
                self.compaction.ratio,
                self.compaction.min_holes,
            ));
        config.seed = self.seed;
        config.threads = self.threads;
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use allrgb_engine::ConfigError;

    #[test]
    fn test_default_config() {
        let config = RunConfig::default();

        assert_eq!(config.depth, 16);
        assert_eq!(config.frontier, "indexed");
        assert_eq!(config.tie_break, "position");
        assert_eq!(config.metric, "nearest");
        assert_eq!(config.output, PathBuf::from("allrgb.png"));
        assert_eq!(config.compaction.ratio, 1.05);
        assert_eq!(config.compaction.min_holes, 1024);
        assert!(!config.optimize);
    }

    #[test]
    fn test_empty_yaml_is_default() {
        assert_eq!(RunConfig::from_yaml("").unwrap(), RunConfig::default());
        assert_eq!(RunConfig::from_yaml("  \n").unwrap(), RunConfig::default());
    }

    #[test]
    fn test_deserialize_config() {
        let yaml = r#"
depth: 4
width: 16
height: 4
seed: 147
threads: 2
frontier: arena
tie_break: coin-flip
metric: average
compaction:
  ratio: 1.2
output: out/mosaic.png
optimize: true
"#;

        let config = RunConfig::from_yaml(yaml).unwrap();

        assert_eq!(config.depth, 4);
        assert_eq!(config.seed, Some(147));
        assert_eq!(config.compaction.ratio, 1.2);
        assert_eq!(config.compaction.min_holes, 1024);
        assert!(config.optimize);

        let engine = config.to_engine_config().unwrap();
        assert_eq!((engine.width, engine.height), (16, 4));
        assert_eq!(engine.frontier, FrontierKind::Arena);
        assert_eq!(engine.tie_break, TieBreak::CoinFlip);
        assert_eq!(engine.metric, FitMetric::Average);
        assert_eq!(engine.threads, Some(2));
        assert_eq!(engine.seed, Some(147));
    }

    #[test]
    fn test_auto_geometry() {
        let config = RunConfig {
            depth: 2,
            ..Default::default()
        };
        let engine = config.to_engine_config().unwrap();
        assert_eq!((engine.width, engine.height), (4, 2));
    }

    #[test]
    fn test_partial_geometry_rejected() {
        let config = RunConfig {
            depth: 2,
            width: Some(4),
            ..Default::default()
        };
        assert!(matches!(
            config.geometry(),
            Err(AppError::PartialGeometry { which: "width" })
        ));
    }

    #[test]
    fn test_mismatched_geometry_rejected() {
        let config = RunConfig {
            depth: 2,
            width: Some(3),
            height: Some(3),
            ..Default::default()
        };
        assert!(matches!(
            config.to_engine_config(),
            Err(AppError::Option(ConfigError::GeometryMismatch { .. }))
        ));
    }

    #[test]
    fn test_unknown_option_value() {
        let config = RunConfig {
            depth: 2,
            frontier: "heap".to_string(),
            ..Default::default()
        };
        let err = config.to_engine_config().unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid option: Unknown frontier 'heap' (expected one of: indexed, arena)"
        );
    }

    #[test]
    fn test_malformed_yaml() {
        let err = RunConfig::from_yaml("depth: [not, a, number]").unwrap_err();
        assert!(matches!(err, AppError::ConfigFile(_)));
    }

    #[test]
    fn test_load_missing_file() {
        let err = RunConfig::load(Path::new("/nonexistent/allrgb.yaml")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/allrgb.yaml"));
    }
}
