//! Test fixtures and constants.

use allrgb::models::RunConfig;
use std::path::Path;

/// Seed shared by reproducibility tests
pub const SEED: u64 = 147;

/// A small run: depth 4 gives 64 colors on an 8x8 grid
pub fn small_config(output: &Path) -> RunConfig {
    RunConfig {
        depth: 4,
        seed: Some(SEED),
        threads: Some(2),
        output: output.to_path_buf(),
        ..Default::default()
    }
}

/// YAML config exercising every field
pub const FULL_YAML: &str = r#"
depth: 5
width: 25
height: 5
seed: 9
threads: 2
frontier: arena
tie_break: position
metric: nearest
parallel_threshold: 16
compaction:
  ratio: 1.1
  min_holes: 0
optimize: false
"#;

/// Write `content` to `name` inside `dir`, returning the path
pub fn write_file(dir: &Path, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, content).expect("Failed to write fixture");
    path
}
