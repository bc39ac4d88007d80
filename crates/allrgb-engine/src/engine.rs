//! The placement engine: one color at a time, into the best frontier cell.
//!
//! Each step scans the frontier in parallel for the cell whose filled
//! neighbors best match the incoming color, then commits the color and
//! updates the frontier on the calling thread. The very first color goes to
//! the grid midpoint.

use std::ops::ControlFlow;
use std::time::{Duration, Instant};

use crate::color::Color;
use crate::error::{ConfigError, EngineError, InvariantViolation};
use crate::fit::FitMetric;
use crate::frontier::{CompactionPolicy, Frontier, FrontierKind};
use crate::grid::{CellId, Grid};
use crate::palette::{generate_palette, palette_len, validate_depth};
use crate::scan::{Candidate, Scan, TieBreak};
use crate::shuffle::Shuffler;

/// Default frontier size below which scans stay on the calling thread.
pub const DEFAULT_PARALLEL_THRESHOLD: usize = 4096;

/// Engine configuration.
///
/// # Example
///
/// ```
/// use allrgb_engine::{EngineConfig, FrontierKind};
///
/// let config = EngineConfig::new(8, 8, 4)
///     .seed(147)
///     .frontier(FrontierKind::Arena)
///     .threads(2);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    pub width: u32,
    pub height: u32,
    pub color_depth: u32,
    /// Shuffle seed; `None` draws one from entropy.
    pub seed: Option<u64>,
    pub tie_break: TieBreak,
    pub metric: FitMetric,
    pub frontier: FrontierKind,
    /// Dedicated rayon pool size; `None` uses the global pool.
    pub threads: Option<usize>,
    pub parallel_threshold: usize,
    pub compaction: CompactionPolicy,
    /// Placements between progress log lines; `None` picks 1/16th of the grid.
    pub progress_interval: Option<usize>,
}

impl EngineConfig {
    pub fn new(width: u32, height: u32, color_depth: u32) -> Self {
        Self {
            width,
            height,
            color_depth,
            seed: None,
            tie_break: TieBreak::default(),
            metric: FitMetric::default(),
            frontier: FrontierKind::default(),
            threads: None,
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
            compaction: CompactionPolicy::default(),
            progress_interval: None,
        }
    }

    #[inline]
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    #[inline]
    pub fn tie_break(mut self, tie_break: TieBreak) -> Self {
        self.tie_break = tie_break;
        self
    }

    #[inline]
    pub fn metric(mut self, metric: FitMetric) -> Self {
        self.metric = metric;
        self
    }

    #[inline]
    pub fn frontier(mut self, frontier: FrontierKind) -> Self {
        self.frontier = frontier;
        self
    }

    #[inline]
    pub fn threads(mut self, threads: usize) -> Self {
        self.threads = Some(threads);
        self
    }

    #[inline]
    pub fn parallel_threshold(mut self, threshold: usize) -> Self {
        self.parallel_threshold = threshold;
        self
    }

    #[inline]
    pub fn compaction(mut self, policy: CompactionPolicy) -> Self {
        self.compaction = policy;
        self
    }

    #[inline]
    pub fn progress_interval(mut self, interval: usize) -> Self {
        self.progress_interval = Some(interval);
        self
    }

    /// Check depth range, positive dimensions, `width * height == depth³`,
    /// and the thread count.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_depth(self.color_depth)?;
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::EmptyGeometry {
                width: self.width,
                height: self.height,
            });
        }
        let cells = self.width as u64 * self.height as u64;
        let colors = palette_len(self.color_depth);
        if cells != colors {
            return Err(ConfigError::GeometryMismatch {
                width: self.width,
                height: self.height,
                depth: self.color_depth,
                cells,
                colors,
            });
        }
        if self.threads == Some(0) {
            return Err(ConfigError::ZeroThreads);
        }
        Ok(())
    }
}

/// One committed step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    /// Position in the color sequence.
    pub index: usize,
    pub cell: CellId,
    pub x: u32,
    pub y: u32,
    pub color: Color,
    /// Fit score of the chosen cell; `None` for the seed cell.
    pub score: Option<u32>,
}

/// Outcome of [`PlacementEngine::run`].
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    pub placed: usize,
    /// Seed the shuffle actually used.
    pub seed: u64,
    pub elapsed: Duration,
    pub compactions: usize,
}

/// Greedy frontier-driven color placement over a [`Grid`].
///
/// The engine owns its grid and frontier exclusively. Scans only read them;
/// all mutation happens between scans on the caller's thread.
#[derive(Debug)]
pub struct PlacementEngine {
    config: EngineConfig,
    grid: Grid,
    frontier: Box<dyn Frontier>,
    pool: Option<rayon::ThreadPool>,
    placed: usize,
    progress_interval: usize,
}

impl PlacementEngine {
    /// Validate `config` and allocate the grid and frontier.
    pub fn new(config: EngineConfig) -> Result<Self, EngineError> {
        config.validate()?;

        let grid = Grid::new(config.width, config.height);
        let frontier = config.frontier.build(grid.len(), config.compaction);
        let pool = match config.threads {
            Some(threads) => Some(
                rayon::ThreadPoolBuilder::new()
                    .num_threads(threads)
                    .thread_name(|i| format!("allrgb-scan-{i}"))
                    .build()
                    .map_err(ConfigError::from)?,
            ),
            None => None,
        };
        let progress_interval = config
            .progress_interval
            .unwrap_or(grid.len() / 16)
            .max(1);

        tracing::debug!(
            width = config.width,
            height = config.height,
            depth = config.color_depth,
            frontier = %config.frontier,
            tie_break = %config.tie_break,
            metric = %config.metric,
            threads = ?config.threads,
            "Created placement engine"
        );
        if !config.tie_break.is_deterministic() {
            tracing::warn!("Coin-flip tie-break enabled; runs are not reproducible");
        }

        Ok(Self {
            config,
            grid,
            frontier,
            pool,
            placed: 0,
            progress_interval,
        })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn frontier(&self) -> &dyn Frontier {
        self.frontier.as_ref()
    }

    /// Colors placed since construction or the last [`reset`](Self::reset).
    pub fn placed(&self) -> usize {
        self.placed
    }

    pub fn into_grid(self) -> Grid {
        self.grid
    }

    /// Empty the grid and frontier for another run.
    pub fn reset(&mut self) {
        self.grid.clear();
        self.frontier.clear();
        self.placed = 0;
    }

    /// Generate the palette, shuffle it, and place every color.
    pub fn run(&mut self) -> Result<RunSummary, EngineError> {
        let mut colors = generate_palette(self.config.color_depth)?;
        let mut shuffler = Shuffler::new(self.config.seed);
        let seed = shuffler.seed();
        shuffler.shuffle(&mut colors);

        if self.placed > 0 {
            self.reset();
        }

        let span = tracing::info_span!(
            "placement",
            width = self.config.width,
            height = self.config.height,
            depth = self.config.color_depth,
            seed
        );
        let _enter = span.enter();
        tracing::info!(colors = colors.len(), "Starting placement");

        let start = Instant::now();
        self.place_all(&colors)?;
        let summary = RunSummary {
            placed: self.placed,
            seed,
            elapsed: start.elapsed(),
            compactions: self.frontier.compactions(),
        };

        tracing::info!(
            placed = summary.placed,
            elapsed_ms = summary.elapsed.as_millis() as u64,
            compactions = summary.compactions,
            "Placement complete"
        );
        Ok(summary)
    }

    /// Place every color of `colors` in order, then verify the grid is full
    /// and the frontier empty.
    pub fn place_all(&mut self, colors: &[Color]) -> Result<(), EngineError> {
        self.place_all_with(colors, |_, _| ControlFlow::Continue(()))
    }

    /// Like [`place_all`](Self::place_all), calling `observer` after every
    /// step. Returning [`ControlFlow::Break`] stops the run with
    /// [`EngineError::Aborted`]; the grid keeps what was placed so far.
    pub fn place_all_with<F>(&mut self, colors: &[Color], mut observer: F) -> Result<(), EngineError>
    where
        F: FnMut(&Placement, &PlacementEngine) -> ControlFlow<()>,
    {
        let remaining = self.grid.len() - self.grid.filled();
        if colors.len() != remaining {
            return Err(ConfigError::ColorCountMismatch {
                expected: remaining,
                got: colors.len(),
            }
            .into());
        }

        for &color in colors {
            let placement = self.place(color)?;
            if observer(&placement, self).is_break() {
                tracing::info!(placed = self.placed, "Placement aborted by caller");
                return Err(EngineError::Aborted {
                    placed: self.placed,
                });
            }
        }

        self.verify_complete()?;
        Ok(())
    }

    /// Place one color.
    pub fn place(&mut self, color: Color) -> Result<Placement, EngineError> {
        if self.grid.is_full() {
            return Err(ConfigError::ColorCountMismatch {
                expected: self.grid.len(),
                got: self.placed + 1,
            }
            .into());
        }

        let (target, score) = if self.frontier.is_empty() {
            if self.placed > 0 {
                return Err(InvariantViolation::FrontierExhausted {
                    placed: self.placed,
                }
                .into());
            }
            (self.grid.seed_cell(), None)
        } else {
            let best = self
                .scan(color)
                .ok_or(InvariantViolation::FrontierExhausted {
                    placed: self.placed,
                })?;
            (best.id, Some(best.score))
        };

        self.commit(target, color)?;

        let cell = self.grid.cell(target);
        let placement = Placement {
            index: self.placed,
            cell: target,
            x: cell.x(),
            y: cell.y(),
            color,
            score,
        };
        self.placed += 1;

        if self.placed % self.progress_interval == 0 {
            tracing::info!(
                placed = self.placed,
                total = self.grid.len(),
                frontier = self.frontier.len(),
                "Placement progress"
            );
        }
        Ok(placement)
    }

    fn scan(&self, color: Color) -> Option<Candidate> {
        let scan = Scan {
            grid: &self.grid,
            metric: self.config.metric,
            tie_break: self.config.tie_break,
            parallel_threshold: self.config.parallel_threshold,
        };
        let slots = self.frontier.slots();
        match &self.pool {
            Some(pool) => pool.install(|| scan.best(slots, color)),
            None => scan.best(slots, color),
        }
    }

    fn commit(&mut self, target: CellId, color: Color) -> Result<(), InvariantViolation> {
        if !self.grid.fill(target, color) {
            let cell = self.grid.cell(target);
            return Err(InvariantViolation::CellNotEmpty {
                x: cell.x(),
                y: cell.y(),
            });
        }
        self.frontier.try_remove(target);
        for &n in self.grid.cell(target).neighbors() {
            if self.grid.cell(n).is_empty() {
                self.frontier.try_add(n);
            }
        }
        Ok(())
    }

    /// Grid full and frontier empty.
    pub fn verify_complete(&self) -> Result<(), InvariantViolation> {
        if !self.frontier.is_empty() {
            return Err(InvariantViolation::FrontierNotEmpty {
                remaining: self.frontier.len(),
            });
        }
        if !self.grid.is_full() {
            return Err(InvariantViolation::CellsUnfilled {
                remaining: self.grid.len() - self.grid.filled(),
            });
        }
        Ok(())
    }

    /// Check that the frontier holds exactly the empty cells with a filled
    /// neighbor. O(cells); meant for tests and debugging.
    pub fn verify_frontier(&self) -> Result<(), InvariantViolation> {
        let mut expected = 0;
        for (i, cell) in self.grid.cells().iter().enumerate() {
            let id = CellId::new(i as u32);
            let member = self.frontier.contains(id);
            let candidate = self.grid.is_frontier_candidate(id);
            if candidate {
                expected += 1;
            }
            let reason = match (member, candidate) {
                (true, false) if !cell.is_empty() => "filled cell in frontier",
                (true, false) => "member has no filled neighbor",
                (false, true) => "candidate missing from frontier",
                _ => continue,
            };
            return Err(InvariantViolation::FrontierDesync {
                x: cell.x(),
                y: cell.y(),
                reason,
            });
        }
        if expected != self.frontier.len() {
            return Err(InvariantViolation::FrontierDesync {
                x: 0,
                y: 0,
                reason: "member count disagrees with grid",
            });
        }
        Ok(())
    }
}
