//! Parameter sweeps over compress threshold and minimum separation
//!
//! Each grid cell is an independent pipeline run over the same read-only
//! channels. Inflections depend only on the threshold, so the channel stages
//! run once per threshold and the pool is summarized for every separation.
//! Thresholds are evaluated in parallel; cells come back in grid order.

use crate::error::MotionResult;
use crate::parallel::parallel_try_map;
use crate::pipeline::{
    boundaries_from_pool, merge_inflections, split_flat, Channel, MotionAnalyzer, PipelineConfig,
    DEFAULT_FRAME_RATE, DEFAULT_ZERO_TOLERANCE,
};
use crate::{trace_enter, trace_event};

/// Grid of parameters to evaluate
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SweepGrid {
    /// Kept coefficient fractions, each in `[0, 1]`
    pub thresholds: Vec<f64>,
    /// Minimum separations in frames
    pub separations: Vec<usize>,
    /// Second-derivative magnitude treated as zero
    pub zero_tolerance: f64,
}

impl Default for SweepGrid {
    /// Kept fractions `0.00..=0.10` by `0.01`, separations of 0 to 5 seconds at
    /// 30 fps.
    fn default() -> Self {
        Self::new(
            (0..=10).map(|i| f64::from(i) * 0.01).collect(),
            (0..=5).map(|s| s * DEFAULT_FRAME_RATE as usize).collect(),
        )
    }
}

impl SweepGrid {
    /// Create a grid with the default zero tolerance
    #[must_use]
    pub fn new(thresholds: Vec<f64>, separations: Vec<usize>) -> Self {
        Self {
            thresholds,
            separations,
            zero_tolerance: DEFAULT_ZERO_TOLERANCE,
        }
    }

    /// Set the zero tolerance
    #[must_use]
    pub fn with_zero_tolerance(mut self, tolerance: f64) -> Self {
        self.zero_tolerance = tolerance;
        self
    }

    /// Number of cells
    #[must_use]
    pub fn len(&self) -> usize {
        self.thresholds.len() * self.separations.len()
    }

    /// Check if the grid has no cells
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Pipeline config for one cell
    #[must_use]
    pub fn config(&self, threshold: f64, min_separation: usize) -> PipelineConfig {
        PipelineConfig::new(threshold, min_separation).with_zero_tolerance(self.zero_tolerance)
    }

    /// Check every threshold and the tolerance
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` for the first out-of-range value.
    pub fn validate(&self) -> MotionResult<()> {
        for &threshold in &self.thresholds {
            self.config(threshold, 0).validate()?;
        }
        if self.thresholds.is_empty() {
            // still check the tolerance
            self.config(0.0, 0).validate()?;
        }
        Ok(())
    }
}

/// Outcome of one grid cell
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SweepCell {
    /// Kept coefficient fraction
    pub threshold: f64,
    /// Minimum separation in frames
    pub min_separation: usize,
    /// Summarized segment boundaries
    pub boundaries: Vec<usize>,
}

impl SweepCell {
    /// Number of segment boundaries
    #[must_use]
    pub fn boundary_count(&self) -> usize {
        self.boundaries.len()
    }
}

/// Parameter sweep runner
#[derive(Debug, Clone, Default)]
pub struct ParameterSweep {
    grid: SweepGrid,
}

impl ParameterSweep {
    /// Create a sweep over a grid
    #[must_use]
    pub fn new(grid: SweepGrid) -> Self {
        Self { grid }
    }

    /// Get the grid
    #[must_use]
    pub const fn grid(&self) -> &SweepGrid {
        &self.grid
    }

    /// Evaluate every cell, threshold-major.
    ///
    /// # Errors
    ///
    /// Fails on an invalid grid or on channel errors (see
    /// [`MotionAnalyzer::analyze`]).
    pub fn run(&self, channels: &[Channel]) -> MotionResult<Vec<SweepCell>> {
        let _guard = trace_enter!("sweep", cells = self.grid.len());
        self.grid.validate()?;

        let (active, _) = split_flat(channels)?;
        let rows = parallel_try_map(0..self.grid.thresholds.len(), |t| {
            let threshold = self.grid.thresholds[t];
            let analyzer = MotionAnalyzer::new(self.grid.config(threshold, 0));
            let pool = merge_inflections(&analyzer.analyze_active(&active)?);

            self.grid
                .separations
                .iter()
                .map(|&min_separation| {
                    let boundaries = boundaries_from_pool(&pool, min_separation)?;
                    trace_event!(
                        threshold,
                        min_separation,
                        boundaries = boundaries.len(),
                        "sweep cell"
                    );
                    Ok(SweepCell {
                        threshold,
                        min_separation,
                        boundaries,
                    })
                })
                .collect::<MotionResult<Vec<_>>>()
        })?;

        Ok(rows.into_iter().flatten().collect())
    }
}

/// Cell with the fewest boundaries that still has at least `min_boundaries`.
///
/// Ties resolve to the earliest cell in grid order.
#[must_use]
pub fn sparsest_cell(cells: &[SweepCell], min_boundaries: usize) -> Option<&SweepCell> {
    cells
        .iter()
        .filter(|c| c.boundary_count() >= min_boundaries)
        .min_by_key(|c| c.boundary_count())
}
