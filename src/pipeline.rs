//! Motion analysis pipeline
//!
//! Composes the array math, wavelet and segmentation stages per channel and
//! merges the per-channel inflections into segment boundaries.
//!
//! # Stages
//!
//! 1. Flat channels are set aside (normalization needs a positive range)
//! 2. Normalize onto `[0, 1]`
//! 3. Haar step approximation at the configured kept fraction
//! 4. First and second finite differences
//! 5. Inflection detection on the second difference
//! 6. Pool, sort and summarize the indices of all channels
//!
//! Channels are independent and run through [`crate::parallel`]; the pool is
//! sorted before summarization so the result never depends on which channel
//! finishes first.
//!
//! # Usage
//!
//! ```rust,ignore
//! use motion_analysis::{Channel, MotionAnalyzer, PipelineConfig};
//!
//! let analyzer = MotionAnalyzer::new(PipelineConfig::default());
//! let analysis = analyzer.analyze(&[Channel::new("hips_y", samples)])?;
//! println!("{:?}", analysis.boundaries);
//! ```

use crate::error::{ensure_finite, MotionError, MotionResult};
use crate::parallel::parallel_try_map;
use crate::segmentation::{find_inflection_points_with_tolerance, summarize_points};
use crate::signal::{differentiate, is_flat, normalize};
use crate::wavelet::{approximate, validate_threshold};
use crate::{trace_enter, trace_event};

/// Capture rate of the recordings the defaults are tuned for (frames per second)
pub const DEFAULT_FRAME_RATE: u32 = 30;

/// Default fraction of Haar coefficients kept
pub const DEFAULT_COMPRESS_THRESHOLD: f64 = 0.01;

/// Default longest motion, in whole seconds, merged into one boundary
pub const DEFAULT_MAX_MOTION_SECONDS: u32 = 2;

/// Second-derivative magnitude treated as zero by default
pub const DEFAULT_ZERO_TOLERANCE: f64 = 1e-9;

/// One scalar motion-capture time series, one sample per frame
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Channel {
    /// Channel name (e.g. a joint and axis)
    pub label: String,
    /// Samples in frame order
    pub samples: Vec<f64>,
}

impl Channel {
    /// Create a channel from `f64` samples
    #[must_use]
    pub fn new(label: impl Into<String>, samples: Vec<f64>) -> Self {
        Self {
            label: label.into(),
            samples,
        }
    }

    /// Create a channel from `f32` samples, widening to `f64`
    #[must_use]
    pub fn from_f32(label: impl Into<String>, samples: &[f32]) -> Self {
        Self::new(label, samples.iter().map(|&s| f64::from(s)).collect())
    }

    /// Number of frames
    #[must_use]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Check if the channel has no frames
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Check if the channel has no dynamic range
    #[must_use]
    pub fn is_flat(&self) -> bool {
        is_flat(&self.samples)
    }
}

/// Pipeline configuration
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PipelineConfig {
    /// Fraction of Haar coefficients kept, in `[0, 1]`
    pub compress_threshold: f64,
    /// Gap in frames a boundary must have to its successor to be kept
    pub min_separation: usize,
    /// Second-derivative magnitude treated as zero
    pub zero_tolerance: f64,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self::from_motion_duration(
            DEFAULT_COMPRESS_THRESHOLD,
            DEFAULT_MAX_MOTION_SECONDS as f32,
            DEFAULT_FRAME_RATE,
        )
    }
}

impl PipelineConfig {
    /// Create a config with the default zero tolerance
    #[must_use]
    pub fn new(compress_threshold: f64, min_separation: usize) -> Self {
        Self {
            compress_threshold,
            min_separation,
            zero_tolerance: DEFAULT_ZERO_TOLERANCE,
        }
    }

    /// Derive the minimum separation from a motion duration.
    ///
    /// The duration is truncated to whole seconds before scaling by the frame
    /// rate.
    #[must_use]
    pub fn from_motion_duration(compress_threshold: f64, seconds: f32, frame_rate: u32) -> Self {
        let whole_seconds = seconds.max(0.0).trunc() as usize;
        Self::new(compress_threshold, whole_seconds * frame_rate as usize)
    }

    /// Treat only exact zeros as inert in the second derivative
    #[must_use]
    pub fn exact(mut self) -> Self {
        self.zero_tolerance = 0.0;
        self
    }

    /// Set the kept coefficient fraction
    #[must_use]
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.compress_threshold = threshold;
        self
    }

    /// Set the minimum separation in frames
    #[must_use]
    pub fn with_min_separation(mut self, frames: usize) -> Self {
        self.min_separation = frames;
        self
    }

    /// Set the zero tolerance
    #[must_use]
    pub fn with_zero_tolerance(mut self, tolerance: f64) -> Self {
        self.zero_tolerance = tolerance;
        self
    }

    /// Check value ranges
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` for a threshold outside `[0, 1]` or a negative
    /// or non-finite tolerance.
    pub fn validate(&self) -> MotionResult<()> {
        validate_threshold(self.compress_threshold)?;
        if !(self.zero_tolerance >= 0.0 && self.zero_tolerance.is_finite()) {
            return Err(MotionError::InvalidConfig(format!(
                "zero tolerance {} must be finite and non-negative",
                self.zero_tolerance
            )));
        }
        Ok(())
    }
}

/// Intermediate sequences and inflections of one channel
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ChannelResult {
    /// Label of the source channel
    pub label: String,
    /// Normalized step approximation
    pub compressed: Vec<f64>,
    /// First difference of `compressed`
    pub first_derivative: Vec<f64>,
    /// Second difference of `compressed`
    pub second_derivative: Vec<f64>,
    /// Inflection indices into `second_derivative`
    pub inflections: Vec<usize>,
}

/// Result of one pipeline run
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Analysis {
    /// Per-channel diagnostics, in input order
    pub channels: Vec<ChannelResult>,
    /// Labels of channels skipped for having no dynamic range
    pub skipped: Vec<String>,
    /// Inflections of every channel, sorted ascending
    pub inflection_pool: Vec<usize>,
    /// Summarized segment boundaries
    pub boundaries: Vec<usize>,
}

impl Analysis {
    /// Number of segment boundaries
    #[must_use]
    pub fn boundary_count(&self) -> usize {
        self.boundaries.len()
    }

    /// Look up a channel result by label
    #[must_use]
    pub fn channel(&self, label: &str) -> Option<&ChannelResult> {
        self.channels.iter().find(|c| c.label == label)
    }
}

/// Summarize a sorted pool, yielding no boundaries for an empty pool.
///
/// # Errors
///
/// Propagates summarizer errors.
pub fn boundaries_from_pool(pool: &[usize], min_separation: usize) -> MotionResult<Vec<usize>> {
    if pool.is_empty() {
        return Ok(Vec::new());
    }
    summarize_points(pool, min_separation)
}

/// Validate channel samples and set aside flat channels.
///
/// Returns the channels to analyze and the labels of the skipped ones.
pub(crate) fn split_flat(channels: &[Channel]) -> MotionResult<(Vec<&Channel>, Vec<String>)> {
    let mut active = Vec::with_capacity(channels.len());
    let mut skipped = Vec::new();

    for channel in channels {
        ensure_finite(&channel.samples, "input")?;
        if channel.is_flat() {
            trace_event!(channel = %channel.label, "skipping flat channel");
            skipped.push(channel.label.clone());
        } else {
            active.push(channel);
        }
    }

    Ok((active, skipped))
}

/// Merge per-channel inflections into one ascending pool
pub(crate) fn merge_inflections(results: &[ChannelResult]) -> Vec<usize> {
    let mut pool: Vec<usize> = results
        .iter()
        .flat_map(|r| r.inflections.iter().copied())
        .collect();
    pool.sort_unstable();
    pool
}

/// Motion segment analyzer
#[derive(Debug, Clone, Default)]
pub struct MotionAnalyzer {
    config: PipelineConfig,
}

impl MotionAnalyzer {
    /// Create an analyzer
    #[must_use]
    pub fn new(config: PipelineConfig) -> Self {
        Self { config }
    }

    /// Get the configuration
    #[must_use]
    pub const fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Run the per-channel stages on a single channel.
    ///
    /// # Errors
    ///
    /// - `DegenerateSignal` for a flat channel (filter with [`Channel::is_flat`])
    /// - `InsufficientLength` for fewer than 3 samples
    /// - `NonFiniteValue` if any stage produces NaN or infinity
    pub fn analyze_channel(&self, channel: &Channel) -> MotionResult<ChannelResult> {
        let _guard = trace_enter!("analyze_channel", channel = %channel.label);

        let normalized = normalize(&channel.samples)?;
        let compressed = approximate(&normalized, self.config.compress_threshold)?;
        ensure_finite(&compressed, "approximate")?;
        let first_derivative = differentiate(&compressed)?;
        let second_derivative = differentiate(&first_derivative)?;
        let inflections =
            find_inflection_points_with_tolerance(&second_derivative, self.config.zero_tolerance);

        trace_event!(
            channel = %channel.label,
            inflections = inflections.len(),
            "channel analyzed"
        );

        Ok(ChannelResult {
            label: channel.label.clone(),
            compressed,
            first_derivative,
            second_derivative,
            inflections,
        })
    }

    /// Run every non-flat channel, in parallel when available.
    pub(crate) fn analyze_active(&self, active: &[&Channel]) -> MotionResult<Vec<ChannelResult>> {
        parallel_try_map(0..active.len(), |i| self.analyze_channel(active[i]))
    }

    /// Analyze a set of channels and summarize their boundaries.
    ///
    /// # Errors
    ///
    /// Fails on an invalid config, non-finite input samples, or a channel too
    /// short to differentiate twice.
    pub fn analyze(&self, channels: &[Channel]) -> MotionResult<Analysis> {
        let _guard = trace_enter!("analyze", channels = channels.len());
        self.config.validate()?;

        let (active, skipped) = split_flat(channels)?;
        let results = self.analyze_active(&active)?;
        let inflection_pool = merge_inflections(&results);
        let boundaries = boundaries_from_pool(&inflection_pool, self.config.min_separation)?;

        trace_event!(
            threshold = self.config.compress_threshold,
            min_separation = self.config.min_separation,
            boundaries = boundaries.len(),
            "analysis complete"
        );

        Ok(Analysis {
            channels: results,
            skipped,
            inflection_pool,
            boundaries,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Two-level signal: `high` on `[rise, fall)`, `low` elsewhere
    fn pulse(len: usize, rise: usize, fall: usize, low: f64, high: f64) -> Vec<f64> {
        (0..len)
            .map(|i| if (rise..fall).contains(&i) { high } else { low })
            .collect()
    }

    // =========================================================================
    // Config
    // =========================================================================

    #[test]
    fn test_config_default() {
        let config = PipelineConfig::default();
        assert_eq!(config.compress_threshold, 0.01);
        assert_eq!(config.min_separation, 60);
        assert_eq!(config.zero_tolerance, DEFAULT_ZERO_TOLERANCE);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_from_motion_duration_truncates_seconds() {
        assert_eq!(PipelineConfig::from_motion_duration(0.5, 2.9, 30).min_separation, 60);
        assert_eq!(PipelineConfig::from_motion_duration(0.5, 0.5, 30).min_separation, 0);
        assert_eq!(PipelineConfig::from_motion_duration(0.5, 5.0, 60).min_separation, 300);
    }

    #[test]
    fn test_config_builders() {
        let config = PipelineConfig::default()
            .with_threshold(0.9)
            .with_min_separation(30)
            .exact();
        assert_eq!(config, PipelineConfig::new(0.9, 30).with_zero_tolerance(0.0));
    }

    #[test]
    fn test_config_validate() {
        assert!(PipelineConfig::new(1.2, 10).validate().is_err());
        assert!(PipelineConfig::new(f64::NAN, 10).validate().is_err());
        assert!(PipelineConfig::new(0.5, 10)
            .with_zero_tolerance(-1.0)
            .validate()
            .is_err());
        assert!(PipelineConfig::new(0.5, 10)
            .with_zero_tolerance(f64::INFINITY)
            .validate()
            .is_err());
    }

    // =========================================================================
    // Channel
    // =========================================================================

    #[test]
    fn test_channel_from_f32() {
        let channel = Channel::from_f32("knee", &[0.5, 1.5]);
        assert_eq!(channel.samples, vec![0.5, 1.5]);
        assert_eq!(channel.len(), 2);
        assert!(!channel.is_empty());
        assert!(!channel.is_flat());
        assert!(Channel::new("still", vec![3.0; 10]).is_flat());
    }

    // =========================================================================
    // Single channel
    // =========================================================================

    #[test]
    fn test_analyze_channel_lengths() {
        let analyzer = MotionAnalyzer::new(PipelineConfig::new(1.0, 10));
        let channel = Channel::new("ramp", (0..37).map(f64::from).collect());
        let result = analyzer.analyze_channel(&channel).expect("valid channel");

        assert_eq!(result.label, "ramp");
        assert_eq!(result.compressed.len(), 37);
        assert_eq!(result.first_derivative.len(), 36);
        assert_eq!(result.second_derivative.len(), 35);
    }

    #[test]
    fn test_analyze_channel_step_edges() {
        let analyzer = MotionAnalyzer::new(PipelineConfig::new(1.0, 10));
        let channel = Channel::new("pulse", pulse(64, 20, 40, 0.0, 2.0));
        let result = analyzer.analyze_channel(&channel).expect("valid channel");
        assert_eq!(result.inflections, vec![18, 38]);
    }

    #[test]
    fn test_analyze_channel_flat_is_degenerate() {
        let analyzer = MotionAnalyzer::default();
        let channel = Channel::new("still", vec![1.0; 16]);
        assert!(matches!(
            analyzer.analyze_channel(&channel),
            Err(MotionError::DegenerateSignal { .. })
        ));
    }

    #[test]
    fn test_analyze_channel_too_short() {
        let analyzer = MotionAnalyzer::default();
        let channel = Channel::new("blip", vec![0.0, 1.0]);
        assert!(matches!(
            analyzer.analyze_channel(&channel),
            Err(MotionError::InsufficientLength { .. })
        ));
    }

    // =========================================================================
    // Multi-channel
    // =========================================================================

    #[test]
    fn test_analyze_skips_flat_channels() {
        let analyzer = MotionAnalyzer::new(PipelineConfig::new(1.0, 5));
        let channels = [
            Channel::new("still", vec![0.25; 64]),
            Channel::new("pulse", pulse(64, 20, 40, 0.0, 1.0)),
        ];
        let analysis = analyzer.analyze(&channels).expect("valid channels");

        assert_eq!(analysis.skipped, vec!["still".to_string()]);
        assert_eq!(analysis.channels.len(), 1);
        assert!(analysis.channel("pulse").is_some());
        assert!(analysis.channel("still").is_none());
    }

    #[test]
    fn test_analyze_pools_and_sorts() {
        let analyzer = MotionAnalyzer::new(PipelineConfig::new(1.0, 5));
        let channels = [
            Channel::new("late", pulse(64, 30, 50, 0.0, 1.0)),
            Channel::new("early", pulse(64, 10, 20, 0.0, 1.0)),
        ];
        let analysis = analyzer.analyze(&channels).expect("valid channels");

        assert_eq!(analysis.channels[0].label, "late");
        assert_eq!(analysis.channels[1].label, "early");
        assert_eq!(analysis.inflection_pool, vec![8, 18, 28, 48]);
        // 48 is the last pooled point and is never evaluated on its own
        assert_eq!(analysis.boundaries, vec![8, 18, 28]);
        assert_eq!(analysis.boundary_count(), 3);
    }

    #[test]
    fn test_analyze_no_inflections_is_empty() {
        let analyzer = MotionAnalyzer::new(PipelineConfig::new(1.0, 5));
        let channels = [
            Channel::new("still", vec![1.0; 32]),
            Channel::new("ramp", (0..32).map(f64::from).collect()),
        ];
        let analysis = analyzer.analyze(&channels).expect("valid channels");
        assert!(analysis.inflection_pool.is_empty());
        assert!(analysis.boundaries.is_empty());
    }

    #[test]
    fn test_analyze_no_channels() {
        let analysis = MotionAnalyzer::default().analyze(&[]).expect("nothing to do");
        assert_eq!(analysis, Analysis::default());
    }

    #[test]
    fn test_analyze_rejects_non_finite_input() {
        let channels = [Channel::new("broken", vec![0.0, f64::NAN, 1.0, 2.0])];
        assert_eq!(
            MotionAnalyzer::default().analyze(&channels),
            Err(MotionError::NonFiniteValue {
                stage: "input",
                index: 1
            })
        );
    }

    #[test]
    fn test_analyze_rejects_invalid_config() {
        let analyzer = MotionAnalyzer::new(PipelineConfig::new(2.0, 5));
        let channels = [Channel::new("pulse", pulse(16, 4, 8, 0.0, 1.0))];
        assert!(matches!(
            analyzer.analyze(&channels),
            Err(MotionError::InvalidConfig(_))
        ));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_analysis_serializes() {
        let analyzer = MotionAnalyzer::new(PipelineConfig::new(1.0, 5));
        let analysis = analyzer
            .analyze(&[Channel::new("pulse", pulse(32, 8, 16, 0.0, 1.0))])
            .expect("valid channels");

        let json = serde_json::to_string(&analysis).expect("serializable");
        let parsed: serde_json::Value = serde_json::from_str(&json).expect("valid JSON");
        assert_eq!(parsed["boundaries"], serde_json::json!([6]));
        assert_eq!(parsed["channels"][0]["label"], "pulse");

        let config: PipelineConfig =
            serde_json::from_str(r#"{"compress_threshold":0.2,"min_separation":45,"zero_tolerance":0.0}"#)
                .expect("valid config JSON");
        assert_eq!(config, PipelineConfig::new(0.2, 45).exact());
    }

    #[test]
    fn test_boundaries_from_pool() {
        assert!(boundaries_from_pool(&[], 10).expect("empty pool").is_empty());
        assert_eq!(
            boundaries_from_pool(&[0, 5, 6, 50, 51, 52], 10).expect("non-empty"),
            vec![0, 6]
        );
    }
}
