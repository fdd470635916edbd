//! # motion-analysis
//!
//! Motion segmentation for motion-capture channels.
//!
//! ## Overview
//!
//! Each channel (one scalar series per joint axis, one sample per frame) is
//! reduced to a step-like approximation with a Haar wavelet, differentiated
//! twice, and scanned for curvature sign changes. The inflections of all
//! channels are pooled and summarized into motion segment boundaries.
//!
//! ```text
//! channel -> normalize -> Haar approximate -> diff -> diff -> inflections
//!                                                                 |
//!        boundaries <- summarize <- sort <- pool (all channels) <-+
//! ```
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use motion_analysis::{Channel, MotionAnalyzer, PipelineConfig};
//!
//! let analyzer = MotionAnalyzer::new(PipelineConfig::new(0.05, 60));
//! let analysis = analyzer.analyze(&[
//!     Channel::from_f32("hips_y", &hips_y),
//!     Channel::from_f32("knee_l", &knee_l),
//! ])?;
//! println!("boundaries: {:?}", analysis.boundaries);
//! ```
//!
//! ## Features
//!
//! - `parallel` (default): channels and sweep rows run on rayon
//! - `tracing`: debug spans and events via the tracing crate
//! - `serde`: Serialize/Deserialize for configs and results

#![warn(missing_docs)]
#![deny(clippy::unwrap_used)]

pub mod error;
/// Parallel map with sequential fallback
pub mod parallel;
pub mod pipeline;
pub mod segmentation;
pub mod signal;
pub mod sweep;
#[macro_use]
pub mod trace;
pub mod wavelet;

pub use error::{MotionError, MotionResult};
pub use pipeline::{
    boundaries_from_pool, Analysis, Channel, ChannelResult, MotionAnalyzer, PipelineConfig,
};
pub use segmentation::{
    find_inflection_points, find_inflection_points_with_tolerance, summarize_points,
};
pub use signal::{differentiate, is_flat, normalize, value_range};
pub use sweep::{sparsest_cell, ParameterSweep, SweepCell, SweepGrid};
pub use wavelet::{approximate, compress, inverse_transform, pad, transform};
