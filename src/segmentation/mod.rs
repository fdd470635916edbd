//! Motion segment boundary detection
//!
//! Turns a smoothed second derivative into inflection indices and collapses
//! the pooled indices of many channels into segment boundaries.

pub mod inflection;
pub mod summary;

pub use inflection::{find_inflection_points, find_inflection_points_with_tolerance};
pub use summary::summarize_points;
