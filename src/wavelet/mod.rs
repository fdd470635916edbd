//! Haar wavelet engine
//!
//! Multiresolution decomposition, magnitude-rank compression and
//! reconstruction of channel signals. All arithmetic is `f64`.

pub mod compress;
pub mod haar;

pub use compress::{approximate, compress, cutoff_magnitude, validate_threshold};
pub use haar::{inverse_transform, pad, transform};
