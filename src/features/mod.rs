//! Feature detectors.
//!
//! - [`bender`]: the shared `(0, 1)` compressor and its tuned constants.
//! - [`peak`]: peak energy, first-difference peak energy, cross-channel
//!   deviation, and the early-ictal latency rule.
//! - [`band`]: quadrature band energy and line-length energy.
//! - [`vector`]: the three-feature vector consumed by the classifier.
//! - [`catalog`]: every per-channel detector by name, for exploration.

pub mod band;
pub mod bender;
pub mod catalog;
pub mod peak;
pub mod vector;

pub use band::{line_length, BandDetector, BandReduction};
pub use bender::{bender, Compression};
pub use catalog::Feature;
pub use peak::{
    channel_peak_deviation, difference_channel_peak_deviation, difference_peak_energy, is_early,
    peak_detect, peak_energy, PeakDetection,
};
pub use vector::{feature_vector, labeled_point, FeatureVector};
