//! Feature, classifier and resampler configuration.
//!
//! Every struct has a [`Default`] carrying the empirically tuned values, and
//! all fields are `pub` so a caller can override one with struct-update
//! syntax:
//!
//! ```
//! use ictal::{ClassifierConfig, FeatureConfig, LineLengthMode};
//!
//! let features = FeatureConfig {
//!     line_length: LineLengthMode::Full,   // sum every delta
//!     ..FeatureConfig::default()
//! };
//! let knn = ClassifierConfig { k: 5, ..ClassifierConfig::default() };
//! # let _ = (features, knn);
//! ```
//!
//! The binaries also accept the same structs as JSON through `--config`;
//! see [`RunConfig::load`].
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// How a filtered channel is reduced to a line-length value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineLengthMode {
    /// Keep only the final adjacent-sample absolute difference.
    ///
    /// This is what the tuned line-length constants were fitted against,
    /// so it stays the default.
    #[default]
    LastDelta,
    /// Sum of all adjacent-sample absolute differences.
    Full,
}

/// Configuration for the feature detectors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeatureConfig {
    /// Directory holding the `FilterSet<Band>.safetensors` kernel files.
    ///
    /// Default: `filters`.
    pub filter_dir: PathBuf,

    /// Ictal epochs with a latency strictly below this (seconds since onset)
    /// are early-ictal, the rest late-ictal.
    ///
    /// Default: `16.0` s.
    pub early_latency_s: f64,

    /// Line-length reduction used by the line-length band detectors.
    ///
    /// Default: [`LineLengthMode::LastDelta`].
    pub line_length: LineLengthMode,
}

impl Default for FeatureConfig {
    fn default() -> Self {
        Self {
            filter_dir: PathBuf::from("filters"),
            early_latency_s: 16.0,
            line_length: LineLengthMode::LastDelta,
        }
    }
}

/// Configuration for the k-nearest-neighbour vote.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    /// Number of voting rounds; each class list is padded to at least this
    /// many entries.
    ///
    /// Default: `10`.
    pub k: usize,

    /// Distance used to pad class lists holding fewer than `k` points.
    ///
    /// Default: `100.0`.
    pub sentinel: f64,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self { k: 10, sentinel: 100.0 }
    }
}

/// Configuration for the batch resampler.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResampleConfig {
    /// Samples per channel after resampling (one-second epochs, so also the
    /// new sample rate in Hz).
    ///
    /// Default: `400`.
    pub target_samples: usize,
}

impl Default for ResampleConfig {
    fn default() -> Self {
        Self { target_samples: 400 }
    }
}

/// Everything a binary can be configured with, as read from `--config`.
///
/// Missing sections and fields fall back to their defaults, so `{}` is a
/// valid config file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    pub features: FeatureConfig,
    pub classifier: ClassifierConfig,
    pub resample: ResampleConfig,
}

impl RunConfig {
    /// Parse a JSON config file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| Error::missing(path, e))?;
        Ok(serde_json::from_str(&text)?)
    }
}
