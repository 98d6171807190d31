//! # ictal: seizure detection on one-second intracranial EEG clips
//!
//! `ictal` scores short multichannel EEG epochs for two questions: is this
//! clip part of a seizure, and if so, is it within the first seconds of
//! seizure onset? Each epoch is reduced to a three-number feature vector and
//! compared, per patient, against a stored population of labeled vectors by
//! a k-nearest-neighbour vote.
//!
//! ## Pipeline overview
//!
//! ```text
//! Dog_1_ictal_segment_7.safetensors      data [C, T], freq, latency, type
//!   │
//!   ├─ resample::resample_epoch()   Fourier resample → 400 samples (optional)
//!   ├─ features::peak_energy()      log10(max|x|²) → bender(4.8, 3.0)   ─┐
//!   ├─ first difference → peak → population std → bender(0.055, 0.1)  ├─ FeatureVector
//!   ├─ 10-20 Hz quadrature energy   ln√(I²+Q²)     → bender(3, 8)      ─┘
//!   │
//!   ├─ train:    LabeledPoint (vector + i/e/l class) → points/<patient>/
//!   └─ classify: k = 10 rounds against the patient's population
//!        │
//!        └─→ Scores { ictal, early }   fractions of rounds won
//! ```
//!
//! ## Quick start
//!
//! ```no_run
//! use ictal::{score_epoch, Band, Epoch, FilterBank, ReferencePopulation, RunConfig};
//! use std::path::Path;
//!
//! let cfg   = RunConfig::default();
//! let bank  = FilterBank::load(&cfg.features.filter_dir, &[Band::TenTwenty]).unwrap();
//! let pop   = ReferencePopulation::load_dir(Path::new("points/Dog_1")).unwrap();
//! let epoch = Epoch::load(Path::new("data/Dog_1/Dog_1_test_segment_1.safetensors")).unwrap();
//!
//! let scores = score_epoch(&epoch, &pop, &bank, &cfg).unwrap();
//! println!("{},{:.1},{:.1}", epoch.id, scores.ictal, scores.early);
//! ```
//!
//! ## Running individual steps
//!
//! ```no_run
//! use ictal::features::{peak_energy, difference_channel_peak_deviation, BandDetector};
//! use ictal::{Band, FilterBank, LineLengthMode};
//! use ndarray::Array2;
//!
//! let data: Array2<f64> = Array2::zeros((16, 400)); // [C, T]
//! let bank = FilterBank::load("filters".as_ref(), &[Band::TenTwenty]).unwrap();
//!
//! let peaks = peak_energy(&data);                        // one value per channel
//! let dev   = difference_channel_peak_deviation(&data);  // same value on every channel
//! let band  = BandDetector::TEN_TWENTY.detect(&data, &bank, LineLengthMode::LastDelta).unwrap();
//! ```

pub mod batch;
pub mod config;
pub mod epoch;
pub mod error;
pub mod explore;
pub mod features;
pub mod filter;
pub mod io;
pub mod knn;
pub mod resample;
pub mod store;

// ── Crate-root re-exports ─────────────────────────────────────────────────

// config
pub use config::{ClassifierConfig, FeatureConfig, LineLengthMode, ResampleConfig, RunConfig};

// epoch
pub use epoch::{Epoch, SourceLabel};

// error
pub use error::{Error, Result};

// features
pub use features::{feature_vector, labeled_point, Feature, FeatureVector};

// filter
pub use filter::{Band, FilterBank, FilterKernelPair};

// knn
pub use knn::{classify, Scores};

// store
pub use store::{LabeledPoint, PointClass, PopulationIndex, ReferencePopulation};

// batch
pub use batch::{classify_all, train_all, ClassificationRecord};

// resample
pub use resample::resample_epoch;

/// Score one epoch against a patient's reference population.
///
/// # Steps
///
/// 1. Fourier-resample to [`ResampleConfig::target_samples`] if the epoch
///    has a different length and resampling is enabled (`target_samples > 0`).
/// 2. Compute the [`FeatureVector`] with [`FeatureConfig`].
/// 3. Run the k-round vote with [`ClassifierConfig`].
///
/// # Errors
///
/// Fails when the 10-20 Hz kernel pair is not in `bank` or is longer than
/// the (resampled) epoch.
///
/// # Examples
///
/// ```
/// use ictal::{score_epoch, Epoch, FilterBank, FilterKernelPair, Band, ReferencePopulation, RunConfig};
/// use ndarray::Array2;
///
/// let mut bank = FilterBank::new();
/// bank.insert(FilterKernelPair::new(Band::TenTwenty, vec![1.0; 8], vec![0.5; 8]).unwrap());
/// let data = Array2::from_shape_fn((4, 400), |(c, t)| ((t + 7 * c) as f64 * 0.3).sin());
/// let epoch = Epoch::new("clip", data, 400.0).unwrap();
///
/// // An empty population loses to the late-ictal sentinel every round.
/// let scores = score_epoch(&epoch, &ReferencePopulation::new(), &bank, &RunConfig::default()).unwrap();
/// assert_eq!((scores.ictal, scores.early), (1.0, 0.0));
/// ```
pub fn score_epoch(
    epoch: &Epoch,
    population: &ReferencePopulation,
    bank: &FilterBank,
    cfg: &RunConfig,
) -> Result<Scores> {
    let target = cfg.resample.target_samples;
    let resampled;
    let epoch = if target > 0 && epoch.n_samples() != target {
        resampled = resample::resample_epoch(epoch, target)?;
        &resampled
    } else {
        epoch
    };
    let vector = feature_vector(epoch, bank, &cfg.features)?;
    Ok(classify(&vector, population, &cfg.classifier))
}
