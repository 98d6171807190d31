//! The classifier's three-feature vector.
//!
//! | index | feature                                                  |
//! |-------|----------------------------------------------------------|
//! | 0     | mean compressed peak energy over channels                |
//! | 1     | compressed deviation of first-differenced peak energies  |
//! | 2     | mean compressed 10–20 Hz quadrature energy over channels |
//!
//! This triple is the whole contract between training and classification;
//! every other detector in [`crate::features`] is exploratory.
use super::band::BandDetector;
use super::peak::{difference_channel_peak_deviation, mean, peak_detect};
use crate::config::FeatureConfig;
use crate::epoch::Epoch;
use crate::error::{Error, Result};
use crate::filter::FilterBank;
use crate::store::{LabeledPoint, PointClass};

/// Three compressed features of one epoch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureVector(pub [f64; 3]);

impl FeatureVector {
    pub const DIM: usize = 3;

    pub fn new(peak: f64, deviation: f64, band_energy: f64) -> Self {
        Self([peak, deviation, band_energy])
    }

    pub fn peak(&self) -> f64 {
        self.0[0]
    }

    pub fn deviation(&self) -> f64 {
        self.0[1]
    }

    pub fn band_energy(&self) -> f64 {
        self.0[2]
    }

    pub fn as_array(&self) -> &[f64; 3] {
        &self.0
    }

    /// Euclidean distance.
    pub fn distance(&self, other: &FeatureVector) -> f64 {
        self.0
            .iter()
            .zip(other.0.iter())
            .map(|(a, b)| (a - b) * (a - b))
            .sum::<f64>()
            .sqrt()
    }
}

impl TryFrom<&[f64]> for FeatureVector {
    type Error = Error;

    fn try_from(v: &[f64]) -> Result<Self> {
        match v {
            [a, b, c] => Ok(Self([*a, *b, *c])),
            _ => Err(Error::malformed("feature vector", format!("{} values, expected 3", v.len()))),
        }
    }
}

/// Build the feature vector of `epoch`. Needs the 10–20 Hz kernel in `bank`.
pub fn feature_vector(epoch: &Epoch, bank: &FilterBank, cfg: &FeatureConfig) -> Result<FeatureVector> {
    let peak = peak_detect(epoch, cfg.early_latency_s);
    let deviation = difference_channel_peak_deviation(&epoch.data);
    let band = BandDetector::TEN_TWENTY.detect(&epoch.data, bank, cfg.line_length)?;
    Ok(FeatureVector::new(mean(&peak.energies), deviation[0], mean(&band)))
}

/// Feature vector plus class, for a labeled training epoch.
pub fn labeled_point(epoch: &Epoch, bank: &FilterBank, cfg: &FeatureConfig) -> Result<LabeledPoint> {
    let class = PointClass::of_epoch(epoch, cfg.early_latency_s)?;
    let vector = feature_vector(epoch, bank, cfg)?;
    Ok(LabeledPoint { vector, class })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distance_is_euclidean() {
        let a = FeatureVector::new(0.0, 0.0, 0.0);
        let b = FeatureVector::new(1.0, 2.0, 2.0);
        assert_eq!(a.distance(&b), 3.0);
        assert_eq!(b.distance(&b), 0.0);
    }

    #[test]
    fn try_from_rejects_wrong_length() {
        assert!(FeatureVector::try_from(&[1.0, 2.0][..]).is_err());
        assert_eq!(FeatureVector::try_from(&[1.0, 2.0, 3.0][..]).unwrap().band_energy(), 3.0);
    }
}
