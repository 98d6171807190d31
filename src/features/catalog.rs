//! Named catalogue of every per-channel detector.
//!
//! Used by the exploration table and the `explore` binary to pick a detector
//! by name. The names are the display labels the detectors have always been
//! selected by, e.g. `"10-20Hz BPF"` or `"Difference Channel Peak Deviation"`.
use super::band::BandDetector;
use super::peak;
use crate::config::FeatureConfig;
use crate::epoch::Epoch;
use crate::error::Result;
use crate::filter::{Band, FilterBank};
use std::fmt;
use std::str::FromStr;

/// Every selectable per-channel feature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Feature {
    PeakDetect,
    TenTwentyBpf,
    TenTwentyUpslope,
    TenTwentyDownslope,
    TenThirtyLineLength,
    TwentyThirtyLineLength,
    DifferencePeak,
    DifferenceTenTwentyLineLength,
    ChannelPeakDeviation,
    DifferenceChannelPeakDeviation,
}

impl Feature {
    pub const ALL: [Feature; 10] = [
        Feature::PeakDetect,
        Feature::TenTwentyBpf,
        Feature::TenTwentyUpslope,
        Feature::TenTwentyDownslope,
        Feature::TenThirtyLineLength,
        Feature::TwentyThirtyLineLength,
        Feature::DifferencePeak,
        Feature::DifferenceTenTwentyLineLength,
        Feature::ChannelPeakDeviation,
        Feature::DifferenceChannelPeakDeviation,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Feature::PeakDetect => "Peak Detect",
            Feature::TenTwentyBpf => "10-20Hz BPF",
            Feature::TenTwentyUpslope => "10-20Hz Upslope",
            Feature::TenTwentyDownslope => "10-20Hz Downslope",
            Feature::TenThirtyLineLength => "10-30Hz Line Length",
            Feature::TwentyThirtyLineLength => "20-30Hz Line Length",
            Feature::DifferencePeak => "Difference Peak",
            Feature::DifferenceTenTwentyLineLength => "Difference 10-20Hz Line Length",
            Feature::ChannelPeakDeviation => "Channel Peak Deviation",
            Feature::DifferenceChannelPeakDeviation => "Difference Channel Peak Deviation",
        }
    }

    /// Band detector behind this feature, if it is band-limited.
    pub fn band_detector(self) -> Option<BandDetector> {
        match self {
            Feature::TenTwentyBpf => Some(BandDetector::TEN_TWENTY),
            Feature::TenTwentyUpslope => Some(BandDetector::TEN_TWENTY_UPSLOPE),
            Feature::TenTwentyDownslope => Some(BandDetector::TEN_TWENTY_DOWNSLOPE),
            Feature::TenThirtyLineLength => Some(BandDetector::TEN_THIRTY_LINE_LENGTH),
            Feature::TwentyThirtyLineLength => Some(BandDetector::TWENTY_THIRTY_LINE_LENGTH),
            Feature::DifferenceTenTwentyLineLength => Some(BandDetector::DIFF_TEN_TWENTY_LINE_LENGTH),
            Feature::PeakDetect
            | Feature::DifferencePeak
            | Feature::ChannelPeakDeviation
            | Feature::DifferenceChannelPeakDeviation => None,
        }
    }

    /// Kernel bands that must be loaded before [`Feature::extract`].
    pub fn required_bands(self) -> Vec<Band> {
        self.band_detector().map(|d| vec![d.band]).unwrap_or_default()
    }

    /// Per-channel values of this feature for `epoch`.
    pub fn extract(self, epoch: &Epoch, bank: &FilterBank, cfg: &FeatureConfig) -> Result<Vec<f64>> {
        let band = |detector: BandDetector| detector.detect(&epoch.data, bank, cfg.line_length);
        match self {
            Feature::PeakDetect => Ok(peak::peak_energy(&epoch.data)),
            Feature::DifferencePeak => Ok(peak::difference_peak_energy(&epoch.data)),
            Feature::ChannelPeakDeviation => Ok(peak::channel_peak_deviation(&epoch.data)),
            Feature::DifferenceChannelPeakDeviation => Ok(peak::difference_channel_peak_deviation(&epoch.data)),
            Feature::TenTwentyBpf => band(BandDetector::TEN_TWENTY),
            Feature::TenTwentyUpslope => band(BandDetector::TEN_TWENTY_UPSLOPE),
            Feature::TenTwentyDownslope => band(BandDetector::TEN_TWENTY_DOWNSLOPE),
            Feature::TenThirtyLineLength => band(BandDetector::TEN_THIRTY_LINE_LENGTH),
            Feature::TwentyThirtyLineLength => band(BandDetector::TWENTY_THIRTY_LINE_LENGTH),
            Feature::DifferenceTenTwentyLineLength => band(BandDetector::DIFF_TEN_TWENTY_LINE_LENGTH),
        }
    }
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Feature {
    type Err = String;

    /// Case-insensitive match on [`Feature::name`].
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Feature::ALL
            .into_iter()
            .find(|f| f.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                let names: Vec<&str> = Feature::ALL.iter().map(|f| f.name()).collect();
                format!("unknown feature {s:?}; expected one of: {}", names.join(", "))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_round_trip() {
        for f in Feature::ALL {
            assert_eq!(f.name().parse::<Feature>().unwrap(), f);
        }
        assert_eq!("peak detect".parse::<Feature>().unwrap(), Feature::PeakDetect);
        assert!("Alpha Power".parse::<Feature>().is_err());
    }

    #[test]
    fn peak_features_need_no_kernels() {
        let epoch = Epoch::from_channels("e", vec![vec![1.0, -4.0, 2.0], vec![0.5, 0.5, 8.0]], 3.0).unwrap();
        let bank = FilterBank::new();
        let cfg = FeatureConfig::default();
        for f in [Feature::PeakDetect, Feature::DifferencePeak, Feature::ChannelPeakDeviation] {
            assert!(f.required_bands().is_empty());
            assert_eq!(f.extract(&epoch, &bank, &cfg).unwrap().len(), 2);
        }
        assert_eq!(Feature::DifferenceTenTwentyLineLength.required_bands(), vec![Band::TenTwenty]);
    }

    #[test]
    fn band_features_match_their_detector() {
        let pair = |band| crate::filter::FilterKernelPair::new(band, vec![1.0, 0.5, 0.25], vec![0.0, 0.5, 1.0]).unwrap();
        let mut bank = FilterBank::new();
        for band in Band::ALL {
            bank.insert(pair(band));
        }
        let epoch = Epoch::from_channels("e", vec![vec![1.0, -4.0, 2.0, 3.0], vec![0.5, 0.5, 8.0, -1.0]], 4.0).unwrap();
        let cfg = FeatureConfig::default();
        for f in Feature::ALL {
            let got = f.extract(&epoch, &bank, &cfg).unwrap();
            match f.band_detector() {
                Some(d) => assert_eq!(got, d.detect(&epoch.data, &bank, cfg.line_length).unwrap(), "{f}"),
                None => assert!(f.required_bands().is_empty(), "{f}"),
            }
        }
    }
}
