//! Peak-energy and cross-channel deviation detectors.
//!
//! Per channel `c`:
//!
//! ```text
//! energy_c = bender(log10(max|x_c|²), 4.8, 3.0)
//! ```
//!
//! The first-difference variants run the same computation on
//! `x_c[t+1] - x_c[t]`. The deviation detectors reduce the per-channel
//! energies to their population standard deviation and broadcast that one
//! value back to every channel slot, so their outputs have the same shape as
//! the other per-channel features.
use super::bender::{Compression, DIFF_DEVIATION, PEAK};
use crate::epoch::{first_difference, Epoch};
use ndarray::{Array2, ArrayView1};

/// `log10(max|x|²)`. An all-zero channel gives `-inf`.
pub fn channel_peak_energy(x: ArrayView1<f64>) -> f64 {
    let peak = x.iter().fold(0.0_f64, |m, &v| m.max(v.abs()));
    (peak * peak).log10()
}

fn compressed_peaks(data: &Array2<f64>, c: Compression) -> Vec<f64> {
    data.rows().into_iter().map(|row| c.apply(channel_peak_energy(row))).collect()
}

/// Compressed peak energy of every channel.
pub fn peak_energy(data: &Array2<f64>) -> Vec<f64> {
    compressed_peaks(data, PEAK)
}

/// Compressed peak energy of every first-differenced channel.
pub fn difference_peak_energy(data: &Array2<f64>) -> Vec<f64> {
    compressed_peaks(&first_difference(data), PEAK)
}

/// Spread of the per-channel peak energies, broadcast to every channel.
pub fn channel_peak_deviation(data: &Array2<f64>) -> Vec<f64> {
    let peaks = peak_energy(data);
    vec![population_std(&peaks); peaks.len()]
}

/// Spread of the first-differenced peak energies, compressed with
/// `(0.055, 0.1)` and broadcast to every channel.
pub fn difference_channel_peak_deviation(data: &Array2<f64>) -> Vec<f64> {
    let peaks = difference_peak_energy(data);
    vec![DIFF_DEVIATION.apply(population_std(&peaks)); peaks.len()]
}

/// Output of [`peak_detect`]: per-channel energies plus the early flag.
#[derive(Debug, Clone, PartialEq)]
pub struct PeakDetection {
    pub energies: Vec<f64>,
    /// `true` for an ictal epoch recorded less than the early threshold
    /// after onset. Always `false` when the epoch has no latency.
    pub early: bool,
}

/// Peak energy of `epoch`, tagging it early when its latency is strictly
/// below `early_latency_s`.
pub fn peak_detect(epoch: &Epoch, early_latency_s: f64) -> PeakDetection {
    PeakDetection {
        energies: peak_energy(&epoch.data),
        early: is_early(epoch.latency, early_latency_s),
    }
}

/// Early-ictal rule: `latency < threshold`, strict; no latency is never early.
#[inline]
pub fn is_early(latency: Option<f64>, early_latency_s: f64) -> bool {
    latency.is_some_and(|l| l < early_latency_s)
}

/// Arithmetic mean; `NaN` for an empty slice.
pub fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

/// Standard deviation with `ddof = 0`.
pub fn population_std(values: &[f64]) -> f64 {
    let m = mean(values);
    let var = values.iter().map(|&v| (v - m) * (v - m)).sum::<f64>() / values.len() as f64;
    var.sqrt()
}
