/// Shared helpers: synthetic epochs, kernel files and point files in temp dirs.
use ictal::io::StWriter;
use ictal::{Band, Epoch, FeatureVector, FilterBank, FilterKernelPair, LabeledPoint, PointClass, SourceLabel};
use std::f64::consts::PI;
use std::path::{Path, PathBuf};

pub const SFREQ: f64 = 400.0;
pub const N_SAMPLES: usize = 400;
pub const KERNEL_TAPS: usize = 64;

#[allow(unused)]
/// `n_ch` channels of a `freq` Hz sine with amplitude `amp`, one phase step
/// per channel.
pub fn sine_channels(n_ch: usize, n_t: usize, freq: f64, amp: f64) -> Vec<Vec<f64>> {
    (0..n_ch)
        .map(|c| {
            (0..n_t)
                .map(|t| amp * (2.0 * PI * freq * t as f64 / SFREQ + 0.4 * c as f64).sin())
                .collect()
        })
        .collect()
}

#[allow(unused)]
/// Hann-windowed cosine / sine pair centred on `freq`.
pub fn quadrature_pair(band: Band, freq: f64, taps: usize) -> FilterKernelPair {
    let win = |n: usize| 0.5 - 0.5 * (2.0 * PI * n as f64 / (taps - 1) as f64).cos();
    let i = (0..taps).map(|n| win(n) * (2.0 * PI * freq * n as f64 / SFREQ).cos()).collect();
    let q = (0..taps).map(|n| win(n) * (2.0 * PI * freq * n as f64 / SFREQ).sin()).collect();
    FilterKernelPair::new(band, i, q).unwrap()
}

#[allow(unused)]
/// In-memory bank with every band centred on 15 Hz.
pub fn test_bank() -> FilterBank {
    let mut bank = FilterBank::new();
    for band in Band::ALL {
        bank.insert(quadrature_pair(band, 15.0, KERNEL_TAPS));
    }
    bank
}

#[allow(unused)]
/// Write every band's kernel file into `dir`.
pub fn write_kernels(dir: &Path) {
    for band in Band::ALL {
        let pair = quadrature_pair(band, 15.0, KERNEL_TAPS);
        let mut w = StWriter::new();
        w.add_f64("FilterCoefI", pair.in_phase(), &[1, pair.len()]);
        w.add_f64("FilterCoefQ", pair.quadrature(), &[1, pair.len()]);
        w.write(&dir.join(band.file_name())).unwrap();
    }
}

#[allow(unused)]
/// Write a 15 Hz, 4-channel epoch file named `name` into `dir`.
pub fn write_epoch(dir: &Path, name: &str, amp: f64, label: Option<SourceLabel>, latency: Option<f64>) -> PathBuf {
    let mut epoch = Epoch::from_channels(name, sine_channels(4, N_SAMPLES, 15.0, amp), SFREQ).unwrap();
    epoch.label = label;
    epoch.latency = latency;
    let path = dir.join(name);
    epoch.save(&path).unwrap();
    path
}

#[allow(unused)]
pub fn write_point(dir: &Path, name: &str, vector: [f64; 3], class: PointClass) -> PathBuf {
    let path = dir.join(name);
    LabeledPoint::new(FeatureVector(vector), class).save(&path).unwrap();
    path
}

#[allow(unused)]
/// A point file whose `type` tag is not i/e/l.
pub fn write_point_with_tag(dir: &Path, name: &str, vector: [f64; 3], tag: &str) -> PathBuf {
    let path = dir.join(name);
    let mut w = StWriter::new();
    w.add_f64("data", &vector, &[1, 3]);
    w.add_metadata("type", tag);
    w.write(&path).unwrap();
    path
}
