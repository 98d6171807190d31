//! Quadrature band-energy detectors.
//!
//! Two reductions of a channel against a kernel pair `(h_I, h_Q)`:
//!
//! **Simple energy**: one correlator output over the kernel window:
//!
//! ```text
//! I = Σ h_I[k]·x[k]     Q = Σ h_Q[k]·x[k]     E = ln √(I² + Q²)
//! ```
//!
//! **Line-length energy**: full convolution, then a line-length reduction
//! of each branch:
//!
//! ```text
//! I_f = h_I * x          Q_f = h_Q * x
//! E   = log10 √(LL(I_f)² + LL(Q_f)²)
//! ```
//!
//! `LL` is [`line_length`]. With [`LineLengthMode::LastDelta`] it is only
//! the final `|y[n-1] - y[n-2]|`, not a sum over the signal; the tuned
//! compression constants were fitted against that value.
//!
//! Every per-channel energy is then compressed with the band's constants.
use super::bender::{self, Compression};
use crate::config::LineLengthMode;
use crate::epoch::first_difference;
use crate::error::{Error, Result};
use crate::filter::{convolve_full, dot, Band, FilterBank, FilterKernelPair};
use ndarray::Array2;

/// How a band detector reduces a filtered channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BandReduction {
    /// `ln √(I² + Q²)` of the kernel-window dot products.
    Energy,
    /// `log10 √(LL_I² + LL_Q²)` of the convolved branches.
    LineLength,
}

/// A band-limited feature: which kernel, how to reduce, how to compress.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BandDetector {
    pub band: Band,
    pub reduction: BandReduction,
    pub compression: Compression,
    /// Run on the first-differenced channels instead of the raw ones.
    pub differenced: bool,
}

impl BandDetector {
    pub const TEN_TWENTY: Self = Self::energy(Band::TenTwenty, bender::TEN_TWENTY);
    pub const TEN_TWENTY_UPSLOPE: Self = Self::energy(Band::TenTwentyUpslope, bender::TEN_TWENTY_UPSLOPE);
    pub const TEN_TWENTY_DOWNSLOPE: Self = Self::energy(Band::TenTwentyDownslope, bender::TEN_TWENTY_DOWNSLOPE);
    pub const TEN_THIRTY_LINE_LENGTH: Self = Self::line_length(Band::TenThirty, bender::TEN_THIRTY_LINE_LENGTH);
    pub const TWENTY_THIRTY_LINE_LENGTH: Self =
        Self::line_length(Band::TwentyThirty, bender::TWENTY_THIRTY_LINE_LENGTH);
    pub const DIFF_TEN_TWENTY_LINE_LENGTH: Self = Self {
        differenced: true,
        ..Self::line_length(Band::TenTwenty, bender::DIFF_TEN_TWENTY_LINE_LENGTH)
    };

    const fn energy(band: Band, compression: Compression) -> Self {
        Self { band, reduction: BandReduction::Energy, compression, differenced: false }
    }

    const fn line_length(band: Band, compression: Compression) -> Self {
        Self { band, reduction: BandReduction::LineLength, compression, differenced: false }
    }

    /// Compressed energy of every channel of `data` (`[C, T]`).
    pub fn detect(&self, data: &Array2<f64>, bank: &FilterBank, mode: LineLengthMode) -> Result<Vec<f64>> {
        let pair = bank.get(self.band)?;
        let diffed;
        let data = if self.differenced {
            diffed = first_difference(data);
            &diffed
        } else {
            data
        };

        data.rows()
            .into_iter()
            .map(|row| {
                let x = row.to_vec();
                let raw = match self.reduction {
                    BandReduction::Energy => quadrature_energy(pair, &x)?,
                    BandReduction::LineLength => quadrature_line_length(pair, &x, mode)?,
                };
                Ok(self.compression.apply(raw))
            })
            .collect()
    }
}

/// `ln √(I² + Q²)` over the kernel window of `x`.
pub fn quadrature_energy(pair: &FilterKernelPair, x: &[f64]) -> Result<f64> {
    let i = dot(pair.in_phase(), x)?;
    let q = dot(pair.quadrature(), x)?;
    Ok((i * i + q * q).sqrt().ln())
}

/// `log10 √(LL(h_I * x)² + LL(h_Q * x)²)`.
pub fn quadrature_line_length(pair: &FilterKernelPair, x: &[f64], mode: LineLengthMode) -> Result<f64> {
    if x.is_empty() {
        return Err(Error::FilterMismatch { channel_len: 0, kernel_len: pair.len() });
    }
    let il = line_length(&convolve_full(pair.in_phase(), x), mode);
    let ql = line_length(&convolve_full(pair.quadrature(), x), mode);
    Ok((il * il + ql * ql).sqrt().log10())
}

/// Line length of `y` under `mode`. Fewer than two samples give `0.0`.
pub fn line_length(y: &[f64], mode: LineLengthMode) -> f64 {
    match mode {
        LineLengthMode::LastDelta => last_delta(y),
        LineLengthMode::Full => y.windows(2).map(|w| (w[1] - w[0]).abs()).sum(),
    }
}

fn last_delta(y: &[f64]) -> f64 {
    match y {
        [.., a, b] => (b - a).abs(),
        _ => 0.0,
    }
}
