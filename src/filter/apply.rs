//! Applying quadrature kernels to a channel.
//!
//! Two operations are needed by the band detectors:
//!
//! - [`dot`]: a single inner product of the kernel with the start of the
//!   channel (one output sample of a correlator);
//! - [`convolve_full`]: the full linear convolution, length
//!   `len(h) + len(x) - 1`, matching `numpy.convolve(h, x)` (mode `full`).
//!
//! Short kernels are convolved directly in the time domain; longer ones go
//! through an FFT of the next power of two above the output length.
use crate::error::{Error, Result};
use rustfft::{num_complex::Complex, FftPlanner};

/// Kernels at or below this many taps are convolved in the time domain.
pub const DIRECT_MAX_TAPS: usize = 128;

/// `Σ_k h[k] · x[k]` over the kernel window.
///
/// Only the first `h.len()` samples of `x` take part. Fails with
/// [`Error::FilterMismatch`] if `x` is shorter than `h` (an empty channel
/// included).
pub fn dot(h: &[f64], x: &[f64]) -> Result<f64> {
    if x.len() < h.len() || x.is_empty() {
        return Err(Error::FilterMismatch { channel_len: x.len(), kernel_len: h.len() });
    }
    Ok(h.iter().zip(x).map(|(a, b)| a * b).sum())
}

/// Full linear convolution of `h` and `x`.
///
/// Returns an empty vector if either input is empty.
pub fn convolve_full(h: &[f64], x: &[f64]) -> Vec<f64> {
    if h.is_empty() || x.is_empty() {
        return vec![];
    }
    if h.len().min(x.len()) <= DIRECT_MAX_TAPS {
        convolve_direct(h, x)
    } else {
        convolve_fft(h, x)
    }
}

fn convolve_direct(h: &[f64], x: &[f64]) -> Vec<f64> {
    let mut out = vec![0.0_f64; h.len() + x.len() - 1];
    for (i, &hi) in h.iter().enumerate() {
        for (j, &xj) in x.iter().enumerate() {
            out[i + j] += hi * xj;
        }
    }
    out
}

fn convolve_fft(h: &[f64], x: &[f64]) -> Vec<f64> {
    let n_out = h.len() + x.len() - 1;
    let n_fft = n_out.next_power_of_two();

    let mut planner: FftPlanner<f64> = FftPlanner::new();
    let fft_fwd = planner.plan_fft_forward(n_fft);
    let fft_inv = planner.plan_fft_inverse(n_fft);

    let mut h_buf = zero_padded(h, n_fft);
    let mut x_buf = zero_padded(x, n_fft);
    fft_fwd.process(&mut h_buf);
    fft_fwd.process(&mut x_buf);

    for (b, &hf) in x_buf.iter_mut().zip(h_buf.iter()) {
        *b = *b * hf;
    }
    fft_inv.process(&mut x_buf);

    let inv_scale = 1.0 / n_fft as f64;
    x_buf[..n_out].iter().map(|c| c.re * inv_scale).collect()
}

fn zero_padded(x: &[f64], n: usize) -> Vec<Complex<f64>> {
    x.iter()
        .map(|&v| Complex { re: v, im: 0.0 })
        .chain(std::iter::repeat(Complex::default()))
        .take(n)
        .collect()
}
