//! Fourier resampling of an epoch to a fixed number of samples.
//!
//! Matches `scipy.signal.resample(x, num)` for real input:
//!   1. rfft(x)  →  half-spectrum of `n//2 + 1` bins.
//!   2. Keep the lowest `min(n, num)//2 + 1` bins, zero the rest.
//!   3. If `m = min(n, num)` is even, the bin at `m/2` is a Nyquist bin of
//!      the shorter signal: doubled when downsampling, halved when
//!      upsampling.
//!   4. irfft(spectrum, n=num) and scale by `num / n`.
//!
//! Epoch clips are one second long, so resampling to `num` samples also sets
//! the sample rate to `num` Hz; [`resample_epoch`] derives the new rate from
//! the clip duration so shorter or longer clips stay consistent.
use crate::batch::patient_dirs;
use crate::epoch::Epoch;
use crate::error::{Error, Result};
use crate::io::{file_id, list_dir};
use log::{info, warn};
use ndarray::Array2;
use std::path::Path;
use std::time::Instant;
use rustfft::{num_complex::Complex, FftPlanner};

/// Resample every channel of `data` (`[C, T]`) to `num` samples.
pub fn resample(data: &Array2<f64>, num: usize) -> Array2<f64> {
    let (n_ch, n_t) = data.dim();
    if n_t == num {
        return data.clone();
    }
    let mut out = Array2::<f64>::zeros((n_ch, num));
    for ch in 0..n_ch {
        let row: Vec<f64> = data.row(ch).to_vec();
        let resampled = resample_1d(&row, num);
        out.row_mut(ch).assign(&ndarray::ArrayView1::from(&resampled));
    }
    out
}

/// Resample a single 1-D signal to `num` samples.
pub fn resample_1d(x: &[f64], num: usize) -> Vec<f64> {
    let n_in = x.len();
    if n_in == 0 || num == 0 {
        return vec![0.0; num];
    }
    if n_in == num {
        return x.to_vec();
    }

    // --- 1. rfft (full FFT, first half kept) -----------------------------
    let mut planner: FftPlanner<f64> = FftPlanner::new();
    let mut buf: Vec<Complex<f64>> = x.iter().map(|&v| Complex { re: v, im: 0.0 }).collect();
    planner.plan_fft_forward(n_in).process(&mut buf);

    // --- 2. Truncate or zero-pad the half-spectrum ------------------------
    let m = n_in.min(num);
    let keep = m / 2 + 1;
    let out_half = num / 2 + 1;
    let mut half = vec![Complex::<f64>::default(); out_half];
    half[..keep].copy_from_slice(&buf[..keep]);

    // --- 3. Split / join the Nyquist bin ----------------------------------
    if m % 2 == 0 {
        let nyq = m / 2;
        if num < n_in {
            half[nyq] *= 2.0;
        } else {
            half[nyq] *= 0.5;
        }
    }

    // --- 4. irfft(half, n=num) -------------------------------------------
    // irfft ignores the imaginary part of DC and (for even `num`) Nyquist.
    let mut full = vec![Complex::<f64>::default(); num];
    full[0] = Complex { re: half[0].re, im: 0.0 };
    for k in 1..out_half {
        if num % 2 == 0 && k == num / 2 {
            full[k] = Complex { re: half[k].re, im: 0.0 };
        } else {
            full[k] = half[k];
            full[num - k] = half[k].conj();
        }
    }
    planner.plan_fft_inverse(num).process(&mut full);

    // irfft's 1/num and the num/n_in amplitude correction.
    let scale = 1.0 / n_in as f64;
    full.iter().map(|c| c.re * scale).collect()
}

/// Resample an epoch to `num` samples per channel, keeping its metadata and
/// scaling the sample rate by the same factor.
pub fn resample_epoch(epoch: &Epoch, num: usize) -> Result<Epoch> {
    if num == 0 {
        return Err(Error::malformed(&epoch.id, "cannot resample to zero samples"));
    }
    let sfreq = num as f64 / epoch.duration_secs();
    let mut out = Epoch::new(epoch.id.clone(), resample(&epoch.data, num), sfreq)?;
    out.latency = epoch.latency;
    out.label = epoch.label;
    Ok(out)
}

/// Resample every epoch file in `input` into `output` under the same name.
///
/// Unreadable epochs are logged and skipped. Returns the number written.
pub fn resample_dir(input: &Path, output: &Path, num: usize) -> Result<usize> {
    let start = Instant::now();
    std::fs::create_dir_all(output)?;
    let mut written = 0;
    for path in list_dir(input)? {
        let name = file_id(&path);
        if !path.is_file() || name.starts_with('.') {
            continue;
        }
        let done = Epoch::load(&path)
            .and_then(|epoch| resample_epoch(&epoch, num))
            .and_then(|epoch| epoch.save(&output.join(&name)));
        match done {
            Ok(()) => written += 1,
            Err(e) => warn!("skipping epoch {name}: {e}"),
        }
    }
    info!(
        "Resampled {written} epochs from {} in {:.3} seconds",
        file_id(input),
        start.elapsed().as_secs_f64()
    );
    Ok(written)
}

/// Resample a data root: loose epoch files in `input` go to `output`, and
/// every patient directory `input/<patient>` is mirrored to
/// `output/<patient>`. Returns the total number of epochs written.
pub fn resample_all(input: &Path, output: &Path, num: usize) -> Result<usize> {
    let mut written = resample_dir(input, output, num)?;
    for dir in patient_dirs(input)?.into_iter().filter(|d| d != output) {
        written += resample_dir(&dir, &output.join(file_id(&dir)), num)?;
    }
    Ok(written)
}
