//! Precomputed quadrature kernel pairs.
//!
//! Kernels are never designed here: each band's in-phase/quadrature
//! coefficients arrive as a constant `FilterSet<…>.safetensors` file holding
//! `FilterCoefI` and `FilterCoefQ`.
use crate::error::{Error, Result};
use crate::io::{file_id, TensorFile};
use std::collections::HashMap;
use std::fmt;
use std::path::Path;

/// Frequency bands with a precomputed kernel pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Band {
    /// 10–20 Hz.
    TenTwenty,
    /// 10–20 Hz, response rising with frequency.
    TenTwentyUpslope,
    /// 10–20 Hz, response falling with frequency.
    TenTwentyDownslope,
    /// 10–30 Hz, 100 taps.
    TenThirty,
    /// 20–30 Hz, 100 taps.
    TwentyThirty,
}

impl Band {
    pub const ALL: [Band; 5] = [
        Band::TenTwenty,
        Band::TenTwentyUpslope,
        Band::TenTwentyDownslope,
        Band::TenThirty,
        Band::TwentyThirty,
    ];

    /// Kernel file name inside a filter directory.
    pub fn file_name(self) -> &'static str {
        match self {
            Band::TenTwenty => "FilterSetTenTwentyBPF.safetensors",
            Band::TenTwentyUpslope => "FilterSetTenTwentyUpslopeBPF.safetensors",
            Band::TenTwentyDownslope => "FilterSetTenTwentyDownslopeBPF.safetensors",
            Band::TenThirty => "FilterSetTenThirtyBPF.safetensors",
            Band::TwentyThirty => "FilterSetTwentyThirtyBPF.safetensors",
        }
    }
}

impl fmt::Display for Band {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Band::TenTwenty => "10-20Hz",
            Band::TenTwentyUpslope => "10-20Hz upslope",
            Band::TenTwentyDownslope => "10-20Hz downslope",
            Band::TenThirty => "10-30Hz",
            Band::TwentyThirty => "20-30Hz",
        };
        f.write_str(s)
    }
}

/// In-phase and quadrature coefficients of one band, equal length.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterKernelPair {
    pub band: Band,
    in_phase: Vec<f64>,
    quadrature: Vec<f64>,
}

impl FilterKernelPair {
    pub fn new(band: Band, in_phase: Vec<f64>, quadrature: Vec<f64>) -> Result<Self> {
        if in_phase.len() != quadrature.len() || in_phase.is_empty() {
            return Err(Error::malformed(
                band.file_name(),
                format!("kernel lengths I={} Q={} must be equal and non-zero", in_phase.len(), quadrature.len()),
            ));
        }
        Ok(Self { band, in_phase, quadrature })
    }

    /// Read `FilterCoefI` / `FilterCoefQ` from `path`. Shapes are flattened.
    pub fn load(band: Band, path: &Path) -> Result<Self> {
        let file = TensorFile::open(path)?;
        let id = file_id(path);
        let i = file.flat("FilterCoefI")?.ok_or_else(|| Error::malformed(&id, "missing 'FilterCoefI'"))?;
        let q = file.flat("FilterCoefQ")?.ok_or_else(|| Error::malformed(&id, "missing 'FilterCoefQ'"))?;
        Self::new(band, i, q)
    }

    pub fn in_phase(&self) -> &[f64] {
        &self.in_phase
    }

    pub fn quadrature(&self) -> &[f64] {
        &self.quadrature
    }

    /// Number of taps.
    pub fn len(&self) -> usize {
        self.in_phase.len()
    }

    pub fn is_empty(&self) -> bool {
        self.in_phase.is_empty()
    }
}

/// Kernel pairs loaded for one run, looked up by band.
#[derive(Debug, Clone, Default)]
pub struct FilterBank {
    kernels: HashMap<Band, FilterKernelPair>,
}

impl FilterBank {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load the requested bands from `dir`.
    pub fn load(dir: &Path, bands: &[Band]) -> Result<Self> {
        let mut bank = Self::new();
        for &band in bands {
            bank.insert(FilterKernelPair::load(band, &dir.join(band.file_name()))?);
        }
        Ok(bank)
    }

    pub fn insert(&mut self, pair: FilterKernelPair) {
        self.kernels.insert(pair.band, pair);
    }

    /// Kernel pair for `band`; [`Error::MissingData`] if it was never loaded.
    pub fn get(&self, band: Band) -> Result<&FilterKernelPair> {
        self.kernels
            .get(&band)
            .ok_or_else(|| Error::missing(band.file_name(), "kernel pair not loaded"))
    }
}
