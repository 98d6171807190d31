//! One-second multi-channel EEG epochs.
//!
//! An [`Epoch`] is the unit every detector works on: a `[C, T]` sample
//! matrix, its sample rate, and the metadata needed to place it in a class
//! (source label and, for ictal clips, the latency since seizure onset).
use crate::error::{Error, Result};
use crate::io::{file_id, StWriter, TensorFile};
use ndarray::{s, Array2};
use std::path::Path;

/// Ground-truth label as supplied by the epoch source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceLabel {
    Interictal,
    Ictal,
}

impl SourceLabel {
    /// Parse the `type` metadata string of an epoch file.
    pub fn parse(tag: &str) -> Option<Self> {
        match tag {
            "interictal" => Some(SourceLabel::Interictal),
            "ictal" => Some(SourceLabel::Ictal),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SourceLabel::Interictal => "interictal",
            SourceLabel::Ictal => "ictal",
        }
    }

    /// Infer a label from an epoch file name
    /// (`Dog_1_interictal_segment_12.safetensors`, `Dog_1_ictal_segment_3…`).
    ///
    /// Query clips (`…_test_segment_…`) carry no label.
    pub fn from_file_name(name: &str) -> Option<Self> {
        if name.contains("interictal") {
            Some(SourceLabel::Interictal)
        } else if name.contains("ictal") {
            Some(SourceLabel::Ictal)
        } else {
            None
        }
    }
}

/// A single epoch, read once and never mutated.
#[derive(Debug, Clone)]
pub struct Epoch {
    /// Identifier (file name for loaded epochs).
    pub id: String,
    /// `[C, T]` samples.
    pub data: Array2<f64>,
    /// Sample rate in Hz.
    pub sfreq: f64,
    /// Seconds since seizure onset; ictal epochs only.
    pub latency: Option<f64>,
    /// Ground-truth label, absent for query epochs.
    pub label: Option<SourceLabel>,
}

impl Epoch {
    /// Wrap a `[C, T]` matrix.
    ///
    /// Rejects an empty matrix and a non-positive or non-finite sample rate.
    pub fn new(id: impl Into<String>, data: Array2<f64>, sfreq: f64) -> Result<Self> {
        let id = id.into();
        let (n_ch, n_t) = data.dim();
        if n_ch == 0 || n_t == 0 {
            return Err(Error::malformed(id, format!("empty sample matrix [{n_ch}, {n_t}]")));
        }
        if !(sfreq.is_finite() && sfreq > 0.0) {
            return Err(Error::malformed(id, format!("invalid sample rate {sfreq}")));
        }
        Ok(Self { id, data, sfreq, latency: None, label: None })
    }

    /// Build an epoch from per-channel sample vectors.
    ///
    /// All channels must have the same length; a ragged set is a
    /// [`Error::MalformedRecord`].
    pub fn from_channels(id: impl Into<String>, channels: Vec<Vec<f64>>, sfreq: f64) -> Result<Self> {
        let id = id.into();
        let n_ch = channels.len();
        let n_t = channels.first().map_or(0, Vec::len);
        if let Some((c, ch)) = channels.iter().enumerate().find(|(_, ch)| ch.len() != n_t) {
            return Err(Error::malformed(
                id,
                format!("ragged channels: channel {c} has {} samples, channel 0 has {n_t}", ch.len()),
            ));
        }
        let flat: Vec<f64> = channels.into_iter().flatten().collect();
        let data = Array2::from_shape_vec((n_ch, n_t), flat).map_err(|e| Error::malformed(&id, e.to_string()))?;
        Self::new(id, data, sfreq)
    }

    pub fn with_latency(mut self, latency: f64) -> Self {
        self.latency = Some(latency);
        self
    }

    pub fn with_label(mut self, label: SourceLabel) -> Self {
        self.label = Some(label);
        self
    }

    /// Load an epoch from a safetensors record.
    ///
    /// Expects `data` `[C, T]` and `freq`; `latency` and the `type` metadata
    /// entry are optional. Without `type` the label is inferred from the
    /// file name.
    pub fn load(path: &Path) -> Result<Self> {
        let file = TensorFile::open(path)?;
        let id = file_id(path);

        let data = file
            .array2("data")?
            .ok_or_else(|| Error::malformed(&id, "missing 'data' tensor"))?;
        let sfreq = file
            .scalar("freq")?
            .ok_or_else(|| Error::malformed(&id, "missing 'freq' tensor"))?;
        let latency = file.scalar("latency")?;

        let label = match file.metadata("type") {
            Some(tag) => Some(
                SourceLabel::parse(tag)
                    .ok_or_else(|| Error::malformed(&id, format!("unknown epoch type {tag:?}")))?,
            ),
            None => SourceLabel::from_file_name(&id),
        };

        let mut epoch = Self::new(id, data, sfreq)?;
        epoch.latency = latency;
        epoch.label = label;
        Ok(epoch)
    }

    /// Write the epoch in the layout [`Epoch::load`] reads.
    pub fn save(&self, path: &Path) -> Result<()> {
        let mut st = StWriter::new();
        st.add_f64_arr2("data", &self.data);
        st.add_f64("freq", &[self.sfreq], &[1]);
        if let Some(latency) = self.latency {
            st.add_f64("latency", &[latency], &[1]);
        }
        if let Some(label) = self.label {
            st.add_metadata("type", label.as_str());
        }
        st.write(path)
    }

    #[inline]
    pub fn n_channels(&self) -> usize {
        self.data.nrows()
    }

    #[inline]
    pub fn n_samples(&self) -> usize {
        self.data.ncols()
    }

    /// Duration in seconds.
    #[inline]
    pub fn duration_secs(&self) -> f64 {
        self.n_samples() as f64 / self.sfreq
    }

    /// `x[c, t+1] - x[c, t]` for every channel, shape `[C, T-1]`.
    pub fn first_difference(&self) -> Array2<f64> {
        first_difference(&self.data)
    }
}

/// Per-row first difference of a `[C, T]` matrix.
pub fn first_difference(data: &Array2<f64>) -> Array2<f64> {
    if data.ncols() < 2 {
        return Array2::zeros((data.nrows(), 0));
    }
    &data.slice(s![.., 1..]) - &data.slice(s![.., ..-1])
}
