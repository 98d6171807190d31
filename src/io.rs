//! Safetensors I/O for epochs, filter kernels and labeled points.
//!
//! Every persisted record in this crate is a small safetensors file:
//!
//! | record        | tensors                                   | metadata        |
//! |---------------|-------------------------------------------|-----------------|
//! | epoch         | `data` [C, T], `freq` [1], `latency` [1]? | `type`?         |
//! | filter kernel | `FilterCoefI` [N], `FilterCoefQ` [N]      | —               |
//! | labeled point | `data` [1, 3] F64                         | `type` = i/e/l  |
//!
//! The reader is a minimal header parser (8-byte little-endian header length,
//! JSON header, raw little-endian payload) that converts any numeric tensor
//! to `f64`; no dependency on the `safetensors` crate's tensor types.
use crate::error::{Error, Result};
use ndarray::Array2;
use std::collections::HashMap;
use std::path::Path;

/// Name of the free-form string map inside a safetensors header.
const METADATA_KEY: &str = "__metadata__";

// ── Low-level parser ──────────────────────────────────────────────────────────

fn parse_header(bytes: &[u8], id: &str) -> Result<(HashMap<String, serde_json::Value>, usize)> {
    if bytes.len() < 8 {
        return Err(Error::malformed(id, "safetensors file too small"));
    }
    let mut len_bytes = [0u8; 8];
    len_bytes.copy_from_slice(&bytes[..8]);
    let n = u64::from_le_bytes(len_bytes) as usize;
    let end = 8usize
        .checked_add(n)
        .filter(|&end| end <= bytes.len())
        .ok_or_else(|| Error::malformed(id, format!("header length {n} exceeds file size")))?;
    let header: HashMap<String, serde_json::Value> = serde_json::from_slice(&bytes[8..end])
        .map_err(|e| Error::malformed(id, format!("failed to parse safetensors header: {e}")))?;
    Ok((header, end))
}

fn dtype_width(dtype: &str) -> Option<usize> {
    match dtype {
        "F32" | "I32" => Some(4),
        "F64" | "I64" => Some(8),
        "U8" => Some(1),
        _ => None,
    }
}

fn decode(dtype: &str, raw: &[u8]) -> Vec<f64> {
    match dtype {
        "F32" => raw
            .chunks_exact(4)
            .map(|b| f32::from_le_bytes([b[0], b[1], b[2], b[3]]) as f64)
            .collect(),
        "F64" => raw
            .chunks_exact(8)
            .map(|b| f64::from_le_bytes([b[0], b[1], b[2], b[3], b[4], b[5], b[6], b[7]]))
            .collect(),
        "I32" => raw
            .chunks_exact(4)
            .map(|b| i32::from_le_bytes([b[0], b[1], b[2], b[3]]) as f64)
            .collect(),
        "I64" => raw
            .chunks_exact(8)
            .map(|b| i64::from_le_bytes([b[0], b[1], b[2], b[3], b[4], b[5], b[6], b[7]]) as f64)
            .collect(),
        _ => raw.iter().map(|&b| b as f64).collect(),
    }
}

/// Identifier used in error messages and classification output: the file name.
pub fn file_id(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Entries of `dir`, sorted by path so batch runs visit files in a stable order.
pub fn list_dir(dir: &Path) -> Result<Vec<std::path::PathBuf>> {
    let entries = std::fs::read_dir(dir).map_err(|e| Error::missing(dir, e))?;
    let mut paths = entries
        .map(|e| e.map(|e| e.path()))
        .collect::<std::io::Result<Vec<_>>>()?;
    paths.sort();
    Ok(paths)
}

// ── Reader ────────────────────────────────────────────────────────────────────

/// One tensor decoded to `f64`, with its shape.
#[derive(Debug, Clone, PartialEq)]
pub struct Tensor {
    pub shape: Vec<usize>,
    pub values: Vec<f64>,
}

/// An opened safetensors file with its header parsed and payload in memory.
pub struct TensorFile {
    id: String,
    header: HashMap<String, serde_json::Value>,
    bytes: Vec<u8>,
    data_start: usize,
}

impl TensorFile {
    /// Read and parse `path`.
    ///
    /// A file that cannot be read is [`Error::MissingData`]; a file that can
    /// be read but has no valid header is [`Error::MalformedRecord`].
    pub fn open(path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path).map_err(|e| Error::missing(path, e))?;
        let id = file_id(path);
        let (header, data_start) = parse_header(&bytes, &id)?;
        Ok(Self { id, header, bytes, data_start })
    }

    /// `true` if a tensor called `name` exists.
    pub fn contains(&self, name: &str) -> bool {
        name != METADATA_KEY && self.header.contains_key(name)
    }

    /// A string entry from the `__metadata__` map.
    pub fn metadata(&self, key: &str) -> Option<&str> {
        self.header.get(METADATA_KEY)?.get(key)?.as_str()
    }

    /// Decode tensor `name`, or `Ok(None)` if absent.
    pub fn tensor(&self, name: &str) -> Result<Option<Tensor>> {
        if !self.contains(name) {
            return Ok(None);
        }
        let entry = &self.header[name];
        let bad = |reason: String| Error::malformed(&self.id, format!("tensor '{name}': {reason}"));

        let dtype = entry["dtype"].as_str().ok_or_else(|| bad("missing dtype".into()))?;
        let width = dtype_width(dtype).ok_or_else(|| bad(format!("unsupported dtype {dtype}")))?;

        let shape: Vec<usize> = entry["shape"]
            .as_array()
            .ok_or_else(|| bad("missing shape".into()))?
            .iter()
            .map(|v| v.as_u64().map(|d| d as usize))
            .collect::<Option<_>>()
            .ok_or_else(|| bad("non-integer shape".into()))?;

        let offsets = entry["data_offsets"]
            .as_array()
            .filter(|o| o.len() == 2)
            .ok_or_else(|| bad("missing data_offsets".into()))?;
        let (s, e) = match (offsets[0].as_u64(), offsets[1].as_u64()) {
            (Some(s), Some(e)) if s <= e => (s as usize, e as usize),
            _ => return Err(bad("invalid data_offsets".into())),
        };
        let end = self
            .data_start
            .checked_add(e)
            .filter(|&end| end <= self.bytes.len())
            .ok_or_else(|| bad(format!("payload ends at {e}, past end of file")))?;

        let expected = shape
            .iter()
            .try_fold(width, |acc, &d| acc.checked_mul(d))
            .ok_or_else(|| bad(format!("shape {shape:?} overflows")))?;
        if e - s != expected {
            return Err(bad(format!("{} payload bytes for shape {shape:?}, expected {expected}", e - s)));
        }

        let raw = &self.bytes[self.data_start + s..end];
        Ok(Some(Tensor { shape, values: decode(dtype, raw) }))
    }

    /// Decode a rank-2 tensor into an `[rows, cols]` array.
    pub fn array2(&self, name: &str) -> Result<Option<Array2<f64>>> {
        let Some(t) = self.tensor(name)? else {
            return Ok(None);
        };
        if t.shape.len() != 2 {
            return Err(Error::malformed(
                &self.id,
                format!("tensor '{name}' has rank {}, expected 2", t.shape.len()),
            ));
        }
        let arr = Array2::from_shape_vec((t.shape[0], t.shape[1]), t.values)
            .map_err(|e| Error::malformed(&self.id, e.to_string()))?;
        Ok(Some(arr))
    }

    /// Decode a tensor holding exactly one element (any shape of size 1).
    pub fn scalar(&self, name: &str) -> Result<Option<f64>> {
        let Some(t) = self.tensor(name)? else {
            return Ok(None);
        };
        match t.values.as_slice() {
            [v] => Ok(Some(*v)),
            _ => Err(Error::malformed(
                &self.id,
                format!("tensor '{name}' has {} elements, expected 1", t.values.len()),
            )),
        }
    }

    /// Decode a tensor as a flat vector regardless of its shape.
    pub fn flat(&self, name: &str) -> Result<Option<Vec<f64>>> {
        Ok(self.tensor(name)?.map(|t| t.values))
    }
}

// ── Writer ────────────────────────────────────────────────────────────────────

/// Simple safetensors file writer for F64 tensors plus the string
/// `__metadata__` map.
///
/// Usage:
/// ```rust,no_run
/// use ictal::io::StWriter;
/// use std::path::Path;
/// let mut w = StWriter::new();
/// w.add_f64("data", &[0.4, 0.1, 0.7], &[1, 3]);
/// w.add_metadata("type", "i");
/// w.write(Path::new("/tmp/Dog_1_interictal_point_1.safetensors")).unwrap();
/// ```
#[derive(Default)]
pub struct StWriter {
    entries: Vec<(String, Vec<u8>, &'static str, Vec<usize>)>,
    metadata: serde_json::Map<String, serde_json::Value>,
}

impl StWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_f64(&mut self, name: &str, data: &[f64], shape: &[usize]) {
        let bytes: Vec<u8> = data.iter().flat_map(|v| v.to_le_bytes()).collect();
        self.entries.push((name.to_string(), bytes, "F64", shape.to_vec()));
    }

    pub fn add_f64_arr2(&mut self, name: &str, arr: &Array2<f64>) {
        let data: Vec<f64> = arr.iter().copied().collect();
        self.add_f64(name, &data, &[arr.nrows(), arr.ncols()]);
    }

    pub fn add_metadata(&mut self, key: &str, value: &str) {
        self.metadata.insert(key.to_string(), serde_json::Value::String(value.to_string()));
    }

    pub fn write(&self, path: &Path) -> Result<()> {
        use std::io::Write;
        let mut header_map = serde_json::Map::new();
        if !self.metadata.is_empty() {
            header_map.insert(METADATA_KEY.to_string(), serde_json::Value::Object(self.metadata.clone()));
        }
        let mut offset: usize = 0;
        for (name, data, dtype, shape) in &self.entries {
            header_map.insert(name.clone(), serde_json::json!({
                "dtype": dtype,
                "shape": shape,
                "data_offsets": [offset, offset + data.len()],
            }));
            offset += data.len();
        }
        let hdr_bytes = serde_json::to_vec(&header_map)?;
        let pad = (8 - hdr_bytes.len() % 8) % 8;
        let padded: Vec<u8> = hdr_bytes.into_iter()
            .chain(std::iter::repeat(b' ').take(pad))
            .collect();
        let mut f = std::fs::File::create(path)?;
        f.write_all(&(padded.len() as u64).to_le_bytes())?;
        f.write_all(&padded)?;
        for (_, data, _, _) in &self.entries {
            f.write_all(data)?;
        }
        Ok(())
    }
}
