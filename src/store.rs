//! Labeled point store and per-patient reference populations.
//!
//! Training writes one small safetensors file per epoch:
//!
//! ```text
//! Dog_1/Dog_1_ictal_point_12.safetensors
//!     data          [1, 3]  F64   feature vector
//!     __metadata__  {"type": "e"}  class tag: i / e / l
//! ```
//!
//! A [`ReferencePopulation`] is the three per-class lists read back from one
//! patient directory; a [`PopulationIndex`] keeps several patients apart in
//! one process.
use crate::epoch::{Epoch, SourceLabel};
use crate::error::{Error, Result};
use crate::features::peak::is_early;
use crate::features::FeatureVector;
use crate::io::{file_id, list_dir, StWriter, TensorFile};
use log::warn;
use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

/// The three classes scored by the classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PointClass {
    Interictal,
    EarlyIctal,
    LateIctal,
}

impl PointClass {
    pub const ALL: [PointClass; 3] = [PointClass::Interictal, PointClass::EarlyIctal, PointClass::LateIctal];

    /// One-letter tag used on disk.
    pub fn tag(self) -> &'static str {
        match self {
            PointClass::Interictal => "i",
            PointClass::EarlyIctal => "e",
            PointClass::LateIctal => "l",
        }
    }

    /// Parse a stored tag; anything but `i`, `e`, `l` is [`Error::UnknownClass`].
    pub fn from_tag(tag: &str) -> Result<Self> {
        match tag {
            "i" => Ok(PointClass::Interictal),
            "e" => Ok(PointClass::EarlyIctal),
            "l" => Ok(PointClass::LateIctal),
            other => Err(Error::UnknownClass { tag: other.to_string() }),
        }
    }

    /// Class of a labeled epoch.
    ///
    /// Interictal stays interictal; ictal splits on the strict early-latency
    /// rule, and an ictal epoch without a latency counts as late.
    pub fn of_epoch(epoch: &Epoch, early_latency_s: f64) -> Result<Self> {
        match epoch.label {
            Some(SourceLabel::Interictal) => Ok(PointClass::Interictal),
            Some(SourceLabel::Ictal) if is_early(epoch.latency, early_latency_s) => Ok(PointClass::EarlyIctal),
            Some(SourceLabel::Ictal) => Ok(PointClass::LateIctal),
            None => Err(Error::malformed(&epoch.id, "epoch has no class label")),
        }
    }
}

impl fmt::Display for PointClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            PointClass::Interictal => "interictal",
            PointClass::EarlyIctal => "early",
            PointClass::LateIctal => "late",
        })
    }
}

/// A feature vector tagged with its class.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LabeledPoint {
    pub vector: FeatureVector,
    pub class: PointClass,
}

impl LabeledPoint {
    pub fn new(vector: FeatureVector, class: PointClass) -> Self {
        Self { vector, class }
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let mut w = StWriter::new();
        w.add_f64("data", self.vector.as_array(), &[1, FeatureVector::DIM]);
        w.add_metadata("type", self.class.tag());
        w.write(path)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let file = TensorFile::open(path)?;
        let id = file_id(path);
        let tag = file
            .metadata("type")
            .ok_or_else(|| Error::malformed(&id, "missing 'type' metadata"))?;
        let class = PointClass::from_tag(tag)?;
        let values = file.flat("data")?.ok_or_else(|| Error::malformed(&id, "missing 'data' tensor"))?;
        let vector = FeatureVector::try_from(values.as_slice())
            .map_err(|_| Error::malformed(&id, format!("{} feature values, expected 3", values.len())))?;
        Ok(Self { vector, class })
    }
}

/// Point file name for an epoch file name: `segment` becomes `point`.
pub fn point_file_name(epoch_id: &str) -> String {
    epoch_id.replace("segment", "point")
}

/// Files that belong to the query set rather than the training set.
pub fn is_test_name(name: &str) -> bool {
    name.contains("test")
}

/// One patient's labeled points, split by class.
///
/// List order carries no meaning: the classifier sorts distances first.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReferencePopulation {
    interictal: Vec<FeatureVector>,
    early: Vec<FeatureVector>,
    late: Vec<FeatureVector>,
}

impl ReferencePopulation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_points<I: IntoIterator<Item = LabeledPoint>>(points: I) -> Self {
        let mut pop = Self::new();
        for p in points {
            pop.push(p);
        }
        pop
    }

    pub fn push(&mut self, point: LabeledPoint) {
        self.class_mut(point.class).push(point.vector);
    }

    pub fn class(&self, class: PointClass) -> &[FeatureVector] {
        match class {
            PointClass::Interictal => &self.interictal,
            PointClass::EarlyIctal => &self.early,
            PointClass::LateIctal => &self.late,
        }
    }

    fn class_mut(&mut self, class: PointClass) -> &mut Vec<FeatureVector> {
        match class {
            PointClass::Interictal => &mut self.interictal,
            PointClass::EarlyIctal => &mut self.early,
            PointClass::LateIctal => &mut self.late,
        }
    }

    /// Total number of points across classes.
    pub fn len(&self) -> usize {
        self.interictal.len() + self.early.len() + self.late.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Read every point file in `dir`.
    ///
    /// Files with `test` in their name and hidden files are ignored. A point
    /// with an unknown class tag, or one that cannot be parsed, is logged and
    /// skipped; only an unreadable directory fails the whole load.
    pub fn load_dir(dir: &Path) -> Result<Self> {
        let mut pop = Self::new();
        for path in list_dir(dir)? {
            let name = file_id(&path);
            if !path.is_file() || name.starts_with('.') || is_test_name(&name) {
                continue;
            }
            match LabeledPoint::load(&path) {
                Ok(point) => pop.push(point),
                Err(e @ Error::UnknownClass { .. }) => warn!("skipping point {name}: {e}"),
                Err(e) => warn!("skipping unreadable point {name}: {e}"),
            }
        }
        Ok(pop)
    }
}

/// Reference populations keyed by patient.
///
/// Rebuilding one patient replaces that entry wholesale and leaves every
/// other patient untouched.
#[derive(Debug, Clone, Default)]
pub struct PopulationIndex {
    populations: BTreeMap<String, ReferencePopulation>,
}

impl PopulationIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace `patient`'s population.
    pub fn rebuild(&mut self, patient: &str, population: ReferencePopulation) {
        self.populations.insert(patient.to_string(), population);
    }

    /// Replace `patient`'s population with the points stored in `dir`.
    pub fn load_patient(&mut self, patient: &str, dir: &Path) -> Result<&ReferencePopulation> {
        let pop = ReferencePopulation::load_dir(dir)?;
        self.rebuild(patient, pop);
        Ok(&self.populations[patient])
    }

    pub fn get(&self, patient: &str) -> Option<&ReferencePopulation> {
        self.populations.get(patient)
    }

    /// Patient ids in sorted order.
    pub fn patients(&self) -> impl Iterator<Item = &str> {
        self.populations.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.populations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.populations.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tags_parse_strictly() {
        for c in PointClass::ALL {
            assert_eq!(PointClass::from_tag(c.tag()).unwrap(), c);
        }
        assert!(matches!(PointClass::from_tag("x"), Err(Error::UnknownClass { .. })));
        assert!(matches!(PointClass::from_tag("I"), Err(Error::UnknownClass { .. })));
    }

    #[test]
    fn class_of_epoch() {
        let base = Epoch::from_channels("e", vec![vec![1.0, 2.0]], 2.0).unwrap();
        let inter = base.clone().with_label(SourceLabel::Interictal);
        let early = base.clone().with_label(SourceLabel::Ictal).with_latency(3.0);
        let late = base.clone().with_label(SourceLabel::Ictal).with_latency(16.0);
        let no_latency = base.clone().with_label(SourceLabel::Ictal);

        assert_eq!(PointClass::of_epoch(&inter, 16.0).unwrap(), PointClass::Interictal);
        assert_eq!(PointClass::of_epoch(&early, 16.0).unwrap(), PointClass::EarlyIctal);
        assert_eq!(PointClass::of_epoch(&late, 16.0).unwrap(), PointClass::LateIctal);
        assert_eq!(PointClass::of_epoch(&no_latency, 16.0).unwrap(), PointClass::LateIctal);
        assert!(PointClass::of_epoch(&base, 16.0).is_err());
    }

    #[test]
    fn point_file_naming() {
        assert_eq!(point_file_name("Dog_1_ictal_segment_7.safetensors"), "Dog_1_ictal_point_7.safetensors");
    }

    #[test]
    fn index_keeps_patients_apart() {
        let mut index = PopulationIndex::new();
        let p = LabeledPoint::new(FeatureVector::new(0.1, 0.2, 0.3), PointClass::EarlyIctal);
        index.rebuild("Dog_1", ReferencePopulation::from_points([p]));
        index.rebuild("Dog_2", ReferencePopulation::new());
        index.rebuild("Dog_1", ReferencePopulation::from_points([p, p]));

        assert_eq!(index.get("Dog_1").unwrap().class(PointClass::EarlyIctal).len(), 2);
        assert!(index.get("Dog_2").unwrap().is_empty());
        assert_eq!(index.patients().collect::<Vec<_>>(), vec!["Dog_1", "Dog_2"]);
    }
}
