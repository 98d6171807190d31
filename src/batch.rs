//! Batch training and classification over patient directories.
//!
//! ```text
//! data/                         points/                    (written by train)
//!   Dog_1/                        Dog_1/
//!     Dog_1_ictal_segment_1         Dog_1_ictal_point_1
//!     Dog_1_interictal_segment_1    Dog_1_interictal_point_1
//!     Dog_1_test_segment_1          (test clips are not trained on)
//! ```
//!
//! Both drivers are best-effort: an epoch that cannot be loaded or whose
//! features cannot be computed is logged with its reason and skipped; only
//! unreadable directories abort the run.
use crate::config::{ClassifierConfig, FeatureConfig};
use crate::epoch::Epoch;
use crate::error::{Error, Result};
use crate::features::{feature_vector, labeled_point};
use crate::filter::FilterBank;
use crate::io::{file_id, list_dir};
use crate::knn::{classify, Scores};
use crate::store::{is_test_name, point_file_name, PopulationIndex, ReferencePopulation};
use log::{debug, info, warn};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Outcome of training one patient.
#[derive(Debug, Clone)]
pub struct TrainSummary {
    pub patient: String,
    /// Point files written.
    pub written: usize,
    /// Epochs skipped because of an error.
    pub skipped: usize,
    /// The population that was written, as it will be read back.
    pub population: ReferencePopulation,
}

/// One scored query epoch.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassificationRecord {
    pub epoch_id: String,
    pub scores: Scores,
}

impl ClassificationRecord {
    /// `epoch_id,ictal,early` with one decimal each.
    pub fn write_csv_line<W: Write>(&self, mut w: W) -> std::io::Result<()> {
        writeln!(w, "{},{:.1},{:.1}", self.epoch_id, self.scores.ictal, self.scores.early)
    }
}

/// Visible regular files of `dir`, sorted, split by whether they are test clips.
fn epoch_files(dir: &Path, want_test: bool) -> Result<Vec<PathBuf>> {
    Ok(list_dir(dir)?
        .into_iter()
        .filter(|p| {
            let name = file_id(p);
            p.is_file() && !name.starts_with('.') && is_test_name(&name) == want_test
        })
        .collect())
}

/// Visible subdirectories of `dir`, sorted.
pub fn patient_dirs(dir: &Path) -> Result<Vec<PathBuf>> {
    Ok(list_dir(dir)?
        .into_iter()
        .filter(|p| p.is_dir() && !file_id(p).starts_with('.'))
        .collect())
}

/// Train one patient: one point file per labeled, non-test epoch.
///
/// `point_dir` is created if needed and any `.safetensors` files already in
/// it are removed first, so the stored population is rebuilt wholesale.
pub fn train_patient(epoch_dir: &Path, point_dir: &Path, bank: &FilterBank, cfg: &FeatureConfig) -> Result<TrainSummary> {
    std::fs::create_dir_all(point_dir)?;
    if point_dir.canonicalize()? == epoch_dir.canonicalize().map_err(|e| Error::missing(epoch_dir, e))? {
        return Err(Error::malformed(file_id(epoch_dir), "point directory must differ from the epoch directory"));
    }
    for stale in list_dir(point_dir)? {
        if stale.is_file() && stale.extension().is_some_and(|e| e == "safetensors") {
            std::fs::remove_file(&stale)?;
        }
    }

    let mut summary = TrainSummary {
        patient: file_id(epoch_dir),
        written: 0,
        skipped: 0,
        population: ReferencePopulation::new(),
    };

    for path in epoch_files(epoch_dir, false)? {
        let name = file_id(&path);
        let point = Epoch::load(&path).and_then(|epoch| labeled_point(&epoch, bank, cfg));
        let saved = point.and_then(|p| {
            p.save(&point_dir.join(point_file_name(&name)))?;
            Ok(p)
        });
        match saved {
            Ok(p) => {
                debug!("{name}: {} {:?}", p.class, p.vector.as_array());
                summary.population.push(p);
                summary.written += 1;
            }
            Err(e) => {
                warn!("skipping epoch {name}: {e}");
                summary.skipped += 1;
            }
        }
    }
    Ok(summary)
}

/// Train every patient directory under `data_dir` into `out_dir/<patient>`.
pub fn train_all(data_dir: &Path, out_dir: &Path, bank: &FilterBank, cfg: &FeatureConfig) -> Result<Vec<TrainSummary>> {
    let start = Instant::now();
    let mut summaries = Vec::new();
    for dir in patient_dirs(data_dir)? {
        let t = Instant::now();
        let patient = file_id(&dir);
        let summary = train_patient(&dir, &out_dir.join(&patient), bank, cfg)?;
        info!(
            "Processed {patient} in {:.3} seconds ({} points, {} skipped)",
            t.elapsed().as_secs_f64(),
            summary.written,
            summary.skipped
        );
        summaries.push(summary);
    }
    info!("Processed all directories in {:.3} seconds", start.elapsed().as_secs_f64());
    Ok(summaries)
}

/// Score every test epoch in `epoch_dir` against `population`, in file order.
pub fn classify_patient(
    epoch_dir: &Path,
    population: &ReferencePopulation,
    bank: &FilterBank,
    features: &FeatureConfig,
    knn: &ClassifierConfig,
) -> Result<Vec<ClassificationRecord>> {
    let mut records = Vec::new();
    for path in epoch_files(epoch_dir, true)? {
        let name = file_id(&path);
        match Epoch::load(&path).and_then(|epoch| feature_vector(&epoch, bank, features)) {
            Ok(v) => {
                let scores = classify(&v, population, knn);
                debug!("{name}: ictal={:.1} early={:.1}", scores.ictal, scores.early);
                records.push(ClassificationRecord { epoch_id: name, scores });
            }
            Err(e) => warn!("skipping epoch {name}: {e}"),
        }
    }
    Ok(records)
}

/// For every patient with stored points under `training_dir`, load its
/// population and score the test epochs in `data_dir/<patient>`, writing one
/// CSV line per epoch to `out` as soon as it is scored.
///
/// Returns the populations that were used.
pub fn classify_all<W: Write>(
    training_dir: &Path,
    data_dir: &Path,
    bank: &FilterBank,
    features: &FeatureConfig,
    knn: &ClassifierConfig,
    mut out: W,
) -> Result<PopulationIndex> {
    let mut index = PopulationIndex::new();
    for dir in patient_dirs(training_dir)? {
        let patient = file_id(&dir);
        let population = index.load_patient(&patient, &dir)?;
        info!("{patient}: {} reference points", population.len());

        let test_dir = data_dir.join(&patient);
        if !test_dir.is_dir() {
            warn!("no data directory for {patient} at {}", test_dir.display());
            continue;
        }
        for record in classify_patient(&test_dir, population, bank, features, knn)? {
            record.write_csv_line(&mut out)?;
        }
    }
    out.flush()?;
    Ok(index)
}
