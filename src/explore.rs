//! Per-channel feature tables grouped by class.
//!
//! The data half of feature exploration: run one catalogue [`Feature`] over
//! every labeled epoch of a patient directory and keep the per-channel
//! values, split into interictal, early-ictal and late-ictal rows. Plotting
//! is left to whatever reads the CSV.
use crate::config::FeatureConfig;
use crate::epoch::Epoch;
use crate::error::Result;
use crate::features::Feature;
use crate::filter::FilterBank;
use crate::io::{file_id, list_dir};
use crate::store::{is_test_name, PointClass};
use log::{debug, warn};
use std::io::Write;
use std::path::Path;

/// One epoch's per-channel feature values.
#[derive(Debug, Clone, PartialEq)]
pub struct ExplorationRow {
    pub epoch_id: String,
    pub class: PointClass,
    pub values: Vec<f64>,
}

/// Rows of a single feature across many epochs.
#[derive(Debug, Clone)]
pub struct ExplorationTable {
    pub feature: Feature,
    pub rows: Vec<ExplorationRow>,
}

impl ExplorationTable {
    pub fn new(feature: Feature) -> Self {
        Self { feature, rows: Vec::new() }
    }

    /// Extract the feature from a labeled epoch and append it.
    pub fn add(&mut self, epoch: &Epoch, bank: &FilterBank, cfg: &FeatureConfig) -> Result<()> {
        let class = PointClass::of_epoch(epoch, cfg.early_latency_s)?;
        let values = self.feature.extract(epoch, bank, cfg)?;
        self.rows.push(ExplorationRow { epoch_id: epoch.id.clone(), class, values });
        Ok(())
    }

    /// Rows of one class, in insertion order.
    pub fn class_rows(&self, class: PointClass) -> impl Iterator<Item = &ExplorationRow> {
        self.rows.iter().filter(move |r| r.class == class)
    }

    /// `class,epoch,ch0,ch1,…` with one row per epoch.
    pub fn write_csv<W: Write>(&self, mut w: W) -> std::io::Result<()> {
        let n_ch = self.rows.iter().map(|r| r.values.len()).max().unwrap_or(0);
        write!(w, "class,epoch")?;
        for c in 0..n_ch {
            write!(w, ",ch{c}")?;
        }
        writeln!(w)?;
        for row in &self.rows {
            write!(w, "{},{}", row.class, row.epoch_id)?;
            for v in &row.values {
                write!(w, ",{v}")?;
            }
            writeln!(w)?;
        }
        Ok(())
    }
}

/// Build a table from every labeled, non-test epoch in `dir`.
///
/// Epochs that fail to load or extract are logged and skipped.
pub fn explore_dir(dir: &Path, feature: Feature, bank: &FilterBank, cfg: &FeatureConfig) -> Result<ExplorationTable> {
    let mut table = ExplorationTable::new(feature);
    for path in list_dir(dir)? {
        let name = file_id(&path);
        if !path.is_file() || name.starts_with('.') || is_test_name(&name) {
            continue;
        }
        let added = Epoch::load(&path).and_then(|epoch| table.add(&epoch, bank, cfg));
        match added {
            Ok(()) => debug!("{feature}: {name}"),
            Err(e) => warn!("skipping epoch {name}: {e}"),
        }
    }
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::epoch::SourceLabel;

    #[test]
    fn rows_grouped_and_written() {
        let cfg = FeatureConfig::default();
        let bank = FilterBank::new();
        let mut table = ExplorationTable::new(Feature::PeakDetect);
        let inter = Epoch::from_channels("a_interictal_segment_1", vec![vec![10.0, 1.0], vec![2.0, 2.0]], 2.0)
            .unwrap()
            .with_label(SourceLabel::Interictal);
        let early = Epoch::from_channels("a_ictal_segment_1", vec![vec![500.0, 1.0], vec![2.0, 90.0]], 2.0)
            .unwrap()
            .with_label(SourceLabel::Ictal)
            .with_latency(1.0);
        table.add(&inter, &bank, &cfg).unwrap();
        table.add(&early, &bank, &cfg).unwrap();

        assert_eq!(table.class_rows(PointClass::Interictal).count(), 1);
        assert_eq!(table.class_rows(PointClass::EarlyIctal).count(), 1);
        assert_eq!(table.class_rows(PointClass::LateIctal).count(), 0);

        let mut out = Vec::new();
        table.write_csv(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "class,epoch,ch0,ch1");
        assert!(lines[1].starts_with("interictal,a_interictal_segment_1,"));
        assert!(lines[2].starts_with("early,a_ictal_segment_1,"));
    }
}
