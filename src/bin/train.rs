/// train: compute a labeled feature point for every non-test epoch of every
/// patient directory and write them as the patient's reference population.
///
/// Layout:
///   <data>/<patient>/*.safetensors      epochs (test clips are skipped)
///   <output>/<patient>/*_point_*        one [1, 3] F64 point per epoch
use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use std::path::PathBuf;

use ictal::{batch::train_all, Band, FilterBank, RunConfig};

#[derive(Parser, Debug)]
#[command(name = "train", about = "Build per-patient reference populations from labeled epochs")]
struct Args {
    /// Directory with one subdirectory of epoch files per patient.
    #[arg(long)]
    data: PathBuf,

    /// Directory the per-patient point files are written to.
    #[arg(long)]
    output: PathBuf,

    /// Directory holding the FilterSet*.safetensors kernels
    /// (default: `features.filter_dir` of the config).
    #[arg(long)]
    filters: Option<PathBuf>,

    /// JSON run configuration.
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let cfg = match &args.config {
        Some(path) => RunConfig::load(path).with_context(|| format!("loading config {}", path.display()))?,
        None => RunConfig::default(),
    };
    let filter_dir = args.filters.unwrap_or_else(|| cfg.features.filter_dir.clone());
    let bank = FilterBank::load(&filter_dir, &[Band::TenTwenty])
        .with_context(|| format!("loading filter kernels from {}", filter_dir.display()))?;

    let summaries = train_all(&args.data, &args.output, &bank, &cfg.features)
        .with_context(|| format!("training from {}", args.data.display()))?;

    let written: usize = summaries.iter().map(|s| s.written).sum();
    let skipped: usize = summaries.iter().map(|s| s.skipped).sum();
    info!("{} patients, {written} points written, {skipped} epochs skipped", summaries.len());
    println!("Written {written} points → {}", args.output.display());
    Ok(())
}
