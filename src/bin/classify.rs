/// classify: score every test epoch against its patient's reference
/// population and write `epoch_id,ictal,early` CSV lines.
use anyhow::{Context, Result};
use clap::Parser;
use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

use ictal::{batch::classify_all, Band, FilterBank, RunConfig};

#[derive(Parser, Debug)]
#[command(name = "classify", about = "Score test epochs against stored reference populations")]
struct Args {
    /// Directory with one subdirectory of point files per patient (output of `train`).
    #[arg(long)]
    training: PathBuf,

    /// Directory with one subdirectory of epoch files per patient.
    #[arg(long)]
    data: PathBuf,

    /// Directory holding the FilterSet*.safetensors kernels
    /// (default: `features.filter_dir` of the config).
    #[arg(long)]
    filters: Option<PathBuf>,

    /// CSV output path.
    #[arg(long)]
    output: PathBuf,

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

    let file = File::create(&args.output).with_context(|| format!("creating {}", args.output.display()))?;
    let index = classify_all(
        &args.training,
        &args.data,
        &bank,
        &cfg.features,
        &cfg.classifier,
        BufWriter::new(file),
    )
    .context("classification failed")?;

    println!("Scored {} patients → {}", index.len(), args.output.display());
    Ok(())
}
