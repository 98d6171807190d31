/// resample: Fourier-resample every epoch file of a data root to a fixed
/// number of samples per channel.
///
/// Layout:
///   <input>/<patient>/*.safetensors  →  <output>/<patient>/*.safetensors
use anyhow::{bail, Context, Result};
use clap::Parser;
use std::path::PathBuf;

use ictal::{resample::resample_all, RunConfig};

#[derive(Parser, Debug)]
#[command(name = "resample", about = "Resample epoch files to a fixed sample count")]
struct Args {
    /// Data root: epoch files and/or one subdirectory per patient.
    #[arg(long)]
    input: PathBuf,

    /// Output directory (created if missing).
    #[arg(long)]
    output: PathBuf,

    /// Samples per channel (default: `resample.target_samples` of the config, 400).
    #[arg(long)]
    samples: Option<usize>,

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
    let samples = args.samples.unwrap_or(cfg.resample.target_samples);
    if samples == 0 {
        bail!("--samples must be positive");
    }
    if args.input == args.output {
        bail!("input and output directories must differ");
    }

    let n = resample_all(&args.input, &args.output, samples)
        .with_context(|| format!("resampling {}", args.input.display()))?;
    println!("Resampled {n} epochs to {samples} samples → {}", args.output.display());
    Ok(())
}
