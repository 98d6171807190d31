/// explore: tabulate one per-channel feature over a patient's labeled
/// epochs, grouped as interictal / early / late, for plotting elsewhere.
///
/// Output CSV: `class,epoch,ch0,ch1,…`
use anyhow::{Context, Result};
use clap::Parser;
use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

use ictal::{explore::explore_dir, Feature, FilterBank, PointClass, RunConfig};

#[derive(Parser, Debug)]
#[command(name = "explore", about = "Per-channel feature values grouped by seizure class")]
struct Args {
    /// One patient's epoch directory.
    #[arg(long)]
    patient: PathBuf,

    /// Directory holding the FilterSet*.safetensors kernels
    /// (default: `features.filter_dir` of the config).
    #[arg(long)]
    filters: Option<PathBuf>,

    /// Feature name, e.g. "Peak Detect" or "10-20Hz Upslope".
    #[arg(long)]
    feature: Feature,

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
    let bank = FilterBank::load(&filter_dir, &args.feature.required_bands())
        .with_context(|| format!("loading filter kernels from {}", filter_dir.display()))?;

    let table = explore_dir(&args.patient, args.feature, &bank, &cfg.features)
        .with_context(|| format!("exploring {}", args.patient.display()))?;

    let file = File::create(&args.output).with_context(|| format!("creating {}", args.output.display()))?;
    table.write_csv(BufWriter::new(file))?;

    for class in PointClass::ALL {
        println!("{:>10}: {} epochs", class.to_string(), table.class_rows(class).count());
    }
    println!("{} → {}", args.feature, args.output.display());
    Ok(())
}
