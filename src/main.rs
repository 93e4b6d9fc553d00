//! Taxsim CLI
//!
//! Loads a batch of taxpayers from CSV, runs all three regimes over each,
//! and writes one result CSV per regime.

use anyhow::Context;
use clap::Parser;
use rayon::prelude::*;
use std::path::PathBuf;
use taxsim::policy::load_policy;
use taxsim::taxpayer::{gen_blank_csv, load_taxpayers};
use taxsim::{calculate, Policy, Regime};

#[derive(Parser, Debug)]
#[command(name = "taxsim", version, about = "Federal individual income tax simulator")]
struct Args {
    /// Input taxpayer CSV file
    #[arg(short, long, default_value = "taxpayers.csv")]
    input: PathBuf,

    /// Directory holding the per-regime policy parameter CSVs
    #[arg(short, long, default_value = "params")]
    params_dir: PathBuf,

    /// Directory to write result CSVs into
    #[arg(short, long, default_value = "results")]
    output_dir: PathBuf,

    /// Generate a blank input CSV at the given path and exit
    #[arg(short, long)]
    gencsv: Option<PathBuf>,
}

fn load_or_builtin(params_dir: &std::path::Path, regime: Regime) -> anyhow::Result<Policy> {
    let path = params_dir.join(regime.param_file());
    if path.exists() {
        load_policy(&path).with_context(|| format!("loading {}", path.display()))
    } else {
        log::info!(
            "{} not found, using built-in {} parameters",
            path.display(),
            regime.name()
        );
        Ok(regime.builtin_policy())
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    if let Some(path) = args.gencsv {
        gen_blank_csv(&path).with_context(|| format!("writing {}", path.display()))?;
        println!("Blank input CSV written to: {}", path.display());
        return Ok(());
    }

    let taxpayers = load_taxpayers(&args.input)
        .with_context(|| format!("loading taxpayers from {}", args.input.display()))?;
    log::info!(
        "loaded {} taxpayers from {}",
        taxpayers.len(),
        args.input.display()
    );

    std::fs::create_dir_all(&args.output_dir)?;

    for regime in Regime::ALL {
        let policy = load_or_builtin(&args.params_dir, regime)?;

        // One taxpayer per task; each calculation is independent
        let results: Vec<_> = taxpayers
            .par_iter()
            .map(|taxpayer| calculate(regime, &policy, taxpayer))
            .collect();

        let out_path = args.output_dir.join(regime.results_file());
        let mut writer = csv::Writer::from_path(&out_path)
            .with_context(|| format!("creating {}", out_path.display()))?;

        let mut written = 0usize;
        for (i, result) in results.into_iter().enumerate() {
            match result {
                Ok(record) => {
                    writer.serialize(record)?;
                    written += 1;
                }
                // One bad record aborts that taxpayer only, not the batch
                Err(e) => log::error!("{}: skipping taxpayer #{}: {}", regime.name(), i + 1, e),
            }
        }
        writer.flush()?;

        println!(
            "{}: {} of {} results written to {}",
            regime.name(),
            written,
            taxpayers.len(),
            out_path.display()
        );
    }

    Ok(())
}
