//! Assess every profile in a CSV file
//!
//! Usage: cargo run --bin run_batch -- --input data/profiles.csv
//!
//! Outputs one row per profile with life expectancies, the eradication gain
//! and the five screening statuses

use anyhow::{Context, Result};
use clap::Parser;
use screening_optimizer::{
    guidance::GuidanceStatus,
    profile::load_profiles,
    scenario::ScenarioRunner,
};
use serde::Serialize;
use std::path::PathBuf;
use std::time::Instant;

#[derive(Parser, Debug)]
#[command(name = "run_batch", about = "Batch life-expectancy and screening assessment")]
struct Args {
    /// Profiles CSV with columns Age,Sex,Comorbidity,Smoker
    #[arg(long, default_value = "data/profiles.csv")]
    input: PathBuf,

    /// Output CSV path
    #[arg(long, default_value = "batch_assessment_output.csv")]
    output: PathBuf,

    /// Directory of assumption CSV files (defaults to built-in parameters)
    #[arg(long)]
    assumptions: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
struct OutputRow {
    age: u8,
    sex: String,
    comorbidity: String,
    smoker: bool,
    personal_ex: f64,
    reference_ex: f64,
    intervention_ex: f64,
    gain_days: f64,
    gastric: GuidanceStatus,
    colorectal: GuidanceStatus,
    lung: GuidanceStatus,
    breast: GuidanceStatus,
    cervical: GuidanceStatus,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let start = Instant::now();
    println!("Loading profiles from {}...", args.input.display());
    let profiles = load_profiles(&args.input)
        .with_context(|| format!("loading profiles from {}", args.input.display()))?;
    println!("Loaded {} profiles in {:?}", profiles.len(), start.elapsed());

    let runner = match &args.assumptions {
        Some(dir) => ScenarioRunner::from_csv_path(dir)
            .with_context(|| format!("loading assumptions from {}", dir.display()))?,
        None => ScenarioRunner::new(),
    };

    println!("Running assessments...");
    let run_start = Instant::now();
    let results = runner.assess_batch(&profiles);
    println!("Assessments complete in {:?}", run_start.elapsed());

    let mut writer = csv::Writer::from_path(&args.output)
        .with_context(|| format!("creating {}", args.output.display()))?;
    let mut failures = 0usize;

    for (profile, result) in profiles.iter().zip(&results) {
        let assessment = match result {
            Ok(a) => a,
            Err(e) => {
                log::warn!("Skipping profile {:?}: {}", profile, e);
                failures += 1;
                continue;
            }
        };

        let sim = &assessment.simulation;
        let guidance = &assessment.guidance;
        writer.serialize(OutputRow {
            age: profile.age,
            sex: profile.sex.to_string(),
            comorbidity: profile.comorbidity.to_string(),
            smoker: profile.is_smoker,
            personal_ex: sim.personal_life_expectancy,
            reference_ex: sim.reference_life_expectancy,
            intervention_ex: sim.intervention_life_expectancy,
            gain_days: sim.gain_days,
            gastric: guidance.gastric.status,
            colorectal: guidance.colorectal.status,
            lung: guidance.lung.status,
            breast: guidance.breast.status,
            cervical: guidance.cervical.status,
        })?;
    }
    writer.flush()?;

    println!("Output written to {}", args.output.display());

    let assessed: Vec<_> = results.iter().filter_map(|r| r.as_ref().ok()).collect();
    if !assessed.is_empty() {
        let mean_gain = assessed.iter().map(|a| a.summary.gain_days).sum::<f64>() / assessed.len() as f64;
        let limited = assessed.iter().filter(|a| a.summary.is_limited).count();
        println!("\nBatch Summary:");
        println!("  Profiles assessed: {}", assessed.len());
        println!("  Failed: {}", failures);
        println!("  Mean eradication gain: {:.1} days", mean_gain);
        println!("  Life expectancy under 10 years: {}", limited);
    }

    println!("\nTotal time: {:?}", start.elapsed());
    Ok(())
}
