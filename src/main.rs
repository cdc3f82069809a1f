//! Screening Optimizer CLI
//!
//! Assess one subject profile: life expectancy, eradication gain, survival
//! curve and screening guidance

use anyhow::{Context, Result};
use clap::Parser;
use screening_optimizer::{
    assumptions::Assumptions,
    profile::{ComorbidityLevel, Sex, SubjectProfile},
    projection::SimulationConfig,
    scenario::{Assessment, ScenarioRunner},
};
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "screening_optimizer", version, about = "Life expectancy and cancer-screening guidance for one subject")]
struct Args {
    /// Age in whole years
    #[arg(long, default_value_t = 75)]
    age: u8,

    /// Male or Female
    #[arg(long, default_value = "Male")]
    sex: String,

    /// none, mild or severe
    #[arg(long, default_value = "mild")]
    comorbidity: String,

    /// Subject has a smoking history
    #[arg(long)]
    smoker: bool,

    /// Print the assessment as JSON instead of a report
    #[arg(long)]
    json: bool,

    /// Include the per-year cohort trace
    #[arg(long)]
    detailed: bool,

    /// Write survival samples to this CSV file
    #[arg(long)]
    curve_csv: Option<PathBuf>,

    /// Directory of assumption CSV files (defaults to built-in parameters)
    #[arg(long)]
    assumptions: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let sex: Sex = args.sex.parse()?;
    let comorbidity: ComorbidityLevel = args.comorbidity.parse()?;
    let profile = SubjectProfile::new(args.age, sex, comorbidity, args.smoker)?;

    let assumptions = match &args.assumptions {
        Some(dir) => Assumptions::from_csv_path(dir)
            .with_context(|| format!("loading assumptions from {}", dir.display()))?,
        None => Assumptions::default_parameters(),
    };
    let config = SimulationConfig {
        detailed_output: args.detailed,
        ..Default::default()
    };

    let runner = ScenarioRunner::with_config(assumptions, config);
    let assessment = runner.assess(&profile)?;

    if let Some(path) = &args.curve_csv {
        write_curve(path, &assessment)
            .with_context(|| format!("writing survival curve to {}", path.display()))?;
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&assessment)?);
    } else {
        print_report(&assessment, args.detailed);
        if let Some(path) = &args.curve_csv {
            println!("\nSurvival curve written to: {}", path.display());
        }
    }

    Ok(())
}

fn write_curve(path: &Path, assessment: &Assessment) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    for sample in &assessment.simulation.survival_samples {
        writer.serialize(sample)?;
    }
    writer.flush()?;
    Ok(())
}

fn print_report(assessment: &Assessment, detailed: bool) {
    let profile = &assessment.profile;
    let summary = &assessment.summary;

    println!("Screening Optimizer v{}", env!("CARGO_PKG_VERSION"));
    println!("========================\n");

    println!("Profile:");
    println!("  Age: {}", profile.age);
    println!("  Sex: {}", profile.sex);
    println!("  Comorbidity: {}", profile.comorbidity);
    println!("  Smoker: {}", if profile.is_smoker { "yes" } else { "no" });
    println!();

    println!("Life Expectancy:");
    println!("  Personal:  {:.1} years (expected age at death {:.1})",
        summary.personal_life_expectancy, summary.expected_age_at_death);
    println!("  Reference: {:.1} years (healthy peer)", summary.reference_life_expectancy);
    println!("  Personal / reference: {:.0}%", summary.percent_of_reference);
    if profile.comorbidity != ComorbidityLevel::None {
        println!("  Years lost to comorbidity: {:.1}", summary.years_lost_to_comorbidity);
    }
    if summary.is_limited {
        println!("  Warning: life expectancy under 10 years; most guidelines consider stopping screening.");
    }
    println!();

    println!("H. pylori eradication: +{:.1} days", summary.gain_days);
    println!("{:>5} {:>10} {:>14}", "Age", "Baseline", "Intervention");
    println!("{}", "-".repeat(31));
    for sample in &assessment.simulation.survival_samples {
        println!("{:>5} {:>10.1} {:>14.1}", sample.age, sample.baseline_per_1000, sample.intervention_per_1000);
    }
    println!();

    println!("Screening Guidance:");
    for (cancer_type, result) in assessment.guidance.iter() {
        println!("  {:<18} [{:<7}] {}", cancer_type.display_name(), result.status.label(), result.message);
    }

    if detailed {
        println!("\nCohort trace:");
        println!("{:>4} {:>10} {:>10} {:>12} {:>12} {:>12} {:>12}",
            "Age", "qx", "qx_gastric", "Baseline", "Intervention", "Reference", "qx_ref");
        println!("{}", "-".repeat(80));
        for row in &assessment.simulation.rows {
            println!("{:>4} {:>10.6} {:>10.6} {:>12.2} {:>12.2} {:>12.2} {:>12.6}",
                row.age,
                row.total_hazard,
                row.gastric_hazard,
                row.baseline_bop,
                row.intervention_bop,
                row.reference_bop,
                row.reference_hazard,
            );
        }
    }
}
