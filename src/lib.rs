//! Screening Optimizer - cohort life-table engine for cancer-screening decisions
//!
//! This library provides:
//! - Parametric mortality hazards by age, sex and comorbidity, with a
//!   gastric-cancer-specific component
//! - Life expectancy from a discrete annual cohort projection, including the
//!   days gained from H. pylori eradication and a healthy reference cohort
//! - Screening guidance for gastric, colorectal, lung, breast and cervical cancer
//! - CSV-driven assumptions and batch assessment of many profiles

pub mod error;
pub mod profile;
pub mod assumptions;
pub mod projection;
pub mod guidance;
pub mod scenario;

// Re-export commonly used types
pub use error::{ModelError, Result};
pub use profile::{ComorbidityLevel, Sex, SubjectProfile};
pub use assumptions::{Assumptions, HazardModel};
pub use projection::{CohortSimulator, SimulationConfig, SimulationResult, SurvivalSample};
pub use guidance::{evaluate_screening, CancerType, GuidanceMap, GuidanceResult, GuidanceStatus};
pub use scenario::{Assessment, ScenarioRunner};

/// Annual all-cause death probability under the built-in parameters
pub fn total_mortality_hazard(age: u8, sex: Sex, comorbidity: ComorbidityLevel) -> f64 {
    HazardModel::DEFAULT.total_mortality_hazard(age, sex, comorbidity)
}

/// Annual gastric-cancer death probability under the built-in parameters
pub fn gastric_cancer_hazard(age: u8, sex: Sex) -> f64 {
    HazardModel::DEFAULT.gastric_cancer_hazard(age, sex)
}

/// Run the three-cohort simulation with built-in parameters and default config
///
/// Fails with [`ModelError::InvalidInput`] when `start_age` is at or beyond the
/// age ceiling.
pub fn run_simulation(start_age: u8, sex: Sex, comorbidity: ComorbidityLevel) -> Result<SimulationResult> {
    CohortSimulator::new(Assumptions::default_parameters(), SimulationConfig::default())
        .simulate(start_age, sex, comorbidity)
}
