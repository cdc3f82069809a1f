//! Scenario runner for single and batch assessments
//!
//! Pre-loads assumptions once, then runs the simulation and guidance for any
//! number of profiles without re-reading CSV files.

use chrono::{DateTime, Utc};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::assumptions::Assumptions;
use crate::error::Result;
use crate::guidance::{evaluate_all, GuidanceMap};
use crate::profile::SubjectProfile;
use crate::projection::{CohortSimulator, LifeExpectancySummary, SimulationConfig, SimulationResult};

/// Everything derived from one profile
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Assessment {
    pub profile: SubjectProfile,
    pub summary: LifeExpectancySummary,
    pub simulation: SimulationResult,
    pub guidance: GuidanceMap,
    pub generated_at: DateTime<Utc>,
}

/// Pre-loaded scenario runner
///
/// # Example
/// ```ignore
/// let runner = ScenarioRunner::from_csv()?;
/// let assessment = runner.assess(&profile)?;
/// println!("{:.1} years", assessment.summary.personal_life_expectancy);
/// ```
#[derive(Debug, Clone)]
pub struct ScenarioRunner {
    simulator: CohortSimulator,
}

impl ScenarioRunner {
    /// Create runner with the built-in parameters
    pub fn new() -> Self {
        Self::with_assumptions(Assumptions::default_parameters())
    }

    /// Create runner by loading assumptions from CSV files
    pub fn from_csv() -> Result<Self> {
        Ok(Self::with_assumptions(Assumptions::from_csv()?))
    }

    /// Create runner from specific assumptions directory
    pub fn from_csv_path(path: &std::path::Path) -> Result<Self> {
        Ok(Self::with_assumptions(Assumptions::from_csv_path(path)?))
    }

    pub fn with_assumptions(assumptions: Assumptions) -> Self {
        Self::with_config(assumptions, SimulationConfig::default())
    }

    pub fn with_config(assumptions: Assumptions, config: SimulationConfig) -> Self {
        Self {
            simulator: CohortSimulator::new(assumptions, config),
        }
    }


    /// Simulate one profile and derive its screening guidance from the
    /// personal life expectancy
    pub fn assess(&self, profile: &SubjectProfile) -> Result<Assessment> {
        profile.validate()?;
        let simulation = self.simulator.simulate_profile(profile)?;
        let guidance = evaluate_all(profile, simulation.personal_life_expectancy);

        Ok(Assessment {
            profile: *profile,
            summary: simulation.summary(),
            simulation,
            guidance,
            generated_at: Utc::now(),
        })
    }

    /// Assess many independent profiles in parallel, preserving input order
    pub fn assess_batch(&self, profiles: &[SubjectProfile]) -> Vec<Result<Assessment>> {
        log::info!("Assessing {} profiles", profiles.len());
        profiles.par_iter().map(|p| self.assess(p)).collect()
    }
}

impl Default for ScenarioRunner {
    fn default() -> Self {
        Self::new()
    }
}
