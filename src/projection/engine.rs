//! Core cohort simulator: annual life-table projection of baseline,
//! intervention and reference cohorts

use crate::assumptions::{Assumptions, HazardModel};
use crate::error::{ModelError, Result};
use crate::profile::{ComorbidityLevel, Sex, SubjectProfile};
use super::life_table::{CohortRow, SimulationResult, SurvivalSample};
use super::state::{CohortState, DeathProbabilities, YearTransition};

/// Age ceiling of the life table (exclusive)
pub const DEFAULT_MAX_AGE: u8 = 105;

/// Hypothetical cohort size
pub const DEFAULT_COHORT_SIZE: f64 = 100_000.0;

/// Stop once baseline survivors drop below this count
pub const DEFAULT_TERMINATION_THRESHOLD: f64 = 100.0;

pub const DEFAULT_SAMPLE_STRIDE: u8 = 5;

pub const DAYS_PER_YEAR: f64 = 365.25;

/// Configuration for a simulation run
#[derive(Debug, Clone)]
pub struct SimulationConfig {
    /// Initial members of each cohort
    pub cohort_size: f64,

    /// First age that is not simulated
    pub max_age: u8,

    /// Baseline survivor count below which the projection stops
    pub termination_threshold: f64,

    /// Record a survival sample at ages divisible by this stride
    pub sample_stride: u8,

    /// Whether to keep the per-year cohort trace
    pub detailed_output: bool,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            cohort_size: DEFAULT_COHORT_SIZE,
            max_age: DEFAULT_MAX_AGE,
            termination_threshold: DEFAULT_TERMINATION_THRESHOLD,
            sample_stride: DEFAULT_SAMPLE_STRIDE,
            detailed_output: false,
        }
    }
}

/// Main simulation engine
#[derive(Debug, Clone)]
pub struct CohortSimulator {
    hazard: HazardModel,
    config: SimulationConfig,
}

impl CohortSimulator {
    /// Create a new simulator with given assumptions and config
    pub fn new(assumptions: Assumptions, config: SimulationConfig) -> Self {
        Self { hazard: assumptions.hazard, config }
    }

    /// Run the simulation for a profile (the smoker flag does not affect mortality)
    pub fn simulate_profile(&self, profile: &SubjectProfile) -> Result<SimulationResult> {
        self.simulate(profile.age, profile.sex, profile.comorbidity)
    }

    /// Project the three cohorts from `start_age` to the age ceiling
    pub fn simulate(&self, start_age: u8, sex: Sex, comorbidity: ComorbidityLevel) -> Result<SimulationResult> {
        self.validate(start_age)?;

        let cohort_size = self.config.cohort_size;
        let mut state = CohortState::new(start_age, cohort_size);
        let mut samples = Vec::new();
        let mut rows = Vec::new();
        let mut years_simulated = 0u32;
        let mut terminated_early = false;

        while state.age < self.config.max_age {
            let age = state.age;
            let hazards = self.year_hazards(age, sex, comorbidity);
            let transition = state.apply_year(&hazards.death_probabilities());
            years_simulated += 1;

            // Samples use start-of-year survivors
            if age % self.config.sample_stride == 0 || age == start_age {
                samples.push(SurvivalSample::new(
                    age,
                    transition.baseline.0,
                    transition.intervention.0,
                ));
            }

            if self.config.detailed_output {
                rows.push(hazards.to_row(age, &transition));
            }

            state.advance_year();

            if state.baseline.survivors < self.config.termination_threshold {
                terminated_early = state.age < self.config.max_age;
                log::debug!(
                    "Baseline cohort below {} at age {}, stopping",
                    self.config.termination_threshold,
                    age
                );
                break;
            }
        }

        let personal = state.baseline.life_expectancy(cohort_size);
        let intervention = state.intervention.life_expectancy(cohort_size);
        let reference = state.reference.life_expectancy(cohort_size);
        let gain_days = (intervention - personal) * DAYS_PER_YEAR;

        log::debug!(
            "Simulated {} age {} ({}): ex={:.3} ref={:.3} gain={:.1}d",
            sex,
            start_age,
            comorbidity,
            personal,
            reference,
            gain_days
        );

        Ok(SimulationResult {
            start_age,
            personal_life_expectancy: personal,
            reference_life_expectancy: reference,
            intervention_life_expectancy: intervention,
            gain_days,
            survival_samples: samples,
            years_simulated,
            terminated_early,
            rows,
        })
    }

    fn validate(&self, start_age: u8) -> Result<()> {
        if start_age >= self.config.max_age {
            return Err(ModelError::invalid_input(format!(
                "start age {} must be below the age ceiling {}",
                start_age, self.config.max_age
            )));
        }
        if self.config.sample_stride == 0 {
            return Err(ModelError::invalid_input("sample stride must be positive"));
        }
        if self.config.cohort_size.is_nan() || self.config.cohort_size <= 0.0 {
            return Err(ModelError::invalid_input("cohort size must be positive"));
        }
        Ok(())
    }

    /// All hazards needed for one simulated year
    fn year_hazards(&self, age: u8, sex: Sex, comorbidity: ComorbidityLevel) -> YearHazards {
        YearHazards {
            total: self.hazard.total_mortality_hazard(age, sex, comorbidity),
            gastric: self.hazard.gastric_cancer_hazard(age, sex),
            other: self.hazard.other_cause_hazard(age, sex, comorbidity),
            intervention: self.hazard.intervention_hazard(age, sex, comorbidity),
            reference: self.hazard.total_mortality_hazard(age, sex, ComorbidityLevel::None),
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct YearHazards {
    total: f64,
    gastric: f64,
    other: f64,
    intervention: f64,
    reference: f64,
}

impl YearHazards {
    fn death_probabilities(&self) -> DeathProbabilities {
        DeathProbabilities {
            baseline: self.total,
            intervention: self.intervention,
            reference: self.reference,
        }
    }

    fn to_row(&self, age: u8, transition: &YearTransition) -> CohortRow {
        CohortRow {
            age,
            total_hazard: self.total,
            gastric_hazard: self.gastric,
            other_hazard: self.other,
            intervention_hazard: self.intervention,
            reference_hazard: self.reference,
            baseline_bop: transition.baseline.0,
            baseline_eop: transition.baseline.1,
            intervention_bop: transition.intervention.0,
            intervention_eop: transition.intervention.1,
            reference_bop: transition.reference.0,
            reference_eop: transition.reference.1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use proptest::prelude::*;

    fn simulator() -> CohortSimulator {
        CohortSimulator::new(Assumptions::default_parameters(), SimulationConfig::default())
    }

    fn detailed_simulator() -> CohortSimulator {
        let config = SimulationConfig { detailed_output: true, ..Default::default() };
        CohortSimulator::new(Assumptions::default_parameters(), config)
    }

    #[test]
    fn test_elderly_male_mild_comorbidity() {
        let result = simulator().simulate(75, Sex::Male, ComorbidityLevel::Mild).unwrap();

        assert_abs_diff_eq!(result.personal_life_expectancy, 10.5238, epsilon = 1e-3);
        assert_abs_diff_eq!(result.reference_life_expectancy, 13.2753, epsilon = 1e-3);
        assert_abs_diff_eq!(result.gain_days, 161.91, epsilon = 0.05);
        assert!(result.personal_life_expectancy < result.reference_life_expectancy);

        let ages: Vec<u8> = result.survival_samples.iter().map(|s| s.age).collect();
        assert_eq!(ages, vec![75, 80, 85, 90, 95, 100]);
        assert_eq!(result.survival_samples[0].baseline_per_1000, 100.0);
        assert_eq!(result.survival_samples[1].baseline_per_1000, 76.0);
        assert_eq!(result.survival_samples[1].intervention_per_1000, 77.5);
        assert!(!result.terminated_early);
        assert_eq!(result.years_simulated, 30);
    }

    #[test]
    fn test_healthy_young_female() {
        let result = simulator().simulate(30, Sex::Female, ComorbidityLevel::None).unwrap();

        assert_abs_diff_eq!(result.personal_life_expectancy, 52.7793, epsilon = 1e-3);
        // No comorbidity: the reference cohort is the personal cohort
        assert_eq!(result.personal_life_expectancy, result.reference_life_expectancy);
        assert_abs_diff_eq!(result.gain_days, 400.34, epsilon = 0.05);
        assert_eq!(result.survival_samples.len(), 15);
    }

    #[test]
    fn test_start_age_off_stride_samples_start_then_multiples() {
        let result = simulator().simulate(72, Sex::Male, ComorbidityLevel::Mild).unwrap();
        let ages: Vec<u8> = result.survival_samples.iter().map(|s| s.age).collect();
        assert_eq!(ages, vec![72, 75, 80, 85, 90, 95, 100]);
    }

    #[test]
    fn test_early_termination() {
        // Severe comorbidity at 75: baseline falls below 100 survivors during age 97
        let result = simulator().simulate(75, Sex::Male, ComorbidityLevel::Severe).unwrap();
        assert!(result.terminated_early);
        assert_eq!(result.years_simulated, 23);
        assert_abs_diff_eq!(result.personal_life_expectancy, 6.6431, epsilon = 1e-3);

        let last = result.survival_samples.last().unwrap();
        assert_eq!(last.age, 95);
    }

    #[test]
    fn test_last_possible_start_age() {
        let result = simulator().simulate(104, Sex::Male, ComorbidityLevel::None).unwrap();
        assert_eq!(result.years_simulated, 1);
        assert_eq!(result.survival_samples.len(), 1);
        assert_abs_diff_eq!(result.personal_life_expectancy, 0.8271, epsilon = 1e-3);
    }

    #[test]
    fn test_rejects_start_age_at_ceiling() {
        let err = simulator().simulate(105, Sex::Female, ComorbidityLevel::None).unwrap_err();
        assert!(err.is_invalid_input());
    }

    #[test]
    fn test_detailed_rows_are_consistent() {
        let result = detailed_simulator().simulate(60, Sex::Female, ComorbidityLevel::Mild).unwrap();
        assert_eq!(result.rows.len() as u32, result.years_simulated);

        for pair in result.rows.windows(2) {
            assert_eq!(pair[0].baseline_eop, pair[1].baseline_bop);
            assert_eq!(pair[0].intervention_eop, pair[1].intervention_bop);
            assert_eq!(pair[1].age, pair[0].age + 1);
        }

        let first = &result.rows[0];
        assert_eq!(first.baseline_bop, DEFAULT_COHORT_SIZE);
        assert_abs_diff_eq!(
            first.intervention_hazard,
            first.other_hazard + first.gastric_hazard * 0.33,
            epsilon = 1e-15
        );

        // Life expectancy equals the summed trapezoids
        let years: f64 = result.rows.iter().map(|r| (r.baseline_bop + r.baseline_eop) / 2.0).sum();
        assert_abs_diff_eq!(years / DEFAULT_COHORT_SIZE, result.personal_life_expectancy, epsilon = 1e-9);
    }

    #[test]
    fn test_row_hazards_come_from_model() {
        let model = HazardModel::DEFAULT;
        let result = detailed_simulator().simulate(70, Sex::Male, ComorbidityLevel::Severe).unwrap();

        for row in &result.rows {
            let (sex, level) = (Sex::Male, ComorbidityLevel::Severe);
            assert_eq!(row.total_hazard, model.total_mortality_hazard(row.age, sex, level));
            assert_eq!(row.gastric_hazard, model.gastric_cancer_hazard(row.age, sex));
            assert_eq!(row.other_hazard, model.other_cause_hazard(row.age, sex, level));
            assert_eq!(row.intervention_hazard, model.intervention_hazard(row.age, sex, level));
        }
    }

    #[test]
    fn test_no_rows_without_detailed_output() {
        let result = simulator().simulate(60, Sex::Female, ComorbidityLevel::Mild).unwrap();
        assert!(result.rows.is_empty());
    }

    #[test]
    fn test_unit_relative_risk_gives_no_gain() {
        let mut assumptions = Assumptions::default_parameters();
        assumptions.hazard.eradication_relative_risk = 1.0;
        let sim = CohortSimulator::new(assumptions, SimulationConfig::default());
        let result = sim.simulate(50, Sex::Male, ComorbidityLevel::None).unwrap();

        assert_abs_diff_eq!(result.gain_days, 0.0, epsilon = 1e-6);
    }

    fn sex_strategy() -> impl Strategy<Value = Sex> {
        prop_oneof![Just(Sex::Male), Just(Sex::Female)]
    }

    fn comorbidity_strategy() -> impl Strategy<Value = ComorbidityLevel> {
        prop_oneof![
            Just(ComorbidityLevel::None),
            Just(ComorbidityLevel::Mild),
            Just(ComorbidityLevel::Severe),
        ]
    }

    proptest! {
        #[test]
        fn prop_cohort_invariants(
            age in 0u8..105,
            sex in sex_strategy(),
            level in comorbidity_strategy(),
        ) {
            let result = detailed_simulator().simulate(age, sex, level).unwrap();

            prop_assert!(result.personal_life_expectancy >= 0.0);
            prop_assert!(result.gain_days >= 0.0);
            prop_assert!(result.intervention_life_expectancy >= result.personal_life_expectancy);
            if level != ComorbidityLevel::None {
                prop_assert!(result.reference_life_expectancy >= result.personal_life_expectancy);
            }

            for row in &result.rows {
                prop_assert!(row.baseline_eop >= 0.0);
                prop_assert!(row.baseline_eop <= row.baseline_bop);
                prop_assert!(row.intervention_eop <= row.intervention_bop);
                prop_assert!(row.reference_eop <= row.reference_bop);
                prop_assert!(row.intervention_bop >= row.baseline_bop);
                prop_assert!(row.intervention_eop >= row.baseline_eop);
            }
        }

        #[test]
        fn prop_samples_follow_stride(age in 30u8..=95, sex in sex_strategy()) {
            let result = simulator().simulate(age, sex, ComorbidityLevel::Mild).unwrap();
            let samples = &result.survival_samples;

            prop_assert_eq!(samples[0].age, age);
            for sample in &samples[1..] {
                prop_assert_eq!(sample.age % 5, 0);
                prop_assert!(sample.age > age);
            }
            for pair in samples.windows(2) {
                prop_assert!(pair[1].baseline_per_1000 <= pair[0].baseline_per_1000);
                prop_assert!(pair[1].intervention_per_1000 >= pair[1].baseline_per_1000);
            }
        }
    }
}
