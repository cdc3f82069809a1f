//! Output structures for cohort simulations

use serde::{Deserialize, Serialize};

/// One simulated year of the three cohorts (detailed output only)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CohortRow {
    pub age: u8,

    // Hazards
    pub total_hazard: f64,
    pub gastric_hazard: f64,
    pub other_hazard: f64,
    pub intervention_hazard: f64,
    pub reference_hazard: f64,

    // Survivors (start of year, end of year)
    pub baseline_bop: f64,
    pub baseline_eop: f64,
    pub intervention_bop: f64,
    pub intervention_eop: f64,
    pub reference_bop: f64,
    pub reference_eop: f64,
}

/// Sampled point of the survival curves
///
/// Survivor counts are divided by 1000, so a full 100,000-member cohort reads 100.0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SurvivalSample {
    pub age: u8,
    pub baseline_per_1000: f64,
    pub intervention_per_1000: f64,
}

impl SurvivalSample {
    pub fn new(age: u8, baseline_survivors: f64, intervention_survivors: f64) -> Self {
        Self {
            age,
            baseline_per_1000: round_one_decimal(baseline_survivors / 1000.0),
            intervention_per_1000: round_one_decimal(intervention_survivors / 1000.0),
        }
    }
}

fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Complete result of one simulation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationResult {
    /// Age the projection started at
    pub start_age: u8,

    /// Remaining life expectancy without intervention (years)
    pub personal_life_expectancy: f64,

    /// Remaining life expectancy of a healthy age/sex-matched peer (years)
    pub reference_life_expectancy: f64,

    /// Remaining life expectancy after H. pylori eradication (years)
    pub intervention_life_expectancy: f64,

    /// Expected gain from eradication, in days
    pub gain_days: f64,

    /// Survival curve samples for charting
    pub survival_samples: Vec<SurvivalSample>,

    /// Number of simulated years
    pub years_simulated: u32,

    /// Whether the baseline cohort fell below the termination threshold
    /// before reaching the age ceiling
    pub terminated_early: bool,

    /// Per-year trace, populated when detailed output is enabled
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub rows: Vec<CohortRow>,
}

impl SimulationResult {
    /// Gain from eradication in years
    pub fn gain_years(&self) -> f64 {
        self.intervention_life_expectancy - self.personal_life_expectancy
    }

    /// Derived figures for the life-expectancy display
    pub fn summary(&self) -> LifeExpectancySummary {
        let percent_of_reference = if self.reference_life_expectancy > 0.0 {
            (self.personal_life_expectancy / self.reference_life_expectancy * 100.0).min(100.0)
        } else {
            0.0
        };

        LifeExpectancySummary {
            personal_life_expectancy: self.personal_life_expectancy,
            reference_life_expectancy: self.reference_life_expectancy,
            expected_age_at_death: self.start_age as f64 + self.personal_life_expectancy,
            years_lost_to_comorbidity: self.reference_life_expectancy - self.personal_life_expectancy,
            percent_of_reference,
            is_limited: self.personal_life_expectancy < LIMITED_LIFE_EXPECTANCY_YEARS,
            gain_days: self.gain_days,
        }
    }
}

/// Life expectancy below which most screening guidelines consider stopping
pub const LIMITED_LIFE_EXPECTANCY_YEARS: f64 = 10.0;

/// Summary statistics for a simulation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LifeExpectancySummary {
    pub personal_life_expectancy: f64,
    pub reference_life_expectancy: f64,
    pub expected_age_at_death: f64,
    pub years_lost_to_comorbidity: f64,
    /// Personal expectancy as a share of the reference, capped at 100
    pub percent_of_reference: f64,
    /// Personal expectancy under ten years
    pub is_limited: bool,
    pub gain_days: f64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn result(personal: f64, reference: f64) -> SimulationResult {
        SimulationResult {
            start_age: 70,
            personal_life_expectancy: personal,
            reference_life_expectancy: reference,
            intervention_life_expectancy: personal + 0.5,
            gain_days: 0.5 * 365.25,
            survival_samples: Vec::new(),
            years_simulated: 35,
            terminated_early: false,
            rows: Vec::new(),
        }
    }

    #[test]
    fn test_sample_rounding() {
        let sample = SurvivalSample::new(80, 76_049.9, 77_450.0);
        assert_eq!(sample.baseline_per_1000, 76.0);
        assert_eq!(sample.intervention_per_1000, 77.5);

        let start = SurvivalSample::new(75, 100_000.0, 100_000.0);
        assert_eq!(start.baseline_per_1000, 100.0);
    }

    #[test]
    fn test_summary_with_comorbidity() {
        let summary = result(12.0, 15.0).summary();
        assert_abs_diff_eq!(summary.expected_age_at_death, 82.0, epsilon = 1e-12);
        assert_abs_diff_eq!(summary.years_lost_to_comorbidity, 3.0, epsilon = 1e-12);
        assert_abs_diff_eq!(summary.percent_of_reference, 80.0, epsilon = 1e-9);
        assert!(!summary.is_limited);
    }

    #[test]
    fn test_summary_caps_percentage_and_flags_limited() {
        let summary = result(9.5, 9.0).summary();
        assert_eq!(summary.percent_of_reference, 100.0);
        assert!(summary.is_limited);
    }

    #[test]
    fn test_gain_years() {
        assert_abs_diff_eq!(result(10.0, 12.0).gain_years(), 0.5, epsilon = 1e-12);
    }

    #[test]
    fn test_rows_skipped_when_empty() {
        let json = serde_json::to_value(result(10.0, 12.0)).unwrap();
        assert!(json.get("rows").is_none());
        assert_eq!(json["start_age"], 70);
    }
}
