//! Cohort state tracking during a life-table projection

/// One hypothetical cohort being depleted year by year
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cohort {
    /// Survivors at the start of the current year
    pub survivors: f64,

    /// Person-years lived so far (area under the survival curve)
    pub life_years: f64,
}

impl Cohort {
    pub fn new(size: f64) -> Self {
        Self { survivors: size, life_years: 0.0 }
    }

    /// Apply one year at the given death probability
    ///
    /// Deaths are assumed uniform over the year, so the year contributes the
    /// trapezoid `(before + after) / 2` person-years. Returns the survivor
    /// counts before and after the step.
    pub fn step(&mut self, death_probability: f64) -> (f64, f64) {
        let before = self.survivors;
        let deaths = before * death_probability;
        let after = before - deaths;

        self.life_years += (before + after) / 2.0;
        self.survivors = after;
        (before, after)
    }

    /// Expected years lived per initial member
    pub fn life_expectancy(&self, initial_size: f64) -> f64 {
        self.life_years / initial_size
    }
}

/// Annual death probabilities for the three parallel cohorts
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DeathProbabilities {
    pub baseline: f64,
    pub intervention: f64,
    pub reference: f64,
}

/// State of all three cohorts at a point in the projection
#[derive(Debug, Clone)]
pub struct CohortState {
    /// Age at the start of the current year
    pub age: u8,

    /// Personal cohort, no intervention
    pub baseline: Cohort,

    /// Personal cohort after H. pylori eradication
    pub intervention: Cohort,

    /// Healthy age/sex-matched peers
    pub reference: Cohort,
}

impl CohortState {
    pub fn new(start_age: u8, cohort_size: f64) -> Self {
        Self {
            age: start_age,
            baseline: Cohort::new(cohort_size),
            intervention: Cohort::new(cohort_size),
            reference: Cohort::new(cohort_size),
        }
    }

    /// Step all three cohorts through the current year
    pub fn apply_year(&mut self, probs: &DeathProbabilities) -> YearTransition {
        YearTransition {
            baseline: self.baseline.step(probs.baseline),
            intervention: self.intervention.step(probs.intervention),
            reference: self.reference.step(probs.reference),
        }
    }

    /// Move to the next year of age
    pub fn advance_year(&mut self) {
        self.age = self.age.saturating_add(1);
    }
}

/// Survivor counts (before, after) for each cohort over one year
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct YearTransition {
    pub baseline: (f64, f64),
    pub intervention: (f64, f64),
    pub reference: (f64, f64),
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_cohort_step_trapezoid() {
        let mut cohort = Cohort::new(100_000.0);
        let (before, after) = cohort.step(0.1);

        assert_eq!(before, 100_000.0);
        assert_abs_diff_eq!(after, 90_000.0, epsilon = 1e-9);
        assert_abs_diff_eq!(cohort.life_years, 95_000.0, epsilon = 1e-9);
        assert_abs_diff_eq!(cohort.life_expectancy(100_000.0), 0.95, epsilon = 1e-12);
    }

    #[test]
    fn test_zero_hazard_keeps_everyone() {
        let mut cohort = Cohort::new(1_000.0);
        for _ in 0..10 {
            cohort.step(0.0);
        }
        assert_eq!(cohort.survivors, 1_000.0);
        assert_abs_diff_eq!(cohort.life_expectancy(1_000.0), 10.0, epsilon = 1e-12);
    }

    #[test]
    fn test_apply_year_steps_each_cohort() {
        let mut state = CohortState::new(60, 100_000.0);
        let transition = state.apply_year(&DeathProbabilities {
            baseline: 0.02,
            intervention: 0.015,
            reference: 0.01,
        });
        state.advance_year();

        assert_eq!(state.age, 61);
        assert_abs_diff_eq!(transition.baseline.1, 98_000.0, epsilon = 1e-9);
        assert_abs_diff_eq!(transition.intervention.1, 98_500.0, epsilon = 1e-9);
        assert_abs_diff_eq!(transition.reference.1, 99_000.0, epsilon = 1e-9);
        assert_eq!(state.baseline.survivors, transition.baseline.1);
    }
}
