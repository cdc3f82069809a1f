//! Cohort life-table projection

mod state;
mod engine;
mod life_table;

pub use state::{Cohort, CohortState, DeathProbabilities, YearTransition};
pub use engine::{
    CohortSimulator, SimulationConfig, DAYS_PER_YEAR, DEFAULT_COHORT_SIZE, DEFAULT_MAX_AGE,
    DEFAULT_SAMPLE_STRIDE, DEFAULT_TERMINATION_THRESHOLD,
};
pub use life_table::{
    CohortRow, LifeExpectancySummary, SimulationResult, SurvivalSample,
    LIMITED_LIFE_EXPECTANCY_YEARS,
};
