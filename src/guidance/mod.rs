//! Cancer-screening guidance derived from age, sex, comorbidity, smoking
//! status and computed life expectancy

mod types;
mod rules;

pub use types::{CancerType, GuidanceMap, GuidanceResult, GuidanceStatus};
pub use rules::{evaluate_all, evaluate_screening, SHORT_LIFE_EXPECTANCY_YEARS};
