//! Mortality assumptions: parametric hazard curves, comorbidity ratios and the
//! eradication effect

mod hazard;
pub mod loader;

pub use hazard::{
    ComorbidityHazardRatios, GastricHazardShape, HazardModel, SexParameters, MAX_ANNUAL_HAZARD,
};
pub use loader::LoadedAssumptions;

use crate::error::Result;
use std::path::Path;

/// Container for all simulation assumptions
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Assumptions {
    pub hazard: HazardModel,
}

impl Assumptions {
    /// Built-in parameter set
    pub fn default_parameters() -> Self {
        Self { hazard: HazardModel::DEFAULT }
    }

    /// Load assumptions from CSV files in the default location (data/assumptions/)
    pub fn from_csv() -> Result<Self> {
        Self::from_loaded(LoadedAssumptions::load_default()?)
    }

    /// Load assumptions from CSV files in a specific directory
    pub fn from_csv_path(path: &Path) -> Result<Self> {
        Self::from_loaded(LoadedAssumptions::load_from(path)?)
    }

    fn from_loaded(loaded: LoadedAssumptions) -> Result<Self> {
        Ok(Self {
            hazard: loaded.apply_to(HazardModel::DEFAULT)?,
        })
    }
}
