//! CSV-based assumption loader
//!
//! Loads hazard model overrides from CSV files in data/assumptions/.
//! Every file is optional; rows that are absent keep the built-in values.

use std::fs::File;
use std::path::Path;

use super::hazard::{HazardModel, SexParameters};
use crate::error::{ModelError, Result};
use crate::profile::{ComorbidityLevel, Sex};

/// Default path to assumptions directory
pub const DEFAULT_ASSUMPTIONS_PATH: &str = "data/assumptions";

pub const HAZARD_PARAMETERS_FILE: &str = "hazard_parameters.csv";
pub const HAZARD_RATIOS_FILE: &str = "comorbidity_hazard_ratios.csv";
pub const INTERVENTION_FILE: &str = "intervention.csv";

fn parse_field<T: std::str::FromStr>(file: &str, field: &str) -> Result<T>
where
    T::Err: std::fmt::Display,
{
    field.trim().parse().map_err(|e: T::Err| ModelError::Parse {
        file: file.to_string(),
        message: format!("'{}': {}", field, e),
    })
}

fn column<'r>(file: &str, record: &'r csv::StringRecord, index: usize) -> Result<&'r str> {
    record.get(index).ok_or_else(|| ModelError::Parse {
        file: file.to_string(),
        message: format!("expected at least {} columns, found {}", index + 1, record.len()),
    })
}

fn open_optional(path: &Path, name: &str) -> Result<Option<csv::Reader<File>>> {
    let full = path.join(name);
    if !full.exists() {
        log::warn!("{} not found, keeping built-in values", full.display());
        return Ok(None);
    }
    Ok(Some(csv::Reader::from_reader(File::open(full)?)))
}

/// Load per-sex curve parameters: Sex,a,b,c
pub fn load_hazard_parameters(path: &Path) -> Result<Vec<(Sex, SexParameters)>> {
    let Some(mut reader) = open_optional(path, HAZARD_PARAMETERS_FILE)? else {
        return Ok(Vec::new());
    };

    let mut params = Vec::new();
    for result in reader.records() {
        let record = result?;
        let sex: Sex = column(HAZARD_PARAMETERS_FILE, &record, 0)?.parse()?;
        let a: f64 = parse_field(HAZARD_PARAMETERS_FILE, column(HAZARD_PARAMETERS_FILE, &record, 1)?)?;
        let b: f64 = parse_field(HAZARD_PARAMETERS_FILE, column(HAZARD_PARAMETERS_FILE, &record, 2)?)?;
        let c: f64 = parse_field(HAZARD_PARAMETERS_FILE, column(HAZARD_PARAMETERS_FILE, &record, 3)?)?;
        params.push((sex, SexParameters { a, b, c }));
    }

    Ok(params)
}

/// Load comorbidity hazard ratios: Level,HazardRatio
pub fn load_hazard_ratios(path: &Path) -> Result<Vec<(ComorbidityLevel, f64)>> {
    let Some(mut reader) = open_optional(path, HAZARD_RATIOS_FILE)? else {
        return Ok(Vec::new());
    };

    let mut ratios = Vec::new();
    for result in reader.records() {
        let record = result?;
        let level: ComorbidityLevel = column(HAZARD_RATIOS_FILE, &record, 0)?.parse()?;
        let ratio: f64 = parse_field(HAZARD_RATIOS_FILE, column(HAZARD_RATIOS_FILE, &record, 1)?)?;
        ratios.push((level, ratio));
    }

    Ok(ratios)
}

/// Load the eradication relative risk: Intervention,RelativeRisk
///
/// Only the `eradication` row is read; the last one wins.
pub fn load_eradication_relative_risk(path: &Path) -> Result<Option<f64>> {
    let Some(mut reader) = open_optional(path, INTERVENTION_FILE)? else {
        return Ok(None);
    };

    let mut relative_risk = None;
    for result in reader.records() {
        let record = result?;
        let name = column(INTERVENTION_FILE, &record, 0)?;
        if name.trim().eq_ignore_ascii_case("eradication") {
            relative_risk = Some(parse_field(INTERVENTION_FILE, column(INTERVENTION_FILE, &record, 1)?)?);
        } else {
            log::warn!("Ignoring unknown intervention '{}'", name);
        }
    }

    Ok(relative_risk)
}

/// Raw contents of an assumptions directory
#[derive(Debug, Clone, Default)]
pub struct LoadedAssumptions {
    pub hazard_parameters: Vec<(Sex, SexParameters)>,
    pub hazard_ratios: Vec<(ComorbidityLevel, f64)>,
    pub eradication_relative_risk: Option<f64>,
}

impl LoadedAssumptions {
    /// Load all assumptions from the default path
    pub fn load_default() -> Result<Self> {
        Self::load_from(Path::new(DEFAULT_ASSUMPTIONS_PATH))
    }

    /// Load all assumptions from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.is_dir() {
            return Err(ModelError::invalid_input(format!(
                "assumptions directory {} does not exist",
                path.display()
            )));
        }

        Ok(Self {
            hazard_parameters: load_hazard_parameters(path)?,
            hazard_ratios: load_hazard_ratios(path)?,
            eradication_relative_risk: load_eradication_relative_risk(path)?,
        })
    }

    /// Overlay the loaded rows onto `base` and check the result is usable
    pub fn apply_to(&self, base: HazardModel) -> Result<HazardModel> {
        let mut model = base;

        for &(sex, params) in &self.hazard_parameters {
            *model.parameters_mut(sex) = params;
        }
        for &(level, ratio) in &self.hazard_ratios {
            model.hazard_ratios.set(level, ratio);
        }
        if let Some(rr) = self.eradication_relative_risk {
            model.eradication_relative_risk = rr;
        }

        validate(&model)?;
        Ok(model)
    }
}

/// Reject parameter sets that would break the cohort invariants
///
/// Hazard ratios below 1 could pull the all-cause hazard under the gastric
/// term, leaving the eradication cohort worse off than the baseline.
fn validate(model: &HazardModel) -> Result<()> {
    for sex in [Sex::Male, Sex::Female] {
        let p = model.parameters(sex);
        if [p.a, p.b, p.c].iter().any(|v| !v.is_finite() || *v < 0.0) {
            return Err(ModelError::invalid_input(format!(
                "{} hazard parameters must be finite and non-negative",
                sex
            )));
        }
    }

    for level in ComorbidityLevel::ALL {
        let ratio = model.hazard_ratios.get(level);
        if !ratio.is_finite() || ratio < 1.0 {
            return Err(ModelError::invalid_input(format!(
                "hazard ratio for {} must be finite and at least 1",
                level
            )));
        }
    }

    let rr = model.eradication_relative_risk;
    if !(0.0..=1.0).contains(&rr) {
        return Err(ModelError::invalid_input(format!(
            "eradication relative risk {} must lie in [0, 1]",
            rr
        )));
    }

    Ok(())
}
