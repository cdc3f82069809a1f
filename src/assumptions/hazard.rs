//! Parametric mortality hazards
//!
//! All-cause mortality follows a Gompertz-Makeham style curve per sex:
//! `qx = a * exp(b * age) + c`, scaled by a comorbidity hazard ratio and
//! capped at 0.99. The gastric-cancer component uses the same `a` and `b`
//! (without `c`) to bound itself at a fraction of the age-driven hazard, so
//! both hazards always read one shared parameter set per sex.

use crate::profile::{ComorbidityLevel, Sex};

/// Upper bound on any annual death probability
pub const MAX_ANNUAL_HAZARD: f64 = 0.99;

/// Exponential mortality curve parameters for one sex
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SexParameters {
    /// Scale of the age-driven term
    pub a: f64,
    /// Exponential growth rate per year of age
    pub b: f64,
    /// Age-independent background hazard
    pub c: f64,
}

impl SexParameters {
    pub const MALE: SexParameters = SexParameters { a: 0.00005, b: 0.085, c: 0.0005 };
    pub const FEMALE: SexParameters = SexParameters { a: 0.00003, b: 0.090, c: 0.0002 };

    /// Age-driven term `a * exp(b * age)`
    pub fn base_qx(&self, age: f64) -> f64 {
        self.a * (self.b * age).exp()
    }

    /// Unadjusted all-cause hazard before comorbidity and capping
    pub fn raw_qx(&self, age: f64) -> f64 {
        self.base_qx(age) + self.c
    }
}

/// Hazard ratio applied to all-cause mortality by comorbidity level
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ComorbidityHazardRatios {
    pub none: f64,
    pub mild: f64,
    pub severe: f64,
}

impl ComorbidityHazardRatios {
    pub const DEFAULT: ComorbidityHazardRatios =
        ComorbidityHazardRatios { none: 1.0, mild: 1.5, severe: 3.0 };

    pub fn get(&self, level: ComorbidityLevel) -> f64 {
        match level {
            ComorbidityLevel::None => self.none,
            ComorbidityLevel::Mild => self.mild,
            ComorbidityLevel::Severe => self.severe,
        }
    }

    pub fn set(&mut self, level: ComorbidityLevel, ratio: f64) {
        match level {
            ComorbidityLevel::None => self.none = ratio,
            ComorbidityLevel::Mild => self.mild = ratio,
            ComorbidityLevel::Severe => self.severe = ratio,
        }
    }
}

/// Shape of the gastric-cancer-specific hazard
///
/// `hazard = coefficient * max(0, age - onset_age)^exponent * sex_factor`,
/// capped at `cap_fraction * base_qx(age)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GastricHazardShape {
    pub coefficient: f64,
    pub onset_age: f64,
    pub exponent: f64,
    pub male_risk_factor: f64,
    pub female_risk_factor: f64,
    pub cap_fraction: f64,
}

impl GastricHazardShape {
    pub const DEFAULT: GastricHazardShape = GastricHazardShape {
        coefficient: 0.00001,
        onset_age: 35.0,
        exponent: 2.5,
        male_risk_factor: 1.0,
        female_risk_factor: 0.5,
        cap_fraction: 0.15,
    };

    fn risk_factor(&self, sex: Sex) -> f64 {
        match sex {
            Sex::Male => self.male_risk_factor,
            Sex::Female => self.female_risk_factor,
        }
    }
}

/// Complete hazard model: per-sex curves, comorbidity ratios, gastric shape
/// and the eradication relative risk
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HazardModel {
    pub male: SexParameters,
    pub female: SexParameters,
    pub hazard_ratios: ComorbidityHazardRatios,
    pub gastric: GastricHazardShape,
    /// Relative risk of gastric-cancer death after H. pylori eradication
    pub eradication_relative_risk: f64,
}

impl HazardModel {
    pub const DEFAULT: HazardModel = HazardModel {
        male: SexParameters::MALE,
        female: SexParameters::FEMALE,
        hazard_ratios: ComorbidityHazardRatios::DEFAULT,
        gastric: GastricHazardShape::DEFAULT,
        eradication_relative_risk: 0.33,
    };

    pub fn parameters(&self, sex: Sex) -> &SexParameters {
        match sex {
            Sex::Male => &self.male,
            Sex::Female => &self.female,
        }
    }

    pub fn parameters_mut(&mut self, sex: Sex) -> &mut SexParameters {
        match sex {
            Sex::Male => &mut self.male,
            Sex::Female => &mut self.female,
        }
    }

    /// Age-driven all-cause term `a * exp(b * age)`
    pub fn baseline_hazard(&self, age: u8, sex: Sex) -> f64 {
        self.parameters(sex).base_qx(age as f64)
    }

    /// Annual all-cause death probability, in [0, 0.99]
    pub fn total_mortality_hazard(&self, age: u8, sex: Sex, comorbidity: ComorbidityLevel) -> f64 {
        let qx = self.parameters(sex).raw_qx(age as f64) * self.hazard_ratios.get(comorbidity);
        qx.clamp(0.0, MAX_ANNUAL_HAZARD)
    }

    /// Annual gastric-cancer death probability
    ///
    /// Zero up to the onset age; never more than `cap_fraction` of the
    /// age-driven all-cause term.
    pub fn gastric_cancer_hazard(&self, age: u8, sex: Sex) -> f64 {
        let shape = &self.gastric;
        let base_qx = self.baseline_hazard(age, sex);
        let years_past_onset = (age as f64 - shape.onset_age).max(0.0);
        let hazard = shape.coefficient * years_past_onset.powf(shape.exponent) * shape.risk_factor(sex);
        hazard.min(base_qx * shape.cap_fraction)
    }

    /// Non-gastric residual of the all-cause hazard, floored at zero
    pub fn other_cause_hazard(&self, age: u8, sex: Sex, comorbidity: ComorbidityLevel) -> f64 {
        (self.total_mortality_hazard(age, sex, comorbidity) - self.gastric_cancer_hazard(age, sex)).max(0.0)
    }

    /// Annual death probability after eradication: only the gastric term is scaled
    pub fn intervention_hazard(&self, age: u8, sex: Sex, comorbidity: ComorbidityLevel) -> f64 {
        self.other_cause_hazard(age, sex, comorbidity)
            + self.gastric_cancer_hazard(age, sex) * self.eradication_relative_risk
    }
}

impl Default for HazardModel {
    fn default() -> Self {
        Self::DEFAULT
    }
}
