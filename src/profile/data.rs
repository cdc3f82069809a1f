//! Subject profile data structures

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{ModelError, Result};
use crate::projection::DEFAULT_MAX_AGE;

/// Sex of the subject, selecting the mortality parameter set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sex {
    Male,
    Female,
}

impl Sex {
    pub fn as_str(&self) -> &'static str {
        match self {
            Sex::Male => "Male",
            Sex::Female => "Female",
        }
    }

    pub fn is_female(&self) -> bool {
        matches!(self, Sex::Female)
    }
}

impl fmt::Display for Sex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Sex {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "male" | "m" => Ok(Sex::Male),
            "female" | "f" => Ok(Sex::Female),
            other => Err(ModelError::invalid_input(format!("unknown sex: {}", other))),
        }
    }
}

/// Comorbidity burden, mapped to a hazard ratio by the assumptions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComorbidityLevel {
    /// Healthy
    None,
    /// e.g. hypertension, stable diabetes
    Mild,
    /// e.g. heart failure, dementia, frailty
    Severe,
}

impl ComorbidityLevel {
    pub const ALL: [ComorbidityLevel; 3] =
        [ComorbidityLevel::None, ComorbidityLevel::Mild, ComorbidityLevel::Severe];

    pub fn as_str(&self) -> &'static str {
        match self {
            ComorbidityLevel::None => "none",
            ComorbidityLevel::Mild => "mild",
            ComorbidityLevel::Severe => "severe",
        }
    }
}

impl fmt::Display for ComorbidityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ComorbidityLevel {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "none" => Ok(ComorbidityLevel::None),
            "mild" => Ok(ComorbidityLevel::Mild),
            "severe" => Ok(ComorbidityLevel::Severe),
            other => Err(ModelError::invalid_input(format!("unknown comorbidity level: {}", other))),
        }
    }
}

/// Inputs for one assessment
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SubjectProfile {
    /// Age in whole years
    pub age: u8,

    pub sex: Sex,

    pub comorbidity: ComorbidityLevel,

    /// Smoking history (only consulted for lung screening)
    #[serde(default)]
    pub is_smoker: bool,
}

impl SubjectProfile {
    /// Create a validated profile
    ///
    /// Ages at or beyond the simulation's age ceiling are rejected since no
    /// life-table year could be projected for them.
    pub fn new(age: u8, sex: Sex, comorbidity: ComorbidityLevel, is_smoker: bool) -> Result<Self> {
        let profile = Self { age, sex, comorbidity, is_smoker };
        profile.validate()?;
        Ok(profile)
    }

    pub fn validate(&self) -> Result<()> {
        if self.age >= DEFAULT_MAX_AGE {
            return Err(ModelError::invalid_input(format!(
                "age {} must be below {}",
                self.age, DEFAULT_MAX_AGE
            )));
        }
        Ok(())
    }
}

impl Default for SubjectProfile {
    /// The original tool's opening profile: a 75-year-old man with mild comorbidity
    fn default() -> Self {
        Self {
            age: 75,
            sex: Sex::Male,
            comorbidity: ComorbidityLevel::Mild,
            is_smoker: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_enums() {
        assert_eq!("Male".parse::<Sex>().unwrap(), Sex::Male);
        assert_eq!(" female ".parse::<Sex>().unwrap(), Sex::Female);
        assert_eq!("F".parse::<Sex>().unwrap(), Sex::Female);
        assert_eq!("MILD".parse::<ComorbidityLevel>().unwrap(), ComorbidityLevel::Mild);
        assert_eq!("none".parse::<ComorbidityLevel>().unwrap(), ComorbidityLevel::None);
    }

    #[test]
    fn test_unknown_enum_is_invalid_input() {
        assert!("other".parse::<Sex>().unwrap_err().is_invalid_input());
        assert!("moderate".parse::<ComorbidityLevel>().unwrap_err().is_invalid_input());
    }

    #[test]
    fn test_profile_age_bounds() {
        assert!(SubjectProfile::new(30, Sex::Female, ComorbidityLevel::None, false).is_ok());
        assert!(SubjectProfile::new(104, Sex::Male, ComorbidityLevel::Severe, true).is_ok());

        let err = SubjectProfile::new(105, Sex::Male, ComorbidityLevel::None, false).unwrap_err();
        assert!(err.is_invalid_input());
    }

    #[test]
    fn test_serde_tokens() {
        let json = serde_json::to_string(&SubjectProfile::default()).unwrap();
        assert_eq!(json, r#"{"age":75,"sex":"Male","comorbidity":"mild","is_smoker":false}"#);

        let parsed: SubjectProfile =
            serde_json::from_str(r#"{"age":40,"sex":"Female","comorbidity":"severe"}"#).unwrap();
        assert!(!parsed.is_smoker);
        assert_eq!(parsed.comorbidity, ComorbidityLevel::Severe);
    }
}
