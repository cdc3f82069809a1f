//! Screening guidance types

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{ModelError, Result};

/// Cancer types covered by the guidance engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CancerType {
    Gastric,
    Colorectal,
    Lung,
    Breast,
    Cervical,
}

impl CancerType {
    /// Fixed evaluation and display order
    pub const ALL: [CancerType; 5] = [
        CancerType::Gastric,
        CancerType::Colorectal,
        CancerType::Lung,
        CancerType::Breast,
        CancerType::Cervical,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CancerType::Gastric => "gastric",
            CancerType::Colorectal => "colorectal",
            CancerType::Lung => "lung",
            CancerType::Breast => "breast",
            CancerType::Cervical => "cervical",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            CancerType::Gastric => "Gastric cancer",
            CancerType::Colorectal => "Colorectal cancer",
            CancerType::Lung => "Lung cancer",
            CancerType::Breast => "Breast cancer",
            CancerType::Cervical => "Cervical cancer",
        }
    }
}

impl fmt::Display for CancerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CancerType {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self> {
        let lowered = s.trim().to_ascii_lowercase();
        CancerType::ALL
            .into_iter()
            .find(|t| t.as_str() == lowered)
            .ok_or_else(|| ModelError::invalid_input(format!("unknown cancer type: {}", s.trim())))
    }
}

/// Three-valued recommendation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GuidanceStatus {
    #[serde(rename = "recommended")]
    Recommended,
    /// Benefit is ambiguous; decide jointly with the clinician
    #[serde(rename = "shared")]
    SharedDecision,
    #[serde(rename = "not_recommended")]
    NotRecommended,
}

impl GuidanceStatus {
    /// Short badge label
    pub fn label(&self) -> &'static str {
        match self {
            GuidanceStatus::Recommended => "Rec",
            GuidanceStatus::SharedDecision => "Shared",
            GuidanceStatus::NotRecommended => "Not Rec",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GuidanceStatus::Recommended => "recommended",
            GuidanceStatus::SharedDecision => "shared",
            GuidanceStatus::NotRecommended => "not_recommended",
        }
    }
}

impl fmt::Display for GuidanceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Recommendation for one cancer type, with a free-text rationale
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GuidanceResult {
    pub status: GuidanceStatus,
    pub message: String,
}

impl GuidanceResult {
    pub fn new(status: GuidanceStatus, message: impl Into<String>) -> Self {
        Self { status, message: message.into() }
    }
}

/// Guidance for all five cancer types
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GuidanceMap {
    pub gastric: GuidanceResult,
    pub colorectal: GuidanceResult,
    pub lung: GuidanceResult,
    pub breast: GuidanceResult,
    pub cervical: GuidanceResult,
}

impl GuidanceMap {
    pub fn get(&self, cancer_type: CancerType) -> &GuidanceResult {
        match cancer_type {
            CancerType::Gastric => &self.gastric,
            CancerType::Colorectal => &self.colorectal,
            CancerType::Lung => &self.lung,
            CancerType::Breast => &self.breast,
            CancerType::Cervical => &self.cervical,
        }
    }

    /// Entries in the fixed order gastric, colorectal, lung, breast, cervical
    pub fn iter(&self) -> impl Iterator<Item = (CancerType, &GuidanceResult)> + '_ {
        CancerType::ALL.into_iter().map(move |t| (t, self.get(t)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cancer_type_parse() {
        assert_eq!("Lung".parse::<CancerType>().unwrap(), CancerType::Lung);
        assert_eq!(" cervical".parse::<CancerType>().unwrap(), CancerType::Cervical);
        assert!("prostate".parse::<CancerType>().unwrap_err().is_invalid_input());
    }

    #[test]
    fn test_status_serde_tokens() {
        let json = serde_json::to_string(&GuidanceStatus::SharedDecision).unwrap();
        assert_eq!(json, "\"shared\"");
        let parsed: GuidanceStatus = serde_json::from_str("\"not_recommended\"").unwrap();
        assert_eq!(parsed, GuidanceStatus::NotRecommended);
        assert_eq!(GuidanceStatus::NotRecommended.label(), "Not Rec");
    }
}
