//! Load subject profiles from CSV for batch assessment

use super::{ComorbidityLevel, Sex, SubjectProfile};
use crate::error::{ModelError, Result};
use csv::Reader;
use std::path::Path;

/// Raw CSV row: Age,Sex,Comorbidity,Smoker
#[derive(Debug, serde::Deserialize)]
struct CsvRow {
    #[serde(rename = "Age")]
    age: u8,
    #[serde(rename = "Sex")]
    sex: String,
    #[serde(rename = "Comorbidity")]
    comorbidity: String,
    #[serde(rename = "Smoker", default)]
    smoker: String,
}

impl CsvRow {
    fn to_profile(self) -> Result<SubjectProfile> {
        let sex: Sex = self.sex.parse()?;
        let comorbidity: ComorbidityLevel = self.comorbidity.parse()?;
        let is_smoker = parse_flag(&self.smoker)?;
        SubjectProfile::new(self.age, sex, comorbidity, is_smoker)
    }
}

fn parse_flag(value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "" | "0" | "false" | "no" | "n" => Ok(false),
        "1" | "true" | "yes" | "y" => Ok(true),
        other => Err(ModelError::invalid_input(format!("unknown smoker flag: {}", other))),
    }
}

/// Load all profiles from a CSV file
pub fn load_profiles<P: AsRef<Path>>(path: P) -> Result<Vec<SubjectProfile>> {
    let reader = Reader::from_path(path)?;
    read_profiles(reader)
}

/// Load profiles from any reader (e.g. string buffer, request body)
pub fn load_profiles_from_reader<R: std::io::Read>(reader: R) -> Result<Vec<SubjectProfile>> {
    read_profiles(Reader::from_reader(reader))
}

fn read_profiles<R: std::io::Read>(mut reader: Reader<R>) -> Result<Vec<SubjectProfile>> {
    let mut profiles = Vec::new();

    for (line, result) in reader.deserialize().enumerate() {
        let row: CsvRow = result?;
        let profile = row.to_profile().map_err(|e| match e {
            ModelError::InvalidInput(msg) => {
                ModelError::InvalidInput(format!("row {}: {}", line + 1, msg))
            }
            other => other,
        })?;
        profiles.push(profile);
    }

    log::debug!("Loaded {} subject profiles", profiles.len());
    Ok(profiles)
}
