//! Screening rule table
//!
//! Evaluation order:
//! 1. Severe comorbidity or life expectancy under 5 years: not recommended,
//!    regardless of cancer type.
//! 2. Per-type age/sex/smoking bands, first matching branch wins.
//! 3. Under 10 years of life expectancy, a remaining `Recommended` is
//!    downgraded to `SharedDecision` with a cautionary note. Other statuses
//!    are left as the band logic produced them.

use super::types::{CancerType, GuidanceMap, GuidanceResult, GuidanceStatus};
use crate::profile::{ComorbidityLevel, Sex, SubjectProfile};
use crate::projection::LIMITED_LIFE_EXPECTANCY_YEARS;

use super::types::GuidanceStatus::{NotRecommended, Recommended, SharedDecision};

/// Below this life expectancy no screening is recommended
pub const SHORT_LIFE_EXPECTANCY_YEARS: f64 = 5.0;

const NOT_APPLICABLE: &str = "Not applicable: female-only screening.";
const LIMITED_EXPECTANCY_NOTE: &str =
    " (Note: life expectancy is under 10 years; weigh this decision carefully.)";

type Branch = (GuidanceStatus, &'static str);

/// Recommendation for one cancer type
pub fn evaluate_screening(
    cancer_type: CancerType,
    age: u8,
    sex: Sex,
    comorbidity: ComorbidityLevel,
    is_smoker: bool,
    life_expectancy: f64,
) -> GuidanceResult {
    if comorbidity == ComorbidityLevel::Severe || life_expectancy < SHORT_LIFE_EXPECTANCY_YEARS {
        return GuidanceResult::new(
            NotRecommended,
            format!(
                "Life expectancy is short ({:.1} years), so the burden of screening outweighs \
                 its benefit. Prioritize symptomatic and palliative care.",
                life_expectancy
            ),
        );
    }

    let limited = life_expectancy < LIMITED_LIFE_EXPECTANCY_YEARS;
    let (status, message) = match cancer_type {
        CancerType::Gastric => gastric(age, limited),
        CancerType::Colorectal => colorectal(age, limited),
        CancerType::Lung => lung(age, is_smoker, limited),
        CancerType::Breast => breast(age, sex, limited),
        CancerType::Cervical => cervical(age, sex),
    };

    if limited && status == Recommended {
        return GuidanceResult::new(SharedDecision, format!("{}{}", message, LIMITED_EXPECTANCY_NOTE));
    }
    GuidanceResult::new(status, message)
}

/// Guidance for every cancer type, using the profile's own inputs
pub fn evaluate_all(profile: &SubjectProfile, life_expectancy: f64) -> GuidanceMap {
    let eval = |cancer_type| {
        evaluate_screening(
            cancer_type,
            profile.age,
            profile.sex,
            profile.comorbidity,
            profile.is_smoker,
            life_expectancy,
        )
    };

    GuidanceMap {
        gastric: eval(CancerType::Gastric),
        colorectal: eval(CancerType::Colorectal),
        lung: eval(CancerType::Lung),
        breast: eval(CancerType::Breast),
        cervical: eval(CancerType::Cervical),
    }
}

fn gastric(age: u8, limited: bool) -> Branch {
    if age < 50 {
        (Recommended, "Test for H. pylori infection and eradicate if positive.")
    } else if age <= 74 && !limited {
        (Recommended, "Within the recommended age range; eradication is expected to extend life expectancy.")
    } else if age <= 79 {
        (SharedDecision, "The life-expectancy benefit of eradication declines after 75; decide individually.")
    } else {
        (NotRecommended, "Benefit is limited at 80 or older, or with under 10 years of life expectancy.")
    }
}

fn colorectal(age: u8, limited: bool) -> Branch {
    if age < 40 {
        (NotRecommended, "Not eligible under 40 (unless there is a family history).")
    } else if age <= 75 && !limited {
        (Recommended, "Fecal occult blood testing is strongly recommended up to age 75.")
    } else if age <= 85 && !limited {
        (SharedDecision, "Ages 76-85: decide according to overall health.")
    } else {
        (NotRecommended, "Not recommended at 86 or older, or with under 10 years of life expectancy.")
    }
}

fn lung(age: u8, is_smoker: bool, limited: bool) -> Branch {
    if !is_smoker {
        (NotRecommended, "Low-dose CT screening has little support for non-smokers.")
    } else if (50..=80).contains(&age) && !limited {
        (Recommended, "Low-dose CT is recommended for the high-risk (smoking) group.")
    } else {
        (NotRecommended, "Outside the eligible range or life expectancy does not support screening.")
    }
}

fn breast(age: u8, sex: Sex, limited: bool) -> Branch {
    if !sex.is_female() {
        (NotRecommended, NOT_APPLICABLE)
    } else if (40..=74).contains(&age) && !limited {
        (Recommended, "Within the recommended age range (mammography).")
    } else if age >= 75 && !limited {
        (SharedDecision, "Evidence is insufficient at 75 or older; consider if life expectancy is 10 years or more.")
    } else {
        (NotRecommended, "Outside the eligible range or under 10 years of life expectancy.")
    }
}

fn cervical(age: u8, sex: Sex) -> Branch {
    if !sex.is_female() {
        (NotRecommended, NOT_APPLICABLE)
    } else if (20..=65).contains(&age) {
        (Recommended, "Within the recommended age range (cytology / HPV testing).")
    } else {
        (NotRecommended, "Screening may stop after 65 with an adequate negative history.")
    }
}
