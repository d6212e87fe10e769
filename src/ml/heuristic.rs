//! Fixed linear risk score used when no model artifact is available.
//!
//! Not a statistical model: a placeholder over four of the eleven fields,
//! kept bit-for-bit stable so demo-mode numbers never drift.

use serde::Serialize;

use crate::domain::{PatientRecord, RiskLevel, Sex};

const HIGH_ABOVE: f64 = 0.6;
const MEDIUM_ABOVE: f64 = 0.3;
const MALE_WEIGHT: f64 = 0.2;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FallbackAssessment {
    pub score: f64,
    pub level: RiskLevel,
}

/// `(Age/100 + 0.2·[Sex=M] + RestingBP/300 + Cholesterol/400) / 4`
pub fn fallback_score(record: &PatientRecord) -> f64 {
    let male = if record.sex == Sex::Male { 1.0 } else { 0.0 };
    (f64::from(record.age) / 100.0
        + male * MALE_WEIGHT
        + f64::from(record.resting_bp) / 300.0
        + f64::from(record.cholesterol) / 400.0)
        / 4.0
}

/// Band a heuristic score: > 0.6 high, (0.3, 0.6] medium, <= 0.3 low.
pub fn level_for_score(score: f64) -> RiskLevel {
    if score > HIGH_ABOVE {
        RiskLevel::High
    } else if score > MEDIUM_ABOVE {
        RiskLevel::Medium
    } else {
        RiskLevel::Low
    }
}

pub fn fallback_heuristic(record: &PatientRecord) -> FallbackAssessment {
    let score = fallback_score(record);
    FallbackAssessment {
        score,
        level: level_for_score(score),
    }
}
