use serde::{Deserialize, Serialize};
use std::fmt;

/// Binary model output: 1 = high risk, 0 = low risk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum Label {
    LowRisk,
    HighRisk,
}

impl Label {
    /// Threshold the positive-class probability.
    pub fn from_probability(p_high: f64, threshold: f64) -> Self {
        if p_high >= threshold {
            Label::HighRisk
        } else {
            Label::LowRisk
        }
    }

    pub fn as_u8(&self) -> u8 {
        match self {
            Label::LowRisk => 0,
            Label::HighRisk => 1,
        }
    }
}

impl From<Label> for u8 {
    fn from(label: Label) -> Self {
        label.as_u8()
    }
}

impl TryFrom<u8> for Label {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Label::LowRisk),
            1 => Ok(Label::HighRisk),
            other => Err(format!("label must be 0 or 1, got {other}")),
        }
    }
}

/// Displayed risk band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "low risk",
            RiskLevel::Medium => "medium risk",
            RiskLevel::High => "high risk",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
