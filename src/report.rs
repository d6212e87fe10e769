//! Text rendering of assessment outcomes.
//!
//! Pure functions of their inputs: the TUI, the CLI and the HTTP surface all
//! render through here so the wording and numbers match everywhere.

use serde::Serialize;

use crate::controller::{InferenceController, InferenceFailure, Outcome};
use crate::domain::{Label, RiskLevel, FIELD_DESCRIPTIONS};
use crate::ml::heuristic::FallbackAssessment;

pub const HIGH_RISK_GUIDANCE: [&str; 4] = [
    "Consult a cardiologist",
    "Get an ECG and a heart ultrasound",
    "Monitor blood pressure and cholesterol",
    "Increase physical activity",
];

pub const LOW_RISK_GUIDANCE: [&str; 3] = [
    "Keep up a healthy lifestyle",
    "Keep monitoring your health indicators",
    "Have regular check-ups",
];

pub const DEMO_MODE_NOTICE: &str = "Demo mode: simplified estimate, no model loaded";

/// Displayable form of a model prediction.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderedResult {
    pub level: RiskLevel,
    pub headline: String,
    pub metric_label: &'static str,
    /// Percentage with one decimal, e.g. `70.0%`.
    pub metric_value: String,
    /// Progress indicator position in [0, 1].
    pub progress: f64,
    pub guidance: Vec<&'static str>,
}

/// Map a model answer to the result panel.
///
/// Label 1 shows the high-risk probability `p[1]`; label 0 shows the
/// confidence in the low-risk class `p[0]`.
pub fn render_result(label: Label, probabilities: [f64; 2]) -> RenderedResult {
    match label {
        Label::HighRisk => RenderedResult {
            level: RiskLevel::High,
            headline: "HIGH RISK of heart disease".to_string(),
            metric_label: "Risk probability",
            metric_value: percent(probabilities[1]),
            progress: probabilities[1],
            guidance: HIGH_RISK_GUIDANCE.to_vec(),
        },
        Label::LowRisk => RenderedResult {
            level: RiskLevel::Low,
            headline: "LOW RISK of heart disease".to_string(),
            metric_label: "Confidence (healthy)",
            metric_value: percent(probabilities[0]),
            progress: probabilities[0],
            guidance: LOW_RISK_GUIDANCE.to_vec(),
        },
    }
}

/// Displayable form of a heuristic estimate.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderedFallback {
    pub notice: &'static str,
    pub level: RiskLevel,
    pub headline: String,
    pub metric_label: &'static str,
    pub metric_value: String,
}

pub fn render_fallback(fallback: &FallbackAssessment) -> RenderedFallback {
    let headline = match fallback.level {
        RiskLevel::High => "High risk",
        RiskLevel::Medium => "Medium risk",
        RiskLevel::Low => "Low risk",
    };
    RenderedFallback {
        notice: DEMO_MODE_NOTICE,
        level: fallback.level,
        headline: headline.to_string(),
        metric_label: "Risk score",
        metric_value: percent(fallback.score),
    }
}

/// Format a probability as a one-decimal percentage.
pub fn percent(p: f64) -> String {
    format!("{:.1}%", p * 100.0)
}

/// Plain-text rendering of any outcome, for the one-shot CLI.
pub fn outcome_text(outcome: &Outcome) -> String {
    let mut lines = Vec::new();
    match outcome {
        Outcome::Ok(prediction) => {
            let r = render_result(prediction.label, prediction.probabilities);
            lines.push(r.headline);
            lines.push(format!("{}: {}", r.metric_label, r.metric_value));
            lines.push(format!("Model confidence: {}", percent(r.progress)));
            lines.push(String::new());
            lines.push(match r.level {
                RiskLevel::High => "Recommended:".to_string(),
                _ => "Keep going:".to_string(),
            });
            lines.extend(r.guidance.iter().map(|g| format!("  - {g}")));
        }
        Outcome::ModelUnavailable(fallback) => {
            let r = render_fallback(fallback);
            lines.push(r.notice.to_string());
            lines.push(r.headline);
            lines.push(format!("{}: {}", r.metric_label, r.metric_value));
        }
        Outcome::InferenceError(failure) => lines.extend(failure_lines(failure)),
    }
    lines.join("\n")
}

/// Error message followed by the sent dtypes and the expected schema.
pub fn failure_lines(failure: &InferenceFailure) -> Vec<String> {
    let mut lines = vec![format!("Prediction error: {}", failure.message), String::new()];
    lines.push("Submitted data:".to_string());
    lines.extend(
        failure
            .dtypes
            .iter()
            .map(|(name, dtype)| format!("  {name:<16}{dtype}")),
    );
    lines.push(String::new());
    lines.push("Expected data types:".to_string());
    lines.extend(
        failure
            .expected_schema
            .iter()
            .map(|(name, ty)| format!("  - {name}: {ty}")),
    );
    lines
}

/// Model info panel content.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModelInfo {
    pub loaded: bool,
    pub kind: Option<&'static str>,
    pub feature_count: usize,
    pub notice: Option<String>,
    pub metadata: Option<serde_json::Value>,
}

impl ModelInfo {
    pub fn from_controller(controller: &InferenceController) -> Self {
        let model = controller.model();
        Self {
            loaded: model.is_some(),
            kind: model.map(|m| m.kind()),
            feature_count: FIELD_DESCRIPTIONS.len(),
            notice: controller.notice().map(str::to_string),
            metadata: model.and_then(|m| m.metadata()),
        }
    }

    pub fn lines(&self) -> Vec<String> {
        let mut lines = Vec::new();
        if self.loaded {
            lines.push("Model loaded and ready".to_string());
            lines.push(format!("Model type: {}", self.kind.unwrap_or("unknown")));
            lines.push(format!("Feature count: {}", self.feature_count));
            if let Some(accuracy) = self
                .metadata
                .as_ref()
                .and_then(|m| m.get("accuracy"))
                .and_then(|a| a.as_f64())
            {
                lines.push(format!("Reported accuracy: {}", percent(accuracy)));
            }
        } else {
            lines.push("Model not loaded".to_string());
            if let Some(notice) = &self.notice {
                lines.push(notice.clone());
            }
        }
        lines.push(String::new());
        lines.push("Features:".to_string());
        lines.extend(
            FIELD_DESCRIPTIONS
                .iter()
                .enumerate()
                .map(|(i, (name, desc))| format!("{:>2}. {name} - {desc}", i + 1)),
        );
        lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::Prediction;
    use crate::ml::artifact::tests::age_sex_artifact;
    use std::sync::Arc;

    #[test]
    fn high_risk_shows_positive_probability() {
        let r = render_result(Label::HighRisk, [0.3, 0.7]);
        assert_eq!(r.level, RiskLevel::High);
        assert_eq!(r.metric_value, "70.0%");
        assert_eq!(r.progress, 0.7);
        assert_eq!(r.guidance.len(), 4);
    }

    #[test]
    fn low_risk_shows_confidence() {
        let r = render_result(Label::LowRisk, [0.85, 0.15]);
        assert_eq!(r.level, RiskLevel::Low);
        assert_eq!(r.metric_value, "85.0%");
        assert_eq!(r.progress, 0.85);
        assert!(r.headline.starts_with("LOW RISK"));
    }

    #[test]
    fn fallback_rendering() {
        let r = render_fallback(&FallbackAssessment {
            score: 0.4,
            level: RiskLevel::Medium,
        });
        assert_eq!(r.headline, "Medium risk");
        assert_eq!(r.metric_value, "40.0%");
        assert_eq!(r.notice, DEMO_MODE_NOTICE);
    }

    #[test]
    fn outcome_text_lists_guidance() {
        let text = outcome_text(&Outcome::Ok(Prediction {
            label: Label::HighRisk,
            probabilities: [0.3, 0.7],
        }));
        assert!(text.contains("Risk probability: 70.0%"));
        assert!(text.contains("  - Consult a cardiologist"));
    }

    #[test]
    fn failure_text_lists_dtypes_and_schema() {
        let failure = InferenceFailure {
            message: "missing column: Age".into(),
            dtypes: vec![("Sex".into(), "object")],
            expected_schema: vec![("Age".into(), "int/float".into())],
        };
        let text = outcome_text(&Outcome::InferenceError(failure));
        assert!(text.starts_with("Prediction error: missing column: Age"));
        assert!(text.contains("Sex             object"));
        assert!(text.contains("  - Age: int/float"));
    }

    #[test]
    fn model_info_reads_artifact_metadata() {
        let controller = InferenceController::with_model(Arc::new(age_sex_artifact()));
        let info = ModelInfo::from_controller(&controller);
        assert!(info.loaded);
        assert_eq!(info.kind, Some("dense"));
        let lines = info.lines();
        assert!(lines.contains(&"Reported accuracy: 87.3%".to_string()));
        assert!(lines.last().unwrap().starts_with("11. ST_Slope"));
    }

    #[test]
    fn model_info_without_model() {
        let controller = InferenceController::without_model("Model unavailable");
        let lines = ModelInfo::from_controller(&controller).lines();
        assert_eq!(lines[0], "Model not loaded");
        assert_eq!(lines[1], "Model unavailable");
    }
}
