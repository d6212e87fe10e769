//! `cardiorisk predict`: assess one record given as flags.

use anyhow::{Context, Result};
use clap::Args;

use crate::controller::InferenceController;
use crate::domain::{
    ChestPainType, ExerciseAngina, PatientRecord, RestingEcg, Sex, StSlope,
};
use crate::report;
use crate::services::PredictResponse;

use super::output::{self, OutputMode};

/// Patient fields; defaults match the form's initial values.
#[derive(Args, Debug, Clone)]
pub struct PredictArgs {
    /// Age in years (20-100)
    #[arg(long, default_value = "50")]
    pub age: u32,

    /// Sex: M or F
    #[arg(long, default_value = "M")]
    pub sex: Sex,

    /// Chest pain type: TA, ATA, NAP or ASY
    #[arg(long = "chest-pain", default_value = "TA")]
    pub chest_pain_type: ChestPainType,

    /// Resting blood pressure, mm Hg (90-200)
    #[arg(long = "resting-bp", default_value = "120")]
    pub resting_bp: u32,

    /// Serum cholesterol, mg/dl (100-400)
    #[arg(long, default_value = "200")]
    pub cholesterol: u32,

    /// Fasting blood sugar > 120 mg/dl: 0 or 1
    #[arg(long = "fasting-bs", default_value = "0", value_parser = clap::value_parser!(u8).range(0..=1))]
    pub fasting_bs: u8,

    /// Resting ECG: Normal, ST or LVH
    #[arg(long = "resting-ecg", default_value = "Normal")]
    pub resting_ecg: RestingEcg,

    /// Maximum heart rate achieved (60-220)
    #[arg(long = "max-hr", default_value = "150")]
    pub max_hr: u32,

    /// Exercise-induced angina: Y or N
    #[arg(long = "exercise-angina", default_value = "N")]
    pub exercise_angina: ExerciseAngina,

    /// ST depression (0.0-6.0)
    #[arg(long, default_value = "1.0")]
    pub oldpeak: f64,

    /// ST segment slope: Up, Flat or Down
    #[arg(long = "st-slope", default_value = "Up")]
    pub st_slope: StSlope,

    /// Print the outcome as JSON
    #[arg(long)]
    pub json: bool,
}

impl PredictArgs {
    pub fn to_record(&self) -> PatientRecord {
        PatientRecord {
            age: self.age,
            sex: self.sex,
            chest_pain_type: self.chest_pain_type,
            resting_bp: self.resting_bp,
            cholesterol: self.cholesterol,
            fasting_bs: self.fasting_bs == 1,
            resting_ecg: self.resting_ecg,
            max_hr: self.max_hr,
            exercise_angina: self.exercise_angina,
            oldpeak: self.oldpeak,
            st_slope: self.st_slope,
        }
    }
}

pub fn run(args: &PredictArgs, controller: &InferenceController) -> Result<()> {
    let record = args
        .to_record()
        .validated()
        .context("invalid patient data")?;

    let outcome = controller.assess(&record);
    let lines: Vec<String> = report::outcome_text(&outcome)
        .lines()
        .map(str::to_string)
        .collect();

    output::print_lines(
        &PredictResponse::new(outcome),
        &lines,
        OutputMode::from_json_flag(args.json),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser)]
    struct Harness {
        #[command(flatten)]
        args: PredictArgs,
    }

    #[test]
    fn defaults_match_form() {
        let h = Harness::parse_from(["predict"]);
        assert_eq!(h.args.to_record(), PatientRecord::default());
        assert!(!h.args.json);
    }

    #[test]
    fn flags_parse_codes() {
        let h = Harness::parse_from([
            "predict",
            "--age",
            "67",
            "--sex",
            "F",
            "--chest-pain",
            "ASY",
            "--fasting-bs",
            "1",
            "--st-slope",
            "Flat",
        ]);
        let record = h.args.to_record();
        assert_eq!(record.age, 67);
        assert_eq!(record.sex, Sex::Female);
        assert_eq!(record.chest_pain_type, ChestPainType::Asymptomatic);
        assert!(record.fasting_bs);
        assert_eq!(record.st_slope, StSlope::Flat);
    }

    #[test]
    fn unknown_code_is_a_parse_error() {
        assert!(Harness::try_parse_from(["predict", "--sex", "X"]).is_err());
        assert!(Harness::try_parse_from(["predict", "--fasting-bs", "2"]).is_err());
    }

    #[test]
    fn oldpeak_off_step_is_rejected() {
        let h = Harness::parse_from(["predict", "--oldpeak", "1.234"]);
        let controller = InferenceController::without_model("none");
        let err = run(&h.args, &controller).unwrap_err();
        assert!(format!("{err:#}").contains("multiple of 0.1"));
    }

    #[test]
    fn out_of_range_is_rejected_before_inference() {
        let h = Harness::parse_from(["predict", "--age", "101"]);
        let controller = InferenceController::without_model("none");
        let err = run(&h.args, &controller).unwrap_err();
        assert!(format!("{err:#}").contains("Age"));
    }
}
