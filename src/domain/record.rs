//! Patient record: the eleven clinical inputs fed to the classifier.
//!
//! Column names and category codes are the model's contract. Field order is
//! the order of [`FIELD_NAMES`] and never changes.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;

use crate::domain::row::{Cell, Row};
use crate::error::{CardioError, Result};

/// Column names in model order.
pub const FIELD_NAMES: [&str; 11] = [
    "Age",
    "Sex",
    "ChestPainType",
    "RestingBP",
    "Cholesterol",
    "FastingBS",
    "RestingECG",
    "MaxHR",
    "ExerciseAngina",
    "Oldpeak",
    "ST_Slope",
];

pub const AGE_RANGE: RangeInclusive<u32> = 20..=100;
pub const RESTING_BP_RANGE: RangeInclusive<u32> = 90..=200;
pub const CHOLESTEROL_RANGE: RangeInclusive<u32> = 100..=400;
pub const MAX_HR_RANGE: RangeInclusive<u32> = 60..=220;
pub const OLDPEAK_RANGE: RangeInclusive<f64> = 0.0..=6.0;
pub const OLDPEAK_STEP: f64 = 0.1;

/// A categorical column whose values are fixed string codes.
pub trait CategoryCode: Sized + Copy + PartialEq + 'static {
    /// Every variant, in display order.
    const ALL: &'static [Self];

    /// Code as the model sees it.
    fn code(&self) -> &'static str;

    /// Human-readable label for the form.
    fn label(&self) -> &'static str;

    fn from_code(code: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|v| v.code() == code)
    }

    fn codes() -> Vec<&'static str> {
        Self::ALL.iter().map(|v| v.code()).collect()
    }

    fn position(&self) -> usize {
        Self::ALL.iter().position(|v| v == self).unwrap_or(0)
    }

    /// Next variant, wrapping around.
    fn next(&self) -> Self {
        Self::ALL[(self.position() + 1) % Self::ALL.len()]
    }

    /// Previous variant, wrapping around.
    fn prev(&self) -> Self {
        let pos = self.position();
        if pos == 0 {
            Self::ALL[Self::ALL.len() - 1]
        } else {
            Self::ALL[pos - 1]
        }
    }
}

macro_rules! impl_code_traits {
    ($ty:ty, $column:literal) => {
        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.code())
            }
        }

        impl FromStr for $ty {
            type Err = CardioError;

            fn from_str(s: &str) -> Result<Self> {
                <$ty as CategoryCode>::from_code(s).ok_or_else(|| {
                    CardioError::Validation(format!(
                        "{} must be one of {:?}, got {:?}",
                        $column,
                        <$ty as CategoryCode>::codes(),
                        s
                    ))
                })
            }
        }
    };
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sex {
    #[serde(rename = "M")]
    Male,
    #[serde(rename = "F")]
    Female,
}

impl CategoryCode for Sex {
    const ALL: &'static [Self] = &[Sex::Male, Sex::Female];

    fn code(&self) -> &'static str {
        match self {
            Sex::Male => "M",
            Sex::Female => "F",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            Sex::Male => "Male",
            Sex::Female => "Female",
        }
    }
}
impl_code_traits!(Sex, "Sex");

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChestPainType {
    /// Typical angina
    #[serde(rename = "TA")]
    TypicalAngina,
    /// Atypical angina
    #[serde(rename = "ATA")]
    AtypicalAngina,
    /// Non-anginal pain
    #[serde(rename = "NAP")]
    NonAnginalPain,
    /// Asymptomatic
    #[serde(rename = "ASY")]
    Asymptomatic,
}

impl CategoryCode for ChestPainType {
    const ALL: &'static [Self] = &[
        ChestPainType::TypicalAngina,
        ChestPainType::AtypicalAngina,
        ChestPainType::NonAnginalPain,
        ChestPainType::Asymptomatic,
    ];

    fn code(&self) -> &'static str {
        match self {
            ChestPainType::TypicalAngina => "TA",
            ChestPainType::AtypicalAngina => "ATA",
            ChestPainType::NonAnginalPain => "NAP",
            ChestPainType::Asymptomatic => "ASY",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            ChestPainType::TypicalAngina => "Typical angina",
            ChestPainType::AtypicalAngina => "Atypical angina",
            ChestPainType::NonAnginalPain => "Non-anginal pain",
            ChestPainType::Asymptomatic => "Asymptomatic",
        }
    }
}
impl_code_traits!(ChestPainType, "ChestPainType");

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RestingEcg {
    #[serde(rename = "Normal")]
    Normal,
    /// ST-T wave abnormality
    #[serde(rename = "ST")]
    StAbnormality,
    /// Left ventricular hypertrophy
    #[serde(rename = "LVH")]
    LeftVentricularHypertrophy,
}

impl CategoryCode for RestingEcg {
    const ALL: &'static [Self] = &[
        RestingEcg::Normal,
        RestingEcg::StAbnormality,
        RestingEcg::LeftVentricularHypertrophy,
    ];

    fn code(&self) -> &'static str {
        match self {
            RestingEcg::Normal => "Normal",
            RestingEcg::StAbnormality => "ST",
            RestingEcg::LeftVentricularHypertrophy => "LVH",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            RestingEcg::Normal => "Normal",
            RestingEcg::StAbnormality => "ST-T wave abnormality",
            RestingEcg::LeftVentricularHypertrophy => "Left ventricular hypertrophy",
        }
    }
}
impl_code_traits!(RestingEcg, "RestingECG");

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExerciseAngina {
    #[serde(rename = "N")]
    No,
    #[serde(rename = "Y")]
    Yes,
}

impl CategoryCode for ExerciseAngina {
    const ALL: &'static [Self] = &[ExerciseAngina::No, ExerciseAngina::Yes];

    fn code(&self) -> &'static str {
        match self {
            ExerciseAngina::No => "N",
            ExerciseAngina::Yes => "Y",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            ExerciseAngina::No => "No",
            ExerciseAngina::Yes => "Yes",
        }
    }
}
impl_code_traits!(ExerciseAngina, "ExerciseAngina");

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StSlope {
    #[serde(rename = "Up")]
    Up,
    #[serde(rename = "Flat")]
    Flat,
    #[serde(rename = "Down")]
    Down,
}

impl CategoryCode for StSlope {
    const ALL: &'static [Self] = &[StSlope::Up, StSlope::Flat, StSlope::Down];

    fn code(&self) -> &'static str {
        match self {
            StSlope::Up => "Up",
            StSlope::Flat => "Flat",
            StSlope::Down => "Down",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            StSlope::Up => "Upsloping",
            StSlope::Flat => "Flat",
            StSlope::Down => "Downsloping",
        }
    }
}
impl_code_traits!(StSlope, "ST_Slope");

/// One patient's measurements.
///
/// Serializes with the model's column names, so a JSON body like
/// `{"Age": 50, "Sex": "M", ...}` deserializes straight into it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatientRecord {
    #[serde(rename = "Age")]
    pub age: u32,
    #[serde(rename = "Sex")]
    pub sex: Sex,
    #[serde(rename = "ChestPainType")]
    pub chest_pain_type: ChestPainType,
    #[serde(rename = "RestingBP")]
    pub resting_bp: u32,
    #[serde(rename = "Cholesterol")]
    pub cholesterol: u32,
    /// Fasting blood sugar > 120 mg/dl, encoded 0/1 on the wire
    #[serde(rename = "FastingBS", with = "bool_as_int")]
    pub fasting_bs: bool,
    #[serde(rename = "RestingECG")]
    pub resting_ecg: RestingEcg,
    #[serde(rename = "MaxHR")]
    pub max_hr: u32,
    #[serde(rename = "ExerciseAngina")]
    pub exercise_angina: ExerciseAngina,
    #[serde(rename = "Oldpeak")]
    pub oldpeak: f64,
    #[serde(rename = "ST_Slope")]
    pub st_slope: StSlope,
}

impl Default for PatientRecord {
    fn default() -> Self {
        Self {
            age: 50,
            sex: Sex::Male,
            chest_pain_type: ChestPainType::TypicalAngina,
            resting_bp: 120,
            cholesterol: 200,
            fasting_bs: false,
            resting_ecg: RestingEcg::Normal,
            max_hr: 150,
            exercise_angina: ExerciseAngina::No,
            oldpeak: 1.0,
            st_slope: StSlope::Up,
        }
    }
}

impl PatientRecord {
    /// Check every field against its declared domain.
    pub fn validate(&self) -> std::result::Result<(), Vec<String>> {
        let mut errors = Vec::new();

        check_int("Age", self.age, &AGE_RANGE, &mut errors);
        check_int("RestingBP", self.resting_bp, &RESTING_BP_RANGE, &mut errors);
        check_int("Cholesterol", self.cholesterol, &CHOLESTEROL_RANGE, &mut errors);
        check_int("MaxHR", self.max_hr, &MAX_HR_RANGE, &mut errors);

        if !self.oldpeak.is_finite() || !OLDPEAK_RANGE.contains(&self.oldpeak) {
            errors.push(format!(
                "Oldpeak {} out of range [{:.1}, {:.1}]",
                self.oldpeak,
                OLDPEAK_RANGE.start(),
                OLDPEAK_RANGE.end()
            ));
        } else if !on_oldpeak_step(self.oldpeak) {
            errors.push(format!(
                "Oldpeak {} must be a multiple of {OLDPEAK_STEP}",
                self.oldpeak
            ));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Validate and return self, folding range errors into one message.
    pub fn validated(self) -> Result<Self> {
        self.validate()
            .map_err(|errors| CardioError::Validation(errors.join("; ")))?;
        Ok(self)
    }

    /// Serialize into the single-row format the model consumes.
    pub fn to_row(&self) -> Row {
        let mut row = Row::with_capacity(FIELD_NAMES.len());
        row.push("Age", Cell::Int(i64::from(self.age)));
        row.push("Sex", Cell::Str(self.sex.code().to_string()));
        row.push(
            "ChestPainType",
            Cell::Str(self.chest_pain_type.code().to_string()),
        );
        row.push("RestingBP", Cell::Int(i64::from(self.resting_bp)));
        row.push("Cholesterol", Cell::Int(i64::from(self.cholesterol)));
        row.push("FastingBS", Cell::Int(i64::from(self.fasting_bs)));
        row.push("RestingECG", Cell::Str(self.resting_ecg.code().to_string()));
        row.push("MaxHR", Cell::Int(i64::from(self.max_hr)));
        row.push(
            "ExerciseAngina",
            Cell::Str(self.exercise_angina.code().to_string()),
        );
        row.push("Oldpeak", Cell::Float(self.oldpeak));
        row.push("ST_Slope", Cell::Str(self.st_slope.code().to_string()));
        row
    }
}

fn on_oldpeak_step(value: f64) -> bool {
    let steps = value / OLDPEAK_STEP;
    (steps - steps.round()).abs() < 1e-6
}

fn check_int(name: &str, value: u32, range: &RangeInclusive<u32>, errors: &mut Vec<String>) {
    if !range.contains(&value) {
        errors.push(format!(
            "{name} {value} out of range [{}, {}]",
            range.start(),
            range.end()
        ));
    }
}

/// Expected dtype per column, shown next to the actual dtypes when the model
/// rejects a row.
pub const EXPECTED_SCHEMA: [(&str, &str); 11] = [
    ("Age", "int/float"),
    ("Sex", "str ('M'/'F')"),
    ("ChestPainType", "str ('TA','ATA','NAP','ASY')"),
    ("RestingBP", "int/float"),
    ("Cholesterol", "int/float"),
    ("FastingBS", "int (0/1)"),
    ("RestingECG", "str ('Normal','ST','LVH')"),
    ("MaxHR", "int/float"),
    ("ExerciseAngina", "str ('Y'/'N')"),
    ("Oldpeak", "float"),
    ("ST_Slope", "str ('Up','Flat','Down')"),
];

/// Clinical description per column.
pub const FIELD_DESCRIPTIONS: [(&str, &str); 11] = [
    ("Age", "Age (years)"),
    ("Sex", "Sex (M/F)"),
    ("ChestPainType", "Chest pain type (TA/ATA/NAP/ASY)"),
    ("RestingBP", "Resting blood pressure (mm Hg)"),
    ("Cholesterol", "Serum cholesterol (mg/dl)"),
    ("FastingBS", "Fasting blood sugar > 120 mg/dl (0/1)"),
    ("RestingECG", "Resting ECG result (Normal/ST/LVH)"),
    ("MaxHR", "Maximum heart rate achieved"),
    ("ExerciseAngina", "Exercise-induced angina (Y/N)"),
    ("Oldpeak", "ST depression (Oldpeak)"),
    ("ST_Slope", "Slope of the peak exercise ST segment (Up/Flat/Down)"),
];

mod bool_as_int {
    use serde::de::Error;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &bool, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(u8::from(*value))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
        match u8::deserialize(deserializer)? {
            0 => Ok(false),
            1 => Ok(true),
            other => Err(D::Error::custom(format!(
                "FastingBS must be 0 or 1, got {other}"
            ))),
        }
    }
}
