//! Input widgets for the eleven fields.
//!
//! Sliders clamp to their range and choices cycle through their enum, so any
//! sequence of adjustments leaves the form holding an in-domain value.

use std::ops::RangeInclusive;

use crate::domain::record::{
    CategoryCode, ChestPainType, ExerciseAngina, PatientRecord, RestingEcg, Sex, StSlope,
    AGE_RANGE, CHOLESTEROL_RANGE, MAX_HR_RANGE, RESTING_BP_RANGE,
};

/// Oldpeak slider works in tenths to avoid float drift at step 0.1.
const OLDPEAK_TENTHS: RangeInclusive<u32> = 0..=60;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormField {
    Age,
    Sex,
    ChestPainType,
    RestingBp,
    Cholesterol,
    FastingBs,
    RestingEcg,
    MaxHr,
    ExerciseAngina,
    Oldpeak,
    StSlope,
}

impl FormField {
    /// Every field in model column order.
    pub const ALL: [FormField; 11] = [
        FormField::Age,
        FormField::Sex,
        FormField::ChestPainType,
        FormField::RestingBp,
        FormField::Cholesterol,
        FormField::FastingBs,
        FormField::RestingEcg,
        FormField::MaxHr,
        FormField::ExerciseAngina,
        FormField::Oldpeak,
        FormField::StSlope,
    ];

    /// Column name the field feeds.
    pub fn column(&self) -> &'static str {
        match self {
            FormField::Age => "Age",
            FormField::Sex => "Sex",
            FormField::ChestPainType => "ChestPainType",
            FormField::RestingBp => "RestingBP",
            FormField::Cholesterol => "Cholesterol",
            FormField::FastingBs => "FastingBS",
            FormField::RestingEcg => "RestingECG",
            FormField::MaxHr => "MaxHR",
            FormField::ExerciseAngina => "ExerciseAngina",
            FormField::Oldpeak => "Oldpeak",
            FormField::StSlope => "ST_Slope",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            FormField::Age => "Age",
            FormField::Sex => "Sex",
            FormField::ChestPainType => "Chest pain type",
            FormField::RestingBp => "Resting blood pressure",
            FormField::Cholesterol => "Cholesterol",
            FormField::FastingBs => "Fasting blood sugar > 120",
            FormField::RestingEcg => "Resting ECG",
            FormField::MaxHr => "Maximum heart rate",
            FormField::ExerciseAngina => "Exercise angina",
            FormField::Oldpeak => "ST depression (Oldpeak)",
            FormField::StSlope => "ST segment slope",
        }
    }

    /// Short hint describing the widget's domain.
    pub fn domain_hint(&self) -> String {
        fn range(r: &RangeInclusive<u32>) -> String {
            format!("{}-{}", r.start(), r.end())
        }
        match self {
            FormField::Age => range(&AGE_RANGE),
            FormField::RestingBp => range(&RESTING_BP_RANGE),
            FormField::Cholesterol => range(&CHOLESTEROL_RANGE),
            FormField::MaxHr => range(&MAX_HR_RANGE),
            FormField::Oldpeak => "0.0-6.0 step 0.1".to_string(),
            FormField::Sex => Sex::codes().join("/"),
            FormField::ChestPainType => ChestPainType::codes().join("/"),
            FormField::FastingBs => "0/1".to_string(),
            FormField::RestingEcg => RestingEcg::codes().join("/"),
            FormField::ExerciseAngina => ExerciseAngina::codes().join("/"),
            FormField::StSlope => StSlope::codes().join("/"),
        }
    }
}

/// Current widget values.
#[derive(Debug, Clone, PartialEq)]
pub struct PatientForm {
    age: u32,
    sex: Sex,
    chest_pain_type: ChestPainType,
    resting_bp: u32,
    cholesterol: u32,
    fasting_bs: bool,
    resting_ecg: RestingEcg,
    max_hr: u32,
    exercise_angina: ExerciseAngina,
    oldpeak_tenths: u32,
    st_slope: StSlope,
}

impl Default for PatientForm {
    fn default() -> Self {
        Self::from_record(&PatientRecord::default())
    }
}

impl PatientForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the widgets from a record, clamping anything out of range.
    pub fn from_record(record: &PatientRecord) -> Self {
        let tenths = (record.oldpeak * 10.0).round();
        let tenths = if tenths.is_finite() && tenths > 0.0 {
            tenths as u32
        } else {
            0
        };
        Self {
            age: clamp(record.age, &AGE_RANGE),
            sex: record.sex,
            chest_pain_type: record.chest_pain_type,
            resting_bp: clamp(record.resting_bp, &RESTING_BP_RANGE),
            cholesterol: clamp(record.cholesterol, &CHOLESTEROL_RANGE),
            fasting_bs: record.fasting_bs,
            resting_ecg: record.resting_ecg,
            max_hr: clamp(record.max_hr, &MAX_HR_RANGE),
            exercise_angina: record.exercise_angina,
            oldpeak_tenths: clamp(tenths, &OLDPEAK_TENTHS),
            st_slope: record.st_slope,
        }
    }

    /// Read the eleven widgets into a fresh record.
    pub fn collect_inputs(&self) -> PatientRecord {
        PatientRecord {
            age: self.age,
            sex: self.sex,
            chest_pain_type: self.chest_pain_type,
            resting_bp: self.resting_bp,
            cholesterol: self.cholesterol,
            fasting_bs: self.fasting_bs,
            resting_ecg: self.resting_ecg,
            max_hr: self.max_hr,
            exercise_angina: self.exercise_angina,
            oldpeak: f64::from(self.oldpeak_tenths) / 10.0,
            st_slope: self.st_slope,
        }
    }

    /// Move the widget one step up (slider) or to the next option (choice).
    pub fn increment(&mut self, field: FormField) {
        self.step(field, true);
    }

    /// Move the widget one step down (slider) or to the previous option (choice).
    pub fn decrement(&mut self, field: FormField) {
        self.step(field, false);
    }

    fn step(&mut self, field: FormField, up: bool) {
        match field {
            FormField::Age => slide(&mut self.age, &AGE_RANGE, up),
            FormField::RestingBp => slide(&mut self.resting_bp, &RESTING_BP_RANGE, up),
            FormField::Cholesterol => slide(&mut self.cholesterol, &CHOLESTEROL_RANGE, up),
            FormField::MaxHr => slide(&mut self.max_hr, &MAX_HR_RANGE, up),
            FormField::Oldpeak => slide(&mut self.oldpeak_tenths, &OLDPEAK_TENTHS, up),
            FormField::Sex => self.sex = cycle(self.sex, up),
            FormField::ChestPainType => self.chest_pain_type = cycle(self.chest_pain_type, up),
            FormField::FastingBs => self.fasting_bs = !self.fasting_bs,
            FormField::RestingEcg => self.resting_ecg = cycle(self.resting_ecg, up),
            FormField::ExerciseAngina => self.exercise_angina = cycle(self.exercise_angina, up),
            FormField::StSlope => self.st_slope = cycle(self.st_slope, up),
        }
    }

    /// Value as shown next to the field label.
    pub fn display_value(&self, field: FormField) -> String {
        match field {
            FormField::Age => self.age.to_string(),
            FormField::RestingBp => format!("{} mm Hg", self.resting_bp),
            FormField::Cholesterol => format!("{} mg/dl", self.cholesterol),
            FormField::MaxHr => format!("{} bpm", self.max_hr),
            FormField::Oldpeak => format!("{:.1}", f64::from(self.oldpeak_tenths) / 10.0),
            FormField::Sex => choice_display(self.sex),
            FormField::ChestPainType => choice_display(self.chest_pain_type),
            FormField::FastingBs => {
                if self.fasting_bs {
                    "Yes (> 120 mg/dl) [1]".to_string()
                } else {
                    "No (< 120 mg/dl) [0]".to_string()
                }
            }
            FormField::RestingEcg => choice_display(self.resting_ecg),
            FormField::ExerciseAngina => choice_display(self.exercise_angina),
            FormField::StSlope => choice_display(self.st_slope),
        }
    }

    /// Slider position in [0, 1]; `None` for choice widgets.
    pub fn slider_ratio(&self, field: FormField) -> Option<f64> {
        let (value, range) = match field {
            FormField::Age => (self.age, AGE_RANGE),
            FormField::RestingBp => (self.resting_bp, RESTING_BP_RANGE),
            FormField::Cholesterol => (self.cholesterol, CHOLESTEROL_RANGE),
            FormField::MaxHr => (self.max_hr, MAX_HR_RANGE),
            FormField::Oldpeak => (self.oldpeak_tenths, OLDPEAK_TENTHS),
            _ => return None,
        };
        let span = f64::from(range.end() - range.start());
        Some(f64::from(value - range.start()) / span)
    }
}

fn clamp(value: u32, range: &RangeInclusive<u32>) -> u32 {
    value.clamp(*range.start(), *range.end())
}

fn slide(value: &mut u32, range: &RangeInclusive<u32>, up: bool) {
    let next = if up {
        value.saturating_add(1)
    } else {
        value.saturating_sub(1)
    };
    *value = clamp(next, range);
}

fn cycle<T: CategoryCode>(value: T, forward: bool) -> T {
    if forward {
        value.next()
    } else {
        value.prev()
    }
}

fn choice_display<T: CategoryCode>(value: T) -> String {
    format!("{} [{}]", value.label(), value.code())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::record::FIELD_NAMES;

    #[test]
    fn fields_follow_column_order() {
        let columns: Vec<&str> = FormField::ALL.iter().map(|f| f.column()).collect();
        assert_eq!(columns, FIELD_NAMES.to_vec());
    }

    #[test]
    fn default_form_collects_default_record() {
        assert_eq!(PatientForm::new().collect_inputs(), PatientRecord::default());
    }

    #[test]
    fn sliders_clamp_at_both_ends() {
        let mut form = PatientForm::new();
        for _ in 0..200 {
            form.decrement(FormField::Age);
            form.increment(FormField::Oldpeak);
        }
        let record = form.collect_inputs();
        assert_eq!(record.age, 20);
        assert_eq!(record.oldpeak, 6.0);
        assert!(record.validate().is_ok());

        for _ in 0..200 {
            form.increment(FormField::Age);
            form.decrement(FormField::Oldpeak);
        }
        let record = form.collect_inputs();
        assert_eq!(record.age, 100);
        assert_eq!(record.oldpeak, 0.0);
        assert!(record.validate().is_ok());
    }

    #[test]
    fn oldpeak_steps_by_tenths() {
        let mut form = PatientForm::new();
        form.increment(FormField::Oldpeak);
        form.increment(FormField::Oldpeak);
        assert_eq!(form.collect_inputs().oldpeak, 1.2);
        assert_eq!(form.display_value(FormField::Oldpeak), "1.2");
    }

    #[test]
    fn any_adjustment_sequence_stays_in_domain() {
        let mut form = PatientForm::new();
        for (i, field) in FormField::ALL.iter().cycle().take(500).enumerate() {
            if i % 3 == 0 {
                form.decrement(*field);
            } else {
                form.increment(*field);
            }
            assert!(form.collect_inputs().validate().is_ok());
        }
    }

    #[test]
    fn choices_cycle_and_fasting_toggles() {
        let mut form = PatientForm::new();
        form.increment(FormField::ChestPainType);
        assert_eq!(form.collect_inputs().chest_pain_type, ChestPainType::AtypicalAngina);
        form.decrement(FormField::ChestPainType);
        form.decrement(FormField::ChestPainType);
        assert_eq!(form.collect_inputs().chest_pain_type, ChestPainType::Asymptomatic);

        form.increment(FormField::FastingBs);
        assert!(form.collect_inputs().fasting_bs);
        form.decrement(FormField::FastingBs);
        assert!(!form.collect_inputs().fasting_bs);
    }

    #[test]
    fn slider_ratio_spans_unit_interval() {
        let mut form = PatientForm::new();
        for _ in 0..100 {
            form.decrement(FormField::MaxHr);
        }
        assert_eq!(form.slider_ratio(FormField::MaxHr), Some(0.0));
        assert_eq!(form.slider_ratio(FormField::Sex), None);
    }
}
