//! Column preprocessing shipped with a model artifact.
//!
//! Numeric columns pass through as-is; categorical columns are one-hot
//! encoded against the artifact's category list, in list order. The encoded
//! vector is what the network sees.

use serde::{Deserialize, Serialize};

use crate::domain::{
    CategoryCode, ChestPainType, ExerciseAngina, RestingEcg, Row, Sex, StSlope,
};
use crate::error::InferenceError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ColumnKind {
    Numeric,
    Categorical { categories: Vec<String> },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnSpec {
    pub name: String,
    #[serde(flatten)]
    pub kind: ColumnKind,
}

impl ColumnSpec {
    pub fn numeric(name: &str) -> Self {
        Self {
            name: name.to_string(),
            kind: ColumnKind::Numeric,
        }
    }

    pub fn categorical(name: &str, categories: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            kind: ColumnKind::Categorical {
                categories: categories.iter().map(|c| c.to_string()).collect(),
            },
        }
    }

    /// Number of encoded features this column contributes.
    pub fn width(&self) -> usize {
        match &self.kind {
            ColumnKind::Numeric => 1,
            ColumnKind::Categorical { categories } => categories.len(),
        }
    }

    pub fn dtype(&self) -> &'static str {
        match self.kind {
            ColumnKind::Numeric => "numeric",
            ColumnKind::Categorical { .. } => "object",
        }
    }
}

/// The schema the bundled heart model was trained on.
pub fn heart_schema() -> Vec<ColumnSpec> {
    vec![
        ColumnSpec::numeric("Age"),
        ColumnSpec::categorical("Sex", &Sex::codes()),
        ColumnSpec::categorical("ChestPainType", &ChestPainType::codes()),
        ColumnSpec::numeric("RestingBP"),
        ColumnSpec::numeric("Cholesterol"),
        ColumnSpec::numeric("FastingBS"),
        ColumnSpec::categorical("RestingECG", &RestingEcg::codes()),
        ColumnSpec::numeric("MaxHR"),
        ColumnSpec::categorical("ExerciseAngina", &ExerciseAngina::codes()),
        ColumnSpec::numeric("Oldpeak"),
        ColumnSpec::categorical("ST_Slope", &StSlope::codes()),
    ]
}

pub fn encoded_width(columns: &[ColumnSpec]) -> usize {
    columns.iter().map(ColumnSpec::width).sum()
}

/// Validate schema structure: unique names, non-empty category lists.
pub fn validate_columns(columns: &[ColumnSpec]) -> Result<(), String> {
    if columns.is_empty() {
        return Err("columns must not be empty".to_string());
    }
    for (idx, col) in columns.iter().enumerate() {
        if columns[..idx].iter().any(|c| c.name == col.name) {
            return Err(format!("duplicate column {}", col.name));
        }
        if let ColumnKind::Categorical { categories } = &col.kind {
            if categories.is_empty() {
                return Err(format!("column {} has no categories", col.name));
            }
        }
    }
    Ok(())
}

/// Encode a row into the network's input vector.
pub fn encode(columns: &[ColumnSpec], row: &Row) -> Result<Vec<f64>, InferenceError> {
    if let Some((extra, _)) = row
        .columns()
        .iter()
        .find(|(name, _)| !columns.iter().any(|c| &c.name == name))
    {
        return Err(InferenceError::UnexpectedColumn {
            column: extra.clone(),
        });
    }

    let mut out = Vec::with_capacity(encoded_width(columns));
    for spec in columns {
        let cell = row.get(&spec.name).ok_or_else(|| InferenceError::MissingColumn {
            column: spec.name.clone(),
        })?;

        match &spec.kind {
            ColumnKind::Numeric => {
                let value = cell.as_f64().ok_or_else(|| InferenceError::DtypeMismatch {
                    column: spec.name.clone(),
                    expected: "numeric".to_string(),
                    actual: cell.dtype().to_string(),
                })?;
                out.push(value);
            }
            ColumnKind::Categorical { categories } => {
                let value = cell.as_str().ok_or_else(|| InferenceError::DtypeMismatch {
                    column: spec.name.clone(),
                    expected: "object".to_string(),
                    actual: cell.dtype().to_string(),
                })?;
                let hot = categories.iter().position(|c| c == value).ok_or_else(|| {
                    InferenceError::UnknownCategory {
                        column: spec.name.clone(),
                        value: value.to_string(),
                    }
                })?;
                out.extend((0..categories.len()).map(|i| if i == hot { 1.0 } else { 0.0 }));
            }
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Cell, PatientRecord};

    #[test]
    fn heart_schema_width() {
        // 6 numeric + 2 + 4 + 3 + 2 + 3 one-hot
        assert_eq!(encoded_width(&heart_schema()), 20);
        assert!(validate_columns(&heart_schema()).is_ok());
    }

    #[test]
    fn encodes_default_record() {
        let encoded = encode(&heart_schema(), &PatientRecord::default().to_row()).unwrap();
        assert_eq!(encoded.len(), 20);
        assert_eq!(encoded[0], 50.0); // Age
        assert_eq!(&encoded[1..3], &[1.0, 0.0]); // Sex = M
        assert_eq!(&encoded[3..7], &[1.0, 0.0, 0.0, 0.0]); // TA
        assert_eq!(encoded[7], 120.0); // RestingBP
    }

    #[test]
    fn reports_unknown_category() {
        let mut row = Row::new();
        row.push("Sex", Cell::Str("X".into()));
        let columns = vec![ColumnSpec::categorical("Sex", &["M", "F"])];
        assert_eq!(
            encode(&columns, &row),
            Err(InferenceError::UnknownCategory {
                column: "Sex".into(),
                value: "X".into()
            })
        );
    }

    #[test]
    fn reports_missing_and_unexpected_columns() {
        let columns = vec![ColumnSpec::numeric("Age"), ColumnSpec::numeric("MaxHR")];

        let mut row = Row::new();
        row.push("Age", Cell::Int(40));
        assert!(matches!(
            encode(&columns, &row),
            Err(InferenceError::MissingColumn { column }) if column == "MaxHR"
        ));

        row.push("MaxHR", Cell::Int(150));
        row.push("age", Cell::Int(40));
        assert!(matches!(
            encode(&columns, &row),
            Err(InferenceError::UnexpectedColumn { column }) if column == "age"
        ));
    }

    #[test]
    fn reports_dtype_mismatch() {
        let columns = vec![ColumnSpec::numeric("Age")];
        let mut row = Row::new();
        row.push("Age", Cell::Str("fifty".into()));
        assert!(matches!(
            encode(&columns, &row),
            Err(InferenceError::DtypeMismatch { actual, .. }) if actual == "object"
        ));
    }

    #[test]
    fn parses_artifact_column_json() {
        let json = r#"[{"name":"Age","kind":"numeric"},
                       {"name":"Sex","kind":"categorical","categories":["M","F"]}]"#;
        let columns: Vec<ColumnSpec> = serde_json::from_str(json).unwrap();
        assert_eq!(columns[1], ColumnSpec::categorical("Sex", &["M", "F"]));
    }
}
