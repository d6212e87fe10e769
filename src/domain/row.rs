//! Single-row, named-column format at the model boundary.

use serde::Serialize;
use std::fmt;

/// One value in a row.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Cell {
    Int(i64),
    Float(f64),
    Str(String),
}

impl Cell {
    /// Dtype name as reported in diagnostics.
    pub fn dtype(&self) -> &'static str {
        match self {
            Cell::Int(_) => "int64",
            Cell::Float(_) => "float64",
            Cell::Str(_) => "object",
        }
    }

    /// Numeric view; strings have none.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Cell::Int(v) => Some(*v as f64),
            Cell::Float(v) => Some(*v),
            Cell::Str(_) => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Cell::Str(s) => Some(s.as_str()),
            _ => None,
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Int(v) => write!(f, "{v}"),
            Cell::Float(v) => write!(f, "{v:.1}"),
            Cell::Str(s) => f.write_str(s),
        }
    }
}

/// Ordered `(column, cell)` pairs.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Row {
    columns: Vec<(String, Cell)>,
}

impl Row {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            columns: Vec::with_capacity(capacity),
        }
    }

    pub fn push(&mut self, name: impl Into<String>, cell: Cell) {
        self.columns.push((name.into(), cell));
    }

    pub fn get(&self, name: &str) -> Option<&Cell> {
        self.columns
            .iter()
            .find(|(col, _)| col == name)
            .map(|(_, cell)| cell)
    }

    pub fn columns(&self) -> &[(String, Cell)] {
        &self.columns
    }

    pub fn names(&self) -> Vec<&str> {
        self.columns.iter().map(|(name, _)| name.as_str()).collect()
    }

    /// Per-column dtypes, in column order.
    pub fn dtypes(&self) -> Vec<(String, &'static str)> {
        self.columns
            .iter()
            .map(|(name, cell)| (name.clone(), cell.dtype()))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

impl Serialize for Row {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeMap;
        let mut map = serializer.serialize_map(Some(self.columns.len()))?;
        for (name, cell) in &self.columns {
            map.serialize_entry(name, cell)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dtypes_follow_cell_kinds() {
        let mut row = Row::new();
        row.push("Age", Cell::Int(50));
        row.push("Sex", Cell::Str("M".into()));
        row.push("Oldpeak", Cell::Float(1.0));

        let dtypes = row.dtypes();
        assert_eq!(dtypes[0], ("Age".to_string(), "int64"));
        assert_eq!(dtypes[1], ("Sex".to_string(), "object"));
        assert_eq!(dtypes[2], ("Oldpeak".to_string(), "float64"));
    }

    #[test]
    fn serializes_as_ordered_map() {
        let mut row = Row::new();
        row.push("Age", Cell::Int(50));
        row.push("Sex", Cell::Str("F".into()));
        let json = serde_json::to_string(&row).unwrap();
        assert_eq!(json, r#"{"Age":50,"Sex":"F"}"#);
    }
}
