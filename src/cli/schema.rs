//! `cardiorisk schema` and `cardiorisk info`.

use anyhow::Result;
use serde::Serialize;
use tabled::Tabled;

use crate::controller::InferenceController;
use crate::domain::{EXPECTED_SCHEMA, FIELD_DESCRIPTIONS, FIELD_NAMES};
use crate::report::ModelInfo;

use super::output::{self, OutputMode};

#[derive(Debug, Serialize, Tabled)]
pub struct SchemaRow {
    #[tabled(rename = "#")]
    pub position: usize,
    #[tabled(rename = "Column")]
    pub name: &'static str,
    #[tabled(rename = "Type")]
    pub dtype: &'static str,
    #[tabled(rename = "Description")]
    pub description: &'static str,
}

pub fn schema_rows() -> Vec<SchemaRow> {
    FIELD_NAMES
        .iter()
        .zip(EXPECTED_SCHEMA.iter())
        .zip(FIELD_DESCRIPTIONS.iter())
        .enumerate()
        .map(|(i, ((name, (_, dtype)), (_, description)))| SchemaRow {
            position: i + 1,
            name: *name,
            dtype: *dtype,
            description: *description,
        })
        .collect()
}

pub fn run_schema(json: bool) -> Result<()> {
    output::print_items(&schema_rows(), OutputMode::from_json_flag(json))
}

pub fn run_info(controller: &InferenceController, json: bool) -> Result<()> {
    let info = ModelInfo::from_controller(controller);
    output::print_lines(&info, &info.lines(), OutputMode::from_json_flag(json))
}
