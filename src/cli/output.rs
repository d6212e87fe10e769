//! Output formatting for one-shot commands.
//!
//! Supports two modes: human-readable text/tables (default) and JSON (--json).

use serde::Serialize;
use tabled::{Table, Tabled};

/// Output mode for command results.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    Table,
    Json,
}

impl OutputMode {
    pub fn from_json_flag(json: bool) -> Self {
        if json {
            OutputMode::Json
        } else {
            OutputMode::Table
        }
    }
}

/// Print a vec of Tabled + Serialize items in the chosen mode.
pub fn print_items<T: Tabled + Serialize>(items: &[T], mode: OutputMode) -> anyhow::Result<()> {
    match mode {
        OutputMode::Table => {
            if items.is_empty() {
                println!("(no results)");
            } else {
                let table = Table::new(items).to_string();
                println!("{table}");
            }
        }
        OutputMode::Json => {
            let json = serde_json::to_string_pretty(items)?;
            println!("{json}");
        }
    }
    Ok(())
}

/// Print pre-rendered lines, or the item as JSON.
pub fn print_lines<T: Serialize>(item: &T, lines: &[String], mode: OutputMode) -> anyhow::Result<()> {
    match mode {
        OutputMode::Table => {
            for line in lines {
                println!("{line}");
            }
        }
        OutputMode::Json => {
            println!("{}", serde_json::to_string_pretty(item)?);
        }
    }
    Ok(())
}
