//! TUI Application state management
//!
//! Holds the form widgets, the focused field, and the last submission.

use chrono::{DateTime, Local};

use crate::controller::{InferenceController, Outcome};
use crate::domain::{FormField, PatientForm, PatientRecord, Row};

/// One button press: what was sent and what came back.
#[derive(Debug, Clone)]
pub struct Submission {
    pub record: PatientRecord,
    pub row: Row,
    pub outcome: Outcome,
    pub at: DateTime<Local>,
}

/// TUI Application state
pub struct FormApp {
    /// Widget values
    pub form: PatientForm,
    /// Index into `FormField::ALL`
    pub focused: usize,
    /// Model (or heuristic) access
    pub controller: InferenceController,
    /// Most recent submission
    pub last: Option<Submission>,
    /// Number of submissions this session
    pub submissions: u64,
    /// Is the app running
    pub running: bool,
    /// Show help overlay
    pub show_help: bool,
    /// Show model info panel instead of the result
    pub show_info: bool,
    /// Show the submitted row under the result
    pub show_data: bool,
}

impl FormApp {
    /// Create a new app with default widget values
    pub fn new(controller: InferenceController) -> Self {
        Self {
            form: PatientForm::new(),
            focused: 0,
            controller,
            last: None,
            submissions: 0,
            running: true,
            show_help: false,
            show_info: false,
            show_data: false,
        }
    }

    /// Check if app should continue running
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Signal the app to quit
    pub fn quit(&mut self) {
        self.running = false;
    }

    pub fn focused_field(&self) -> FormField {
        FormField::ALL[self.focused]
    }

    pub fn focus_next(&mut self) {
        self.focused = (self.focused + 1) % FormField::ALL.len();
    }

    pub fn focus_prev(&mut self) {
        if self.focused == 0 {
            self.focused = FormField::ALL.len() - 1;
        } else {
            self.focused -= 1;
        }
    }

    pub fn increase(&mut self) {
        self.form.increment(self.focused_field());
    }

    pub fn decrease(&mut self) {
        self.form.decrement(self.focused_field());
    }

    /// Collect the widgets, run the record through the controller, keep the result.
    pub fn submit(&mut self) -> &Submission {
        let record = self.form.collect_inputs();
        let outcome = self.controller.assess(&record);
        self.submissions += 1;
        self.show_info = false;
        self.last.insert(Submission {
            row: record.to_row(),
            record,
            outcome,
            at: Local::now(),
        })
    }

    /// Restore widget defaults and clear the result
    pub fn reset(&mut self) {
        self.form = PatientForm::new();
        self.focused = 0;
        self.last = None;
    }

    /// Toggle help overlay
    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    pub fn toggle_info(&mut self) {
        self.show_info = !self.show_info;
    }

    pub fn toggle_data(&mut self) {
        self.show_data = !self.show_data;
    }

    /// Status-bar description of the model state
    pub fn model_status(&self) -> String {
        match self.controller.model() {
            Some(model) => format!("MODEL: {}", model.kind().to_uppercase()),
            None => "DEMO MODE".to_string(),
        }
    }
}
