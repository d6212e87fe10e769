pub mod form;
pub mod record;
pub mod risk;
pub mod row;

pub use form::{FormField, PatientForm};
pub use record::*;
pub use risk::{Label, RiskLevel};
pub use row::{Cell, Row};
