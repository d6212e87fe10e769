//! TUI Widget components
//!
//! One render function per panel.

pub mod footer;
pub mod form;
pub mod help;
pub mod model_info;
pub mod result;

pub use footer::render_footer;
pub use form::render_form;
pub use help::render_help;
pub use model_info::render_model_info;
pub use result::render_result;
