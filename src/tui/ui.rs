//! Main UI rendering logic
//!
//! Orchestrates the layout and renders all widgets.

use ratatui::{
    layout::{Constraint, Layout},
    text::Span,
    widgets::Paragraph,
    Frame,
};

use crate::tui::app::FormApp;
use crate::tui::theme::THEME;
use crate::tui::widgets;

pub const TITLE: &str = " Heart Disease Risk Prediction ";

/// Render the entire UI
pub fn render(f: &mut Frame, app: &FormApp) {
    let chunks = Layout::vertical([
        Constraint::Length(1),  // Title
        Constraint::Length(13), // Form (11 fields + border)
        Constraint::Min(8),     // Result / model info
        Constraint::Length(1),  // Footer status bar
    ])
    .split(f.area());

    f.render_widget(
        Paragraph::new(Span::styled(TITLE, THEME.title_style())),
        chunks[0],
    );
    widgets::render_form(f, chunks[1], app);
    if app.show_info {
        widgets::render_model_info(f, chunks[2], app);
    } else {
        widgets::render_result(f, chunks[2], app);
    }
    widgets::render_footer(f, chunks[3], app);

    if app.show_help {
        widgets::render_help(f, f.area());
    }
}
