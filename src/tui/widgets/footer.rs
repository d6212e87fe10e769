//! Footer status bar widget
//!
//! Model status, submission count and key hints.

use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::tui::app::FormApp;
use crate::tui::theme::THEME;

/// Render the footer status bar
pub fn render_footer(f: &mut Frame, area: Rect, app: &FormApp) {
    let status_style = if app.controller.model().is_some() {
        THEME.border_style()
    } else {
        THEME.focus_style()
    };

    let line = Line::from(vec![
        Span::raw("  "),
        Span::styled(format!("[{}]", app.model_status()), status_style),
        Span::raw("  Predictions: "),
        Span::styled(app.submissions.to_string(), THEME.text_style()),
        Span::raw("  "),
        Span::styled(
            "Enter predict  r reset  i info  d data  ? help  q quit",
            THEME.inactive_style(),
        ),
    ]);

    f.render_widget(Paragraph::new(line), area);
}
