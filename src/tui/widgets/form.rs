//! Patient data form: one row per field, sliders drawn as a bar.

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Row, Table};

use crate::domain::FormField;
use crate::tui::app::FormApp;
use crate::tui::theme::THEME;

const BAR_WIDTH: usize = 16;

/// Render the input form
pub fn render_form(f: &mut Frame, area: Rect, app: &FormApp) {
    let focused = app.focused_field();

    let rows: Vec<Row> = FormField::ALL
        .iter()
        .map(|&field| {
            let style = if field == focused {
                THEME.focus_style()
            } else {
                THEME.text_style()
            };
            let marker = if field == focused { ">" } else { " " };
            let control = match app.form.slider_ratio(field) {
                Some(ratio) => slider_bar(ratio),
                None => "< >".to_string(),
            };

            Row::new(vec![
                Span::styled(format!("{marker} {}", field.label()), style),
                Span::styled(app.form.display_value(field), style),
                Span::styled(control, THEME.progress_style()),
                Span::styled(field.domain_hint(), THEME.inactive_style()),
            ])
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Length(28),
            Constraint::Length(32),
            Constraint::Length(BAR_WIDTH as u16 + 2),
            Constraint::Min(10),
        ],
    )
    .block(
        Block::default()
            .title(Span::styled(" PATIENT DATA ", THEME.title_style()))
            .borders(Borders::ALL)
            .border_style(THEME.border_style()),
    );

    f.render_widget(table, area);
}

/// Text slider, e.g. `[=====-----------]`.
pub fn slider_bar(ratio: f64) -> String {
    let filled = (ratio.clamp(0.0, 1.0) * BAR_WIDTH as f64).round() as usize;
    format!("[{}{}]", "=".repeat(filled), "-".repeat(BAR_WIDTH - filled))
}
