//! Result panel
//!
//! Shows the last outcome: model result with a confidence gauge and guidance,
//! the heuristic estimate in demo mode, or the error listing.

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Gauge, Paragraph, Row as TableRow, Table, Wrap};

use crate::controller::Outcome;
use crate::domain::RiskLevel;
use crate::report::{self, percent};
use crate::tui::app::FormApp;
use crate::tui::theme::THEME;

fn panel(title: &str) -> Block<'_> {
    Block::default()
        .title(Span::styled(title, THEME.title_style()))
        .borders(Borders::ALL)
        .border_style(THEME.border_style())
}

/// Render the result panel
pub fn render_result(f: &mut Frame, area: Rect, app: &FormApp) {
    let Some(submission) = &app.last else {
        let mut lines = Vec::new();
        // A failed load is shown up front; the log may not be visible.
        if let Some(notice) = app.controller.notice() {
            lines.push(Line::from(Span::styled(
                format!("  {notice}"),
                THEME.level_style(RiskLevel::Medium),
            )));
        }
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "  Adjust the fields and press Enter to predict",
            THEME.inactive_style(),
        )));
        let hint = Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .block(panel(" RESULT "));
        f.render_widget(hint, area);
        return;
    };

    let (main, data) = if app.show_data {
        let chunks = Layout::vertical([Constraint::Min(8), Constraint::Length(13)]).split(area);
        (chunks[0], Some(chunks[1]))
    } else {
        (area, None)
    };

    match &submission.outcome {
        Outcome::Ok(prediction) => {
            let rendered = report::render_result(prediction.label, prediction.probabilities);
            let style = THEME.level_style(rendered.level);
            let chunks = Layout::vertical([
                Constraint::Length(4),
                Constraint::Length(3),
                Constraint::Min(3),
            ])
            .split(main);

            let header = Paragraph::new(vec![
                Line::from(Span::styled(rendered.headline.clone(), style)),
                Line::from(vec![
                    Span::styled(format!("{}: ", rendered.metric_label), THEME.inactive_style()),
                    Span::styled(rendered.metric_value.clone(), style),
                ]),
            ])
            .block(panel(" RESULT "));
            f.render_widget(header, chunks[0]);

            let gauge = Gauge::default()
                .block(panel(" CONFIDENCE "))
                .gauge_style(style)
                .ratio(rendered.progress.clamp(0.0, 1.0))
                .label(format!("Model confidence: {}", percent(rendered.progress)));
            f.render_widget(gauge, chunks[1]);

            let title = match rendered.level {
                RiskLevel::High => " RECOMMENDED ",
                _ => " KEEP GOING ",
            };
            let guidance: Vec<Line> = rendered
                .guidance
                .iter()
                .map(|g| Line::from(format!("  - {g}")))
                .collect();
            f.render_widget(Paragraph::new(guidance).block(panel(title)), chunks[2]);
        }
        Outcome::ModelUnavailable(fallback) => {
            let rendered = report::render_fallback(fallback);
            let style = THEME.level_style(rendered.level);
            let body = Paragraph::new(vec![
                Line::from(Span::styled(rendered.notice, THEME.inactive_style())),
                Line::from(""),
                Line::from(Span::styled(rendered.headline, style)),
                Line::from(vec![
                    Span::styled(format!("{}: ", rendered.metric_label), THEME.inactive_style()),
                    Span::styled(rendered.metric_value, style),
                ]),
            ])
            .block(panel(" ESTIMATE "));
            f.render_widget(body, main);
        }
        Outcome::InferenceError(failure) => {
            let lines: Vec<Line> = report::failure_lines(failure)
                .into_iter()
                .enumerate()
                .map(|(i, l)| {
                    if i == 0 {
                        Line::from(Span::styled(l, THEME.error_style()))
                    } else {
                        Line::from(l)
                    }
                })
                .collect();
            let body = Paragraph::new(lines)
                .wrap(Wrap { trim: false })
                .block(panel(" ERROR "));
            f.render_widget(body, main);
        }
    }

    if let Some(area) = data {
        render_submitted(f, area, app);
    }
}

/// Column, value and dtype of the row that was submitted.
fn render_submitted(f: &mut Frame, area: Rect, app: &FormApp) {
    let Some(submission) = &app.last else {
        return;
    };

    let rows: Vec<TableRow> = submission
        .row
        .columns()
        .iter()
        .map(|(name, cell)| {
            TableRow::new(vec![
                Span::styled(name.clone(), THEME.inactive_style()),
                Span::styled(cell.to_string(), THEME.text_style()),
                Span::styled(cell.dtype(), THEME.inactive_style()),
            ])
        })
        .collect();

    let title = format!(" SUBMITTED {} ", submission.at.format("%H:%M:%S"));
    let table = Table::new(
        rows,
        [
            Constraint::Length(16),
            Constraint::Length(10),
            Constraint::Min(8),
        ],
    )
    .block(panel(&title));
    f.render_widget(table, area);
}
