//! Model information panel

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

use crate::report::ModelInfo;
use crate::tui::app::FormApp;
use crate::tui::theme::THEME;

/// Render the model info panel in place of the result
pub fn render_model_info(f: &mut Frame, area: Rect, app: &FormApp) {
    let info = ModelInfo::from_controller(&app.controller);
    let status_style = if info.loaded {
        THEME.level_style(crate::domain::RiskLevel::Low)
    } else {
        THEME.level_style(crate::domain::RiskLevel::Medium)
    };

    let lines: Vec<Line> = info
        .lines()
        .into_iter()
        .enumerate()
        .map(|(i, l)| {
            if i == 0 {
                Line::from(Span::styled(l, status_style))
            } else {
                Line::from(l)
            }
        })
        .collect();

    let paragraph = Paragraph::new(lines).wrap(Wrap { trim: false }).block(
        Block::default()
            .title(Span::styled(" MODEL INFO ", THEME.title_style()))
            .borders(Borders::ALL)
            .border_style(THEME.border_style()),
    );
    f.render_widget(paragraph, area);
}
