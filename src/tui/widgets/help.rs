//! Help overlay

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::tui::theme::THEME;

pub const KEY_HELP: [(&str, &str); 9] = [
    ("Up/Down, k/j", "move between fields"),
    ("Left/Right, h/l", "adjust value"),
    ("Enter", "predict"),
    ("r", "reset form"),
    ("i", "model info"),
    ("d", "submitted data"),
    ("?", "toggle help"),
    ("q, Esc", "quit"),
    ("", "any key closes this window"),
];

/// Render the help popup centered over `area`
pub fn render_help(f: &mut Frame, area: Rect) {
    let popup = centered(area, 52, KEY_HELP.len() as u16 + 2);
    let lines: Vec<Line> = KEY_HELP
        .iter()
        .map(|(key, action)| {
            Line::from(vec![
                Span::styled(format!(" {key:<18}"), THEME.focus_style()),
                Span::styled(*action, THEME.text_style()),
            ])
        })
        .collect();

    f.render_widget(Clear, popup);
    f.render_widget(
        Paragraph::new(lines).block(
            Block::default()
                .title(Span::styled(" HELP ", THEME.title_style()))
                .borders(Borders::ALL)
                .border_style(THEME.border_style()),
        ),
        popup,
    );
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}
