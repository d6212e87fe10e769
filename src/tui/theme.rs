//! Theme and color definitions for the form
//!
//! Cyan borders, red for high risk, yellow for medium, green for low.

use ratatui::style::{Color, Modifier, Style};

use crate::domain::RiskLevel;

/// Theme configuration
#[derive(Debug, Clone)]
pub struct Theme {
    /// Border color (cyan)
    pub border: Color,
    /// Title color
    pub title: Color,
    /// High risk (red)
    pub high: Color,
    /// Medium risk (yellow)
    pub medium: Color,
    /// Low risk (green)
    pub low: Color,
    /// Focused field accent
    pub focus: Color,
    /// Inactive/dim color
    pub inactive: Color,
    /// Normal text color
    pub text: Color,
    /// Progress bar filled color
    pub progress_filled: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            border: Color::Cyan,
            title: Color::Cyan,
            high: Color::Red,
            medium: Color::Yellow,
            low: Color::Green,
            focus: Color::Yellow,
            inactive: Color::DarkGray,
            text: Color::White,
            progress_filled: Color::Cyan,
        }
    }
}

impl Theme {
    /// Get style for borders
    pub fn border_style(&self) -> Style {
        Style::default().fg(self.border)
    }

    /// Get style for titles
    pub fn title_style(&self) -> Style {
        Style::default().fg(self.title).add_modifier(Modifier::BOLD)
    }

    /// Get style for the focused row
    pub fn focus_style(&self) -> Style {
        Style::default().fg(self.focus).add_modifier(Modifier::BOLD)
    }

    /// Get style for inactive/dim text
    pub fn inactive_style(&self) -> Style {
        Style::default().fg(self.inactive)
    }

    /// Get style for normal text
    pub fn text_style(&self) -> Style {
        Style::default().fg(self.text)
    }

    pub fn progress_style(&self) -> Style {
        Style::default().fg(self.progress_filled)
    }

    /// Get style for a risk band
    pub fn level_style(&self, level: RiskLevel) -> Style {
        let color = match level {
            RiskLevel::High => self.high,
            RiskLevel::Medium => self.medium,
            RiskLevel::Low => self.low,
        };
        Style::default().fg(color).add_modifier(Modifier::BOLD)
    }

    pub fn error_style(&self) -> Style {
        Style::default().fg(self.high)
    }
}

/// Global theme instance
pub static THEME: std::sync::LazyLock<Theme> = std::sync::LazyLock::new(Theme::default);
