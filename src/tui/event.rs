//! Keyboard handling for the form

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::tui::app::FormApp;

/// Key action derived from key event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    /// Quit the application
    Quit,
    /// Focus previous field
    FocusUp,
    /// Focus next field
    FocusDown,
    /// Slider up / next option
    Increase,
    /// Slider down / previous option
    Decrease,
    /// Run the prediction
    Submit,
    /// Restore defaults
    Reset,
    /// Show model info
    ToggleInfo,
    /// Show submitted data
    ToggleData,
    /// Show help
    Help,
    /// No action
    None,
}

impl From<KeyEvent> for KeyAction {
    fn from(key: KeyEvent) -> Self {
        match key.code {
            KeyCode::Char('q') => KeyAction::Quit,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => KeyAction::Quit,
            KeyCode::Esc => KeyAction::Quit,
            KeyCode::Up | KeyCode::Char('k') | KeyCode::BackTab => KeyAction::FocusUp,
            KeyCode::Down | KeyCode::Char('j') | KeyCode::Tab => KeyAction::FocusDown,
            KeyCode::Right | KeyCode::Char('l') | KeyCode::Char('+') => KeyAction::Increase,
            KeyCode::Left | KeyCode::Char('h') | KeyCode::Char('-') => KeyAction::Decrease,
            KeyCode::Enter | KeyCode::Char('p') => KeyAction::Submit,
            KeyCode::Char('r') => KeyAction::Reset,
            KeyCode::Char('i') => KeyAction::ToggleInfo,
            KeyCode::Char('d') => KeyAction::ToggleData,
            KeyCode::Char('?') => KeyAction::Help,
            _ => KeyAction::None,
        }
    }
}

/// Apply one action to the app state.
pub fn apply(app: &mut FormApp, action: KeyAction) {
    // While help is open any key just closes it.
    if app.show_help && action != KeyAction::None {
        app.show_help = false;
        return;
    }

    match action {
        KeyAction::Quit => app.quit(),
        KeyAction::FocusUp => app.focus_prev(),
        KeyAction::FocusDown => app.focus_next(),
        KeyAction::Increase => app.increase(),
        KeyAction::Decrease => app.decrease(),
        KeyAction::Submit => {
            app.submit();
        }
        KeyAction::Reset => app.reset(),
        KeyAction::ToggleInfo => app.toggle_info(),
        KeyAction::ToggleData => app.toggle_data(),
        KeyAction::Help => app.toggle_help(),
        KeyAction::None => {}
    }
}
