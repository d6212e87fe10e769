//! Terminal User Interface module
//!
//! The interactive patient form: eleven fields, a predict key, and a result
//! panel. Runs on the calling thread; every submission is synchronous.

pub mod app;
pub mod event;
pub mod theme;
pub mod ui;
pub mod widgets;

#[cfg(test)]
mod tests;

pub use app::{FormApp, Submission};
pub use event::KeyAction;
pub use theme::Theme;

use std::io;
use std::time::Duration;

use crossterm::{
    event::{Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;

/// Initialize the terminal for TUI mode
pub fn init_terminal() -> io::Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    if let Err(e) = execute!(stdout, EnterAlternateScreen) {
        let _ = disable_raw_mode();
        return Err(e);
    }
    let backend = CrosstermBackend::new(stdout);
    Terminal::new(backend).inspect_err(|_| {
        let _ = restore_terminal();
    })
}

/// Restore the terminal to normal mode
pub fn restore_terminal() -> io::Result<()> {
    disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen)?;
    Ok(())
}

/// Run the form until the user quits
pub fn run_form(mut app: FormApp) -> io::Result<()> {
    let mut terminal = init_terminal()?;
    let result = event_loop(&mut terminal, &mut app);
    settle(result, restore_terminal())
}

/// The loop error wins over a restore error; neither is dropped silently.
fn settle(result: io::Result<()>, restored: io::Result<()>) -> io::Result<()> {
    match (result, restored) {
        (Err(e), Err(restore_err)) => {
            tracing::error!(error = %restore_err, "failed to restore terminal");
            Err(e)
        }
        (result, restored) => result.and(restored),
    }
}

fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut FormApp,
) -> io::Result<()> {
    while app.is_running() {
        terminal.draw(|f| ui::render(f, app))?;

        if crossterm::event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = crossterm::event::read()? {
                if key.kind == KeyEventKind::Press {
                    event::apply(app, KeyAction::from(key));
                }
            }
        }
    }
    Ok(())
}
