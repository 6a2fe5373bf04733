//! Runtime: terminal lifecycle and the event loop.
//!
//! Responsibilities
//! - Own the terminal lifecycle (enter/leave alternate screen, raw mode,
//!   mouse capture).
//! - Read terminal events from crossterm's async `EventStream` and hand each
//!   to [`MainView::dispatch`].
//! - Render only after an event was handled, and once at startup.
//! - Leave on Ctrl+C (as a key or a signal), when the input stream ends, or
//!   when the app asks to quit.
use anyhow::Result;
use crossterm::event::{DisableMouseCapture, EnableMouseCapture, Event, EventStream, KeyCode, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode};
use futures_util::StreamExt;
use ratatui::{Terminal, prelude::*};
use tokio::signal;
use tracing::{debug, info, warn};

use crate::app::App;
use crate::ui::components::Component;
use crate::ui::main_component::MainView;

/// Put the terminal into raw mode and enter the alternate screen.
///
/// Returns a ratatui `Terminal` backed by Crossterm for later drawing.
fn setup_terminal() -> Result<Terminal<CrosstermBackend<std::io::Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

/// Restore terminal settings and leave the alternate screen.
fn cleanup_terminal(terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;
    Ok(())
}

fn render(terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>, app: &mut App, main_view: &mut MainView) -> Result<()> {
    terminal.draw(|frame| main_view.render(frame, frame.area(), app))?;
    Ok(())
}

fn is_ctrl_c(event: &Event) -> bool {
    matches!(
        event,
        Event::Key(key)
            if key.kind == KeyEventKind::Press
                && key.code == KeyCode::Char('c')
                && key.modifiers.contains(KeyModifiers::CONTROL)
    )
}

/// Entry point for the TUI runtime: sets up the terminal, runs the event
/// loop, and restores the terminal even when the loop fails.
pub async fn run_app(mut app: App) -> Result<()> {
    let mut main_view = MainView::new(&app);
    let mut terminal = setup_terminal()?;
    let outcome = event_loop(&mut terminal, &mut app, &mut main_view).await;
    cleanup_terminal(&mut terminal)?;
    outcome
}

async fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    app: &mut App,
    main_view: &mut MainView,
) -> Result<()> {
    let mut events = EventStream::new();
    render(terminal, app, main_view)?;
    info!(fields = app.fields.len(), "huepick started");

    loop {
        tokio::select! {
            maybe_event = events.next() => {
                match maybe_event {
                    Some(Ok(event)) => {
                        if is_ctrl_c(&event) {
                            debug!("ctrl+c pressed");
                            break;
                        }
                        main_view.dispatch(app, event);
                    }
                    Some(Err(error)) => {
                        warn!("Failed to read event: {}", error);
                        break;
                    }
                    // Input stream closed; shut down cleanly.
                    None => break,
                }
            }
            _ = signal::ctrl_c() => {
                debug!("interrupt received");
                break;
            }
        }

        if app.should_quit {
            break;
        }
        render(terminal, app, main_view)?;
    }

    info!("huepick exiting");
    Ok(())
}

#[cfg(test)]
mod tests {
    use crossterm::event::KeyEvent;

    use super::*;

    #[test]
    fn ctrl_c_is_recognized_only_with_control() {
        assert!(is_ctrl_c(&Event::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL))));
        assert!(!is_ctrl_c(&Event::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::NONE))));
        assert!(!is_ctrl_c(&Event::Resize(10, 10)));
    }
}
