//! Main event loop for the TUI.
//!
//! Multiplexes terminal input, background task events, and a periodic tick
//! with `tokio::select!`. All state mutation happens here on the UI task;
//! background tasks only communicate through the `AppEvent` channel.

use crate::app::{App, AppEvent};
use anyhow::Result;
use crossterm::event::{Event, EventStream};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use futures::StreamExt;
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use std::io::{self, Stdout};
use std::time::Duration;
use tokio::sync::mpsc;

#[cfg(unix)]
use tokio::signal::unix::{signal, SignalKind};

use super::events::handle_app_event;
use super::input::handle_input;
use super::render::render;

/// How often the loop wakes without input, for status-message expiry.
const TICK_PERIOD: Duration = Duration::from_millis(250);

/// Result of handling a key press event.
pub enum Action {
    /// Continue the event loop and process more events.
    Continue,
    /// Exit the application and restore the terminal.
    Quit,
}

/// Run the event loop until the user quits or a shutdown signal arrives.
///
/// Three event sources are multiplexed (plus SIGINT/SIGTERM on Unix):
/// crossterm's async input stream, the `AppEvent` channel carrying fetch
/// and mutation results, and the periodic tick. Frames are drawn only when
/// the dirty flag is set.
///
/// A panic hook restores the terminal before unwinding so a panic never
/// leaves the shell in raw mode.
pub async fn run(
    app: &mut App,
    event_tx: mpsc::Sender<AppEvent>,
    mut event_rx: mpsc::Receiver<AppEvent>,
) -> Result<()> {
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        default_hook(info);
    }));

    let mut terminal = enter_terminal()?;
    let mut input = EventStream::new();
    let mut tick = tokio::time::interval(TICK_PERIOD);

    #[cfg(unix)]
    let mut sigterm = signal(SignalKind::terminate())?;
    #[cfg(unix)]
    let mut sigint = signal(SignalKind::interrupt())?;

    'main: loop {
        if app.needs_redraw {
            terminal.draw(|f| render(f, app))?;
            app.needs_redraw = false;
        }

        // Drain queued task events before blocking so fetch results land
        // promptly even while the user is typing.
        while let Ok(event) = event_rx.try_recv() {
            app.needs_redraw = true;
            handle_app_event(app, event);
        }

        #[cfg(unix)]
        let term_signal = sigterm.recv();
        #[cfg(not(unix))]
        let term_signal = std::future::pending::<Option<()>>();

        #[cfg(unix)]
        let int_signal = sigint.recv();
        #[cfg(not(unix))]
        let int_signal = std::future::pending::<Option<()>>();

        tokio::select! {
            biased;  // Process in order listed for predictable behavior

            _ = term_signal => {
                tracing::info!("Received SIGTERM, shutting down");
                break 'main;
            }

            _ = int_signal => {
                tracing::info!("Received SIGINT, shutting down");
                break 'main;
            }

            maybe_event = input.next() => {
                match maybe_event {
                    Some(Ok(Event::Key(key))) => {
                        app.needs_redraw = true;
                        if let Action::Quit = handle_input(app, key.code, key.modifiers, &event_tx) {
                            break 'main;
                        }
                    }
                    // A resize invalidates the whole frame.
                    Some(Ok(Event::Resize(..))) => app.needs_redraw = true,
                    Some(Ok(_)) => {}
                    Some(Err(e)) => tracing::warn!(error = %e, "Terminal input error"),
                    None => break 'main,
                }
            }

            Some(event) = event_rx.recv() => {
                app.needs_redraw = true;
                handle_app_event(app, event);
            }

            _ = tick.tick() => handle_tick(app),
        }
    }

    leave_terminal(terminal)
}

/// Periodic housekeeping: expire the status-bar message.
fn handle_tick(app: &mut App) {
    if app.clear_expired_status() {
        app.needs_redraw = true;
    }
}

/// Switch to the alternate screen in raw mode.
fn enter_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
    enable_raw_mode()?;
    execute!(io::stdout(), EnterAlternateScreen)?;
    Ok(Terminal::new(CrosstermBackend::new(io::stdout()))?)
}

/// Hand the terminal back to the shell.
fn leave_terminal(mut terminal: Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}
