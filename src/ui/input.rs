//! Keyboard input handling.
//!
//! Input is routed to an overlay handler when a dialog is open, otherwise
//! to browse-mode dispatch. Selection and favorite toggling are distinct
//! keys on purpose: toggling a favorite must never also select the row.

use crate::app::{App, AppEvent, Focus, Overlay};
use crate::store::Tab;
use crossterm::event::{KeyCode, KeyModifiers};
use tokio::sync::mpsc;

use super::loop_runner::Action;

/// Maximum length for a new category name (UI layer validation).
const MAX_CATEGORY_NAME_LENGTH: usize = 100;

/// Handle a key press.
pub fn handle_input(
    app: &mut App,
    code: KeyCode,
    modifiers: KeyModifiers,
    event_tx: &mpsc::Sender<AppEvent>,
) -> Action {
    if modifiers.contains(KeyModifiers::CONTROL) && code == KeyCode::Char('c') {
        return Action::Quit;
    }

    if app.overlay.is_some() {
        handle_overlay_input(app, code, event_tx);
        return Action::Continue;
    }

    handle_browse_input(app, code, event_tx)
}

/// Browse-mode dispatch.
fn handle_browse_input(
    app: &mut App,
    code: KeyCode,
    event_tx: &mpsc::Sender<AppEvent>,
) -> Action {
    match code {
        KeyCode::Char('q') => return Action::Quit,

        KeyCode::Tab => {
            app.focus = match app.focus {
                Focus::Sidebar => Focus::Posts,
                Focus::Posts => Focus::Sidebar,
            };
        }

        // Navigation
        KeyCode::Char('j') | KeyCode::Down => match app.focus {
            Focus::Sidebar => {
                let len = app.store.visible().len();
                if len > 0 && app.sidebar_cursor + 1 < len {
                    app.sidebar_cursor += 1;
                }
            }
            Focus::Posts => {
                app.posts_scroll = app.posts_scroll.saturating_add(1);
            }
        },
        KeyCode::Char('k') | KeyCode::Up => match app.focus {
            Focus::Sidebar => {
                app.sidebar_cursor = app.sidebar_cursor.saturating_sub(1);
            }
            Focus::Posts => {
                app.posts_scroll = app.posts_scroll.saturating_sub(1);
            }
        },

        // Selection. Esc clears it, removing the `category` parameter.
        KeyCode::Enter => {
            if app.focus == Focus::Sidebar {
                if let Some(id) = app.cursor_category_id() {
                    app.select_category(Some(id), event_tx);
                }
            }
        }
        KeyCode::Esc => {
            if app.store.selected_id().is_some() {
                app.select_category(None, event_tx);
            }
        }

        // Favorite toggle for the highlighted row. Deliberately does not
        // change the selection.
        KeyCode::Char('f') => {
            if let Some(id) = app.cursor_category_id() {
                app.toggle_favorite(&id, event_tx);
            }
        }

        // Tab filter: client-side only, no refetch.
        KeyCode::Char('a') => {
            app.store.set_tab(Tab::All);
            app.clamp_sidebar_cursor();
        }
        KeyCode::Char('v') => {
            app.store.set_tab(Tab::Favorites);
            app.clamp_sidebar_cursor();
        }

        // Category management overlays
        KeyCode::Char('n') => {
            app.overlay = Some(Overlay::NewCategory {
                input: String::new(),
            });
        }
        KeyCode::Char('d') => {
            if let Some(id) = app.cursor_category_id() {
                let name = app
                    .store
                    .find(&id)
                    .map(|c| c.name.clone())
                    .unwrap_or_else(|| id.clone());
                app.overlay = Some(Overlay::ConfirmDelete {
                    category_id: id,
                    name,
                });
            }
        }

        KeyCode::Char('r') => {
            app.spawn_categories_fetch(event_tx);
            app.set_status("Refreshing categories...");
        }

        KeyCode::Char('s') => {
            app.show_sidebar = !app.show_sidebar;
        }

        // Show the shareable link for the current state.
        KeyCode::Char('y') => {
            let link = app.location.to_string();
            app.set_status(link);
        }

        _ => {}
    }

    Action::Continue
}

/// Input routing while a dialog overlay is open.
fn handle_overlay_input(app: &mut App, code: KeyCode, event_tx: &mpsc::Sender<AppEvent>) {
    let overlay = match app.overlay.take() {
        Some(o) => o,
        None => return,
    };

    match overlay {
        Overlay::NewCategory { mut input } => match code {
            KeyCode::Esc => {}
            KeyCode::Enter => {
                let name = input.trim().to_string();
                if name.is_empty() {
                    app.set_status("Category name cannot be empty");
                } else {
                    app.create_category(name, event_tx);
                }
            }
            KeyCode::Backspace => {
                input.pop();
                app.overlay = Some(Overlay::NewCategory { input });
            }
            KeyCode::Char(c) => {
                if input.len() < MAX_CATEGORY_NAME_LENGTH {
                    input.push(c);
                }
                app.overlay = Some(Overlay::NewCategory { input });
            }
            _ => {
                app.overlay = Some(Overlay::NewCategory { input });
            }
        },

        Overlay::ConfirmDelete { category_id, name } => match code {
            KeyCode::Char('y') | KeyCode::Enter => {
                app.delete_category(category_id, name, event_tx);
            }
            KeyCode::Char('n') | KeyCode::Esc => {}
            _ => {
                app.overlay = Some(Overlay::ConfirmDelete { category_id, name });
            }
        },
    }
}
