//! Render functions for the TUI.
//!
//! Dispatches to the sidebar and post panel, with dialog overlays drawn on
//! top. The sidebar collapses automatically on narrow terminals.

use crate::app::{App, Overlay};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use super::{posts, sidebar, status};

/// Minimum terminal dimensions required for normal operation.
pub(super) const MIN_WIDTH: u16 = 40;
pub(super) const MIN_HEIGHT: u16 = 8;

/// Below this width the sidebar is hidden even when enabled, leaving the
/// full width to the post list.
const SIDEBAR_MIN_TERMINAL_WIDTH: u16 = 70;

/// Main render dispatch function.
pub(super) fn render(f: &mut Frame, app: &App) {
    let area = f.area();
    if area.width == 0 || area.height == 0 {
        return;
    }

    if area.width < MIN_WIDTH || area.height < MIN_HEIGHT {
        render_too_small(f, area);
        return;
    }

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(area);

    render_main_panels(f, app, rows[0]);
    status::render(f, app, rows[1]);

    if let Some(ref overlay) = app.overlay {
        render_overlay(f, overlay, area);
    }
}

/// Shown instead of the normal layout when the terminal is below the
/// minimum size.
fn render_too_small(f: &mut Frame, area: Rect) {
    let text = if area.width < 24 || area.height < 4 {
        "Too small".to_string()
    } else {
        format!(
            "Terminal too small\nneed {}x{}, have {}x{}",
            MIN_WIDTH, MIN_HEIGHT, area.width, area.height
        )
    };
    f.render_widget(Paragraph::new(text).alignment(Alignment::Center), area);
}

/// Render the main panels (sidebar + posts).
///
/// The sidebar shows when enabled and the terminal is wide enough;
/// otherwise the post list takes the full width.
fn render_main_panels(f: &mut Frame, app: &App, area: Rect) {
    if app.show_sidebar && area.width >= SIDEBAR_MIN_TERMINAL_WIDTH {
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(30), Constraint::Percentage(70)])
            .split(area);

        sidebar::render(f, app, columns[0]);
        posts::render(f, app, columns[1]);
    } else {
        posts::render(f, app, area);
    }
}

/// Render a dialog overlay centered on screen.
fn render_overlay(f: &mut Frame, overlay: &Overlay, area: Rect) {
    let (title, text) = match overlay {
        Overlay::NewCategory { input } => (
            " New Category ",
            format!("Name:\n\n> {}_\n\n(Enter) Create  (Esc) Cancel", input),
        ),
        Overlay::ConfirmDelete { name, .. } => (
            " Confirm ",
            format!(
                "Delete \"{}\"?\n\nPosts keep their tag; only the category is removed.\n\n(y) Confirm  (n/Esc) Cancel",
                name
            ),
        ),
    };

    let width = 50u16.min(area.width.saturating_sub(4));
    let height = 8u16.min(area.height.saturating_sub(4));
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    let overlay_area = Rect::new(x, y, width, height);

    if overlay_area.width < 20 || overlay_area.height < 5 {
        return;
    }

    f.render_widget(Clear, overlay_area);

    let paragraph = Paragraph::new(text)
        .block(Block::default().borders(Borders::ALL).title(title))
        .alignment(Alignment::Left)
        .wrap(ratatui::widgets::Wrap { trim: true });

    f.render_widget(paragraph, overlay_area);
}
