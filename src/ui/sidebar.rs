//! Category sidebar widget.
//!
//! Tab filter (all / favorites), one selectable row per category with a
//! favorite star, skeleton placeholders while loading, an inline error on
//! fetch failure, and per-tab empty-state messages.

use crate::app::{App, Focus};
use crate::store::Tab;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

/// Number of skeleton placeholder rows shown while the list loads.
const SKELETON_ROWS: usize = 6;

/// Render the category sidebar panel.
pub fn render(f: &mut Frame, app: &App, area: Rect) {
    if area.width < 3 || area.height < 4 {
        return;
    }

    let is_focused = app.focus == Focus::Sidebar;
    let border_style = if is_focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .title("Categories");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(0)])
        .split(inner);

    render_tabs(f, app, rows[0]);
    render_list(f, app, rows[1]);
}

/// Render the all/favorites tab line.
fn render_tabs(f: &mut Frame, app: &App, area: Rect) {
    let active = Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD);
    let inactive = Style::default().fg(Color::DarkGray);

    let (all_style, fav_style) = match app.store.tab() {
        Tab::All => (active, inactive),
        Tab::Favorites => (inactive, active),
    };

    let line = Line::from(vec![
        Span::styled("[a] All", all_style),
        Span::raw("  "),
        Span::styled("[v] Favorites", fav_style),
    ]);
    f.render_widget(Paragraph::new(line), area);
}

/// Render the loading/error/empty/list body.
fn render_list(f: &mut Frame, app: &App, area: Rect) {
    if app.store.is_loading() {
        let skeleton: Vec<Line> = (0..SKELETON_ROWS.min(area.height as usize))
            .map(|_| {
                Line::from(Span::styled(
                    "░".repeat(area.width.saturating_sub(2) as usize),
                    Style::default().fg(Color::DarkGray),
                ))
            })
            .collect();
        f.render_widget(Paragraph::new(skeleton), area);
        return;
    }

    if let Some(error) = app.store.error() {
        let paragraph = Paragraph::new(format!("Error loading categories: {}", error))
            .style(Style::default().fg(Color::Red))
            .wrap(ratatui::widgets::Wrap { trim: true });
        f.render_widget(paragraph, area);
        return;
    }

    let visible = app.store.visible();
    if visible.is_empty() {
        let message = match app.store.tab() {
            Tab::Favorites => "No favorite categories marked yet.",
            Tab::All => "No categories found.",
        };
        let paragraph = Paragraph::new(message)
            .style(Style::default().fg(Color::DarkGray))
            .wrap(ratatui::widgets::Wrap { trim: true });
        f.render_widget(paragraph, area);
        return;
    }

    let selected_id = app.store.selected_id();
    let items: Vec<ListItem> = visible
        .iter()
        .enumerate()
        .map(|(i, category)| {
            let is_cursor = i == app.sidebar_cursor;
            let is_selected = selected_id == Some(category.id.as_str());

            let star = if category.favorite { "★ " } else { "☆ " };
            let star_style = if category.favorite {
                Style::default().fg(Color::Yellow)
            } else {
                Style::default().fg(Color::DarkGray)
            };

            let name_style = if is_cursor {
                Style::default().bg(Color::DarkGray).fg(Color::White)
            } else if is_selected {
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };

            let marker = if is_selected { "> " } else { "  " };

            ListItem::new(Line::from(vec![
                Span::raw(marker),
                Span::styled(star, star_style),
                Span::styled(category.name.clone(), name_style),
            ]))
        })
        .collect();

    let list = List::new(items);
    let mut state = ListState::default().with_selected(Some(app.sidebar_cursor));
    f.render_stateful_widget(list, area, &mut state);
}
