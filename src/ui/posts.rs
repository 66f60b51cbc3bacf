//! Post list widget.
//!
//! Renders the post state machine: idle prompt when nothing is selected,
//! skeleton placeholders while loading, an inline error on failure, and
//! the post list with a count header when loaded. Each post shows its
//! date, description, and category tags (the selected tag emphasized,
//! favorites starred).

use crate::app::{App, Focus, PostsState};
use crate::api::Post;
use chrono::{DateTime, Datelike, NaiveDate};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

/// Format an ISO-8601 date string as e.g. "Monday, April 7th 2025".
///
/// Parses RFC 3339 first, then a bare `YYYY-MM-DD`; anything else is shown
/// verbatim rather than dropped.
pub fn format_readable_date(date: &str) -> String {
    let parsed = DateTime::parse_from_rfc3339(date)
        .map(|dt| dt.date_naive())
        .or_else(|_| NaiveDate::parse_from_str(date, "%Y-%m-%d"));

    let Ok(date_naive) = parsed else {
        return date.to_string();
    };

    let day = date_naive.day();
    let suffix = match day {
        11..=13 => "th",
        _ => match day % 10 {
            1 => "st",
            2 => "nd",
            3 => "rd",
            _ => "th",
        },
    };

    format!(
        "{}, {} {}{} {}",
        date_naive.format("%A"),
        date_naive.format("%B"),
        day,
        suffix,
        date_naive.year()
    )
}

/// Render the post panel.
pub fn render(f: &mut Frame, app: &App, area: Rect) {
    let is_focused = app.focus == Focus::Posts;
    let border_style = if is_focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .title("Posts");
    let inner = block.inner(area);
    f.render_widget(block, area);

    if inner.width < 3 || inner.height < 1 {
        return;
    }

    match &app.posts {
        PostsState::Idle => {
            let prompt = Paragraph::new("Select a category from the sidebar to view posts")
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Center);
            // Vertically center the prompt line.
            let y = inner.y + inner.height / 2;
            let centered = Rect::new(inner.x, y, inner.width, 1);
            f.render_widget(prompt, centered);
        }

        PostsState::Loading { .. } => {
            render_skeleton(f, inner);
        }

        PostsState::Failed { error, .. } => {
            let lines = vec![
                Line::from(Span::styled(
                    "Error loading posts:",
                    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                )),
                Line::from(Span::styled(
                    error.clone(),
                    Style::default().fg(Color::Red),
                )),
            ];
            f.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), inner);
        }

        PostsState::Loaded { posts, .. } => {
            render_loaded(f, app, posts, inner);
        }
    }
}

/// Placeholder "cards" shown while a fetch is in flight.
fn render_skeleton(f: &mut Frame, area: Rect) {
    let width = area.width.saturating_sub(2) as usize;
    let mut lines = Vec::new();
    for _ in 0..3 {
        lines.push(Line::from(Span::styled(
            "░".repeat(width / 3),
            Style::default().fg(Color::DarkGray),
        )));
        lines.push(Line::from(Span::styled(
            "░".repeat(width),
            Style::default().fg(Color::DarkGray),
        )));
        lines.push(Line::from(Span::styled(
            "░".repeat(width * 5 / 6),
            Style::default().fg(Color::DarkGray),
        )));
        lines.push(Line::default());
    }
    f.render_widget(Paragraph::new(lines), area);
}

/// Render the loaded list: count header, empty-state message, post entries.
fn render_loaded(f: &mut Frame, app: &App, posts: &[Post], area: Rect) {
    let selected_id = app.store.selected_id();
    let header = match app.store.selected_name() {
        Some(name) => format!("Found {} posts of \"{}\"", posts.len(), name),
        None => format!("Found {} posts", posts.len()),
    };

    let mut lines: Vec<Line> = vec![
        Line::from(Span::styled(
            header,
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::default(),
    ];

    if posts.is_empty() {
        let name = app.store.selected_name().unwrap_or("this category");
        lines.push(Line::from(Span::styled(
            format!("No posts found for \"{}\"", name),
            Style::default().fg(Color::DarkGray),
        )));
    }

    for post in posts {
        lines.push(Line::from(Span::styled(
            format_readable_date(&post.date),
            Style::default().fg(Color::DarkGray),
        )));
        lines.push(Line::from(post.description.clone()));

        // Category tags: resolve names from the store, emphasize the
        // selected one, star favorites. Unknown ids render as the raw id.
        let mut spans: Vec<Span> = Vec::new();
        for tag_id in &post.categories {
            let is_selected = selected_id == Some(tag_id.as_str());
            let (label, favorite) = match app.store.find(tag_id) {
                Some(category) => (category.name.clone(), category.favorite),
                None => (tag_id.clone(), false),
            };
            let star = if favorite { "★" } else { "" };
            let style = if is_selected {
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::Blue)
            };
            spans.push(Span::styled(format!("[{}{}]", label, star), style));
            spans.push(Span::raw(" "));
        }
        if !spans.is_empty() {
            lines.push(Line::from(spans));
        }

        lines.push(Line::from(Span::styled(
            "─".repeat(area.width.saturating_sub(2) as usize),
            Style::default().fg(Color::DarkGray),
        )));
    }

    let paragraph = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .scroll((app.posts_scroll, 0));
    f.render_widget(paragraph, area);
}

// ============================================================================
// Tests
// ============================================================================
