use crate::app::{App, Focus};
use ratatui::{
    layout::Rect,
    style::{Color, Style},
    widgets::Paragraph,
    Frame,
};
use std::borrow::Cow;

/// Render the status bar.
pub fn render(f: &mut Frame, app: &App, area: Rect) {
    if area.width < 1 || area.height < 1 {
        return;
    }

    // Cow avoids allocations for the static keybinding hints.
    let text: Cow<'_, str> = if let Some((msg, _)) = &app.status_message {
        Cow::Borrowed(msg.as_ref())
    } else if app.overlay.is_some() {
        Cow::Borrowed("(Enter) confirm  (Esc) cancel")
    } else {
        match app.focus {
            Focus::Sidebar => Cow::Borrowed(
                "[j/k]move [Enter]select [Esc]clear [f]avorite [a/v]tabs [n]ew [d]elete [r]efresh [y]link [Tab]posts [q]uit",
            ),
            Focus::Posts => Cow::Borrowed("[j/k]scroll [Esc]clear selection [Tab]sidebar [y]link [q]uit"),
        }
    };

    let style = Style::default().bg(Color::DarkGray).fg(Color::White);
    f.render_widget(Paragraph::new(text).style(style), area);
}
