use ratatui::{prelude::*, widgets::*};

use crate::{i18n::lang, tui::app::App};

pub fn render_title(f: &mut Frame, area: Rect, app: &App) {
    // Horizontal layout: center (title) + right (connection status)
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(10), Constraint::Length(32)])
        .split(area);

    // Background bar
    let bg_block = Block::default()
        .borders(Borders::NONE)
        .style(Style::default().bg(Color::Gray));
    f.render_widget(bg_block, area);

    let title = Paragraph::new(lang().title.as_str())
        .alignment(Alignment::Center)
        .style(
            Style::default()
                .fg(Color::Rgb(0, 100, 0))
                .add_modifier(Modifier::BOLD),
        );
    f.render_widget(title, chunks[0]);

    let (text, style) = match app.session().peer() {
        Some(peer) => (
            format!("● {} {peer}", lang().status_connected),
            Style::default()
                .fg(Color::Rgb(0, 100, 0))
                .add_modifier(Modifier::BOLD),
        ),
        None => (
            format!("○ {}", lang().status_disconnected),
            Style::default().fg(Color::DarkGray),
        ),
    };
    let status = Paragraph::new(text)
        .alignment(Alignment::Right)
        .style(style);
    f.render_widget(status, chunks[1]);
}
