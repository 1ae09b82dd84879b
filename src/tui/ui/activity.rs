use ratatui::{
    prelude::*,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};

use crate::{
    i18n::lang,
    tui::app::{ActivityLevel, App},
};

/// Newest entries that fit in `area`, oldest first.
pub fn render_activity(f: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .title(format!(" {}", lang().activity))
        .borders(Borders::ALL)
        .border_type(BorderType::Plain);

    if app.activity.is_empty() {
        let p = Paragraph::new(Span::styled(
            lang().activity_empty.clone(),
            Style::default().fg(Color::DarkGray),
        ))
        .block(block);
        f.render_widget(p, area);
        return;
    }

    // Account for Block borders: the content area is two rows shorter
    let visible = area.height.saturating_sub(2) as usize;
    let skip = app.activity.len().saturating_sub(visible);
    let lines: Vec<Line> = app
        .activity
        .iter()
        .skip(skip)
        .map(|entry| {
            let color = match entry.level {
                ActivityLevel::Info => Color::Reset,
                ActivityLevel::Warn => Color::Yellow,
                ActivityLevel::Error => Color::Red,
            };
            Line::from(vec![
                Span::styled(
                    entry.at.format("%H:%M:%S ").to_string(),
                    Style::default().fg(Color::DarkGray),
                ),
                Span::styled(entry.text.clone(), Style::default().fg(color)),
            ])
        })
        .collect();

    f.render_widget(Paragraph::new(lines).block(block), area);
}
