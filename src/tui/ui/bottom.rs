use ratatui::{prelude::*, widgets::*};

use crate::{i18n::lang, tui::app::App};

/// Rows the bottom bar needs: the error takes an extra line.
pub fn bottom_height(app: &App) -> u16 {
    if app.error.is_some() {
        2
    } else {
        1
    }
}

pub fn render_bottom(f: &mut Frame, area: Rect, app: &App) {
    let help_block = Block::default().borders(Borders::NONE);

    // If app has an error message, display it on the first line (red),
    // and on the second line show how to dismiss it.
    if let Some(err) = &app.error {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .margin(0)
            .constraints([Constraint::Length(1), Constraint::Length(1)])
            .split(area);

        let err_block = help_block.clone().style(
            Style::default()
                .bg(Color::Red)
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        );
        let p = Paragraph::new(err.as_str())
            .alignment(Alignment::Left)
            .block(err_block);
        f.render_widget(p, rows[0]);

        let instr_block = help_block.style(Style::default().bg(Color::Gray).fg(Color::DarkGray));
        let instr_p = Paragraph::new(lang().press_any_key_clear.as_str())
            .alignment(Alignment::Center)
            .block(instr_block);
        f.render_widget(instr_p, rows[1]);
    } else {
        let help_block = help_block.style(Style::default().bg(Color::Gray).fg(Color::White));
        let help = Paragraph::new(lang().help_short.as_str())
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .block(help_block);
        f.render_widget(help, area);
    }
}
