pub(self) mod activity;
pub(self) mod bottom;
pub(crate) mod components;
pub mod form;
pub(self) mod title;

use ratatui::prelude::*;

use crate::tui::app::App;

pub fn render_ui(f: &mut Frame, app: &App) {
    let area = f.area();
    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(0)
        .constraints([
            Constraint::Length(1), // Title
            Constraint::Min(0),
            Constraint::Length(bottom::bottom_height(app)), // Bottom help (1 or 2 lines)
        ])
        .split(area);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(main_chunks[1]);

    title::render_title(f, main_chunks[0], app);
    form::render_form(f, body[0], app);
    activity::render_activity(f, body[1], app);
    bottom::render_bottom(f, main_chunks[2], app);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::lang;
    use ratatui::backend::TestBackend;

    fn screen_text(terminal: &Terminal<TestBackend>) -> String {
        let buffer = terminal.backend().buffer();
        let area = buffer.area;
        let mut out = String::new();
        for y in 0..area.height {
            for x in 0..area.width {
                out.push_str(buffer[(x, y)].symbol());
            }
            out.push('\n');
        }
        out
    }

    #[test]
    fn test_render_shows_form_and_error() {
        let backend = TestBackend::new(100, 30);
        let mut terminal = Terminal::new(backend).unwrap();
        let mut app = App::new(vec![1, 2]);
        app.set_udp_checked(true);
        app.set_error("Invalid IPv4 address '1.2.3'");

        terminal.draw(|f| render_ui(f, &app)).unwrap();
        let screen = screen_text(&terminal);
        assert!(screen.contains(&lang().title));
        assert!(screen.contains("[x] UDP"));
        assert!(screen.contains("Invalid IPv4 address"));
        assert!(screen.contains(&lang().status_disconnected));
    }
}
