use ratatui::{
    style::{Color, Modifier, Style},
    text::Span,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextState {
    Normal,
    Selected,
    Editing,
}

/// `[x] label` checkbox.
pub fn checkbox_spans(label: &str, checked: bool, state: TextState) -> Vec<Span<'static>> {
    let mark = if checked { "[x] " } else { "[ ] " };
    let style = match state {
        TextState::Normal => Style::default(),
        TextState::Selected | TextState::Editing => Style::default()
            .fg(Color::Green)
            .add_modifier(Modifier::BOLD),
    };
    vec![
        Span::styled(mark.to_string(), style),
        Span::styled(label.to_string(), style),
    ]
}

/// `[ label ]` push button.
pub fn button_spans(label: &str, state: TextState) -> Vec<Span<'static>> {
    let text = format!("[ {label} ]");
    match state {
        TextState::Normal => vec![Span::raw(text)],
        TextState::Selected | TextState::Editing => vec![Span::styled(
            text,
            Style::default()
                .bg(Color::Rgb(0, 128, 0))
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )],
    }
}

/// Dropdown value; shows `< value >` arrows while focused.
pub fn selector_spans(value: &str, state: TextState) -> Vec<Span<'static>> {
    match state {
        TextState::Normal => vec![Span::raw(value.to_string())],
        TextState::Selected => vec![Span::styled(
            value.to_string(),
            Style::default().fg(Color::Green),
        )],
        TextState::Editing => {
            let arrow = Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD);
            vec![
                Span::styled("< ", arrow),
                Span::styled(value.to_string(), Style::default().fg(Color::Yellow)),
                Span::styled(" >", arrow),
            ]
        }
    }
}

/// Input spans with placeholder support
/// When current_value is empty, displays placeholder in gray italic
pub fn input_spans_with_placeholder(
    current_value: &str,
    placeholder: &str,
    state: TextState,
) -> Vec<Span<'static>> {
    let placeholder_style = |color| {
        Style::default()
            .fg(color)
            .add_modifier(Modifier::ITALIC)
    };

    let mut out: Vec<Span> = Vec::new();
    match state {
        TextState::Normal => {
            if current_value.is_empty() {
                out.push(Span::styled(
                    placeholder.to_string(),
                    placeholder_style(Color::DarkGray),
                ));
            } else {
                out.push(Span::raw(current_value.to_string()));
            }
        }
        TextState::Selected => {
            if current_value.is_empty() {
                out.push(Span::styled(
                    placeholder.to_string(),
                    placeholder_style(Color::Gray),
                ));
            } else {
                out.push(Span::styled(
                    current_value.to_string(),
                    Style::default().fg(Color::Green),
                ));
            }
        }
        TextState::Editing => {
            out.push(Span::styled(
                current_value.to_string(),
                Style::default().fg(Color::Yellow),
            ));
            out.push(Span::styled(
                "_",
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::SLOW_BLINK),
            ));
        }
    }
    out
}
