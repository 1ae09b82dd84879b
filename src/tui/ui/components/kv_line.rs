use ratatui::{prelude::*, style::Modifier, text::Line};
use unicode_width::UnicodeWidthStr;

use super::styled_label::TextState;

pub(crate) const LABEL_PADDING_EXTRA: usize = 2;
pub(crate) const TARGET_LABEL_WIDTH: usize = 12;
pub(crate) const INDICATOR_SELECTED: &str = "> ";
pub(crate) const INDICATOR_UNSELECTED: &str = "  ";

/// Focus indicator column shared by every form row.
pub fn indicator_span(text_state: TextState) -> Span<'static> {
    let text = match text_state {
        TextState::Selected | TextState::Editing => INDICATOR_SELECTED,
        TextState::Normal => INDICATOR_UNSELECTED,
    };
    let style = match text_state {
        TextState::Editing => Style::default().fg(Color::Yellow),
        TextState::Selected => Style::default().fg(Color::Green),
        TextState::Normal => Style::default(),
    };
    Span::styled(text, style)
}

/// Render a three-column line: focus indicator, bold label padded to a
/// common width (CJK/Turkish aware), then the value spans.
pub fn render_kv_line(
    label: &str,
    text_state: TextState,
    value_spans: Vec<Span<'static>>,
) -> Line<'static> {
    let label_width = label.width();
    let padding_needed = if label_width < TARGET_LABEL_WIDTH {
        TARGET_LABEL_WIDTH - label_width + LABEL_PADDING_EXTRA
    } else {
        LABEL_PADDING_EXTRA
    };

    let mut spans: Vec<Span> = vec![
        indicator_span(text_state),
        Span::styled(
            label.to_string(),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::raw(" ".repeat(padding_needed)),
    ];
    spans.extend(value_spans);

    Line::from(spans)
}

/// A row without a label column (checkboxes, buttons).
pub fn render_plain_line(text_state: TextState, value_spans: Vec<Span<'static>>) -> Line<'static> {
    let mut spans = vec![indicator_span(text_state)];
    spans.extend(value_spans);
    Line::from(spans)
}
