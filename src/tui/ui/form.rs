use ratatui::{
    prelude::*,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Wrap},
};

use crate::{
    i18n::lang,
    protocol::{sensor::SensorState, transport::TransportKind},
    tui::{
        app::{App, Field, Focus},
        ui::components::{
            button_spans, checkbox_spans, input_spans_with_placeholder, render_kv_line,
            render_plain_line, selector_spans, TextState,
        },
    },
};

fn state_for(app: &App, control: Focus) -> TextState {
    if app.focus != control {
        TextState::Normal
    } else if control.field().is_some() || matches!(control, Focus::Sensor | Focus::State) {
        TextState::Editing
    } else {
        TextState::Selected
    }
}

fn section_title(text: &str) -> Line<'static> {
    Line::from(Span::styled(
        format!(" {text}"),
        Style::default()
            .fg(Color::Rgb(0, 150, 0))
            .add_modifier(Modifier::BOLD),
    ))
}

fn field_line(app: &App, control: Focus, field: Field, label: &str, placeholder: &str) -> Line<'static> {
    let state = state_for(app, control);
    render_kv_line(
        label,
        state,
        input_spans_with_placeholder(app.field(field), placeholder, state),
    )
}

/// Build the form rows for the current selection.
pub fn form_lines(app: &App) -> Vec<Line<'static>> {
    let lang = lang();
    let mut lines: Vec<Line> = Vec::new();

    lines.push(section_title(&lang.transport_group));
    lines.push(render_plain_line(
        state_for(app, Focus::UdpCheck),
        checkbox_spans(
            &lang.transport_udp,
            app.udp_checked(),
            state_for(app, Focus::UdpCheck),
        ),
    ));
    lines.push(render_plain_line(
        state_for(app, Focus::SerialCheck),
        checkbox_spans(
            &lang.transport_serial,
            app.serial_checked(),
            state_for(app, Focus::SerialCheck),
        ),
    ));
    lines.push(Line::from(""));

    let Some(kind) = app.selection() else {
        lines.push(Line::from(Span::styled(
            format!("  {}", lang.select_transport_hint),
            Style::default().fg(Color::DarkGray),
        )));
        return lines;
    };

    match kind {
        TransportKind::Udp => {
            lines.push(field_line(app, Focus::Ip, Field::Ip, &lang.label_ip, &lang.placeholder_ip));
            lines.push(field_line(
                app,
                Focus::Port,
                Field::Port,
                &lang.label_port,
                &lang.placeholder_port,
            ));
        }
        TransportKind::Serial => {
            lines.push(field_line(
                app,
                Focus::PortName,
                Field::PortName,
                &lang.label_port_name,
                &lang.placeholder_port_name,
            ));
            lines.push(field_line(
                app,
                Focus::Baud,
                Field::Baud,
                &lang.label_baud,
                &lang.placeholder_baud,
            ));
            let detected = if app.serial_ports.is_empty() {
                lang.no_detected_ports.clone()
            } else {
                format!("{} {}", lang.detected_ports, app.serial_ports.join(", "))
            };
            lines.push(Line::from(Span::styled(
                format!("  {detected}"),
                Style::default().fg(Color::DarkGray),
            )));
        }
    }

    lines.push(render_plain_line(
        state_for(app, Focus::Connect),
        button_spans(app.connect_label(), state_for(app, Focus::Connect)),
    ));
    lines.push(Line::from(""));

    lines.push(section_title(&lang.sensor_group));
    let sensor_state = state_for(app, Focus::Sensor);
    let sensor_text = app
        .selected_sensor()
        .map(|id| id.to_string())
        .unwrap_or_else(|| lang.no_sensors.clone());
    lines.push(render_kv_line(
        &lang.label_sensor,
        sensor_state,
        selector_spans(&sensor_text, sensor_state),
    ));

    let state_state = state_for(app, Focus::State);
    let state: SensorState = app.selected_state();
    lines.push(render_kv_line(
        &lang.label_state,
        state_state,
        selector_spans(&format!("{} ({})", state.label(), state.code()), state_state),
    ));
    lines.push(render_plain_line(
        state_for(app, Focus::Send),
        button_spans(&lang.send, state_for(app, Focus::Send)),
    ));

    lines
}

pub fn render_form(f: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Plain);
    let paragraph = Paragraph::new(form_lines(app))
        .block(block)
        .wrap(Wrap { trim: false });
    f.render_widget(paragraph, area);
}
