use chrono::{DateTime, Local};
use std::collections::VecDeque;

use crate::{
    protocol::{
        payload::Payload,
        sensor::{SensorId, SensorState},
        session::{SendOutcome, Session},
        transport::{Endpoint, TransportKind},
    },
    tui::input::Action,
    utils::ports::enumerate_port_names,
};

/// Entries kept in the activity panel.
pub const ACTIVITY_CAPACITY: usize = 200;

/// Focusable controls, in on-screen order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    UdpCheck,
    SerialCheck,
    Ip,
    Port,
    PortName,
    Baud,
    Connect,
    Sensor,
    State,
    Send,
}

impl Focus {
    /// The text field behind this control, if it is one.
    pub fn field(self) -> Option<Field> {
        match self {
            Focus::Ip => Some(Field::Ip),
            Focus::Port => Some(Field::Port),
            Focus::PortName => Some(Field::PortName),
            Focus::Baud => Some(Field::Baud),
            _ => None,
        }
    }
}

/// Editable transport parameter fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Ip,
    Port,
    PortName,
    Baud,
}

impl Field {
    fn accepts(self, c: char) -> bool {
        match self {
            Field::Ip => c.is_ascii_digit() || c == '.',
            Field::Port | Field::Baud => c.is_ascii_digit(),
            Field::PortName => !c.is_control(),
        }
    }

    fn max_len(self) -> usize {
        match self {
            Field::Ip => 15,
            Field::Port => 5,
            Field::Baud => 7,
            Field::PortName => 64,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivityLevel {
    Info,
    Warn,
    Error,
}

#[derive(Debug, Clone)]
pub struct ActivityEntry {
    pub at: DateTime<Local>,
    pub level: ActivityLevel,
    pub text: String,
}

pub struct App {
    selection: Option<TransportKind>,
    pub ip: String,
    pub port: String,
    pub port_name: String,
    pub baud: String,
    pub sensors: Vec<SensorId>,
    pub sensor_idx: usize,
    pub state_idx: usize,
    session: Session,
    pub focus: Focus,
    pub error: Option<String>,
    pub activity: VecDeque<ActivityEntry>,
    pub serial_ports: Vec<String>,
    pub last_port_scan: Option<DateTime<Local>>,
}

impl App {
    /// Form with the given (already sorted) sensor ids and nothing selected.
    pub fn new(sensors: Vec<SensorId>) -> Self {
        Self {
            selection: None,
            ip: String::new(),
            port: String::new(),
            port_name: String::new(),
            baud: String::new(),
            sensors,
            sensor_idx: 0,
            state_idx: 0,
            session: Session::new(),
            focus: Focus::UdpCheck,
            error: None,
            activity: VecDeque::new(),
            serial_ports: Vec::new(),
            last_port_scan: None,
        }
    }

    pub fn selection(&self) -> Option<TransportKind> {
        self.selection
    }

    pub fn udp_checked(&self) -> bool {
        self.selection == Some(TransportKind::Udp)
    }

    pub fn serial_checked(&self) -> bool {
        self.selection == Some(TransportKind::Serial)
    }

    pub fn is_connected(&self) -> bool {
        self.session.is_connected()
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut Session {
        &mut self.session
    }

    pub fn set_udp_checked(&mut self, checked: bool) {
        self.set_checked(TransportKind::Udp, checked);
    }

    pub fn set_serial_checked(&mut self, checked: bool) {
        self.set_checked(TransportKind::Serial, checked);
    }

    /// Checkbox toggle. Checking one transport unchecks the other; afterwards
    /// the fields of whichever transport is not selected (other than the one
    /// just toggled) are cleared.
    fn set_checked(&mut self, kind: TransportKind, checked: bool) {
        if (self.selection == Some(kind)) == checked {
            return;
        }

        // The open transport must always match the checked box.
        if let Some(closed) = self.session.disconnect() {
            self.note(
                ActivityLevel::Info,
                format!("Disconnected from {closed} (transport changed)"),
            );
        }

        self.selection = if checked { Some(kind) } else { None };
        let other = kind.other();
        if self.selection != Some(other) {
            self.clear_fields(other);
        }
        log::debug!(
            "Transport selection changed: udp={} serial={}",
            self.udp_checked(),
            self.serial_checked()
        );

        if !self.focus_order().contains(&self.focus) {
            self.focus = match kind {
                TransportKind::Udp => Focus::UdpCheck,
                TransportKind::Serial => Focus::SerialCheck,
            };
        }
    }

    fn clear_fields(&mut self, kind: TransportKind) {
        match kind {
            TransportKind::Udp => {
                self.ip.clear();
                self.port.clear();
            }
            TransportKind::Serial => {
                self.port_name.clear();
                self.baud.clear();
            }
        }
    }

    pub fn field(&self, field: Field) -> &str {
        match field {
            Field::Ip => &self.ip,
            Field::Port => &self.port,
            Field::PortName => &self.port_name,
            Field::Baud => &self.baud,
        }
    }

    fn field_mut(&mut self, field: Field) -> &mut String {
        match field {
            Field::Ip => &mut self.ip,
            Field::Port => &mut self.port,
            Field::PortName => &mut self.port_name,
            Field::Baud => &mut self.baud,
        }
    }

    /// Type a character into `field`, dropping characters the field rejects.
    pub fn insert_char(&mut self, field: Field, c: char) {
        let value = self.field_mut(field);
        if field.accepts(c) && value.chars().count() < field.max_len() {
            value.push(c);
        }
    }

    pub fn backspace(&mut self, field: Field) {
        self.field_mut(field).pop();
    }

    /// Controls that are currently visible, in focus order.
    pub fn focus_order(&self) -> Vec<Focus> {
        let mut order = vec![Focus::UdpCheck, Focus::SerialCheck];
        match self.selection {
            Some(TransportKind::Udp) => order.extend([Focus::Ip, Focus::Port]),
            Some(TransportKind::Serial) => order.extend([Focus::PortName, Focus::Baud]),
            None => return order,
        }
        order.extend([Focus::Connect, Focus::Sensor, Focus::State, Focus::Send]);
        order
    }

    pub fn focus_next(&mut self) {
        let order = self.focus_order();
        let pos = order.iter().position(|f| *f == self.focus).unwrap_or(0);
        self.focus = order[(pos + 1) % order.len()];
    }

    pub fn focus_prev(&mut self) {
        let order = self.focus_order();
        let pos = order.iter().position(|f| *f == self.focus).unwrap_or(0);
        self.focus = if pos == 0 {
            order[order.len() - 1]
        } else {
            order[pos - 1]
        };
    }

    pub fn selected_sensor(&self) -> Option<SensorId> {
        self.sensors.get(self.sensor_idx).copied()
    }

    pub fn selected_state(&self) -> SensorState {
        SensorState::SELECTABLE[self.state_idx % SensorState::SELECTABLE.len()]
    }

    /// Label of the connect button for the current connection state.
    pub fn connect_label(&self) -> &'static str {
        let lang = crate::i18n::lang();
        if self.is_connected() {
            lang.disconnect.as_str()
        } else {
            lang.connect.as_str()
        }
    }

    /// Connect/disconnect button.
    pub fn press_connect(&mut self) {
        if self.session.is_connected() {
            if let Some(kind) = self.session.disconnect() {
                self.note(ActivityLevel::Info, format!("Disconnected from {kind}"));
            }
            return;
        }

        let Some(kind) = self.selection else {
            log::debug!("Connect pressed with no transport selected");
            return;
        };

        let endpoint = match kind {
            TransportKind::Udp => match Endpoint::udp_from_input(&self.ip, &self.port) {
                Ok(endpoint) => endpoint,
                Err(err) => {
                    log::warn!("UDP connect rejected: {err}");
                    self.fail(err.to_string());
                    return;
                }
            },
            TransportKind::Serial => {
                let endpoint = Endpoint::serial_from_input(&self.port_name, &self.baud);
                if let Endpoint::Serial { baud, .. } = &endpoint {
                    let requested = self.baud.trim().parse::<i64>().unwrap_or(0);
                    if requested != i64::from(baud.bits_per_second()) {
                        self.note(
                            ActivityLevel::Warn,
                            format!(
                                "Unsupported baud rate '{}', using default {baud}",
                                self.baud.trim()
                            ),
                        );
                    }
                }
                endpoint
            }
        };

        match self.session.connect(&endpoint) {
            Ok(()) => {
                let peer = self.session.peer().unwrap_or_else(|| endpoint.to_string());
                self.note(ActivityLevel::Info, format!("Connected via {kind} to {peer}"));
            }
            Err(err) => self.fail(format!("{err:#}")),
        }
    }

    /// Send button. Returns `None` when no sensor is available to send.
    pub fn press_send(&mut self) -> Option<SendOutcome> {
        let Some(sensor_id) = self.selected_sensor() else {
            log::warn!("No sensor selected, skipping send");
            self.note(ActivityLevel::Warn, "No sensor selected, nothing sent");
            return None;
        };

        let payload = Payload::new(sensor_id, self.selected_state());
        match self.session.send(&payload) {
            Ok(outcome @ SendOutcome::Sent { bytes }) => {
                let via = self
                    .session
                    .kind()
                    .map(|k| k.to_string())
                    .unwrap_or_default();
                self.note(
                    ActivityLevel::Info,
                    format!(
                        "Sent {payload} ({} / {}) via {via}, {bytes} bytes",
                        payload.state.label(),
                        payload.state.name()
                    ),
                );
                Some(outcome)
            }
            Ok(SendOutcome::Skipped) => {
                let what = self
                    .selection
                    .map(|k| k.to_string())
                    .unwrap_or_else(|| "transport".to_string());
                self.note(
                    ActivityLevel::Warn,
                    format!("{what} is not connected, nothing sent"),
                );
                Some(SendOutcome::Skipped)
            }
            Err(err) => {
                log::error!("Send failed: {err:#}");
                self.fail(format!("{err:#}"));
                None
            }
        }
    }

    /// Enter/Space on the focused control.
    pub fn activate(&mut self) {
        match self.focus {
            Focus::UdpCheck => self.set_udp_checked(!self.udp_checked()),
            Focus::SerialCheck => self.set_serial_checked(!self.serial_checked()),
            Focus::Connect => self.press_connect(),
            Focus::Send => {
                self.press_send();
            }
            Focus::Ip | Focus::Port | Focus::PortName | Focus::Baud | Focus::Sensor
            | Focus::State => self.focus_next(),
        }
    }

    /// Left/Right on the focused control.
    pub fn cycle(&mut self, forward: bool) {
        match self.focus {
            Focus::Sensor => self.sensor_idx = step(self.sensor_idx, self.sensors.len(), forward),
            Focus::State => {
                self.state_idx = step(self.state_idx, SensorState::SELECTABLE.len(), forward)
            }
            Focus::PortName => {
                if self.serial_ports.is_empty() {
                    return;
                }
                let next = match self.serial_ports.iter().position(|p| *p == self.port_name) {
                    Some(idx) => step(idx, self.serial_ports.len(), forward),
                    None if forward => 0,
                    None => self.serial_ports.len() - 1,
                };
                self.port_name = self.serial_ports[next].clone();
            }
            _ => {}
        }
    }

    /// Apply one mapped key action. Any real action dismisses the error line.
    pub fn handle(&mut self, action: Action) {
        if action != Action::None {
            self.clear_error();
        }

        match action {
            Action::Quit | Action::None => {}
            Action::FocusNext => self.focus_next(),
            Action::FocusPrev => self.focus_prev(),
            Action::Activate => self.activate(),
            Action::CyclePrev => self.cycle(false),
            Action::CycleNext => self.cycle(true),
            Action::Insert(c) => match self.focus.field() {
                Some(field) => self.insert_char(field, c),
                None if c == ' ' => self.activate(),
                None => {}
            },
            Action::Backspace => {
                if let Some(field) = self.focus.field() {
                    self.backspace(field);
                }
            }
            Action::RefreshPorts => self.refresh_ports(),
        }
    }

    /// Re-scan available serial ports.
    pub fn refresh_ports(&mut self) {
        self.serial_ports = enumerate_port_names();
        self.last_port_scan = Some(Local::now());
    }

    pub fn note(&mut self, level: ActivityLevel, text: impl Into<String>) {
        if self.activity.len() >= ACTIVITY_CAPACITY {
            self.activity.pop_front();
        }
        self.activity.push_back(ActivityEntry {
            at: Local::now(),
            level,
            text: text.into(),
        });
    }

    fn fail(&mut self, msg: String) {
        self.note(ActivityLevel::Error, msg.clone());
        self.set_error(msg);
    }

    pub fn set_error(&mut self, msg: impl Into<String>) {
        self.error = Some(msg.into());
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }
}

fn step(idx: usize, len: usize, forward: bool) -> usize {
    if len == 0 {
        0
    } else if forward {
        (idx + 1) % len
    } else if idx == 0 {
        len - 1
    } else {
        idx - 1
    }
}
