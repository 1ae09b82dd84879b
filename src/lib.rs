//! map_tester: sensor state test sender over UDP or a serial port
//!
//! This crate provides the library behind the `map-tester` binary. An operator
//! picks a sensor identifier (loaded from an INI settings file) and a sensor
//! state, opens either a UDP association or a serial port, and sends the pair
//! as one `"<id>,<state>\n"` text line.
//!
//! Two frontends share the same session logic: an interactive TUI form and a
//! headless one-shot mode driven by command-line options. The boot helpers
//! (logger setup) are kept in a separate, hidden module.

#[doc(hidden)]
pub mod boot;
#[doc(hidden)]
pub mod cli;
pub mod config;
pub mod i18n;
pub mod protocol;
#[doc(hidden)]
pub mod tui;
pub mod utils;

pub use protocol::{
    payload::Payload,
    sensor::{SensorId, SensorState},
    session::{SendOutcome, Session},
    transport::{BaudRate, Endpoint, Transport, TransportKind},
};
