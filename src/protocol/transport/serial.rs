//! Serial port transport.
//!
//! Ports are opened 8N1 without flow control. Only a fixed set of baud rates
//! is supported; anything else falls back to 9600.

use anyhow::{anyhow, Result};
use num_enum::{IntoPrimitive, TryFromPrimitive};
use std::{fmt, io::Write, time::Duration};
use strum::EnumIter;

use super::{Transport, TransportKind};

const IO_TIMEOUT: Duration = Duration::from_millis(200);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, IntoPrimitive, TryFromPrimitive, EnumIter)]
#[repr(u32)]
pub enum BaudRate {
    B9600 = 9600,
    B19200 = 19200,
    B38400 = 38400,
    B57600 = 57600,
    B115200 = 115200,
}

impl Default for BaudRate {
    fn default() -> Self {
        BaudRate::B9600
    }
}

impl BaudRate {
    /// Map a requested rate onto a supported one, falling back to 9600.
    pub fn from_requested(value: i64) -> Self {
        match u32::try_from(value)
            .ok()
            .and_then(|v| BaudRate::try_from(v).ok())
        {
            Some(rate) => rate,
            None => {
                log::warn!("Unsupported baud rate {value}, using default 9600");
                BaudRate::default()
            }
        }
    }

    /// Map the baud field text. Empty or non-numeric text reads as 0.
    pub fn from_input(text: &str) -> Self {
        Self::from_requested(text.trim().parse::<i64>().unwrap_or(0))
    }

    pub fn bits_per_second(self) -> u32 {
        self.into()
    }
}

impl fmt::Display for BaudRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.bits_per_second())
    }
}

pub struct SerialTransport {
    port: Box<dyn serialport::SerialPort>,
    port_name: String,
    baud: BaudRate,
}

impl SerialTransport {
    /// Open `port_name` for read/write, requesting exclusive access on Unix.
    pub fn open(port_name: &str, baud: BaudRate) -> Result<Self> {
        if port_name.trim().is_empty() {
            return Err(anyhow!("Failed to open serial port: no port name given"));
        }

        let builder = serialport::new(port_name, baud.bits_per_second())
            .data_bits(serialport::DataBits::Eight)
            .parity(serialport::Parity::None)
            .stop_bits(serialport::StopBits::One)
            .flow_control(serialport::FlowControl::None)
            .timeout(IO_TIMEOUT);

        #[cfg(unix)]
        let port: Box<dyn serialport::SerialPort> = {
            let mut handle = builder
                .open_native()
                .map_err(|err| anyhow!("Failed to open serial port {port_name}: {err}"))?;
            handle.set_exclusive(true).map_err(|err| {
                anyhow!("Failed to acquire exclusive access to {port_name}: {err}")
            })?;
            Box::new(handle)
        };

        #[cfg(not(unix))]
        let port: Box<dyn serialport::SerialPort> = builder
            .open()
            .map_err(|err| anyhow!("Failed to open serial port {port_name}: {err}"))?;

        log::info!("Connected via serial port {port_name} at baud rate {baud}");
        Ok(Self {
            port,
            port_name: port_name.to_string(),
            baud,
        })
    }

    pub fn baud(&self) -> BaudRate {
        self.baud
    }
}

impl Transport for SerialTransport {
    fn kind(&self) -> TransportKind {
        TransportKind::Serial
    }

    fn peer(&self) -> String {
        format!("{} @ {}", self.port_name, self.baud)
    }

    fn send(&mut self, data: &[u8]) -> Result<usize> {
        self.port
            .write_all(data)
            .and_then(|_| self.port.flush())
            .map_err(|err| anyhow!("Failed to write to {}: {err}", self.port_name))?;
        Ok(data.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_supported_rates_map_to_themselves() {
        for rate in BaudRate::iter() {
            let bps = rate.bits_per_second();
            assert_eq!(BaudRate::from_requested(i64::from(bps)), rate);
        }
    }

    #[test]
    fn test_unsupported_rates_fall_back_to_9600() {
        for value in [0, -1, 1200, 4800, 9601, 230400, 921600, i64::MAX, i64::MIN] {
            assert_eq!(BaudRate::from_requested(value), BaudRate::B9600, "{value}");
        }
    }

    #[test]
    fn test_from_input_text() {
        assert_eq!(BaudRate::from_input("115200"), BaudRate::B115200);
        assert_eq!(BaudRate::from_input(" 38400 "), BaudRate::B38400);
        assert_eq!(BaudRate::from_input(""), BaudRate::B9600);
        assert_eq!(BaudRate::from_input("fast"), BaudRate::B9600);
    }

    #[test]
    fn test_open_missing_port_fails() {
        assert!(SerialTransport::open("/dev/map-tester-no-such-port", BaudRate::B9600).is_err());
        assert!(SerialTransport::open("", BaudRate::B9600).is_err());
    }
}
