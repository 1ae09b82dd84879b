pub mod serial;
pub mod udp;

pub use serial::{BaudRate, SerialTransport};
pub use udp::UdpTransport;

use anyhow::{anyhow, Result};
use std::{fmt, net::Ipv4Addr};

use crate::utils::validate::{parse_ipv4, parse_port};

/// Which channel carries the test payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransportKind {
    Udp,
    Serial,
}

impl TransportKind {
    /// The other transport.
    pub fn other(self) -> Self {
        match self {
            TransportKind::Udp => TransportKind::Serial,
            TransportKind::Serial => TransportKind::Udp,
        }
    }
}

impl fmt::Display for TransportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransportKind::Udp => write!(f, "UDP"),
            TransportKind::Serial => write!(f, "serial port"),
        }
    }
}

/// An open channel that accepts payload bytes.
pub trait Transport: Send {
    fn kind(&self) -> TransportKind;

    /// Human-readable remote end, e.g. `192.168.1.10:5000` or `/dev/ttyUSB0 @ 9600`.
    fn peer(&self) -> String;

    /// Write `data` in one go. Returns the number of bytes written.
    fn send(&mut self, data: &[u8]) -> Result<usize>;
}

/// Parameters needed to open a transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Endpoint {
    Udp { ip: Ipv4Addr, port: u16 },
    Serial { port_name: String, baud: BaudRate },
}

impl Endpoint {
    /// Build a UDP endpoint from the raw address and port fields.
    pub fn udp_from_input(ip: &str, port: &str) -> Result<Self> {
        let ip = parse_ipv4(ip.trim()).ok_or_else(|| anyhow!("Invalid IPv4 address '{ip}'"))?;
        let port = parse_port(port).ok_or_else(|| anyhow!("Invalid UDP port '{port}'"))?;
        Ok(Endpoint::Udp { ip, port })
    }

    /// Build a serial endpoint from the raw port name and baud fields.
    pub fn serial_from_input(port_name: &str, baud: &str) -> Self {
        Endpoint::Serial {
            port_name: port_name.trim().to_string(),
            baud: BaudRate::from_input(baud),
        }
    }

    pub fn kind(&self) -> TransportKind {
        match self {
            Endpoint::Udp { .. } => TransportKind::Udp,
            Endpoint::Serial { .. } => TransportKind::Serial,
        }
    }

    pub fn open(&self) -> Result<Box<dyn Transport>> {
        match self {
            Endpoint::Udp { ip, port } => Ok(Box::new(UdpTransport::connect(*ip, *port)?)),
            Endpoint::Serial { port_name, baud } => {
                Ok(Box::new(SerialTransport::open(port_name, *baud)?))
            }
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Endpoint::Udp { ip, port } => write!(f, "{ip}:{port}"),
            Endpoint::Serial { port_name, baud } => write!(f, "{port_name} @ {baud}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_udp_endpoint_from_input() {
        let ep = Endpoint::udp_from_input("192.168.1.10", "5000").unwrap();
        assert_eq!(
            ep,
            Endpoint::Udp {
                ip: Ipv4Addr::new(192, 168, 1, 10),
                port: 5000
            }
        );
        assert_eq!(ep.kind(), TransportKind::Udp);
        assert_eq!(ep.to_string(), "192.168.1.10:5000");
    }

    #[test]
    fn test_udp_endpoint_rejects_bad_fields() {
        assert!(Endpoint::udp_from_input("192.168.1.256", "5000").is_err());
        assert!(Endpoint::udp_from_input("192.168.1", "5000").is_err());
        assert!(Endpoint::udp_from_input("10.0.0.1", "0").is_err());
        assert!(Endpoint::udp_from_input("10.0.0.1", "65536").is_err());
        assert!(Endpoint::udp_from_input("10.0.0.1", "").is_err());
    }

    #[test]
    fn test_serial_endpoint_baud_fallback() {
        let ep = Endpoint::serial_from_input("/dev/ttyUSB0", "14400");
        assert_eq!(
            ep,
            Endpoint::Serial {
                port_name: "/dev/ttyUSB0".to_string(),
                baud: BaudRate::B9600
            }
        );
        assert_eq!(ep.to_string(), "/dev/ttyUSB0 @ 9600");
    }

    #[test]
    fn test_kind_other() {
        assert_eq!(TransportKind::Udp.other(), TransportKind::Serial);
        assert_eq!(TransportKind::Serial.other(), TransportKind::Udp);
    }
}
