use anyhow::Result;

use super::{
    payload::Payload,
    transport::{Endpoint, Transport, TransportKind},
};

/// Result of a send request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SendOutcome {
    /// The line was handed to the transport.
    Sent { bytes: usize },
    /// Nothing is connected; the request was logged and dropped.
    Skipped,
}

/// The single open connection, if any.
///
/// Connected means a transport is held. There is no intermediate
/// "connecting" state: `connect` either stores an open transport or leaves
/// the session disconnected.
#[derive(Default)]
pub struct Session {
    transport: Option<Box<dyn Transport>>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_connected(&self) -> bool {
        self.transport.is_some()
    }

    pub fn kind(&self) -> Option<TransportKind> {
        self.transport.as_ref().map(|t| t.kind())
    }

    pub fn peer(&self) -> Option<String> {
        self.transport.as_ref().map(|t| t.peer())
    }

    /// Close any open transport, then open `endpoint`.
    pub fn connect(&mut self, endpoint: &Endpoint) -> Result<()> {
        self.disconnect();
        match endpoint.open() {
            Ok(transport) => {
                self.transport = Some(transport);
                Ok(())
            }
            Err(err) => {
                log::error!("Failed to connect via {} to {endpoint}: {err}", endpoint.kind());
                Err(err)
            }
        }
    }

    /// Adopt an already opened transport, closing the previous one.
    pub fn attach(&mut self, transport: Box<dyn Transport>) {
        self.disconnect();
        self.transport = Some(transport);
    }

    /// Close the open transport. Returns the kind that was closed, if any.
    pub fn disconnect(&mut self) -> Option<TransportKind> {
        let transport = self.transport.take()?;
        let kind = transport.kind();
        drop(transport);
        log::info!("Disconnected from {kind}");
        Some(kind)
    }

    /// Write one payload line to the open transport.
    pub fn send(&mut self, payload: &Payload) -> Result<SendOutcome> {
        let Some(transport) = self.transport.as_mut() else {
            log::info!("Not connected, skipping send of {payload}");
            return Ok(SendOutcome::Skipped);
        };

        let bytes = transport.send(&payload.encode())?;
        log::info!("Sending data via {}: {payload}", transport.kind());
        Ok(SendOutcome::Sent { bytes })
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::protocol::sensor::SensorState;
    use anyhow::anyhow;
    use std::sync::{Arc, Mutex};

    /// Transport double that records every write.
    pub(crate) struct RecordingTransport {
        pub kind: TransportKind,
        pub written: Arc<Mutex<Vec<Vec<u8>>>>,
        pub fail: bool,
    }

    impl RecordingTransport {
        pub(crate) fn new(kind: TransportKind) -> (Self, Arc<Mutex<Vec<Vec<u8>>>>) {
            let written = Arc::new(Mutex::new(Vec::new()));
            (
                Self {
                    kind,
                    written: Arc::clone(&written),
                    fail: false,
                },
                written,
            )
        }
    }

    impl Transport for RecordingTransport {
        fn kind(&self) -> TransportKind {
            self.kind
        }

        fn peer(&self) -> String {
            "recorder".to_string()
        }

        fn send(&mut self, data: &[u8]) -> Result<usize> {
            if self.fail {
                return Err(anyhow!("write refused"));
            }
            self.written.lock().unwrap().push(data.to_vec());
            Ok(data.len())
        }
    }

    #[test]
    fn test_send_while_disconnected_is_skipped() {
        let mut session = Session::new();
        assert!(!session.is_connected());
        let outcome = session.send(&Payload::new(1, SensorState::Car)).unwrap();
        assert_eq!(outcome, SendOutcome::Skipped);
    }

    #[test]
    fn test_send_writes_payload_line() {
        let (transport, written) = RecordingTransport::new(TransportKind::Serial);
        let mut session = Session::new();
        session.attach(Box::new(transport));
        assert_eq!(session.kind(), Some(TransportKind::Serial));

        let outcome = session.send(&Payload::new(3, SensorState::On)).unwrap();
        assert_eq!(outcome, SendOutcome::Sent { bytes: 4 });
        assert_eq!(written.lock().unwrap().as_slice(), &[b"3,4\n".to_vec()]);
    }

    #[test]
    fn test_write_error_keeps_connection() {
        let (mut transport, _) = RecordingTransport::new(TransportKind::Udp);
        transport.fail = true;
        let mut session = Session::new();
        session.attach(Box::new(transport));

        assert!(session.send(&Payload::new(3, SensorState::On)).is_err());
        assert!(session.is_connected());
    }

    #[test]
    fn test_disconnect_reports_kind() {
        let (transport, _) = RecordingTransport::new(TransportKind::Udp);
        let mut session = Session::new();
        session.attach(Box::new(transport));
        assert_eq!(session.disconnect(), Some(TransportKind::Udp));
        assert_eq!(session.disconnect(), None);
        assert!(!session.is_connected());
    }

    #[test]
    fn test_failed_serial_connect_stays_disconnected() {
        let mut session = Session::new();
        let endpoint = Endpoint::serial_from_input("/dev/map-tester-no-such-port", "9600");
        assert!(session.connect(&endpoint).is_err());
        assert!(!session.is_connected());
    }
}
