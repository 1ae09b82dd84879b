use std::{net::UdpSocket, time::Duration};

use map_tester::{Endpoint, Payload, SendOutcome, SensorState, Session, TransportKind};

fn receiver() -> (UdpSocket, String) {
    let socket = UdpSocket::bind("127.0.0.1:0").unwrap();
    socket
        .set_read_timeout(Some(Duration::from_secs(2)))
        .unwrap();
    let port = socket.local_addr().unwrap().port().to_string();
    (socket, port)
}

#[test]
fn test_session_sends_one_line_per_datagram() {
    let (socket, port) = receiver();
    let endpoint = Endpoint::udp_from_input("127.0.0.1", &port).unwrap();

    let mut session = Session::new();
    session.connect(&endpoint).unwrap();
    assert_eq!(session.kind(), Some(TransportKind::Udp));

    let outcome = session
        .send(&Payload::new(3, SensorState::On))
        .unwrap();
    assert_eq!(outcome, SendOutcome::Sent { bytes: 4 });

    session.send(&Payload::new(-7, SensorState::Walking)).unwrap();

    let mut buf = [0u8; 64];
    let (n, _) = socket.recv_from(&mut buf).unwrap();
    assert_eq!(&buf[..n], b"3,4\n");
    let (n, _) = socket.recv_from(&mut buf).unwrap();
    assert_eq!(&buf[..n], b"-7,1\n");

    assert_eq!(session.disconnect(), Some(TransportKind::Udp));
    assert!(!session.is_connected());
}

#[test]
fn test_send_without_connection_is_skipped() {
    let mut session = Session::new();
    let outcome = session.send(&Payload::new(1, SensorState::Off)).unwrap();
    assert_eq!(outcome, SendOutcome::Skipped);
}

#[test]
fn test_failed_serial_open_leaves_session_disconnected() {
    let mut session = Session::new();
    let missing = Endpoint::serial_from_input("/dev/map-tester-missing-port", "115200");
    assert!(session.connect(&missing).is_err());
    assert!(!session.is_connected());

    let empty = Endpoint::serial_from_input("", "9600");
    assert!(session.connect(&empty).is_err());
    assert!(!session.is_connected());
}
