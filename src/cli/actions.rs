use anyhow::{anyhow, Result};
use clap::ArgMatches;

use crate::{
    config::SensorSettings,
    protocol::{
        payload::Payload,
        sensor::{SensorId, SensorState},
        session::{SendOutcome, Session},
        transport::{BaudRate, Endpoint},
    },
    utils::ports::enumerate_ports,
};

/// Handle the one-shot flags. Returns `Ok(true)` if the process should exit
/// without starting the TUI.
pub fn run_one_shot_actions(matches: &ArgMatches, settings: &SensorSettings) -> Result<bool> {
    if matches.get_flag("list-ports") {
        list_ports();
        return Ok(true);
    }

    if matches.get_flag("list-sensors") {
        list_sensors(settings);
        return Ok(true);
    }

    if matches.contains_id("sensor") {
        run_headless(matches, settings)?;
        return Ok(true);
    }

    Ok(false)
}

pub fn list_ports() {
    let ports = enumerate_ports();
    if ports.is_empty() {
        eprintln!("No serial ports detected");
        return;
    }
    for (name, kind) in ports {
        println!("{name}\t{kind}");
    }
}

pub fn list_sensors(settings: &SensorSettings) {
    if let Some(path) = &settings.source {
        log::info!("Sensor ids read from {}", path.display());
    }
    for id in &settings.sensor_ids {
        println!("{id}");
    }
}

/// Build the endpoint from `--ip/--port` or `--serial/--baud`.
pub fn endpoint_from_matches(matches: &ArgMatches) -> Result<Endpoint> {
    if let Some(ip) = matches.get_one::<String>("ip") {
        let port = matches
            .get_one::<String>("port")
            .map(String::as_str)
            .unwrap_or_default();
        return Endpoint::udp_from_input(ip, port);
    }

    if let Some(port_name) = matches.get_one::<String>("serial") {
        let baud = matches
            .get_one::<String>("baud")
            .map(String::as_str)
            .unwrap_or("9600");
        return Ok(Endpoint::Serial {
            port_name: port_name.trim().to_string(),
            baud: BaudRate::from_input(baud),
        });
    }

    Err(anyhow!(
        "No transport selected: pass --ip and --port, or --serial"
    ))
}

/// Connect, send one line, disconnect.
pub fn send_once(endpoint: &Endpoint, sensor_id: SensorId, state: SensorState) -> Result<usize> {
    let mut session = Session::new();
    session.connect(endpoint)?;

    let payload = Payload::new(sensor_id, state);
    let outcome = session.send(&payload);
    session.disconnect();

    match outcome? {
        SendOutcome::Sent { bytes } => Ok(bytes),
        SendOutcome::Skipped => Err(anyhow!("Not connected, nothing was sent")),
    }
}

pub fn run_headless(matches: &ArgMatches, settings: &SensorSettings) -> Result<()> {
    let sensor_id = *matches
        .get_one::<SensorId>("sensor")
        .ok_or_else(|| anyhow!("--sensor is required"))?;
    let state_text = matches
        .get_one::<String>("state")
        .ok_or_else(|| anyhow!("--state is required"))?;
    let state = SensorState::parse_selectable(state_text)?;

    if settings.source.is_some() && !settings.sensor_ids.contains(&sensor_id) {
        log::warn!("Sensor {sensor_id} is not listed in the settings file, sending anyway");
    }

    let endpoint = endpoint_from_matches(matches)?;
    let bytes = send_once(&endpoint, sensor_id, state)?;
    println!("Sent {sensor_id},{} to {endpoint} ({bytes} bytes)", state.code());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::build_command;
    use std::{net::UdpSocket, time::Duration};

    fn matches(args: &[&str]) -> ArgMatches {
        let mut argv = vec!["map-tester"];
        argv.extend_from_slice(args);
        build_command().try_get_matches_from(argv).unwrap()
    }

    #[test]
    fn test_endpoint_from_serial_args_falls_back_to_9600() {
        let m = matches(&["--serial", "/dev/ttyUSB0", "--baud", "14400"]);
        let ep = endpoint_from_matches(&m).unwrap();
        assert_eq!(
            ep,
            Endpoint::Serial {
                port_name: "/dev/ttyUSB0".to_string(),
                baud: BaudRate::B9600
            }
        );

        let m = matches(&["--serial", "COM3"]);
        assert_eq!(
            endpoint_from_matches(&m).unwrap().to_string(),
            "COM3 @ 9600"
        );
    }

    #[test]
    fn test_endpoint_requires_a_transport() {
        let m = matches(&["--sensor", "1", "--state", "on"]);
        assert!(endpoint_from_matches(&m).is_err());
        assert!(run_headless(&m, &SensorSettings::default()).is_err());
    }

    #[test]
    fn test_headless_rejects_unselectable_state() {
        let m = matches(&[
            "--ip", "127.0.0.1", "--port", "5000", "--sensor", "1", "--state", "alarm",
        ]);
        assert!(run_headless(&m, &SensorSettings::default()).is_err());
    }

    #[test]
    fn test_send_once_over_udp() {
        let receiver = UdpSocket::bind("127.0.0.1:0").unwrap();
        receiver
            .set_read_timeout(Some(Duration::from_secs(2)))
            .unwrap();
        let port = receiver.local_addr().unwrap().port().to_string();

        let endpoint = Endpoint::udp_from_input("127.0.0.1", &port).unwrap();
        let bytes = send_once(&endpoint, 12, SensorState::Digging).unwrap();
        assert_eq!(bytes, 5);

        let mut buf = [0u8; 64];
        let (n, _) = receiver.recv_from(&mut buf).unwrap();
        assert_eq!(&buf[..n], b"12,3\n");
    }
}
