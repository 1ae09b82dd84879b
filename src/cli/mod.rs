pub mod actions;

use clap::{Arg, ArgAction, ArgMatches, Command};

/// Build the command-line interface.
pub fn build_command() -> Command {
    Command::new("map-tester")
        .about("Send sensor test lines over UDP or a serial port")
        .version(env!("CARGO_PKG_VERSION"))
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .value_name("FILE")
                .help("Sensor settings INI file (default: <desktop>/test.ini)"),
        )
        .arg(
            Arg::new("log-file")
                .long("log-file")
                .value_name("FILE")
                .help("Write logs to this file"),
        )
        .arg(
            Arg::new("list-ports")
                .long("list-ports")
                .help("List detected serial ports and exit")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("list-sensors")
                .long("list-sensors")
                .help("List configured sensor ids and exit")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("ip")
                .long("ip")
                .value_name("IP")
                .help("UDP target address for a headless send")
                .requires("port")
                .conflicts_with("serial"),
        )
        .arg(
            Arg::new("port")
                .long("port")
                .short('p')
                .value_name("PORT")
                .help("UDP target port (1-65535)")
                .requires("ip"),
        )
        .arg(
            Arg::new("serial")
                .long("serial")
                .short('s')
                .value_name("NAME")
                .help("Serial port name for a headless send"),
        )
        .arg(
            Arg::new("baud")
                .long("baud")
                .short('b')
                .value_name("RATE")
                .help("Serial baud rate: 9600, 19200, 38400, 57600 or 115200 [default: 9600]")
                .requires("serial"),
        )
        .arg(
            Arg::new("sensor")
                .long("sensor")
                .value_name("ID")
                .help("Sensor id to send; runs headless instead of the TUI")
                .allow_negative_numbers(true)
                .value_parser(clap::value_parser!(i32))
                .requires("state"),
        )
        .arg(
            Arg::new("state")
                .long("state")
                .value_name("STATE")
                .help("Sensor state: walking, car, digging, on, off (or code 1-5)")
                .requires("sensor"),
        )
}

/// Parse command-line arguments, returning ArgMatches
pub fn parse_args() -> ArgMatches {
    build_command().get_matches()
}
