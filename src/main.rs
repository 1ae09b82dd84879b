use anyhow::Result;
use std::path::Path;

use map_tester::{boot, cli, config::SensorSettings, tui};

fn main() -> Result<()> {
    let matches = cli::parse_args();

    let log_file = matches.get_one::<String>("log-file").map(String::as_str);
    let headless = matches.get_flag("list-ports")
        || matches.get_flag("list-sensors")
        || matches.contains_id("sensor");

    if headless {
        boot::init_headless(log_file);
    } else {
        boot::init_tui(log_file);
    }

    let config_path = matches.get_one::<String>("config").map(Path::new);
    let settings = SensorSettings::load(config_path);

    if cli::actions::run_one_shot_actions(&matches, &settings)? {
        return Ok(());
    }

    log::info!("Starting in TUI mode");
    tui::start(settings)
}
