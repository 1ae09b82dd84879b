use chrono::Local;
use log::LevelFilter;
use std::io::{self, Write};

use env_logger::{Builder, Target};

/// Environment variable naming a log file.
pub const LOG_FILE_ENV: &str = "MAP_TESTER_LOG_FILE";

/// Multi-writer for logging to both file and stderr
struct DualWriter {
    file: std::fs::File,
    stderr: io::Stderr,
}

impl Write for DualWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.file.write_all(buf)?;
        self.stderr.write_all(buf)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.file.flush()?;
        self.stderr.flush()?;
        Ok(())
    }
}

/// Pick the log file: explicit option, then environment, then a timestamped
/// file in the working directory for debug builds.
pub fn resolve_log_file(explicit: Option<&str>) -> Option<String> {
    explicit
        .map(str::to_string)
        .or_else(|| std::env::var(LOG_FILE_ENV).ok().filter(|v| !v.is_empty()))
        .or_else(|| {
            #[cfg(debug_assertions)]
            {
                Some(format!("./log_{}.log", Local::now().format("%Y%m%d%H%M%S")))
            }
            #[cfg(not(debug_assertions))]
            {
                None
            }
        })
}

/// Initialization used by the TUI entrypoint. The terminal belongs to the
/// form, so logs only go to a file when one is configured.
pub fn init_tui(log_file: Option<&str>) {
    if let Some(path) = resolve_log_file(log_file) {
        if let Err(err) = init_file_logger(&path) {
            eprintln!("Failed to initialize file logger at '{path}': {err}");
            env_logger::init();
        }
    } else {
        env_logger::init();
    }

    crate::i18n::init_i18n();
}

/// Initialization used by the headless and listing modes: stderr, plus the
/// log file when one was explicitly requested.
pub fn init_headless(log_file: Option<&str>) {
    let requested = log_file
        .map(str::to_string)
        .or_else(|| std::env::var(LOG_FILE_ENV).ok().filter(|v| !v.is_empty()));

    let result = match requested {
        Some(path) => init_dual_logger(&path).map_err(|err| (path, err)),
        None => {
            stderr_builder().init();
            Ok(())
        }
    };
    if let Err((path, err)) = result {
        eprintln!("Failed to open log file '{path}': {err}");
        stderr_builder().init();
    }

    crate::i18n::init_i18n();
}

fn stderr_builder() -> Builder {
    let mut builder = Builder::new();
    builder
        .format(|buf, record| {
            writeln!(
                buf,
                "{} [{}] {}",
                Local::now().format("%Y-%m-%d %H:%M:%S"),
                record.level(),
                record.args()
            )
        })
        .target(Target::Stderr)
        .filter_level(LevelFilter::Info)
        .parse_default_env();
    builder
}

/// Dual logger for headless mode (outputs to both file and stderr)
fn init_dual_logger(path: &str) -> io::Result<()> {
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)?;

    let dual_writer = DualWriter {
        file,
        stderr: io::stderr(),
    };

    let mut builder = stderr_builder();
    builder.target(Target::Pipe(Box::new(dual_writer))).init();

    log::info!("Logger initialized - logging to {path} and stderr");

    Ok(())
}

fn init_file_logger(path: &str) -> io::Result<()> {
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)?;

    let mut builder = Builder::new();
    builder
        .format(|buf, record| {
            writeln!(
                buf,
                "{}:{} {} [{}] - {}",
                record.file().unwrap_or("unknown"),
                record.line().unwrap_or(0),
                Local::now().format("%Y-%m-%dT%H:%M:%S%.3f"),
                record.level(),
                record.args()
            )
        })
        .target(Target::Pipe(Box::new(file)))
        .filter_level(LevelFilter::Debug)
        .parse_default_env()
        .init();

    log::info!("File logger initialized at {path}");

    Ok(())
}
