//! Sensor settings loading.
//!
//! Sensor identifiers come from the `[Sensor]` section of an INI file. Key
//! names are ignored; every value is read as an integer identifier.

use anyhow::{anyhow, Context, Result};
use config::{Config, File, FileFormat, Value};
use log::{debug, info, warn};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::protocol::sensor::SensorId;

/// File name looked up in the desktop directory.
pub const CONFIG_FILE_NAME: &str = "test.ini";
/// Section holding the sensor identifiers.
pub const SENSOR_SECTION: &str = "Sensor";
/// Environment variable overriding the settings path.
pub const CONFIG_ENV_VAR: &str = "MAP_TESTER_CONFIG";

/// Default settings path: `<desktop>/test.ini`.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::desktop_dir().map(|dir| dir.join(CONFIG_FILE_NAME))
}

/// Pick the settings path: explicit argument, then environment, then desktop.
pub fn resolve_config_path(explicit: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path.to_path_buf());
    }
    if let Some(path) = std::env::var_os(CONFIG_ENV_VAR).filter(|v| !v.is_empty()) {
        return Some(PathBuf::from(path));
    }
    default_config_path()
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SensorSettings {
    /// Sorted ascending, duplicates kept.
    pub sensor_ids: Vec<SensorId>,
    /// Where the identifiers were read from, if a file was found.
    pub source: Option<PathBuf>,
}

impl SensorSettings {
    /// Read and sort the sensor identifiers from `path`.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let config_path = path.as_ref();
        debug!("Loading sensor settings from {}", config_path.display());

        let config = Config::builder()
            .add_source(File::from(config_path).format(FileFormat::Ini))
            .build()
            .context(format!(
                "Failed to load settings from {}",
                config_path.display()
            ))?;

        let sections: HashMap<String, Value> = config
            .try_deserialize()
            .context("Failed to deserialize settings")?;

        let mut sensor_ids = match sections
            .into_iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(SENSOR_SECTION))
        {
            Some((_, section)) => parse_sensor_section(section)?,
            None => {
                warn!(
                    "No [{SENSOR_SECTION}] section in {}",
                    config_path.display()
                );
                Vec::new()
            }
        };
        sensor_ids.sort_unstable();

        info!(
            "Loaded {} sensor id(s) from {}",
            sensor_ids.len(),
            config_path.display()
        );
        Ok(Self {
            sensor_ids,
            source: Some(config_path.to_path_buf()),
        })
    }

    /// Load from the resolved path. A missing or unreadable file yields an
    /// empty list and a log line; it is never fatal.
    pub fn load(explicit: Option<&Path>) -> Self {
        let Some(path) = resolve_config_path(explicit) else {
            warn!("No desktop directory available, sensor list stays empty");
            return Self::default();
        };

        if !path.exists() {
            info!("Config file does not exist at {}", path.display());
            return Self::default();
        }

        match Self::from_file(&path) {
            Ok(settings) => settings,
            Err(err) => {
                warn!("{err:#}");
                Self::default()
            }
        }
    }
}

/// Collect the integer values of the sensor section. Non-integer values are
/// skipped with a warning rather than read as sensor 0.
fn parse_sensor_section(section: Value) -> Result<Vec<SensorId>> {
    let table = section
        .into_table()
        .map_err(|err| anyhow!("[{SENSOR_SECTION}] is not a section: {err}"))?;

    let mut ids = Vec::with_capacity(table.len());
    for (key, value) in table {
        let raw = value.to_string();
        match value
            .into_int()
            .ok()
            .and_then(|v| SensorId::try_from(v).ok())
        {
            Some(id) => ids.push(id),
            None => warn!("Ignoring sensor entry {key}={raw}: not an integer id"),
        }
    }
    Ok(ids)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn ini(content: &str) -> NamedTempFile {
        let mut file = tempfile::Builder::new()
            .suffix(".ini")
            .tempfile()
            .unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_ids_sorted_ascending() {
        let file = ini("[Sensor]\nfront=12\nback=3\ngate=7\n");
        let settings = SensorSettings::from_file(file.path()).unwrap();
        assert_eq!(settings.sensor_ids, vec![3, 7, 12]);
        assert_eq!(settings.source.as_deref(), Some(file.path()));
    }

    #[test]
    fn test_other_sections_and_bad_values_ignored() {
        let file = ini("[General]\nname=demo\n\n[Sensor]\na=5\nb=five\nc=5\nd=-2\n");
        let settings = SensorSettings::from_file(file.path()).unwrap();
        assert_eq!(settings.sensor_ids, vec![-2, 5, 5]);
    }

    #[test]
    fn test_missing_section_is_empty() {
        let file = ini("[Other]\nx=1\n");
        let settings = SensorSettings::from_file(file.path()).unwrap();
        assert!(settings.sensor_ids.is_empty());
    }

    #[test]
    fn test_missing_file_is_not_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("absent.ini");
        let settings = SensorSettings::load(Some(&missing));
        assert_eq!(settings, SensorSettings::default());
    }

    #[test]
    fn test_explicit_path_wins() {
        let explicit = Path::new("/tmp/explicit.ini");
        assert_eq!(
            resolve_config_path(Some(explicit)),
            Some(explicit.to_path_buf())
        );
    }

    #[test]
    fn test_default_path_file_name() {
        if let Some(path) = default_config_path() {
            assert_eq!(path.file_name().and_then(|n| n.to_str()), Some(CONFIG_FILE_NAME));
        }
    }
}
