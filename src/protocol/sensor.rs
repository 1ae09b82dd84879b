use anyhow::{anyhow, Result};
use num_enum::{IntoPrimitive, TryFromPrimitive};
use std::{fmt, str::FromStr};
use strum::{EnumIter, EnumString, IntoStaticStr};

use crate::i18n::lang;

/// Sensor identifier as read from the `[Sensor]` settings section.
pub type SensorId = i32;

/// Operational mode assigned to a sensor for a test transmission.
///
/// The discriminants are the codes written on the wire.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    IntoPrimitive,
    TryFromPrimitive,
    EnumIter,
    EnumString,
    IntoStaticStr,
)]
#[repr(u8)]
#[strum(ascii_case_insensitive, serialize_all = "snake_case")]
pub enum SensorState {
    Walking = 1,
    Car = 2,
    Digging = 3,
    On = 4,
    Off = 5,
    /// Defined with a code but not offered by any selection surface.
    Ignore = 6,
    /// Defined with a code but not offered by any selection surface.
    Alarm = 7,
}

impl SensorState {
    /// States offered by the state dropdown and the `--state` option, in display order.
    pub const SELECTABLE: [SensorState; 5] = [
        SensorState::Walking,
        SensorState::Car,
        SensorState::Digging,
        SensorState::On,
        SensorState::Off,
    ];

    pub fn code(self) -> u8 {
        self.into()
    }

    /// Machine name, e.g. `"digging"`.
    pub fn name(self) -> &'static str {
        self.into()
    }

    pub fn is_selectable(self) -> bool {
        Self::SELECTABLE.contains(&self)
    }

    /// Localized label shown in the dropdown.
    pub fn label(self) -> &'static str {
        let lang = lang();
        match self {
            SensorState::Walking => lang.state_walking.as_str(),
            SensorState::Car => lang.state_car.as_str(),
            SensorState::Digging => lang.state_digging.as_str(),
            SensorState::On => lang.state_on.as_str(),
            SensorState::Off => lang.state_off.as_str(),
            SensorState::Ignore => lang.state_ignore.as_str(),
            SensorState::Alarm => lang.state_alarm.as_str(),
        }
    }

    /// Parse a selectable state either by name (case-insensitive) or by code.
    pub fn parse_selectable(text: &str) -> Result<Self> {
        let text = text.trim();
        let state = match text.parse::<u8>() {
            Ok(code) => {
                SensorState::try_from(code).map_err(|_| anyhow!("Unknown sensor state code {code}"))?
            }
            Err(_) => {
                SensorState::from_str(text).map_err(|_| anyhow!("Unknown sensor state '{text}'"))?
            }
        };

        if !state.is_selectable() {
            return Err(anyhow!(
                "Sensor state '{}' is not selectable, expected one of: {}",
                state.name(),
                Self::selectable_summary()
            ));
        }
        Ok(state)
    }

    fn selectable_summary() -> String {
        Self::SELECTABLE
            .iter()
            .map(|s| format!("{} ({})", s.name(), s.code()))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for SensorState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_codes_are_stable() {
        let codes: Vec<u8> = SensorState::iter().map(SensorState::code).collect();
        assert_eq!(codes, vec![1, 2, 3, 4, 5, 6, 7]);
        assert_eq!(SensorState::try_from(3u8).ok(), Some(SensorState::Digging));
        assert!(SensorState::try_from(0u8).is_err());
        assert!(SensorState::try_from(8u8).is_err());
    }

    #[test]
    fn test_ignore_and_alarm_are_not_selectable() {
        assert!(!SensorState::Ignore.is_selectable());
        assert!(!SensorState::Alarm.is_selectable());
        assert_eq!(
            SensorState::iter().filter(|s| s.is_selectable()).count(),
            SensorState::SELECTABLE.len()
        );
    }

    #[test]
    fn test_parse_selectable() {
        assert_eq!(SensorState::parse_selectable("walking").unwrap(), SensorState::Walking);
        assert_eq!(SensorState::parse_selectable("DIGGING").unwrap(), SensorState::Digging);
        assert_eq!(SensorState::parse_selectable(" 4 ").unwrap(), SensorState::On);
        assert!(SensorState::parse_selectable("alarm").is_err());
        assert!(SensorState::parse_selectable("6").is_err());
        assert!(SensorState::parse_selectable("9").is_err());
        assert!(SensorState::parse_selectable("running").is_err());
    }

    #[test]
    fn test_names() {
        assert_eq!(SensorState::Car.name(), "car");
        assert_eq!(SensorState::Off.name(), "off");
    }
}
