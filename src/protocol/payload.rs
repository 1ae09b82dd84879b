use std::fmt;

use super::sensor::{SensorId, SensorState};

/// One test transmission: `"<sensor id>,<state code>\n"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Payload {
    pub sensor_id: SensorId,
    pub state: SensorState,
}

impl Payload {
    pub fn new(sensor_id: SensorId, state: SensorState) -> Self {
        Self { sensor_id, state }
    }

    /// UTF-8 bytes written to the transport, trailing newline included.
    pub fn encode(&self) -> Vec<u8> {
        format_line(self.sensor_id, i32::from(self.state.code())).into_bytes()
    }
}

/// Wire line for an arbitrary pair of integers.
pub fn format_line(sensor_id: i32, state_code: i32) -> String {
    format!("{sensor_id},{state_code}\n")
}

impl fmt::Display for Payload {
    /// Line without the terminator, for logs.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.sensor_id, self.state.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_exact_bytes() {
        assert_eq!(Payload::new(3, SensorState::On).encode(), b"3,4\n".to_vec());
        assert_eq!(format_line(3, 4), "3,4\n");
    }

    #[test]
    fn test_negative_and_large_ids() {
        assert_eq!(Payload::new(-7, SensorState::Walking).encode(), b"-7,1\n".to_vec());
        assert_eq!(
            Payload::new(2147483647, SensorState::Off).encode(),
            b"2147483647,5\n".to_vec()
        );
    }

    #[test]
    fn test_display_has_no_newline() {
        assert_eq!(Payload::new(12, SensorState::Digging).to_string(), "12,3");
    }
}
