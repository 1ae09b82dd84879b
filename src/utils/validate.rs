//! Input validators for the UDP endpoint fields.
//!
//! These are UI-agnostic so the TUI form and the headless CLI share the
//! exact same acceptance rules.

use once_cell::sync::Lazy;
use regex::Regex;
use std::net::Ipv4Addr;

/// Lowest accepted UDP port.
pub const PORT_MIN: i64 = 1;
/// Highest accepted UDP port.
pub const PORT_MAX: i64 = 65535;

// Four octets 0-255, leading zeros allowed ("010" is read as 10).
static IPV4_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^((25[0-5]|2[0-4][0-9]|[0-1]?[0-9]?[0-9])(\.(25[0-5]|2[0-4][0-9]|[0-1]?[0-9]?[0-9])){3})$",
    )
    .expect("IPv4 pattern is a valid regex")
});

/// Whether `text` is a dotted-quad IPv4 address with every octet in 0..=255.
pub fn is_valid_ipv4(text: &str) -> bool {
    IPV4_RE.is_match(text)
}

/// Parse a dotted-quad address accepted by [`is_valid_ipv4`].
///
/// `std`'s parser rejects octets with leading zeros, so the octets are
/// converted one by one instead.
pub fn parse_ipv4(text: &str) -> Option<Ipv4Addr> {
    if !is_valid_ipv4(text) {
        return None;
    }
    let mut octets = [0u8; 4];
    for (slot, part) in octets.iter_mut().zip(text.split('.')) {
        *slot = part.parse().ok()?;
    }
    Some(Ipv4Addr::from(octets))
}

/// Whether `value` lies in `[PORT_MIN, PORT_MAX]`.
pub fn is_valid_port(value: i64) -> bool {
    (PORT_MIN..=PORT_MAX).contains(&value)
}

/// Parse a port field. Returns `None` for non-numeric text or out-of-range values.
pub fn parse_port(text: &str) -> Option<u16> {
    let value: i64 = text.trim().parse().ok()?;
    if is_valid_port(value) {
        u16::try_from(value).ok()
    } else {
        None
    }
}
