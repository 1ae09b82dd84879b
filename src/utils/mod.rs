//! Shared utilities
//!
//! - Serial port enumeration
//! - Validators for the UDP endpoint fields

pub mod ports;
pub mod validate;

pub use ports::*;
pub use validate::*;
