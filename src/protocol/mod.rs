//! Sensor model, payload format and the transports that carry it.

pub mod payload;
pub mod sensor;
pub mod session;
pub mod transport;
