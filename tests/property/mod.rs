//! Property-based tests

pub mod handshake_properties;
pub mod payload_properties;
