//! Plain data shared between the RTIC tasks of the ranging exercises.

pub mod command;
pub mod ranging;
pub mod rx_errors;
pub mod telemetry_packet;
