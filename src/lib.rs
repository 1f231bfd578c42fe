//! 2015-era FRC driver-station↔robot↔FMS wire protocol engine.
//!
//! This crate owns the exact byte layouts, fixed-point codecs, and per-peer
//! cadences of the control-system protocol. It does not own a UDP socket,
//! a scheduler, a watchdog, or a joystick input source — those are the
//! host's job, driven by the value types and functions below. A typical
//! host:
//!
//! - holds one [`facade::DsConfig`] and one [`runtime::ProtocolRuntime`]
//!   per driver-station session;
//! - on a 20ms/500ms timer, calls [`builder::build_robot_packet`] /
//!   [`builder::build_fms_packet`] and sends the result over its own
//!   socket;
//! - on socket receipt, calls [`parser::parse_robot_packet`] /
//!   [`parser::parse_fms_packet`];
//! - on watchdog expiry, calls [`runtime::ProtocolRuntime::reset_robot`]
//!   (or `reset_fms`/`reset_radio`).

pub mod builder;
pub mod codec;
pub mod descriptor;
pub mod error;
pub mod facade;
pub mod netconsole;
pub mod parser;
pub mod runtime;
pub mod types;

pub use builder::{build_fms_packet, build_radio_packet, build_robot_packet};
pub use descriptor::ProtocolDescriptor;
pub use error::ProtocolError;
pub use facade::DsConfig;
pub use parser::{parse_fms_packet, parse_radio_packet, parse_robot_packet};
pub use runtime::ProtocolRuntime;
