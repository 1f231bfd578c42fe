//! Protocol descriptor (spec component E): the value object binding
//! builders/parsers to peer addresses, socket endpoints, cadences,
//! joystick capabilities, and watchdog-reset hooks.
//!
//! Spec §9 flags the original as a singleton bound to function pointers;
//! there is no need for lazy global state in Rust — a host constructs one
//! `ProtocolDescriptor` at startup (it is cheap and holds no resources of
//! its own) and shares it by reference, exactly as the teacher constructs
//! its `AppState` once in `lib.rs::run` and hands it to Tauri's state
//! manager.

use std::time::Duration;

/// A UDP or TCP socket endpoint this protocol talks on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SocketSpec {
    /// Port this side listens on for inbound traffic, if any.
    pub input_port: Option<u16>,
    /// Port outbound traffic is sent to, if any.
    pub output_port: Option<u16>,
    /// True if this peer's traffic is disabled entirely (spec §4.E: radio).
    pub disabled: bool,
}

/// Joystick capability caps advertised by this protocol (spec §3/§4.E).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JoystickCaps {
    pub max_joysticks: usize,
    pub max_axes: usize,
    pub max_hats: usize,
    pub max_buttons: usize,
}

/// Binds the wire-format builders/parsers to peer addresses, cadences,
/// socket specs, and joystick caps (spec §4.E). Construct once per process
/// and share by reference; it holds no mutable state of its own (counters
/// and latches live in [`crate::runtime::ProtocolRuntime`]).
#[derive(Debug, Clone, Copy)]
pub struct ProtocolDescriptor {
    pub fms_cadence: Duration,
    pub robot_cadence: Duration,
    pub radio_cadence: Duration,
    pub joystick_caps: JoystickCaps,
    pub fms_socket: SocketSpec,
    pub radio_socket: SocketSpec,
    pub robot_socket: SocketSpec,
    pub netconsole_socket: SocketSpec,
}

impl ProtocolDescriptor {
    pub const fn new() -> Self {
        Self {
            fms_cadence: Duration::from_millis(500),
            robot_cadence: Duration::from_millis(20),
            radio_cadence: Duration::ZERO,
            joystick_caps: JoystickCaps {
                max_joysticks: crate::types::MAX_JOYSTICKS,
                max_axes: crate::types::MAX_AXES,
                max_hats: crate::types::MAX_HATS,
                max_buttons: crate::types::MAX_BUTTONS,
            },
            fms_socket: SocketSpec {
                input_port: Some(1120),
                output_port: Some(1160),
                disabled: false,
            },
            radio_socket: SocketSpec {
                input_port: None,
                output_port: None,
                disabled: true,
            },
            robot_socket: SocketSpec {
                input_port: Some(1150),
                output_port: Some(1110),
                disabled: false,
            },
            netconsole_socket: SocketSpec {
                input_port: Some(6666),
                output_port: Some(6668),
                disabled: false,
            },
        }
    }

    /// The FMS peer address is assigned by the socket layer from the
    /// source address of the most recent accepted FMS packet — the core
    /// has no opinion on it (spec §4.E, §6).
    pub fn fms_address(&self) -> &'static str {
        ""
    }

    /// Derives the radio (OpenMesh) address from the team number:
    /// `10.TE.AM.1`, e.g. team 4499 → `10.44.99.1`.
    pub fn radio_address(&self, team_number: u16) -> String {
        let te = team_number / 100;
        let am = team_number % 100;
        format!("10.{te}.{am}.1")
    }

    /// Derives the roboRIO mDNS hostname from the team number.
    pub fn robot_address(&self, team_number: u16) -> String {
        format!("roboRIO-{team_number}.local")
    }
}

impl Default for ProtocolDescriptor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn radio_address_splits_team_number() {
        let d = ProtocolDescriptor::new();
        assert_eq!(d.radio_address(4499), "10.44.99.1");
        assert_eq!(d.radio_address(1), "10.0.1.1");
    }

    #[test]
    fn robot_address_uses_mdns_hostname() {
        let d = ProtocolDescriptor::new();
        assert_eq!(d.robot_address(4499), "roboRIO-4499.local");
    }

    #[test]
    fn fms_address_is_assigned_externally() {
        let d = ProtocolDescriptor::new();
        assert_eq!(d.fms_address(), "");
    }

    #[test]
    fn cadences_and_caps_match_spec_table() {
        let d = ProtocolDescriptor::new();
        assert_eq!(d.fms_cadence, Duration::from_millis(500));
        assert_eq!(d.robot_cadence, Duration::from_millis(20));
        assert_eq!(d.radio_cadence, Duration::ZERO);
        assert_eq!(d.joystick_caps.max_joysticks, 6);
        assert_eq!(d.joystick_caps.max_axes, 6);
        assert_eq!(d.joystick_caps.max_hats, 1);
        assert_eq!(d.joystick_caps.max_buttons, 10);
    }

    #[test]
    fn socket_specs_match_spec_table() {
        let d = ProtocolDescriptor::new();
        assert_eq!(d.fms_socket.input_port, Some(1120));
        assert_eq!(d.fms_socket.output_port, Some(1160));
        assert!(!d.fms_socket.disabled);

        assert!(d.radio_socket.disabled);
        assert_eq!(d.radio_socket.input_port, None);

        assert_eq!(d.robot_socket.input_port, Some(1150));
        assert_eq!(d.robot_socket.output_port, Some(1110));

        assert_eq!(d.netconsole_socket.input_port, Some(6666));
        assert_eq!(d.netconsole_socket.output_port, Some(6668));
    }
}
