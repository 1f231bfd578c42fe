use std::fmt;

use serde::{Deserialize, Serialize};

/// The three FRC competition periods. Exactly one is active at a time; the
/// wire encoding below reserves the zero pattern for teleop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ControlMode {
    Teleoperated,
    Autonomous,
    Test,
}

impl ControlMode {
    /// Mode bits as they appear in both the FMS and robot control bytes.
    pub const fn to_bits(self) -> u8 {
        match self {
            ControlMode::Teleoperated => 0x00,
            ControlMode::Autonomous => 0x02,
            ControlMode::Test => 0x01,
        }
    }

    /// Decodes mode bits, preferring teleop when neither auto nor test is
    /// set (spec §4.D: "prefer teleop when no mode bit is set").
    pub const fn from_bits(bits: u8) -> Self {
        if bits & 0x02 != 0 {
            ControlMode::Autonomous
        } else if bits & 0x01 != 0 {
            ControlMode::Test
        } else {
            ControlMode::Teleoperated
        }
    }
}

impl Default for ControlMode {
    fn default() -> Self {
        ControlMode::Teleoperated
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Alliance {
    Red,
    Blue,
}

impl Default for Alliance {
    fn default() -> Self {
        Alliance::Red
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Position {
    P1,
    P2,
    P3,
}

impl Default for Position {
    fn default() -> Self {
        Position::P1
    }
}

/// An alliance/position pair as it appears on the wire: a single byte
/// `Red1=0, Red2=1, Red3=2, Blue1=3, Blue2=4, Blue3=5`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Station {
    pub alliance: Alliance,
    pub position: Position,
}

impl Station {
    pub const fn new(alliance: Alliance, position: Position) -> Self {
        Self { alliance, position }
    }
}

impl Default for Station {
    fn default() -> Self {
        Station::new(Alliance::Red, Position::P1)
    }
}

/// Which peer a packet or error pertains to, used only for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Peer {
    Fms,
    Robot,
    Radio,
}

impl fmt::Display for Peer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Peer::Fms => "FMS",
            Peer::Robot => "robot",
            Peer::Radio => "radio",
        })
    }
}

/// Capability caps enforced on any attached joystick (spec §3).
pub const MAX_JOYSTICKS: usize = 6;
pub const MAX_AXES: usize = 6;
pub const MAX_BUTTONS: usize = 10;
pub const MAX_HATS: usize = 1;

/// An owned snapshot of one joystick's state, clamped to the capability
/// caps. Used by the bundled [`JoystickBank`][crate::facade::JoystickBank]
/// `JoystickSource` implementation; a host may instead implement
/// [`crate::facade::JoystickSource`] directly over its own live input
/// source.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JoystickState {
    pub axes: Vec<f32>,
    pub buttons: Vec<bool>,
    pub hats: Vec<i16>,
}

impl JoystickState {
    /// Builds a joystick snapshot, truncating any vector that exceeds the
    /// protocol's capability caps rather than failing.
    pub fn new(axes: Vec<f32>, buttons: Vec<bool>, hats: Vec<i16>) -> Self {
        let mut axes = axes;
        let mut buttons = buttons;
        let mut hats = hats;
        axes.truncate(MAX_AXES);
        buttons.truncate(MAX_BUTTONS);
        hats.truncate(MAX_HATS);
        Self { axes, buttons, hats }
    }
}

impl Default for JoystickState {
    fn default() -> Self {
        Self {
            axes: Vec::new(),
            buttons: Vec::new(),
            hats: Vec::new(),
        }
    }
}
