//! Configuration facade (spec component A): a process-wide, thread-safe
//! store of the live driver-station state. Builders read it, parsers write
//! it; per spec §5 each field is independently atomic and cross-field
//! consistency is not guaranteed (nor required).
//!
//! Grounded in the teacher's preference for fine-grained `parking_lot`
//! locking sized to the actual sharing pattern (`Arc<RwLock<Vec<JoystickState>>>`
//! in `raje2v-DriveStation`'s gamepad manager); spec §5 asks for this to go
//! one step further and use plain atomics, since every field here is a
//! scalar.

use std::sync::atomic::{AtomicBool, AtomicU16, AtomicU32, AtomicU8, Ordering};

use parking_lot::RwLock;

use crate::types::{Alliance, ControlMode, JoystickState, Position};

const ORDER: Ordering = Ordering::SeqCst;

/// Thread-safe store of the driver-station state the core reads and writes.
///
/// Safe to share behind an `Arc` and read concurrently with emission on a
/// scheduler thread; setters serialize with getters per-field only.
pub struct DsConfig {
    team_number: AtomicU16,
    alliance: AtomicBool, // false = Red, true = Blue
    position: AtomicU8,   // 0..=2
    mode: AtomicU8,       // raw ControlMode::to_bits()
    enabled: AtomicBool,
    estop: AtomicBool,
    robot_comms: AtomicBool,
    radio_comms: AtomicBool,
    fms_comms: AtomicBool,
    robot_has_code: AtomicBool,
    voltage_bits: AtomicU32, // f32::to_bits of the voltage
    cpu_usage: AtomicU8,
    ram_usage: AtomicU8,
    disk_usage: AtomicU8,
    can_utilization: AtomicU8,
}

impl DsConfig {
    pub fn new() -> Self {
        Self {
            team_number: AtomicU16::new(0),
            alliance: AtomicBool::new(false),
            position: AtomicU8::new(0),
            mode: AtomicU8::new(ControlMode::Teleoperated.to_bits()),
            enabled: AtomicBool::new(false),
            estop: AtomicBool::new(false),
            robot_comms: AtomicBool::new(false),
            radio_comms: AtomicBool::new(false),
            fms_comms: AtomicBool::new(false),
            robot_has_code: AtomicBool::new(false),
            voltage_bits: AtomicU32::new(0f32.to_bits()),
            cpu_usage: AtomicU8::new(0),
            ram_usage: AtomicU8::new(0),
            disk_usage: AtomicU8::new(0),
            can_utilization: AtomicU8::new(0),
        }
    }

    pub fn team_number(&self) -> u16 {
        self.team_number.load(ORDER)
    }

    pub fn set_team_number(&self, team: u16) {
        self.team_number.store(team, ORDER);
    }

    pub fn alliance(&self) -> Alliance {
        if self.alliance.load(ORDER) {
            Alliance::Blue
        } else {
            Alliance::Red
        }
    }

    pub fn set_alliance(&self, alliance: Alliance) {
        self.alliance.store(matches!(alliance, Alliance::Blue), ORDER);
    }

    pub fn position(&self) -> Position {
        match self.position.load(ORDER) {
            1 => Position::P2,
            2 => Position::P3,
            _ => Position::P1,
        }
    }

    pub fn set_position(&self, position: Position) {
        let raw = match position {
            Position::P1 => 0,
            Position::P2 => 1,
            Position::P3 => 2,
        };
        self.position.store(raw, ORDER);
    }

    pub fn mode(&self) -> ControlMode {
        ControlMode::from_bits(self.mode.load(ORDER))
    }

    pub fn set_mode(&self, mode: ControlMode) {
        self.mode.store(mode.to_bits(), ORDER);
    }

    pub fn enabled(&self) -> bool {
        self.enabled.load(ORDER)
    }

    pub fn set_enabled(&self, enabled: bool) {
        self.enabled.store(enabled, ORDER);
    }

    pub fn estop(&self) -> bool {
        self.estop.load(ORDER)
    }

    pub fn set_estop(&self, estop: bool) {
        self.estop.store(estop, ORDER);
    }

    pub fn robot_comms(&self) -> bool {
        self.robot_comms.load(ORDER)
    }

    pub fn set_robot_comms(&self, up: bool) {
        self.robot_comms.store(up, ORDER);
    }

    pub fn radio_comms(&self) -> bool {
        self.radio_comms.load(ORDER)
    }

    pub fn set_radio_comms(&self, up: bool) {
        self.radio_comms.store(up, ORDER);
    }

    pub fn fms_comms(&self) -> bool {
        self.fms_comms.load(ORDER)
    }

    pub fn set_fms_comms(&self, up: bool) {
        self.fms_comms.store(up, ORDER);
    }

    pub fn robot_has_code(&self) -> bool {
        self.robot_has_code.load(ORDER)
    }

    pub fn set_robot_has_code(&self, has_code: bool) {
        self.robot_has_code.store(has_code, ORDER);
    }

    pub fn voltage(&self) -> f64 {
        f32::from_bits(self.voltage_bits.load(ORDER)) as f64
    }

    pub fn set_voltage(&self, voltage: f64) {
        self.voltage_bits.store((voltage as f32).to_bits(), ORDER);
    }

    pub fn cpu_usage(&self) -> u8 {
        self.cpu_usage.load(ORDER)
    }

    pub fn set_cpu_usage(&self, percent: u8) {
        self.cpu_usage.store(percent.min(100), ORDER);
    }

    pub fn ram_usage(&self) -> u8 {
        self.ram_usage.load(ORDER)
    }

    pub fn set_ram_usage(&self, percent: u8) {
        self.ram_usage.store(percent.min(100), ORDER);
    }

    pub fn disk_usage(&self) -> u8 {
        self.disk_usage.load(ORDER)
    }

    pub fn set_disk_usage(&self, percent: u8) {
        self.disk_usage.store(percent.min(100), ORDER);
    }

    pub fn can_utilization(&self) -> u8 {
        self.can_utilization.load(ORDER)
    }

    pub fn set_can_utilization(&self, percent: u8) {
        self.can_utilization.store(percent.min(100), ORDER);
    }
}

impl Default for DsConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Joystick enumeration capability the core requires from its host (spec
/// §6). A host with its own gamepad-polling thread (gilrs, SDL, ...)
/// implements this directly over its live state instead of going through
/// [`JoystickBank`].
pub trait JoystickSource: Send + Sync {
    fn count(&self) -> usize;
    fn num_axes(&self, index: usize) -> usize;
    fn num_buttons(&self, index: usize) -> usize;
    fn num_hats(&self, index: usize) -> usize;
    fn axis(&self, index: usize, axis: usize) -> f32;
    fn button(&self, index: usize, button: usize) -> bool;
    fn hat(&self, index: usize, hat: usize) -> i16;
}

/// A simple shared-snapshot [`JoystickSource`], mirroring the teacher's
/// `Arc<RwLock<Vec<JoystickState>>>` pattern: one thread (an input-polling
/// thread) calls [`JoystickBank::set`], the scheduler thread calls the
/// `JoystickSource` getters while building the next robot packet.
pub struct JoystickBank {
    joysticks: RwLock<Vec<JoystickState>>,
}

impl JoystickBank {
    pub fn new() -> Self {
        Self {
            joysticks: RwLock::new(Vec::new()),
        }
    }

    /// Replaces the full joystick snapshot, capped at
    /// [`crate::types::MAX_JOYSTICKS`].
    pub fn set(&self, mut joysticks: Vec<JoystickState>) {
        joysticks.truncate(crate::types::MAX_JOYSTICKS);
        *self.joysticks.write() = joysticks;
    }
}

impl Default for JoystickBank {
    fn default() -> Self {
        Self::new()
    }
}

impl JoystickSource for JoystickBank {
    fn count(&self) -> usize {
        self.joysticks.read().len()
    }

    fn num_axes(&self, index: usize) -> usize {
        self.joysticks.read().get(index).map_or(0, |j| j.axes.len())
    }

    fn num_buttons(&self, index: usize) -> usize {
        self.joysticks
            .read()
            .get(index)
            .map_or(0, |j| j.buttons.len())
    }

    fn num_hats(&self, index: usize) -> usize {
        self.joysticks.read().get(index).map_or(0, |j| j.hats.len())
    }

    fn axis(&self, index: usize, axis: usize) -> f32 {
        self.joysticks
            .read()
            .get(index)
            .and_then(|j| j.axes.get(axis))
            .copied()
            .unwrap_or(0.0)
    }

    fn button(&self, index: usize, button: usize) -> bool {
        self.joysticks
            .read()
            .get(index)
            .and_then(|j| j.buttons.get(button))
            .copied()
            .unwrap_or(false)
    }

    fn hat(&self, index: usize, hat: usize) -> i16 {
        self.joysticks
            .read()
            .get(index)
            .and_then(|j| j.hats.get(hat))
            .copied()
            .unwrap_or(-1)
    }
}

/// A [`JoystickSource`] with no attached joysticks, for hosts that have not
/// wired up input yet.
pub struct NoJoysticks;

impl JoystickSource for NoJoysticks {
    fn count(&self) -> usize {
        0
    }
    fn num_axes(&self, _index: usize) -> usize {
        0
    }
    fn num_buttons(&self, _index: usize) -> usize {
        0
    }
    fn num_hats(&self, _index: usize) -> usize {
        0
    }
    fn axis(&self, _index: usize, _axis: usize) -> f32 {
        0.0
    }
    fn button(&self, _index: usize, _button: usize) -> bool {
        false
    }
    fn hat(&self, _index: usize, _hat: usize) -> i16 {
        -1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn getters_reflect_setters() {
        let cfg = DsConfig::new();
        cfg.set_team_number(4499);
        cfg.set_alliance(Alliance::Blue);
        cfg.set_position(Position::P2);
        cfg.set_mode(ControlMode::Autonomous);
        cfg.set_enabled(true);
        cfg.set_voltage(12.5);

        assert_eq!(cfg.team_number(), 4499);
        assert_eq!(cfg.alliance(), Alliance::Blue);
        assert_eq!(cfg.position(), Position::P2);
        assert_eq!(cfg.mode(), ControlMode::Autonomous);
        assert!(cfg.enabled());
        assert_eq!(cfg.voltage(), 12.5);
    }

    #[test]
    fn usage_percentages_clamp_to_100() {
        let cfg = DsConfig::new();
        cfg.set_cpu_usage(255);
        assert_eq!(cfg.cpu_usage(), 100);
    }

    #[test]
    fn joystick_bank_truncates_to_caps() {
        let bank = JoystickBank::new();
        bank.set(vec![JoystickState::new(
            vec![0.0; 20],
            vec![false; 20],
            vec![0; 20],
        )]);
        assert_eq!(bank.num_axes(0), crate::types::MAX_AXES);
        assert_eq!(bank.num_buttons(0), crate::types::MAX_BUTTONS);
        assert_eq!(bank.num_hats(0), crate::types::MAX_HATS);
    }

    #[test]
    fn no_joysticks_reports_empty() {
        let none = NoJoysticks;
        assert_eq!(none.count(), 0);
        assert_eq!(none.hat(0, 0), -1);
    }
}
