//! Protocol runtime state (spec component E): per-peer sent-packet counters
//! and the one-shot latches that modify the next outbound robot packet.
//!
//! Single-writer per field (spec §5): the builder thread owns the counters,
//! the parser thread owns `send_time_data_latch`, external command handlers
//! own `reboot_latch`/`restart_code_latch`, and the watchdog thread clears
//! all three latches via [`ProtocolRuntime::reset_robot`].

use std::sync::atomic::{AtomicBool, AtomicU16, Ordering};

const ORDER: Ordering = Ordering::SeqCst;

#[derive(Default)]
pub struct ProtocolRuntime {
    sent_fms_packets: AtomicU16,
    sent_robot_packets: AtomicU16,
    reboot_latch: AtomicBool,
    restart_code_latch: AtomicBool,
    send_time_data_latch: AtomicBool,
}

impl ProtocolRuntime {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sent_fms_packets(&self) -> u16 {
        self.sent_fms_packets.load(ORDER)
    }

    /// Advances the FMS counter by one, wrapping at 2^16. Called once per
    /// FMS emission, after the packet is built.
    pub(crate) fn advance_fms_counter(&self) -> u16 {
        self.sent_fms_packets.fetch_add(1, ORDER)
    }

    pub fn sent_robot_packets(&self) -> u16 {
        self.sent_robot_packets.load(ORDER)
    }

    /// Advances the robot counter by one, wrapping at 2^16. Called once per
    /// robot emission, after the packet is built.
    pub(crate) fn advance_robot_counter(&self) -> u16 {
        self.sent_robot_packets.fetch_add(1, ORDER)
    }

    pub fn reboot_latch(&self) -> bool {
        self.reboot_latch.load(ORDER)
    }

    /// Requests a roboRIO reboot on the next outbound robot packet.
    pub fn reboot_robot(&self) {
        self.reboot_latch.store(true, ORDER);
    }

    pub fn restart_code_latch(&self) -> bool {
        self.restart_code_latch.load(ORDER)
    }

    /// Requests a robot-code restart on the next outbound robot packet.
    pub fn restart_robot_code(&self) {
        self.restart_code_latch.store(true, ORDER);
    }

    pub fn send_time_data_latch(&self) -> bool {
        self.send_time_data_latch.load(ORDER)
    }

    pub(crate) fn set_send_time_data_latch(&self, value: bool) {
        self.send_time_data_latch.store(value, ORDER);
    }

    /// Watchdog-expiry hook for the robot peer: clears every latch so the
    /// next outbound packet reflects a disconnected state (spec §3
    /// invariant, spec §4.E `reset_robot`).
    pub fn reset_robot(&self) {
        self.reboot_latch.store(false, ORDER);
        self.restart_code_latch.store(false, ORDER);
        self.send_time_data_latch.store(false, ORDER);
    }

    /// Watchdog-expiry hook for the FMS peer. No-op: the FMS peer has no
    /// latches of its own (spec §4.E).
    pub fn reset_fms(&self) {}

    /// Watchdog-expiry hook for the radio peer. No-op (spec §4.E).
    pub fn reset_radio(&self) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counters_wrap_at_u16_max() {
        let rt = ProtocolRuntime::new();
        for _ in 0..=u16::MAX {
            rt.advance_robot_counter();
        }
        assert_eq!(rt.sent_robot_packets(), 0);
    }

    #[test]
    fn reset_robot_clears_all_latches() {
        let rt = ProtocolRuntime::new();
        rt.reboot_robot();
        rt.restart_robot_code();
        rt.set_send_time_data_latch(true);
        rt.reset_robot();
        assert!(!rt.reboot_latch());
        assert!(!rt.restart_code_latch());
        assert!(!rt.send_time_data_latch());
    }
}
