//! Packet parsers (spec component D): `parse_fms_packet`, `parse_robot_packet`,
//! `parse_radio_packet`. Parsers only ever write through the configuration
//! facade and runtime; they never read back what they just wrote, so the
//! caller's watchdog-feeding decision can be based purely on the `Result`.

use crate::codec::{alliance_of, decode_voltage, position_of};
use crate::error::ProtocolError;
use crate::facade::DsConfig;
use crate::runtime::ProtocolRuntime;
use crate::types::{ControlMode, Peer};

const FMS_MIN_LEN: usize = 6;
const ROBOT_MIN_LEN: usize = 8;

/// Parses an inbound FMS→DS packet, updating `cfg` in place.
///
/// Reads byte `[3]` as the control byte and byte `[5]` as the station byte.
/// Returns [`ProtocolError::PacketTooShort`] (and mutates nothing) if the
/// payload is under 6 bytes, per spec §4.D / §7 kind 1.
pub fn parse_fms_packet(data: &[u8], cfg: &DsConfig) -> Result<(), ProtocolError> {
    if data.len() < FMS_MIN_LEN {
        return Err(ProtocolError::PacketTooShort {
            peer: Peer::Fms,
            got: data.len(),
            need: FMS_MIN_LEN,
        });
    }

    let control = data[3];
    let station = data[5];

    cfg.set_enabled(control & 0x04 != 0);
    cfg.set_mode(ControlMode::from_bits(control));
    cfg.set_alliance(alliance_of(station));
    cfg.set_position(position_of(station));

    Ok(())
}

/// Parses an inbound Robot→DS packet, updating `cfg` and `runtime` in
/// place.
///
/// Reads byte `[3]` (control), byte `[4]` (status), bytes `[5..7)`
/// (voltage), and byte `[7]` (request). If the payload is longer than 9
/// bytes, dispatches a single extended-telemetry tag starting at offset 8
/// (spec §4.D: "only a single extended block is parsed"). Returns
/// [`ProtocolError::PacketTooShort`] if under 8 bytes.
pub fn parse_robot_packet(
    data: &[u8],
    cfg: &DsConfig,
    runtime: &ProtocolRuntime,
) -> Result<(), ProtocolError> {
    if data.len() < ROBOT_MIN_LEN {
        return Err(ProtocolError::PacketTooShort {
            peer: Peer::Robot,
            got: data.len(),
            need: ROBOT_MIN_LEN,
        });
    }

    let control = data[3];
    let status = data[4];
    let request = data[7];

    cfg.set_robot_has_code(status & 0x20 != 0);
    cfg.set_estop(control & 0x80 != 0);
    cfg.set_voltage(decode_voltage(data[5], data[6]));
    runtime.set_send_time_data_latch(request == 0x01);

    if data.len() > 9 {
        dispatch_extended_tag(data, 8, cfg);
    }

    Ok(())
}

/// Robot extended-telemetry tag dispatch (spec §4.D). `offset` is the index
/// of the tag byte itself; an unrecognized tag is silently ignored (spec §7
/// kind 2) — the header fields above have already been applied regardless.
fn dispatch_extended_tag(data: &[u8], offset: usize, cfg: &DsConfig) {
    let Some(&tag) = data.get(offset + 1) else {
        return;
    };

    let read_u8 = |idx: usize| data.get(idx).copied();

    match tag {
        0x0e => {
            if let Some(can) = read_u8(offset + 10) {
                cfg.set_can_utilization(can);
            }
        }
        0x05 => {
            if let Some(cpu) = read_u8(offset + 3) {
                cfg.set_cpu_usage(cpu);
            }
        }
        0x06 => {
            if let Some(ram) = read_u8(offset + 4) {
                cfg.set_ram_usage(ram);
            }
        }
        0x04 => {
            if let Some(disk) = read_u8(offset + 4) {
                cfg.set_disk_usage(disk);
            }
        }
        other => {
            tracing::debug!("unrecognized extended telemetry tag 0x{other:02x}");
        }
    }
}

/// Radio inbound packets carry no protocol data; always discarded (spec
/// §4.D: "Discard; return failure").
pub fn parse_radio_packet(_data: &[u8]) -> Result<(), ProtocolError> {
    Err(ProtocolError::PacketTooShort {
        peer: Peer::Radio,
        got: 0,
        need: usize::MAX,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Alliance;
    use crate::types::Position;

    #[test]
    fn fms_inbound_scenario() {
        let cfg = DsConfig::new();
        // control = 0x06 (autonomous | enabled), station = 4 (Blue2)
        let pkt = [0xff, 0xff, 0xff, 0x06, 0xff, 0x04];
        parse_fms_packet(&pkt, &cfg).unwrap();
        assert!(cfg.enabled());
        assert_eq!(cfg.mode(), ControlMode::Autonomous);
        assert_eq!(cfg.alliance(), Alliance::Blue);
        assert_eq!(cfg.position(), Position::P2);
    }

    #[test]
    fn fms_packet_too_short_mutates_nothing() {
        let cfg = DsConfig::new();
        cfg.set_team_number(42);
        let err = parse_fms_packet(&[1, 2, 3], &cfg).unwrap_err();
        assert!(matches!(err, ProtocolError::PacketTooShort { peer: Peer::Fms, .. }));
        assert_eq!(cfg.team_number(), 42);
        assert_eq!(cfg.mode(), ControlMode::Teleoperated);
    }

    #[test]
    fn robot_inbound_updates_status_and_voltage() {
        let cfg = DsConfig::new();
        let rt = ProtocolRuntime::new();
        // control=0x80 (estop), status=0x20 (code running), voltage=12,128 -> 12.5
        let pkt = [0, 0, 0, 0x80, 0x20, 12, 128, 0x00];
        parse_robot_packet(&pkt, &cfg, &rt).unwrap();
        assert!(cfg.estop());
        assert!(cfg.robot_has_code());
        assert_eq!(cfg.voltage(), 12.5);
        assert!(!rt.send_time_data_latch());
    }

    #[test]
    fn robot_inbound_request_one_sets_time_latch() {
        let cfg = DsConfig::new();
        let rt = ProtocolRuntime::new();
        let pkt = [0, 0, 0, 0, 0, 0, 0, 0x01];
        parse_robot_packet(&pkt, &cfg, &rt).unwrap();
        assert!(rt.send_time_data_latch());
    }

    #[test]
    fn robot_inbound_cpu_tag_scenario() {
        let cfg = DsConfig::new();
        let rt = ProtocolRuntime::new();
        // length 12, extended block starting at offset 8: [size, tag=0x05, ?, 0x57]
        let mut pkt = vec![0u8; 12];
        pkt[3] = 0;
        pkt[7] = 0;
        pkt[8] = 3; // size (unused by dispatch)
        pkt[9] = 0x05; // CPU tag
        pkt[10] = 0xAA; // unused byte
        pkt[11] = 0x57; // CPU usage at offset+3 == index 11
        parse_robot_packet(&pkt, &cfg, &rt).unwrap();
        assert_eq!(cfg.cpu_usage(), 0x57.min(100));
    }

    #[test]
    fn robot_inbound_unrecognized_tag_is_ignored_but_header_applied() {
        let cfg = DsConfig::new();
        let rt = ProtocolRuntime::new();
        let mut pkt = vec![0u8; 12];
        pkt[3] = 0x80; // estop
        pkt[9] = 0xff; // unknown tag
        let result = parse_robot_packet(&pkt, &cfg, &rt);
        assert!(result.is_ok());
        assert!(cfg.estop());
    }

    #[test]
    fn robot_packet_too_short_is_rejected() {
        let cfg = DsConfig::new();
        let rt = ProtocolRuntime::new();
        let err = parse_robot_packet(&[0; 4], &cfg, &rt).unwrap_err();
        assert!(matches!(err, ProtocolError::PacketTooShort { peer: Peer::Robot, .. }));
    }

    #[test]
    fn radio_inbound_always_fails() {
        assert!(parse_radio_packet(&[1, 2, 3]).is_err());
    }
}
