//! Packet builders (spec component C): `build_fms_packet`, `build_robot_packet`,
//! and `build_radio_packet`. These read the configuration facade and
//! protocol runtime and return an owned, growable byte buffer — never a
//! fixed-size buffer that needs reallocating in place (spec §9 flags the
//! original's manual realloc of a fixed local buffer as a bug).

use std::time::SystemTime;

use byteorder::{BigEndian, WriteBytesExt};

use crate::codec::{encode_u16_be, encode_voltage, station_byte};
use crate::facade::{DsConfig, JoystickSource};
use crate::runtime::ProtocolRuntime;
use crate::types::Station;

/// Three-letter timezone substitute used when no OS-provided abbreviation
/// is available (spec §4.C). This crate intentionally depends on nothing
/// beyond `std::time`, so it always reports UTC; a host with a timezone
/// database (e.g. `chrono-tz`) may pre-format its own string and is free to
/// fork [`build_robot_packet_at`] with a different `tz_abbr`.
pub const LOCAL_TIMEZONE_ABBREVIATION: &str = "UTC";

/// Builds the DS→FMS UDP packet (emitted every 500ms, spec §4.C). Advances
/// the FMS sent-packet counter as a side effect.
pub fn build_fms_packet(cfg: &DsConfig, runtime: &ProtocolRuntime) -> Vec<u8> {
    let seq = runtime.advance_fms_counter();
    let mut pkt = Vec::with_capacity(8);

    let (seq_hi, seq_lo) = encode_u16_be(seq);
    pkt.push(seq_hi);
    pkt.push(seq_lo);

    pkt.push(0x00); // DS version tag

    let mut control: u8 = cfg.mode().to_bits();
    if cfg.enabled() {
        control |= 0x04;
    }
    if cfg.estop() {
        control |= 0x80;
    }
    if cfg.radio_comms() {
        control |= 0x10;
    }
    if cfg.robot_comms() {
        control |= 0x08 | 0x20;
    }
    pkt.push(control);

    let (team_hi, team_lo) = encode_u16_be(cfg.team_number());
    pkt.push(team_hi);
    pkt.push(team_lo);

    let (v_hi, v_lo) = encode_voltage(cfg.voltage());
    pkt.push(v_hi);
    pkt.push(v_lo);

    debug_assert_eq!(pkt.len(), 8);
    pkt
}

/// Always-empty radio outbound datagram (spec §4.C; cadence 0, disabled).
pub fn build_radio_packet() -> Vec<u8> {
    Vec::new()
}

/// Builds the DS→Robot UDP packet (emitted every 20ms, spec §4.C), reading
/// the wall clock for the timezone payload. Advances the robot sent-packet
/// counter as a side effect.
pub fn build_robot_packet(
    cfg: &DsConfig,
    runtime: &ProtocolRuntime,
    joysticks: &dyn JoystickSource,
) -> Vec<u8> {
    build_robot_packet_at(
        cfg,
        runtime,
        joysticks,
        SystemTime::now(),
        LOCAL_TIMEZONE_ABBREVIATION,
    )
}

/// [`build_robot_packet`] with an injected clock reading, for deterministic
/// tests and for hosts that maintain their own timezone abbreviation.
pub fn build_robot_packet_at(
    cfg: &DsConfig,
    runtime: &ProtocolRuntime,
    joysticks: &dyn JoystickSource,
    now: SystemTime,
    tz_abbr: &str,
) -> Vec<u8> {
    let seq = runtime.advance_robot_counter();
    let mut pkt = Vec::with_capacity(64);

    let (seq_hi, seq_lo) = encode_u16_be(seq);
    pkt.push(seq_hi);
    pkt.push(seq_lo);

    pkt.push(0x01); // general tag

    let mut control: u8 = cfg.mode().to_bits();
    if cfg.fms_comms() {
        control |= 0x08;
    }
    if cfg.estop() {
        control |= 0x80;
    }
    if cfg.enabled() {
        control |= 0x04;
    }
    pkt.push(control);

    let request: u8 = if runtime.reboot_latch() {
        0x08
    } else if runtime.restart_code_latch() {
        0x04
    } else if cfg.robot_comms() {
        0x80
    } else {
        0x00
    };
    pkt.push(request);

    let station = Station::new(cfg.alliance(), cfg.position());
    pkt.push(station_byte(station));

    if runtime.send_time_data_latch() {
        append_timezone_payload(&mut pkt, now, tz_abbr);
    } else if seq > 5 {
        append_joystick_payload(&mut pkt, joysticks);
    }

    pkt
}

/// Joystick payload: concatenation of one tag per attached joystick, in
/// enumeration order (spec §4.C, §3 invariant on per-joystick length).
fn append_joystick_payload(pkt: &mut Vec<u8>, joysticks: &dyn JoystickSource) {
    for i in 0..joysticks.count() {
        let num_axes = joysticks.num_axes(i);
        let num_buttons = joysticks.num_buttons(i);
        let num_hats = joysticks.num_hats(i);

        // bytes following the size byte: tag(1) + axes + button-count(1) + bitfield(2) + hat-count(1) + hats*2
        let data_size = 1 + num_axes + 1 + 2 + 1 + num_hats * 2;
        pkt.push(data_size as u8);
        pkt.push(0x0c); // joystick tag

        for a in 0..num_axes {
            let raw = (joysticks.axis(i, a) * 127.0).round().clamp(-128.0, 127.0) as i8;
            pkt.push(raw as u8);
        }

        pkt.push(num_buttons as u8);
        let mut bitfield: u16 = 0;
        for b in 0..num_buttons.min(16) {
            if joysticks.button(i, b) {
                bitfield |= 1 << b;
            }
        }
        let _ = pkt.write_u16::<BigEndian>(bitfield);

        pkt.push(num_hats as u8);
        for h in 0..num_hats {
            let _ = pkt.write_i16::<BigEndian>(joysticks.hat(i, h));
        }
    }
}

/// Timezone payload (spec §4.C). Reads the clock first (spec §9: the
/// original calls `localtime` before reading the clock, which is
/// undefined), then decomposes into a UTC civil date.
fn append_timezone_payload(pkt: &mut Vec<u8>, now: SystemTime, tz_abbr: &str) {
    let dur = now
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default();
    let secs = dur.as_secs();

    let sec = (secs % 60) as u8;
    let min = ((secs / 60) % 60) as u8;
    let hour = ((secs / 3600) % 24) as u8;
    let days = secs / 86_400;
    let (year, month, day) = civil_from_days(days as i64);
    let doy = day_of_year(year, month, day);

    pkt.push(0x0b); // size of the fixed date block (tag + 8 fields + tz-len + tz-tag)
    pkt.push(0x0f); // date tag
    pkt.push(0);
    pkt.push(0);
    pkt.push(sec);
    pkt.push(min);
    pkt.push(hour);
    pkt.push(doy as u8); // wraps mod 256, same fixed-point discipline as `year`
    pkt.push(month - 1); // 0-indexed month
    pkt.push((year - 1900).rem_euclid(256) as u8);

    let tz_bytes = tz_abbr.as_bytes();
    let tz_len = tz_bytes.len().min(u8::MAX as usize);
    pkt.push(tz_len as u8);
    pkt.push(0x10); // timezone tag
    pkt.extend_from_slice(&tz_bytes[..tz_len]);
}

/// Civil calendar algorithm from Howard Hinnant's `chrono-compatible`
/// date algorithms, converting days-since-epoch to (year, month, day).
fn civil_from_days(days: i64) -> (i64, u8, u8) {
    let z = days + 719_468;
    let era = z.div_euclid(146_097);
    let doe = z.rem_euclid(146_097) as u64;
    let yoe = (doe - doe / 1460 + doe / 36_524 - doe / 146_096) / 365;
    let y = yoe as i64 + era * 400;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let d = (doy - (153 * mp + 2) / 5 + 1) as u8;
    let m = if mp < 10 { mp + 3 } else { mp - 9 } as u8;
    let y = if m <= 2 { y + 1 } else { y };
    (y, m, d)
}

fn is_leap_year(year: i64) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// 0-based day-of-year for a civil (year, month, day) triple.
fn day_of_year(year: i64, month: u8, day: u8) -> u16 {
    const CUMULATIVE: [u16; 12] = [0, 31, 59, 90, 120, 151, 181, 212, 243, 273, 304, 334];
    let mut doy = CUMULATIVE[(month - 1) as usize] + (day as u16 - 1);
    if month > 2 && is_leap_year(year) {
        doy += 1;
    }
    doy
}
