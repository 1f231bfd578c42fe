//! Netconsole tag codec (ambient supplement, spec §4.F): decodes the
//! roboRIO→DS TCP console stream's tag-framed sub-payloads.
//!
//! Grounded in the teacher's `logging.rs::read_console_stream`. The host
//! owns the TCP framing loop (`[size: u16 BE][tag: u8][payload]`) and the
//! reconnect policy, exactly as it owns the UDP socket layer for (C)/(D);
//! this module is the pure decode step, handed one already-framed payload
//! at a time.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum NetconsoleTag {
    StdOut {
        timestamp: f32,
        sequence: u16,
        message: String,
    },
    Error {
        timestamp: f32,
        sequence: u16,
        is_error: bool,
        details: String,
        location: String,
        call_stack: String,
    },
    Version {
        image: String,
        wpilib: String,
        rio: String,
    },
    DisableFaults {
        comms: u16,
        v12: u16,
    },
    RailFaults {
        v6: u16,
        v5: u16,
        v3_3: u16,
    },
}

/// Decodes one already-framed netconsole tag payload (the bytes after the
/// `[size][tag]` header, i.e. `payload[0]` in the teacher's framing is the
/// tag and is passed separately here).
pub fn decode_tag(tag: u8, data: &[u8]) -> Option<NetconsoleTag> {
    match tag {
        0x0c => decode_stdout(data),
        0x0b => decode_error(data),
        0x0a => decode_version(data),
        0x04 => decode_disable_faults(data),
        0x05 => decode_rail_faults(data),
        other => {
            tracing::debug!("netconsole tag 0x{other:02x}, {} bytes, ignored", data.len());
            None
        }
    }
}

fn decode_stdout(data: &[u8]) -> Option<NetconsoleTag> {
    if data.len() < 6 {
        return None;
    }
    let timestamp = f32::from_be_bytes([data[0], data[1], data[2], data[3]]);
    let sequence = u16::from_be_bytes([data[4], data[5]]);
    let message = String::from_utf8_lossy(&data[6..]).trim_end().to_string();
    if message.is_empty() {
        return None;
    }
    Some(NetconsoleTag::StdOut {
        timestamp,
        sequence,
        message,
    })
}

fn decode_error(data: &[u8]) -> Option<NetconsoleTag> {
    if data.len() < 13 {
        // Fall back to the stdout framing, matching the teacher's handling
        // of a truncated error record.
        return decode_stdout(data).map(|tag| match tag {
            NetconsoleTag::StdOut {
                timestamp,
                sequence,
                message,
            } => NetconsoleTag::Error {
                timestamp,
                sequence,
                is_error: true,
                details: message,
                location: String::new(),
                call_stack: String::new(),
            },
            other => other,
        });
    }

    let timestamp = f32::from_be_bytes([data[0], data[1], data[2], data[3]]);
    let sequence = u16::from_be_bytes([data[4], data[5]]);
    // data[6..8] reserved, data[8..12] error_code: i32 — not surfaced.
    let flags = data[12];
    let is_error = flags & 0x01 != 0;

    let mut offset = 13;
    let (details, next) = read_prefixed_string(data, offset).unwrap_or_default();
    offset = next;
    let (location, next) = read_prefixed_string(data, offset).unwrap_or_default();
    offset = next;
    let (call_stack, _) = read_prefixed_string(data, offset).unwrap_or_default();

    Some(NetconsoleTag::Error {
        timestamp,
        sequence,
        is_error,
        details,
        location,
        call_stack,
    })
}

fn decode_version(data: &[u8]) -> Option<NetconsoleTag> {
    let mut offset = 0;
    let (image, next) = read_prefixed_string(data, offset).unwrap_or_default();
    offset = next;
    let (wpilib, next) = read_prefixed_string(data, offset).unwrap_or_default();
    offset = next;
    let (rio, _) = read_prefixed_string(data, offset).unwrap_or_default();
    Some(NetconsoleTag::Version { image, wpilib, rio })
}

fn decode_disable_faults(data: &[u8]) -> Option<NetconsoleTag> {
    if data.len() < 4 {
        return None;
    }
    Some(NetconsoleTag::DisableFaults {
        comms: u16::from_be_bytes([data[0], data[1]]),
        v12: u16::from_be_bytes([data[2], data[3]]),
    })
}

fn decode_rail_faults(data: &[u8]) -> Option<NetconsoleTag> {
    if data.len() < 6 {
        return None;
    }
    Some(NetconsoleTag::RailFaults {
        v6: u16::from_be_bytes([data[0], data[1]]),
        v5: u16::from_be_bytes([data[2], data[3]]),
        v3_3: u16::from_be_bytes([data[4], data[5]]),
    })
}

/// A length-prefixed string: 2-byte BE length + UTF-8 bytes, trailing
/// whitespace trimmed (matches the teacher's `read_prefixed_string`).
fn read_prefixed_string(data: &[u8], offset: usize) -> Option<(String, usize)> {
    if offset + 2 > data.len() {
        return None;
    }
    let len = u16::from_be_bytes([data[offset], data[offset + 1]]) as usize;
    let start = offset + 2;
    if start + len > data.len() {
        return None;
    }
    let s = String::from_utf8_lossy(&data[start..start + len])
        .trim_end()
        .to_string();
    Some((s, start + len))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_stdout_tag() {
        let mut data = 1.5f32.to_be_bytes().to_vec();
        data.extend_from_slice(&7u16.to_be_bytes());
        data.extend_from_slice(b"hello\n");
        let tag = decode_tag(0x0c, &data).unwrap();
        assert_eq!(
            tag,
            NetconsoleTag::StdOut {
                timestamp: 1.5,
                sequence: 7,
                message: "hello".to_string(),
            }
        );
    }

    #[test]
    fn decodes_disable_faults() {
        let data = [0x00, 0x02, 0x00, 0x01];
        let tag = decode_tag(0x04, &data).unwrap();
        assert_eq!(
            tag,
            NetconsoleTag::DisableFaults { comms: 2, v12: 1 }
        );
    }

    #[test]
    fn unknown_tag_returns_none() {
        assert_eq!(decode_tag(0xff, &[1, 2, 3]), None);
    }

    #[test]
    fn decodes_version_tag() {
        let mut data = Vec::new();
        for s in ["2024.1", "2024.2.1", "7.1"] {
            data.extend_from_slice(&(s.len() as u16).to_be_bytes());
            data.extend_from_slice(s.as_bytes());
        }
        let tag = decode_tag(0x0a, &data).unwrap();
        assert_eq!(
            tag,
            NetconsoleTag::Version {
                image: "2024.1".to_string(),
                wpilib: "2024.2.1".to_string(),
                rio: "7.1".to_string(),
            }
        );
    }
}
