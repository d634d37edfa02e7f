//! Hex dump of packet payloads for text-mode displays.

use core::fmt::Write;

use heapless::String;

use crate::packet::MAX_PACKET_PAYLOAD;

/// Payload bytes shown per line
pub const HEX_DUMP_BYTES_PER_LINE: usize = 8;

/// Lines needed to show a full-size payload
pub const HEX_DUMP_LINES: usize = MAX_PACKET_PAYLOAD.div_ceil(HEX_DUMP_BYTES_PER_LINE);

/// One formatted line: two characters per byte
pub type HexDumpLine = String<{ HEX_DUMP_BYTES_PER_LINE * 2 }>;

/// Format up to eight bytes starting at `start`
///
/// Positions past the end of `bytes` are padded with two spaces so every
/// line has the same width.
pub fn hex_dump_line(bytes: &[u8], start: usize) -> HexDumpLine {
    let mut line = HexDumpLine::new();

    for offset in 0..HEX_DUMP_BYTES_PER_LINE {
        let byte = start.checked_add(offset).and_then(|index| bytes.get(index));
        // Width is fixed at 16 characters, so writes cannot overflow
        let _ = match byte {
            Some(byte) => write!(line, "{:02x}", byte),
            None => line.push_str("  ").map_err(|_| core::fmt::Error),
        };
    }

    line
}

/// Format a full payload as fixed-width lines
pub fn hex_dump(bytes: &[u8]) -> [HexDumpLine; HEX_DUMP_LINES] {
    core::array::from_fn(|line| hex_dump_line(bytes, line * HEX_DUMP_BYTES_PER_LINE))
}
