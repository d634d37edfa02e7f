//! Control packet: the virtual joystick report.
//!
//! Payload layout (type 0):
//! - 0: axis X (i8)
//! - 1: axis Y (i8)
//! - 2: axis Z (i8)
//! - 3: axis Rx (i8)
//! - 4: buttons 1-8
//! - 5: buttons 9-15 (reserved)
//!
//! The radio packet is always sent at full capacity; bytes past the
//! control layout are zero.

use crate::packet::{Packet, PacketError};

/// Packet type of the control stream. Reserved, do not change.
pub const CONTROL_PACKET_TYPE: u8 = 0x00;

/// Bytes used by the control layout
pub const CONTROL_PACKET_LEN: usize = 6;

/// One joystick report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ControlPacket {
    pub axis_x: i8,
    pub axis_y: i8,
    pub axis_z: i8,
    pub axis_rx: i8,
    /// Buttons 1-8
    pub buttons0: u8,
    /// Buttons 9-15
    pub buttons1: u8,
}

impl ControlPacket {
    /// All axes centred, no buttons
    pub const fn zeroed() -> Self {
        Self {
            axis_x: 0,
            axis_y: 0,
            axis_z: 0,
            axis_rx: 0,
            buttons0: 0,
            buttons1: 0,
        }
    }

    /// Both button bytes as one mask (`buttons1` in the high byte)
    pub fn buttons(&self) -> u16 {
        u16::from(self.buttons0) | (u16::from(self.buttons1) << 8)
    }

    /// OR button bits into the report
    ///
    /// Bits are only ever accumulated; nothing clears a pressed button
    /// except starting a new report.
    pub fn press(&mut self, mask: u16) {
        self.buttons0 |= (mask & 0x00FF) as u8;
        self.buttons1 |= (mask >> 8) as u8;
    }

    /// Encode into the six-byte wire layout
    pub fn to_bytes(&self) -> [u8; CONTROL_PACKET_LEN] {
        [
            self.axis_x as u8,
            self.axis_y as u8,
            self.axis_z as u8,
            self.axis_rx as u8,
            self.buttons0,
            self.buttons1,
        ]
    }

    /// Decode from a payload (extra trailing bytes are ignored)
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, PacketError> {
        if bytes.len() < CONTROL_PACKET_LEN {
            return Err(PacketError::Truncated);
        }

        Ok(Self {
            axis_x: bytes[0] as i8,
            axis_y: bytes[1] as i8,
            axis_z: bytes[2] as i8,
            axis_rx: bytes[3] as i8,
            buttons0: bytes[4],
            buttons1: bytes[5],
        })
    }

    /// Decode from a radio packet, checking the stream type
    pub fn from_packet(packet: &Packet) -> Result<Self, PacketError> {
        if packet.packet_type() != CONTROL_PACKET_TYPE {
            return Err(PacketError::UnexpectedType);
        }
        Self::from_bytes(packet.bytes())
    }

    /// Write this report into a radio packet
    ///
    /// The packet is reset to the control type and zero-filled to full
    /// capacity before the report bytes are copied in.
    pub fn write_to(&self, packet: &mut Packet) {
        packet.clear();
        packet.zero_fill();
        packet.bytes_mut()[..CONTROL_PACKET_LEN].copy_from_slice(&self.to_bytes());
    }
}
