//! Radio packet container.
//!
//! A packet is a 7-bit application type carried out of band plus up to
//! 19 payload bytes. The type is reserved for the application; the radio
//! stack never interprets it.

use heapless::Vec;

/// Maximum payload size supported by the radio transport
pub const MAX_PACKET_PAYLOAD: usize = 19;

/// Highest valid application packet type (7-bit field)
pub const MAX_PACKET_TYPE: u8 = 0x7F;

/// Errors that can occur while building or decoding packets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PacketError {
    /// Payload exceeds the transport maximum
    PayloadTooLarge,
    /// Packet type does not fit in 7 bits
    InvalidType,
    /// Payload too short for the expected layout
    Truncated,
    /// Packet type does not match the expected stream
    UnexpectedType,
}

/// A single radio packet
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Packet {
    packet_type: u8,
    payload: Vec<u8, MAX_PACKET_PAYLOAD>,
}

impl Packet {
    /// Create an empty type-0 packet
    pub const fn empty() -> Self {
        Self {
            packet_type: 0,
            payload: Vec::new(),
        }
    }

    /// Create a packet with the given type and payload
    pub fn new(packet_type: u8, payload: &[u8]) -> Result<Self, PacketError> {
        if packet_type > MAX_PACKET_TYPE {
            return Err(PacketError::InvalidType);
        }
        if payload.len() > MAX_PACKET_PAYLOAD {
            return Err(PacketError::PayloadTooLarge);
        }

        let mut payload_vec = Vec::new();
        payload_vec
            .extend_from_slice(payload)
            .map_err(|_| PacketError::PayloadTooLarge)?;

        Ok(Self {
            packet_type,
            payload: payload_vec,
        })
    }

    /// Maximum payload this packet can hold
    pub const fn capacity() -> usize {
        MAX_PACKET_PAYLOAD
    }

    /// Application packet type
    pub fn packet_type(&self) -> u8 {
        self.packet_type
    }

    /// Set the application packet type
    pub fn set_type(&mut self, packet_type: u8) -> Result<(), PacketError> {
        if packet_type > MAX_PACKET_TYPE {
            return Err(PacketError::InvalidType);
        }
        self.packet_type = packet_type;
        Ok(())
    }

    /// Payload length in bytes
    pub fn size(&self) -> usize {
        self.payload.len()
    }

    /// Check if the payload is empty
    pub fn is_empty(&self) -> bool {
        self.payload.is_empty()
    }

    /// Payload bytes
    pub fn bytes(&self) -> &[u8] {
        &self.payload
    }

    /// Mutable payload bytes (current length only)
    pub fn bytes_mut(&mut self) -> &mut [u8] {
        &mut self.payload
    }

    /// Resize the payload, zero-filling any new bytes
    pub fn resize(&mut self, len: usize) -> Result<(), PacketError> {
        self.payload
            .resize(len, 0)
            .map_err(|_| PacketError::PayloadTooLarge)
    }

    /// Grow the payload to full capacity with every byte zeroed
    pub fn zero_fill(&mut self) {
        self.payload.clear();
        // Capacity is exactly MAX_PACKET_PAYLOAD
        let _ = self.payload.resize(MAX_PACKET_PAYLOAD, 0);
    }

    /// Reset to an empty type-0 packet
    pub fn clear(&mut self) {
        self.packet_type = 0;
        self.payload.clear();
    }
}
