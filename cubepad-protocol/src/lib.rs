//! Cubepad Radio Link Protocol
//!
//! This crate defines the packets exchanged between the cubepad base station
//! and its paired peer over the low-latency radio pipe. The radio stack owns
//! framing, retransmission and flow control; this crate only describes what
//! goes inside a packet.
//!
//! # Packet Overview
//!
//! Every radio packet carries an out-of-band type and a short payload:
//! ```text
//! ┌─────────────┬─────────────────────────────┐
//! │ TYPE        │ PAYLOAD                     │
//! │ 7 bit (OOB) │ 0–19B                       │
//! └─────────────┴─────────────────────────────┘
//! ```
//!
//! The control stream (type 0) uses the first six payload bytes:
//! ```text
//! ┌────────┬────────┬────────┬─────────┬──────────┬──────────┐
//! │ AXIS X │ AXIS Y │ AXIS Z │ AXIS RX │ BUTTONS0 │ BUTTONS1 │
//! │ i8     │ i8     │ i8     │ i8      │ u8       │ u8       │
//! └────────┴────────┴────────┴─────────┴──────────┴──────────┘
//! ```
//!
//! Inbound packets from the peer are opaque to the controller.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod control;
pub mod hexdump;
pub mod packet;

pub use control::{ControlPacket, CONTROL_PACKET_LEN, CONTROL_PACKET_TYPE};
pub use hexdump::{hex_dump, hex_dump_line, HexDumpLine, HEX_DUMP_BYTES_PER_LINE, HEX_DUMP_LINES};
pub use packet::{Packet, PacketError, MAX_PACKET_PAYLOAD, MAX_PACKET_TYPE};
