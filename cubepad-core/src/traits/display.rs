//! Status display trait

use cubepad_protocol::Packet;

use crate::link::ConnectionState;
use crate::sensor::{Accel, MotionFlags, NodeId, Tilt};

/// Status presentation for the link
///
/// All calls are fire-and-forget and must not block. Sensor-related
/// notifications have empty default bodies so simple displays only show
/// link state and packet traffic.
pub trait Display {
    /// Link state changed
    fn link_state(&mut self, state: ConnectionState, write_available: bool);

    /// Running packet totals since the last counter reset
    fn packet_counts(&mut self, tx_packets: u32, rx_packets: u32);

    /// An inbound packet was drained
    ///
    /// Use [`cubepad_protocol::hex_dump`] to render the payload.
    fn packet_received(&mut self, packet: &Packet);

    /// A sensor node connected (or reconnected)
    fn node_connected(&mut self, _node: NodeId) {}

    /// A sensor node went away
    fn node_disconnected(&mut self, _node: NodeId) {}

    /// New accelerometer sample with the resulting tilt/shake state
    fn accel_changed(&mut self, _node: NodeId, _accel: Accel, _changed: MotionFlags, _tilt: Tilt) {}

    /// Neighbor side mask of a node changed
    fn neighbors_changed(&mut self, _node: NodeId, _mask: u8) {}
}

/// Display that shows nothing
#[derive(Debug, Default, Clone, Copy)]
pub struct NullDisplay;

impl Display for NullDisplay {
    fn link_state(&mut self, _state: ConnectionState, _write_available: bool) {}

    fn packet_counts(&mut self, _tx_packets: u32, _rx_packets: u32) {}

    fn packet_received(&mut self, _packet: &Packet) {}
}
