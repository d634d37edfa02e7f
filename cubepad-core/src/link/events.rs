//! Events delivered to the endpoint

use crate::sensor::{Accel, Attachment, NodeId};

use super::dispatch::EventKind;

/// Notification from a sensor node
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SensorEvent {
    /// Node connected or reconnected
    NodeConnect(NodeId),
    /// Node went away
    NodeDisconnect(NodeId),
    /// New accelerometer sample
    AccelChange { node: NodeId, accel: Accel },
    /// Touch contact changed
    TouchChange { node: NodeId, touching: bool },
    /// Two sides became adjacent
    NeighborAdd {
        first: Attachment,
        second: Attachment,
    },
    /// Two sides stopped being adjacent
    NeighborRemove {
        first: Attachment,
        second: Attachment,
    },
}

/// Everything the endpoint reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LinkEvent {
    // Radio link events
    /// Transport reports the link to the peer is up
    Connect,
    /// Transport reports the link to the peer is down
    Disconnect,
    /// Receive queue has at least one packet
    ReadAvailable,
    /// Send queue has room for at least one packet
    WriteAvailable,

    // Sensor events
    Sensor(SensorEvent),
}

impl SensorEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            SensorEvent::NodeConnect(_) => EventKind::NodeConnect,
            SensorEvent::NodeDisconnect(_) => EventKind::NodeDisconnect,
            SensorEvent::AccelChange { .. } => EventKind::AccelChange,
            SensorEvent::TouchChange { .. } => EventKind::TouchChange,
            SensorEvent::NeighborAdd { .. } => EventKind::NeighborAdd,
            SensorEvent::NeighborRemove { .. } => EventKind::NeighborRemove,
        }
    }
}

impl LinkEvent {
    /// Dispatch key of this event
    pub fn kind(&self) -> EventKind {
        match self {
            LinkEvent::Connect => EventKind::Connect,
            LinkEvent::Disconnect => EventKind::Disconnect,
            LinkEvent::ReadAvailable => EventKind::ReadAvailable,
            LinkEvent::WriteAvailable => EventKind::WriteAvailable,
            LinkEvent::Sensor(event) => event.kind(),
        }
    }
}

impl From<SensorEvent> for LinkEvent {
    fn from(event: SensorEvent) -> Self {
        LinkEvent::Sensor(event)
    }
}
