//! Per-node sensor readings

use serde::{Deserialize, Serialize};

use crate::config::NODE_COUNT;

/// Raw node identifier as reported by the radio stack
///
/// Valid ids are `0..NODE_COUNT`; anything else is ignored by the tracker.
pub type NodeId = u8;

/// Map a raw node id to an array index, if it is in range
pub fn node_index(node: NodeId) -> Option<usize> {
    let index = usize::from(node);
    (index < NODE_COUNT).then_some(index)
}

/// Accelerometer axis selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AxisComponent {
    X,
    Y,
    Z,
}

/// Accelerometer sample in device-native units (roughly ±127)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Accel {
    pub x: i8,
    pub y: i8,
    pub z: i8,
}

impl Accel {
    pub const fn new(x: i8, y: i8, z: i8) -> Self {
        Self { x, y, z }
    }

    /// Read one axis
    pub fn component(&self, component: AxisComponent) -> i8 {
        match component {
            AxisComponent::X => self.x,
            AxisComponent::Y => self.y,
            AxisComponent::Z => self.z,
        }
    }
}

/// Cube side, in radio stack numbering
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Side {
    Top = 0,
    Left = 1,
    Bottom = 2,
    Right = 3,
}

impl Side {
    pub const ALL: [Side; 4] = [Side::Top, Side::Left, Side::Bottom, Side::Right];

    /// Parse a raw side number
    pub fn from_raw(raw: u8) -> Option<Self> {
        match raw {
            0 => Some(Side::Top),
            1 => Some(Side::Left),
            2 => Some(Side::Bottom),
            3 => Some(Side::Right),
            _ => None,
        }
    }

    /// Bit for this side in a neighbor mask
    pub fn mask(self) -> u8 {
        1 << self as u8
    }
}

/// Last known state of one sensor node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct NodeReading {
    connected: bool,
    accel: Accel,
    touching: bool,
    neighbor_mask: u8,
    neighbor_adds: u32,
    neighbor_removes: u32,
}

impl NodeReading {
    /// Fresh reading for a node that just connected
    pub(crate) fn connected() -> Self {
        Self {
            connected: true,
            ..Self::default()
        }
    }

    pub fn is_connected(&self) -> bool {
        self.connected
    }

    pub fn accel(&self) -> Accel {
        self.accel
    }

    pub fn is_touching(&self) -> bool {
        self.touching
    }

    /// Sides currently adjacent to another node, one bit per [`Side`]
    pub fn neighbor_mask(&self) -> u8 {
        self.neighbor_mask
    }

    /// Check a single side
    pub fn has_neighbor_at(&self, side: Side) -> bool {
        self.neighbor_mask & side.mask() != 0
    }

    /// Neighbor-add events seen since the node connected
    pub fn neighbor_adds(&self) -> u32 {
        self.neighbor_adds
    }

    /// Neighbor-remove events seen since the node connected
    pub fn neighbor_removes(&self) -> u32 {
        self.neighbor_removes
    }

    pub(crate) fn set_accel(&mut self, accel: Accel) {
        self.accel = accel;
    }

    pub(crate) fn set_touching(&mut self, touching: bool) {
        self.touching = touching;
    }

    pub(crate) fn neighbor_added(&mut self, side: Option<Side>) {
        self.neighbor_adds = self.neighbor_adds.wrapping_add(1);
        if let Some(side) = side {
            self.neighbor_mask |= side.mask();
        }
    }

    pub(crate) fn neighbor_removed(&mut self, side: Option<Side>) {
        self.neighbor_removes = self.neighbor_removes.wrapping_add(1);
        if let Some(side) = side {
            self.neighbor_mask &= !side.mask();
        }
    }
}
