//! Configuration type definitions
//!
//! Build-time constants for the link plus the runtime mapping
//! configuration, which can be stored as postcard binary data.

use serde::{Deserialize, Serialize};

use crate::mapping::{AxisMap, ButtonMap};
use crate::sensor::{node_index, AxisComponent, NodeId};

/// Number of sensor nodes tracked
pub const NODE_COUNT: usize = 3;

/// Transmit queue depth; kept minimal for latency
pub const SEND_QUEUE_DEPTH: usize = 1;

/// Receive queue depth
pub const RECEIVE_QUEUE_DEPTH: usize = 1;

/// Idle frames between counter reports
pub const REPORT_INTERVAL_FRAMES: u32 = 60;

/// Current stored configuration version
pub const CONFIG_VERSION: u8 = 1;

/// Configuration errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// A mapping refers to a node outside `0..NODE_COUNT`
    NodeOutOfRange(NodeId),
    /// Axis threshold must be positive
    InvalidThreshold,
    /// Axis offset must be non-negative and keep the zone inside the i8 range
    InvalidOffset,
    /// Button trigger must be positive
    InvalidTrigger,
    /// Serialization failed (buffer too small)
    Serialize,
    /// Deserialization failed
    Deserialize,
    /// Stored config version mismatch
    VersionMismatch,
}

/// How the "any neighboring" signal is derived
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum NeighborPolicy {
    /// Single latch: set by any add, cleared by any remove
    #[default]
    Latched,
    /// True while the adjacency pair set is non-empty
    Pairs,
}

/// The four joystick axes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AxisMaps {
    pub x: AxisMap,
    pub y: AxisMap,
    pub z: AxisMap,
    pub rx: AxisMap,
}

impl Default for AxisMaps {
    fn default() -> Self {
        Self {
            x: AxisMap::new(0, AxisComponent::X, 87, 40),
            y: AxisMap::new(0, AxisComponent::Y, 107, 20),
            z: AxisMap::new(0, AxisComponent::Z, 107, 20),
            rx: AxisMap::new(1, AxisComponent::Z, 107, 20),
        }
    }
}

impl AxisMaps {
    pub fn iter(&self) -> impl Iterator<Item = &AxisMap> {
        [&self.x, &self.y, &self.z, &self.rx].into_iter()
    }
}

/// Complete sensor-to-joystick mapping
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MappingConfig {
    pub axes: AxisMaps,
    pub buttons: ButtonMap,
    pub neighbor_policy: NeighborPolicy,
}

impl MappingConfig {
    /// Check node ids and thresholds
    pub fn validate(&self) -> Result<(), ConfigError> {
        for axis in self.axes.iter() {
            check_node(axis.source.node)?;
            if axis.transform.threshold <= 0 {
                return Err(ConfigError::InvalidThreshold);
            }
            check_offset(axis.transform.threshold, axis.transform.offset)?;
        }

        if self.buttons.trigger <= 0 {
            return Err(ConfigError::InvalidTrigger);
        }
        for group in &self.buttons.tilt {
            check_node(group.node)?;
        }

        Ok(())
    }
}

/// The largest in-zone sample, pushed outward, must not wrap
fn check_offset(threshold: i8, offset: i8) -> Result<(), ConfigError> {
    let peak = i16::from(threshold) - 1 + i16::from(offset);
    if offset < 0 || peak > i16::from(i8::MAX) {
        return Err(ConfigError::InvalidOffset);
    }
    Ok(())
}

fn check_node(node: NodeId) -> Result<(), ConfigError> {
    node_index(node)
        .map(|_| ())
        .ok_or(ConfigError::NodeOutOfRange(node))
}
