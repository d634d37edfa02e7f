//! Sensor state tracker
//!
//! Caches the latest reading of every node from discrete sensor events and
//! exposes it read-only to the packet encoder. Events naming a node outside
//! `0..NODE_COUNT` are dropped; they are never an error.

use crate::config::{NeighborPolicy, NODE_COUNT};

use super::adjacency::{Adjacency, AdjacencySet, Attachment};
use super::motion::{MotionFlags, TiltShakeRecognizer};
use super::reading::{node_index, Accel, NodeId, NodeReading, Side};

/// Latest known state of all sensor nodes
#[derive(Debug, Clone)]
pub struct SensorState {
    nodes: [NodeReading; NODE_COUNT],
    motion: [TiltShakeRecognizer; NODE_COUNT],
    adjacency: AdjacencySet,
    /// Set by any neighbor-add, cleared by any neighbor-remove
    neighbor_latch: bool,
    policy: NeighborPolicy,
}

impl Default for SensorState {
    fn default() -> Self {
        Self::new(NeighborPolicy::default())
    }
}

impl SensorState {
    /// Create a tracker with no nodes connected
    pub fn new(policy: NeighborPolicy) -> Self {
        Self {
            nodes: [NodeReading::default(); NODE_COUNT],
            motion: core::array::from_fn(|_| TiltShakeRecognizer::new()),
            adjacency: AdjacencySet::new(),
            neighbor_latch: false,
            policy,
        }
    }

    /// Policy used by [`Self::neighboring`]
    pub fn policy(&self) -> NeighborPolicy {
        self.policy
    }

    pub fn set_policy(&mut self, policy: NeighborPolicy) {
        self.policy = policy;
    }

    /// Reading for a node, or `None` if the id is out of range
    pub fn node(&self, node: NodeId) -> Option<&NodeReading> {
        node_index(node).map(|i| &self.nodes[i])
    }

    /// Reading for a node, falling back to a blank reading when out of range
    pub fn reading(&self, node: NodeId) -> NodeReading {
        self.node(node).copied().unwrap_or_default()
    }

    /// Tilt/shake recognizer of a node
    pub fn motion(&self, node: NodeId) -> Option<&TiltShakeRecognizer> {
        node_index(node).map(|i| &self.motion[i])
    }

    /// Ids of nodes currently connected
    pub fn connected_nodes(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes
            .iter()
            .enumerate()
            .filter(|(_, reading)| reading.is_connected())
            .map(|(i, _)| i as NodeId)
    }

    /// Current adjacency pairs
    pub fn adjacency(&self) -> &AdjacencySet {
        &self.adjacency
    }

    /// Raw any-neighboring latch
    ///
    /// Not per pair: a remove event for any pair clears it even while other
    /// pairs are still adjacent.
    pub fn neighbor_latch(&self) -> bool {
        self.neighbor_latch
    }

    /// Whether any two nodes are neighboring, according to the policy
    pub fn neighboring(&self) -> bool {
        match self.policy {
            NeighborPolicy::Latched => self.neighbor_latch,
            NeighborPolicy::Pairs => self.adjacency.any(),
        }
    }

    /// Node connected (or reconnected)
    ///
    /// Resets the reading to defaults and drops the node's pairs. Safe to
    /// call repeatedly.
    pub fn on_connect(&mut self, node: NodeId) -> bool {
        let Some(index) = node_index(node) else {
            trace!("connect for unknown node {}", node);
            return false;
        };

        self.nodes[index] = NodeReading::connected();
        self.motion[index].reset();
        self.adjacency.remove_node(node);
        true
    }

    /// Node went away: reading is discarded and its pairs dropped
    pub fn on_disconnect(&mut self, node: NodeId) -> bool {
        let Some(index) = node_index(node) else {
            trace!("disconnect for unknown node {}", node);
            return false;
        };

        self.nodes[index] = NodeReading::default();
        self.motion[index].reset();
        self.adjacency.remove_node(node);
        true
    }

    /// New accelerometer sample
    ///
    /// Returns the tilt/shake change flags, or `None` if the id is out of range.
    pub fn on_accel_change(&mut self, node: NodeId, accel: Accel) -> Option<MotionFlags> {
        let Some(index) = node_index(node) else {
            trace!("accel change for unknown node {}", node);
            return None;
        };

        self.nodes[index].set_accel(accel);
        Some(self.motion[index].update(accel))
    }

    /// Touch contact changed
    pub fn on_touch_change(&mut self, node: NodeId, touching: bool) -> bool {
        let Some(index) = node_index(node) else {
            trace!("touch change for unknown node {}", node);
            return false;
        };

        self.nodes[index].set_touching(touching);
        true
    }

    /// Two sides became adjacent
    pub fn on_neighbor_add(&mut self, first: Attachment, second: Attachment) {
        self.neighbor_latch = true;

        for end in [first, second] {
            if let Some(index) = node_index(end.node) {
                self.nodes[index].neighbor_added(Side::from_raw(end.side));
            }
        }

        if let Err(pair) = self.adjacency.insert(Adjacency::new(first, second)) {
            warn!("adjacency set full, dropping {}", pair);
        }
    }

    /// Two sides stopped being adjacent
    pub fn on_neighbor_remove(&mut self, first: Attachment, second: Attachment) {
        self.neighbor_latch = false;

        for end in [first, second] {
            if let Some(index) = node_index(end.node) {
                self.nodes[index].neighbor_removed(Side::from_raw(end.side));
            }
        }

        self.adjacency.remove(Adjacency::new(first, second));
    }
}
