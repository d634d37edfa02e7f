//! Adjacency pair set
//!
//! Tracks which node sides are currently touching, as unordered pairs.
//! Partner ids outside the tracked node range are kept too: a cube can
//! neighbor a base or another player's cube.

use heapless::Vec;

use super::reading::NodeId;

/// Maximum simultaneously tracked pairs
pub const MAX_ADJACENCIES: usize = 16;

/// One side of one node
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Attachment {
    pub node: NodeId,
    /// Raw side number (see [`super::Side`])
    pub side: u8,
}

impl Attachment {
    pub const fn new(node: NodeId, side: u8) -> Self {
        Self { node, side }
    }
}

/// Unordered pair of attachments
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Adjacency {
    low: Attachment,
    high: Attachment,
}

impl Adjacency {
    /// Build a pair; argument order does not matter
    pub fn new(first: Attachment, second: Attachment) -> Self {
        if first <= second {
            Self {
                low: first,
                high: second,
            }
        } else {
            Self {
                low: second,
                high: first,
            }
        }
    }

    /// Both attachments, lowest first
    pub fn attachments(&self) -> (Attachment, Attachment) {
        (self.low, self.high)
    }

    /// Check if either end belongs to `node`
    pub fn involves(&self, node: NodeId) -> bool {
        self.low.node == node || self.high.node == node
    }

    /// Check if this pair joins the two nodes (in either order)
    pub fn joins(&self, a: NodeId, b: NodeId) -> bool {
        (self.low.node == a && self.high.node == b) || (self.low.node == b && self.high.node == a)
    }
}

/// Set of currently adjacent pairs
#[derive(Debug, Clone, Default)]
pub struct AdjacencySet {
    pairs: Vec<Adjacency, MAX_ADJACENCIES>,
}

impl AdjacencySet {
    pub const fn new() -> Self {
        Self { pairs: Vec::new() }
    }

    /// Insert a pair
    ///
    /// Returns `Ok(true)` if inserted, `Ok(false)` if already present, or
    /// `Err` with the pair if the set is full.
    pub fn insert(&mut self, pair: Adjacency) -> Result<bool, Adjacency> {
        if self.pairs.contains(&pair) {
            return Ok(false);
        }
        self.pairs.push(pair)?;
        Ok(true)
    }

    /// Remove a pair, returning whether it was present
    pub fn remove(&mut self, pair: Adjacency) -> bool {
        match self.pairs.iter().position(|p| *p == pair) {
            Some(index) => {
                self.pairs.swap_remove(index);
                true
            }
            None => false,
        }
    }

    /// Drop every pair that involves `node`
    pub fn remove_node(&mut self, node: NodeId) -> usize {
        let before = self.pairs.len();
        self.pairs.retain(|p| !p.involves(node));
        before - self.pairs.len()
    }

    /// Check if any pair exists
    pub fn any(&self) -> bool {
        !self.pairs.is_empty()
    }

    /// Check if `node` has at least one neighbor
    pub fn has_neighbor(&self, node: NodeId) -> bool {
        self.pairs.iter().any(|p| p.involves(node))
    }

    /// Check if two nodes are adjacent on any sides
    pub fn is_adjacent(&self, a: NodeId, b: NodeId) -> bool {
        self.pairs.iter().any(|p| p.joins(a, b))
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Adjacency> {
        self.pairs.iter()
    }

    pub fn clear(&mut self) {
        self.pairs.clear();
    }
}
