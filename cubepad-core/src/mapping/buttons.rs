//! Button bitmask mapping
//!
//! Masks are `u16`: the low byte lands in `buttons0`, the high byte in
//! `buttons1`. A mask of zero leaves the signal unmapped. Several signals
//! may share a bit; they are simply OR-ed together.

use serde::{Deserialize, Serialize};

use crate::config::NODE_COUNT;
use crate::sensor::{Accel, NodeId, SensorState};

/// Default trigger threshold for tilt buttons
pub const DEFAULT_TRIGGER: i8 = 30;

/// Buttons driven by tilting one node past the trigger threshold
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TiltButtons {
    pub node: NodeId,
    /// Y above +trigger
    pub down: u16,
    /// Y below -trigger
    pub up: u16,
    /// X above +trigger
    pub right: u16,
    /// X below -trigger
    pub left: u16,
}

impl TiltButtons {
    /// Bits pressed by this sample
    pub fn evaluate(&self, accel: Accel, trigger: i8) -> u16 {
        let mut bits = 0;

        if accel.y > trigger {
            bits |= self.down;
        } else if accel.y < trigger.saturating_neg() {
            bits |= self.up;
        }

        if accel.x > trigger {
            bits |= self.right;
        } else if accel.x < trigger.saturating_neg() {
            bits |= self.left;
        }

        bits
    }
}

/// Full button layout of the control packet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ButtonMap {
    /// Magnitude a tilt must exceed to press a button (must be > 0)
    pub trigger: i8,
    /// Tilt-driven buttons, one block per directional node
    pub tilt: [TiltButtons; 2],
    /// Touch button for each node
    pub touch: [u16; NODE_COUNT],
    /// Pressed while any two nodes are neighboring
    pub neighbor: u16,
}

impl Default for ButtonMap {
    fn default() -> Self {
        Self {
            trigger: DEFAULT_TRIGGER,
            tilt: [
                TiltButtons {
                    node: 1,
                    down: 0x0001,
                    up: 0x0004,
                    right: 0x0002,
                    left: 0x0020,
                },
                TiltButtons {
                    node: 2,
                    down: 0x0008,
                    up: 0,
                    right: 0x0010,
                    left: 0,
                },
            ],
            touch: [0x0001, 0x0040, 0x0080],
            // Shares a bit with node 1 tilting right
            neighbor: 0x0002,
        }
    }
}

impl ButtonMap {
    /// Bits pressed by the current sensor state
    pub fn evaluate(&self, state: &SensorState) -> u16 {
        let mut bits = 0;

        for group in &self.tilt {
            bits |= group.evaluate(state.reading(group.node).accel(), self.trigger);
        }

        if state.neighboring() {
            bits |= self.neighbor;
        }

        for (node, mask) in self.touch.iter().enumerate() {
            if state.reading(node as NodeId).is_touching() {
                bits |= mask;
            }
        }

        bits
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sensor::{Attachment, Side};

    fn state_with(node1: Accel, node2: Accel) -> SensorState {
        let mut state = SensorState::default();
        for node in 0..3 {
            state.on_connect(node);
        }
        state.on_accel_change(1, node1);
        state.on_accel_change(2, node2);
        state
    }

    #[test]
    fn test_node1_down_and_up() {
        let map = ButtonMap::default();
        assert_eq!(map.evaluate(&state_with(Accel::new(0, 31, 0), Accel::default())), 0x01);
        assert_eq!(map.evaluate(&state_with(Accel::new(0, -31, 0), Accel::default())), 0x04);
    }

    #[test]
    fn test_trigger_is_exclusive() {
        let map = ButtonMap::default();
        assert_eq!(map.evaluate(&state_with(Accel::new(30, 30, 0), Accel::new(-30, -30, 0))), 0);
    }

    #[test]
    fn test_node1_left_right() {
        let map = ButtonMap::default();
        assert_eq!(map.evaluate(&state_with(Accel::new(31, 0, 0), Accel::default())), 0x02);
        assert_eq!(map.evaluate(&state_with(Accel::new(-31, 0, 0), Accel::default())), 0x20);
    }

    #[test]
    fn test_node2_unmapped_directions() {
        let map = ButtonMap::default();
        assert_eq!(map.evaluate(&state_with(Accel::default(), Accel::new(31, 31, 0))), 0x18);
        assert_eq!(map.evaluate(&state_with(Accel::default(), Accel::new(-31, -31, 0))), 0);
    }

    #[test]
    fn test_touch_and_tilt_share_bit() {
        let map = ButtonMap::default();
        let mut state = state_with(Accel::new(31, 0, 0), Accel::default());
        state.on_touch_change(0, true);

        assert_eq!(map.evaluate(&state), 0x03);
    }

    #[test]
    fn test_touch_bits() {
        let map = ButtonMap::default();
        let mut state = state_with(Accel::default(), Accel::default());
        state.on_touch_change(1, true);
        state.on_touch_change(2, true);

        assert_eq!(map.evaluate(&state), 0xC0);
    }

    #[test]
    fn test_neighbor_bit_collides_with_right_tilt() {
        let map = ButtonMap::default();
        let mut state = state_with(Accel::default(), Accel::default());
        state.on_neighbor_add(
            Attachment::new(0, Side::Right as u8),
            Attachment::new(2, Side::Left as u8),
        );

        assert_eq!(map.evaluate(&state), 0x02);
    }

    #[test]
    fn test_neighbor_on_distinct_bit() {
        let map = ButtonMap {
            neighbor: 0x0100,
            ..ButtonMap::default()
        };
        let mut state = state_with(Accel::new(31, 0, 0), Accel::default());
        state.on_neighbor_add(
            Attachment::new(0, Side::Right as u8),
            Attachment::new(2, Side::Left as u8),
        );

        assert_eq!(map.evaluate(&state), 0x0102);
    }
}
