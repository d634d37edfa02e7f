//! Axis dead-zone offset transform
//!
//! Practical tilt rarely saturates the accelerometer, so small non-zero
//! readings are pushed outward by a fixed offset. Zero and readings at or
//! beyond the threshold pass through untouched.

use serde::{Deserialize, Serialize};

use crate::sensor::{AxisComponent, NodeId, SensorState};

/// Threshold/offset pair for one joystick axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AxisTransform {
    /// Exclusive magnitude bound of the offset zone (must be > 0)
    pub threshold: i8,
    /// Added away from zero inside the zone
    pub offset: i8,
}

impl AxisTransform {
    pub const fn new(threshold: i8, offset: i8) -> Self {
        Self { threshold, offset }
    }

    /// Apply the transform to one raw sample
    ///
    /// The result is not clamped: a threshold/offset pair whose sum exceeds
    /// the i8 range wraps, exactly like the byte store on the device.
    pub fn apply(&self, raw: i8) -> i8 {
        if raw > 0 && raw < self.threshold {
            raw.wrapping_add(self.offset)
        } else if raw < 0 && raw > self.threshold.saturating_neg() {
            raw.wrapping_sub(self.offset)
        } else {
            raw
        }
    }
}

/// Where an axis reads its input from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AxisSource {
    pub node: NodeId,
    pub component: AxisComponent,
}

/// Complete mapping of one joystick axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AxisMap {
    pub source: AxisSource,
    pub transform: AxisTransform,
}

impl AxisMap {
    pub const fn new(node: NodeId, component: AxisComponent, threshold: i8, offset: i8) -> Self {
        Self {
            source: AxisSource { node, component },
            transform: AxisTransform::new(threshold, offset),
        }
    }

    /// Read the source axis and transform it
    pub fn sample(&self, state: &SensorState) -> i8 {
        let raw = state
            .reading(self.source.node)
            .accel()
            .component(self.source.component);
        self.transform.apply(raw)
    }
}
