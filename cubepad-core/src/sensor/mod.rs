//! Sensor node tracking
//!
//! Keeps the latest accelerometer, touch and neighbor state of every
//! node, updated from discrete events delivered by the radio stack.

pub mod adjacency;
pub mod motion;
pub mod reading;
pub mod tracker;

pub use adjacency::{Adjacency, AdjacencySet, Attachment, MAX_ADJACENCIES};
pub use motion::{MotionFlags, Tilt, TiltShakeRecognizer};
pub use reading::{node_index, Accel, AxisComponent, NodeId, NodeReading, Side};
pub use tracker::SensorState;
