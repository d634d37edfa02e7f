//! Collaborator traits
//!
//! These traits define the interface between the link logic and the
//! board: the radio transport, the status display and the sensor
//! notification source.

pub mod display;
pub mod sensor;
pub mod transport;

pub use display::{Display, NullDisplay};
pub use sensor::SensorEventSource;
pub use transport::Transport;
