//! Sensor-to-joystick mapping
//!
//! Converts the tracked sensor state into a [`ControlPacket`]:
//! four offset-transformed axes plus a button bitmask.
//!
//! [`ControlPacket`]: cubepad_protocol::ControlPacket

pub mod axis;
pub mod buttons;
pub mod encoder;

pub use axis::{AxisMap, AxisSource, AxisTransform};
pub use buttons::{ButtonMap, TiltButtons, DEFAULT_TRIGGER};
pub use encoder::PacketEncoder;
