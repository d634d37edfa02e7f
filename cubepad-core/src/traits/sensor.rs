//! Sensor notification source

use crate::link::SensorEvent;

/// Non-blocking source of sensor notifications
///
/// Implemented by the board's cube radio driver. `poll_event` must return
/// immediately; `None` means nothing is pending.
pub trait SensorEventSource {
    fn poll_event(&mut self) -> Option<SensorEvent>;
}
