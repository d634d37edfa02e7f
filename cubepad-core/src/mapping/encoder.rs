//! Packet encoder
//!
//! Pure transform from [`SensorState`] to one control report. Each call
//! starts from a zeroed report; nothing carries over between packets.

use cubepad_protocol::{ControlPacket, Packet};

use crate::config::MappingConfig;
use crate::sensor::SensorState;

/// Builds control packets from sensor state
#[derive(Debug, Clone, Default)]
pub struct PacketEncoder {
    config: MappingConfig,
}

impl PacketEncoder {
    pub fn new(config: MappingConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &MappingConfig {
        &self.config
    }

    /// Build a report from the current state
    pub fn encode(&self, state: &SensorState) -> ControlPacket {
        let axes = &self.config.axes;
        let mut report = ControlPacket::zeroed();

        report.axis_x = axes.x.sample(state);
        report.axis_y = axes.y.sample(state);
        report.axis_z = axes.z.sample(state);
        report.axis_rx = axes.rx.sample(state);
        report.press(self.config.buttons.evaluate(state));

        report
    }

    /// Build a report straight into a reserved radio packet
    pub fn encode_into(&self, state: &SensorState, packet: &mut Packet) -> ControlPacket {
        let report = self.encode(state);
        report.write_to(packet);
        report
    }
}
