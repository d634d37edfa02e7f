//! Link counters
//!
//! The transmit drain owns the `tx_*` fields and the receive drain the
//! `rx_*` fields. Each record call applies one whole packet, so a captured
//! snapshot only ever contains sums of completed packets.

use crate::config::REPORT_INTERVAL_FRAMES;

/// Point-in-time copy of the counters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CounterSnapshot {
    pub tx_packets: u32,
    pub rx_packets: u32,
    pub tx_bytes: u32,
    pub rx_bytes: u32,
    /// Inbound packets dropped because the receive queue was full
    pub rx_dropped: u32,
}

/// Running packet and byte totals
#[derive(Debug, Clone, Default)]
pub struct LinkCounters {
    current: CounterSnapshot,
}

impl LinkCounters {
    pub const fn new() -> Self {
        Self {
            current: CounterSnapshot {
                tx_packets: 0,
                rx_packets: 0,
                tx_bytes: 0,
                rx_bytes: 0,
                rx_dropped: 0,
            },
        }
    }

    /// Zero all counters
    pub fn reset(&mut self) {
        self.current = CounterSnapshot::default();
    }

    pub fn capture(&self) -> CounterSnapshot {
        self.current
    }

    pub fn record_sent(&mut self, bytes: usize) {
        let c = &mut self.current;
        c.tx_packets = c.tx_packets.wrapping_add(1);
        c.tx_bytes = c.tx_bytes.wrapping_add(bytes as u32);
    }

    pub fn record_received(&mut self, bytes: usize) {
        let c = &mut self.current;
        c.rx_packets = c.rx_packets.wrapping_add(1);
        c.rx_bytes = c.rx_bytes.wrapping_add(bytes as u32);
    }

    pub fn record_dropped(&mut self) {
        self.current.rx_dropped = self.current.rx_dropped.wrapping_add(1);
    }
}

/// Emits a snapshot every [`REPORT_INTERVAL_FRAMES`] idle frames
#[derive(Debug, Clone, Default)]
pub struct CounterReporter {
    frames: u32,
}

impl CounterReporter {
    pub const fn new() -> Self {
        Self { frames: 0 }
    }

    /// Count one idle frame; returns a snapshot when a report is due
    pub fn tick(&mut self, counters: &LinkCounters) -> Option<CounterSnapshot> {
        self.frames += 1;
        if self.frames < REPORT_INTERVAL_FRAMES {
            return None;
        }

        self.frames = 0;
        let snapshot = counters.capture();
        info!(
            "link: tx {} pkts / {} B, rx {} pkts / {} B, {} dropped",
            snapshot.tx_packets,
            snapshot.tx_bytes,
            snapshot.rx_packets,
            snapshot.rx_bytes,
            snapshot.rx_dropped
        );
        Some(snapshot)
    }
}
