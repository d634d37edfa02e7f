//! Control-link endpoint
//!
//! Owns the sensor tracker, the packet encoder, the radio pipe and the
//! link counters, and reacts to [`LinkEvent`]s one at a time. Every
//! handler runs to completion and never blocks; flow control comes from
//! the send queue refusing reservations, not from waiting.

use cubepad_protocol::Packet;
use embassy_sync::blocking_mutex::raw::RawMutex;

use crate::config::{MappingConfig, RECEIVE_QUEUE_DEPTH, SEND_QUEUE_DEPTH};
use crate::mapping::PacketEncoder;
use crate::sensor::{Attachment, NodeId, SensorState};
use crate::traits::{Display, SensorEventSource, Transport};

use super::counters::{CounterReporter, CounterSnapshot, LinkCounters};
use super::dispatch::{EventKind, Subscriptions};
use super::events::{LinkEvent, SensorEvent};
use super::lifecycle::{ConnectionLifecycle, ConnectionState};
use super::pipe::Pipe;
use super::queue::EventQueue;

/// Start-up failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StartError {
    /// Radio has not been brought up
    TransportUnavailable,
}

/// One end of the control link
pub struct Endpoint<
    T: Transport,
    D: Display,
    const TX: usize = SEND_QUEUE_DEPTH,
    const RX: usize = RECEIVE_QUEUE_DEPTH,
> {
    transport: T,
    display: D,
    encoder: PacketEncoder,
    sensors: SensorState,
    pipe: Pipe<TX, RX>,
    lifecycle: ConnectionLifecycle,
    subscriptions: Subscriptions,
    counters: LinkCounters,
    reporter: CounterReporter,
}

impl<T: Transport, D: Display, const TX: usize, const RX: usize> Endpoint<T, D, TX, RX> {
    /// Create an idle endpoint; nothing is subscribed until [`Self::start`]
    pub fn new(config: MappingConfig, transport: T, display: D) -> Self {
        Self {
            transport,
            display,
            encoder: PacketEncoder::new(config),
            sensors: SensorState::new(config.neighbor_policy),
            pipe: Pipe::new(),
            lifecycle: ConnectionLifecycle::new(),
            subscriptions: Subscriptions::new(),
            counters: LinkCounters::new(),
            reporter: CounterReporter::new(),
        }
    }

    /// Bring the link up
    ///
    /// Attaches the pipe (discarding anything queued), resets the
    /// counters, subscribes the link handlers and applies the current
    /// transport state. `connected_nodes` are the sensor nodes already
    /// connected at this point; they are replayed as connect events.
    pub fn start(
        &mut self,
        connected_nodes: impl IntoIterator<Item = NodeId>,
    ) -> Result<(), StartError> {
        if !self.transport.is_available() {
            warn!("transport not available, link not started");
            return Err(StartError::TransportUnavailable);
        }

        // Queues must be empty before the first subscription
        self.pipe.attach();
        self.subscriptions.clear();
        self.lifecycle.reset();
        self.counters.reset();
        self.show_counts();

        self.subscriptions.subscribe(EventKind::Connect);
        self.subscriptions.subscribe(EventKind::Disconnect);
        if self.transport.is_connected() {
            self.on_connect();
        } else {
            self.on_disconnect();
        }

        self.subscriptions.subscribe(EventKind::ReadAvailable);
        for kind in EventKind::SENSOR {
            self.subscriptions.subscribe(kind);
        }

        for node in connected_nodes {
            self.on_sensor(SensorEvent::NodeConnect(node));
        }

        info!("link started");
        Ok(())
    }

    /// Dispatch one event
    ///
    /// Returns false if its kind is not subscribed and it was ignored.
    pub fn handle(&mut self, event: LinkEvent) -> bool {
        if !self.subscriptions.is_subscribed(event.kind()) {
            trace!("ignoring unsubscribed {}", event);
            return false;
        }

        match event {
            LinkEvent::Connect => self.on_connect(),
            LinkEvent::Disconnect => self.on_disconnect(),
            LinkEvent::ReadAvailable => self.drain_receive(),
            LinkEvent::WriteAvailable => self.drain_send(),
            LinkEvent::Sensor(event) => self.on_sensor(event),
        }
        true
    }

    /// Dispatch everything currently queued; returns the number of events
    pub fn dispatch_pending<M: RawMutex, const N: usize>(
        &mut self,
        queue: &EventQueue<M, N>,
    ) -> usize {
        let mut count = 0;
        while let Some(event) = queue.try_next() {
            self.handle(event);
            count += 1;
        }
        count
    }

    /// Dispatch every pending sensor notification of `source`
    pub fn pump_sensors<S: SensorEventSource>(&mut self, source: &mut S) -> usize {
        let mut count = 0;
        while let Some(event) = source.poll_event() {
            self.handle(LinkEvent::Sensor(event));
            count += 1;
        }
        count
    }

    /// Wait for and dispatch the next queued event
    pub async fn step<M: RawMutex, const N: usize>(&mut self, queue: &EventQueue<M, N>) -> bool {
        let event = queue.next().await;
        self.handle(event)
    }

    /// Dispatch queued events forever
    pub async fn run<M: RawMutex, const N: usize>(&mut self, queue: &EventQueue<M, N>) -> ! {
        loop {
            self.step(queue).await;
        }
    }

    /// One frame of the host idle loop
    ///
    /// Returns a counter snapshot every `REPORT_INTERVAL_FRAMES` frames.
    pub fn idle_frame(&mut self) -> Option<CounterSnapshot> {
        self.reporter.tick(&self.counters)
    }

    /// Transport side: hand over an inbound packet
    ///
    /// A full receive queue drops the packet and counts it. Returns
    /// whether the packet was queued; the caller then posts
    /// [`LinkEvent::ReadAvailable`].
    pub fn deliver(&mut self, packet: Packet) -> bool {
        match self.pipe.receive_mut().deliver(packet) {
            Ok(()) => true,
            Err(packet) => {
                warn!("receive queue full, dropped {} byte packet", packet.size());
                self.counters.record_dropped();
                false
            }
        }
    }

    /// Transport side: take the oldest committed packet for the air
    pub fn take_committed(&mut self) -> Option<Packet> {
        self.pipe.send_mut().take_committed()
    }

    /// Zero the link counters and refresh the display
    pub fn reset_counters(&mut self) {
        self.counters.reset();
        self.show_counts();
    }

    /// Swap the mapping; takes effect with the next packet
    pub fn set_mapping(&mut self, config: MappingConfig) {
        self.encoder = PacketEncoder::new(config);
        self.sensors.set_policy(config.neighbor_policy);
    }

    pub fn state(&self) -> ConnectionState {
        self.lifecycle.state()
    }

    pub fn counters(&self) -> CounterSnapshot {
        self.counters.capture()
    }

    pub fn sensors(&self) -> &SensorState {
        &self.sensors
    }

    pub fn mapping(&self) -> &MappingConfig {
        self.encoder.config()
    }

    pub fn subscriptions(&self) -> Subscriptions {
        self.subscriptions
    }

    pub fn pipe(&self) -> &Pipe<TX, RX> {
        &self.pipe
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    pub fn display(&self) -> &D {
        &self.display
    }

    pub fn display_mut(&mut self) -> &mut D {
        &mut self.display
    }

    fn on_connect(&mut self) {
        let state = self
            .lifecycle
            .on_connect(self.transport.is_connected(), &mut self.subscriptions);
        info!("link connected");
        self.display
            .link_state(state, self.pipe.send().write_available());

        // Don't wait for a first write-available notification
        self.drain_send();
    }

    fn on_disconnect(&mut self) {
        let state = self
            .lifecycle
            .on_disconnect(self.transport.is_connected(), &mut self.subscriptions);
        info!("link disconnected");
        self.display
            .link_state(state, self.pipe.send().write_available());
    }

    /// Encode and commit packets while the send queue has room
    fn drain_send(&mut self) {
        while self.lifecycle.is_connected()
            && self.transport.is_connected()
            && self.pipe.send().write_available()
        {
            let packet = self.pipe.send_mut().reserve();
            self.encoder.encode_into(&self.sensors, packet);
            trace!(
                "sent packet: {} bytes, type {}, {=[u8]:x}",
                packet.size(),
                packet.packet_type(),
                packet.bytes()
            );

            let size = packet.size();
            self.pipe.send_mut().commit();
            self.counters.record_sent(size);
        }

        self.show_counts();
    }

    /// Consume every queued inbound packet
    fn drain_receive(&mut self) {
        while let Some(packet) = self.pipe.receive_mut().read() {
            debug!(
                "received packet: {} bytes, type {}, {=[u8]:x}",
                packet.size(),
                packet.packet_type(),
                packet.bytes()
            );
            self.counters.record_received(packet.size());
            self.display.packet_received(&packet);
        }

        self.show_counts();
    }

    fn on_sensor(&mut self, event: SensorEvent) {
        match event {
            SensorEvent::NodeConnect(node) => {
                if self.sensors.on_connect(node) {
                    info!("node {} connected", node);
                    self.display.node_connected(node);
                }
            }
            SensorEvent::NodeDisconnect(node) => {
                if self.sensors.on_disconnect(node) {
                    info!("node {} disconnected", node);
                    self.display.node_disconnected(node);
                }
            }
            SensorEvent::AccelChange { node, accel } => {
                let Some(changed) = self.sensors.on_accel_change(node, accel) else {
                    return;
                };
                let tilt = self
                    .sensors
                    .motion(node)
                    .map(|motion| motion.tilt())
                    .unwrap_or_default();

                if !changed.is_empty() {
                    debug!("node {} motion {}, tilt {}", node, changed, tilt);
                }
                self.display.accel_changed(node, accel, changed, tilt);
            }
            SensorEvent::TouchChange { node, touching } => {
                self.sensors.on_touch_change(node, touching);
            }
            SensorEvent::NeighborAdd { first, second } => {
                info!("neighbor add: {} - {}", first, second);
                self.sensors.on_neighbor_add(first, second);
                self.show_neighbors(first, second);
            }
            SensorEvent::NeighborRemove { first, second } => {
                info!("neighbor remove: {} - {}", first, second);
                self.sensors.on_neighbor_remove(first, second);
                self.show_neighbors(first, second);
            }
        }
    }

    fn show_neighbors(&mut self, first: Attachment, second: Attachment) {
        for end in [first, second] {
            if let Some(reading) = self.sensors.node(end.node) {
                self.display
                    .neighbors_changed(end.node, reading.neighbor_mask());
            }
        }
    }

    fn show_counts(&mut self) {
        let snapshot = self.counters.capture();
        self.display
            .packet_counts(snapshot.tx_packets, snapshot.rx_packets);
    }
}
