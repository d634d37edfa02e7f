//! Endpoint integration tests
//!
//! Drive the endpoint with a scripted transport, a recording display and
//! a scripted sensor source.

use std::collections::VecDeque;

use cubepad_core::config::MappingConfig;
use cubepad_core::link::{
    ConnectionState, Endpoint, EventKind, EventQueue, LinkEvent, SensorEvent, StartError,
};
use cubepad_core::sensor::{Accel, Attachment, MotionFlags, NodeId, Side, Tilt};
use cubepad_core::traits::{Display, SensorEventSource, Transport};
use cubepad_protocol::{ControlPacket, Packet, MAX_PACKET_PAYLOAD};
use embassy_sync::blocking_mutex::raw::NoopRawMutex;

#[derive(Default)]
struct MockTransport {
    up: bool,
    unavailable: bool,
}

impl Transport for MockTransport {
    fn is_connected(&self) -> bool {
        self.up
    }

    fn is_available(&self) -> bool {
        !self.unavailable
    }
}

#[derive(Default)]
struct RecordingDisplay {
    link: Vec<(ConnectionState, bool)>,
    counts: Vec<(u32, u32)>,
    received: Vec<Packet>,
    nodes: Vec<NodeId>,
    accel: Vec<(NodeId, MotionFlags, Tilt)>,
    neighbors: Vec<(NodeId, u8)>,
}

impl Display for RecordingDisplay {
    fn link_state(&mut self, state: ConnectionState, write_available: bool) {
        self.link.push((state, write_available));
    }

    fn packet_counts(&mut self, tx_packets: u32, rx_packets: u32) {
        self.counts.push((tx_packets, rx_packets));
    }

    fn packet_received(&mut self, packet: &Packet) {
        self.received.push(packet.clone());
    }

    fn node_connected(&mut self, node: NodeId) {
        self.nodes.push(node);
    }

    fn accel_changed(&mut self, node: NodeId, _accel: Accel, changed: MotionFlags, tilt: Tilt) {
        self.accel.push((node, changed, tilt));
    }

    fn neighbors_changed(&mut self, node: NodeId, mask: u8) {
        self.neighbors.push((node, mask));
    }
}

struct ScriptedSource(VecDeque<SensorEvent>);

impl SensorEventSource for ScriptedSource {
    fn poll_event(&mut self) -> Option<SensorEvent> {
        self.0.pop_front()
    }
}

type TestEndpoint = Endpoint<MockTransport, RecordingDisplay>;

fn endpoint(up: bool) -> TestEndpoint {
    Endpoint::new(
        MappingConfig::default(),
        MockTransport {
            up,
            unavailable: false,
        },
        RecordingDisplay::default(),
    )
}

fn accel(node: NodeId, x: i8, y: i8, z: i8) -> SensorEvent {
    SensorEvent::AccelChange {
        node,
        accel: Accel::new(x, y, z),
    }
}

#[test]
fn test_start_while_connected_sends_immediately() {
    let mut ep = endpoint(true);
    ep.start([]).unwrap();

    assert_eq!(ep.state(), ConnectionState::Connected);
    assert_eq!(ep.counters().tx_packets, 1);
    assert!(ep.subscriptions().is_subscribed(EventKind::WriteAvailable));
    assert!(ep.subscriptions().is_subscribed(EventKind::ReadAvailable));

    // Depth 1: the committed packet blocks further reservations
    assert!(!ep.pipe().send().write_available());
    assert!(ep.handle(LinkEvent::WriteAvailable));
    assert_eq!(ep.counters().tx_packets, 1);
}

#[test]
fn test_start_while_disconnected() {
    let mut ep = endpoint(false);
    ep.start([]).unwrap();

    assert_eq!(ep.state(), ConnectionState::Disconnected);
    assert_eq!(ep.counters().tx_packets, 0);
    assert!(!ep.subscriptions().is_subscribed(EventKind::WriteAvailable));
    assert!(ep.subscriptions().is_subscribed(EventKind::ReadAvailable));
    assert_eq!(
        ep.display().link.last(),
        Some(&(ConnectionState::Disconnected, true))
    );
}

#[test]
fn test_start_refused_without_transport() {
    let mut ep: TestEndpoint = Endpoint::new(
        MappingConfig::default(),
        MockTransport {
            up: false,
            unavailable: true,
        },
        RecordingDisplay::default(),
    );

    assert_eq!(ep.start([]), Err(StartError::TransportUnavailable));
    assert!(!ep.handle(LinkEvent::Connect));
}

#[test]
fn test_events_ignored_before_start() {
    let mut ep = endpoint(true);
    assert!(!ep.handle(LinkEvent::Sensor(accel(0, 50, 50, 50))));
    assert!(!ep.handle(LinkEvent::WriteAvailable));
    assert_eq!(ep.counters().tx_packets, 0);
}

#[test]
fn test_connect_disconnect_cycle() {
    let mut ep = endpoint(false);
    ep.start([]).unwrap();

    ep.transport_mut().up = true;
    assert!(ep.handle(LinkEvent::Connect));
    assert_eq!(ep.state(), ConnectionState::Connected);
    assert!(ep.subscriptions().is_subscribed(EventKind::WriteAvailable));
    assert_eq!(ep.counters().tx_packets, 1);

    ep.transport_mut().up = false;
    assert!(ep.handle(LinkEvent::Disconnect));
    assert_eq!(ep.state(), ConnectionState::Disconnected);
    assert!(!ep.subscriptions().is_subscribed(EventKind::WriteAvailable));

    // Write-available is no longer dispatched
    ep.take_committed();
    assert!(!ep.handle(LinkEvent::WriteAvailable));
    assert_eq!(ep.counters().tx_packets, 1);
}

#[test]
fn test_duplicate_connect_is_harmless() {
    let mut ep = endpoint(true);
    ep.start([]).unwrap();
    let before = ep.subscriptions();

    assert!(ep.handle(LinkEvent::Connect));
    assert_eq!(ep.subscriptions(), before);
    assert_eq!(ep.state(), ConnectionState::Connected);
    // Queue still full, so nothing more was sent
    assert_eq!(ep.counters().tx_packets, 1);
}

#[test]
#[should_panic(expected = "transport is down")]
fn test_connect_with_transport_down_panics() {
    let mut ep = endpoint(false);
    ep.start([]).unwrap();
    ep.handle(LinkEvent::Connect);
}

#[test]
fn test_write_available_paces_transmission() {
    let mut ep = endpoint(true);
    ep.start([]).unwrap();

    for sent in 2..=5 {
        let packet = ep.take_committed().unwrap();
        assert_eq!(packet.size(), MAX_PACKET_PAYLOAD);
        assert!(ep.handle(LinkEvent::WriteAvailable));
        assert_eq!(ep.counters().tx_packets, sent);
    }

    let snapshot = ep.counters();
    assert_eq!(snapshot.tx_bytes, 5 * MAX_PACKET_PAYLOAD as u32);
}

#[test]
fn test_deeper_queue_fills_in_one_drain() {
    let mut ep: Endpoint<MockTransport, RecordingDisplay, 4, 1> = Endpoint::new(
        MappingConfig::default(),
        MockTransport {
            up: true,
            unavailable: false,
        },
        RecordingDisplay::default(),
    );
    ep.start([]).unwrap();

    assert_eq!(ep.counters().tx_packets, 4);
    assert!(!ep.pipe().send().write_available());

    ep.take_committed().unwrap();
    assert!(ep.pipe().send().write_available());
    ep.handle(LinkEvent::WriteAvailable);
    assert_eq!(ep.counters().tx_packets, 5);
}

#[test]
fn test_end_to_end_packet() {
    let mut ep = endpoint(true);
    ep.start([0, 1, 2]).unwrap();
    assert_eq!(ep.display().nodes, vec![0, 1, 2]);

    let mut source = ScriptedSource(VecDeque::from([
        accel(0, 50, 50, 50),
        accel(1, 0, 35, 0),
        accel(2, 0, 0, 0),
    ]));
    assert_eq!(ep.pump_sensors(&mut source), 3);

    // Drop the packet committed at start-up, then send a fresh one
    ep.take_committed().unwrap();
    ep.handle(LinkEvent::WriteAvailable);

    let packet = ep.take_committed().unwrap();
    let report = ControlPacket::from_packet(&packet).unwrap();
    assert_eq!(report.axis_x, 90);
    assert_eq!(report.axis_y, 70);
    assert_eq!(report.axis_z, 70);
    assert_eq!(report.axis_rx, 0);
    assert_eq!(report.buttons0, 0x01);
    assert_eq!(report.buttons1, 0x00);
    assert!(packet.bytes()[6..].iter().all(|&b| b == 0));
}

#[test]
fn test_receive_drain_counts_every_packet() {
    let mut ep: Endpoint<MockTransport, RecordingDisplay, 1, 4> = Endpoint::new(
        MappingConfig::default(),
        MockTransport::default(),
        RecordingDisplay::default(),
    );
    ep.start([]).unwrap();
    ep.reset_counters();

    for size in [1usize, 7, 19] {
        let packet = Packet::new(3, &[0xAB; 19][..size]).unwrap();
        assert!(ep.deliver(packet));
    }
    assert!(ep.handle(LinkEvent::ReadAvailable));

    let snapshot = ep.counters();
    assert_eq!(snapshot.rx_packets, 3);
    assert_eq!(snapshot.rx_bytes, 27);
    assert_eq!(ep.display().received.len(), 3);
    assert_eq!(ep.display().received[2].packet_type(), 3);
    assert_eq!(ep.display().counts.last(), Some(&(0, 3)));
    assert!(!ep.pipe().receive().read_available());
}

#[test]
fn test_full_receive_queue_drops() {
    let mut ep = endpoint(false);
    ep.start([]).unwrap();

    assert!(ep.deliver(Packet::new(0, &[1]).unwrap()));
    assert!(!ep.deliver(Packet::new(0, &[2]).unwrap()));
    assert_eq!(ep.counters().rx_dropped, 1);

    ep.handle(LinkEvent::ReadAvailable);
    assert_eq!(ep.display().received, vec![Packet::new(0, &[1]).unwrap()]);
}

#[test]
fn test_receive_drains_while_disconnected() {
    let mut ep = endpoint(true);
    ep.start([]).unwrap();
    ep.transport_mut().up = false;
    ep.handle(LinkEvent::Disconnect);

    ep.deliver(Packet::new(0, &[1, 2]).unwrap());
    assert!(ep.handle(LinkEvent::ReadAvailable));
    assert_eq!(ep.counters().rx_packets, 1);
}

#[test]
fn test_start_discards_queued_packets() {
    let mut ep = endpoint(false);
    ep.start([]).unwrap();
    ep.deliver(Packet::new(0, &[1]).unwrap());
    ep.reset_counters();

    ep.start([]).unwrap();
    ep.handle(LinkEvent::ReadAvailable);

    assert_eq!(ep.counters().rx_packets, 0);
    assert!(ep.display().received.is_empty());
}

#[test]
fn test_neighbor_events_reach_display() {
    let mut ep = endpoint(false);
    ep.start([0, 1, 2]).unwrap();

    ep.handle(LinkEvent::Sensor(SensorEvent::NeighborAdd {
        first: Attachment::new(0, Side::Right as u8),
        second: Attachment::new(2, Side::Left as u8),
    }));

    assert!(ep.sensors().neighboring());
    assert_eq!(
        ep.display().neighbors,
        vec![(0, Side::Right.mask()), (2, Side::Left.mask())]
    );

    ep.handle(LinkEvent::Sensor(SensorEvent::NeighborRemove {
        first: Attachment::new(0, Side::Right as u8),
        second: Attachment::new(2, Side::Left as u8),
    }));
    assert!(!ep.sensors().neighboring());
    assert_eq!(ep.display().neighbors.last(), Some(&(2, 0)));
}

#[test]
fn test_tilt_reported_to_display() {
    let mut ep = endpoint(false);
    ep.start([1]).unwrap();

    ep.handle(LinkEvent::Sensor(accel(1, 0, 40, 0)));

    let (node, changed, tilt) = *ep.display().accel.last().unwrap();
    assert_eq!(node, 1);
    assert!(changed.contains(MotionFlags::TILT));
    assert_eq!(tilt.y, 1);
}

#[test]
fn test_out_of_range_node_ignored() {
    let mut ep = endpoint(false);
    ep.start([5]).unwrap();

    assert!(ep.display().nodes.is_empty());
    ep.handle(LinkEvent::Sensor(accel(7, 10, 10, 10)));
    ep.handle(LinkEvent::Sensor(SensorEvent::TouchChange {
        node: 9,
        touching: true,
    }));
    assert!(ep.display().accel.is_empty());
}

#[test]
fn test_idle_frames_report_counters() {
    let mut ep = endpoint(true);
    ep.start([]).unwrap();

    let reports: Vec<_> = (0..120).filter_map(|_| ep.idle_frame()).collect();
    assert_eq!(reports.len(), 2);
    assert_eq!(reports[0].tx_packets, 1);
}

#[test]
fn test_queued_events_dispatch_in_order() {
    let queue: EventQueue<NoopRawMutex, 8> = EventQueue::new();
    let mut ep = endpoint(false);
    ep.start([0]).unwrap();
    ep.transport_mut().up = true;

    queue.post(accel(0, 50, 0, 0).into()).unwrap();
    queue.post(LinkEvent::Connect).unwrap();

    assert_eq!(ep.dispatch_pending(&queue), 2);

    // The accel sample was applied before the first packet was encoded
    let report = ControlPacket::from_packet(&ep.take_committed().unwrap()).unwrap();
    assert_eq!(report.axis_x, 90);
}

#[test]
fn test_async_step() {
    let queue: EventQueue<NoopRawMutex, 4> = EventQueue::new();
    let mut ep = endpoint(false);
    ep.start([]).unwrap();

    ep.transport_mut().up = true;
    queue.post(LinkEvent::Connect).unwrap();

    let handled = embassy_futures::block_on(ep.step(&queue));
    assert!(handled);
    assert_eq!(ep.state(), ConnectionState::Connected);
}
