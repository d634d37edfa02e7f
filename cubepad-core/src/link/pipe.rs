//! Bounded packet pipes
//!
//! ```text
//!   producer                      transport                     consumer
//!  ┌──────────────────────┐     ┌───────────┐     ┌──────────────────────┐
//!  │ reserve → commit     │ ──► │  radio    │ ──► │ deliver → read       │
//!  │        SendQueue<N>  │     └───────────┘     │     ReceiveQueue<N>  │
//!  └──────────────────────┘                       └──────────────────────┘
//! ```
//!
//! A packet is visible to the transport only once committed. A reserved
//! slot counts against capacity until it is committed.

use cubepad_protocol::Packet;
use heapless::Deque;

/// Transmit side: reserve/commit producer queue
#[derive(Debug)]
pub struct SendQueue<const N: usize> {
    committed: Deque<Packet, N>,
    reserved: Option<Packet>,
}

impl<const N: usize> Default for SendQueue<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> SendQueue<N> {
    pub const fn new() -> Self {
        Self {
            committed: Deque::new(),
            reserved: None,
        }
    }

    pub const fn capacity(&self) -> usize {
        N
    }

    /// Reserved plus committed packets
    pub fn len(&self) -> usize {
        self.committed.len() + usize::from(self.reserved.is_some())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether a slot can be reserved right now
    pub fn write_available(&self) -> bool {
        self.reserved.is_none() && self.len() < N
    }

    /// Reserve the next slot for in-place encoding
    ///
    /// # Panics
    ///
    /// If [`Self::write_available`] is false.
    pub fn reserve(&mut self) -> &mut Packet {
        assert!(self.write_available(), "reserve on a full send queue");
        self.reserved.insert(Packet::empty())
    }

    /// Hand the reserved slot to the transport
    ///
    /// # Panics
    ///
    /// If no slot is reserved.
    pub fn commit(&mut self) {
        let Some(packet) = self.reserved.take() else {
            panic!("commit without a reserved slot");
        };

        if self.committed.push_back(packet).is_err() {
            unreachable!("reserved slot always has committed capacity");
        }
    }

    /// Copy a finished packet into the queue
    ///
    /// # Panics
    ///
    /// If [`Self::write_available`] is false.
    pub fn write(&mut self, packet: &Packet) {
        self.reserve().clone_from(packet);
        self.commit();
    }

    /// Transport side: take the oldest committed packet
    pub fn take_committed(&mut self) -> Option<Packet> {
        self.committed.pop_front()
    }

    /// Drop everything, including a pending reservation
    pub fn clear(&mut self) {
        self.committed.clear();
        self.reserved = None;
    }
}

/// Receive side: FIFO filled by the transport
#[derive(Debug)]
pub struct ReceiveQueue<const N: usize> {
    packets: Deque<Packet, N>,
}

impl<const N: usize> Default for ReceiveQueue<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> ReceiveQueue<N> {
    pub const fn new() -> Self {
        Self {
            packets: Deque::new(),
        }
    }

    pub const fn capacity(&self) -> usize {
        N
    }

    pub fn len(&self) -> usize {
        self.packets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.packets.is_empty()
    }

    /// Transport side: queue an inbound packet
    ///
    /// Hands the packet back if the queue is full.
    pub fn deliver(&mut self, packet: Packet) -> Result<(), Packet> {
        self.packets.push_back(packet)
    }

    pub fn read_available(&self) -> bool {
        !self.packets.is_empty()
    }

    /// Take the oldest packet
    pub fn read(&mut self) -> Option<Packet> {
        self.packets.pop_front()
    }

    /// Look at the oldest packet without copying it
    pub fn peek(&self) -> Option<&Packet> {
        self.packets.front()
    }

    /// Discard the oldest packet; returns false if empty
    pub fn pop(&mut self) -> bool {
        self.packets.pop_front().is_some()
    }

    pub fn clear(&mut self) {
        self.packets.clear();
    }
}

/// Both directions of one radio pipe
#[derive(Debug, Default)]
pub struct Pipe<const TX: usize, const RX: usize> {
    send: SendQueue<TX>,
    receive: ReceiveQueue<RX>,
}

impl<const TX: usize, const RX: usize> Pipe<TX, RX> {
    pub const fn new() -> Self {
        Self {
            send: SendQueue::new(),
            receive: ReceiveQueue::new(),
        }
    }

    /// Bring-up: discard anything queued in either direction
    ///
    /// Must run before any handler is subscribed. Both queues are empty
    /// afterwards.
    pub fn attach(&mut self) {
        self.send.clear();
        self.receive.clear();
        debug_assert!(self.send.is_empty() && self.receive.is_empty());
    }

    pub fn send(&self) -> &SendQueue<TX> {
        &self.send
    }

    pub fn send_mut(&mut self) -> &mut SendQueue<TX> {
        &mut self.send
    }

    pub fn receive(&self) -> &ReceiveQueue<RX> {
        &self.receive
    }

    pub fn receive_mut(&mut self) -> &mut ReceiveQueue<RX> {
        &mut self.receive
    }
}
