//! Dispatch table
//!
//! Handlers are not registered as callbacks. Instead the endpoint keeps a
//! subscription set keyed by event kind and ignores events whose kind is
//! not subscribed. Unsubscribing takes effect for the next dispatched
//! event; a handler already running is never interrupted.

/// Dispatch key of a [`super::LinkEvent`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum EventKind {
    Connect = 0,
    Disconnect = 1,
    ReadAvailable = 2,
    WriteAvailable = 3,
    NodeConnect = 4,
    NodeDisconnect = 5,
    AccelChange = 6,
    TouchChange = 7,
    NeighborAdd = 8,
    NeighborRemove = 9,
}

impl EventKind {
    /// All sensor event kinds
    pub const SENSOR: [EventKind; 6] = [
        EventKind::NodeConnect,
        EventKind::NodeDisconnect,
        EventKind::AccelChange,
        EventKind::TouchChange,
        EventKind::NeighborAdd,
        EventKind::NeighborRemove,
    ];

    fn bit(self) -> u16 {
        1 << self as u8
    }
}

/// Set of subscribed event kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Subscriptions(u16);

impl Subscriptions {
    pub const fn new() -> Self {
        Self(0)
    }

    /// Subscribe; returns false if already subscribed
    pub fn subscribe(&mut self, kind: EventKind) -> bool {
        let was = self.is_subscribed(kind);
        self.0 |= kind.bit();
        !was
    }

    /// Unsubscribe; returns false if not subscribed
    pub fn unsubscribe(&mut self, kind: EventKind) -> bool {
        let was = self.is_subscribed(kind);
        self.0 &= !kind.bit();
        was
    }

    pub fn is_subscribed(&self, kind: EventKind) -> bool {
        self.0 & kind.bit() != 0
    }

    pub fn clear(&mut self) {
        self.0 = 0;
    }
}
