//! Connection lifecycle
//!
//! Two states. Entering `Connected` subscribes the write-available
//! handler, entering `Disconnected` unsubscribes it. The read-available
//! subscription is owned by the endpoint and stays in place across both.

use super::dispatch::{EventKind, Subscriptions};
use super::events::LinkEvent;

/// Radio link state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConnectionState {
    /// Initial state; nothing is transmitted
    #[default]
    Disconnected,
    /// Peer reachable; the transmit pipe is drained on write-available
    Connected,
}

impl ConnectionState {
    pub fn is_connected(&self) -> bool {
        matches!(self, ConnectionState::Connected)
    }

    /// Process an event and return the next state
    pub fn transition(self, event: LinkEvent) -> Self {
        use ConnectionState::*;

        match (self, event) {
            (Disconnected, LinkEvent::Connect) => Connected,
            (Connected, LinkEvent::Disconnect) => Disconnected,

            // Duplicates and unrelated events keep the state
            _ => self,
        }
    }
}

/// Connection state plus its handler registration
#[derive(Debug, Clone, Default)]
pub struct ConnectionLifecycle {
    state: ConnectionState,
}

impl ConnectionLifecycle {
    pub const fn new() -> Self {
        Self {
            state: ConnectionState::Disconnected,
        }
    }

    pub fn state(&self) -> ConnectionState {
        self.state
    }

    pub fn is_connected(&self) -> bool {
        self.state.is_connected()
    }

    /// Handle a connect notification
    ///
    /// `transport_up` is the transport's own view of the link. Returns the
    /// new state; the caller runs the transmit drain once afterwards.
    ///
    /// # Panics
    ///
    /// If the transport reports the link down.
    pub fn on_connect(
        &mut self,
        transport_up: bool,
        subscriptions: &mut Subscriptions,
    ) -> ConnectionState {
        assert!(transport_up, "connect notification while transport is down");

        self.state = self.state.transition(LinkEvent::Connect);
        subscriptions.subscribe(EventKind::WriteAvailable);
        self.state
    }

    /// Handle a disconnect notification
    ///
    /// # Panics
    ///
    /// If the transport still reports the link up.
    pub fn on_disconnect(
        &mut self,
        transport_up: bool,
        subscriptions: &mut Subscriptions,
    ) -> ConnectionState {
        assert!(!transport_up, "disconnect notification while transport is up");

        self.state = self.state.transition(LinkEvent::Disconnect);
        subscriptions.unsubscribe(EventKind::WriteAvailable);
        self.state
    }

    /// Back to `Disconnected` without touching subscriptions
    pub fn reset(&mut self) {
        self.state = ConnectionState::Disconnected;
    }
}
