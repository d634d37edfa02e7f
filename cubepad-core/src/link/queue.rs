//! Event queue
//!
//! Lets interrupt-side producers (radio and sensor drivers) hand events
//! to the single-threaded dispatcher. Posting never blocks; when the
//! queue is full the event is refused.

use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::channel::Channel;

use super::events::LinkEvent;

/// Event refused because the queue is full
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct QueueFull(pub LinkEvent);

/// Bounded FIFO of pending [`LinkEvent`]s
pub struct EventQueue<M: RawMutex, const N: usize> {
    channel: Channel<M, LinkEvent, N>,
}

impl<M: RawMutex, const N: usize> Default for EventQueue<M, N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M: RawMutex, const N: usize> EventQueue<M, N> {
    pub const fn new() -> Self {
        Self {
            channel: Channel::new(),
        }
    }

    /// Queue an event without waiting
    pub fn post(&self, event: LinkEvent) -> Result<(), QueueFull> {
        self.channel.try_send(event).map_err(|_| {
            warn!("event queue full, dropping {}", event);
            QueueFull(event)
        })
    }

    /// Next pending event, if any
    pub fn try_next(&self) -> Option<LinkEvent> {
        self.channel.try_receive().ok()
    }

    /// Wait for the next event
    pub async fn next(&self) -> LinkEvent {
        self.channel.receive().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embassy_sync::blocking_mutex::raw::NoopRawMutex;

    #[test]
    fn test_fifo_order() {
        let queue: EventQueue<NoopRawMutex, 4> = EventQueue::new();
        queue.post(LinkEvent::Connect).unwrap();
        queue.post(LinkEvent::WriteAvailable).unwrap();

        assert_eq!(queue.try_next(), Some(LinkEvent::Connect));
        assert_eq!(queue.try_next(), Some(LinkEvent::WriteAvailable));
        assert_eq!(queue.try_next(), None);
    }

    #[test]
    fn test_full_queue_refuses() {
        let queue: EventQueue<NoopRawMutex, 1> = EventQueue::new();
        queue.post(LinkEvent::ReadAvailable).unwrap();

        assert_eq!(
            queue.post(LinkEvent::Disconnect),
            Err(QueueFull(LinkEvent::Disconnect))
        );
        assert_eq!(queue.try_next(), Some(LinkEvent::ReadAvailable));
    }

    #[test]
    fn test_async_next() {
        let queue: EventQueue<NoopRawMutex, 2> = EventQueue::new();
        queue.post(LinkEvent::Connect).unwrap();

        let event = embassy_futures::block_on(queue.next());
        assert_eq!(event, LinkEvent::Connect);
    }
}
