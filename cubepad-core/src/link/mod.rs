//! Radio control link
//!
//! - `pipe`: bounded send/receive queues with reserve/commit
//! - `lifecycle`: connected/disconnected state machine
//! - `dispatch`: subscription table keyed by event kind
//! - `counters`: packet/byte totals and periodic reports
//! - `queue`: event hand-off from interrupt context
//! - `endpoint`: ties it all together

pub mod counters;
pub mod dispatch;
pub mod endpoint;
pub mod events;
pub mod lifecycle;
pub mod pipe;
pub mod queue;

pub use counters::{CounterReporter, CounterSnapshot, LinkCounters};
pub use dispatch::{EventKind, Subscriptions};
pub use endpoint::{Endpoint, StartError};
pub use events::{LinkEvent, SensorEvent};
pub use lifecycle::{ConnectionLifecycle, ConnectionState};
pub use pipe::{Pipe, ReceiveQueue, SendQueue};
pub use queue::{EventQueue, QueueFull};
