//! Radio transport trait

/// Link-layer view of the radio
///
/// The endpoint only asks the transport whether the link is up. Moving
/// committed packets over the air and delivering inbound packets is done
/// through the pipe queues by the transport integration.
pub trait Transport {
    /// Whether the radio link to the peer is currently up
    fn is_connected(&self) -> bool;

    /// Whether the radio has been brought up at all
    ///
    /// Start-up is refused while this is false.
    fn is_available(&self) -> bool {
        true
    }
}
