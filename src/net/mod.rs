// NoiseNode — Network Layer
//
// The pipeline only ever sees the `Transport` trait; connection lifecycle
// (dial, reconnect, backoff) lives entirely behind it.

pub mod transport;
#[cfg(target_os = "espidf")]
pub mod wifi;

pub use transport::TcpTransport;

/// Best-effort binary transport to the collection server.
///
/// `send_binary` makes exactly one delivery attempt: callers discard on
/// failure and move on. Implementations serialize the send path internally —
/// it is invoked from the audio consumer and from each scalar-sensor loop.
pub trait Transport: Send + Sync {
    fn is_connected(&self) -> bool;

    /// Send one record. Returns `false` when disconnected, when the send
    /// path could not be acquired within its bounded wait, or on a write
    /// error. Never retries.
    fn send_binary(&self, payload: &[u8]) -> bool;
}
