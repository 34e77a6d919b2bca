// NoiseNode — Transmission Consumer Task
//
// Drains the packet queue and makes at most one delivery attempt per packet.
// Removal is destructive: a packet that cannot be sent (transport down, send
// failure) is discarded so the consumer keeps draining and the producer side
// never backs up behind a dead connection.

use std::sync::Arc;

use crate::net::Transport;
use crate::packet::SamplePacket;
use crate::queue::BoundedQueue;

pub fn send_task<const N: usize>(
    queue: Arc<BoundedQueue<SamplePacket<N>>>,
    transport: Arc<dyn Transport>,
) {
    log::info!("send task started");

    while let Some(packet) = queue.receive(None) {
        deliver(&packet, transport.as_ref());
    }

    log::info!("send task exiting — queue closed");
}

/// One delivery attempt. Returns `true` when the packet went out.
pub fn deliver<const N: usize>(packet: &SamplePacket<N>, transport: &dyn Transport) -> bool {
    if !transport.is_connected() {
        log::debug!("transport offline — packet discarded");
        return false;
    }
    if !transport.send_binary(&packet.to_bytes()) {
        log::warn!("packet send failed — packet discarded");
        return false;
    }
    true
}
