// NoiseNode — Audio Producer Task
//
// Drives the sampling cadence: one batched blocking read per packet (the I2S
// DMA owns the microsecond timing), then timestamp, condition, and a bounded
// hand-off to the queue. The producer never waits on the network: a full
// queue means the packet is dropped and the next cycle starts immediately,
// keeping the sampling clock fixed at the cost of losing samples.

use std::sync::Arc;
use std::thread;
use std::time::Duration;

use crate::config::{ENQUEUE_TIMEOUT_MS, MIC_GAIN, SAMPLE_RATE_HZ};
use crate::dsp;
use crate::epoch_ms;
use crate::packet::SamplePacket;
use crate::queue::BoundedQueue;
use crate::sensors::SampleSource;

pub fn audio_task<S, const N: usize>(mut source: S, queue: Arc<BoundedQueue<SamplePacket<N>>>)
where
    S: SampleSource,
{
    log::info!("audio task started ({} Hz, {} samples/packet)", SAMPLE_RATE_HZ, N);

    while !queue.is_closed() {
        capture_packet(&mut source, &queue);
    }

    log::info!("audio task exiting — queue closed");
}

/// One sampling cycle: read exactly N samples, stamp, condition, enqueue.
/// Returns `true` only when a packet was handed to the queue. Short reads and
/// queue-full are expected degradations, never enqueued partially and never
/// retried.
pub fn capture_packet<S, const N: usize>(
    source: &mut S,
    queue: &BoundedQueue<SamplePacket<N>>,
) -> bool
where
    S: SampleSource,
{
    let mut packet = SamplePacket::<N>::default();

    let count = match source.read_samples(&mut packet.samples) {
        Ok(count) => count,
        Err(e) => {
            log::warn!("sample read failed: {e}");
            // Keep a persistent hardware fault from spinning the task hot.
            thread::sleep(Duration::from_millis(10));
            return false;
        }
    };

    if count < N {
        log::warn!("short read ({count}/{N} samples) — packet discarded");
        return false;
    }

    packet.timestamp_ms = epoch_ms();
    dsp::condition(&mut packet.samples, MIC_GAIN);

    if !queue.try_enqueue(packet, Duration::from_millis(ENQUEUE_TIMEOUT_MS)) {
        log::warn!("packet queue full — packet dropped (total {})", queue.dropped());
        return false;
    }
    true
}
