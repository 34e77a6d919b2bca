// NoiseNode — Diagnostics Task
//
// Periodic operational visibility: queue depth and throughput/drop deltas,
// plus heap headroom on target. Not required for correctness — purely for
// watching a deployed node over the serial console.

use std::sync::Arc;
use std::thread;
use std::time::Duration;

use crate::config::MONITOR_PERIOD_MS;
use crate::queue::BoundedQueue;

pub fn monitor_task<T>(queue: Arc<BoundedQueue<T>>) {
    log::info!("monitor task started ({} ms period)", MONITOR_PERIOD_MS);

    let period = Duration::from_millis(MONITOR_PERIOD_MS);
    let mut last_enqueued: u64 = 0;
    let mut last_dropped: u64 = 0;

    while !queue.is_closed() {
        thread::sleep(period);

        let enqueued = queue.enqueued();
        let dropped = queue.dropped();
        log::info!(
            "pipeline: depth {}/{} | +{} packets | +{} dropped",
            queue.len(),
            queue.capacity(),
            enqueued - last_enqueued,
            dropped - last_dropped,
        );
        last_enqueued = enqueued;
        last_dropped = dropped;

        #[cfg(target_os = "espidf")]
        unsafe {
            log::info!(
                "heap: {} free, {} minimum",
                esp_idf_sys::esp_get_free_heap_size(),
                esp_idf_sys::esp_get_minimum_free_heap_size(),
            );
        }
    }

    log::info!("monitor task exiting — queue closed");
}
