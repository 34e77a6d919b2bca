// NoiseNode — Environmental Noise Monitoring Firmware
//
// Samples a microphone at a fixed 8 kHz cadence, batches samples into
// timestamped packets, conditions them (DC-offset removal + gain), and
// streams them to a collection server over a persistent TCP connection.
// Low-rate light and temperature/humidity readings are sent on their own
// independent cadences, bypassing the audio pipeline.
//
// Everything except the hardware drivers and the boot glue is portable and
// exercised by host-side `cargo test`.

pub mod config;
pub mod dsp;
pub mod net;
pub mod packet;
pub mod queue;
pub mod sensors;
pub mod tasks;

use std::time::{SystemTime, UNIX_EPOCH};

/// Milliseconds since the Unix epoch.
///
/// On target this is meaningful once SNTP has stepped the clock, which boot
/// completes before any sampling task starts — packet timestamps are
/// therefore monotonic non-decreasing in steady state.
pub fn epoch_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as i64)
        .unwrap_or(0)
}
