// NoiseNode — Climate Sensor Task
//
// Independent 0.5 Hz loop for the DHT11 (the sensor itself cannot be read
// faster than about once per second). Same discard-on-unavailable policy as
// the light task.

use std::sync::Arc;
use std::thread;
use std::time::Duration;

use crate::config::CLIMATE_PERIOD_MS;
use crate::epoch_ms;
use crate::net::Transport;
use crate::packet::ClimateReading;
use crate::sensors::ClimateSource;

pub fn climate_task(mut source: impl ClimateSource, transport: Arc<dyn Transport>) {
    log::info!("climate task started ({} ms period)", CLIMATE_PERIOD_MS);

    let period = Duration::from_millis(CLIMATE_PERIOD_MS);
    loop {
        sample_once(&mut source, transport.as_ref());
        thread::sleep(period);
    }
}

/// One cadence step: read and best-effort send. Returns `true` when the
/// reading was transmitted.
pub fn sample_once(source: &mut impl ClimateSource, transport: &dyn Transport) -> bool {
    let (temperature, humidity) = match source.read_climate() {
        Ok(values) => values,
        Err(e) => {
            // Checksum failures are routine for a DHT11 — skip the cycle.
            log::warn!("climate read failed: {e}");
            return false;
        }
    };

    let reading = ClimateReading { timestamp_ms: epoch_ms(), temperature, humidity };
    if !transport.is_connected() {
        return false;
    }
    transport.send_binary(&reading.to_bytes())
}
