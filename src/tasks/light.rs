// NoiseNode — Light Sensor Task
//
// Independent 1 Hz loop: read the LDR, stamp, send directly through the
// transport. No queue — a reading that cannot go out right now is worthless
// a second later, so it is simply skipped.

use std::sync::Arc;
use std::thread;
use std::time::Duration;

use crate::config::LIGHT_PERIOD_MS;
use crate::epoch_ms;
use crate::net::Transport;
use crate::packet::LightReading;
use crate::sensors::LightSource;

pub fn light_task(mut source: impl LightSource, transport: Arc<dyn Transport>) {
    log::info!("light task started ({} ms period)", LIGHT_PERIOD_MS);

    let period = Duration::from_millis(LIGHT_PERIOD_MS);
    loop {
        sample_once(&mut source, transport.as_ref());
        thread::sleep(period);
    }
}

/// One cadence step: read and best-effort send. Returns `true` when the
/// reading was transmitted.
pub fn sample_once(source: &mut impl LightSource, transport: &dyn Transport) -> bool {
    let level = match source.read_level() {
        Ok(level) => level,
        Err(e) => {
            log::warn!("light read failed: {e}");
            return false;
        }
    };

    let reading = LightReading { timestamp_ms: epoch_ms(), level };
    if !transport.is_connected() {
        return false;
    }
    transport.send_binary(&reading.to_bytes())
}
