// NoiseNode — Firmware Entry Point
//
// Boot sequence:
//   1. Bring up WiFi (fatal on failure — the node is useless offline).
//   2. Sync wall-clock time via SNTP (bounded wait, degrade with a warning).
//   3. Start the transport client (owns connect/reconnect from here on).
//   4. Create the packet queue and spawn the pipeline tasks.
//
// Each sensor task constructs its own hardware driver; if that fails the
// task logs an error and terminates itself while the rest of the node keeps
// running degraded.

#[cfg(target_os = "espidf")]
mod app {
    use std::sync::Arc;
    use std::thread;
    use std::time::Duration;

    use esp_idf_hal::prelude::*;
    use esp_idf_hal::task::thread::ThreadSpawnConfiguration;
    use esp_idf_svc::eventloop::EspSystemEventLoop;
    use esp_idf_svc::nvs::EspDefaultNvsPartition;
    use esp_idf_svc::sntp::{EspSntp, SyncStatus};

    use noisenode::config::*;
    use noisenode::net::{self, TcpTransport, Transport};
    use noisenode::packet::AudioPacket;
    use noisenode::queue::BoundedQueue;
    use noisenode::sensors::{DhtSensor, I2sMicrophone, LdrSensor};
    use noisenode::tasks;

    pub fn run() -> anyhow::Result<()> {
        esp_idf_svc::sys::link_patches();
        esp_idf_svc::log::EspLogger::initialize_default();
        log::info!("NoiseNode firmware starting…");

        let peripherals = Peripherals::take()?;
        let sysloop = EspSystemEventLoop::take()?;
        let nvs = EspDefaultNvsPartition::take()?;

        // WiFi and SNTP handles must stay alive for the programme duration.
        let _wifi = net::wifi::connect(peripherals.modem, sysloop, nvs)?;
        let _sntp = init_time_sync()?;

        let transport: Arc<dyn Transport> = TcpTransport::start(SERVER_ADDR)?;
        let queue = Arc::new(BoundedQueue::<AudioPacket>::new(QUEUE_CAPACITY));

        // ---- Audio producer — highest pipeline priority -------------------
        let i2s = peripherals.i2s0;
        let bclk = peripherals.pins.gpio26;
        let din = peripherals.pins.gpio27;
        let ws = peripherals.pins.gpio25;
        let audio_queue = Arc::clone(&queue);
        spawn_task("audio", STACK_AUDIO, PRIO_AUDIO, move || {
            let mic = match I2sMicrophone::new(i2s, bclk, din, ws) {
                Ok(mic) => mic,
                Err(e) => {
                    log::error!("I2S init failed: {e} — audio stream disabled");
                    return;
                }
            };
            tasks::audio::audio_task(mic, audio_queue);
        })?;

        // ---- Transmission consumer ----------------------------------------
        let send_queue = Arc::clone(&queue);
        let send_transport = Arc::clone(&transport);
        spawn_task("send", STACK_SEND, PRIO_SEND, move || {
            tasks::sender::send_task(send_queue, send_transport);
        })?;

        // ---- Secondary scalar sensors --------------------------------------
        let light_transport = Arc::clone(&transport);
        spawn_task("light", STACK_LIGHT, PRIO_SCALAR, move || {
            let ldr = match LdrSensor::new() {
                Ok(ldr) => ldr,
                Err(e) => {
                    log::error!("LDR init failed: {e} — light stream disabled");
                    return;
                }
            };
            tasks::light::light_task(ldr, light_transport);
        })?;

        let climate_transport = Arc::clone(&transport);
        spawn_task("climate", STACK_CLIMATE, PRIO_SCALAR, move || {
            let dht = DhtSensor::new(PIN_DHT);
            tasks::climate::climate_task(dht, climate_transport);
        })?;

        // ---- Diagnostics ----------------------------------------------------
        let monitor_queue = Arc::clone(&queue);
        spawn_task("monitor", STACK_MONITOR, PRIO_MONITOR, move || {
            tasks::monitor::monitor_task(monitor_queue);
        })?;

        // Restore the default spawn configuration for anything spawned later.
        ThreadSpawnConfiguration::default().set()?;

        log::info!("all tasks running — streaming to {}", SERVER_ADDR);

        // Main thread has nothing left to do — park it forever.
        loop {
            thread::sleep(Duration::from_secs(60));
        }
    }

    /// Spawn a FreeRTOS task with an explicit stack size and priority.
    fn spawn_task(
        name: &'static str,
        stack_size: usize,
        priority: u8,
        f: impl FnOnce() + Send + 'static,
    ) -> anyhow::Result<()> {
        ThreadSpawnConfiguration { stack_size, priority, ..Default::default() }.set()?;
        thread::Builder::new()
            .name(name.into())
            .stack_size(stack_size)
            .spawn(f)?;
        Ok(())
    }

    /// Block (bounded) until SNTP has stepped the clock so packet timestamps
    /// are wall-clock milliseconds rather than time-since-boot.
    fn init_time_sync() -> anyhow::Result<EspSntp<'static>> {
        let sntp = EspSntp::new_default()?;

        let mut waited = 0u32;
        while sntp.get_sync_status() != SyncStatus::Completed && waited < 30 {
            log::info!("waiting for time sync…");
            thread::sleep(Duration::from_secs(1));
            waited += 1;
        }
        if sntp.get_sync_status() != SyncStatus::Completed {
            log::warn!("time sync incomplete — timestamps start relative");
        }

        Ok(sntp)
    }
}

#[cfg(target_os = "espidf")]
fn main() -> anyhow::Result<()> {
    app::run()
}

#[cfg(not(target_os = "espidf"))]
fn main() {
    eprintln!("noisenode is ESP32 firmware — build for the espidf target");
}
