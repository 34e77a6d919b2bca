// NoiseNode — Hardware & System Configuration
// Target: ESP32 DevKit (Xtensa) with an I2S MEMS microphone, LDR and DHT11.

// ---------------------------------------------------------------------------
// GPIO Pin Definitions
// ---------------------------------------------------------------------------
pub const PIN_I2S_WS: i32 = 25;   // Microphone WS (LRCK)
pub const PIN_I2S_BCLK: i32 = 26; // Microphone bit clock
pub const PIN_I2S_DIN: i32 = 27;  // Microphone serial data
pub const PIN_DHT: i32 = 33;      // DHT11 single-wire data
pub const ADC_CHANNEL_LDR: u32 = 4; // ADC1 channel 4 — GPIO32

// ---------------------------------------------------------------------------
// Audio Pipeline
// ---------------------------------------------------------------------------
pub const SAMPLE_RATE_HZ: u32 = 8_000;
pub const SAMPLES_PER_PACKET: usize = 448;  // 56 ms of audio per packet
pub const QUEUE_CAPACITY: usize = 10;       // ~560 ms of buffered audio
pub const MIC_GAIN: f32 = 0.8;              // post-offset scaling, ≤ 1.0
pub const ENQUEUE_TIMEOUT_MS: u64 = 10;     // producer never waits longer
pub const I2S_READ_TIMEOUT_MS: u64 = 200;   // > one packet duration

// ---------------------------------------------------------------------------
// Secondary Sensors & Diagnostics (milliseconds)
// ---------------------------------------------------------------------------
pub const LIGHT_PERIOD_MS: u64 = 1_000;
pub const CLIMATE_PERIOD_MS: u64 = 2_000;
pub const MONITOR_PERIOD_MS: u64 = 10_000;

// ---------------------------------------------------------------------------
// Network
// ---------------------------------------------------------------------------
pub const SERVER_ADDR: &str = match option_env!("NOISENODE_SERVER") {
    Some(addr) => addr,
    None => "192.168.0.10:9000",
};
pub const WIFI_SSID: &str = match option_env!("NOISENODE_WIFI_SSID") {
    Some(ssid) => ssid,
    None => "noisenode",
};
pub const WIFI_PASS: &str = match option_env!("NOISENODE_WIFI_PASS") {
    Some(pass) => pass,
    None => "",
};
pub const SEND_LOCK_WAIT_MS: u64 = 5;       // bounded wait for the send mutex
pub const RECONNECT_BACKOFF_MIN_MS: u64 = 1_000;
pub const RECONNECT_BACKOFF_MAX_MS: u64 = 8_000;

// ---------------------------------------------------------------------------
// Task Stack Sizes (bytes) & FreeRTOS Priorities
// ---------------------------------------------------------------------------
pub const STACK_AUDIO: usize = 8192;
pub const STACK_SEND: usize = 6144;
pub const STACK_LIGHT: usize = 4096;
pub const STACK_CLIMATE: usize = 4096;
pub const STACK_MONITOR: usize = 4096;
pub const STACK_NET: usize = 4096;

// The producer owns the sampling cadence and must never wait on the network;
// everything downstream runs below it.
pub const PRIO_AUDIO: u8 = 10;
pub const PRIO_SEND: u8 = 6;
pub const PRIO_SCALAR: u8 = 5;
pub const PRIO_MONITOR: u8 = 4;
