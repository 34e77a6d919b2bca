// NoiseNode — Hardware Sampling Sources
//
// Tasks see these traits only; the ESP drivers live behind the target gate so
// the pipeline can be exercised with mock sources on the host.

#[cfg(target_os = "espidf")]
pub mod dht;
#[cfg(target_os = "espidf")]
pub mod ldr;
#[cfg(target_os = "espidf")]
pub mod mic;

#[cfg(target_os = "espidf")]
pub use dht::DhtSensor;
#[cfg(target_os = "espidf")]
pub use ldr::LdrSensor;
#[cfg(target_os = "espidf")]
pub use mic::I2sMicrophone;

/// Batched audio source. One call acquires up to `out.len()` samples; the
/// source's own timing (I2S DMA on target) paces the acquisition.
pub trait SampleSource {
    /// Fill `out` from the start, returning how many samples were actually
    /// read. May return fewer than requested on timeout — callers must check
    /// the count and discard short batches.
    fn read_samples(&mut self, out: &mut [i16]) -> anyhow::Result<usize>;
}

/// Ambient light level source (raw ADC reading).
pub trait LightSource {
    fn read_level(&mut self) -> anyhow::Result<i16>;
}

/// Temperature/humidity source. Values in tenths (°C, %RH).
pub trait ClimateSource {
    fn read_climate(&mut self) -> anyhow::Result<(i16, i16)>;
}
