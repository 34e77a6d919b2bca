// NoiseNode — Data Model & Wire Format
//
// Every record crosses the wire as a packed little-endian blob: an 8-byte
// millisecond timestamp followed by the signed 16-bit payload values. The
// transport adds a length prefix per frame; the server tells record types
// apart by their fixed sizes.

use crate::config::SAMPLES_PER_PACKET;

// ---------------------------------------------------------------------------
// Audio packet — the unit of transfer through the bounded queue
// ---------------------------------------------------------------------------

/// One fixed-length batch of timestamped audio samples.
///
/// A packet is built fresh each sampling cycle, conditioned in place, copied
/// into the queue on enqueue, and never mutated afterwards. Partial packets
/// never reach the queue — the producer discards short reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SamplePacket<const N: usize> {
    /// Time of the last sample in the packet, ms since the Unix epoch.
    pub timestamp_ms: i64,
    pub samples: [i16; N],
}

/// The production packet size shared by producer and consumer.
pub type AudioPacket = SamplePacket<SAMPLES_PER_PACKET>;

impl<const N: usize> SamplePacket<N> {
    pub const WIRE_SIZE: usize = 8 + 2 * N;

    pub fn new(timestamp_ms: i64, samples: [i16; N]) -> Self {
        Self { timestamp_ms, samples }
    }

    /// Serialize to the packed wire layout (timestamp + samples, LE).
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(Self::WIRE_SIZE);
        out.extend_from_slice(&self.timestamp_ms.to_le_bytes());
        for s in &self.samples {
            out.extend_from_slice(&s.to_le_bytes());
        }
        out
    }
}

impl<const N: usize> Default for SamplePacket<N> {
    fn default() -> Self {
        Self { timestamp_ms: 0, samples: [0; N] }
    }
}

// ---------------------------------------------------------------------------
// Scalar readings — one value (pair) per record, no queue involved
// ---------------------------------------------------------------------------

/// Ambient light level from the LDR (raw 12-bit ADC reading).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LightReading {
    pub timestamp_ms: i64,
    pub level: i16,
}

impl LightReading {
    pub const WIRE_SIZE: usize = 10;

    pub fn to_bytes(&self) -> [u8; Self::WIRE_SIZE] {
        let mut out = [0u8; Self::WIRE_SIZE];
        out[..8].copy_from_slice(&self.timestamp_ms.to_le_bytes());
        out[8..].copy_from_slice(&self.level.to_le_bytes());
        out
    }
}

/// Temperature and relative humidity from the DHT11, both in tenths
/// (23.4 °C → 234, 56 %RH → 560).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClimateReading {
    pub timestamp_ms: i64,
    pub temperature: i16,
    pub humidity: i16,
}

impl ClimateReading {
    pub const WIRE_SIZE: usize = 12;

    pub fn to_bytes(&self) -> [u8; Self::WIRE_SIZE] {
        let mut out = [0u8; Self::WIRE_SIZE];
        out[..8].copy_from_slice(&self.timestamp_ms.to_le_bytes());
        out[8..10].copy_from_slice(&self.temperature.to_le_bytes());
        out[10..].copy_from_slice(&self.humidity.to_le_bytes());
        out
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_packet_wire_layout() {
        let packet = SamplePacket::<3>::new(0x0102_0304_0506_0708, [1, -2, 0x1234]);
        let bytes = packet.to_bytes();

        assert_eq!(bytes.len(), SamplePacket::<3>::WIRE_SIZE);
        assert_eq!(&bytes[..8], &0x0102_0304_0506_0708i64.to_le_bytes());
        assert_eq!(&bytes[8..10], &1i16.to_le_bytes());
        assert_eq!(&bytes[10..12], &(-2i16).to_le_bytes());
        assert_eq!(&bytes[12..14], &0x1234i16.to_le_bytes());
    }

    #[test]
    fn audio_packet_wire_size_matches_config() {
        assert_eq!(AudioPacket::WIRE_SIZE, 8 + 2 * SAMPLES_PER_PACKET);
    }

    #[test]
    fn light_reading_wire_layout() {
        let reading = LightReading { timestamp_ms: 42, level: -513 };
        let bytes = reading.to_bytes();

        assert_eq!(&bytes[..8], &42i64.to_le_bytes());
        assert_eq!(&bytes[8..], &(-513i16).to_le_bytes());
    }

    #[test]
    fn climate_reading_wire_layout() {
        let reading = ClimateReading { timestamp_ms: 7, temperature: 234, humidity: 560 };
        let bytes = reading.to_bytes();

        assert_eq!(&bytes[..8], &7i64.to_le_bytes());
        assert_eq!(&bytes[8..10], &234i16.to_le_bytes());
        assert_eq!(&bytes[10..], &560i16.to_le_bytes());
    }

    #[test]
    fn record_types_have_distinct_sizes() {
        // The transport distinguishes record types by frame length.
        assert_ne!(LightReading::WIRE_SIZE, ClimateReading::WIRE_SIZE);
        assert_ne!(AudioPacket::WIRE_SIZE, LightReading::WIRE_SIZE);
        assert_ne!(AudioPacket::WIRE_SIZE, ClimateReading::WIRE_SIZE);
    }
}
