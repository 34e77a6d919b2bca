// NoiseNode — I2S MEMS Microphone Driver
//
// Standard-mode I2S RX at the configured sample rate. The DMA engine paces
// acquisition, so one blocking read per packet yields samples at exactly
// 1 / SAMPLE_RATE_HZ spacing without any software timing. The microphone
// delivers its 24 significant bits left-aligned in 32-bit frames; the top 16
// bits become the i16 stream sample.

use std::time::Duration;

use esp_idf_hal::delay::TickType;
use esp_idf_hal::gpio::{AnyIOPin, InputPin, OutputPin};
use esp_idf_hal::i2s::config::{DataBitWidth, StdConfig};
use esp_idf_hal::i2s::{I2s, I2sDriver, I2sRx};
use esp_idf_hal::peripheral::Peripheral;

use crate::config::{I2S_READ_TIMEOUT_MS, SAMPLE_RATE_HZ, SAMPLES_PER_PACKET};
use crate::sensors::SampleSource;

pub struct I2sMicrophone<'d> {
    driver: I2sDriver<'d, I2sRx>,
    raw: Vec<u8>,
}

impl<'d> I2sMicrophone<'d> {
    pub fn new(
        i2s: impl Peripheral<P = impl I2s> + 'd,
        bclk: impl Peripheral<P = impl InputPin + OutputPin> + 'd,
        din: impl Peripheral<P = impl InputPin> + 'd,
        ws: impl Peripheral<P = impl InputPin + OutputPin> + 'd,
    ) -> anyhow::Result<Self> {
        let config = StdConfig::philips(SAMPLE_RATE_HZ, DataBitWidth::Bits32);
        let mut driver = I2sDriver::new_std_rx(i2s, &config, bclk, din, AnyIOPin::none(), ws)?;
        driver.rx_enable()?;

        log::info!(
            "I2S microphone up ({} Hz, 32-bit frames, {} samples/packet)",
            SAMPLE_RATE_HZ,
            SAMPLES_PER_PACKET
        );

        Ok(Self { driver, raw: vec![0u8; SAMPLES_PER_PACKET * 4] })
    }
}

impl SampleSource for I2sMicrophone<'_> {
    fn read_samples(&mut self, out: &mut [i16]) -> anyhow::Result<usize> {
        let want_bytes = out.len() * 4;
        if self.raw.len() < want_bytes {
            self.raw.resize(want_bytes, 0);
        }

        let timeout = TickType::from(Duration::from_millis(I2S_READ_TIMEOUT_MS)).0;
        let got_bytes = self.driver.read(&mut self.raw[..want_bytes], timeout)?;

        let count = got_bytes / 4;
        for (slot, frame) in out.iter_mut().zip(self.raw[..count * 4].chunks_exact(4)) {
            let raw = i32::from_le_bytes([frame[0], frame[1], frame[2], frame[3]]);
            *slot = (raw >> 16) as i16;
        }
        Ok(count)
    }
}
