// NoiseNode — DHT11 Temperature/Humidity Driver
//
// Single-wire bit-bang protocol: host pulls the line low ≥ 18 ms, the sensor
// answers with an 80 µs low / 80 µs high preamble and then 40 bits, each a
// 50 µs low followed by a high whose width encodes the bit (~27 µs = 0,
// ~70 µs = 1). Scheduling jitter can corrupt a read; the checksum catches it
// and the caller just skips that cycle.

use crate::sensors::ClimateSource;

pub struct DhtSensor {
    pin: i32,
}

impl DhtSensor {
    pub fn new(pin: i32) -> Self {
        unsafe {
            esp_idf_sys::gpio_set_direction(pin, esp_idf_sys::gpio_mode_t_GPIO_MODE_INPUT);
            esp_idf_sys::gpio_set_pull_mode(pin, esp_idf_sys::gpio_pull_mode_t_GPIO_PULLUP_ONLY);
        }
        Self { pin }
    }

    /// Busy-wait until the line reaches `level`, up to `timeout_us`.
    /// Returns the time waited in µs.
    unsafe fn wait_level(&self, level: u32, timeout_us: i64) -> anyhow::Result<i64> {
        let start = esp_idf_sys::esp_timer_get_time();
        while esp_idf_sys::gpio_get_level(self.pin) as u32 != level {
            let waited = esp_idf_sys::esp_timer_get_time() - start;
            if waited > timeout_us {
                anyhow::bail!("DHT timeout waiting for level {level}");
            }
        }
        Ok(esp_idf_sys::esp_timer_get_time() - start)
    }

    unsafe fn read_raw(&self) -> anyhow::Result<[u8; 5]> {
        // Start signal: drive low ≥ 18 ms, then release the line.
        esp_idf_sys::gpio_set_direction(self.pin, esp_idf_sys::gpio_mode_t_GPIO_MODE_OUTPUT_OD);
        esp_idf_sys::gpio_set_level(self.pin, 0);
        std::thread::sleep(std::time::Duration::from_millis(20));
        esp_idf_sys::gpio_set_level(self.pin, 1);
        esp_idf_sys::gpio_set_direction(self.pin, esp_idf_sys::gpio_mode_t_GPIO_MODE_INPUT);

        // Response preamble: low then high, ~80 µs each.
        self.wait_level(0, 100)?;
        self.wait_level(1, 100)?;
        self.wait_level(0, 100)?;

        let mut data = [0u8; 5];
        for bit in 0..40 {
            self.wait_level(1, 80)?; // end of the 50 µs inter-bit low
            let high_us = self.wait_level(0, 100)?;
            if high_us > 40 {
                data[bit / 8] |= 1 << (7 - bit % 8);
            }
        }
        Ok(data)
    }
}

impl ClimateSource for DhtSensor {
    /// One measurement as (temperature, humidity) in tenths.
    fn read_climate(&mut self) -> anyhow::Result<(i16, i16)> {
        let data = unsafe { self.read_raw()? };

        let checksum = data[0]
            .wrapping_add(data[1])
            .wrapping_add(data[2])
            .wrapping_add(data[3]);
        if checksum != data[4] {
            anyhow::bail!("DHT checksum mismatch");
        }

        // DHT11: integral + decimal bytes for humidity then temperature.
        let humidity = data[0] as i16 * 10 + data[1] as i16;
        let temperature = data[2] as i16 * 10 + data[3] as i16;
        Ok((temperature, humidity))
    }
}
