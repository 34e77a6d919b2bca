// NoiseNode — LDR Light Sensor Driver
//
// Raw ESP-IDF oneshot ADC on ADC1. Constructed inside the light task so the
// unit handle never crosses threads.

use crate::config::ADC_CHANNEL_LDR;
use crate::sensors::LightSource;

pub struct LdrSensor {
    handle: esp_idf_sys::adc_oneshot_unit_handle_t,
    channel: esp_idf_sys::adc_channel_t,
}

impl LdrSensor {
    /// Initialise ADC1 with 12 dB attenuation (full 0–3.3 V range) on the
    /// LDR channel.
    pub fn new() -> anyhow::Result<Self> {
        unsafe {
            let mut handle: esp_idf_sys::adc_oneshot_unit_handle_t = core::ptr::null_mut();
            let unit_cfg = esp_idf_sys::adc_oneshot_unit_init_cfg_t {
                unit_id: esp_idf_sys::adc_unit_t_ADC_UNIT_1,
                ulp_mode: esp_idf_sys::adc_ulp_mode_t_ADC_ULP_MODE_DISABLE,
                ..core::mem::zeroed()
            };
            let ret = esp_idf_sys::adc_oneshot_new_unit(&unit_cfg, &mut handle);
            if ret != esp_idf_sys::ESP_OK {
                anyhow::bail!("ADC unit init failed ({ret})");
            }

            let chan_cfg = esp_idf_sys::adc_oneshot_chan_cfg_t {
                atten: esp_idf_sys::adc_atten_t_ADC_ATTEN_DB_12,
                bitwidth: esp_idf_sys::adc_bitwidth_t_ADC_BITWIDTH_12,
            };
            let channel = ADC_CHANNEL_LDR as esp_idf_sys::adc_channel_t;
            let ret = esp_idf_sys::adc_oneshot_config_channel(handle, channel, &chan_cfg);
            if ret != esp_idf_sys::ESP_OK {
                anyhow::bail!("ADC channel config failed ({ret})");
            }

            Ok(Self { handle, channel })
        }
    }
}

impl LightSource for LdrSensor {
    fn read_level(&mut self) -> anyhow::Result<i16> {
        let mut raw: i32 = 0;
        let ret = unsafe { esp_idf_sys::adc_oneshot_read(self.handle, self.channel, &mut raw) };
        if ret != esp_idf_sys::ESP_OK {
            anyhow::bail!("ADC read failed ({ret})");
        }
        // 12-bit reading, always fits.
        Ok(raw as i16)
    }
}
