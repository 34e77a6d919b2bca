// NoiseNode — WiFi Station Bring-up
//
// Blocking STA association. Failure here is fatal for boot: without the
// network there is nothing for the node to do.

use anyhow::Context;
use esp_idf_hal::modem::Modem;
use esp_idf_svc::eventloop::EspSystemEventLoop;
use esp_idf_svc::nvs::EspDefaultNvsPartition;
use esp_idf_svc::wifi::{AuthMethod, BlockingWifi, ClientConfiguration, Configuration, EspWifi};

use crate::config::{WIFI_PASS, WIFI_SSID};

/// Associate with the configured access point and wait for an IP.
/// The returned handle must be kept alive for the programme duration.
pub fn connect(
    modem: Modem,
    sysloop: EspSystemEventLoop,
    nvs: EspDefaultNvsPartition,
) -> anyhow::Result<BlockingWifi<EspWifi<'static>>> {
    let mut wifi = BlockingWifi::wrap(EspWifi::new(modem, sysloop.clone(), Some(nvs))?, sysloop)?;

    let auth_method = if WIFI_PASS.is_empty() {
        AuthMethod::None
    } else {
        AuthMethod::WPA2Personal
    };

    wifi.set_configuration(&Configuration::Client(ClientConfiguration {
        ssid: WIFI_SSID.try_into().map_err(|_| anyhow::anyhow!("SSID too long"))?,
        password: WIFI_PASS.try_into().map_err(|_| anyhow::anyhow!("password too long"))?,
        auth_method,
        ..Default::default()
    }))?;

    wifi.start().context("wifi start")?;
    wifi.connect().context("wifi connect")?;
    wifi.wait_netif_up().context("wifi netif up")?;

    let ip_info = wifi.wifi().sta_netif().get_ip_info()?;
    log::info!("WiFi connected to '{}' — IP {}", WIFI_SSID, ip_info.ip);

    Ok(wifi)
}
