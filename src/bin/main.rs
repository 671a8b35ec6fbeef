#![no_std]
#![no_main]
#![deny(
    clippy::mem_forget,
    reason = "mem::forget is generally not safe to do with esp_hal types, especially those \
    holding buffers for the duration of a data transfer."
)]

use defmt::{error, info};
use embassy_executor::Spawner;
use embedded_hal_bus::spi::ExclusiveDevice;
#[cfg(feature = "defmt")]
use esp_backtrace as _;
use esp_hal::{
    Config,
    clock::CpuClock,
    delay::Delay,
    gpio::{Level, Output, OutputConfig},
    spi::master::{Config as SpiConfig, Spi},
    time::Rate,
    timer::systimer::SystemTimer,
};
use panic_rtt_target as _;
use press_marker::{
    STORAGE,
    drivers::{button, sdcard::SdStorage},
};

// This creates a default app-descriptor required by the esp-idf bootloader.
// For more information see: <https://docs.espressif.com/projects/esp-idf/en/stable/esp32/api-reference/system/app_image_format.html#application-description>
esp_bootloader_esp_idf::esp_app_desc!();

#[esp_hal_embassy::main]
async fn main(spawner: Spawner) {
    #[cfg(all(feature = "rtt", feature = "defmt"))]
    rtt_target::rtt_init_defmt!();

    let peripherals = esp_hal::init(Config::default().with_cpu_clock(CpuClock::max()));
    let timer0 = SystemTimer::new(peripherals.SYSTIMER);
    esp_hal_embassy::init(timer0.alarm0);

    // SPI bus to the SD card slot. The clock stays at the card's
    // initialisation rate; the marker write is a handful of bytes.
    let spi = Spi::new(
        peripherals.SPI2,
        SpiConfig::default().with_frequency(Rate::from_khz(400)),
    )
    .expect("Failed to configure SPI2")
    .with_sck(peripherals.GPIO4)
    .with_mosi(peripherals.GPIO5)
    .with_miso(peripherals.GPIO6);
    let sd_cs = Output::new(peripherals.GPIO7, Level::High, OutputConfig::default());
    let sd_spi = ExclusiveDevice::new(spi, sd_cs, Delay::new())
        .expect("Failed to claim the SPI bus for the SD card");

    let mut storage = SdStorage::new(sd_spi);
    match storage.mount() {
        Ok(size) => info!("MAIN: SD card mounted, {} bytes", size),
        Err(e) => {
            error!("MAIN: SD mount failed: {}", e);
            panic!("no storage to log presses to");
        }
    }
    STORAGE.lock().await.replace(storage);

    // Button on GPIO3 with the internal pull-up; rising edges fire the
    // gate, which spawns one logger task per accepted press.
    button::install(peripherals.IO_MUX, peripherals.GPIO3, spawner.make_send());

    info!("MAIN: Ready, waiting for presses");
}
