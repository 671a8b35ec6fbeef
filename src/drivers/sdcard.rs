//! SD card access over SPI, FAT volume 0.

use embedded_hal_bus::spi::ExclusiveDevice;
use embedded_sdmmc::{
    Error, Mode, SdCard, SdCardError, TimeSource, Timestamp, VolumeIdx, VolumeManager,
};
use esp_hal::{Blocking, delay::Delay, gpio::Output, spi::master::Spi};

/// The card sits alone on the bus, chip select included.
pub type SdSpiDevice = ExclusiveDevice<Spi<'static, Blocking>, Output<'static>, Delay>;

pub type SdError = Error<SdCardError>;

/// There is no RTC on the board, so everything on the card is stamped
/// with the FAT epoch.
struct NoRtc;

impl TimeSource for NoRtc {
    fn get_timestamp(&self) -> Timestamp {
        Timestamp {
            year_since_1970: 0,
            zero_indexed_month: 0,
            zero_indexed_day: 0,
            hours: 0,
            minutes: 0,
            seconds: 0,
        }
    }
}

/// The mounted card: the storage side of the firmware.
///
/// Handles are opened fresh for every write and released before the call
/// returns, so a failed cycle leaves nothing behind for the next one.
pub struct SdStorage {
    volumes: VolumeManager<SdCard<SdSpiDevice, Delay>, NoRtc>,
}

impl SdStorage {
    pub fn new(spi: SdSpiDevice) -> Self {
        Self {
            volumes: VolumeManager::new(SdCard::new(spi, Delay::new()), NoRtc),
        }
    }

    /// Startup check that the card answers and volume 0 carries a FAT
    /// filesystem. Returns the card size for the boot log.
    pub fn mount(&mut self) -> Result<u64, SdError> {
        let size = self.volumes.device().num_bytes().map_err(Error::DeviceError)?;
        self.volumes.open_volume(VolumeIdx(0))?;
        Ok(size)
    }

    /// One create-or-truncate write of `payload` to `name` in the root
    /// directory. The handle chain is dropped (and with it closed) on
    /// every exit path.
    pub fn write_marker(&mut self, name: &str, payload: &[u8]) -> Result<(), SdError> {
        let mut volume = self.volumes.open_volume(VolumeIdx(0))?;
        let mut root = volume.open_root_dir()?;
        let mut file = root.open_file_in_dir(name, Mode::ReadWriteCreateOrTruncate)?;
        file.write(payload)?;
        file.close()
    }
}
