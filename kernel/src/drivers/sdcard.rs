// SD card over SPI
//
// The card stays bare until probe_card() has read its size; the first
// mount() or file op then moves it into a FatStore for good.

use embedded_hal::delay::DelayNs;
use embedded_hal::spi::SpiDevice;
use embedded_sdmmc::{SdCard, sdcard::CardType};
use log::{info, warn};

use super::fat::FatStore;
use crate::storage::{CardInfo, FileIo, FileStore, OpenMode, StorageError};

// sd card initialization frequency (Hz); the bus stays at this rate
pub const SD_INIT_FREQ_HZ: u32 = 400_000;

pub struct SdStorage<SPI, DELAY>
where
    SPI: SpiDevice,
    DELAY: DelayNs,
{
    card: Option<SdCard<SPI, DELAY>>,
    fat: Option<FatStore<SdCard<SPI, DELAY>>>,
}

impl<SPI, DELAY> SdStorage<SPI, DELAY>
where
    SPI: SpiDevice,
    DELAY: DelayNs,
{
    // no bus traffic until probe_card() or mount()
    pub fn new(spi: SPI, delay: DELAY) -> Self {
        Self {
            card: Some(SdCard::new(spi, delay)),
            fat: None,
        }
    }

    fn fat(&mut self) -> Result<&FatStore<SdCard<SPI, DELAY>>, StorageError> {
        if let Some(card) = self.card.take() {
            self.fat = Some(FatStore::new(card));
        }
        self.fat.as_ref().ok_or(StorageError::NoCard)
    }
}

fn card_kind(kind: Option<CardType>) -> Option<&'static str> {
    kind.map(|k| match k {
        CardType::SD1 => "SD1",
        CardType::SD2 => "SD2",
        CardType::SDHC => "SDHC",
    })
}

impl<SPI, DELAY> FileStore for SdStorage<SPI, DELAY>
where
    SPI: SpiDevice,
    DELAY: DelayNs,
{
    fn probe_card(&mut self) -> Result<CardInfo, StorageError> {
        let Some(card) = self.card.as_ref() else {
            // already handed to the volume manager; it owns the bus now
            return Err(StorageError::NoCard);
        };

        // triggers the SD init sequence (CMD0, CMD8, ACMD41, ...)
        match card.num_bytes() {
            Ok(bytes) => {
                let info = CardInfo {
                    bytes,
                    kind: card_kind(card.get_card_type()),
                };
                info!("SD card: {} bytes ({} MB)", bytes, info.megabytes());
                Ok(info)
            }
            Err(e) => {
                warn!("SD card probe failed: {:?}", e);
                Err(StorageError::NoCard)
            }
        }
    }

    fn mount(&mut self) -> Result<(), StorageError> {
        self.fat()?.mount()
    }

    fn with_file<R>(
        &mut self,
        name: &str,
        mode: OpenMode,
        body: impl FnOnce(&mut dyn FileIo) -> R,
    ) -> Result<R, StorageError> {
        self.fat()?.with_file(name, mode, body)
    }
}
