// FAT volume on any block device
// No RTC on the board; timestamps are fixed to 2025-01-01.
//
// Volume and root dir are reopened per call and dropped at the end of
// it: embedded-sdmmc handles borrow the VolumeManager, so they cannot
// be parked next to it for the program lifetime.

use embedded_sdmmc::{
    BlockDevice, File, Mode, TimeSource, Timestamp, VolumeIdx, VolumeManager,
};
use log::{info, warn};

use crate::storage::{CardInfo, FileIo, FileStore, OpenMode, StorageError};

pub const BLOCK_LEN: u64 = 512;

#[derive(Default, Clone, Copy)]
pub struct FixedTimeSource;

impl TimeSource for FixedTimeSource {
    fn get_timestamp(&self) -> Timestamp {
        Timestamp {
            year_since_1970: 55,
            zero_indexed_month: 0,
            zero_indexed_day: 0,
            hours: 0,
            minutes: 0,
            seconds: 0,
        }
    }
}

pub struct FatStore<D>
where
    D: BlockDevice,
{
    volume_mgr: VolumeManager<D, FixedTimeSource>,
    // read before the device went into the manager
    blocks: Option<u32>,
}

impl<D> FatStore<D>
where
    D: BlockDevice,
{
    pub fn new(device: D) -> Self {
        let blocks = match device.num_blocks() {
            Ok(count) => Some(count.0),
            Err(e) => {
                warn!("block count: {:?}", e);
                None
            }
        };
        Self {
            volume_mgr: VolumeManager::new(device, FixedTimeSource),
            blocks,
        }
    }

    pub fn mount(&self) -> Result<(), StorageError> {
        let volume = self.volume_mgr.open_volume(VolumeIdx(0)).map_err(|e| {
            warn!("open volume: {:?}", e);
            StorageError::Volume
        })?;
        let _root = volume.open_root_dir().map_err(|e| {
            warn!("open root dir: {:?}", e);
            StorageError::RootDir
        })?;
        Ok(())
    }

    pub fn with_file<R>(
        &self,
        name: &str,
        mode: OpenMode,
        body: impl FnOnce(&mut dyn FileIo) -> R,
    ) -> Result<R, StorageError> {
        let mode = match mode {
            OpenMode::Append => Mode::ReadWriteCreateOrAppend,
            OpenMode::ReadOnly => Mode::ReadOnly,
        };

        let volume = self
            .volume_mgr
            .open_volume(VolumeIdx(0))
            .map_err(|_| StorageError::Volume)?;
        let root = volume.open_root_dir().map_err(|_| StorageError::RootDir)?;
        let file = root.open_file_in_dir(name, mode).map_err(|e| {
            warn!("open {}: {:?}", name, e);
            StorageError::Open
        })?;

        let mut handle = FatFile { file: &file };
        let out = body(&mut handle);

        file.close().map_err(|e| {
            warn!("close {}: {:?}", name, e);
            StorageError::Close
        })?;
        Ok(out)
    }
}

// Generic block devices carry no card type; size comes from the block
// count taken at construction.
impl<D> FileStore for FatStore<D>
where
    D: BlockDevice,
{
    fn probe_card(&mut self) -> Result<CardInfo, StorageError> {
        let blocks = self.blocks.ok_or(StorageError::NoCard)?;
        let info = CardInfo {
            bytes: blocks as u64 * BLOCK_LEN,
            kind: None,
        };
        info!("block device: {} bytes ({} MB)", info.bytes, info.megabytes());
        Ok(info)
    }

    fn mount(&mut self) -> Result<(), StorageError> {
        FatStore::mount(self)
    }

    fn with_file<R>(
        &mut self,
        name: &str,
        mode: OpenMode,
        body: impl FnOnce(&mut dyn FileIo) -> R,
    ) -> Result<R, StorageError> {
        FatStore::with_file(self, name, mode, body)
    }
}

struct FatFile<'f, 'v, D, T, const DIRS: usize, const FILES: usize, const VOLS: usize>
where
    D: BlockDevice,
    T: TimeSource,
{
    file: &'f File<'v, D, T, DIRS, FILES, VOLS>,
}

impl<D, T, const DIRS: usize, const FILES: usize, const VOLS: usize> FileIo
    for FatFile<'_, '_, D, T, DIRS, FILES, VOLS>
where
    D: BlockDevice,
    T: TimeSource,
{
    fn write(&mut self, data: &[u8]) -> Result<(), StorageError> {
        if data.is_empty() {
            return Ok(());
        }
        self.file.write(data).map_err(|_| StorageError::Write)?;
        self.file.flush().map_err(|_| StorageError::Write)
    }

    fn read_byte(&mut self) -> Result<Option<u8>, StorageError> {
        if self.file.is_eof() {
            return Ok(None);
        }
        let mut buf = [0u8; 1];
        let n = self.file.read(&mut buf).map_err(|_| StorageError::Read)?;
        Ok(if n == 0 { None } else { Some(buf[0]) })
    }

    fn available(&self) -> u32 {
        self.file.length().saturating_sub(self.file.offset())
    }
}
