// Storage contract used by the setup routine.
//
// A FileStore hands out at most one open file at a time: the file only
// exists inside with_file(), which borrows the store mutably and closes
// the file before returning. That gives the per-file lifecycle
// CLOSED -> OPEN -> CLOSED with no way to hold two handles at once.

use core::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageError {
    NoCard,
    Volume,
    RootDir,
    Open,
    Write,
    Read,
    Close,
}

impl StorageError {
    pub fn name(self) -> &'static str {
        match self {
            StorageError::NoCard => "no card",
            StorageError::Volume => "open volume failed",
            StorageError::RootDir => "open root dir failed",
            StorageError::Open => "open file failed",
            StorageError::Write => "write failed",
            StorageError::Read => "read failed",
            StorageError::Close => "close failed",
        }
    }

    // failed before a file handle existed
    pub fn is_open_failure(self) -> bool {
        matches!(
            self,
            StorageError::NoCard | StorageError::Volume | StorageError::RootDir | StorageError::Open
        )
    }
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpenMode {
    // create if missing, writes land at the end
    Append,
    ReadOnly,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CardInfo {
    pub bytes: u64,
    // "SD1", "SD2" or "SDHC"; None if the driver could not tell
    pub kind: Option<&'static str>,
}

impl CardInfo {
    pub fn megabytes(&self) -> u64 {
        self.bytes / 1024 / 1024
    }
}

/// An open file. Only reachable inside [`FileStore::with_file`].
pub trait FileIo {
    fn write(&mut self, data: &[u8]) -> Result<(), StorageError>;

    /// Next byte, or `None` at end of file.
    fn read_byte(&mut self) -> Result<Option<u8>, StorageError>;

    /// Bytes left between the cursor and end of file.
    fn available(&self) -> u32;
}

pub trait FileStore {
    /// Low-level presence check: bring the card out of idle and read its size.
    fn probe_card(&mut self) -> Result<CardInfo, StorageError>;

    /// Open the first partition and its root directory.
    fn mount(&mut self) -> Result<(), StorageError>;

    /// Open `name` in the root directory, run `body`, then close the file.
    ///
    /// Errors before `body` runs are open failures; an error after it is
    /// [`StorageError::Close`].
    fn with_file<R>(
        &mut self,
        name: &str,
        mode: OpenMode,
        body: impl FnOnce(&mut dyn FileIo) -> R,
    ) -> Result<R, StorageError>;
}
