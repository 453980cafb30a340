// In-memory stand-ins for the board: a 16x2 text grid, a console that
// records its transcript, and a RAM file store.

#![allow(dead_code)]

use core::fmt;

use embedded_hal::delay::DelayNs;
use lcdsd_kernel::{CardInfo, Console, FileIo, FileStore, OpenMode, StorageError, TextDisplay};

pub struct GridDisplay {
    pub grid: [[u8; 16]; 2],
    pub col: u8,
    pub row: u8,
    pub backlight: bool,
    pub inits: u32,
    // every print as (col, row, text), in order
    pub prints: Vec<(u8, u8, String)>,
}

impl GridDisplay {
    pub fn new() -> Self {
        Self {
            grid: [[b' '; 16]; 2],
            col: 0,
            row: 0,
            backlight: false,
            inits: 0,
            prints: Vec::new(),
        }
    }

    pub fn row(&self, row: usize) -> String {
        String::from_utf8_lossy(&self.grid[row]).trim_end().to_string()
    }
}

impl TextDisplay for GridDisplay {
    type Error = ();

    fn init(&mut self) -> Result<(), ()> {
        self.inits += 1;
        self.grid = [[b' '; 16]; 2];
        self.col = 0;
        self.row = 0;
        Ok(())
    }

    fn set_backlight(&mut self, on: bool) -> Result<(), ()> {
        self.backlight = on;
        Ok(())
    }

    fn set_cursor(&mut self, col: u8, row: u8) -> Result<(), ()> {
        self.col = col;
        self.row = row.min(1);
        Ok(())
    }

    fn print(&mut self, text: &str) -> Result<usize, ()> {
        self.prints.push((self.col, self.row, text.to_string()));
        for &b in text.as_bytes() {
            if (self.col as usize) < 16 {
                self.grid[self.row as usize][self.col as usize] = b;
            }
            self.col = self.col.saturating_add(1);
        }
        Ok(text.len())
    }
}

pub struct TranscriptConsole {
    pub out: Vec<u8>,
    pub ready_after: u32,
    pub polls: u32,
}

impl TranscriptConsole {
    pub fn ready() -> Self {
        Self {
            out: Vec::new(),
            ready_after: 0,
            polls: 0,
        }
    }

    pub fn never_ready() -> Self {
        Self {
            out: Vec::new(),
            ready_after: u32::MAX,
            polls: 0,
        }
    }

    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.out).into_owned()
    }
}

impl fmt::Write for TranscriptConsole {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.out.extend_from_slice(s.as_bytes());
        Ok(())
    }
}

impl Console for TranscriptConsole {
    fn is_ready(&mut self) -> bool {
        self.polls = self.polls.saturating_add(1);
        self.polls > self.ready_after
    }

    fn write_byte(&mut self, byte: u8) -> usize {
        self.out.push(byte);
        1
    }
}

#[derive(Default)]
pub struct NoDelay {
    pub total_ns: u64,
}

impl DelayNs for NoDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.total_ns += ns as u64;
    }
}

pub struct MemStore {
    pub card_present: bool,
    pub mountable: bool,
    pub refuse_open: bool,
    // read_byte reports end of data while available() stays non-zero
    pub stall_reads: bool,
    pub fail_write: bool,
    pub fail_close: bool,
    pub files: Vec<(String, Vec<u8>)>,
    pub opens: Vec<(String, OpenMode)>,
    pub open_now: u32,
}

impl MemStore {
    pub fn fresh_card() -> Self {
        Self {
            card_present: true,
            mountable: true,
            refuse_open: false,
            stall_reads: false,
            fail_write: false,
            fail_close: false,
            files: Vec::new(),
            opens: Vec::new(),
            open_now: 0,
        }
    }

    pub fn no_card() -> Self {
        Self {
            card_present: false,
            mountable: false,
            ..Self::fresh_card()
        }
    }

    pub fn with_contents(mut self, name: &str, data: &[u8]) -> Self {
        self.files.push((name.to_ascii_uppercase(), data.to_vec()));
        self
    }

    pub fn contents(&self, name: &str) -> Option<&[u8]> {
        let key = name.to_ascii_uppercase();
        self.files
            .iter()
            .find(|(n, _)| *n == key)
            .map(|(_, d)| d.as_slice())
    }
}

struct MemFile<'a> {
    data: &'a mut Vec<u8>,
    pos: usize,
    writable: bool,
    stall: bool,
    fail_write: bool,
}

impl FileIo for MemFile<'_> {
    fn write(&mut self, data: &[u8]) -> Result<(), StorageError> {
        if !self.writable || self.fail_write {
            return Err(StorageError::Write);
        }
        self.data.extend_from_slice(data);
        self.pos = self.data.len();
        Ok(())
    }

    fn read_byte(&mut self) -> Result<Option<u8>, StorageError> {
        if self.stall {
            return Ok(None);
        }
        let b = self.data.get(self.pos).copied();
        if b.is_some() {
            self.pos += 1;
        }
        Ok(b)
    }

    fn available(&self) -> u32 {
        (self.data.len() - self.pos) as u32
    }
}

impl FileStore for MemStore {
    fn probe_card(&mut self) -> Result<CardInfo, StorageError> {
        if self.card_present {
            Ok(CardInfo {
                bytes: 2 * 1024 * 1024 * 1024,
                kind: Some("SDHC"),
            })
        } else {
            Err(StorageError::NoCard)
        }
    }

    fn mount(&mut self) -> Result<(), StorageError> {
        if self.mountable {
            Ok(())
        } else {
            Err(StorageError::Volume)
        }
    }

    fn with_file<R>(
        &mut self,
        name: &str,
        mode: OpenMode,
        body: impl FnOnce(&mut dyn FileIo) -> R,
    ) -> Result<R, StorageError> {
        if !self.mountable {
            return Err(StorageError::Volume);
        }
        if self.refuse_open {
            return Err(StorageError::Open);
        }
        assert_eq!(self.open_now, 0, "second file opened while one is open");

        let key = name.to_ascii_uppercase();
        let idx = match self.files.iter().position(|(n, _)| *n == key) {
            Some(i) => i,
            None if mode == OpenMode::Append => {
                self.files.push((key, Vec::new()));
                self.files.len() - 1
            }
            None => return Err(StorageError::Open),
        };

        self.opens.push((name.to_string(), mode));
        self.open_now += 1;
        let stall = self.stall_reads;
        let fail_write = self.fail_write;
        let data = &mut self.files[idx].1;
        let pos = if mode == OpenMode::Append { data.len() } else { 0 };
        let mut file = MemFile {
            data,
            pos,
            writable: mode == OpenMode::Append,
            stall,
            fail_write,
        };
        let out = body(&mut file);
        self.open_now -= 1;
        if self.fail_close && mode == OpenMode::Append {
            return Err(StorageError::Close);
        }
        Ok(out)
    }
}
