// The one-shot setup routine
//
// greeting -> console wait -> card probe -> mount -> append line ->
// read back and echo. Runs once at power-on; the caller idles after.
//
// Nothing here aborts: every failure becomes a console line and an
// entry in SetupReport. Display errors are only logged.

use core::fmt::Write;

use embedded_hal::delay::DelayNs;
use log::{info, warn};

use crate::config::{LcdEcho, SketchConfig, StorageGate};
use crate::console::{self, Console};
use crate::display::TextDisplay;
use crate::storage::{CardInfo, FileIo, FileStore, OpenMode, StorageError};

/// What each step of [`run_setup`] came to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SetupReport {
    pub console_ready: bool,
    pub card: Result<CardInfo, StorageError>,
    pub mount: Result<(), StorageError>,
    /// `None` when the storage gate skipped file operations.
    pub write: Option<Result<(), StorageError>>,
    /// Bytes echoed on success.
    pub read: Option<Result<usize, StorageError>>,
}

impl SetupReport {
    pub fn skipped_files(&self) -> bool {
        self.write.is_none() && self.read.is_none()
    }
}

pub fn run_setup<L, C, S, D>(
    cfg: &SketchConfig,
    lcd: &mut L,
    console: &mut C,
    storage: &mut S,
    delay: &mut D,
) -> SetupReport
where
    L: TextDisplay,
    C: Console,
    S: FileStore,
    D: DelayNs,
{
    greet(cfg, lcd);
    info!("lcd greeting shown.");

    info!("console: {} baud, waiting for ready", cfg.console_baud);
    let console_ready = console::wait_ready(console, delay, cfg.console_wait);

    let _ = console.write_str("Initializing SD card...\n");
    let card = storage.probe_card();
    match card {
        Ok(_) => {
            let _ = console.write_str("Wiring is correct and a card is present.\n");
        }
        Err(_) => {
            let _ = console.write_str("SD initialisation failed \n");
        }
    }

    let mount = storage.mount();
    match mount {
        Ok(()) => {
            info!("volume mounted.");
            let _ = console.write_str("Volume mounted.\n");
        }
        Err(e) => {
            warn!("mount failed: {}", e);
            let _ = console.write_str("Volume mount failed.\n");
        }
    }

    if cfg.storage_gate == StorageGate::RequireMount && mount.is_err() {
        let _ = console.write_str("skipping file operations\n");
        return SetupReport {
            console_ready,
            card,
            mount,
            write: None,
            read: None,
        };
    }

    let write = append_line(cfg, console, storage);
    let read = read_back(cfg, lcd, console, storage);
    info!("setup done.");

    SetupReport {
        console_ready,
        card,
        mount,
        write: Some(write),
        read: Some(read),
    }
}

fn greet<L: TextDisplay>(cfg: &SketchConfig, lcd: &mut L) {
    lcd_step(lcd.init(), "init");
    lcd_step(lcd.set_backlight(true), "backlight");
    for (row, line) in cfg.greeting.iter().enumerate() {
        lcd_step(lcd.set_cursor(0, row as u8), "set cursor");
        lcd_step(lcd.print(line).map(|_| ()), "print");
    }
}

fn lcd_step<E: core::fmt::Debug>(res: Result<(), E>, what: &str) {
    if let Err(e) = res {
        warn!("lcd {}: {:?}", what, e);
    }
}

fn append_line<C, S>(cfg: &SketchConfig, console: &mut C, storage: &mut S) -> Result<(), StorageError>
where
    C: Console,
    S: FileStore,
{
    let name = cfg.file_name;
    let res = storage
        .with_file(name, OpenMode::Append, |file| {
            let _ = write!(console, "Writing to {}...", name);
            file.write(cfg.file_line.as_bytes())
        })
        .and_then(|inner| inner);

    match res {
        Ok(()) => {
            info!("{}: appended {} bytes", name, cfg.file_line.len());
            let _ = console.write_str("done.\r\n");
        }
        Err(e) => report_file_error(console, name, e),
    }
    res
}

fn read_back<L, C, S>(
    cfg: &SketchConfig,
    lcd: &mut L,
    console: &mut C,
    storage: &mut S,
) -> Result<usize, StorageError>
where
    L: TextDisplay,
    C: Console,
    S: FileStore,
{
    let name = cfg.file_name;
    let res = storage
        .with_file(name, OpenMode::ReadOnly, |file| {
            let _ = write!(console, "{}:\r\n", name);
            echo_file(file, cfg.lcd_echo, lcd, console)
        })
        .and_then(|inner| inner);

    match res {
        Ok(n) => info!("{}: echoed {} bytes", name, n),
        Err(e) => report_file_error(console, name, e),
    }
    res
}

// drain the file one byte at a time through the console; stops at the
// reported end or when a read comes back empty
fn echo_file<L, C>(
    file: &mut dyn FileIo,
    mode: LcdEcho,
    lcd: &mut L,
    console: &mut C,
) -> Result<usize, StorageError>
where
    L: TextDisplay,
    C: Console,
{
    let mut echoed = 0usize;
    while file.available() > 0 {
        let Some(byte) = file.read_byte()? else {
            break;
        };
        let accepted = console.write_byte(byte);
        echo_on_lcd(lcd, mode, byte, accepted);
        echoed += 1;
    }
    Ok(echoed)
}

fn echo_on_lcd<L: TextDisplay>(lcd: &mut L, mode: LcdEcho, byte: u8, accepted: usize) {
    lcd_step(lcd.set_cursor(0, 0), "set cursor");
    match mode {
        LcdEcho::WriteResult => {
            lcd_step(lcd.print_number(accepted as u32).map(|_| ()), "print");
        }
        LcdEcho::Byte => {
            if byte.is_ascii_graphic() || byte == b' ' {
                let buf = [byte];
                if let Ok(s) = core::str::from_utf8(&buf) {
                    lcd_step(lcd.print(s).map(|_| ()), "print");
                }
            }
        }
    }
}

fn report_file_error<C: Console>(console: &mut C, name: &str, e: StorageError) {
    warn!("{}: {}", name, e);
    let verb = if e.is_open_failure() {
        "opening"
    } else {
        match e {
            StorageError::Write => "writing",
            StorageError::Read => "reading",
            _ => "closing",
        }
    };
    let _ = write!(console, "error {} {}\r\n", verb, name);
}
