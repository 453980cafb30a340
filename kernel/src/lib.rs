// LCD + SD card sketch kernel: board-independent pieces of the firmware.
//
// Everything here talks to hardware through embedded-hal traits and
// embedded-sdmmc, so the whole setup routine runs on the host in tests.

#![cfg_attr(not(test), no_std)]

pub mod config;
pub mod console;
pub mod display;
pub mod drivers;
pub mod fmt;
pub mod sketch;
pub mod storage;

pub use config::{LcdEcho, ReadyWait, SketchConfig, StorageGate};
pub use console::Console;
pub use display::TextDisplay;
pub use sketch::{SetupReport, run_setup};
pub use storage::{CardInfo, FileIo, FileStore, OpenMode, StorageError};
