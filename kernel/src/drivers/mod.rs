// Chip-level and protocol-level drivers, board-independent.
//
// Only pin assignments and bus wiring (in the firmware's board/) are
// board-specific.

pub mod fat;
pub mod lcd;
pub mod sdcard;

pub use fat::{FatStore, FixedTimeSource};
pub use lcd::CharLcd;
pub use sdcard::SdStorage;
