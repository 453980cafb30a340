//! GPIO |     Function    |      Notes
//! -----+-----------------+----------------------------------
//!  0   | UART1 TX        | Sketch console, 9600 baud
//!  1   | UART1 RX        | Unused by the sketch
//!  2   | SPI2 MISO       | SD card data out
//!  4   | I2C0 SDA        | PCF8574 LCD backpack, 0x27
//!  5   | I2C0 SCL        |
//!  6   | SPI2 SCK        |
//!  7   | SPI2 MOSI       |
//! 10   | SD CS           | SD card chip select

// ----- Character LCD -----
pub const LCD_SDA: u8 = 4;
pub const LCD_SCL: u8 = 5;
pub const LCD_I2C_KHZ: u32 = 100;

// ----- SD Card -----
pub const SD_CS: u8 = 10;
pub const SPI_SCK: u8 = 6;
pub const SPI_MOSI: u8 = 7;
pub const SPI_MISO: u8 = 2;

// ----- Console -----
pub const CONSOLE_TX: u8 = 0;
pub const CONSOLE_RX: u8 = 1;
