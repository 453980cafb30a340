//! ESP32-C3 board wiring for the LCD + SD sketch.
//!
//! Maps the physical hardware to named subsystems so the sketch itself
//! never needs GPIO numbers or peripheral details. Pin choices are
//! listed in [`pins`].

pub mod console;
pub mod pins;

pub use console::SerialConsole;

use embedded_hal_bus::spi::ExclusiveDevice;
use esp_hal::{
    Blocking,
    delay::Delay,
    gpio::{Level, Output, OutputConfig},
    i2c,
    peripherals::Peripherals,
    spi,
    time::Rate,
    uart,
};
use lcdsd_kernel::SketchConfig;
use lcdsd_kernel::drivers::sdcard::SD_INIT_FREQ_HZ;
use lcdsd_kernel::drivers::{CharLcd, SdStorage};
use log::info;

// Type Aliases
pub type I2cBus = i2c::master::I2c<'static, Blocking>;
pub type Lcd = CharLcd<I2cBus, Delay>;
pub type SpiBus = spi::master::Spi<'static, Blocking>;
pub type SdSpi = ExclusiveDevice<SpiBus, Output<'static>, Delay>;
pub type Sd = SdStorage<SdSpi, Delay>;

/// Complete board hardware. Built once at boot and never torn down.
pub struct Board {
    pub lcd: Lcd,
    pub console: SerialConsole,
    pub sd: Sd,
}

impl Board {
    pub fn init(p: Peripherals, cfg: &SketchConfig) -> Result<Self, &'static str> {
        // LCD backpack on I2C0
        let i2c_cfg =
            i2c::master::Config::default().with_frequency(Rate::from_khz(pins::LCD_I2C_KHZ));
        let i2c = i2c::master::I2c::new(p.I2C0, i2c_cfg)
            .map_err(|_| "i2c config rejected")?
            .with_sda(p.GPIO4)
            .with_scl(p.GPIO5);
        let lcd = CharLcd::new(i2c, Delay::new(), cfg.lcd_addr, cfg.lcd_rows);
        info!(
            "lcd: i2c0 sda={} scl={} addr={:#04x} {}x{}",
            pins::LCD_SDA,
            pins::LCD_SCL,
            cfg.lcd_addr,
            cfg.lcd_cols,
            cfg.lcd_rows
        );

        // console on UART1
        let uart_cfg = uart::Config::default().with_baudrate(cfg.console_baud);
        let uart = uart::Uart::new(p.UART1, uart_cfg)
            .map_err(|_| "uart config rejected")?
            .with_tx(p.GPIO0)
            .with_rx(p.GPIO1);
        let console = SerialConsole::new(uart);
        info!(
            "console: uart1 tx={} rx={} {} baud",
            pins::CONSOLE_TX,
            pins::CONSOLE_RX,
            cfg.console_baud
        );

        // SD card on SPI2, kept at init speed
        let cs = Output::new(p.GPIO10, Level::High, OutputConfig::default());
        let spi_cfg =
            spi::master::Config::default().with_frequency(Rate::from_hz(SD_INIT_FREQ_HZ));
        let spi_bus = spi::master::Spi::new(p.SPI2, spi_cfg)
            .map_err(|_| "spi config rejected")?
            .with_sck(p.GPIO6)
            .with_mosi(p.GPIO7)
            .with_miso(p.GPIO2);
        let spi_dev =
            ExclusiveDevice::new(spi_bus, cs, Delay::new()).map_err(|_| "sd chip select")?;
        let sd = SdStorage::new(spi_dev, Delay::new());
        info!(
            "sd: spi2 sck={} mosi={} miso={} cs={} {}kHz",
            pins::SPI_SCK,
            pins::SPI_MOSI,
            pins::SPI_MISO,
            pins::SD_CS,
            SD_INIT_FREQ_HZ / 1000
        );

        Ok(Board { lcd, console, sd })
    }
}
