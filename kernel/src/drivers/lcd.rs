// HD44780 character LCD behind a PCF8574 I2C backpack (board-independent)
// Tested layout is the common "YwRobot" 1602 module at 0x27.
//
// Expander pins: P0=RS P1=RW P2=EN P3=backlight P4..P7=D4..D7.
// The controller runs in 4-bit mode; every byte goes out as two
// nibbles, each latched by an EN pulse (three expander writes).

use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::I2c;

use crate::display::TextDisplay;

// expander bits
const RS: u8 = 0x01;
const EN: u8 = 0x04;
const BACKLIGHT: u8 = 0x08;

const ROW_OFFSETS: [u8; 4] = [0x00, 0x40, 0x14, 0x54];

// HD44780 instructions
mod cmd {
    pub const CLEAR_DISPLAY: u8 = 0x01;
    pub const RETURN_HOME: u8 = 0x02;
    pub const ENTRY_MODE_SET: u8 = 0x04;
    pub const DISPLAY_CONTROL: u8 = 0x08;
    pub const FUNCTION_SET: u8 = 0x20;
    pub const SET_DDRAM_ADDR: u8 = 0x80;

    // entry mode
    pub const ENTRY_LEFT: u8 = 0x02;

    // display control
    pub const DISPLAY_ON: u8 = 0x04;

    // function set
    pub const TWO_LINE: u8 = 0x08;
    pub const FONT_5X8: u8 = 0x00;
    pub const FOUR_BIT: u8 = 0x00;
}

pub struct CharLcd<I2C, D> {
    i2c: I2C,
    delay: D,
    addr: u8,
    rows: u8,
    backlight: u8,
}

impl<I2C, D> CharLcd<I2C, D>
where
    I2C: I2c,
    D: DelayNs,
{
    pub fn new(i2c: I2C, delay: D, addr: u8, rows: u8) -> Self {
        Self {
            i2c,
            delay,
            addr,
            rows: rows.max(1),
            backlight: 0,
        }
    }

    pub fn backlight_on(&self) -> bool {
        self.backlight != 0
    }

    // power-up handshake per the HD44780 datasheet, figure 24
    pub fn init(&mut self) -> Result<(), I2C::Error> {
        self.delay.delay_ms(50);
        self.expander_write(0)?;
        self.delay.delay_ms(1000);

        // three times 0x3 forces 8-bit mode from any state, then 0x2 -> 4-bit
        self.write_nibble(0x30)?;
        self.delay.delay_us(4500);
        self.write_nibble(0x30)?;
        self.delay.delay_us(4500);
        self.write_nibble(0x30)?;
        self.delay.delay_us(150);
        self.write_nibble(0x20)?;

        let lines = if self.rows > 1 { cmd::TWO_LINE } else { 0 };
        self.command(cmd::FUNCTION_SET | cmd::FOUR_BIT | lines | cmd::FONT_5X8)?;
        self.command(cmd::DISPLAY_CONTROL | cmd::DISPLAY_ON)?;
        self.clear()?;
        self.command(cmd::ENTRY_MODE_SET | cmd::ENTRY_LEFT)?;
        self.home()
    }

    pub fn set_backlight(&mut self, on: bool) -> Result<(), I2C::Error> {
        self.backlight = if on { BACKLIGHT } else { 0 };
        self.expander_write(0)
    }

    pub fn clear(&mut self) -> Result<(), I2C::Error> {
        self.command(cmd::CLEAR_DISPLAY)?;
        self.delay.delay_us(2000);
        Ok(())
    }

    pub fn home(&mut self) -> Result<(), I2C::Error> {
        self.command(cmd::RETURN_HOME)?;
        self.delay.delay_us(2000);
        Ok(())
    }

    // rows past the geometry land on the last row
    pub fn set_cursor(&mut self, col: u8, row: u8) -> Result<(), I2C::Error> {
        let row = row.min(self.rows - 1).min(ROW_OFFSETS.len() as u8 - 1);
        let addr = col.wrapping_add(ROW_OFFSETS[row as usize]);
        self.command(cmd::SET_DDRAM_ADDR | addr)
    }

    pub fn print(&mut self, text: &str) -> Result<usize, I2C::Error> {
        for &b in text.as_bytes() {
            self.send(b, RS)?;
        }
        Ok(text.len())
    }

    pub fn release(self) -> (I2C, D) {
        (self.i2c, self.delay)
    }

    fn command(&mut self, value: u8) -> Result<(), I2C::Error> {
        self.send(value, 0)
    }

    fn send(&mut self, value: u8, mode: u8) -> Result<(), I2C::Error> {
        self.write_nibble((value & 0xF0) | mode)?;
        self.write_nibble(((value << 4) & 0xF0) | mode)
    }

    fn write_nibble(&mut self, frame: u8) -> Result<(), I2C::Error> {
        self.expander_write(frame)?;
        self.expander_write(frame | EN)?;
        self.delay.delay_us(1);
        self.expander_write(frame & !EN)?;
        // commands need >37us to settle
        self.delay.delay_us(50);
        Ok(())
    }

    fn expander_write(&mut self, frame: u8) -> Result<(), I2C::Error> {
        self.i2c.write(self.addr, &[frame | self.backlight])
    }
}

impl<I2C, D> TextDisplay for CharLcd<I2C, D>
where
    I2C: I2c,
    D: DelayNs,
{
    type Error = I2C::Error;

    fn init(&mut self) -> Result<(), Self::Error> {
        CharLcd::init(self)
    }

    fn set_backlight(&mut self, on: bool) -> Result<(), Self::Error> {
        CharLcd::set_backlight(self, on)
    }

    fn set_cursor(&mut self, col: u8, row: u8) -> Result<(), Self::Error> {
        CharLcd::set_cursor(self, col, row)
    }

    fn print(&mut self, text: &str) -> Result<usize, Self::Error> {
        CharLcd::print(self, text)
    }
}
