// Sketch console on UART1.
//
// A UART has no host-side handshake (no DTR like native USB CDC), so
// the port counts as ready as soon as it is configured.

use core::fmt;

use esp_hal::Blocking;
use esp_hal::uart::Uart;
use lcdsd_kernel::Console;

pub struct SerialConsole {
    uart: Uart<'static, Blocking>,
}

impl SerialConsole {
    pub fn new(uart: Uart<'static, Blocking>) -> Self {
        Self { uart }
    }

    fn write_all(&mut self, mut data: &[u8]) -> fmt::Result {
        while !data.is_empty() {
            match self.uart.write(data) {
                Ok(0) | Err(_) => return Err(fmt::Error),
                Ok(n) => data = &data[n..],
            }
        }
        Ok(())
    }
}

impl fmt::Write for SerialConsole {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.write_all(s.as_bytes())
    }
}

impl Console for SerialConsole {
    fn is_ready(&mut self) -> bool {
        true
    }

    fn write_byte(&mut self, byte: u8) -> usize {
        self.uart.write(&[byte]).unwrap_or(0)
    }
}
