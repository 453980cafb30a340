// Character display contract consumed by the setup routine.

pub trait TextDisplay {
    type Error: core::fmt::Debug;

    fn init(&mut self) -> Result<(), Self::Error>;

    fn set_backlight(&mut self, on: bool) -> Result<(), Self::Error>;

    fn set_cursor(&mut self, col: u8, row: u8) -> Result<(), Self::Error>;

    /// Write text at the cursor; returns the number of bytes sent.
    fn print(&mut self, text: &str) -> Result<usize, Self::Error>;

    fn print_number(&mut self, value: u32) -> Result<usize, Self::Error> {
        use core::fmt::Write;
        let mut s = crate::fmt::StackFmt::<10>::new();
        let _ = write!(s, "{}", value);
        self.print(s.as_str())
    }
}
