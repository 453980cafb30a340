// Compile-time sketch configuration.
//
// SketchConfig::DEFAULT reproduces the stock 1602 + SD shield sketch; the
// with_* builders adjust single knobs, esp_hal::Config style.

/// How long to wait for the serial console before carrying on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadyWait {
    /// Poll with no timeout. Never returns if the console never comes up.
    Forever,
    Bounded { timeout_ms: u32, poll_ms: u32 },
}

/// What to do with file operations when storage init failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageGate {
    /// Attempt them anyway; each one fails on its own and reports it.
    Attempt,
    /// Skip them when the mount failed.
    RequireMount,
}

/// What the display shows for each byte echoed during read-back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LcdEcho {
    /// The console write's return value (bytes accepted), not the byte.
    WriteResult,
    /// The byte itself when it is printable ASCII.
    Byte,
}

#[derive(Debug, Clone, Copy)]
pub struct SketchConfig {
    pub lcd_addr: u8,
    pub lcd_cols: u8,
    pub lcd_rows: u8,
    pub greeting: [&'static str; 2],
    pub console_baud: u32,
    pub console_wait: ReadyWait,
    pub file_name: &'static str,
    pub file_line: &'static str,
    pub storage_gate: StorageGate,
    pub lcd_echo: LcdEcho,
}

impl SketchConfig {
    pub const DEFAULT: Self = Self {
        lcd_addr: 0x27,
        lcd_cols: 16,
        lcd_rows: 2,
        greeting: ["Hello everybody", "bruh"],
        console_baud: 9600,
        console_wait: ReadyWait::Forever,
        file_name: "test.txt",
        file_line: "testing 1, 2, 3.\n",
        storage_gate: StorageGate::Attempt,
        lcd_echo: LcdEcho::WriteResult,
    };

    pub const fn with_console_wait(mut self, wait: ReadyWait) -> Self {
        self.console_wait = wait;
        self
    }

    pub const fn with_storage_gate(mut self, gate: StorageGate) -> Self {
        self.storage_gate = gate;
        self
    }

    pub const fn with_lcd_echo(mut self, echo: LcdEcho) -> Self {
        self.lcd_echo = echo;
        self
    }

    pub const fn with_file(mut self, name: &'static str, line: &'static str) -> Self {
        self.file_name = name;
        self.file_line = line;
        self
    }

    pub const fn with_greeting(mut self, row0: &'static str, row1: &'static str) -> Self {
        self.greeting = [row0, row1];
        self
    }
}

impl Default for SketchConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_matches_board_sketch() {
        let cfg = SketchConfig::default();
        assert_eq!(cfg.lcd_addr, 0x27);
        assert_eq!((cfg.lcd_cols, cfg.lcd_rows), (16, 2));
        assert_eq!(cfg.console_baud, 9600);
        assert_eq!(cfg.file_name, "test.txt");
        assert_eq!(cfg.file_line, "testing 1, 2, 3.\n");
        assert_eq!(cfg.storage_gate, StorageGate::Attempt);
        assert_eq!(cfg.lcd_echo, LcdEcho::WriteResult);
        assert_eq!(cfg.console_wait, ReadyWait::Forever);
    }

    #[test]
    fn greeting_fits_display_width() {
        let cfg = SketchConfig::DEFAULT;
        for line in cfg.greeting {
            assert!(line.len() <= cfg.lcd_cols as usize);
        }
    }

    #[test]
    fn builders_touch_one_field() {
        let cfg = SketchConfig::DEFAULT
            .with_storage_gate(StorageGate::RequireMount)
            .with_lcd_echo(LcdEcho::Byte);
        assert_eq!(cfg.storage_gate, StorageGate::RequireMount);
        assert_eq!(cfg.lcd_echo, LcdEcho::Byte);
        assert_eq!(cfg.file_name, SketchConfig::DEFAULT.file_name);
    }
}
