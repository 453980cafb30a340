// lcdsd entry point
//
// Boot: logger -> clocks -> board -> one-shot setup routine -> idle.
// The setup routine greets on the LCD, waits for the console, probes
// and mounts the SD card, appends a line to test.txt and echoes the
// file back. Nothing runs after it; the board idles until power-off.

#![no_std]
#![no_main]

use esp_backtrace as _;
use esp_hal::clock::CpuClock;
use esp_hal::delay::Delay;
use log::{error, info};
use static_cell::StaticCell;

use lcdsd::board::Board;
use lcdsd_kernel::{SketchConfig, run_setup};

esp_bootloader_esp_idf::esp_app_desc!();

const CONFIG: SketchConfig = SketchConfig::DEFAULT;

const IDLE_PERIOD_MS: u32 = 1000;

// lives for the rest of the program; never dropped
static BOARD: StaticCell<Board> = StaticCell::new();

#[esp_hal::main]
fn main() -> ! {
    esp_println::logger::init_logger_from_env();
    let config = esp_hal::Config::default().with_cpu_clock(CpuClock::max());
    let peripherals = esp_hal::init(config);

    info!("booting...");

    let board = match Board::init(peripherals, &CONFIG) {
        Ok(board) => BOARD.init(board),
        Err(e) => {
            error!("board init failed: {}", e);
            idle();
        }
    };
    info!("hardware initialized.");

    let mut delay = Delay::new();
    let report = run_setup(
        &CONFIG,
        &mut board.lcd,
        &mut board.console,
        &mut board.sd,
        &mut delay,
    );
    info!(
        "setup: card={:?} mount={:?} write={:?} read={:?}",
        report.card, report.mount, report.write, report.read
    );

    idle();
}

fn idle() -> ! {
    let delay = Delay::new();
    loop {
        delay.delay_millis(IDLE_PERIOD_MS);
    }
}
