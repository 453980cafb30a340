// Serial console contract and the readiness wait.
//
// Text goes through core::fmt::Write so callers can use write!().
// write_byte mirrors a raw serial write: it reports how many bytes the
// port accepted (1 or 0).

use embedded_hal::delay::DelayNs;
use log::{info, warn};

use crate::config::ReadyWait;

pub trait Console: core::fmt::Write {
    fn is_ready(&mut self) -> bool;

    fn write_byte(&mut self, byte: u8) -> usize;
}

// Poll is_ready() according to the wait policy; returns whether the
// console came up. Forever never returns false.
pub fn wait_ready<C, D>(console: &mut C, delay: &mut D, policy: ReadyWait) -> bool
where
    C: Console + ?Sized,
    D: DelayNs,
{
    match policy {
        ReadyWait::Forever => {
            while !console.is_ready() {
                core::hint::spin_loop();
            }
            true
        }
        ReadyWait::Bounded {
            timeout_ms,
            poll_ms,
        } => {
            let poll_ms = poll_ms.max(1);
            let mut waited = 0u32;
            loop {
                if console.is_ready() {
                    if waited > 0 {
                        info!("console ready after {}ms", waited);
                    }
                    return true;
                }
                if waited >= timeout_ms {
                    warn!("console not ready after {}ms, continuing", timeout_ms);
                    return false;
                }
                delay.delay_ms(poll_ms);
                waited = waited.saturating_add(poll_ms);
            }
        }
    }
}
