//! SBI v0.1 legacy extensions.
//!
//! Each legacy call is its own extension id with function id 0. They return a
//! single value in `a0`, which lands in [`SbiRet::error`].

use crate::{Firmware, SbiCall, SbiError, SbiRet};

/// Extension id of `sbi_console_putchar`.
pub const CONSOLE_PUTCHAR: usize = 0x01;
/// Extension id of `sbi_console_getchar`.
pub const CONSOLE_GETCHAR: usize = 0x02;
/// Extension id of `sbi_shutdown`.
pub const SHUTDOWN: usize = 0x08;

fn putchar_call(ch: u8) -> SbiCall {
    SbiCall::new(CONSOLE_PUTCHAR, 0).arg(0, ch.into())
}

/// Writes `ch` to the firmware console, ignoring whatever the firmware says.
pub fn console_putchar(firmware: &mut impl Firmware, ch: u8) {
    let _ = firmware.call(putchar_call(ch));
}

/// Like [`console_putchar`], but reports a negative firmware status.
pub fn try_console_putchar(firmware: &mut impl Firmware, ch: u8) -> Result<(), SbiError> {
    match firmware.call(putchar_call(ch)) {
        SbiRet { error, .. } if error < 0 => Err(SbiError::from(error)),
        _ => Ok(()),
    }
}

/// Reads one byte from the firmware console, `None` when nothing is pending.
pub fn console_getchar(firmware: &mut impl Firmware) -> Option<u8> {
    let ret = firmware.call(SbiCall::new(CONSOLE_GETCHAR, 0));
    u8::try_from(ret.error).ok()
}

/// Powers the machine off.
pub fn shutdown(firmware: &mut impl Firmware) -> ! {
    let _ = firmware.call(SbiCall::new(SHUTDOWN, 0));
    // Only reached if the firmware refused.
    loop {
        core::hint::spin_loop();
    }
}
