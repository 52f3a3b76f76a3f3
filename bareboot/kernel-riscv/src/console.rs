//! The SBI console behind the print! and println! macros.

use core::fmt::Write;

use sbi::{Ecall, SbiConsole};

/// The firmware this kernel runs under.
pub fn firmware() -> Ecall {
    // SAFETY: The kernel is only ever entered in supervisor mode by SBI firmware.
    unsafe { Ecall::new() }
}

/// Prints the arguments to the firmware console.
#[macro_export]
macro_rules! print {
    ($($arg:tt)*) => {$crate::console::_print(format_args!($($arg)*))};
}

/// Prints the arguments to the firmware console and moves to the next line.
#[macro_export]
macro_rules! println {
    () => ($crate::print!("\n"));
    ($($arg:tt)*) => ($crate::print!("{}\n", format_args!($($arg)*)));
}

#[doc(hidden)]
pub fn _print(args: core::fmt::Arguments) {
    // Firmware errors are dropped: this console is best effort.
    let _ = SbiConsole::new(firmware()).write_fmt(args);
}
