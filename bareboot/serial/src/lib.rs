//! Helpers to log through the COM1 serial port.
//!
//! The x86 kernel's screen belongs to the VGA console, so diagnostics go out of
//! band here. `sprint!`/`sprintln!` and the `log` macros work once [`init`] ran.
#![no_std]
#![cfg(any(target_arch = "x86", target_arch = "x86_64"))]

extern crate self as serial;

use log::{Metadata, Record};
use spin::{Lazy, Mutex};
use uart_16550::SerialPort;

/// I/O port base of COM1.
pub const COM1: u16 = 0x3F8;

/// Initializes serial port and logger. sprint! and log macros after this.
///
/// # Panics
///
/// If another logger was already installed.
pub fn init() {
    Lazy::force(&SERIAL);
    log::set_logger(&LOGGER)
        .map(|()| log::set_max_level(boot::log_level()))
        .expect("Couldn't set the serial logger");

    log::info!("Logging initialized");
}

static SERIAL: Lazy<Mutex<SerialPort>> = Lazy::new(|| {
    // SAFETY: COM1 is the standard PC serial port and nothing else drives it.
    let mut serial_port = unsafe { SerialPort::new(COM1) };
    serial_port.init();
    Mutex::new(serial_port)
});

#[doc(hidden)]
pub fn _print(args: ::core::fmt::Arguments) {
    use core::fmt::Write;
    // Output is best effort: there is nowhere to report a failed write.
    let _ = SERIAL.lock().write_fmt(args);
}

/// Prints to the host through the serial interface.
#[macro_export]
macro_rules! sprint {
    ($($arg:tt)*) => {
        ::serial::_print(core::format_args!($($arg)*));
    };
}

/// Prints to the host through the serial interface, appending a newline.
#[macro_export]
macro_rules! sprintln {
    () => (::serial::sprint!("\n"));
    ($fmt:expr) => (::serial::sprint!(core::concat!($fmt, "\n")));
    ($fmt:expr, $($arg:tt)*) => (::serial::sprint!(
        core::concat!($fmt, "\n"), $($arg)*));
}

/// The global logger.
static LOGGER: Logger = Logger {};

struct Logger;

impl log::Log for Logger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            crate::sprintln!("{} - {}", record.level(), record.args());
        }
    }

    fn flush(&self) {}
}
