//! Logger that writes records to the firmware console.

use core::fmt::Write;

use log::{Metadata, Record};

use crate::{Ecall, SbiConsole};

/// The global logger.
static LOGGER: Logger = Logger {};

/// Installs the SBI logger. `log` macros work after this.
///
/// # Safety
///
/// The hart must be running in supervisor mode under an SBI implementation.
///
/// # Panics
///
/// If another logger was already installed.
pub unsafe fn init() {
    log::set_logger(&LOGGER)
        .map(|()| log::set_max_level(boot::log_level()))
        .expect("Couldn't set the SBI logger");

    log::info!("Logging initialized");
}

struct Logger;

impl log::Log for Logger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            // SAFETY: The logger is only installed by `init`, whose caller
            // guarantees the execution environment.
            let mut console = SbiConsole::new(unsafe { Ecall::new() });
            let _ = writeln!(console, "{} - {}", record.level(), record.args());
        }
    }

    fn flush(&self) {}
}
