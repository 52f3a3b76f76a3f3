//! `core::fmt` output through the firmware console.
use core::fmt;

use crate::legacy::console_putchar;
use crate::Firmware;

/// Best-effort console: every byte becomes one putchar call and firmware errors
/// are dropped.
#[derive(Debug)]
pub struct SbiConsole<F: Firmware> {
    firmware: F,
}

impl<F: Firmware> SbiConsole<F> {
    /// A console writing through `firmware`.
    pub const fn new(firmware: F) -> Self {
        Self { firmware }
    }

    /// Sends one byte.
    pub fn write_byte(&mut self, byte: u8) {
        console_putchar(&mut self.firmware, byte);
    }

    /// Sends every byte in order.
    pub fn write_bytes(&mut self, bytes: &[u8]) {
        for &byte in bytes {
            self.write_byte(byte);
        }
    }

    /// Gives the firmware handle back.
    pub fn into_inner(self) -> F {
        self.firmware
    }
}

impl<F: Firmware> fmt::Write for SbiConsole<F> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.write_bytes(s.as_bytes());
        Ok(())
    }
}
