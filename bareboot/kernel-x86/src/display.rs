//! System display: the VGA console behind the print! and println! macros.

use core::fmt::Write;

use spin::Mutex;
use vga::{ColorCode, Console, VgaBuffer};

/// The main console for the kernel.
static CONSOLE: Mutex<Option<Console<VgaBuffer>>> = Mutex::new(None);

/// Hands the console over to the print macros.
///
/// # Panics
///
/// If called twice.
pub fn init(console: Console<VgaBuffer>) {
    let mut inner = CONSOLE.lock();
    assert!(inner.is_none(), "Can't initialize the console twice!");
    *inner = Some(console);
}

/// Changes the colors of everything printed from now on.
pub fn set_color(color: ColorCode) {
    if let Some(console) = CONSOLE.lock().as_mut() {
        console.set_color(color);
    }
}

/// Prints the arguments to the console.
#[macro_export]
macro_rules! print {
    ($($arg:tt)*) => {$crate::display::_print(format_args!($($arg)*))};
}

/// Prints the arguments to the console and moves to the next line.
#[macro_export]
macro_rules! println {
    () => ($crate::print!("\n"));
    ($($arg:tt)*) => ($crate::print!("{}\n", format_args!($($arg)*)));
}

/// Prints the arguments to the screen. Output before `init` is dropped.
#[doc(hidden)]
pub fn _print(args: core::fmt::Arguments) {
    if let Some(console) = CONSOLE.lock().as_mut() {
        // Writing to the console itself can't fail.
        let _ = console.write_fmt(args);
    }
}
