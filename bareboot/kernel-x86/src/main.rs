//! x86 variant: a Multiboot image that greets on the VGA text console.
//!
//! Build with `cargo build -p kernel-x86 --target bareboot/kernel-x86/i686-bareboot.json
//! -Zbuild-std=core` and boot with `qemu-system-i386 -kernel`. For any other
//! target the binary is an empty stub so the workspace builds on the host.
#![cfg_attr(target_os = "none", no_std)]
#![cfg_attr(target_os = "none", no_main)]

#[cfg(target_os = "none")]
mod display;
#[cfg(target_os = "none")]
mod multiboot;

#[cfg(target_os = "none")]
use entry::entry;

#[cfg(target_os = "none")]
#[entry]
fn kmain() -> ! {
    use vga::{Color, ColorCode, Console, VgaBuffer};

    serial::init();
    log::info!("Entered kmain with a zeroed .bss");

    // SAFETY: The Multiboot loader leaves the machine in text mode 3 with
    // identity-mapped memory, and this is the only buffer ever created.
    let buffer = unsafe { VgaBuffer::new() };
    display::init(Console::new(buffer));
    log::info!("Initialized the VGA console");

    println!("Hello, kernel World!");
    display::set_color(ColorCode::new(Color::Black, Color::White));
    println!("bareboot is running on the VGA text console.");
    display::set_color(ColorCode::DEFAULT);

    log::info!("Nothing left to run, halting");
    halt()
}

/// Parks the CPU forever.
#[cfg(target_os = "none")]
fn halt() -> ! {
    loop {
        // SAFETY: `hlt` only waits for the next interrupt, and none are enabled.
        unsafe { core::arch::asm!("hlt", options(nomem, nostack)) };
    }
}

#[cfg(target_os = "none")]
#[panic_handler]
fn panic(info: &core::panic::PanicInfo) -> ! {
    log::error!("{}", info);
    halt()
}

#[cfg(not(target_os = "none"))]
fn main() {}
