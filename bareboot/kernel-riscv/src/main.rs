//! RISC-V variant: a supervisor-mode image that talks through SBI firmware.
//!
//! Build with `cargo build -p kernel-riscv --target riscv64gc-unknown-none-elf`
//! and boot with `qemu-system-riscv64 -machine virt -bios default -kernel`. For
//! any other target the binary is an empty stub so the workspace builds on the
//! host.
#![cfg_attr(target_os = "none", no_std)]
#![cfg_attr(target_os = "none", no_main)]

#[cfg(target_os = "none")]
mod console;

#[cfg(target_os = "none")]
use entry::entry;

#[cfg(target_os = "none")]
#[entry]
fn kmain() -> ! {
    use sbi::legacy::console_putchar;

    // SAFETY: SBI firmware started this image in supervisor mode.
    unsafe { sbi::logger::init() };
    log::info!("Entered kmain with a zeroed .bss");

    let greeting = "\n\nHello World!";
    let mut firmware = console::firmware();
    for byte in greeting.bytes() {
        console_putchar(&mut firmware, byte);
    }
    println!();
    println!("{} using formatted output", greeting);

    log::info!("Nothing left to run, idling");
    idle()
}

/// Parks the hart forever.
#[cfg(target_os = "none")]
fn idle() -> ! {
    loop {
        // SAFETY: `wfi` only waits for the next interrupt, and none are enabled.
        unsafe { core::arch::asm!("wfi", options(nomem, nostack)) };
    }
}

#[cfg(target_os = "none")]
#[panic_handler]
fn panic(info: &core::panic::PanicInfo) -> ! {
    log::error!("{}", info);
    idle()
}

#[cfg(not(target_os = "none"))]
fn main() {}
