//! Boot handoff: the link-time memory layout, zero-initialization of the
//! uninitialized-data region and the jump into the kernel's main routine. Also
//! the compile-time log level every kernel logger starts with.
//!
//! Everything in here runs before `.bss` holds defined contents, so none of it
//! may touch a `static`. That includes logging and panicking.
#![cfg_attr(not(test), no_std)]

use core::ops::Range;

use log::LevelFilter;

/// Addresses resolved by the linker script that the boot path depends on.
///
/// Kernels obtain the real layout with [`BootLayout::from_linker`]; anything
/// else (tests, alternative loaders) can build one from arbitrary addresses.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct BootLayout {
    bss_start: usize,
    bss_end: usize,
    stack_top: usize,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum LayoutError {
    BssEndBeforeStart,
    StackInsideBss,
}

impl BootLayout {
    /// Builds a layout from raw addresses.
    ///
    /// # Errors
    ///
    /// * `bss_end` lies below `bss_start`.
    /// * `stack_top` points strictly inside `[bss_start, bss_end)`, which would
    ///   let the zero-fill wipe the live stack.
    pub const fn new(bss_start: usize, bss_end: usize, stack_top: usize) -> Result<Self, LayoutError> {
        if bss_end < bss_start {
            return Err(LayoutError::BssEndBeforeStart);
        }
        if stack_top > bss_start && stack_top < bss_end {
            return Err(LayoutError::StackInsideBss);
        }
        Ok(Self {
            bss_start,
            bss_end,
            stack_top,
        })
    }

    /// Reads the layout from the `__bss_start`, `__bss_end` and `__stack_top`
    /// linker symbols.
    ///
    /// The addresses are trusted as-is: this runs before the panic machinery
    /// is usable, so a broken linker script can't be reported here.
    #[cfg(target_os = "none")]
    pub fn from_linker() -> Self {
        extern "C" {
            static __bss_start: u8;
            static __bss_end: u8;
            static __stack_top: u8;
        }
        // SAFETY: Only the addresses of the symbols are taken, they are never read.
        #[allow(unused_unsafe)]
        let (bss_start, bss_end, stack_top) = unsafe {
            (
                core::ptr::addr_of!(__bss_start) as usize,
                core::ptr::addr_of!(__bss_end) as usize,
                core::ptr::addr_of!(__stack_top) as usize,
            )
        };
        Self {
            bss_start,
            bss_end,
            stack_top,
        }
    }

    pub const fn bss(&self) -> Range<usize> {
        self.bss_start..self.bss_end
    }

    pub const fn stack_top(&self) -> usize {
        self.stack_top
    }

    /// Zeroes the whole uninitialized-data region.
    ///
    /// # Safety
    ///
    /// * The layout must describe memory that is valid for writes.
    /// * Nothing may hold references into the region; its contents are destroyed.
    pub unsafe fn zero_bss(&self) {
        // SAFETY: Forwarded from the caller.
        unsafe { zero_region(self.bss_start as *mut u8, self.bss_end as *mut u8) }
    }
}

/// Writes a zero byte to every address in `[start, end)`.
///
/// Does nothing when `start >= end`. The stores are volatile so they are
/// neither elided nor lowered to a `memset` call.
///
/// # Safety
///
/// Every byte in `[start, end)` must be valid for writes and not aliased by a
/// live reference.
pub unsafe fn zero_region(start: *mut u8, end: *mut u8) {
    let mut ptr = start;
    while ptr < end {
        // SAFETY: `ptr` is in `[start, end)` (precondition).
        unsafe {
            ptr.write_volatile(0);
            ptr = ptr.add(1);
        }
    }
}

/// Zeroes `.bss` and transfers control to `main`. Never returns.
///
/// This is the target of the boot trampoline: the stack is valid but nothing
/// else is, so the zero-fill happens before any code that could read a static.
///
/// # Safety
///
/// * Must be called exactly once, before anything reads process-wide state.
/// * `layout` must describe the running image (see [`BootLayout::zero_bss`]).
pub unsafe fn handoff(layout: BootLayout, main: fn() -> !) -> ! {
    // SAFETY: Forwarded from the caller.
    unsafe { layout.zero_bss() };
    main()
}

/// Log level picked at compile time through `RUST_LOG`. Defaults to info.
///
/// Shared by every kernel's logger so the images agree on the variable.
pub fn log_level() -> LevelFilter {
    parse_level(core::option_env!("RUST_LOG"))
}

fn parse_level(level: Option<&str>) -> LevelFilter {
    level
        .and_then(|level| level.parse().ok())
        .unwrap_or(LevelFilter::Info)
}
