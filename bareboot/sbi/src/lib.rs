//! Supervisor Binary Interface calls and the firmware-backed console.
//!
//! Every call goes through one primitive, [`sbi_call`], which places a
//! [`SbiCall`] record into `a0`-`a7` and traps into the firmware with `ecall`.
//! Code above it talks to the [`Firmware`] trait so the register shape of each
//! call can be checked without RISC-V hardware.
#![cfg_attr(not(test), no_std)]
#![deny(absolute_paths_not_starting_with_crate)]
#![warn(missing_debug_implementations)]
#![warn(missing_docs)]

pub mod console;
pub mod legacy;
#[cfg(any(target_arch = "riscv32", target_arch = "riscv64"))]
pub mod logger;

use num_enum::{FromPrimitive, IntoPrimitive};

pub use console::SbiConsole;

/// Arguments of one firmware call: `a0`-`a5`, the function id (`a6`) and the
/// extension id (`a7`).
#[repr(C)]
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct SbiCall {
    /// Generic arguments, `a0`-`a5`.
    pub args: [usize; 6],
    /// `a6`.
    pub function_id: usize,
    /// `a7`.
    pub extension_id: usize,
}

impl SbiCall {
    /// A call with every argument zeroed.
    pub const fn new(extension_id: usize, function_id: usize) -> Self {
        Self {
            args: [0; 6],
            function_id,
            extension_id,
        }
    }

    /// Sets argument `a<index>`.
    ///
    /// # Panics
    ///
    /// If `index` is not in `0..6`.
    pub fn arg(mut self, index: usize, value: usize) -> Self {
        self.args[index] = value;
        self
    }
}

/// What the firmware left in `a0` (error) and `a1` (value).
#[repr(C)]
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct SbiRet {
    /// Status, `a0`. Legacy extensions return their only value here.
    pub error: isize,
    /// `a1`.
    pub value: usize,
}

impl SbiRet {
    /// `value` on success, the decoded status otherwise.
    pub fn into_result(self) -> Result<usize, SbiError> {
        match self.error {
            0 => Ok(self.value),
            code => Err(SbiError::from_primitive(code)),
        }
    }
}

/// Standard SBI error codes.
#[derive(Debug, Copy, Clone, Eq, PartialEq, FromPrimitive, IntoPrimitive)]
#[repr(isize)]
#[allow(missing_docs)]
pub enum SbiError {
    Failed = -1,
    NotSupported = -2,
    InvalidParam = -3,
    Denied = -4,
    InvalidAddress = -5,
    AlreadyAvailable = -6,
    AlreadyStarted = -7,
    AlreadyStopped = -8,
    NoShmem = -9,
    /// Any status the firmware returned that isn't listed above.
    #[num_enum(catch_all)]
    Unknown(isize) = isize::MIN,
}

impl SbiError {
    /// The raw status the firmware returned.
    pub fn code(self) -> isize {
        self.into()
    }
}

/// Something that can service firmware calls.
pub trait Firmware {
    /// Issues `call` and returns what the firmware answered.
    fn call(&mut self, call: SbiCall) -> SbiRet;
}

impl<F: Firmware + ?Sized> Firmware for &mut F {
    fn call(&mut self, call: SbiCall) -> SbiRet {
        (**self).call(call)
    }
}

/// Performs a raw firmware call.
///
/// # Safety
///
/// Must run in supervisor mode under an SBI implementation. The call itself
/// can have any effect the firmware gives it (including never returning);
/// follow the SBI documentation of the extension being invoked.
#[cfg(any(target_arch = "riscv32", target_arch = "riscv64"))]
pub unsafe fn sbi_call(call: SbiCall) -> SbiRet {
    let [a0, a1, a2, a3, a4, a5] = call.args;
    let error: isize;
    let value: usize;
    // SAFETY: Forwarded from the caller. No `nomem`: the firmware may access
    // memory the arguments point to.
    unsafe {
        core::arch::asm!(
            "ecall",
            inlateout("a0") a0 => error,
            inlateout("a1") a1 => value,
            in("a2") a2,
            in("a3") a3,
            in("a4") a4,
            in("a5") a5,
            in("a6") call.function_id,
            in("a7") call.extension_id,
            options(nostack),
        );
    }
    SbiRet { error, value }
}

/// The real firmware, reached through `ecall`.
#[cfg(any(target_arch = "riscv32", target_arch = "riscv64"))]
#[derive(Debug, Copy, Clone)]
pub struct Ecall {
    _private: (),
}

#[cfg(any(target_arch = "riscv32", target_arch = "riscv64"))]
impl Ecall {
    /// # Safety
    ///
    /// The hart must be running in supervisor mode under an SBI implementation.
    pub const unsafe fn new() -> Self {
        Self { _private: () }
    }
}

#[cfg(any(target_arch = "riscv32", target_arch = "riscv64"))]
impl Firmware for Ecall {
    fn call(&mut self, call: SbiCall) -> SbiRet {
        // SAFETY: Execution environment checked when constructing `Ecall`.
        unsafe { sbi_call(call) }
    }
}
