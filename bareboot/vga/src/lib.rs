//! VGA text-mode console.
//!
//! The screen is a grid of 16-bit cells: the low byte is a code page 437
//! character and the high byte its attribute (background color in the high
//! nibble, foreground in the low nibble).
#![cfg_attr(not(test), no_std)]
#![deny(absolute_paths_not_starting_with_crate)]
#![warn(missing_debug_implementations)]
#![warn(missing_docs)]

pub mod buffer;
pub mod console;

use bytemuck::{Pod, Zeroable};
use num_enum::{IntoPrimitive, TryFromPrimitive};

pub use buffer::{MemoryBuffer, OutOfBounds, TextBuffer, VgaBuffer};
pub use console::Console;

/// The 16 entries of the standard text-mode palette.
#[allow(missing_docs)]
#[derive(Debug, Copy, Clone, Eq, PartialEq, TryFromPrimitive, IntoPrimitive)]
#[repr(u8)]
pub enum Color {
    Black = 0,
    Blue = 1,
    Green = 2,
    Cyan = 3,
    Red = 4,
    Magenta = 5,
    Brown = 6,
    LightGray = 7,
    DarkGray = 8,
    LightBlue = 9,
    LightGreen = 10,
    LightCyan = 11,
    LightRed = 12,
    Pink = 13,
    Yellow = 14,
    White = 15,
}

impl Color {
    /// Decodes the low four bits of `nibble`.
    pub const fn from_nibble(nibble: u8) -> Self {
        match nibble & 0xF {
            0 => Self::Black,
            1 => Self::Blue,
            2 => Self::Green,
            3 => Self::Cyan,
            4 => Self::Red,
            5 => Self::Magenta,
            6 => Self::Brown,
            7 => Self::LightGray,
            8 => Self::DarkGray,
            9 => Self::LightBlue,
            10 => Self::LightGreen,
            11 => Self::LightCyan,
            12 => Self::LightRed,
            13 => Self::Pink,
            14 => Self::Yellow,
            _ => Self::White,
        }
    }
}

/// A foreground/background pair packed as `bg << 4 | fg`.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Pod, Zeroable)]
#[repr(transparent)]
pub struct ColorCode(u8);

impl ColorCode {
    /// Light gray on black, what the BIOS leaves behind.
    pub const DEFAULT: Self = Self::new(Color::LightGray, Color::Black);

    /// Packs a foreground and background color.
    pub const fn new(foreground: Color, background: Color) -> Self {
        Self((background as u8) << 4 | foreground as u8)
    }

    /// The foreground color.
    pub const fn foreground(self) -> Color {
        Color::from_nibble(self.0)
    }

    /// The background color.
    pub const fn background(self) -> Color {
        Color::from_nibble(self.0 >> 4)
    }

    /// The raw attribute byte.
    pub const fn bits(self) -> u8 {
        self.0
    }

    /// Reinterprets an attribute byte. Every byte is a valid pair.
    pub const fn from_bits(bits: u8) -> Self {
        Self(bits)
    }
}

impl Default for ColorCode {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// One encoded screen cell.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Pod, Zeroable)]
#[repr(transparent)]
pub struct ScreenChar(u16);

impl ScreenChar {
    /// Encodes `character` with `color`.
    pub const fn new(character: u8, color: ColorCode) -> Self {
        Self((color.bits() as u16) << 8 | character as u16)
    }

    /// A space drawn with `color`, i.e. an empty cell.
    pub const fn blank(color: ColorCode) -> Self {
        Self::new(b' ', color)
    }

    /// The code page 437 character.
    pub const fn character(self) -> u8 {
        self.0 as u8
    }

    /// The cell's attribute.
    pub const fn color(self) -> ColorCode {
        ColorCode::from_bits((self.0 >> 8) as u8)
    }

    /// The raw 16-bit cell as stored in video memory.
    pub const fn bits(self) -> u16 {
        self.0
    }

    /// Reinterprets a raw 16-bit cell.
    pub const fn from_bits(bits: u16) -> Self {
        Self(bits)
    }
}
