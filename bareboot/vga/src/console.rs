//! Cursor tracking, line wrapping and scrolling on top of a [`TextBuffer`].
use core::fmt;

use crate::buffer::TextBuffer;
use crate::{ColorCode, ScreenChar};

/// Glyph drawn for characters that have no code page 437 equivalent here (■).
const REPLACEMENT: u8 = 0xFE;

/// A text console that owns its buffer.
///
/// The cursor always stays inside the grid: writing past the last column wraps
/// to the next row, and moving past the last row scrolls everything up by one.
#[derive(Debug)]
pub struct Console<B: TextBuffer> {
    buffer: B,
    column: usize,
    row: usize,
    color: ColorCode,
}

impl<B: TextBuffer> Console<B> {
    /// Takes over `buffer`, blanking it with the default colors.
    ///
    /// # Panics
    ///
    /// If the buffer has no cells.
    pub fn new(buffer: B) -> Self {
        assert!(
            buffer.width() > 0 && buffer.height() > 0,
            "Text buffer must have at least one cell"
        );
        let mut console = Self {
            buffer,
            column: 0,
            row: 0,
            color: ColorCode::DEFAULT,
        };
        console.clear();
        console
    }

    /// Sets the colors used by subsequent writes. Existing cells keep theirs.
    pub fn set_color(&mut self, color: ColorCode) {
        self.color = color;
    }

    /// The colors used by the next write.
    pub fn color(&self) -> ColorCode {
        self.color
    }

    /// The cursor as (column, row).
    pub fn position(&self) -> (usize, usize) {
        (self.column, self.row)
    }

    /// Columns in the grid.
    pub fn width(&self) -> usize {
        self.buffer.width()
    }

    /// Rows in the grid.
    pub fn height(&self) -> usize {
        self.buffer.height()
    }

    /// The underlying grid.
    pub fn buffer(&self) -> &B {
        &self.buffer
    }

    /// Blanks every cell with the current colors and homes the cursor.
    pub fn clear(&mut self) {
        let blank = ScreenChar::blank(self.color);
        for row in 0..self.height() {
            self.buffer.fill_row(row, blank);
        }
        self.column = 0;
        self.row = 0;
    }

    /// Writes one code page 437 character, `\n` starting a new line.
    pub fn write_byte(&mut self, byte: u8) {
        match byte {
            b'\n' => self.new_line(),
            byte => {
                let cell = ScreenChar::new(byte, self.color);
                // SAFETY: The cursor is always inside the grid.
                unsafe { self.buffer.write_unchecked(self.column, self.row, cell) };
                self.column += 1;
                if self.column == self.width() {
                    self.new_line();
                }
            }
        }
    }

    /// Writes every byte in order.
    pub fn write_bytes(&mut self, bytes: &[u8]) {
        for &byte in bytes {
            self.write_byte(byte);
        }
    }

    fn new_line(&mut self) {
        self.column = 0;
        self.row += 1;
        if self.row == self.height() {
            self.scroll();
        }
    }

    /// Moves every row up by one, blanks the last row and parks the cursor at
    /// its start.
    fn scroll(&mut self) {
        let height = self.height();
        for row in 1..height {
            self.buffer.copy_row(row, row - 1);
        }
        self.buffer.fill_row(height - 1, ScreenChar::blank(self.color));
        self.column = 0;
        self.row = height - 1;
    }
}

impl<B: TextBuffer> fmt::Write for Console<B> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        for c in s.chars() {
            self.write_byte(if c.is_ascii() { c as u8 } else { REPLACEMENT });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use core::fmt::Write;

    use proptest::prelude::*;

    use super::*;
    use crate::{Color, MemoryBuffer};

    fn text<const W: usize, const H: usize>(console: &Console<MemoryBuffer<W, H>>, row: usize) -> String {
        console
            .buffer()
            .row(row)
            .iter()
            .map(|cell| cell.character() as char)
            .collect()
    }

    #[test]
    fn initialize_blanks_the_grid() {
        let console = Console::new(MemoryBuffer::<4, 3>::new());
        assert_eq!(console.position(), (0, 0));
        assert_eq!(console.color(), ColorCode::DEFAULT);
        for row in 0..3 {
            assert_eq!(console.buffer().row(row), &[ScreenChar::blank(ColorCode::DEFAULT); 4]);
        }
    }

    #[test]
    fn full_row_wraps_once() {
        let mut console = Console::new(MemoryBuffer::<5, 3>::new());
        console.write_bytes(b"abcde");
        assert_eq!(console.position(), (0, 1));
        assert_eq!(text(&console, 0), "abcde");
    }

    #[test]
    fn newline_resets_column() {
        let mut console = Console::new(MemoryBuffer::<8, 4>::new());
        console.write_bytes(b"abc\n");
        assert_eq!(console.position(), (0, 1));
        console.write_byte(b'\n');
        assert_eq!(console.position(), (0, 2));
    }

    #[test]
    fn color_applies_to_later_writes_only() {
        let mut console = Console::new(MemoryBuffer::<4, 2>::new());
        let inverted = ColorCode::new(Color::Black, Color::White);
        console.write_byte(b'a');
        console.set_color(inverted);
        console.write_byte(b'b');
        let row = console.buffer().row(0);
        assert_eq!(row[0], ScreenChar::new(b'a', ColorCode::DEFAULT));
        assert_eq!(row[1], ScreenChar::new(b'b', inverted));
    }

    #[test]
    fn three_by_two_scenario() {
        let mut console = Console::new(MemoryBuffer::<3, 2>::new());
        console.write_bytes(b"AB\nCD\n");
        // The second newline ran past the last row.
        assert_eq!(console.position(), (0, 1));
        assert_eq!(text(&console, 0), "CD ");
        console.write_bytes(b"EF");
        assert_eq!(text(&console, 0), "CD ");
        assert_eq!(text(&console, 1), "EF ");
        assert_eq!(console.position(), (2, 1));
    }

    #[test]
    fn scroll_shifts_rows_and_blanks_the_last() {
        let mut console = Console::new(MemoryBuffer::<4, 3>::new());
        console.write_bytes(b"r0\nr1\nr2");
        let before: Vec<Vec<u8>> = (0..3).map(|r| console.buffer().row_bytes(r).to_vec()).collect();
        console.write_byte(b'\n');
        assert_eq!(console.buffer().row_bytes(0), &before[1][..]);
        assert_eq!(console.buffer().row_bytes(1), &before[2][..]);
        assert_eq!(text(&console, 2), "    ");
        assert!((0..3).all(|r| !text(&console, r).contains("r0")));
        assert_eq!(console.position(), (0, 2));
    }

    #[test]
    fn wrapping_on_last_row_scrolls() {
        let mut console = Console::new(MemoryBuffer::<2, 2>::new());
        console.write_bytes(b"abcd");
        assert_eq!(text(&console, 0), "cd");
        assert_eq!(text(&console, 1), "  ");
        assert_eq!(console.position(), (0, 1));
    }

    #[test]
    fn single_row_console() {
        let mut console = Console::new(MemoryBuffer::<3, 1>::new());
        console.write_bytes(b"xyz");
        assert_eq!(text(&console, 0), "   ");
        assert_eq!(console.position(), (0, 0));
    }

    #[test]
    fn clear_keeps_color() {
        let mut console = Console::new(MemoryBuffer::<2, 2>::new());
        let code = ColorCode::new(Color::Green, Color::Blue);
        console.set_color(code);
        console.write_bytes(b"ab\nc");
        console.clear();
        assert_eq!(console.position(), (0, 0));
        assert_eq!(console.buffer().row(1), &[ScreenChar::blank(code); 2]);
    }

    #[test]
    fn formatted_output() {
        let mut console = Console::new(MemoryBuffer::<10, 2>::new());
        write!(console, "{}+{}={}", 2, 2, 2 + 2).unwrap();
        assert_eq!(text(&console, 0), "2+2=4     ");
        write!(console, "\né").unwrap();
        assert_eq!(console.buffer().row(1)[0].character(), 0xFE);
        assert_eq!(console.position(), (1, 1));
    }

    proptest! {
        #[test]
        fn short_lines_never_scroll(line in proptest::collection::vec(0x20u8..0x7F, 0..80)) {
            let mut console = Console::new(MemoryBuffer::<80, 25>::new());
            console.write_bytes(&line);
            prop_assert_eq!(console.position(), (line.len(), 0));
            for (col, &byte) in line.iter().enumerate() {
                prop_assert_eq!(console.buffer().row(0)[col].character(), byte);
            }
        }

        #[test]
        fn cursor_stays_in_bounds(bytes in proptest::collection::vec(prop_oneof![Just(b'\n'), 0x20u8..0x7F], 0..400)) {
            let mut console = Console::new(MemoryBuffer::<7, 5>::new());
            for byte in bytes {
                console.write_byte(byte);
                let (col, row) = console.position();
                prop_assert!(col < 7 && row < 5);
                if byte == b'\n' {
                    prop_assert_eq!(col, 0);
                }
            }
        }
    }
}
