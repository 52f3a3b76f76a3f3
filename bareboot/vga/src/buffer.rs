//! Storage for the cell grid: the memory-mapped VGA buffer, or plain memory.

use crate::ScreenChar;

/// Physical address of the color text-mode buffer.
pub const VGA_BUFFER_ADDRESS: usize = 0xB8000;
/// Columns in text mode 3.
pub const VGA_WIDTH: usize = 80;
/// Rows in text mode 3.
pub const VGA_HEIGHT: usize = 25;

/// Returned when a cell coordinate lies outside the grid.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct OutOfBounds;

/// A `width` x `height` grid of cells, addressed as (column, row).
///
/// # Safety
///
/// `width` and `height` must be non-zero, must never change, and every
/// coordinate below them must be valid for the unchecked accessors.
pub unsafe trait TextBuffer {
    /// Number of columns.
    fn width(&self) -> usize;

    /// Number of rows.
    fn height(&self) -> usize;

    /// Stores `cell` at (`col`, `row`).
    ///
    /// # Safety
    ///
    /// `col < self.width()` and `row < self.height()`.
    unsafe fn write_unchecked(&mut self, col: usize, row: usize, cell: ScreenChar);

    /// Loads the cell at (`col`, `row`).
    ///
    /// # Safety
    ///
    /// `col < self.width()` and `row < self.height()`.
    unsafe fn read_unchecked(&self, col: usize, row: usize) -> ScreenChar;

    /// Stores `cell` at (`col`, `row`) if it is inside the grid.
    fn write(&mut self, col: usize, row: usize, cell: ScreenChar) -> Result<(), OutOfBounds> {
        if col < self.width() && row < self.height() {
            // SAFETY: Bounds checked above.
            unsafe { self.write_unchecked(col, row, cell) };
            Ok(())
        } else {
            Err(OutOfBounds)
        }
    }

    /// Loads the cell at (`col`, `row`) if it is inside the grid.
    fn read(&self, col: usize, row: usize) -> Option<ScreenChar> {
        if col < self.width() && row < self.height() {
            // SAFETY: Bounds checked above.
            Some(unsafe { self.read_unchecked(col, row) })
        } else {
            None
        }
    }

    /// Copies row `src` over row `dst`.
    ///
    /// # Panics
    ///
    /// If either row is outside the grid.
    fn copy_row(&mut self, src: usize, dst: usize) {
        assert!(src < self.height() && dst < self.height());
        for col in 0..self.width() {
            // SAFETY: Rows checked above, `col` bounded by the width.
            unsafe {
                let cell = self.read_unchecked(col, src);
                self.write_unchecked(col, dst, cell);
            }
        }
    }

    /// Overwrites every cell of `row` with `cell`.
    ///
    /// # Panics
    ///
    /// If `row` is outside the grid.
    fn fill_row(&mut self, row: usize, cell: ScreenChar) {
        assert!(row < self.height());
        for col in 0..self.width() {
            // SAFETY: Row checked above, `col` bounded by the width.
            unsafe { self.write_unchecked(col, row, cell) };
        }
    }
}

/// The memory-mapped 80x25 text buffer.
///
/// Cells are accessed with volatile 16-bit loads and stores so every write
/// reaches the hardware whole.
#[derive(Debug)]
pub struct VgaBuffer {
    base: *mut ScreenChar,
}

// SAFETY: Precondition for creating the buffer prevents two owners of the same
// video memory from existing.
unsafe impl Send for VgaBuffer {}

impl VgaBuffer {
    /// The buffer at [`VGA_BUFFER_ADDRESS`].
    ///
    /// # Safety
    ///
    /// * The machine must be in text mode 3 with the buffer identity mapped.
    /// * There must only be one `VgaBuffer` (i.e. the video memory is now owned
    /// by it).
    pub unsafe fn new() -> Self {
        // SAFETY: Forwarded from the caller.
        unsafe { Self::at(VGA_BUFFER_ADDRESS) }
    }

    /// An 80x25 buffer at an arbitrary address.
    ///
    /// # Safety
    ///
    /// `address` must point to `VGA_WIDTH * VGA_HEIGHT` 16-bit cells, suitably
    /// aligned and owned exclusively by the returned value.
    pub unsafe fn at(address: usize) -> Self {
        Self {
            base: address as *mut ScreenChar,
        }
    }
}

// SAFETY: The grid is always 80x25 and the base covers it (precondition of the
// constructors).
unsafe impl TextBuffer for VgaBuffer {
    fn width(&self) -> usize {
        VGA_WIDTH
    }

    fn height(&self) -> usize {
        VGA_HEIGHT
    }

    unsafe fn write_unchecked(&mut self, col: usize, row: usize, cell: ScreenChar) {
        // SAFETY: In bounds (precondition), so inside the owned video memory.
        unsafe { self.base.add(row * VGA_WIDTH + col).write_volatile(cell) }
    }

    unsafe fn read_unchecked(&self, col: usize, row: usize) -> ScreenChar {
        // SAFETY: In bounds (precondition), so inside the owned video memory.
        unsafe { self.base.add(row * VGA_WIDTH + col).read_volatile() }
    }
}

/// A grid kept in ordinary memory, with any dimensions.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct MemoryBuffer<const W: usize, const H: usize> {
    cells: [[ScreenChar; W]; H],
}

impl<const W: usize, const H: usize> MemoryBuffer<W, H> {
    /// A grid of zeroed cells.
    pub const fn new() -> Self {
        Self {
            cells: [[ScreenChar::from_bits(0); W]; H],
        }
    }

    /// The cells of `row`.
    pub fn row(&self, row: usize) -> &[ScreenChar; W] {
        &self.cells[row]
    }

    /// The raw bytes of `row`, exactly as video memory would hold them.
    pub fn row_bytes(&self, row: usize) -> &[u8] {
        bytemuck::cast_slice(&self.cells[row][..])
    }
}

impl<const W: usize, const H: usize> Default for MemoryBuffer<W, H> {
    fn default() -> Self {
        Self::new()
    }
}

// SAFETY: The dimensions are the array's own (non-zero is checked by `Console`).
unsafe impl<const W: usize, const H: usize> TextBuffer for MemoryBuffer<W, H> {
    fn width(&self) -> usize {
        W
    }

    fn height(&self) -> usize {
        H
    }

    unsafe fn write_unchecked(&mut self, col: usize, row: usize, cell: ScreenChar) {
        // SAFETY: In bounds (precondition).
        unsafe { *self.cells.get_unchecked_mut(row).get_unchecked_mut(col) = cell }
    }

    unsafe fn read_unchecked(&self, col: usize, row: usize) -> ScreenChar {
        // SAFETY: In bounds (precondition).
        unsafe { *self.cells.get_unchecked(row).get_unchecked(col) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ColorCode;

    #[test]
    fn checked_access() {
        let mut buffer = MemoryBuffer::<3, 2>::new();
        let cell = ScreenChar::new(b'x', ColorCode::DEFAULT);
        assert_eq!(buffer.write(2, 1, cell), Ok(()));
        assert_eq!(buffer.read(2, 1), Some(cell));
        assert_eq!(buffer.write(3, 0, cell), Err(OutOfBounds));
        assert_eq!(buffer.write(0, 2, cell), Err(OutOfBounds));
        assert_eq!(buffer.read(0, 2), None);
    }

    #[test]
    fn row_helpers() {
        let mut buffer = MemoryBuffer::<4, 3>::new();
        let cell = ScreenChar::new(b'#', ColorCode::DEFAULT);
        buffer.fill_row(0, cell);
        buffer.copy_row(0, 2);
        assert_eq!(buffer.row(2), &[cell; 4]);
        assert_eq!(buffer.row(1), &[ScreenChar::default(); 4]);
        assert_eq!(buffer.row_bytes(2), &[b'#', 0x07, b'#', 0x07, b'#', 0x07, b'#', 0x07]);
    }

    #[test]
    fn vga_layout_is_row_major() {
        let mut memory = vec![0u16; VGA_WIDTH * VGA_HEIGHT];
        let mut buffer = unsafe { VgaBuffer::at(memory.as_mut_ptr() as usize) };
        let cell = ScreenChar::new(b'Z', ColorCode::DEFAULT);
        buffer.write(5, 2, cell).unwrap();
        assert_eq!(buffer.read(5, 2), Some(cell));
        drop(buffer);
        assert_eq!(memory[2 * VGA_WIDTH + 5], cell.bits());
        assert_eq!(memory.iter().filter(|&&c| c != 0).count(), 1);
    }
}
