//! Playfield geometry: grid dimensions, cell size and coordinate conventions.
//!
//! Positions are stored in cell units (column, row) with row 0 at the top.
//! Pixel coordinates are only derived on demand from the fixed viewport.

/// Playfield width in cells.
pub const GRID_WIDTH: i32 = 10;
/// Playfield height in cells.
pub const GRID_HEIGHT: i32 = 20;

/// Fixed drawing surface the cell size is derived from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

pub const VIEWPORT: Viewport = Viewport {
    width: 200,
    height: 400,
};

/// Size of one cell in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellSize {
    pub width: u32,
    pub height: u32,
}

impl CellSize {
    /// Viewport divided by grid dimensions.
    pub const fn derive(viewport: Viewport) -> Self {
        Self {
            width: viewport.width / GRID_WIDTH as u32,
            height: viewport.height / GRID_HEIGHT as u32,
        }
    }
}

pub const CELL_SIZE: CellSize = CellSize::derive(VIEWPORT);

/// A cell coordinate. Not necessarily inside the grid; see [`Cell::in_bounds`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Cell {
    pub col: i32,
    pub row: i32,
}

impl Cell {
    pub const fn new(col: i32, row: i32) -> Self {
        Self { col, row }
    }

    #[inline]
    pub const fn offset(self, dcol: i32, drow: i32) -> Self {
        Self {
            col: self.col + dcol,
            row: self.row + drow,
        }
    }

    /// Column within `[0, GRID_WIDTH)`.
    #[inline]
    pub const fn col_in_bounds(self) -> bool {
        self.col >= 0 && self.col < GRID_WIDTH
    }

    /// Row within `[0, GRID_HEIGHT)`.
    #[inline]
    pub const fn row_in_bounds(self) -> bool {
        self.row >= 0 && self.row < GRID_HEIGHT
    }

    #[inline]
    pub const fn in_bounds(self) -> bool {
        self.col_in_bounds() && self.row_in_bounds()
    }

    /// Top-left pixel of this cell on the viewport.
    pub const fn pixel(self, size: CellSize) -> (i64, i64) {
        (
            self.col as i64 * size.width as i64,
            self.row as i64 * size.height as i64,
        )
    }
}
