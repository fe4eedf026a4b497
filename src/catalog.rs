//! Piece catalog and level obstacle layouts.

use crate::grid::Cell;

/// Column offset pieces spawn at (60 px on the reference viewport).
pub const SPAWN_COLUMN: i32 = 3;

/// Display colour of a block. Mapped to terminal colours by the theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceColor {
    Cyan,
    Blue,
    Orange,
    Yellow,
    Purple,
    Red,
    Green,
    /// Obstacles.
    Gray,
}

impl PieceColor {
    /// Stable index 0..8, used for theme lookup.
    pub const fn index(self) -> usize {
        self as usize
    }
}

/// Piece kinds in catalog order (I, J, L, O, T, Z, S).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    I,
    J,
    L,
    O,
    T,
    Z,
    S,
}

impl PieceKind {
    pub const ALL: [Self; 7] = [Self::I, Self::J, Self::L, Self::O, Self::T, Self::Z, Self::S];

    /// Catalog entry for a generator draw in `[0, ALL.len() - 1]`.
    pub fn from_index(index: u32) -> Self {
        Self::ALL[index as usize % Self::ALL.len()]
    }

    /// 4 cells relative to the spawn origin; each (dcol, drow).
    /// Index 2 is the rotation pivot.
    pub const fn offsets(self) -> [(i32, i32); 4] {
        match self {
            Self::I => [(0, 0), (1, 0), (2, 0), (3, 0)],
            Self::J => [(0, 0), (0, 1), (1, 1), (2, 1)],
            Self::L => [(2, 0), (0, 1), (1, 1), (2, 1)],
            Self::O => [(0, 0), (1, 0), (0, 1), (1, 1)],
            Self::T => [(1, 0), (0, 1), (1, 1), (2, 1)],
            Self::Z => [(0, 0), (1, 0), (1, 1), (2, 1)],
            Self::S => [(1, 0), (2, 0), (0, 1), (1, 1)],
        }
    }

    pub const fn color(self) -> PieceColor {
        match self {
            Self::I => PieceColor::Cyan,
            Self::J => PieceColor::Blue,
            Self::L => PieceColor::Orange,
            Self::O => PieceColor::Yellow,
            Self::T => PieceColor::Purple,
            Self::Z => PieceColor::Red,
            Self::S => PieceColor::Green,
        }
    }

    /// Absolute spawn cells: offsets shifted right by [`SPAWN_COLUMN`].
    pub fn spawn_cells(self) -> [Cell; 4] {
        self.offsets()
            .map(|(dcol, drow)| Cell::new(SPAWN_COLUMN + dcol, drow))
    }
}

/// Fixed obstacle sets; level `n` gets `OBSTACLES[(n - 1) % len]`.
/// No layout fills a whole row.
pub const OBSTACLES: [&[(i32, i32)]; 3] = [
    // Posts on both walls.
    &[(0, 17), (0, 18), (0, 19), (9, 17), (9, 18), (9, 19)],
    // Staggered steps.
    &[(1, 19), (2, 18), (3, 19), (6, 19), (7, 18), (8, 19)],
    // Floating ledge.
    &[(3, 15), (4, 15), (5, 15), (6, 15)],
];

/// Obstacle cells for a level (1-based).
pub fn obstacle_layout(level: u32) -> impl Iterator<Item = Cell> {
    let index = (level.max(1) - 1) as usize % OBSTACLES.len();
    OBSTACLES[index]
        .iter()
        .map(|&(col, row)| Cell::new(col, row))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::{GRID_HEIGHT, GRID_WIDTH};
    use std::collections::HashSet;

    #[test]
    fn every_piece_has_four_distinct_cells() {
        for kind in PieceKind::ALL {
            let cells: HashSet<_> = kind.spawn_cells().into_iter().collect();
            assert_eq!(cells.len(), 4, "{kind:?}");
        }
    }

    #[test]
    fn spawn_cells_are_inside_the_grid() {
        for kind in PieceKind::ALL {
            for cell in kind.spawn_cells() {
                assert!(cell.in_bounds(), "{kind:?} spawns at {cell:?}");
            }
        }
    }

    #[test]
    fn spawn_is_shifted_by_spawn_column() {
        let cells = PieceKind::I.spawn_cells();
        assert_eq!(cells[0], Cell::new(3, 0));
        assert_eq!(cells[3], Cell::new(6, 0));
    }

    #[test]
    fn colours_are_distinct_per_kind() {
        let colours: HashSet<_> = PieceKind::ALL.iter().map(|k| k.color()).collect();
        assert_eq!(colours.len(), PieceKind::ALL.len());
        assert!(!colours.contains(&PieceColor::Gray));
    }

    #[test]
    fn from_index_is_catalog_order() {
        assert_eq!(PieceKind::from_index(0), PieceKind::I);
        assert_eq!(PieceKind::from_index(6), PieceKind::S);
    }

    #[test]
    fn obstacle_layout_cycles_by_level() {
        let level2: Vec<_> = obstacle_layout(2).collect();
        let level5: Vec<_> = obstacle_layout(5).collect();
        assert_eq!(level2, level5);
        let level1: Vec<_> = obstacle_layout(1).collect();
        let level4: Vec<_> = obstacle_layout(4).collect();
        assert_eq!(level1, level4);
        assert_ne!(level1, level2);
    }

    #[test]
    fn obstacles_never_fill_a_row() {
        for layout in OBSTACLES {
            for row in 0..GRID_HEIGHT {
                let n = layout.iter().filter(|&&(_, r)| r == row).count();
                assert!(n < GRID_WIDTH as usize);
            }
            for &(col, row) in layout {
                assert!(Cell::new(col, row).in_bounds());
            }
        }
    }
}
