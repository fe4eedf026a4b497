//! Game state: falling piece, preview piece, settled pile, score and level.
//!
//! A `GameState` is only ever replaced wholesale by the transitions in
//! [`crate::game`]; nothing else mutates it.

use crate::catalog::{PieceColor, PieceKind};
use crate::grid::Cell;
use crate::rng::Lcg;

/// Points per cleared row.
pub const ROW_CLEAR_POINTS: u32 = 100;
/// Score needed per level.
pub const POINTS_PER_LEVEL: u32 = 300;

/// Identity of one visual block. Allocated once, never reused within a state lineage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BlockId(pub u32);

/// One placed unit square.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisualBlock {
    pub id: BlockId,
    pub cell: Cell,
    pub color: PieceColor,
}

/// Four blocks forming a piece.
pub type Piece = [VisualBlock; 4];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    pub current: Piece,
    pub next: Piece,
    /// Settled blocks and obstacles; at most one per cell.
    pub settled: Vec<VisualBlock>,
    pub score: u32,
    pub high_score: u32,
    pub level: u32,
    pub game_end: bool,
    pub(crate) rng: Lcg,
    pub(crate) next_id: u32,
}

/// Level for a score: `score / 300 + 1`.
pub const fn level_for_score(score: u32) -> u32 {
    score / POINTS_PER_LEVEL + 1
}

impl GameState {
    /// Fresh game: draws the current piece, then the preview piece.
    pub fn new(seed: u32) -> Self {
        Self::fresh(Lcg::new(seed), 0, 0)
    }

    /// Board reset that keeps the generator position, id counter and high score.
    pub(crate) fn fresh(rng: Lcg, next_id: u32, high_score: u32) -> Self {
        let placeholder = VisualBlock {
            id: BlockId(0),
            cell: Cell::new(0, 0),
            color: PieceColor::Gray,
        };
        let mut state = Self {
            current: [placeholder; 4],
            next: [placeholder; 4],
            settled: Vec::new(),
            score: 0,
            high_score,
            level: 1,
            game_end: false,
            rng,
            next_id,
        };
        state.current = state.spawn_piece();
        state.next = state.spawn_piece();
        state
    }

    pub(crate) fn alloc_id(&mut self) -> BlockId {
        let id = BlockId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Draw a catalog index and build 4 new blocks at the spawn position.
    pub(crate) fn spawn_piece(&mut self) -> Piece {
        let kind = PieceKind::from_index(self.rng.next_in(0, PieceKind::ALL.len() as u32 - 1));
        let color = kind.color();
        kind.spawn_cells().map(|cell| VisualBlock {
            id: self.alloc_id(),
            cell,
            color,
        })
    }

    /// True if a settled block sits on `cell`.
    #[inline]
    pub fn is_settled(&self, cell: Cell) -> bool {
        self.settled.iter().any(|b| b.cell == cell)
    }

    /// Piece kind of the falling piece, recovered from its colour.
    pub fn current_kind(&self) -> Option<PieceKind> {
        kind_of(&self.current)
    }

    pub fn next_kind(&self) -> Option<PieceKind> {
        kind_of(&self.next)
    }
}

fn kind_of(piece: &Piece) -> Option<PieceKind> {
    let color = piece[0].color;
    PieceKind::ALL.into_iter().find(|k| k.color() == color)
}
