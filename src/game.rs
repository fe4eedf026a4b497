//! Transition engine: every action maps a `GameState` to the next one.
//!
//! Transitions are total. Invalid moves leave the piece where it is, and
//! once the game has ended only [`Action::Restart`] changes anything.

use crate::catalog::{obstacle_layout, PieceColor};
use crate::grid::{Cell, GRID_WIDTH};
use crate::state::{level_for_score, GameState, VisualBlock, ROW_CLEAR_POINTS};

/// Logical input to the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Periodic forced descent.
    Tick,
    MoveLeft,
    MoveRight,
    /// One explicit step down; never settles the piece.
    MoveDown,
    Rotate,
    Restart,
}

impl Action {
    /// Parse a script token (`left`, `right`, `down`, `rotate`, `restart`, `tick`).
    ///
    /// Anything else is treated as `tick`: an unrecognized token advances the board.
    pub fn from_token(token: &str) -> Self {
        match token.trim().to_ascii_lowercase().as_str() {
            "left" => Self::MoveLeft,
            "right" => Self::MoveRight,
            "down" => Self::MoveDown,
            "rotate" => Self::Rotate,
            "restart" => Self::Restart,
            _ => Self::Tick,
        }
    }
}

/// What the row-clear refresh did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ClearReport {
    pub rows: u32,
    pub level_up: bool,
}

impl GameState {
    /// Apply one action. While playing, full rows are cleared first.
    pub fn apply(mut self, action: Action) -> Self {
        if self.game_end {
            return match action {
                Action::Restart => self.restart(),
                _ => self,
            };
        }
        self.refresh();
        match action {
            Action::Tick => self.tick(),
            Action::MoveLeft => self.shift(-1),
            Action::MoveRight => self.shift(1),
            Action::MoveDown => self.soft_drop(),
            Action::Rotate => self.rotate(),
            // Only meaningful once the game has ended.
            Action::Restart => self,
        }
    }

    /// Clear full rows, then re-derive level and high score and inject the
    /// new level's obstacles on a level change.
    pub fn refresh(&mut self) -> ClearReport {
        let rows = self.clear_full_rows();
        let level = level_for_score(self.score);
        let level_up = level > self.level;
        self.level = level;
        self.high_score = self.high_score.max(self.score);
        if level_up {
            self.inject_obstacles(level);
        }
        ClearReport { rows, level_up }
    }

    /// Remove every full row top to bottom, shifting the blocks above it down one row.
    fn clear_full_rows(&mut self) -> u32 {
        let mut rows: Vec<i32> = self.settled.iter().map(|b| b.cell.row).collect();
        rows.sort_unstable();
        rows.dedup();

        let mut cleared = 0;
        for row in rows {
            let count = self.settled.iter().filter(|b| b.cell.row == row).count();
            if count != GRID_WIDTH as usize {
                continue;
            }
            self.settled.retain(|b| b.cell.row != row);
            for block in &mut self.settled {
                if block.cell.row < row {
                    block.cell.row += 1;
                }
            }
            cleared += 1;
        }
        self.score += cleared * ROW_CLEAR_POINTS;
        cleared
    }

    /// Add the level's obstacle layout as settled blocks, skipping occupied cells.
    fn inject_obstacles(&mut self, level: u32) {
        for cell in obstacle_layout(level) {
            if self.is_settled(cell) || self.piece_covers(cell) {
                continue;
            }
            let id = self.alloc_id();
            self.settled.push(VisualBlock {
                id,
                cell,
                color: PieceColor::Gray,
            });
        }
    }

    fn piece_covers(&self, cell: Cell) -> bool {
        self.current.iter().any(|b| b.cell == cell)
    }

    /// Some block of the falling piece sits directly above a settled block.
    pub fn is_landing(&self) -> bool {
        self.current
            .iter()
            .any(|b| self.is_settled(b.cell.offset(0, 1)))
    }

    /// One row down stays above the floor and the piece is not landing.
    pub fn can_descend(&self) -> bool {
        self.current
            .iter()
            .all(|b| b.cell.offset(0, 1).row_in_bounds())
            && !self.is_landing()
    }

    /// Horizontal shift by `dcol` stays inside the walls, does not hit a
    /// settled block on the same row, and the piece is not already landing.
    pub fn can_shift(&self, dcol: i32) -> bool {
        !self.is_landing()
            && self.current.iter().all(|b| {
                let target = b.cell.offset(dcol, 0);
                target.col_in_bounds() && !self.is_settled(target)
            })
    }

    /// Quarter turn around block 2: `col' = pc + (row - pr)`, `row' = pr - (col - pc)`.
    pub fn rotated_cells(&self) -> [Cell; 4] {
        let pivot = self.current[2].cell;
        self.current.map(|b| {
            Cell::new(
                pivot.col + (b.cell.row - pivot.row),
                pivot.row - (b.cell.col - pivot.col),
            )
        })
    }

    fn descend(&mut self) {
        for block in &mut self.current {
            block.cell.row += 1;
        }
    }

    fn tick(mut self) -> Self {
        if self.can_descend() {
            self.descend();
            return self;
        }

        let landed = self.current;
        let touched_top = landed.iter().any(|b| b.cell.row == 0);
        for block in landed {
            if !self.is_settled(block.cell) {
                self.settled.push(block);
            }
        }
        self.current = self.next;
        self.next = self.spawn_piece();
        // A promoted piece spawning into the pile ends the game as well.
        let blocked = self.current.iter().any(|b| self.is_settled(b.cell));
        self.game_end = touched_top || blocked;
        self
    }

    fn shift(mut self, dcol: i32) -> Self {
        if self.can_shift(dcol) {
            for block in &mut self.current {
                block.cell.col += dcol;
            }
        }
        self
    }

    fn soft_drop(mut self) -> Self {
        if self.can_descend() {
            self.descend();
        }
        self
    }

    fn rotate(mut self) -> Self {
        let cells = self.rotated_cells();
        if cells.iter().all(|&c| c.in_bounds() && !self.is_settled(c)) {
            for (block, cell) in self.current.iter_mut().zip(cells) {
                block.cell = cell;
            }
        }
        self
    }

    /// New board and pieces; keeps the high score and the generator position.
    fn restart(self) -> Self {
        Self::fresh(self.rng, self.next_id, self.high_score)
    }
}

/// Fold a sequence of actions over a state, in order.
pub fn run<I>(state: GameState, actions: I) -> GameState
where
    I: IntoIterator<Item = Action>,
{
    actions.into_iter().fold(state, GameState::apply)
}
