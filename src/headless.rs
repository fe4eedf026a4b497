//! Scripted runs without a terminal: fold a list of action tokens over a
//! fresh game and print the resulting board.

use crate::GameConfig;
use crate::catalog::{PieceColor, PieceKind};
use crate::game::{self, Action};
use crate::grid::{Cell, CELL_SIZE, GRID_HEIGHT, GRID_WIDTH};
use crate::state::GameState;
use anyhow::Result;
use std::fmt::Write as _;
use std::io::Write;

/// Split a script on commas and whitespace. Empty tokens are skipped.
pub fn parse_actions(script: &str) -> Vec<Action> {
    script
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|t| !t.is_empty())
        .map(Action::from_token)
        .collect()
}

fn color_char(color: PieceColor) -> char {
    match color {
        PieceColor::Cyan => 'c',
        PieceColor::Blue => 'b',
        PieceColor::Orange => 'o',
        PieceColor::Yellow => 'y',
        PieceColor::Purple => 'p',
        PieceColor::Red => 'r',
        PieceColor::Green => 'g',
        PieceColor::Gray => 'x',
    }
}

/// The playfield as text: `.` empty, `@` falling piece, colour letters for the pile.
pub fn board_text(state: &GameState) -> String {
    let mut out = String::new();
    for row in 0..GRID_HEIGHT {
        for col in 0..GRID_WIDTH {
            let cell = Cell::new(col, row);
            let ch = if state.current.iter().any(|b| b.cell == cell) {
                '@'
            } else {
                state
                    .settled
                    .iter()
                    .find(|b| b.cell == cell)
                    .map_or('.', |b| color_char(b.color))
            };
            out.push(ch);
        }
        out.push('\n');
    }
    out
}

/// Board plus score panel and the falling piece's pixel positions.
pub fn report(state: &GameState) -> String {
    let mut out = board_text(state);
    let kind = |k: Option<PieceKind>| k.map_or_else(|| "?".to_string(), |k| format!("{k:?}"));
    let _ = writeln!(
        out,
        "score: {}  high: {}  level: {}  game over: {}",
        state.score, state.high_score, state.level, state.game_end
    );
    let _ = writeln!(
        out,
        "current: {}  next: {}",
        kind(state.current_kind()),
        kind(state.next_kind())
    );
    let pixels: Vec<String> = state
        .current
        .iter()
        .map(|b| {
            let (x, y) = b.cell.pixel(CELL_SIZE);
            format!("({x},{y})")
        })
        .collect();
    let _ = writeln!(out, "current px: {}", pixels.join(" "));
    out
}

/// Run `script` from a fresh game seeded by `config`.
pub fn run_script(config: &GameConfig, script: &str) -> GameState {
    game::run(GameState::new(config.seed), parse_actions(script))
}

pub fn run(config: &GameConfig, script: &str) -> Result<()> {
    let state = run_script(config, script);
    let mut stdout = std::io::stdout().lock();
    stdout.write_all(report(&state).as_bytes())?;
    stdout.flush()?;
    Ok(())
}
