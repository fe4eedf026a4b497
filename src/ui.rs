//! Layout and drawing: playfield, next preview, score panel, game over overlay.
//!
//! The terminal side never looks at `GameState`. It keeps its own set of
//! drawable blocks in a [`Canvas`], updated from snapshot diffs.

use crate::grid::{Cell, GRID_HEIGHT, GRID_WIDTH};
use crate::snapshot::{diff, Layer, RenderCommand, Renderer, Snapshot};
use crate::state::{BlockId, VisualBlock};
use crate::theme::Theme;
use ratatui::Frame;
use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Widget};
use std::collections::HashMap;

/// Each grid cell is two terminal columns wide so blocks look square.
const CELL_WIDTH: u16 = 2;
const CELL_HEIGHT: u16 = 1;
const BLOCK_GLYPH: &str = "██";

const SIDEBAR_WIDTH: u16 = 22;
/// Preview box holds the widest piece (4 cells) and the tallest (2 rows).
const PREVIEW_COLS: u16 = 4;
const PREVIEW_ROWS: u16 = 2;

/// Playfield size in terminal cells, border included.
const fn playfield_size() -> (u16, u16) {
    (
        GRID_WIDTH as u16 * CELL_WIDTH + 2,
        GRID_HEIGHT as u16 * CELL_HEIGHT + 2,
    )
}

/// Drawable blocks keyed by id plus the panel numbers from the last snapshot.
#[derive(Debug, Default)]
pub struct Canvas {
    blocks: HashMap<BlockId, (Layer, VisualBlock)>,
    last: Option<Snapshot>,
}

impl Renderer for Canvas {
    fn apply(&mut self, command: &RenderCommand) {
        match *command {
            RenderCommand::Create { block, layer } => {
                self.blocks.insert(block.id, (layer, block));
            }
            RenderCommand::Move { id, cell, layer } => {
                if let Some(entry) = self.blocks.get_mut(&id) {
                    entry.0 = layer;
                    entry.1.cell = cell;
                }
            }
            RenderCommand::Remove { id } => {
                self.blocks.remove(&id);
            }
        }
    }
}

impl Canvas {
    /// Bring the canvas in line with `snapshot`. Returns the commands applied.
    pub fn present(&mut self, snapshot: Snapshot) -> usize {
        let commands = match &self.last {
            Some(prev) => diff(prev, &snapshot),
            None => snapshot.initial_commands(),
        };
        self.apply_all(&commands);
        self.last = Some(snapshot);
        commands.len()
    }

    fn layer(&self, layer: Layer) -> impl Iterator<Item = &VisualBlock> {
        self.blocks
            .values()
            .filter(move |(l, _)| *l == layer)
            .map(|(_, b)| b)
    }

    fn stats(&self) -> (u32, u32, u32, bool) {
        self.last.as_ref().map_or((0, 0, 1, false), |s| {
            (s.score, s.high_score, s.level, s.game_end)
        })
    }
}

#[cfg(test)]
impl Canvas {
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }
}

/// Draw the whole screen from the canvas.
pub fn draw(frame: &mut Frame, canvas: &Canvas, theme: &Theme) {
    let area = frame.area();
    let (pw, ph) = playfield_size();
    let total_w = pw + SIDEBAR_WIDTH;

    // Center horizontally
    let horiz_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Fill(1),
            Constraint::Length(total_w),
            Constraint::Fill(1),
        ])
        .split(area);

    // Center vertically
    let vert_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Fill(1),
            Constraint::Length(ph),
            Constraint::Fill(1),
        ])
        .split(horiz_chunks[1]);

    let inner = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(pw), Constraint::Length(SIDEBAR_WIDTH)])
        .split(vert_chunks[1]);
    let (playfield_area, sidebar_area) = (inner[0], inner[1]);

    draw_playfield(frame.buffer_mut(), canvas, theme, playfield_area);
    draw_sidebar(frame.buffer_mut(), canvas, theme, sidebar_area);
    if canvas.stats().3 {
        draw_game_over(frame.buffer_mut(), canvas, theme, playfield_area);
    }
}

fn border_style(theme: &Theme) -> Style {
    Style::default().fg(theme.div_line).bg(theme.bg)
}

fn draw_playfield(buf: &mut Buffer, canvas: &Canvas, theme: &Theme, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style(theme))
        .title(Span::styled(" blockfall ", Style::default().fg(theme.title)));
    let board = block.inner(area);
    block.render(area, buf);

    for y in board.top()..board.bottom() {
        for x in board.left()..board.right() {
            buf[(x, y)].set_symbol(" ").set_style(Style::default().bg(theme.bg));
        }
    }

    for block in canvas.layer(Layer::Settled).chain(canvas.layer(Layer::Current)) {
        paint_cell(buf, board, block.cell, theme.block_color(block.color), theme.bg);
    }
}

/// Paint one grid cell inside `board`; cells outside it are dropped.
fn paint_cell(buf: &mut Buffer, board: Rect, cell: Cell, color: Color, bg: Color) {
    if cell.col < 0 || cell.row < 0 {
        return;
    }
    let x = board.x + cell.col as u16 * CELL_WIDTH;
    let y = board.y + cell.row as u16 * CELL_HEIGHT;
    if x + CELL_WIDTH > board.right() || y >= board.bottom() {
        return;
    }
    buf.set_string(x, y, BLOCK_GLYPH, Style::default().fg(color).bg(bg));
}

fn draw_sidebar(buf: &mut Buffer, canvas: &Canvas, theme: &Theme, area: Rect) {
    let title_style = Style::default().fg(theme.title);
    let fg_style = Style::default().fg(theme.main_fg);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(PREVIEW_ROWS + 2), // Next (border + preview)
            Constraint::Length(1),                // gap
            Constraint::Length(5),                // Stats
            Constraint::Length(1),                // gap
            Constraint::Length(7),                // Keys
        ])
        .split(area);

    // --- Next ---
    let next_block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style(theme))
        .title(Span::styled("Next", title_style));
    let next_inner = next_block.inner(chunks[0]);
    next_block.render(chunks[0], buf);
    draw_next_preview(buf, canvas, theme, next_inner);

    // --- Stats ---
    let (score, high_score, level, _) = canvas.stats();
    let stats_block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style(theme));
    let stats_inner = stats_block.inner(chunks[2]);
    stats_block.render(chunks[2], buf);
    let stat = |label: &'static str, value: u32| {
        Line::from(vec![
            Span::styled(label, title_style),
            Span::styled(value.to_string(), fg_style),
        ])
    };
    Paragraph::new(vec![
        stat("Score: ", score),
        stat("High:  ", high_score),
        stat("Level: ", level),
    ])
    .render(stats_inner, buf);

    // --- Keys ---
    let keys_block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style(theme));
    let keys_inner = keys_block.inner(chunks[4]);
    keys_block.render(chunks[4], buf);
    Paragraph::new(vec![
        Line::from(Span::styled("A/D   Move", fg_style)),
        Line::from(Span::styled("S     Down", fg_style)),
        Line::from(Span::styled("W     Rotate", fg_style)),
        Line::from(Span::styled("Space Restart", fg_style)),
        Line::from(Span::styled("Q     Quit", fg_style)),
    ])
    .render(keys_inner, buf);
}

/// Preview blocks drawn relative to their own top-left corner, centred in the box.
fn draw_next_preview(buf: &mut Buffer, canvas: &Canvas, theme: &Theme, area: Rect) {
    let blocks: Vec<&VisualBlock> = canvas.layer(Layer::Next).collect();
    let Some(min_col) = blocks.iter().map(|b| b.cell.col).min() else {
        return;
    };
    let min_row = blocks.iter().map(|b| b.cell.row).min().unwrap_or(0);
    let max_col = blocks.iter().map(|b| b.cell.col).max().unwrap_or(min_col);
    let width = ((max_col - min_col + 1) as u16).min(PREVIEW_COLS) * CELL_WIDTH;
    let box_rect = Rect {
        x: area.x + area.width.saturating_sub(width) / 2,
        y: area.y,
        width: width.min(area.width),
        height: area.height.min(PREVIEW_ROWS * CELL_HEIGHT),
    };
    for block in blocks {
        let cell = Cell::new(block.cell.col - min_col, block.cell.row - min_row);
        paint_cell(buf, box_rect, cell, theme.block_color(block.color), theme.bg);
    }
}

fn draw_game_over(buf: &mut Buffer, canvas: &Canvas, theme: &Theme, area: Rect) {
    let popup_w = 20u16;
    let popup_h = 6u16;
    let popup = Rect {
        x: area.x + area.width.saturating_sub(popup_w) / 2,
        y: area.y + area.height.saturating_sub(popup_h) / 2,
        width: popup_w.min(area.width),
        height: popup_h.min(area.height),
    };
    let (score, _, _, _) = canvas.stats();
    let lines = vec![
        Line::from(Span::styled(
            " Game Over ",
            Style::default()
                .fg(Color::White)
                .bg(Color::Red)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            format!(" Score: {} ", score),
            Style::default().fg(theme.main_fg),
        )),
        Line::from(Span::styled(
            " Space: Restart ",
            Style::default().fg(theme.main_fg),
        )),
        Line::from(Span::styled(" Q: Quit ", Style::default().fg(theme.main_fg))),
    ];
    Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border_style(theme)),
        )
        .render(popup, buf);
}
