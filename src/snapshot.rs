//! Read-only view of a game state, and the render commands that turn one
//! snapshot into the next.

use crate::grid::Cell;
use crate::state::{BlockId, GameState, VisualBlock};
use std::collections::HashMap;

/// Which collection a visual block belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Layer {
    Current,
    Next,
    Settled,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub current: [VisualBlock; 4],
    pub next: [VisualBlock; 4],
    pub settled: Vec<VisualBlock>,
    pub score: u32,
    pub high_score: u32,
    pub level: u32,
    pub game_end: bool,
}

impl From<&GameState> for Snapshot {
    fn from(s: &GameState) -> Self {
        Self {
            current: s.current,
            next: s.next,
            settled: s.settled.clone(),
            score: s.score,
            high_score: s.high_score,
            level: s.level,
            game_end: s.game_end,
        }
    }
}

impl Snapshot {
    /// Every block with its layer.
    pub fn blocks(&self) -> impl Iterator<Item = (Layer, &VisualBlock)> {
        self.current
            .iter()
            .map(|b| (Layer::Current, b))
            .chain(self.next.iter().map(|b| (Layer::Next, b)))
            .chain(self.settled.iter().map(|b| (Layer::Settled, b)))
    }

    /// Commands that create every block of this snapshot on an empty surface.
    pub fn initial_commands(&self) -> Vec<RenderCommand> {
        self.blocks()
            .map(|(layer, block)| RenderCommand::Create {
                block: *block,
                layer,
            })
            .collect()
    }
}

/// One request to the drawing surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderCommand {
    Create { block: VisualBlock, layer: Layer },
    Move { id: BlockId, cell: Cell, layer: Layer },
    Remove { id: BlockId },
}

/// A surface that owns drawable blocks keyed by id.
pub trait Renderer {
    fn apply(&mut self, command: &RenderCommand);

    fn apply_all(&mut self, commands: &[RenderCommand]) {
        for command in commands {
            self.apply(command);
        }
    }
}

/// Commands turning `prev` into `next`: removals first, then moves, then creations.
pub fn diff(prev: &Snapshot, next: &Snapshot) -> Vec<RenderCommand> {
    let before: HashMap<BlockId, (Layer, Cell)> = prev
        .blocks()
        .map(|(layer, b)| (b.id, (layer, b.cell)))
        .collect();
    let after: HashMap<BlockId, Layer> = next.blocks().map(|(layer, b)| (b.id, layer)).collect();

    let mut removes: Vec<RenderCommand> = prev
        .blocks()
        .filter(|(_, b)| !after.contains_key(&b.id))
        .map(|(_, b)| RenderCommand::Remove { id: b.id })
        .collect();
    let mut rest = Vec::new();
    for (layer, block) in next.blocks() {
        match before.get(&block.id) {
            None => rest.push(RenderCommand::Create {
                block: *block,
                layer,
            }),
            Some(&(old_layer, old_cell)) if old_layer != layer || old_cell != block.cell => {
                rest.push(RenderCommand::Move {
                    id: block.id,
                    cell: block.cell,
                    layer,
                });
            }
            Some(_) => {}
        }
    }
    rest.sort_by_key(|c| matches!(c, RenderCommand::Create { .. }));
    removes.append(&mut rest);
    removes
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Action;

    /// Minimal surface recording the blocks it holds.
    #[derive(Default)]
    struct Recorder {
        blocks: HashMap<BlockId, (Layer, VisualBlock)>,
    }

    impl Renderer for Recorder {
        fn apply(&mut self, command: &RenderCommand) {
            match *command {
                RenderCommand::Create { block, layer } => {
                    assert!(self.blocks.insert(block.id, (layer, block)).is_none());
                }
                RenderCommand::Move { id, cell, layer } => {
                    let entry = self.blocks.get_mut(&id).expect("move of unknown block");
                    entry.0 = layer;
                    entry.1.cell = cell;
                }
                RenderCommand::Remove { id } => {
                    assert!(self.blocks.remove(&id).is_some());
                }
            }
        }
    }

    impl Recorder {
        fn matches(&self, snap: &Snapshot) -> bool {
            let expected: HashMap<_, _> = snap.blocks().map(|(l, b)| (b.id, (l, *b))).collect();
            expected == self.blocks
        }
    }

    #[test]
    fn identical_snapshots_produce_no_commands() {
        let s = Snapshot::from(&GameState::new(1));
        assert!(diff(&s, &s).is_empty());
    }

    #[test]
    fn tick_moves_the_current_piece() {
        let state = GameState::new(1);
        let a = Snapshot::from(&state);
        let b = Snapshot::from(&state.apply(Action::Tick));
        let commands = diff(&a, &b);
        assert_eq!(commands.len(), 4);
        assert!(
            commands
                .iter()
                .all(|c| matches!(c, RenderCommand::Move { layer: Layer::Current, .. }))
        );
    }

    #[test]
    fn restart_removes_old_blocks_and_creates_new() {
        let mut state = GameState::new(1);
        state.game_end = true;
        let a = Snapshot::from(&state);
        let b = Snapshot::from(&state.apply(Action::Restart));
        let commands = diff(&a, &b);
        let removes = commands
            .iter()
            .filter(|c| matches!(c, RenderCommand::Remove { .. }))
            .count();
        let creates = commands
            .iter()
            .filter(|c| matches!(c, RenderCommand::Create { .. }))
            .count();
        assert_eq!(removes, 8);
        assert_eq!(creates, 8);
        assert!(matches!(commands[0], RenderCommand::Remove { .. }));
    }

    #[test]
    fn replaying_diffs_tracks_the_game() {
        let mut state = GameState::new(crate::rng::DEFAULT_SEED);
        let mut prev = Snapshot::from(&state);
        let mut surface = Recorder::default();
        surface.apply_all(&prev.initial_commands());

        let script = [
            Action::Tick,
            Action::MoveLeft,
            Action::Tick,
            Action::Rotate,
            Action::MoveRight,
            Action::MoveDown,
        ];
        for action in script.iter().copied().cycle().take(400) {
            state = state.apply(action);
            let next = Snapshot::from(&state);
            surface.apply_all(&diff(&prev, &next));
            assert!(surface.matches(&next));
            prev = next;
        }
    }
}
