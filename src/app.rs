//! App: terminal init, main loop, tick and key handling.
//!
//! Keys and the tick timer both feed one action queue. Actions are taken off
//! the queue one at a time, each producing the next state, and every state is
//! pushed to the canvas before the next action runs.

use crate::GameConfig;
use crate::game::Action;
use crate::input::{key_to_command, Command};
use crate::snapshot::Snapshot;
use crate::state::GameState;
use crate::theme::Theme;
use crate::ui::{self, Canvas};
use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind};
use ratatui::DefaultTerminal;
use std::collections::VecDeque;
use std::time::{Duration, Instant};

const DEFAULT_FRAME_RATE: f64 = 60.0;
const MIN_FRAME_RATE: f64 = 1.0;
const MAX_FRAME_RATE: f64 = 240.0;

pub struct App {
    theme: Theme,
    state: GameState,
    canvas: Canvas,
    queue: VecDeque<Action>,
    tick_interval: Duration,
    frame_duration: Duration,
    last_tick: Instant,
}

impl App {
    pub fn new(config: &GameConfig, theme: Theme, frame_rate: f64) -> Self {
        let state = GameState::new(config.seed);
        let mut canvas = Canvas::default();
        canvas.present(Snapshot::from(&state));
        let frame_rate = if frame_rate.is_finite() {
            frame_rate.clamp(MIN_FRAME_RATE, MAX_FRAME_RATE)
        } else {
            DEFAULT_FRAME_RATE
        };
        Self {
            theme,
            state,
            canvas,
            queue: VecDeque::new(),
            tick_interval: Duration::from_millis(config.tick_ms.max(1)),
            frame_duration: Duration::from_secs_f64(1.0 / frame_rate),
            last_tick: Instant::now(),
        }
    }

    pub fn run(&mut self) -> Result<()> {
        use crossterm::{
            execute,
            terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
        };

        enable_raw_mode()?;
        let mut stdout = std::io::stdout();
        execute!(stdout, EnterAlternateScreen)?;

        let result = ratatui::DefaultTerminal::new(ratatui::backend::CrosstermBackend::new(stdout))
            .map_err(anyhow::Error::from)
            .and_then(|mut terminal| self.run_loop(&mut terminal));

        // Restore
        execute!(std::io::stdout(), LeaveAlternateScreen)?;
        disable_raw_mode()?;

        result
    }

    /// Take every queued action in arrival order, presenting each resulting state.
    fn drain_queue(&mut self) {
        while let Some(action) = self.queue.pop_front() {
            self.state = self.state.clone().apply(action);
            self.canvas.present(Snapshot::from(&self.state));
        }
    }

    fn run_loop(&mut self, terminal: &mut DefaultTerminal) -> Result<()> {
        loop {
            let now = Instant::now();
            terminal.draw(|f| ui::draw(f, &self.canvas, &self.theme))?;

            // Wake for whichever comes first: the next frame or the next tick.
            let until_tick = self.tick_interval.saturating_sub(self.last_tick.elapsed());
            let timeout = self
                .frame_duration
                .saturating_sub(now.elapsed())
                .min(until_tick);

            if event::poll(timeout)? {
                while event::poll(Duration::ZERO)? {
                    let Event::Key(key) = event::read()? else {
                        continue;
                    };
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }
                    match key_to_command(key) {
                        Command::Quit => return Ok(()),
                        Command::Game(action) => self.queue.push_back(action),
                        Command::None => {}
                    }
                }
            }

            if self.last_tick.elapsed() >= self.tick_interval {
                self.last_tick = Instant::now();
                self.queue.push_back(Action::Tick);
            }

            self.drain_queue();
        }
    }
}
