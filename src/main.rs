//! blockfall: falling-block puzzle in the terminal, driven by a pure state machine.

mod app;
mod catalog;
mod game;
mod grid;
mod headless;
mod input;
mod rng;
mod snapshot;
mod state;
mod theme;
mod ui;

use anyhow::{Context, Result};
use app::App;
use clap::{Parser, ValueEnum};

/// Options derived from CLI that affect game behaviour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameConfig {
    /// Seed for the piece generator.
    pub seed: u32,
    /// Milliseconds between forced descents.
    pub tick_ms: u64,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let config = GameConfig {
        seed: args.seed,
        tick_ms: args.tick_ms,
    };
    if args.headless {
        return headless::run(&config, args.actions.as_deref().unwrap_or_default());
    }
    let theme = theme::Theme::load(args.theme.as_deref(), args.palette)
        .with_context(|| format!("loading theme {:?}", args.theme))?;
    let mut app = App::new(&config, theme, args.frame_rate);
    app.run()?;
    Ok(())
}

/// Falling-block puzzle in the terminal.
#[derive(Debug, Parser)]
#[command(
    name = "blockfall",
    version,
    about = "Falling-block puzzle in the terminal. Fill rows to clear them; every 300 points the level rises and obstacles drop in.",
    long_about = "blockfall is a small falling-block puzzle.\n\n\
        Pieces fall one row per tick. Complete a row to clear it for 100 points. \
        Every 300 points the level rises and a layout of gray obstacle blocks is added. \
        The game ends when a piece settles touching the top row.\n\n\
        CONTROLS:\n  A/D or Left/Right  Move    W or Up    Rotate    S or Down  Step down\n  Space/Enter        Restart after game over    Q / Esc    Quit\n\n\
        Use --headless --actions \"tick,left,rotate\" to run a script and print the board."
)]
pub struct Args {
    /// Seed for the piece generator.
    #[arg(long, default_value_t = rng::DEFAULT_SEED, value_name = "N")]
    pub seed: u32,

    /// Milliseconds between forced descents.
    #[arg(long, default_value_t = 500, value_name = "MS")]
    pub tick_ms: u64,

    /// Target render frames per second.
    #[arg(long, default_value = "30.0", value_name = "RATE")]
    pub frame_rate: f64,

    /// Path to theme file (btop-style theme[key]=\"value\"). Uses One Dark if not set.
    #[arg(short, long, value_name = "FILE")]
    pub theme: Option<std::path::PathBuf>,

    /// Colour palette: normal (theme) or high-contrast.
    #[arg(long, default_value = "normal")]
    pub palette: Palette,

    /// Run the action script and print the final board instead of opening the TUI.
    #[arg(long)]
    pub headless: bool,

    /// Comma-separated actions for --headless: left, right, down, rotate, restart, tick.
    #[arg(long, value_name = "LIST", requires = "headless")]
    pub actions: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Palette {
    #[default]
    Normal,

    #[value(alias = "highcontrast", alias = "contrast")]
    HighContrast,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_is_well_formed() {
        Args::command().debug_assert();
    }

    #[test]
    fn defaults() {
        let args = Args::try_parse_from(["blockfall"]).unwrap();
        assert_eq!(args.seed, rng::DEFAULT_SEED);
        assert_eq!(args.tick_ms, 500);
        assert_eq!(args.palette, Palette::Normal);
        assert!(!args.headless);
    }

    #[test]
    fn headless_script() {
        let args = Args::try_parse_from([
            "blockfall",
            "--headless",
            "--seed",
            "9",
            "--actions",
            "tick,left",
        ])
        .unwrap();
        assert!(args.headless);
        assert_eq!(args.seed, 9);
        assert_eq!(args.actions.as_deref(), Some("tick,left"));
    }

    #[test]
    fn actions_require_headless() {
        assert!(Args::try_parse_from(["blockfall", "--actions", "tick"]).is_err());
    }

    #[test]
    fn palette_alias() {
        let args = Args::try_parse_from(["blockfall", "--palette", "contrast"]).unwrap();
        assert_eq!(args.palette, Palette::HighContrast);
    }
}
