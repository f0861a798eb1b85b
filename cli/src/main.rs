use std::io::{self, BufRead, Write};

use anyhow::Context;
use clap::{Parser, ValueEnum};
use minesweep_core::{CellCount, CellGeometry, Coord, GameConfig, Session, SessionEvent};

use command::{Command, HELP, ParseCommandError};
use render::render;

mod command;
mod render;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, ValueEnum)]
enum Preset {
    #[default]
    Classic,
    Beginner,
    Intermediate,
    Expert,
}

impl From<Preset> for GameConfig {
    fn from(preset: Preset) -> Self {
        match preset {
            Preset::Classic => GameConfig::CLASSIC,
            Preset::Beginner => GameConfig::BEGINNER,
            Preset::Intermediate => GameConfig::INTERMEDIATE,
            Preset::Expert => GameConfig::EXPERT,
        }
    }
}

#[derive(Parser, Debug)]
#[command(version, about = "Text front end for minesweep", long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,

    /// Board preset, individual dimensions override it
    #[arg(short, long, value_enum, default_value_t)]
    preset: Preset,

    /// Board width in cells
    #[arg(long)]
    width: Option<Coord>,

    /// Board height in cells
    #[arg(long)]
    height: Option<Coord>,

    /// Number of mines
    #[arg(short, long)]
    mines: Option<CellCount>,

    /// Force a seed instead of random
    #[arg(short, long)]
    seed: Option<u64>,

    /// Pixel size of a cell for `click` and `rclick`
    #[arg(
        long,
        default_value_t = CellGeometry::DEFAULT_CELL_SIZE,
        value_parser = clap::value_parser!(u32).range(1..),
    )]
    cell_size: u32,
}

impl Args {
    fn game_config(&self) -> minesweep_core::Result<GameConfig> {
        let preset = GameConfig::from(self.preset);
        GameConfig::new(
            self.width.unwrap_or(preset.width),
            self.height.unwrap_or(preset.height),
            self.mines.unwrap_or(preset.mines),
        )
    }
}

/// Plays commands from `input` until it ends or a quit arrives, echoing the board to `out`.
fn run(session: &mut Session, input: impl BufRead, mut out: impl Write) -> anyhow::Result<()> {
    write!(out, "{}", render(&session.view()))?;

    for line in input.lines() {
        let line = line.context("Could not read command")?;
        let command = match line.parse::<Command>() {
            Ok(command) => command,
            Err(ParseCommandError::Empty) => continue,
            Err(err) => {
                writeln!(out, "{err}")?;
                continue;
            }
        };
        log::debug!("Command: {:?}", command);

        let result = match command {
            Command::Open(coords) => session.reveal_at(coords).map(drop),
            Command::Flag(coords) => session.toggle_flag(coords).map(drop),
            Command::Act(action) => match session.handle(action) {
                Ok(SessionEvent::Quit) => break,
                other => other.map(drop),
            },
            Command::New => session.new_game(),
            Command::Help => {
                writeln!(out, "{HELP}")?;
                continue;
            }
        };

        if let Err(err) = result {
            log::warn!("Rejected {:?}: {}", command, err);
            writeln!(out, "error: {err}")?;
        }
        write!(out, "{}", render(&session.view()))?;
    }

    out.flush()?;
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    env_logger::Builder::new()
        .filter_level(args.verbose.log_level_filter())
        .init();

    let config = args.game_config().context("Invalid board configuration")?;
    let seed = args.seed.unwrap_or_else(rand::random);
    log::debug!("seed: {}", seed);

    let mut session =
        Session::new(config, seed)?.with_geometry(CellGeometry::new(args.cell_size));
    println!("{HELP}");
    run(&mut session, io::stdin().lock(), io::stdout().lock())
}
