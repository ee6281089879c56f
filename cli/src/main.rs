use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use sweepgrid_core::{CellCount, Coord, Difficulty, GameConfig, GridView};
use web_time::Instant;

use crate::command::Command;
use crate::render::{Header, render};
use crate::scores::HighScores;
use crate::session::{Flow, GameMode, Session};

mod command;
mod render;
mod scores;
mod session;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,

    /// Preset to start with: easy, medium or hard
    #[arg(short, long, default_value_t = Difficulty::Easy)]
    difficulty: Difficulty,

    /// Custom grid width, custom games are not scored
    #[arg(long, requires_all = ["height", "mines"])]
    width: Option<Coord>,

    /// Custom grid height
    #[arg(long, requires_all = ["width", "mines"])]
    height: Option<Coord>,

    /// Custom mine count
    #[arg(long, requires_all = ["width", "height"])]
    mines: Option<CellCount>,

    /// Force a seed instead of random
    #[arg(short, long)]
    seed: Option<u64>,

    /// Where best times are kept
    #[arg(long, default_value = "high_scores.json")]
    scores: PathBuf,
}

impl Args {
    fn mode(&self) -> anyhow::Result<GameMode> {
        Ok(match (self.width, self.height, self.mines) {
            (Some(width), Some(height), Some(mines)) => {
                GameMode::Custom(GameConfig::new((width, height), mines)?)
            }
            _ => GameMode::Preset(self.difficulty),
        })
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    env_logger::Builder::new()
        .filter_level(args.verbose.log_level_filter())
        .init();

    let seed = args.seed.unwrap_or_else(rand::random);
    log::debug!("seed: {}", seed);

    let mut scores = HighScores::load(&args.scores);
    let mut session = Session::new(args.mode()?, seed);

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    draw(&mut stdout, &session, &scores)?;

    for line in stdin.lock().lines() {
        let line = line.context("reading input")?;
        if line.trim().is_empty() {
            continue;
        }

        let command: Command = match line.parse() {
            Ok(command) => command,
            Err(err) => {
                writeln!(stdout, "{err}")?;
                continue;
            }
        };

        if session.apply(command, Instant::now()) == Flow::Quit {
            break;
        }

        if let Some(clear) = session.take_clear() {
            if scores.record(clear.difficulty, clear.seconds) {
                log::info!("New best on {}: {}s", clear.difficulty, clear.seconds);
                if let Err(err) = scores.save(&args.scores) {
                    log::error!("Could not save high scores: {err:#}");
                }
            }
        }

        draw(&mut stdout, &session, &scores)?;
    }

    Ok(())
}

fn draw(out: &mut impl Write, session: &Session, scores: &HighScores) -> io::Result<()> {
    let grid = session.grid();
    let header = Header {
        mines_remaining: grid.mines_remaining(),
        best: session.mode().difficulty().and_then(|d| scores.best(d)),
        elapsed: session.elapsed(Instant::now()),
    };
    let view = GridView::from_grid(grid);
    write!(out, "{}", render(&view, header, session.highlight()))?;
    out.flush()
}
