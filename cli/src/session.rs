use std::time::Duration;

use rand::prelude::*;
use sweepgrid_core::*;
use web_time::Instant;

use crate::command::Command;

/// What kind of game is being played, only presets are scored.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum GameMode {
    Preset(Difficulty),
    Custom(GameConfig),
}

impl GameMode {
    pub fn config(self) -> GameConfig {
        match self {
            Self::Preset(difficulty) => difficulty.config(),
            Self::Custom(config) => config,
        }
    }

    pub fn difficulty(self) -> Option<Difficulty> {
        match self {
            Self::Preset(difficulty) => Some(difficulty),
            Self::Custom(_) => None,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// A clear worth submitting to the high score table.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Clear {
    pub difficulty: Difficulty,
    pub seconds: u64,
}

/// One play session: the current grid plus the clock and transient UI state
/// that surround it. A new game replaces the grid wholesale.
#[derive(Debug)]
pub struct Session {
    mode: GameMode,
    grid: Grid,
    seeds: SmallRng,
    highlight: Vec<Coord2>,
    started_at: Option<Instant>,
    finished_after: Option<Duration>,
    clear_reported: bool,
}

impl Session {
    pub fn new(mode: GameMode, seed: u64) -> Self {
        let mut seeds = SmallRng::seed_from_u64(seed);
        let grid = Grid::new(mode.config(), seeds.next_u64());
        Self::from_parts(mode, grid, seeds)
    }

    fn from_parts(mode: GameMode, grid: Grid, seeds: SmallRng) -> Self {
        Self {
            mode,
            grid,
            seeds,
            highlight: Vec::new(),
            started_at: None,
            finished_after: None,
            clear_reported: false,
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn mode(&self) -> GameMode {
        self.mode
    }

    pub fn highlight(&self) -> &[Coord2] {
        &self.highlight
    }

    /// Time played so far, frozen once the game ends.
    pub fn elapsed(&self, now: Instant) -> Duration {
        match (self.finished_after, self.started_at) {
            (Some(elapsed), _) => elapsed,
            (None, Some(started_at)) => now.saturating_duration_since(started_at),
            (None, None) => Duration::ZERO,
        }
    }

    pub fn apply(&mut self, command: Command, now: Instant) -> Flow {
        self.highlight.clear();

        match command {
            Command::Reveal(coords) => {
                let outcome = self.grid.reveal(coords);
                self.track(outcome.has_update(), now);
            }
            Command::Flag(coords) => {
                let outcome = self.grid.toggle_flag(coords);
                self.track(outcome.has_update(), now);
            }
            Command::Highlight(coords) => {
                self.highlight = self.grid.hidden_neighbors(coords).collect();
            }
            Command::Hint => match self.grid.reveal_hint() {
                Some((coords, outcome)) => {
                    log::info!("Hint: {:?}", coords);
                    self.track(outcome.has_update(), now);
                }
                None => log::info!("No hint available"),
            },
            Command::NewGame(difficulty) => self.restart(difficulty),
            Command::Quit => return Flow::Quit,
        }

        Flow::Continue
    }

    /// Returns the finished clear once per won preset game.
    pub fn take_clear(&mut self) -> Option<Clear> {
        if self.clear_reported || !self.grid.is_win() {
            return None;
        }
        let difficulty = self.mode.difficulty()?;
        let seconds = self.finished_after?.as_secs();
        self.clear_reported = true;
        Some(Clear {
            difficulty,
            seconds,
        })
    }

    fn track(&mut self, changed: bool, now: Instant) {
        if changed && self.started_at.is_none() {
            self.started_at = Some(now);
        }
        if self.grid.is_finished() && self.finished_after.is_none() {
            self.finished_after = Some(self.elapsed(now));
        }
    }

    fn restart(&mut self, difficulty: Option<Difficulty>) {
        if let Some(difficulty) = difficulty {
            self.mode = GameMode::Preset(difficulty);
        }
        log::debug!("New game: {:?}", self.mode);

        let grid = Grid::new(self.mode.config(), self.seeds.next_u64());
        let seeds = self.seeds.clone();
        *self = Self::from_parts(self.mode, grid, seeds);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn custom(size: Coord2, mines: CellCount) -> GameMode {
        GameMode::Custom(GameConfig::new(size, mines).unwrap())
    }

    fn with_layout(mode: GameMode, mines: &[Coord2]) -> Session {
        let layout = MineLayout::from_mine_coords(mode.config().size, mines).unwrap();
        let grid = Grid::with_layout(&layout, 0);
        Session::from_parts(mode, grid, SmallRng::seed_from_u64(0))
    }

    #[test]
    fn clock_starts_on_first_change_and_freezes_at_end() {
        let mut session = with_layout(GameMode::Preset(Difficulty::Easy), &[(0, 0)]);
        let t0 = Instant::now();

        assert_eq!(session.elapsed(t0), Duration::ZERO);
        session.apply(Command::Reveal((9, 9)), t0);
        assert_eq!(session.elapsed(t0 + Duration::from_secs(5)), Duration::ZERO);

        session.apply(Command::Flag((0, 0)), t0 + Duration::from_secs(1));
        assert_eq!(session.elapsed(t0 + Duration::from_secs(4)), Duration::from_secs(3));

        session.apply(Command::Reveal((8, 8)), t0 + Duration::from_secs(21));
        assert!(session.grid().is_win());
        assert_eq!(session.elapsed(t0 + Duration::from_secs(60)), Duration::from_secs(20));
    }

    #[test]
    fn preset_win_is_reported_once() {
        let mut session = with_layout(GameMode::Preset(Difficulty::Easy), &[(0, 0)]);
        let t0 = Instant::now();

        session.apply(Command::Reveal((8, 8)), t0);
        session.apply(Command::Hint, t0 + Duration::from_secs(2));

        assert_eq!(
            session.take_clear(),
            Some(Clear {
                difficulty: Difficulty::Easy,
                seconds: 0
            })
        );
        assert_eq!(session.take_clear(), None);
    }

    #[test]
    fn custom_win_is_not_scored() {
        let mut session = Session::new(custom((5, 5), 0), 1);

        session.apply(Command::Reveal((2, 2)), Instant::now());

        assert!(session.grid().is_win());
        assert_eq!(session.take_clear(), None);
    }

    #[test]
    fn loss_is_not_scored() {
        let mut session = with_layout(GameMode::Preset(Difficulty::Easy), &[(0, 0)]);

        session.apply(Command::Reveal((0, 0)), Instant::now());

        assert!(session.grid().is_game_over());
        assert_eq!(session.take_clear(), None);
    }

    #[test]
    fn highlight_lasts_one_command() {
        let mut session = with_layout(custom((3, 3), 1), &[(2, 2)]);
        let now = Instant::now();

        session.apply(Command::Highlight((1, 1)), now);
        assert_eq!(session.highlight().len(), 8);

        session.apply(Command::Flag((2, 2)), now);
        assert!(session.highlight().is_empty());
    }

    #[test]
    fn new_game_replaces_grid_and_switches_preset() {
        let mut session = Session::new(GameMode::Preset(Difficulty::Easy), 3);
        let now = Instant::now();
        session.apply(Command::Reveal((4, 4)), now);
        assert!(session.grid().is_placed());

        session.apply(Command::NewGame(Some(Difficulty::Hard)), now);

        assert_eq!(session.mode(), GameMode::Preset(Difficulty::Hard));
        assert_eq!(session.grid().size(), (30, 16));
        assert!(!session.grid().is_placed());
        assert_eq!(session.elapsed(now + Duration::from_secs(9)), Duration::ZERO);

        session.apply(Command::NewGame(None), now);
        assert_eq!(session.mode(), GameMode::Preset(Difficulty::Hard));
    }

    #[test]
    fn quit_stops_the_loop() {
        let mut session = Session::new(GameMode::Preset(Difficulty::Easy), 0);
        assert_eq!(session.apply(Command::Quit, Instant::now()), Flow::Quit);
    }
}
