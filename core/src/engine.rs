use alloc::collections::VecDeque;
use alloc::vec::Vec;
use ndarray::Array2;
use rand::prelude::*;
use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GridState {
    /// Nothing revealed yet.
    #[default]
    Ready,
    Active,
    Won,
    Lost,
}

impl GridState {
    pub const fn is_ready(self) -> bool {
        matches!(self, Self::Ready)
    }

    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

/// The grid engine: owns every cell and applies reveal, flag and hint commands.
///
/// Every command is accepted in every state. Commands that make no sense
/// (out of bounds, after the game ended, on a revealed or flagged cell) are
/// reported as `NoChange` and leave the grid untouched.
///
/// Mines are placed lazily on the first reveal, around that reveal's
/// coordinates, so [`Grid::is_placed`] tells the two phases apart.
#[derive(Clone, Debug)]
pub struct Grid {
    config: GameConfig,
    cells: Array2<CellState>,
    mine_count: CellCount,
    placed: bool,
    revealed_count: CellCount,
    flagged_count: CellCount,
    state: GridState,
    triggered_mine: Option<Coord2>,
    placement_seed: u64,
    hint_rng: SmallRng,
}

impl Grid {
    /// Creates an empty grid, `seed` drives mine placement and hints.
    pub fn new(config: GameConfig, seed: u64) -> Self {
        let mut hint_rng = SmallRng::seed_from_u64(seed);
        let placement_seed = hint_rng.next_u64();
        Self {
            config,
            cells: Array2::default(config.size.to_nd_index()),
            mine_count: config.mines,
            placed: false,
            revealed_count: 0,
            flagged_count: 0,
            state: GridState::default(),
            triggered_mine: None,
            placement_seed,
            hint_rng,
        }
    }

    pub fn from_dimensions(width: Coord, height: Coord, mines: CellCount, seed: u64) -> Result<Self> {
        Ok(Self::new(GameConfig::new((width, height), mines)?, seed))
    }

    /// Creates a grid whose mines are already placed as in `layout`.
    pub fn with_layout(layout: &MineLayout, seed: u64) -> Self {
        let config = GameConfig::new_unchecked(layout.size(), layout.mine_count());
        let mut grid = Self::new(config, seed);
        grid.apply_layout(layout);
        grid
    }

    pub fn config(&self) -> GameConfig {
        self.config
    }

    pub fn size(&self) -> Coord2 {
        self.config.size
    }

    pub fn width(&self) -> Coord {
        self.config.width()
    }

    pub fn height(&self) -> Coord {
        self.config.height()
    }

    pub fn contains(&self, coords: Coord2) -> bool {
        in_bounds(coords, self.size())
    }

    pub fn state(&self) -> GridState {
        self.state
    }

    pub fn is_placed(&self) -> bool {
        self.placed
    }

    pub fn is_game_over(&self) -> bool {
        matches!(self.state, GridState::Lost)
    }

    pub fn is_win(&self) -> bool {
        matches!(self.state, GridState::Won)
    }

    pub fn is_finished(&self) -> bool {
        self.state.is_finished()
    }

    pub fn revealed_count(&self) -> CellCount {
        self.revealed_count
    }

    pub fn flagged_count(&self) -> CellCount {
        self.flagged_count
    }

    /// Mines actually on the grid. Before placement this is the requested count.
    pub fn mine_count(&self) -> CellCount {
        self.mine_count
    }

    pub fn requested_mines(&self) -> CellCount {
        self.config.mines
    }

    pub fn mines_remaining(&self) -> CellCount {
        self.mine_count.saturating_sub(self.flagged_count)
    }

    pub fn safe_cell_count(&self) -> CellCount {
        self.config.total_cells().saturating_sub(self.mine_count)
    }

    pub fn triggered_mine(&self) -> Option<Coord2> {
        self.triggered_mine
    }

    /// Player-visible state of a cell.
    pub fn cell_at(&self, coords: Coord2) -> Option<CellView> {
        self.cell(coords).map(CellState::view)
    }

    /// Full state of a cell, including hidden mines.
    pub fn cell(&self, coords: Coord2) -> Option<CellState> {
        self.contains(coords)
            .then(|| self.cells[coords.to_nd_index()])
    }

    /// All cells in row-major order with their player-visible state.
    pub fn iter_cells(&self) -> impl Iterator<Item = (Coord2, CellView)> + '_ {
        let (cols, rows) = self.size();
        (0..rows).flat_map(move |row| {
            (0..cols).map(move |col| ((col, row), self.cells[(col, row).to_nd_index()].view()))
        })
    }

    pub fn neighbors(&self, coords: Coord2) -> NeighborIter {
        NeighborIter::new(coords, self.size())
    }

    /// Neighbors that are still unrevealed, for highlighting around a cell.
    pub fn hidden_neighbors(&self, coords: Coord2) -> impl Iterator<Item = Coord2> + '_ {
        self.neighbors(coords)
            .filter(|&pos| !self.cells[pos.to_nd_index()].is_revealed)
    }

    pub fn reveal(&mut self, coords: Coord2) -> RevealOutcome {
        use RevealOutcome::*;

        if !self.contains(coords) || self.is_finished() {
            log::trace!("Ignoring reveal at {:?}", coords);
            return NoChange;
        }

        let cell = self.cells[coords.to_nd_index()];
        if cell.is_revealed || cell.is_flagged {
            return NoChange;
        }

        if !self.placed {
            self.place_mines(coords);
        }

        self.reveal_cell(coords);
        let cell = self.cells[coords.to_nd_index()];

        if cell.is_mine {
            self.triggered_mine = Some(coords);
            self.state = GridState::Lost;
            self.reveal_all_mines();
            log::debug!("Mine hit at {:?}", coords);
            return HitMine;
        }

        if cell.adjacent == 0 {
            self.flood_fill(coords);
        }

        if self.revealed_count == self.safe_cell_count() {
            self.state = GridState::Won;
            log::debug!("Grid cleared with {} cells revealed", self.revealed_count);
            Won
        } else {
            self.state = GridState::Active;
            Revealed
        }
    }

    pub fn toggle_flag(&mut self, coords: Coord2) -> MarkOutcome {
        if !self.contains(coords) || self.is_finished() {
            log::trace!("Ignoring flag at {:?}", coords);
            return MarkOutcome::NoChange;
        }

        let cell = &mut self.cells[coords.to_nd_index()];
        if cell.is_revealed {
            return MarkOutcome::NoChange;
        }

        cell.is_flagged = !cell.is_flagged;
        if cell.is_flagged {
            self.flagged_count += 1;
        } else {
            self.flagged_count -= 1;
        }
        MarkOutcome::Changed
    }

    /// Picks a random unrevealed cell that is not a mine, ignoring flags.
    ///
    /// Before placement every hidden cell qualifies, which is sound because
    /// the first reveal can never hit a mine. Only the hint RNG advances, the
    /// placement seed is fixed at construction.
    pub fn hint(&mut self) -> Option<Coord2> {
        let candidates: Vec<Coord2> = self.hint_candidates().collect();
        candidates.choose(&mut self.hint_rng).copied()
    }

    /// Reveals a hinted cell, a flagged hint is returned but left alone.
    pub fn reveal_hint(&mut self) -> Option<(Coord2, RevealOutcome)> {
        let coords = self.hint()?;
        Some((coords, self.reveal(coords)))
    }

    fn hint_candidates(&self) -> impl Iterator<Item = Coord2> + '_ {
        self.cells
            .indexed_iter()
            .filter(|&(_, cell)| !cell.is_mine && !cell.is_revealed)
            .map(|((col, row), _)| (col as Coord, row as Coord))
    }

    fn place_mines(&mut self, anchor: Coord2) {
        let layout = SafeZoneGenerator::new(self.placement_seed, anchor).generate(self.config);
        self.apply_layout(&layout);
    }

    fn apply_layout(&mut self, layout: &MineLayout) {
        for ((col, row), cell) in self.cells.indexed_iter_mut() {
            let coords = (col as Coord, row as Coord);
            cell.is_mine = layout[coords];
            cell.adjacent = if cell.is_mine {
                0
            } else {
                layout.adjacent_mine_count(coords)
            };
        }
        self.mine_count = layout.mine_count();
        self.placed = true;
    }

    fn reveal_cell(&mut self, coords: Coord2) {
        let cell = &mut self.cells[coords.to_nd_index()];
        if !cell.is_revealed {
            cell.is_revealed = true;
            self.revealed_count += 1;
        }
    }

    /// Opens the zero region connected to `start` plus its numbered border.
    ///
    /// Cells are revealed as they are discovered, so none enters the frontier twice.
    fn flood_fill(&mut self, start: Coord2) {
        let mut frontier = VecDeque::from([start]);

        while let Some(coords) = frontier.pop_front() {
            for pos in self.neighbors(coords) {
                let neighbor = self.cells[pos.to_nd_index()];
                if neighbor.is_revealed || neighbor.is_flagged {
                    continue;
                }

                self.reveal_cell(pos);
                if neighbor.adjacent == 0 {
                    frontier.push_back(pos);
                }
            }
        }
    }

    fn reveal_all_mines(&mut self) {
        let mines: Vec<Coord2> = self
            .cells
            .indexed_iter()
            .filter(|&(_, cell)| cell.is_mine)
            .map(|((col, row), _)| (col as Coord, row as Coord))
            .collect();

        for coords in mines {
            self.reveal_cell(coords);
        }
    }
}
