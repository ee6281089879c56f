#![no_std]

extern crate alloc;

use core::fmt;
use core::ops::{Index, IndexMut};
use core::str::FromStr;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

pub use engine::*;
pub use error::*;
pub use generator::*;
pub use tile::*;
pub use types::*;
pub use view::*;

mod engine;
mod error;
mod generator;
mod tile;
mod types;
mod view;

/// Immutable shape of a game: grid size and requested mine count.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    pub size: Coord2,
    pub mines: CellCount,
}

impl GameConfig {
    pub const fn new_unchecked(size: Coord2, mines: CellCount) -> Self {
        Self { size, mines }
    }

    /// Mine counts are not bounded here, placement clamps them to what fits.
    pub fn new(size: Coord2, mines: CellCount) -> Result<Self> {
        if size.0 == 0 || size.1 == 0 {
            return Err(GameError::InvalidConfig);
        }
        Ok(Self::new_unchecked(size, mines))
    }

    pub const fn width(&self) -> Coord {
        self.size.0
    }

    pub const fn height(&self) -> Coord {
        self.size.1
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.size.0, self.size.1)
    }
}

impl From<Difficulty> for GameConfig {
    fn from(difficulty: Difficulty) -> Self {
        difficulty.config()
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    #[default]
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Self::Easy, Self::Medium, Self::Hard];

    pub const fn config(self) -> GameConfig {
        match self {
            Self::Easy => GameConfig::new_unchecked((9, 9), 10),
            Self::Medium => GameConfig::new_unchecked((16, 16), 40),
            Self::Hard => GameConfig::new_unchecked((30, 16), 99),
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Easy => "easy",
            Self::Medium => "medium",
            Self::Hard => "hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Difficulty {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|difficulty| difficulty.name().eq_ignore_ascii_case(s))
            .ok_or(GameError::UnknownDifficulty)
    }
}

/// Where the mines are, fixed for the lifetime of a grid once placed.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MineLayout {
    mine_mask: Array2<bool>,
    mine_count: CellCount,
}

impl MineLayout {
    pub fn empty(size: Coord2) -> Self {
        Self {
            mine_mask: Array2::default(size.to_nd_index()),
            mine_count: 0,
        }
    }

    pub fn from_mine_coords(size: Coord2, mine_coords: &[Coord2]) -> Result<Self> {
        if size.0 == 0 || size.1 == 0 {
            return Err(GameError::InvalidConfig);
        }

        let mut layout = Self::empty(size);
        for &coords in mine_coords {
            if !in_bounds(coords, size) {
                return Err(GameError::InvalidCoords);
            }
            layout.set_mine(coords);
        }

        Ok(layout)
    }

    pub(crate) fn set_mine(&mut self, coords: Coord2) {
        let slot = &mut self[coords];
        if !*slot {
            *slot = true;
            self.mine_count += 1;
        }
    }

    pub fn size(&self) -> Coord2 {
        let (cols, rows) = self.mine_mask.dim();
        (cols as Coord, rows as Coord)
    }

    pub fn total_cells(&self) -> CellCount {
        let (cols, rows) = self.size();
        mult(cols, rows)
    }

    pub fn safe_cell_count(&self) -> CellCount {
        self.total_cells() - self.mine_count
    }

    pub fn mine_count(&self) -> CellCount {
        self.mine_count
    }

    pub fn contains_mine(&self, coords: Coord2) -> bool {
        in_bounds(coords, self.size()) && self[coords]
    }

    pub fn adjacent_mine_count(&self, coords: Coord2) -> u8 {
        // at most 8 neighbors
        self.mine_mask
            .iter_neighbors(coords)
            .filter(|&pos| self[pos])
            .count() as u8
    }

    pub fn iter_mines(&self) -> impl Iterator<Item = Coord2> + '_ {
        self.mine_mask
            .indexed_iter()
            .filter(|&(_, &is_mine)| is_mine)
            .map(|((col, row), _)| (col as Coord, row as Coord))
    }
}

impl Index<Coord2> for MineLayout {
    type Output = bool;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.mine_mask[coords.to_nd_index()]
    }
}

impl IndexMut<Coord2> for MineLayout {
    fn index_mut(&mut self, coords: Coord2) -> &mut Self::Output {
        &mut self.mine_mask[coords.to_nd_index()]
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MarkOutcome {
    NoChange,
    Changed,
}

impl MarkOutcome {
    pub const fn has_update(self) -> bool {
        match self {
            Self::NoChange => false,
            Self::Changed => true,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RevealOutcome {
    NoChange,
    Revealed,
    HitMine,
    Won,
}

impl RevealOutcome {
    pub const fn has_update(self) -> bool {
        use RevealOutcome::*;
        match self {
            NoChange => false,
            Revealed => true,
            HitMine => true,
            Won => true,
        }
    }
}
