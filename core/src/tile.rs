use serde::{Deserialize, Serialize};

/// Full state of a single cell as owned by the engine.
///
/// `is_mine` and `adjacent` are fixed once mines are placed, `is_revealed`
/// only ever goes from false to true, and `is_flagged` only changes while the
/// cell is hidden.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellState {
    pub is_mine: bool,
    pub is_revealed: bool,
    pub is_flagged: bool,
    pub adjacent: u8,
}

impl CellState {
    /// What the player is allowed to see of this cell.
    pub const fn view(self) -> CellView {
        match self {
            Self {
                is_revealed: true,
                is_mine: true,
                ..
            } => CellView::Mine,
            Self {
                is_revealed: true,
                adjacent,
                ..
            } => CellView::Revealed(adjacent),
            Self {
                is_flagged: true, ..
            } => CellView::Flagged,
            _ => CellView::Hidden,
        }
    }
}

/// Player-visible state of a cell, mine identity is only exposed once revealed.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellView {
    #[default]
    Hidden,
    Flagged,
    Revealed(u8),
    Mine,
}

impl CellView {
    pub const fn is_unrevealed(self) -> bool {
        matches!(self, Self::Hidden | Self::Flagged)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hidden_mine_is_not_exposed() {
        let cell = CellState {
            is_mine: true,
            ..Default::default()
        };
        assert_eq!(cell.view(), CellView::Hidden);

        let flagged = CellState {
            is_flagged: true,
            ..cell
        };
        assert_eq!(flagged.view(), CellView::Flagged);
    }

    #[test]
    fn revealed_cells_show_contents() {
        let mine = CellState {
            is_mine: true,
            is_revealed: true,
            ..Default::default()
        };
        assert_eq!(mine.view(), CellView::Mine);

        let safe = CellState {
            is_revealed: true,
            adjacent: 3,
            ..Default::default()
        };
        assert_eq!(safe.view(), CellView::Revealed(3));
        assert!(!safe.view().is_unrevealed());
    }
}
