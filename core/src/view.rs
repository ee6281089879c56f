use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Snapshot of everything a presentation layer may show about a grid.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GridView {
    pub size: Coord2,
    pub state: GridState,
    pub mines_remaining: CellCount,
    pub revealed_count: CellCount,
    pub cells: Array2<CellView>,
}

impl GridView {
    pub fn from_grid(grid: &Grid) -> Self {
        let size = grid.size();
        let mut cells = Array2::default(size.to_nd_index());
        for (coords, view) in grid.iter_cells() {
            cells[coords.to_nd_index()] = view;
        }

        Self {
            size,
            state: grid.state(),
            mines_remaining: grid.mines_remaining(),
            revealed_count: grid.revealed_count(),
            cells,
        }
    }

    pub fn get(&self, coords: Coord2) -> Option<CellView> {
        in_bounds(coords, self.size).then(|| self.cells[coords.to_nd_index()])
    }

    /// Cells of one row, left to right.
    pub fn row(&self, row: Coord) -> impl Iterator<Item = CellView> + '_ {
        (0..self.size.0).filter_map(move |col| self.get((col, row)))
    }
}

impl From<&Grid> for GridView {
    fn from(grid: &Grid) -> Self {
        Self::from_grid(grid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    #[test]
    fn from_grid_maps_revealed_and_flagged_cells() {
        let layout = MineLayout::from_mine_coords((2, 2), &[(0, 0)]).unwrap();
        let mut grid = Grid::with_layout(&layout, 0);

        grid.reveal((1, 1));
        grid.toggle_flag((0, 0));

        let view = GridView::from_grid(&grid);

        assert_eq!(view.mines_remaining, 0);
        assert_eq!(view.revealed_count, 1);
        assert_eq!(view.get((1, 1)), Some(CellView::Revealed(1)));
        assert_eq!(view.get((0, 0)), Some(CellView::Flagged));
        assert_eq!(view.get((2, 0)), None);
        assert_eq!(
            view.row(0).collect::<Vec<_>>(),
            [CellView::Flagged, CellView::Hidden]
        );
    }

    #[test]
    fn view_never_leaks_hidden_mines() {
        let mut grid = Grid::from_dimensions(9, 9, 10, 21).unwrap();
        grid.reveal((4, 4));

        let json = serde_json::to_string(&GridView::from_grid(&grid)).unwrap();

        assert!(!grid.is_game_over());
        assert!(!json.contains("Mine"));
    }

    #[test]
    fn lost_view_shows_mines() {
        let layout = MineLayout::from_mine_coords((2, 1), &[(1, 0)]).unwrap();
        let mut grid = Grid::with_layout(&layout, 0);
        grid.reveal((1, 0));

        let view = GridView::from(&grid);

        assert_eq!(view.state, GridState::Lost);
        assert_eq!(view.get((1, 0)), Some(CellView::Mine));
        assert_eq!(view.get((0, 0)), Some(CellView::Hidden));
    }
}
