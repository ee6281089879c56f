use std::time::Duration;

use sweepgrid_core::{CellCount, CellView, Coord2, GridState, GridView};

/// Values shown above the grid.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Header {
    pub mines_remaining: CellCount,
    pub best: Option<u64>,
    pub elapsed: Duration,
}

pub fn format_time(elapsed: Duration) -> String {
    let secs = elapsed.as_secs();
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

fn glyph(cell: CellView, highlighted: bool) -> char {
    match cell {
        CellView::Hidden if highlighted => '+',
        CellView::Hidden => '#',
        CellView::Flagged => 'F',
        CellView::Revealed(0) => '.',
        CellView::Revealed(count) => char::from(b'0' + count),
        CellView::Mine => '*',
    }
}

/// Draws the header, the grid with column and row labels, and the result line.
pub fn render(view: &GridView, header: Header, highlight: &[Coord2]) -> String {
    let best = header
        .best
        .map_or_else(|| "--".to_owned(), |secs| format!("{secs}s"));
    let mut out = format!(
        "Mines: {}   Best: {}   Time: {}\n",
        header.mines_remaining,
        best,
        format_time(header.elapsed)
    );

    let (cols, rows) = view.size;
    out.push_str("    ");
    out.extend((0..cols).map(|col| char::from(b'0' + col % 10)));
    out.push('\n');

    for row in 0..rows {
        out.push_str(&format!("{row:>3} "));
        for (col, cell) in (0..cols).zip(view.row(row)) {
            out.push(glyph(cell, highlight.contains(&(col, row))));
        }
        out.push('\n');
    }

    match view.state {
        GridState::Lost => out.push_str("GAME OVER\n"),
        GridState::Won => out.push_str("GAME CLEAR\n"),
        GridState::Ready | GridState::Active => {}
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use sweepgrid_core::{Grid, MineLayout};

    fn header() -> Header {
        Header {
            mines_remaining: 1,
            best: None,
            elapsed: Duration::from_secs(75),
        }
    }

    #[test]
    fn formats_minutes_and_seconds() {
        assert_eq!(format_time(Duration::from_millis(999)), "00:00");
        assert_eq!(format_time(Duration::from_secs(75)), "01:15");
        assert_eq!(format_time(Duration::from_secs(3600)), "60:00");
    }

    #[test]
    fn renders_hidden_grid_with_highlight() {
        let grid = Grid::from_dimensions(3, 2, 1, 0).unwrap();
        let out = render(&GridView::from_grid(&grid), header(), &[(1, 0)]);

        assert_eq!(
            out,
            "Mines: 1   Best: --   Time: 01:15\n    012\n  0 #+#\n  1 ###\n"
        );
    }

    #[test]
    fn column_labels_wrap_after_nine() {
        let grid = Grid::from_dimensions(12, 1, 0, 0).unwrap();
        let header = Header {
            mines_remaining: grid.mines_remaining(),
            ..header()
        };
        let out = render(&GridView::from_grid(&grid), header, &[]);

        assert!(out.starts_with("Mines: 0   Best: --"));
        assert!(out.contains("\n    012345678901\n"));
    }

    #[test]
    fn renders_lost_grid() {
        let layout = MineLayout::from_mine_coords((3, 1), &[(0, 0)]).unwrap();
        let mut grid = Grid::with_layout(&layout, 0);
        grid.toggle_flag((2, 0));
        grid.reveal((1, 0));
        grid.reveal((0, 0));

        let header = Header {
            best: Some(42),
            ..header()
        };
        let out = render(&GridView::from_grid(&grid), header, &[]);

        assert!(out.starts_with("Mines: 1   Best: 42s"));
        assert!(out.contains("  0 *1F\n"));
        assert!(out.ends_with("GAME OVER\n"));
    }
}
