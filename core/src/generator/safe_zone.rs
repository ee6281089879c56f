use alloc::vec::Vec;
use ndarray::Array2;

use super::*;

/// Uniformly random placement that keeps the anchor cell and its whole
/// neighborhood free of mines, so the first reveal always opens a zero.
///
/// If the requested count does not fit outside the safe zone, every
/// remaining cell becomes a mine and the layout reports the smaller count.
#[derive(Clone, Debug, PartialEq)]
pub struct SafeZoneGenerator {
    seed: u64,
    anchor: Coord2,
}

impl SafeZoneGenerator {
    pub fn new(seed: u64, anchor: Coord2) -> Self {
        Self { seed, anchor }
    }
}

impl MineGenerator for SafeZoneGenerator {
    fn generate(self, config: GameConfig) -> MineLayout {
        use rand::prelude::*;
        use rand::seq::index;

        let size = config.size;
        let mut forbidden: Array2<bool> = Array2::default(size.to_nd_index());
        if in_bounds(self.anchor, size) {
            forbidden[self.anchor.to_nd_index()] = true;
        }
        for pos in NeighborIter::new(self.anchor, size) {
            forbidden[pos.to_nd_index()] = true;
        }

        let pool: Vec<Coord2> = forbidden
            .indexed_iter()
            .filter(|&(_, &is_forbidden)| !is_forbidden)
            .map(|((col, row), _)| (col as Coord, row as Coord))
            .collect();

        let requested = usize::from(config.mines);
        let actual = requested.min(pool.len());
        if actual < requested {
            log::warn!(
                "Safe zone leaves room for {} mines only, requested {}",
                actual,
                requested
            );
        }

        let mut rng = SmallRng::seed_from_u64(self.seed);
        let mut layout = MineLayout::empty(size);
        for i in index::sample(&mut rng, pool.len(), actual) {
            layout.set_mine(pool[i]);
        }

        log::debug!(
            "Placed {} mines on {}x{} around safe anchor {:?}",
            layout.mine_count(),
            size.0,
            size.1,
            self.anchor
        );
        layout
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn generate(size: Coord2, mines: CellCount, seed: u64, anchor: Coord2) -> MineLayout {
        let config = GameConfig::new(size, mines).unwrap();
        SafeZoneGenerator::new(seed, anchor).generate(config)
    }

    #[test]
    fn anchor_neighborhood_is_mine_free() {
        for seed in 0..64 {
            let layout = generate((9, 9), 10, seed, (4, 4));

            assert_eq!(layout.mine_count(), 10);
            for col in 3..=5 {
                for row in 3..=5 {
                    assert!(!layout.contains_mine((col, row)), "seed {seed}: mine at ({col}, {row})");
                }
            }
        }
    }

    #[test]
    fn corner_anchor_forbids_four_cells() {
        // 16 cells minus the 2x2 safe corner
        let layout = generate((4, 4), 16, 7, (0, 0));

        assert_eq!(layout.mine_count(), 12);
        for pos in [(0, 0), (1, 0), (0, 1), (1, 1)] {
            assert!(!layout.contains_mine(pos));
        }
    }

    #[test]
    fn single_cell_grid_gets_no_mines() {
        let layout = generate((1, 1), 1, 0, (0, 0));
        assert_eq!(layout.mine_count(), 0);
    }

    #[test]
    fn same_seed_same_layout() {
        let a = generate((16, 16), 40, 1234, (3, 9));
        let b = generate((16, 16), 40, 1234, (3, 9));
        assert_eq!(a, b);
    }

    #[test]
    fn zero_mines_requested() {
        let layout = generate((5, 5), 0, 99, (2, 2));
        assert_eq!(layout.mine_count(), 0);
        assert_eq!(layout.iter_mines().count(), 0);
    }
}
