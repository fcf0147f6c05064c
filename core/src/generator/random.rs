use ndarray::Array2;
use rand::prelude::*;

use super::*;
use crate::types::{CellCount, ToNdIndex};

/// Uniform placement without replacement: coordinates are drawn at random and
/// redrawn until the requested number of distinct mine cells is set.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct RandomBoardGenerator {
    seed: u64,
}

impl RandomBoardGenerator {
    pub const fn new(seed: u64) -> Self {
        Self { seed }
    }
}

impl BoardGenerator for RandomBoardGenerator {
    fn generate(self, config: GameConfig) -> Board {
        let (width, height) = config.size;
        let mut mine_mask: Array2<bool> = Array2::default(config.size.to_nd_index());

        // Config validation guarantees mines < total cells, so the sampling
        // loop always finds a free cell.
        let mut rng = SmallRng::seed_from_u64(self.seed);
        let mut placed: CellCount = 0;
        while placed < config.mines {
            let coords = (rng.random_range(0..width), rng.random_range(0..height));
            let cell = &mut mine_mask[coords.to_nd_index()];
            if !*cell {
                *cell = true;
                placed += 1;
            }
        }

        log::debug!(
            "generated {}x{} board with {} mines (seed {})",
            width,
            height,
            config.mines,
            self.seed
        );
        Board::from_mine_mask(&mine_mask)
    }
}
