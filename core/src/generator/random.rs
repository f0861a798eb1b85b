use ndarray::Array2;
use rand::rngs::SmallRng;
use rand::seq::index;
use rand::{Rng, SeedableRng};

use super::*;

/// Purely random generation: every combination of `mines` cells is equally likely.
#[derive(Clone, Debug)]
pub struct RandomBoardGenerator<R = SmallRng> {
    rng: R,
}

impl RandomBoardGenerator<SmallRng> {
    pub fn seeded(seed: u64) -> Self {
        Self::new(SmallRng::seed_from_u64(seed))
    }
}

impl<R: Rng> RandomBoardGenerator<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> BoardGenerator for RandomBoardGenerator<R> {
    fn generate(&mut self, config: GameConfig) -> Result<TruthGrid> {
        place_mines(config, &mut self.rng)
    }
}

pub(super) fn place_mines<R: Rng + ?Sized>(config: GameConfig, rng: &mut R) -> Result<TruthGrid> {
    config.validate()?;

    let width = config.width as usize;
    let total_cells = config.total_cells() as usize;
    let mut mine_mask: Array2<bool> = Array2::default(config.size().to_nd_index());

    // sampling without replacement keeps the count exact
    for linear in index::sample(rng, total_cells, config.mines as usize) {
        mine_mask[[linear / width, linear % width]] = true;
    }

    let grid = TruthGrid::from_mine_mask(&mine_mask)?;
    log::debug!(
        "Generated {}x{} board with {} mines",
        config.width,
        config.height,
        grid.mine_count()
    );
    Ok(grid)
}
