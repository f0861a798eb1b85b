use rand::Rng;

use crate::*;
pub use random::*;

mod random;

pub trait BoardGenerator {
    fn generate(&mut self, config: GameConfig) -> Result<TruthGrid>;
}

/// Generates a `height` x `width` board with exactly `mines` mines drawn from `rng`.
pub fn generate<R: Rng + ?Sized>(
    width: Coord,
    height: Coord,
    mines: CellCount,
    rng: &mut R,
) -> Result<TruthGrid> {
    random::place_mines(GameConfig::new(width, height, mines)?, rng)
}
