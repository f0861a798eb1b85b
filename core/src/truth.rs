use core::ops::Index;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Hidden content of a single cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TruthCell {
    Mine,
    /// Safe cell with the number of mines among its up-to-8 neighbors
    SafeCount(u8),
}

impl TruthCell {
    pub const fn is_mine(self) -> bool {
        matches!(self, Self::Mine)
    }

    pub const fn safe_count(self) -> Option<u8> {
        match self {
            Self::Mine => None,
            Self::SafeCount(count) => Some(count),
        }
    }
}

impl Default for TruthCell {
    fn default() -> Self {
        Self::SafeCount(0)
    }
}

/// The generated board: mine placement plus precomputed adjacency counts.
///
/// Never mutated after construction; starting a new game means building a new grid.
///
/// Serialized as its mine mask only, counts are rebuilt on load.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "MineMask", into = "MineMask")]
pub struct TruthGrid {
    cells: Array2<TruthCell>,
    mine_count: CellCount,
}

impl TruthGrid {
    /// Builds the grid from a `(height, width)` shaped mine mask.
    pub fn from_mine_mask(mine_mask: &Array2<bool>) -> Result<Self> {
        let (rows, cols) = mine_mask.dim();
        let mine_count = mine_mask.iter().filter(|&&is_mine| is_mine).count();
        let invalid = || GameError::InvalidConfiguration {
            width: cols.try_into().unwrap_or(Coord::MAX),
            height: rows.try_into().unwrap_or(Coord::MAX),
            mines: mine_count.try_into().unwrap_or(CellCount::MAX),
        };

        let width: Coord = cols.try_into().map_err(|_| invalid())?;
        let height: Coord = rows.try_into().map_err(|_| invalid())?;
        let mine_count: CellCount = mine_count.try_into().map_err(|_| invalid())?;
        GameConfig::new(width, height, mine_count)?;

        let cells = Array2::from_shape_fn((rows, cols), |(row, col)| {
            if mine_mask[[row, col]] {
                TruthCell::Mine
            } else {
                let coords = (row as Coord, col as Coord);
                let adjacent = mine_mask
                    .iter_neighbors(coords)
                    .filter(|&pos| mine_mask[pos.to_nd_index()])
                    .count();
                // at most 8 neighbors
                TruthCell::SafeCount(adjacent as u8)
            }
        });

        Ok(Self { cells, mine_count })
    }

    /// Builds the grid of the given `(height, width)` with mines at the listed `(row, col)` cells.
    ///
    /// Repeated coordinates collapse into a single mine.
    pub fn from_mine_coords(size: Coord2, mine_coords: &[Coord2]) -> Result<Self> {
        let (height, width) = size;
        if height <= 0 || width <= 0 {
            return Err(GameError::InvalidConfiguration {
                width,
                height,
                mines: mine_coords.len().try_into().unwrap_or(CellCount::MAX),
            });
        }

        let mut mine_mask: Array2<bool> = Array2::default(size.to_nd_index());
        for &(row, col) in mine_coords {
            if !in_bounds((row, col), size) {
                return Err(GameError::OutOfBounds { row, col });
            }
            mine_mask[(row, col).to_nd_index()] = true;
        }

        Self::from_mine_mask(&mine_mask)
    }

    pub fn game_config(&self) -> GameConfig {
        let (height, width) = self.size();
        GameConfig::new_unchecked(width, height, self.mine_count)
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        if in_bounds(coords, self.size()) {
            Ok(coords)
        } else {
            Err(GameError::OutOfBounds {
                row: coords.0,
                col: coords.1,
            })
        }
    }

    /// `(height, width)`
    pub fn size(&self) -> Coord2 {
        let (rows, cols) = self.cells.dim();
        // both sides were checked against `Coord` on construction
        (rows as Coord, cols as Coord)
    }

    pub fn total_cells(&self) -> CellCount {
        self.cells.len() as CellCount
    }

    pub fn mine_count(&self) -> CellCount {
        self.mine_count
    }

    pub fn safe_cell_count(&self) -> CellCount {
        self.total_cells() - self.mine_count
    }

    pub fn get(&self, coords: Coord2) -> Option<TruthCell> {
        in_bounds(coords, self.size()).then(|| self[coords])
    }

    pub fn contains_mine(&self, coords: Coord2) -> bool {
        self.get(coords).is_some_and(TruthCell::is_mine)
    }

    /// Iterates every cell in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (Coord2, TruthCell)> + '_ {
        self.cells
            .indexed_iter()
            .map(|((row, col), &cell)| ((row as Coord, col as Coord), cell))
    }

    pub(crate) fn iter_neighbors(&self, coords: Coord2) -> NeighborIter {
        self.cells.iter_neighbors(coords)
    }
}

#[derive(Serialize, Deserialize)]
struct MineMask {
    mines: Array2<bool>,
}

impl TryFrom<MineMask> for TruthGrid {
    type Error = GameError;

    fn try_from(mask: MineMask) -> Result<Self> {
        Self::from_mine_mask(&mask.mines)
    }
}

impl From<TruthGrid> for MineMask {
    fn from(grid: TruthGrid) -> Self {
        Self {
            mines: grid.cells.mapv(TruthCell::is_mine),
        }
    }
}

impl Index<Coord2> for TruthGrid {
    type Output = TruthCell;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.cells[coords.to_nd_index()]
    }
}
