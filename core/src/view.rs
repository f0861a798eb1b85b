use ndarray::{Array2, ArrayView1};
use serde::{Deserialize, Serialize};

use crate::*;

/// Everything the presentation layer needs to draw one frame.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoardView {
    pub size: Coord2,
    pub state: GameState,
    pub mines_left: isize,
    pub cells: Array2<CellView>,
}

impl BoardView {
    pub fn from_engine(engine: &RevealEngine) -> Self {
        let size = engine.size();
        let mut cells = Array2::default(size.to_nd_index());

        let (rows, cols) = size;
        for row in 0..rows {
            for col in 0..cols {
                let coords = (row, col);
                cells[coords.to_nd_index()] = engine.view_unchecked(coords);
            }
        }

        Self {
            size,
            state: engine.state(),
            mines_left: engine.mines_left(),
            cells,
        }
    }

    pub fn cell(&self, coords: Coord2) -> Option<CellView> {
        in_bounds(coords, self.size).then(|| self.cells[coords.to_nd_index()])
    }

    /// Rows from top to bottom, each left to right.
    pub fn rows(&self) -> impl Iterator<Item = ArrayView1<'_, CellView>> {
        self.cells.rows().into_iter()
    }

    pub fn closed_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_closed()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine(size: Coord2, mines: &[Coord2]) -> RevealEngine {
        RevealEngine::new(TruthGrid::from_mine_coords(size, mines).unwrap())
    }

    #[test]
    fn fresh_board_is_all_hidden() {
        let view = BoardView::from_engine(&engine((2, 3), &[(0, 0)]));

        assert_eq!(view.size, (2, 3));
        assert_eq!(view.state, GameState::Playing);
        assert_eq!(view.mines_left, 1);
        assert_eq!(view.closed_count(), 6);
        assert_eq!(view.rows().count(), 2);
        assert!(view.rows().all(|row| row.len() == 3));
    }

    #[test]
    fn reflects_reveals_and_flags() {
        let mut engine = engine((3, 3), &[(0, 0)]);
        engine.toggle_flag((0, 0)).unwrap();
        engine.reveal_at((0, 1)).unwrap();

        let view = BoardView::from_engine(&engine);

        assert_eq!(view.cell((0, 0)), Some(CellView::Flagged));
        assert_eq!(view.cell((0, 1)), Some(CellView::Open(1)));
        assert_eq!(view.cell((2, 2)), Some(CellView::Hidden));
        assert_eq!(view.cell((3, 0)), None);
        assert_eq!(view.mines_left, 0);
    }

    #[test]
    fn lost_board_shows_only_triggered_mine() {
        let mut engine = engine((2, 2), &[(0, 0), (1, 1)]);
        engine.reveal_at((1, 1)).unwrap();

        let view = BoardView::from_engine(&engine);

        assert_eq!(view.state, GameState::Lost);
        assert_eq!(view.cell((1, 1)), Some(CellView::Mine));
        assert_eq!(view.cell((0, 0)), Some(CellView::Hidden));
    }
}
