use std::fmt::Write;

use minesweep_core::{BoardView, CellView, GameState};

pub fn glyph(cell: CellView) -> char {
    match cell {
        CellView::Hidden => '#',
        CellView::Flagged => 'F',
        CellView::Open(0) => '.',
        CellView::Open(count) => char::from(b'0' + count),
        CellView::Mine => '*',
    }
}

/// Draws the board with row and column indices, followed by a status line.
pub fn render(view: &BoardView) -> String {
    let (_, cols) = view.size;
    let mut out = String::new();

    out.push_str("    ");
    for col in 0..cols {
        // single digit keeps the columns aligned
        let _ = write!(out, "{}", col % 10);
    }
    out.push('\n');

    for (row, cells) in view.rows().enumerate() {
        let _ = write!(out, "{row:>3} ");
        out.extend(cells.iter().map(|&cell| glyph(cell)));
        out.push('\n');
    }

    let status = match view.state {
        GameState::Playing => "",
        GameState::Won => "  You win!",
        GameState::Lost => "  You lose!",
    };
    let _ = writeln!(out, "Mines left: {}{}", view.mines_left, status);
    out
}

#[cfg(test)]
mod tests {
    use minesweep_core::{RevealEngine, TruthGrid};

    use super::*;

    fn engine(size: (i16, i16), mines: &[(i16, i16)]) -> RevealEngine {
        RevealEngine::new(TruthGrid::from_mine_coords(size, mines).unwrap())
    }

    #[test]
    fn glyphs() {
        assert_eq!(glyph(CellView::Hidden), '#');
        assert_eq!(glyph(CellView::Open(0)), '.');
        assert_eq!(glyph(CellView::Open(8)), '8');
        assert_eq!(glyph(CellView::Flagged), 'F');
        assert_eq!(glyph(CellView::Mine), '*');
    }

    #[test]
    fn renders_fresh_board() {
        let view = BoardView::from_engine(&engine((2, 3), &[(0, 0)]));

        assert_eq!(render(&view), "    012\n  0 ###\n  1 ###\nMines left: 1\n");
    }

    #[test]
    fn renders_won_board() {
        let mut engine = engine((3, 3), &[(0, 0)]);
        engine.toggle_flag((0, 0)).unwrap();
        engine.reveal_at((2, 2)).unwrap();

        let view = BoardView::from_engine(&engine);

        assert_eq!(
            render(&view),
            "    012\n  0 F1.\n  1 11.\n  2 ...\nMines left: 0  You win!\n"
        );
    }

    #[test]
    fn renders_lost_board() {
        let mut engine = engine((1, 2), &[(0, 1)]);
        engine.reveal_at((0, 1)).unwrap();

        let view = BoardView::from_engine(&engine);

        assert_eq!(render(&view), "    01\n  0 #*\nMines left: 1  You lose!\n");
    }
}
