use alloc::collections::{BTreeSet, VecDeque};
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Valid transitions:
/// - Playing -> Won
/// - Playing -> Lost
///
/// Only a reset leaves `Won` or `Lost`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameState {
    #[default]
    Playing,
    Won,
    Lost,
}

impl GameState {
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

/// Reveal state of one game, played against an immutable [`TruthGrid`].
///
/// Counters are not serialized; loading recomputes them and checks the board against the game state.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "EngineSnapshot", into = "EngineSnapshot")]
pub struct RevealEngine {
    truth: TruthGrid,
    board: Array2<CellState>,
    revealed_count: CellCount,
    flagged_count: CellCount,
    state: GameState,
    triggered_mine: Option<Coord2>,
}

impl RevealEngine {
    pub fn new(truth: TruthGrid) -> Self {
        let size = truth.size();
        Self {
            truth,
            board: Array2::default(size.to_nd_index()),
            revealed_count: 0,
            flagged_count: 0,
            state: Default::default(),
            triggered_mine: None,
        }
    }

    /// Starts a new game on `truth`, which may have a different size.
    pub fn reset(&mut self, truth: TruthGrid) {
        log::debug!("Reset to a {:?} board", truth.size());
        *self = Self::new(truth);
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn is_finished(&self) -> bool {
        self.state.is_finished()
    }

    pub fn truth(&self) -> &TruthGrid {
        &self.truth
    }

    pub fn size(&self) -> Coord2 {
        self.truth.size()
    }

    pub fn total_mines(&self) -> CellCount {
        self.truth.mine_count()
    }

    pub fn revealed_count(&self) -> CellCount {
        self.revealed_count
    }

    pub fn flagged_count(&self) -> CellCount {
        self.flagged_count
    }

    /// Mines minus placed flags, negative when over-flagged.
    pub fn mines_left(&self) -> isize {
        (self.truth.mine_count() as isize) - (self.flagged_count as isize)
    }

    pub fn unrevealed_count(&self) -> CellCount {
        self.truth.total_cells() - self.revealed_count
    }

    pub fn triggered_mine(&self) -> Option<Coord2> {
        self.triggered_mine
    }

    pub fn cell_state(&self, coords: Coord2) -> Result<CellState> {
        let coords = self.truth.validate_coords(coords)?;
        Ok(self.board[coords.to_nd_index()])
    }

    /// Adjacent mine count of a revealed safe cell, `None` for anything the player cannot see.
    pub fn adjacent_mines(&self, coords: Coord2) -> Result<Option<u8>> {
        Ok(match self.view_at(coords)? {
            CellView::Open(count) => Some(count),
            _ => None,
        })
    }

    pub fn view_at(&self, coords: Coord2) -> Result<CellView> {
        let coords = self.truth.validate_coords(coords)?;
        Ok(self.view_unchecked(coords))
    }

    pub(crate) fn view_unchecked(&self, coords: Coord2) -> CellView {
        match self.board[coords.to_nd_index()] {
            CellState::Hidden => CellView::Hidden,
            CellState::Flagged => CellView::Flagged,
            CellState::Revealed => self.truth[coords]
                .safe_count()
                .map_or(CellView::Mine, CellView::Open),
        }
    }

    pub fn toggle_flag(&mut self, coords: Coord2) -> Result<FlagOutcome> {
        use CellState::*;
        use FlagOutcome::*;

        let coords = self.truth.validate_coords(coords)?;
        self.check_not_finished()?;

        Ok(match self.board[coords.to_nd_index()] {
            Hidden => {
                self.board[coords.to_nd_index()] = Flagged;
                self.flagged_count += 1;
                Changed
            }
            Flagged => {
                self.board[coords.to_nd_index()] = Hidden;
                self.flagged_count -= 1;
                Changed
            }
            Revealed => NoChange,
        })
    }

    /// Reveals a hidden cell, flooding outward from zero-count cells.
    ///
    /// Flagged and already revealed cells are left alone.
    pub fn reveal_at(&mut self, coords: Coord2) -> Result<RevealOutcome> {
        let coords = self.truth.validate_coords(coords)?;
        self.check_not_finished()?;

        Ok(match self.board[coords.to_nd_index()] {
            CellState::Hidden => self.reveal_hidden(coords),
            CellState::Flagged | CellState::Revealed => RevealOutcome::NoChange,
        })
    }

    fn reveal_hidden(&mut self, coords: Coord2) -> RevealOutcome {
        match self.truth[coords] {
            TruthCell::Mine => {
                self.open(coords);
                self.triggered_mine = Some(coords);
                self.state = GameState::Lost;
                log::debug!("Mine hit at {:?}", coords);
                RevealOutcome::Lost
            }
            TruthCell::SafeCount(count) => {
                self.open(coords);
                log::debug!("Open cell at {:?}, mine count: {}", coords, count);

                if count == 0 {
                    self.flood_fill(coords);
                }

                if self.unrevealed_count() == self.truth.mine_count() {
                    self.state = GameState::Won;
                    log::debug!("All safe cells revealed");
                    RevealOutcome::Won
                } else {
                    RevealOutcome::Revealed
                }
            }
        }
    }

    fn flood_fill(&mut self, origin: Coord2) {
        let mut visited = BTreeSet::from([origin]);
        let mut to_visit: VecDeque<_> = self.hidden_neighbors(origin).collect();

        while let Some(visit_coords) = to_visit.pop_front() {
            if !visited.insert(visit_coords) {
                continue;
            }

            // skip flagged or already opened cells
            if self.board[visit_coords.to_nd_index()] != CellState::Hidden {
                continue;
            }

            // a zero cell never borders a mine, so this only guards the invariant
            let TruthCell::SafeCount(count) = self.truth[visit_coords] else {
                continue;
            };

            self.open(visit_coords);
            log::trace!("Flood opened cell at {:?}, mine count: {}", visit_coords, count);

            if count == 0 {
                to_visit.extend(
                    self.hidden_neighbors(visit_coords)
                        .filter(|pos| !visited.contains(pos)),
                );
            }
        }
    }

    fn open(&mut self, coords: Coord2) {
        self.board[coords.to_nd_index()] = CellState::Revealed;
        self.revealed_count += 1;
    }

    fn hidden_neighbors(&self, coords: Coord2) -> impl Iterator<Item = Coord2> + '_ {
        self.truth
            .iter_neighbors(coords)
            .filter(move |&pos| self.board[pos.to_nd_index()] == CellState::Hidden)
    }

    fn check_not_finished(&self) -> Result<()> {
        if self.state.is_finished() {
            Err(GameError::AlreadyEnded)
        } else {
            Ok(())
        }
    }
}

#[derive(Serialize, Deserialize)]
struct EngineSnapshot {
    truth: TruthGrid,
    board: Array2<CellState>,
    state: GameState,
    triggered_mine: Option<Coord2>,
}

impl TryFrom<EngineSnapshot> for RevealEngine {
    type Error = GameError;

    fn try_from(snapshot: EngineSnapshot) -> Result<Self> {
        let EngineSnapshot {
            truth,
            board,
            state,
            triggered_mine,
        } = snapshot;

        let [rows, cols] = truth.size().to_nd_index();
        if board.dim() != (rows, cols) {
            return Err(GameError::InvalidBoardShape);
        }

        let mut engine = Self::new(truth);
        engine.board = board;
        engine.state = state;
        engine.triggered_mine = triggered_mine;

        let mut revealed_mines = 0;
        for (coords, cell) in engine.truth.iter() {
            match engine.board[coords.to_nd_index()] {
                CellState::Hidden => {}
                CellState::Flagged => engine.flagged_count += 1,
                CellState::Revealed => {
                    engine.revealed_count += 1;
                    if cell.is_mine() {
                        revealed_mines += 1;
                    }
                }
            }
        }

        let consistent = match state {
            GameState::Playing => {
                revealed_mines == 0
                    && triggered_mine.is_none()
                    && engine.unrevealed_count() > engine.truth.mine_count()
            }
            GameState::Won => {
                revealed_mines == 0
                    && triggered_mine.is_none()
                    && engine.unrevealed_count() == engine.truth.mine_count()
            }
            GameState::Lost => {
                revealed_mines == 1
                    && triggered_mine.is_some_and(|coords| {
                        engine.truth.contains_mine(coords)
                            && engine.board[coords.to_nd_index()] == CellState::Revealed
                    })
            }
        };

        if consistent {
            Ok(engine)
        } else {
            Err(GameError::InconsistentState)
        }
    }
}

impl From<RevealEngine> for EngineSnapshot {
    fn from(engine: RevealEngine) -> Self {
        Self {
            truth: engine.truth,
            board: engine.board,
            state: engine.state,
            triggered_mine: engine.triggered_mine,
        }
    }
}
