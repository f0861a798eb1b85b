use rand::rngs::SmallRng;

use crate::*;

/// Discrete input delivered by the presentation layer, in pixel space.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Action {
    PointerPrimary { x: i32, y: i32 },
    PointerSecondary { x: i32, y: i32 },
    Quit,
}

/// Maps pixel positions onto board cells of a fixed square size.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct CellGeometry {
    cell_size: u32,
}

impl CellGeometry {
    pub const DEFAULT_CELL_SIZE: u32 = 32;

    pub const fn new(cell_size: u32) -> Self {
        Self {
            cell_size: if cell_size == 0 { 1 } else { cell_size },
        }
    }

    pub const fn cell_size(&self) -> u32 {
        self.cell_size
    }

    /// Converts `(x, y)` pixels to `(row, col)`.
    ///
    /// Pixels left of or above the origin land on negative cells, which the engine rejects.
    pub fn to_cell(&self, x: i32, y: i32) -> Coord2 {
        let size = i64::from(self.cell_size);
        let to_coord = |pixels: i32| {
            i64::from(pixels)
                .div_euclid(size)
                .clamp(Coord::MIN.into(), Coord::MAX.into()) as Coord
        };
        (to_coord(y), to_coord(x))
    }
}

impl Default for CellGeometry {
    fn default() -> Self {
        Self::new(Self::DEFAULT_CELL_SIZE)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SessionEvent {
    Reveal(RevealOutcome),
    Flag(FlagOutcome),
    Quit,
}

/// One player's sequence of games on a fixed configuration.
#[derive(Clone, Debug)]
pub struct Session {
    config: GameConfig,
    geometry: CellGeometry,
    generator: RandomBoardGenerator<SmallRng>,
    engine: RevealEngine,
}

impl Session {
    /// Deals the first board from `seed`. Later boards continue the same random stream.
    pub fn new(config: GameConfig, seed: u64) -> Result<Self> {
        let mut generator = RandomBoardGenerator::seeded(seed);
        let engine = RevealEngine::new(generator.generate(config)?);
        log::debug!("Session started with {:?}, seed: {}", config, seed);

        Ok(Self {
            config,
            geometry: CellGeometry::default(),
            generator,
            engine,
        })
    }

    pub fn with_geometry(mut self, geometry: CellGeometry) -> Self {
        self.geometry = geometry;
        self
    }

    pub fn config(&self) -> GameConfig {
        self.config
    }

    pub fn geometry(&self) -> CellGeometry {
        self.geometry
    }

    pub fn engine(&self) -> &RevealEngine {
        &self.engine
    }

    pub fn state(&self) -> GameState {
        self.engine.state()
    }

    pub fn handle(&mut self, action: Action) -> Result<SessionEvent> {
        log::trace!("Handling {:?}", action);
        match action {
            Action::PointerPrimary { x, y } => {
                let coords = self.geometry.to_cell(x, y);
                self.reveal_at(coords).map(SessionEvent::Reveal)
            }
            Action::PointerSecondary { x, y } => {
                let coords = self.geometry.to_cell(x, y);
                self.toggle_flag(coords).map(SessionEvent::Flag)
            }
            Action::Quit => Ok(SessionEvent::Quit),
        }
    }

    pub fn reveal_at(&mut self, coords: Coord2) -> Result<RevealOutcome> {
        let outcome = self.engine.reveal_at(coords)?;
        match outcome {
            RevealOutcome::Won => log::info!("Game won"),
            RevealOutcome::Lost => log::info!("Game lost at {:?}", coords),
            _ => {}
        }
        Ok(outcome)
    }

    pub fn toggle_flag(&mut self, coords: Coord2) -> Result<FlagOutcome> {
        self.engine.toggle_flag(coords)
    }

    /// Deals a fresh board with the same configuration.
    pub fn new_game(&mut self) -> Result<()> {
        let truth = self.generator.generate(self.config)?;
        self.engine.reset(truth);
        Ok(())
    }

    pub fn view(&self) -> BoardView {
        BoardView::from_engine(&self.engine)
    }
}
