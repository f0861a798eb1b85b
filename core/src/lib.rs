#![no_std]

extern crate alloc;

use serde::{Deserialize, Serialize};

pub use engine::*;
pub use error::*;
pub use generator::*;
pub use session::*;
pub use tile::*;
pub use truth::*;
pub use types::*;
pub use view::*;

mod engine;
mod error;
mod generator;
mod session;
mod tile;
mod truth;
mod types;
mod view;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    pub width: Coord,
    pub height: Coord,
    pub mines: CellCount,
}

impl GameConfig {
    /// 16x16 with 40 mines, the default board.
    pub const CLASSIC: Self = Self::new_unchecked(16, 16, 40);
    pub const BEGINNER: Self = Self::new_unchecked(9, 9, 10);
    pub const INTERMEDIATE: Self = Self::new_unchecked(16, 16, 40);
    pub const EXPERT: Self = Self::new_unchecked(30, 16, 99);

    pub const fn new_unchecked(width: Coord, height: Coord, mines: CellCount) -> Self {
        Self {
            width,
            height,
            mines,
        }
    }

    pub fn new(width: Coord, height: Coord, mines: CellCount) -> Result<Self> {
        let config = Self::new_unchecked(width, height, mines);
        config.validate()?;
        Ok(config)
    }

    /// Both sides must be positive and at least one cell must stay free of mines.
    pub fn validate(&self) -> Result<()> {
        if self.width > 0 && self.height > 0 && self.mines < self.total_cells() {
            Ok(())
        } else {
            Err(GameError::InvalidConfiguration {
                width: self.width,
                height: self.height,
                mines: self.mines,
            })
        }
    }

    /// Board size as `(height, width)`, the same shape used by cell coordinates.
    pub const fn size(&self) -> Coord2 {
        (self.height, self.width)
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.width, self.height)
    }

    pub const fn safe_cells(&self) -> CellCount {
        self.total_cells().saturating_sub(self.mines)
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::CLASSIC
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FlagOutcome {
    NoChange,
    Changed,
}

impl FlagOutcome {
    pub const fn has_update(self) -> bool {
        match self {
            Self::NoChange => false,
            Self::Changed => true,
        }
    }
}

/// Result of a reveal. `NoChange` and `Revealed` both mean the game continues.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RevealOutcome {
    NoChange,
    Revealed,
    Won,
    Lost,
}

impl RevealOutcome {
    /// Whether this outcome could have caused an update to the board
    pub const fn has_update(self) -> bool {
        use RevealOutcome::*;
        match self {
            NoChange => false,
            Revealed => true,
            Won => true,
            Lost => true,
        }
    }

    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presets_are_valid() {
        for config in [
            GameConfig::CLASSIC,
            GameConfig::BEGINNER,
            GameConfig::INTERMEDIATE,
            GameConfig::EXPERT,
        ] {
            assert_eq!(config.validate(), Ok(()));
        }
        assert_eq!(GameConfig::EXPERT.size(), (16, 30));
        assert_eq!(GameConfig::CLASSIC.safe_cells(), 216);
    }

    #[test]
    fn config_rejects_full_or_empty_boards() {
        assert_eq!(
            GameConfig::new(3, 3, 9),
            Err(GameError::InvalidConfiguration {
                width: 3,
                height: 3,
                mines: 9
            })
        );
        assert!(GameConfig::new(0, 3, 0).is_err());
        assert!(GameConfig::new(3, -1, 0).is_err());
        assert!(GameConfig::new(3, 3, 8).is_ok());
        assert!(GameConfig::new(1, 1, 0).is_ok());
    }

    #[test]
    fn outcome_flags() {
        assert!(!RevealOutcome::NoChange.has_update());
        assert!(RevealOutcome::Revealed.has_update());
        assert!(RevealOutcome::Won.is_terminal());
        assert!(RevealOutcome::Lost.is_terminal());
        assert!(!RevealOutcome::Revealed.is_terminal());
        assert!(FlagOutcome::Changed.has_update());
        assert!(!FlagOutcome::NoChange.has_update());
    }
}
