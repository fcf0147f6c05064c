//! Minestomper board engine: mine-field generation, reveal/flag mutation,
//! win/loss detection, and session statistics. Pure logic, no I/O; the
//! front end owns the session lifecycle and consumes these operations.

use serde::{Deserialize, Serialize};

pub use board::*;
pub use cell::*;
pub use error::*;
pub use generator::*;
pub use session::*;
pub use stats::*;
pub use types::*;

mod board;
mod cell;
mod error;
mod generator;
mod session;
mod stats;
mod types;

/// Validated board parameters: positive dimensions and fewer mines than
/// cells, checked before any grid is allocated.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    pub size: Coord2,
    pub mines: CellCount,
}

impl GameConfig {
    pub const fn new_unchecked(size: Coord2, mines: CellCount) -> Self {
        Self { size, mines }
    }

    pub fn new((width, height): Coord2, mines: CellCount) -> Result<Self> {
        if width == 0 || height == 0 || mines >= cell_count(width, height) {
            return Err(GameError::InvalidConfig {
                width,
                height,
                mines,
            });
        }
        Ok(Self::new_unchecked((width, height), mines))
    }

    pub const fn total_cells(&self) -> CellCount {
        cell_count(self.size.0, self.size.1)
    }

    pub const fn safe_cells(&self) -> CellCount {
        self.total_cells() - self.mines
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_mine_counts_below_the_cell_count() {
        let config = GameConfig::new((4, 4), 15).unwrap();
        assert_eq!(config.total_cells(), 16);
        assert_eq!(config.safe_cells(), 1);

        assert!(GameConfig::new((4, 4), 0).is_ok());
    }

    #[test]
    fn rejects_a_full_board_of_mines() {
        assert_eq!(
            GameConfig::new((4, 4), 16),
            Err(GameError::InvalidConfig {
                width: 4,
                height: 4,
                mines: 16,
            })
        );
    }

    #[test]
    fn rejects_empty_dimensions() {
        assert!(GameConfig::new((0, 5), 1).is_err());
        assert!(GameConfig::new((5, 0), 0).is_err());
    }
}
