use thiserror::Error;

use crate::types::{CellCount, Coord};

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("invalid configuration: {width}x{height} board cannot hold {mines} mines")]
    InvalidConfig {
        width: Coord,
        height: Coord,
        mines: CellCount,
    },
    #[error("coordinates ({0}, {1}) are outside the board")]
    OutOfBounds(Coord, Coord),
}

pub type Result<T> = core::result::Result<T, GameError>;
