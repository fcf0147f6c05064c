use crate::{Board, GameConfig};

pub use random::*;

mod random;

/// Strategy for turning a validated configuration into a mine field.
pub trait BoardGenerator {
    fn generate(self, config: GameConfig) -> Board;
}
