use serde::{Deserialize, Serialize};

/// Fixed value of a cell, decided once at generation time.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellValue {
    Mine,
    /// Count of mines among the in-bounds 8-neighbors, `0..=8`.
    Clue(u8),
}

impl CellValue {
    pub const fn is_mine(self) -> bool {
        matches!(self, Self::Mine)
    }

    pub const fn clue(self) -> Option<u8> {
        match self {
            Self::Mine => None,
            Self::Clue(count) => Some(count),
        }
    }
}

/// Player-visible state of a cell, tracked independently of its value.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Visibility {
    Hidden,
    Revealed,
    Flagged,
}

impl Visibility {
    pub const fn is_revealed(self) -> bool {
        matches!(self, Self::Revealed)
    }
}

impl Default for Visibility {
    fn default() -> Self {
        Self::Hidden
    }
}

/// Read-only projection of a single cell, consumed by renderers to pick a
/// glyph. The value behind a hidden or flagged cell is never exposed.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum CellView {
    Hidden,
    Flagged,
    Revealed(CellValue),
}
