use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::cell::CellValue;
use crate::error::{GameError, Result};
use crate::types::{CellCount, Coord, Coord2, NeighborIter, ToNdIndex, neighbors};

/// Immutable mine field. Every cell is either a mine or carries the exact
/// count of mines among its in-bounds 8-neighbors; the counts are computed
/// once, after all mines are placed, and never change afterwards.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Board {
    cells: Array2<CellValue>,
    mine_count: CellCount,
}

impl Board {
    /// Builds a board from a mine mask, running the single adjacency pass
    /// over the full grid.
    pub fn from_mine_mask(mine_mask: &Array2<bool>) -> Self {
        let dim = mine_mask.dim();
        let bounds: Coord2 = (
            dim.0.try_into().unwrap(),
            dim.1.try_into().unwrap(),
        );

        let mut cells = Array2::from_elem(dim, CellValue::Clue(0));
        let mut mine_count: CellCount = 0;

        for ((ix, iy), &is_mine) in mine_mask.indexed_iter() {
            cells[(ix, iy)] = if is_mine {
                mine_count += 1;
                CellValue::Mine
            } else {
                let clue = neighbors((ix as Coord, iy as Coord), bounds)
                    .filter(|&pos| mine_mask[pos.to_nd_index()])
                    .count() as u8;
                CellValue::Clue(clue)
            };
        }

        Self { cells, mine_count }
    }

    /// Builds a board with mines at the given coordinates. Duplicates
    /// collapse into a single mine; out-of-bounds coordinates are rejected.
    pub fn from_mine_coords(size: Coord2, mine_coords: &[Coord2]) -> Result<Self> {
        let mut mine_mask: Array2<bool> = Array2::default(size.to_nd_index());

        for &(x, y) in mine_coords {
            if x >= size.0 || y >= size.1 {
                return Err(GameError::OutOfBounds(x, y));
            }
            mine_mask[(x as usize, y as usize)] = true;
        }

        Ok(Self::from_mine_mask(&mine_mask))
    }

    pub fn size(&self) -> Coord2 {
        let dim = self.cells.dim();
        (dim.0.try_into().unwrap(), dim.1.try_into().unwrap())
    }

    pub fn total_cells(&self) -> CellCount {
        self.cells.len().try_into().unwrap()
    }

    pub fn mine_count(&self) -> CellCount {
        self.mine_count
    }

    pub fn safe_cell_count(&self) -> CellCount {
        self.total_cells() - self.mine_count
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        let size = self.size();
        if coords.0 < size.0 && coords.1 < size.1 {
            Ok(coords)
        } else {
            Err(GameError::OutOfBounds(coords.0, coords.1))
        }
    }

    /// Value of an in-bounds cell. Panics on out-of-range coordinates.
    pub fn value_at(&self, coords: Coord2) -> CellValue {
        self.cells[coords.to_nd_index()]
    }

    pub fn is_mine(&self, coords: Coord2) -> bool {
        self.value_at(coords).is_mine()
    }

    pub(crate) fn iter_neighbors(&self, coords: Coord2) -> NeighborIter {
        neighbors(coords, self.size())
    }
}
