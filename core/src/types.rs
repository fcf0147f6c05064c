/// Single coordinate axis used for board width, height, and positions.
pub type Coord = u8;

/// Count type used for mine counts and total-cell counts.
pub type CellCount = u16;

/// Two-dimensional coordinates `(x, y)`.
pub type Coord2 = (Coord, Coord);

pub trait ToNdIndex {
    type Output;
    fn to_nd_index(self) -> Self::Output;
}

impl ToNdIndex for Coord2 {
    type Output = [usize; 2];

    fn to_nd_index(self) -> Self::Output {
        [self.0.into(), self.1.into()]
    }
}

/// Saturating `width * height` in the wider count type.
pub const fn cell_count(width: Coord, height: Coord) -> CellCount {
    (width as CellCount).saturating_mul(height as CellCount)
}

const NEIGHBOR_DELTAS: [(i16, i16); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// Iterates the in-bounds cells of the 8-neighborhood of `center`, in a fixed
/// order (row by row, top-left to bottom-right).
pub fn neighbors(center: Coord2, bounds: Coord2) -> NeighborIter {
    NeighborIter {
        center,
        bounds,
        next: 0,
    }
}

#[derive(Debug)]
pub struct NeighborIter {
    center: Coord2,
    bounds: Coord2,
    next: usize,
}

impl NeighborIter {
    fn offset(&self, (dx, dy): (i16, i16)) -> Option<Coord2> {
        let x = i16::from(self.center.0) + dx;
        let y = i16::from(self.center.1) + dy;
        if (0..i16::from(self.bounds.0)).contains(&x) && (0..i16::from(self.bounds.1)).contains(&y)
        {
            Some((x as Coord, y as Coord))
        } else {
            None
        }
    }
}

impl Iterator for NeighborIter {
    type Item = Coord2;

    fn next(&mut self) -> Option<Self::Item> {
        while self.next < NEIGHBOR_DELTAS.len() {
            let candidate = self.offset(NEIGHBOR_DELTAS[self.next]);
            self.next += 1;

            if candidate.is_some() {
                return candidate;
            }
        }
        None
    }
}
