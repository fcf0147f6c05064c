use std::collections::VecDeque;

use chrono::{DateTime, Utc};
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    InProgress,
    Won,
    Lost,
}

impl GameStatus {
    /// Once terminal, no mutating operation has any effect.
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

impl Default for GameStatus {
    fn default() -> Self {
        Self::InProgress
    }
}

/// Outcome of a reveal call.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RevealOutcome {
    NoChange,
    Revealed,
    HitMine,
    Won,
}

impl RevealOutcome {
    pub const fn has_update(self) -> bool {
        !matches!(self, Self::NoChange)
    }
}

/// Outcome of a flag toggle.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MarkOutcome {
    NoChange,
    Flagged,
    Unflagged,
}

impl MarkOutcome {
    pub const fn has_update(self) -> bool {
        !matches!(self, Self::NoChange)
    }
}

/// A single game from start to finish: the generated board, what the player
/// can see of it, and the terminal result once one is reached. Created fresh
/// per game and owned by the caller; there is no hidden global state.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Session {
    board: Board,
    visibility: Array2<Visibility>,
    revealed_count: CellCount,
    flagged_count: CellCount,
    status: GameStatus,
    started_at: DateTime<Utc>,
    ended_at: Option<DateTime<Utc>>,
    triggered_mine: Option<Coord2>,
}

impl Session {
    pub fn new(board: Board) -> Self {
        let size = board.size();
        Self {
            board,
            visibility: Array2::default(size.to_nd_index()),
            revealed_count: 0,
            flagged_count: 0,
            status: Default::default(),
            started_at: Utc::now(),
            ended_at: None,
            triggered_mine: None,
        }
    }

    pub fn generate(config: GameConfig, generator: impl BoardGenerator) -> Self {
        Self::new(generator.generate(config))
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn is_over(&self) -> bool {
        self.status.is_terminal()
    }

    pub fn size(&self) -> Coord2 {
        self.board.size()
    }

    pub fn total_mines(&self) -> CellCount {
        self.board.mine_count()
    }

    /// Mine counter for display: total mines minus placed flags, negative
    /// when the player has over-flagged.
    pub fn mines_left(&self) -> isize {
        (self.board.mine_count() as isize) - (self.flagged_count as isize)
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    pub fn ended_at(&self) -> Option<DateTime<Utc>> {
        self.ended_at
    }

    /// Seconds from start to end, or 0 while the game is still running.
    pub fn duration_secs(&self) -> u64 {
        match self.ended_at {
            Some(ended_at) => (ended_at - self.started_at).num_seconds().max(0) as u64,
            None => 0,
        }
    }

    /// Seconds since the game started, frozen at the end timestamp once the
    /// game is over.
    pub fn elapsed_secs(&self) -> u64 {
        (self.ended_at.unwrap_or_else(Utc::now) - self.started_at)
            .num_seconds()
            .max(0) as u64
    }

    /// The mine that ended the game, if it ended by a reveal on a mine.
    pub fn triggered_mine(&self) -> Option<Coord2> {
        self.triggered_mine
    }

    /// Panics on out-of-range coordinates.
    pub fn is_mine_at(&self, coords: Coord2) -> bool {
        self.board.is_mine(coords)
    }

    /// Renderer projection of a single cell.
    pub fn cell_view(&self, coords: Coord2) -> Result<CellView> {
        let coords = self.board.validate_coords(coords)?;
        Ok(match self.visibility[coords.to_nd_index()] {
            Visibility::Hidden => CellView::Hidden,
            Visibility::Flagged => CellView::Flagged,
            Visibility::Revealed => CellView::Revealed(self.board.value_at(coords)),
        })
    }

    /// Reveals a hidden cell. No-op when the cell is already revealed or
    /// flagged, or the session is terminal. Revealing a mine loses the game
    /// without any further cascading; revealing a zero-clue cell opens its
    /// whole connected zero region plus the clue border.
    pub fn reveal(&mut self, coords: Coord2) -> Result<RevealOutcome> {
        let coords = self.board.validate_coords(coords)?;

        if self.status.is_terminal() || self.visibility[coords.to_nd_index()] != Visibility::Hidden
        {
            return Ok(RevealOutcome::NoChange);
        }

        self.visibility[coords.to_nd_index()] = Visibility::Revealed;

        match self.board.value_at(coords) {
            CellValue::Mine => {
                self.triggered_mine = Some(coords);
                self.end_game(GameStatus::Lost);
                return Ok(RevealOutcome::HitMine);
            }
            CellValue::Clue(0) => {
                self.revealed_count += 1;
                self.flood_from(coords);
            }
            CellValue::Clue(_) => {
                self.revealed_count += 1;
            }
        }

        if self.revealed_count == self.board.safe_cell_count() {
            self.end_game(GameStatus::Won);
            Ok(RevealOutcome::Won)
        } else {
            Ok(RevealOutcome::Revealed)
        }
    }

    /// Explicit worklist instead of call-stack recursion, so a large zero
    /// region cannot exhaust the stack. Neighbors of a zero-clue cell are
    /// never mines, so the cascade cannot lose the game; flagged cells are
    /// skipped and stay flagged.
    fn flood_from(&mut self, start: Coord2) {
        let mut to_visit: VecDeque<Coord2> = self.board.iter_neighbors(start).collect();

        while let Some(coords) = to_visit.pop_front() {
            if self.visibility[coords.to_nd_index()] != Visibility::Hidden {
                continue;
            }

            self.visibility[coords.to_nd_index()] = Visibility::Revealed;
            self.revealed_count += 1;

            if self.board.value_at(coords) == CellValue::Clue(0) {
                to_visit.extend(self.board.iter_neighbors(coords));
            }
        }
    }

    /// Flips `Flagged <-> Hidden`. No-op on revealed cells and terminal
    /// sessions. Flags never influence the win condition.
    pub fn toggle_flag(&mut self, coords: Coord2) -> Result<MarkOutcome> {
        let coords = self.board.validate_coords(coords)?;

        if self.status.is_terminal() {
            return Ok(MarkOutcome::NoChange);
        }

        Ok(match self.visibility[coords.to_nd_index()] {
            Visibility::Hidden => {
                self.visibility[coords.to_nd_index()] = Visibility::Flagged;
                self.flagged_count += 1;
                MarkOutcome::Flagged
            }
            Visibility::Flagged => {
                self.visibility[coords.to_nd_index()] = Visibility::Hidden;
                self.flagged_count -= 1;
                MarkOutcome::Unflagged
            }
            Visibility::Revealed => MarkOutcome::NoChange,
        })
    }

    /// Authoritative win condition: true iff every non-mine cell is revealed.
    /// Mines may be hidden, flagged, or revealed; flags are irrelevant.
    pub fn check_win(&self) -> bool {
        self.visibility.indexed_iter().all(|((ix, iy), &visibility)| {
            visibility.is_revealed() || self.board.is_mine((ix as Coord, iy as Coord))
        })
    }

    fn end_game(&mut self, status: GameStatus) {
        if self.status.is_terminal() {
            return;
        }

        self.status = status;
        self.ended_at = Some(Utc::now());
        log::debug!("session ended: {status:?} after {}s", self.duration_secs());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(size: Coord2, mines: &[Coord2]) -> Session {
        Session::new(Board::from_mine_coords(size, mines).unwrap())
    }

    fn revealed_cells(session: &Session) -> Vec<Coord2> {
        let (width, height) = session.size();
        let mut cells = Vec::new();
        for x in 0..width {
            for y in 0..height {
                if let Ok(CellView::Revealed(_)) = session.cell_view((x, y)) {
                    cells.push((x, y));
                }
            }
        }
        cells
    }

    #[test]
    fn revealing_a_mine_loses_without_cascading() {
        let mut game = session((5, 5), &[(0, 0), (4, 0), (2, 2), (0, 4), (4, 4)]);

        let outcome = game.reveal((2, 2)).unwrap();

        assert_eq!(outcome, RevealOutcome::HitMine);
        assert_eq!(game.status(), GameStatus::Lost);
        assert_eq!(game.triggered_mine(), Some((2, 2)));
        assert!(game.ended_at().is_some());
        assert_eq!(revealed_cells(&game), vec![(2, 2)]);
    }

    #[test]
    fn terminal_session_ignores_further_moves() {
        let mut game = session((5, 5), &[(0, 0), (4, 0), (2, 2), (0, 4), (4, 4)]);

        game.reveal((2, 2)).unwrap();
        let ended_at = game.ended_at();

        assert_eq!(game.reveal((1, 1)).unwrap(), RevealOutcome::NoChange);
        assert_eq!(game.toggle_flag((1, 1)).unwrap(), MarkOutcome::NoChange);
        assert_eq!(game.ended_at(), ended_at);
        assert_eq!(revealed_cells(&game), vec![(2, 2)]);
    }

    #[test]
    fn zero_reveal_cascades_to_the_whole_board_and_wins() {
        // Single corner mine: (2, 2) must be Clue(0), and the cascade has to
        // open all eight safe cells in one move.
        let mut game = session((3, 3), &[(0, 0)]);

        let outcome = game.reveal((2, 2)).unwrap();

        assert_eq!(outcome, RevealOutcome::Won);
        assert_eq!(game.status(), GameStatus::Won);
        assert!(game.check_win());
        assert_eq!(revealed_cells(&game).len(), 8);
        assert_eq!(game.cell_view((0, 0)).unwrap(), CellView::Hidden);
    }

    #[test]
    fn cascade_stops_at_the_clue_border() {
        // Mine wall down column 2: the zero region on the left opens columns
        // 0 and 1 and nothing beyond.
        let mines = &[(2, 0), (2, 1), (2, 2), (2, 3), (2, 4)];
        let mut game = session((5, 5), mines);

        let outcome = game.reveal((0, 0)).unwrap();

        assert_eq!(outcome, RevealOutcome::Revealed);
        assert_eq!(game.status(), GameStatus::InProgress);
        let opened = revealed_cells(&game);
        assert_eq!(opened.len(), 10);
        assert!(opened.iter().all(|&(x, _)| x <= 1));
    }

    #[test]
    fn cascade_skips_flagged_cells() {
        let mut game = session((3, 3), &[(0, 0)]);

        game.toggle_flag((2, 0)).unwrap();
        let outcome = game.reveal((2, 2)).unwrap();

        assert_eq!(outcome, RevealOutcome::Revealed);
        assert_eq!(game.status(), GameStatus::InProgress);
        assert_eq!(game.cell_view((2, 0)).unwrap(), CellView::Flagged);
        assert_eq!(revealed_cells(&game).len(), 7);
    }

    #[test]
    fn reveal_on_flagged_cell_is_a_no_op() {
        let mut game = session((3, 3), &[(0, 0)]);

        game.toggle_flag((2, 2)).unwrap();

        assert_eq!(game.reveal((2, 2)).unwrap(), RevealOutcome::NoChange);
        assert_eq!(game.cell_view((2, 2)).unwrap(), CellView::Flagged);
    }

    #[test]
    fn flag_toggles_back_to_hidden() {
        let mut game = session((3, 3), &[(0, 0)]);

        assert_eq!(game.toggle_flag((1, 1)).unwrap(), MarkOutcome::Flagged);
        assert_eq!(game.mines_left(), 0);
        assert_eq!(game.toggle_flag((1, 1)).unwrap(), MarkOutcome::Unflagged);
        assert_eq!(game.mines_left(), 1);
        assert_eq!(game.cell_view((1, 1)).unwrap(), CellView::Hidden);
    }

    #[test]
    fn flag_on_revealed_cell_is_a_no_op() {
        let mut game = session((3, 3), &[(0, 0)]);

        game.reveal((1, 1)).unwrap();

        assert_eq!(game.toggle_flag((1, 1)).unwrap(), MarkOutcome::NoChange);
        assert_eq!(
            game.cell_view((1, 1)).unwrap(),
            CellView::Revealed(CellValue::Clue(1))
        );
    }

    #[test]
    fn winning_does_not_require_flags_on_mines() {
        let mut game = session((2, 1), &[(0, 0)]);

        assert_eq!(game.reveal((1, 0)).unwrap(), RevealOutcome::Won);
        assert!(game.check_win());
        assert_eq!(game.cell_view((0, 0)).unwrap(), CellView::Hidden);
    }

    #[test]
    fn flagged_mine_does_not_change_the_win_result() {
        let mut game = session((2, 1), &[(0, 0)]);

        game.toggle_flag((0, 0)).unwrap();
        game.reveal((1, 0)).unwrap();

        assert_eq!(game.status(), GameStatus::Won);
        assert!(game.check_win());
    }

    #[test]
    fn out_of_bounds_moves_are_rejected() {
        let mut game = session((3, 3), &[(0, 0)]);

        assert_eq!(game.reveal((3, 0)), Err(GameError::OutOfBounds(3, 0)));
        assert_eq!(game.toggle_flag((0, 3)), Err(GameError::OutOfBounds(0, 3)));
        assert_eq!(game.cell_view((9, 9)), Err(GameError::OutOfBounds(9, 9)));
    }

    #[test]
    fn revealing_a_nonzero_clue_opens_only_that_cell() {
        let mut game = session((3, 3), &[(0, 0), (2, 2)]);

        assert_eq!(game.reveal((1, 1)).unwrap(), RevealOutcome::Revealed);
        assert_eq!(revealed_cells(&game), vec![(1, 1)]);
    }

    #[test]
    fn session_round_trips_through_serde() {
        let mut game = session((3, 3), &[(0, 0)]);
        game.toggle_flag((0, 0)).unwrap();
        game.reveal((1, 1)).unwrap();

        let encoded = serde_json::to_string(&game).unwrap();
        let decoded: Session = serde_json::from_str(&encoded).unwrap();

        assert_eq!(decoded, game);
    }
}
