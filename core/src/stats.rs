use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::session::{GameStatus, Session};
use crate::types::CellCount;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    Win,
    Lose,
}

/// Immutable snapshot of a finished (or abandoned) game, appended to the
/// session history when the player leaves a game.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StatisticsRecord {
    pub timestamp: DateTime<Utc>,
    pub duration_secs: u64,
    pub outcome: Outcome,
    pub mines: CellCount,
}

impl StatisticsRecord {
    /// Snapshots the session as it stands. The stored status is the source
    /// of truth for the outcome; anything short of `Won` (a loss, or an
    /// abandoned in-progress game) records as `Lose`, which is also what a
    /// fresh win check would derive.
    pub fn from_session(session: &Session) -> Self {
        let outcome = match session.status() {
            GameStatus::Won => Outcome::Win,
            GameStatus::Lost | GameStatus::InProgress => Outcome::Lose,
        };

        Self {
            timestamp: Utc::now(),
            duration_secs: session.duration_secs(),
            outcome,
            mines: session.total_mines(),
        }
    }
}

/// In-memory history of played games, insertion-ordered, kept for the
/// lifetime of the process only.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct StatsHistory {
    records: Vec<StatisticsRecord>,
}

impl StatsHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, session: &Session) {
        self.records.push(StatisticsRecord::from_session(session));
    }

    pub fn iter(&self) -> impl Iterator<Item = &StatisticsRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
