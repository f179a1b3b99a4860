use crate::model::seat::Seat;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameResult {
    Winner(Seat),
    Draw,
}

/// Tricks taken by each seat.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreBoard {
    totals: [u32; 2],
}

impl ScoreBoard {
    pub const fn new() -> Self {
        Self { totals: [0; 2] }
    }

    pub fn award_trick(&mut self, seat: Seat) {
        self.totals[seat.index()] += 1;
    }

    pub fn score(&self, seat: Seat) -> u32 {
        self.totals[seat.index()]
    }

    pub fn standings(&self) -> &[u32; 2] {
        &self.totals
    }

    pub fn tricks_counted(&self) -> u32 {
        self.totals.iter().sum()
    }

    pub fn result(&self) -> GameResult {
        let one = self.score(Seat::One);
        let two = self.score(Seat::Two);
        match one.cmp(&two) {
            std::cmp::Ordering::Greater => GameResult::Winner(Seat::One),
            std::cmp::Ordering::Less => GameResult::Winner(Seat::Two),
            std::cmp::Ordering::Equal => GameResult::Draw,
        }
    }
}

impl Default for ScoreBoard {
    fn default() -> Self {
        Self::new()
    }
}
