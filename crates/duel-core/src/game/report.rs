use crate::model::card::Card;
use crate::model::score::{GameResult, ScoreBoard};
use crate::model::seat::Seat;
use serde::{Deserialize, Serialize};

/// What happened in one trick.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct TrickOutcome {
    pub number: usize,
    pub leader: Seat,
    pub lead: Card,
    pub follow: Card,
    pub winner: Seat,
}

impl TrickOutcome {
    pub fn card_of(&self, seat: Seat) -> Card {
        if seat == self.leader {
            self.lead
        } else {
            self.follow
        }
    }
}

/// Full transcript of a finished game.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GameReport {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    pub tricks: Vec<TrickOutcome>,
    pub scores: [u32; 2],
    pub result: GameResult,
}

impl GameReport {
    pub fn new(seed: Option<u64>, tricks: Vec<TrickOutcome>, scores: &ScoreBoard) -> Self {
        Self {
            seed,
            tricks,
            scores: *scores.standings(),
            result: scores.result(),
        }
    }

    pub fn score(&self, seat: Seat) -> u32 {
        self.scores[seat.index()]
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}
