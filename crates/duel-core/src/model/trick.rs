use crate::game::report::TrickOutcome;
use crate::model::card::Card;
use crate::model::seat::Seat;
use crate::model::suit::Suit;
use thiserror::Error;

#[derive(Debug, Clone)]
pub struct Trick {
    leader: Seat,
    plays: Vec<Play>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Play {
    pub seat: Seat,
    pub card: Card,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TrickError {
    #[error("trick already complete")]
    TrickComplete,
    #[error("expected {expected} to play next but got {actual}")]
    OutOfTurn { expected: Seat, actual: Seat },
}

impl Trick {
    pub fn new(leader: Seat) -> Self {
        Self {
            leader,
            plays: Vec::with_capacity(2),
        }
    }

    pub fn leader(&self) -> Seat {
        self.leader
    }

    pub fn is_complete(&self) -> bool {
        self.plays.len() == 2
    }

    pub fn lead_card(&self) -> Option<Card> {
        self.plays.first().map(|play| play.card)
    }

    pub fn lead_suit(&self) -> Option<Suit> {
        self.lead_card().map(|card| card.suit)
    }

    pub fn play(&mut self, seat: Seat, card: Card) -> Result<(), TrickError> {
        if self.is_complete() {
            return Err(TrickError::TrickComplete);
        }

        let expected = self.expected_seat();
        if expected != seat {
            return Err(TrickError::OutOfTurn {
                expected,
                actual: seat,
            });
        }

        self.plays.push(Play { seat, card });
        Ok(())
    }

    /// The follower takes the trick only with a higher card of the led suit.
    pub fn winner(&self) -> Option<Seat> {
        let [lead, follow] = self.plays.as_slice() else {
            return None;
        };
        if follow.card.beats(lead.card) {
            Some(follow.seat)
        } else {
            Some(lead.seat)
        }
    }

    /// Summarises a complete trick; `number` is 1-based.
    pub fn outcome(&self, number: usize) -> Option<TrickOutcome> {
        let winner = self.winner()?;
        Some(TrickOutcome {
            number,
            leader: self.leader,
            lead: self.plays[0].card,
            follow: self.plays[1].card,
            winner,
        })
    }

    fn expected_seat(&self) -> Seat {
        self.plays
            .last()
            .map(|play| play.seat.other())
            .unwrap_or(self.leader)
    }
}
