use crate::TRICKS_PER_GAME;
use crate::model::score::{GameResult, ScoreBoard};
use crate::model::seat::Seat;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    Dealing,
    TrickInProgress,
    Finished,
}

/// Referee-owned bookkeeping for one game.
#[derive(Debug, Clone)]
pub struct GameState {
    phase: GamePhase,
    leader: Seat,
    round: usize,
    scores: ScoreBoard,
}

impl GameState {
    /// Seat one leads the first trick.
    pub fn new() -> Self {
        Self {
            phase: GamePhase::Dealing,
            leader: Seat::One,
            round: 0,
            scores: ScoreBoard::new(),
        }
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn leader(&self) -> Seat {
        self.leader
    }

    pub fn follower(&self) -> Seat {
        self.leader.other()
    }

    /// Zero-based index of the trick currently being played.
    pub fn round(&self) -> usize {
        self.round
    }

    pub fn scores(&self) -> &ScoreBoard {
        &self.scores
    }

    pub fn is_finished(&self) -> bool {
        matches!(self.phase, GamePhase::Finished)
    }

    pub fn result(&self) -> Option<GameResult> {
        self.is_finished().then(|| self.scores.result())
    }

    /// Hands are out; tricks may be played.
    pub fn begin_play(&mut self) {
        assert_eq!(self.phase, GamePhase::Dealing, "cards were already dealt");
        self.phase = GamePhase::TrickInProgress;
    }

    /// Credits the trick winner, who leads next.
    pub fn complete_trick(&mut self, winner: Seat) {
        assert_eq!(
            self.phase,
            GamePhase::TrickInProgress,
            "no trick is in progress"
        );
        self.scores.award_trick(winner);
        self.leader = winner;
        self.round += 1;
        debug_assert_eq!(self.scores.tricks_counted() as usize, self.round);
        if self.round == TRICKS_PER_GAME {
            self.phase = GamePhase::Finished;
        }
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::{GamePhase, GameState};
    use crate::TRICKS_PER_GAME;
    use crate::model::score::GameResult;
    use crate::model::seat::Seat;

    #[test]
    fn new_game_starts_dealing_with_seat_one_leading() {
        let state = GameState::new();
        assert_eq!(state.phase(), GamePhase::Dealing);
        assert_eq!(state.leader(), Seat::One);
        assert_eq!(state.follower(), Seat::Two);
        assert_eq!(state.round(), 0);
        assert_eq!(state.result(), None);
    }

    #[test]
    fn winner_takes_the_lead() {
        let mut state = GameState::new();
        state.begin_play();
        state.complete_trick(Seat::Two);
        assert_eq!(state.leader(), Seat::Two);
        assert_eq!(state.round(), 1);
        assert_eq!(state.scores().score(Seat::Two), 1);

        state.complete_trick(Seat::Two);
        assert_eq!(state.leader(), Seat::Two);
        state.complete_trick(Seat::One);
        assert_eq!(state.leader(), Seat::One);
        assert_eq!(state.scores().tricks_counted(), 3);
    }

    #[test]
    fn finishes_after_sixteen_tricks() {
        let mut state = GameState::new();
        state.begin_play();
        for round in 0..TRICKS_PER_GAME {
            assert_eq!(state.phase(), GamePhase::TrickInProgress);
            let winner = if round % 3 == 0 { Seat::Two } else { Seat::One };
            state.complete_trick(winner);
        }
        assert!(state.is_finished());
        assert_eq!(state.scores().tricks_counted(), 16);
        assert_eq!(state.result(), Some(GameResult::Winner(Seat::One)));
    }

    #[test]
    #[should_panic(expected = "no trick is in progress")]
    fn completing_a_trick_before_dealing_panics() {
        let mut state = GameState::new();
        state.complete_trick(Seat::One);
    }
}
