use std::collections::HashSet;
use std::io;

use duel_bot::Policy;
use duel_core::HAND_SIZE;
use duel_core::game::report::{GameReport, TrickOutcome};
use duel_core::game::state::GameState;
use duel_core::model::card::Card;
use duel_core::model::deck::Deck;
use duel_core::model::seat::Seat;
use duel_core::model::trick::{Trick, TrickError};
use duel_core::protocol::{Command, ProtocolError};
use thiserror::Error;
use tracing::{Level, event};

use crate::agent_link::AgentLink;
use crate::observer::GameObserver;

/// Failures that end a game. None of them is retried.
#[derive(Debug, Error)]
pub enum RefereeError {
    #[error("failed to start agent thread for {seat}: {source}")]
    Spawn {
        seat: Seat,
        #[source]
        source: io::Error,
    },
    #[error("protocol violation with {seat}: {source}")]
    Protocol {
        seat: Seat,
        #[source]
        source: ProtocolError,
    },
    #[error("{seat} played {card}, which is already on the table")]
    DuplicateCard { seat: Seat, card: Card },
    #[error("{seat} played {card}, which was not dealt to it")]
    ForeignCard { seat: Seat, card: Card },
    #[error("both agent links were started for {seat}")]
    SeatConflict { seat: Seat },
    #[error("trick sequencing failed: {0}")]
    Trick(#[from] TrickError),
    #[error("{seat} failed: {source}")]
    Agent {
        seat: Seat,
        #[source]
        source: ProtocolError,
    },
    #[error("{seat} agent thread panicked")]
    AgentPanicked { seat: Seat },
    #[error("{seat} exited after playing {played} cards")]
    IncompleteAgent { seat: Seat, played: usize },
    #[error("failed to report game progress: {0}")]
    Observer(#[source] io::Error),
}

/// Deals, runs the tricks and collects the result for one game.
pub struct Referee {
    links: [AgentLink; 2],
    state: GameState,
    seed: Option<u64>,
    dealt: [HashSet<Card>; 2],
    played: HashSet<Card>,
    tricks: Vec<TrickOutcome>,
}

impl Referee {
    /// Takes the two links in either order; each is placed by its own seat.
    /// Two links for the same seat are rejected and both agents are shut down.
    pub fn new(a: AgentLink, b: AgentLink) -> Result<Self, RefereeError> {
        if a.seat() == b.seat() {
            let seat = a.seat();
            a.abandon();
            b.abandon();
            return Err(RefereeError::SeatConflict { seat });
        }
        let links = match a.seat() {
            Seat::One => [a, b],
            Seat::Two => [b, a],
        };
        Ok(Self {
            links,
            state: GameState::new(),
            seed: None,
            dealt: [HashSet::new(), HashSet::new()],
            played: HashSet::with_capacity(HAND_SIZE * 2),
            tricks: Vec::with_capacity(HAND_SIZE),
        })
    }

    /// Starts both agents on their own threads.
    pub fn with_policies<A, B>(one: A, two: B) -> Result<Self, RefereeError>
    where
        A: Policy + 'static,
        B: Policy + 'static,
    {
        let first = AgentLink::spawn_policy(Seat::One, one).map_err(|source| {
            RefereeError::Spawn {
                seat: Seat::One,
                source,
            }
        })?;
        let second = match AgentLink::spawn_policy(Seat::Two, two) {
            Ok(link) => link,
            Err(source) => {
                first.abandon();
                return Err(RefereeError::Spawn {
                    seat: Seat::Two,
                    source,
                });
            }
        };
        Self::new(first, second)
    }

    /// Records the shuffle seed in the final report.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Plays a full game from `deck`. On any error every agent is shut down
    /// before the error is returned, and the observer never sees a final line.
    pub fn play<O>(mut self, deck: Deck, observer: &mut O) -> Result<GameReport, RefereeError>
    where
        O: GameObserver + ?Sized,
    {
        let outcome = self.run_tricks(deck, observer);
        let links = self.links;
        if let Err(err) = outcome {
            event!(
                target: "duel_referee::referee",
                Level::ERROR,
                round = self.state.round(),
                error = %err,
                "aborting game"
            );
            for link in links {
                link.abandon();
            }
            return Err(err);
        }

        shut_down(links)?;

        let report = GameReport::new(self.seed, self.tricks, self.state.scores());
        event!(
            target: "duel_referee::referee",
            Level::INFO,
            score_one = report.score(Seat::One),
            score_two = report.score(Seat::Two),
            result = ?report.result,
            "game finished"
        );
        observer
            .game_finished(&report)
            .map_err(RefereeError::Observer)?;
        Ok(report)
    }

    fn run_tricks<O>(&mut self, deck: Deck, observer: &mut O) -> Result<(), RefereeError>
    where
        O: GameObserver + ?Sized,
    {
        self.deal(deck)?;
        while !self.state.is_finished() {
            let outcome = self.play_trick()?;
            observer
                .trick_completed(&outcome)
                .map_err(RefereeError::Observer)?;
            self.tricks.push(outcome);
        }
        Ok(())
    }

    fn deal(&mut self, deck: Deck) -> Result<(), RefereeError> {
        let hands = deck.deal();
        for (link, cards) in self.links.iter_mut().zip(hands.iter()) {
            let seat = link.seat();
            link.send_hand(cards)
                .map_err(|source| RefereeError::Protocol { seat, source })?;
            self.dealt[seat.index()] = cards.iter().copied().collect();
        }
        event!(
            target: "duel_referee::referee",
            Level::DEBUG,
            hand_size = HAND_SIZE,
            "hands dealt"
        );
        self.state.begin_play();
        Ok(())
    }

    fn play_trick(&mut self) -> Result<TrickOutcome, RefereeError> {
        let leader = self.state.leader();
        let follower = self.state.follower();
        let mut trick = Trick::new(leader);

        let lead = self.request(leader, Command::Lead)?;
        trick.play(leader, lead)?;
        let follow = self.request(follower, Command::Follow(lead))?;
        trick.play(follower, follow)?;

        let Some(outcome) = trick.outcome(self.state.round() + 1) else {
            unreachable!("a trick with both plays always has a winner");
        };
        self.state.complete_trick(outcome.winner);

        event!(
            target: "duel_referee::referee",
            Level::INFO,
            round = outcome.number,
            leader = %leader,
            lead = %lead,
            follow = %follow,
            winner = %outcome.winner,
            "trick complete"
        );
        Ok(outcome)
    }

    fn request(&mut self, seat: Seat, command: Command) -> Result<Card, RefereeError> {
        let link = &mut self.links[seat.index()];
        link.send(command)
            .map_err(|source| RefereeError::Protocol { seat, source })?;
        let card = link
            .receive_card()
            .map_err(|source| RefereeError::Protocol { seat, source })?;
        if self.played.contains(&card) {
            return Err(RefereeError::DuplicateCard { seat, card });
        }
        if !self.dealt[seat.index()].remove(&card) {
            return Err(RefereeError::ForeignCard { seat, card });
        }
        self.played.insert(card);
        Ok(card)
    }
}

/// Sends `X` to every agent, then waits for all of them to exit.
fn shut_down(links: [AgentLink; 2]) -> Result<(), RefereeError> {
    let mut first_error = None;
    let mut pending = Vec::with_capacity(links.len());
    for mut link in links {
        let seat = link.seat();
        if let Err(source) = link.send(Command::Terminate) {
            first_error = first_error.or(Some(RefereeError::Protocol { seat, source }));
        }
        pending.push(link);
    }

    for link in pending {
        let seat = link.seat();
        match link.finish() {
            Ok(summary) if summary.cards_played == HAND_SIZE => {
                event!(
                    target: "duel_referee::referee",
                    Level::DEBUG,
                    seat = %seat,
                    "agent exited cleanly"
                );
            }
            Ok(summary) => {
                first_error = first_error.or(Some(RefereeError::IncompleteAgent {
                    seat,
                    played: summary.cards_played,
                }));
            }
            Err(err) => {
                first_error = first_error.or(Some(err));
            }
        }
    }

    match first_error {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::{Referee, RefereeError};
    use crate::agent_link::AgentLink;
    use crate::observer::ConsoleObserver;
    use duel_bot::{AgentSummary, NaivePolicy, serve};
    use duel_core::model::deck::Deck;
    use duel_core::model::seat::Seat;
    use duel_core::protocol::{self, Command, ProtocolError};
    use std::io::Write;

    fn naive_referee() -> Referee {
        Referee::with_policies(NaivePolicy, NaivePolicy).unwrap()
    }

    #[test]
    fn full_game_conserves_score() {
        let mut observer = ConsoleObserver::new(Vec::new());
        let report = naive_referee()
            .with_seed(7)
            .play(Deck::shuffled_with_seed(7), &mut observer)
            .unwrap();

        assert_eq!(report.seed, Some(7));
        assert_eq!(report.tricks.len(), 16);
        assert_eq!(report.scores[0] + report.scores[1], 16);

        let text = String::from_utf8(observer.into_inner()).unwrap();
        assert_eq!(text.lines().count(), 17);
        assert!(text.lines().last().unwrap().starts_with("Final score:"));
    }

    #[test]
    fn agent_that_disappears_aborts_the_game() {
        let one = AgentLink::spawn_policy(Seat::One, NaivePolicy).unwrap();
        let two = AgentLink::spawn_with(Seat::Two, |mut commands, _responses| {
            protocol::read_hand(&mut commands)?;
            Err(ProtocolError::Closed)
        })
        .unwrap();

        let mut observer = ConsoleObserver::new(Vec::new());
        let err = Referee::new(one, two)
            .unwrap()
            .play(Deck::shuffled_with_seed(1), &mut observer)
            .unwrap_err();

        assert!(matches!(
            err,
            RefereeError::Protocol {
                seat: Seat::Two,
                source: ProtocolError::Closed
            }
        ));
        let text = String::from_utf8(observer.into_inner()).unwrap();
        assert!(!text.contains("Final score"));
    }

    #[test]
    fn replayed_card_is_a_protocol_violation() {
        let one = AgentLink::spawn_policy(Seat::One, NaivePolicy).unwrap();
        let two = AgentLink::spawn_with(Seat::Two, |mut commands, mut responses| {
            let hand = protocol::read_hand(&mut commands)?;
            loop {
                match protocol::read_command(&mut commands)? {
                    Command::Terminate => break,
                    _ => protocol::write_card(&mut responses, hand[0])?,
                }
            }
            Err(ProtocolError::Closed)
        })
        .unwrap();

        let mut observer = ConsoleObserver::new(Vec::new());
        let err = Referee::new(one, two)
            .unwrap()
            .play(Deck::shuffled_with_seed(3), &mut observer)
            .unwrap_err();
        assert!(matches!(
            err,
            RefereeError::DuplicateCard {
                seat: Seat::Two,
                ..
            }
        ));
    }

    #[test]
    fn agent_that_stops_early_is_detected_at_shutdown() {
        let one = AgentLink::spawn_policy(Seat::One, NaivePolicy).unwrap();
        let two = AgentLink::spawn_with(Seat::Two, |commands, responses| {
            let mut summary = serve(Seat::Two, NaivePolicy, commands, responses)?;
            summary.cards_played -= 1;
            Ok(summary)
        })
        .unwrap();

        let err = Referee::new(one, two)
            .unwrap()
            .play(Deck::shuffled_with_seed(4), &mut ConsoleObserver::new(Vec::new()))
            .unwrap_err();
        assert!(matches!(
            err,
            RefereeError::IncompleteAgent {
                seat: Seat::Two,
                played: 15
            }
        ));
    }

    #[test]
    fn links_are_placed_by_their_own_seat() {
        let one = AgentLink::spawn_policy(Seat::One, NaivePolicy).unwrap();
        let two = AgentLink::spawn_policy(Seat::Two, NaivePolicy).unwrap();
        let mut observer = ConsoleObserver::new(Vec::new());
        let swapped = Referee::new(two, one)
            .unwrap()
            .play(Deck::shuffled_with_seed(7), &mut observer)
            .unwrap();
        let in_order = naive_referee()
            .play(Deck::shuffled_with_seed(7), &mut ConsoleObserver::new(Vec::new()))
            .unwrap();

        assert_eq!(swapped.tricks, in_order.tricks);
        assert_eq!(swapped.scores, in_order.scores);
    }

    #[test]
    fn two_links_for_one_seat_are_rejected() {
        let first = AgentLink::spawn_policy(Seat::One, NaivePolicy).unwrap();
        let second = AgentLink::spawn_policy(Seat::One, NaivePolicy).unwrap();
        assert!(matches!(
            Referee::new(first, second),
            Err(RefereeError::SeatConflict { seat: Seat::One })
        ));
    }

    #[test]
    fn card_from_the_other_hand_is_rejected() {
        let [_, two_hand] = Deck::shuffled_with_seed(1).deal();
        let stolen = two_hand[0];
        let one = AgentLink::spawn_with(Seat::One, move |mut commands, mut responses| {
            protocol::read_hand(&mut commands)?;
            let mut next = two_hand.into_iter();
            loop {
                match protocol::read_command(&mut commands)? {
                    Command::Terminate => break,
                    _ => match next.next() {
                        Some(card) => protocol::write_card(&mut responses, card)?,
                        None => break,
                    },
                }
            }
            Err(ProtocolError::Closed)
        })
        .unwrap();
        let two = AgentLink::spawn_policy(Seat::Two, NaivePolicy).unwrap();

        let mut observer = ConsoleObserver::new(Vec::new());
        let err = Referee::new(one, two)
            .unwrap()
            .play(Deck::shuffled_with_seed(1), &mut observer)
            .unwrap_err();

        match err {
            RefereeError::ForeignCard { seat, card } => {
                assert_eq!(seat, Seat::One);
                assert_eq!(card, stolen);
            }
            other => panic!("expected a foreign card, got {other:?}"),
        }
        assert!(observer.into_inner().is_empty());
    }

    /// Seat one leads first, so it answers the opening `L` with `reply`.
    fn leader_replying_with(reply: Vec<u8>) -> AgentLink {
        AgentLink::spawn_with(Seat::One, move |mut commands, mut responses| {
            protocol::read_hand(&mut commands)?;
            assert_eq!(protocol::read_command(&mut commands)?, Command::Lead);
            responses.write_all(&reply)?;
            Ok(AgentSummary {
                seat: Seat::One,
                cards_played: 0,
                cards_left: 16,
            })
        })
        .unwrap()
    }

    fn play_against_naive(one: AgentLink) -> (RefereeError, String) {
        let two = AgentLink::spawn_policy(Seat::Two, NaivePolicy).unwrap();
        let mut observer = ConsoleObserver::new(Vec::new());
        let err = Referee::new(one, two)
            .unwrap()
            .play(Deck::shuffled_with_seed(5), &mut observer)
            .unwrap_err();
        (err, String::from_utf8(observer.into_inner()).unwrap())
    }

    #[test]
    fn out_of_range_rank_aborts_the_game() {
        let (err, text) = play_against_naive(leader_replying_with(vec![2, 0, 0, 0, b'H']));
        assert!(matches!(
            err,
            RefereeError::Protocol {
                seat: Seat::One,
                source: ProtocolError::InvalidRank(2)
            }
        ));
        assert!(!text.contains("Final score"));
    }

    #[test]
    fn unknown_suit_byte_aborts_the_game() {
        let (err, text) = play_against_naive(leader_replying_with(vec![9, 0, 0, 0, b'Z']));
        assert!(matches!(
            err,
            RefereeError::Protocol {
                seat: Seat::One,
                source: ProtocolError::InvalidSuit(b'Z')
            }
        ));
        assert!(!text.contains("Final score"));
    }

    #[test]
    fn agent_that_exits_without_answering_aborts_the_game() {
        let (err, text) = play_against_naive(leader_replying_with(Vec::new()));
        assert!(matches!(
            err,
            RefereeError::Protocol {
                seat: Seat::One,
                source: ProtocolError::Closed
            }
        ));
        assert!(text.is_empty());
    }
}
