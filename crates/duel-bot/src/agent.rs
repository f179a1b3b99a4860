use crate::policy::{Policy, PolicyContext};
use duel_core::model::card::Card;
use duel_core::model::hand::Hand;
use duel_core::model::seat::Seat;
use duel_core::protocol::{Command, ProtocolError, read_command, read_hand, write_card};
use std::io::{Read, Write};
use tracing::{Level, event};

/// A player that owns its hand and answers one play request at a time.
pub struct Agent<P> {
    seat: Seat,
    hand: Hand,
    policy: P,
}

impl<P: Policy> Agent<P> {
    pub fn new(seat: Seat, hand: Hand, policy: P) -> Self {
        Self { seat, hand, policy }
    }

    pub fn cards_held(&self) -> usize {
        self.hand.len()
    }

    /// Picks a card, removes it from the hand and returns it. `led` is the
    /// opponent's card when following, `None` when leading.
    ///
    /// Panics if the hand is already empty.
    pub fn play_card(&mut self, led: Option<Card>) -> Card {
        if self.hand.is_empty() {
            panic!("{} was asked to play with an empty hand", self.seat);
        }
        let ctx = PolicyContext {
            seat: self.seat,
            hand: &self.hand,
            led,
        };
        let index = self.policy.choose_play(&ctx);
        let card = self.hand.take(index);
        event!(
            target: "duel_bot::agent",
            Level::TRACE,
            seat = %self.seat,
            card = %card,
            leading = led.is_none(),
            remaining = self.hand.len(),
            "played card"
        );
        card
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AgentSummary {
    pub seat: Seat,
    pub cards_played: usize,
    pub cards_left: usize,
}

/// Runs one agent over its command and response streams.
///
/// Reads the dealt hand, then answers `L` and `F` until `X` arrives. The
/// streams are dropped on return, which closes this side of both channels.
pub fn serve<P, R, W>(
    seat: Seat,
    policy: P,
    mut commands: R,
    mut responses: W,
) -> Result<AgentSummary, ProtocolError>
where
    P: Policy,
    R: Read,
    W: Write,
{
    let hand = Hand::from_deal(read_hand(&mut commands)?);
    event!(
        target: "duel_bot::agent",
        Level::DEBUG,
        seat = %seat,
        cards = hand.len(),
        "hand received"
    );
    let mut agent = Agent::new(seat, hand, policy);
    let mut cards_played = 0usize;

    loop {
        let card = match read_command(&mut commands)? {
            Command::Lead => agent.play_card(None),
            Command::Follow(led) => agent.play_card(Some(led)),
            Command::Terminate => break,
        };
        write_card(&mut responses, card)?;
        cards_played += 1;
    }

    event!(
        target: "duel_bot::agent",
        Level::DEBUG,
        seat = %seat,
        cards_played,
        "terminate received; agent exiting"
    );
    Ok(AgentSummary {
        seat,
        cards_played,
        cards_left: agent.cards_held(),
    })
}
