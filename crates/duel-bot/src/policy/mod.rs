mod naive;

pub use naive::NaivePolicy;

use duel_core::model::card::Card;
use duel_core::model::hand::Hand;
use duel_core::model::seat::Seat;

/// Context provided to policies for decision-making
pub struct PolicyContext<'a> {
    pub seat: Seat,
    pub hand: &'a Hand,
    /// Card the opponent led, or `None` when this seat leads.
    pub led: Option<Card>,
}

/// Card selection strategy for one seat.
pub trait Policy: Send {
    /// Index into `ctx.hand` of the card to play. Never called with an empty hand.
    fn choose_play(&mut self, ctx: &PolicyContext) -> usize;
}
