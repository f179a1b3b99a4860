use crate::HAND_SIZE;
use crate::model::card::Card;
use crate::model::rank::Rank;
use crate::model::suit::Suit;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use std::collections::HashSet;

pub const DECK_SIZE: usize = 32;

#[derive(Debug, Clone)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    /// All 32 cards, suit-major and rank-ascending.
    pub fn standard() -> Self {
        let mut cards = Vec::with_capacity(DECK_SIZE);
        for suit in Suit::ALL.iter().copied() {
            for rank in Rank::ORDERED.iter().copied() {
                cards.push(Card::new(rank, suit));
            }
        }
        Self { cards }
    }

    pub fn shuffled<R: rand::Rng + ?Sized>(rng: &mut R) -> Self {
        let mut deck = Self::standard();
        deck.shuffle_in_place(rng);
        deck
    }

    pub fn shuffled_with_seed(seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        Self::shuffled(&mut rng)
    }

    /// Accepts a fixed ordering, provided it is a permutation of the standard deck.
    pub fn from_order(cards: Vec<Card>) -> Option<Self> {
        if cards.len() != DECK_SIZE {
            return None;
        }
        let distinct: HashSet<Card> = cards.iter().copied().collect();
        if distinct.len() != DECK_SIZE {
            return None;
        }
        Some(Self { cards })
    }

    pub fn shuffle_in_place<R: rand::Rng + ?Sized>(&mut self, rng: &mut R) {
        self.cards.shuffle(rng);
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Splits the deck into two contiguous hands. The deck is gone afterwards.
    pub fn deal(self) -> [Vec<Card>; 2] {
        let mut first = self.cards;
        let second = first.split_off(HAND_SIZE);
        [first, second]
    }
}
