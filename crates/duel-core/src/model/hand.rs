use crate::model::card::Card;
use crate::model::suit::Suit;

/// Cards held by one seat, kept in the order they were dealt.
#[derive(Debug, Clone, Default)]
pub struct Hand {
    cards: Vec<Card>,
}

impl Hand {
    pub fn new() -> Self {
        Self { cards: Vec::new() }
    }

    pub fn from_deal(cards: Vec<Card>) -> Self {
        Self { cards }
    }

    pub fn contains(&self, card: Card) -> bool {
        self.cards.contains(&card)
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn last_index(&self) -> Option<usize> {
        self.cards.len().checked_sub(1)
    }

    /// Position of the highest-ranked card of `suit`, if any is held.
    pub fn highest_of(&self, suit: Suit) -> Option<usize> {
        self.cards
            .iter()
            .enumerate()
            .filter(|(_, card)| card.suit == suit)
            .max_by_key(|(_, card)| card.rank)
            .map(|(index, _)| index)
    }

    /// Removes the card at `index`, shifting the rest down.
    ///
    /// Panics when `index` is out of range: asking for a card that is not
    /// there means the game was driven incorrectly.
    pub fn take(&mut self, index: usize) -> Card {
        assert!(
            index < self.cards.len(),
            "hand index {index} out of range for {} cards",
            self.cards.len()
        );
        self.cards.remove(index)
    }
}

#[cfg(test)]
mod tests {
    use super::Hand;
    use crate::model::card::Card;
    use crate::model::rank::Rank;
    use crate::model::suit::Suit;

    fn sample() -> Hand {
        Hand::from_deal(vec![
            Card::new(Rank::Ten, Suit::Hearts),
            Card::new(Rank::Seven, Suit::Clubs),
            Card::new(Rank::Ace, Suit::Hearts),
            Card::new(Rank::Jack, Suit::Spades),
        ])
    }

    #[test]
    fn keeps_dealt_order() {
        let hand = sample();
        assert_eq!(hand.cards()[0], Card::new(Rank::Ten, Suit::Hearts));
        assert_eq!(hand.cards()[3], Card::new(Rank::Jack, Suit::Spades));
    }

    #[test]
    fn highest_of_picks_top_rank_in_suit() {
        let hand = sample();
        assert_eq!(hand.highest_of(Suit::Hearts), Some(2));
        assert_eq!(hand.highest_of(Suit::Clubs), Some(1));
        assert_eq!(hand.highest_of(Suit::Diamonds), None);
    }

    #[test]
    fn take_preserves_order_of_remaining_cards() {
        let mut hand = sample();
        let taken = hand.take(1);
        assert_eq!(taken, Card::new(Rank::Seven, Suit::Clubs));
        assert_eq!(hand.len(), 3);
        assert!(!hand.contains(taken));
        assert_eq!(
            hand.cards(),
            &[
                Card::new(Rank::Ten, Suit::Hearts),
                Card::new(Rank::Ace, Suit::Hearts),
                Card::new(Rank::Jack, Suit::Spades),
            ]
        );
    }

    #[test]
    fn last_index_tracks_length() {
        let mut hand = sample();
        assert_eq!(hand.last_index(), Some(3));
        while !hand.is_empty() {
            hand.take(0);
        }
        assert_eq!(hand.last_index(), None);
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn take_from_empty_hand_panics() {
        let mut hand = Hand::new();
        hand.take(0);
    }
}
