#![deny(warnings)]
pub mod game;
pub mod model;
pub mod protocol;

/// Number of cards each seat holds at the start of a game.
pub const HAND_SIZE: usize = 16;

/// Number of tricks in a complete game.
pub const TRICKS_PER_GAME: usize = HAND_SIZE;

pub struct AppInfo;

impl AppInfo {
    pub const fn name() -> &'static str {
        "duel"
    }

    pub const fn version() -> &'static str {
        env!("CARGO_PKG_VERSION")
    }
}

#[cfg(test)]
mod tests {
    use super::{AppInfo, HAND_SIZE, TRICKS_PER_GAME};
    use crate::model::deck::DECK_SIZE;

    #[test]
    fn exposes_static_metadata() {
        assert_eq!(AppInfo::name(), "duel");
        assert!(!AppInfo::version().is_empty());
    }

    #[test]
    fn two_hands_cover_the_deck() {
        assert_eq!(HAND_SIZE * 2, DECK_SIZE);
        assert_eq!(TRICKS_PER_GAME, HAND_SIZE);
    }
}
