use crate::model::rank::Rank;
use crate::model::suit::Suit;
use core::fmt;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    pub rank: Rank,
    pub suit: Suit,
}

impl Card {
    pub const fn new(rank: Rank, suit: Suit) -> Self {
        Self { rank, suit }
    }

    pub const fn is_ace(self) -> bool {
        self.rank.is_ace()
    }

    /// Value of the card on its own, as the dealer's face-up card is read.
    pub const fn points(self) -> u8 {
        self.rank.points()
    }

    pub const fn hard_points(self) -> u8 {
        self.rank.hard_points()
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.rank, self.suit)
    }
}

#[cfg(test)]
mod tests {
    use super::{Card, Rank, Suit};

    #[test]
    fn king_counts_as_ten() {
        let card = Card::new(Rank::King, Suit::Spades);
        assert_eq!(card.points(), 10);
        assert!(!card.is_ace());
    }

    #[test]
    fn display_concatenates_rank_and_suit() {
        assert_eq!(Card::new(Rank::Ace, Suit::Hearts).to_string(), "AH");
        assert_eq!(Card::new(Rank::Ten, Suit::Clubs).to_string(), "10C");
    }
}
