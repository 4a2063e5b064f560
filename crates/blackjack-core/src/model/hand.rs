use crate::model::card::Card;

/// Total at which an additional soft ace is demoted to one.
const SOFT_ACE_LIMIT: u8 = 21;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Hand {
    cards: Vec<Card>,
}

impl Hand {
    pub fn new() -> Self {
        Self { cards: Vec::new() }
    }

    pub fn with_cards(cards: Vec<Card>) -> Self {
        Self { cards }
    }

    pub fn add(&mut self, card: Card) {
        self.cards.push(card);
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Card> {
        self.cards.iter()
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn first(&self) -> Option<Card> {
        self.cards.first().copied()
    }

    pub fn second(&self) -> Option<Card> {
        self.cards.get(1).copied()
    }

    /// Hand total under the ace rule.
    ///
    /// Non-aces are summed first. Each ace then adds eleven unless that would
    /// bring the running total to 21 or more while the hand holds at least two
    /// cards, in which case it adds one. Aces are resolved one after another,
    /// so every ace sees the total produced by the ones before it.
    pub fn total(&self) -> u8 {
        let mut total: u8 = self
            .cards
            .iter()
            .filter(|card| !card.is_ace())
            .map(|card| card.points())
            .sum();
        let aces = self.cards.iter().filter(|card| card.is_ace()).count();
        for _ in 0..aces {
            if total + 11 >= SOFT_ACE_LIMIT && self.cards.len() >= 2 {
                total += 1;
            } else {
                total += 11;
            }
        }
        total
    }

    pub fn is_bust(&self) -> bool {
        self.total() > 21
    }
}
