use super::{Action, EnvError, Environment, Mode, State, Transition};
use crate::model::deck::Deck;
use crate::model::hand::Hand;
use rand::Rng;
use tracing::{Level, event};

/// The dealer keeps drawing while its total is below this.
pub const DEALER_STANDS_AT: u8 = 17;

/// Which part of the dealer's hand goes into the observable state. Chosen once
/// from the [`Mode`] at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DealerView {
    Total,
    FirstCard,
}

impl DealerView {
    const fn for_mode(mode: Mode) -> Self {
        match mode {
            Mode::Full => DealerView::Total,
            Mode::Hidden | Mode::Pomdp => DealerView::FirstCard,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Idle,
    Playing,
    Finished,
}

/// Single-deck blackjack against a dealer that stands on 17.
///
/// The player may hit or stick. Once the player sticks the dealer plays out
/// automatically and the episode ends. Court cards count ten; there are no
/// splits, doubles or natural payouts.
#[derive(Debug, Clone)]
pub struct Blackjack {
    mode: Mode,
    view: DealerView,
    verbose: bool,
    deck: Deck,
    player: Hand,
    dealer: Hand,
    phase: Phase,
}

impl Blackjack {
    pub fn new(mode: Mode) -> Self {
        Self::with_verbosity(mode, false)
    }

    pub fn with_verbosity(mode: Mode, verbose: bool) -> Self {
        let deck = Deck::standard();
        if verbose {
            event!(
                target: "blackjack_core::env",
                Level::DEBUG,
                mode = %mode,
                cards = deck.len(),
                "initialised blackjack game"
            );
        }
        Self {
            mode,
            view: DealerView::for_mode(mode),
            verbose,
            deck,
            player: Hand::new(),
            dealer: Hand::new(),
            phase: Phase::Idle,
        }
    }

    /// Starts an episode from a pre-arranged deck instead of a shuffled one.
    ///
    /// Cards are dealt player, player, dealer, dealer, then drawn in order.
    pub fn start_with_deck(&mut self, deck: Deck) -> Result<State, EnvError> {
        self.deck = deck;
        self.player = Hand::new();
        self.dealer = Hand::new();
        for _ in 0..2 {
            let card = self.draw()?;
            self.player.add(card);
        }
        for _ in 0..2 {
            let card = self.draw()?;
            self.dealer.add(card);
        }
        self.phase = Phase::Playing;
        Ok(self.observe())
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn player_hand(&self) -> &Hand {
        &self.player
    }

    pub fn dealer_hand(&self) -> &Hand {
        &self.dealer
    }

    pub fn cards_remaining(&self) -> usize {
        self.deck.len()
    }

    pub fn is_finished(&self) -> bool {
        self.phase == Phase::Finished
    }

    /// Observable state for the current hands. Pure in the hands and the mode.
    pub fn observe(&self) -> State {
        let dealer = match self.view {
            DealerView::Total => self.dealer.total(),
            DealerView::FirstCard => self.dealer.first().map_or(0, |card| card.points()),
        };
        State::new(self.player.total(), dealer)
    }

    fn draw(&mut self) -> Result<crate::model::card::Card, EnvError> {
        self.deck.draw().ok_or(EnvError::DeckExhausted)
    }

    fn hit(&mut self) -> Result<Transition, EnvError> {
        let card = self.draw()?;
        self.player.add(card);
        if self.player.is_bust() {
            return Ok(self.finish(-1.0));
        }
        Ok(Transition {
            next: Some(self.observe()),
            reward: 0.0,
            hidden: None,
        })
    }

    fn stick(&mut self) -> Result<Transition, EnvError> {
        while self.dealer.total() < DEALER_STANDS_AT {
            let card = self.draw()?;
            self.dealer.add(card);
        }
        let player = self.player.total();
        let dealer = self.dealer.total();
        let reward = if dealer > 21 || player > dealer {
            1.0
        } else {
            -1.0
        };
        Ok(self.finish(reward))
    }

    fn finish(&mut self, reward: f64) -> Transition {
        self.phase = Phase::Finished;
        let hidden = if self.mode.reveals_hidden_card() {
            self.dealer.second().map(|card| card.hard_points())
        } else {
            None
        };
        if self.verbose {
            event!(
                target: "blackjack_core::env",
                Level::DEBUG,
                player = self.player.total(),
                dealer = self.dealer.total(),
                reward,
                cards_remaining = self.deck.len(),
                "episode finished"
            );
        }
        Transition {
            next: None,
            reward,
            hidden,
        }
    }
}

impl Environment for Blackjack {
    fn start<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<State, EnvError> {
        self.start_with_deck(Deck::shuffled(rng))
    }

    fn step(&mut self, action: Action) -> Result<Transition, EnvError> {
        match self.phase {
            Phase::Idle => Err(EnvError::NotStarted),
            Phase::Finished => Err(EnvError::EpisodeFinished),
            Phase::Playing => match action {
                Action::Hit => self.hit(),
                Action::Stick => self.stick(),
            },
        }
    }
}
