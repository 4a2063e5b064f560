//! Episode simulation for the learners.
//!
//! - `mode`: observability regimes and their parsing.
//! - `state`: observable state, actions and the table span.
//! - `blackjack`: the game itself.

mod blackjack;
mod mode;
mod state;

pub use blackjack::{Blackjack, DEALER_STANDS_AT};
pub use mode::{Mode, ModeParseError};
pub use state::{Action, State, TABLE_SPAN};

use rand::Rng;
use thiserror::Error;

/// Result of one player action.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transition {
    /// `None` once the episode is over, whatever the cause.
    pub next: Option<State>,
    pub reward: f64,
    /// Hard value of the dealer's second card, present only on the terminal
    /// transition of a [`Mode::Pomdp`] episode.
    pub hidden: Option<u8>,
}

impl Transition {
    pub const fn is_terminal(&self) -> bool {
        self.next.is_none()
    }
}

/// An episodic game the learners can drive one player action at a time.
pub trait Environment {
    /// Begins a new episode and returns the first observable state.
    fn start<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<State, EnvError>;

    /// Applies `action` for the player.
    fn step(&mut self, action: Action) -> Result<Transition, EnvError>;
}

/// Invariant violations surfaced by an environment. None are recoverable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum EnvError {
    #[error("deck exhausted before the episode terminated")]
    DeckExhausted,
    #[error("step called before the episode started")]
    NotStarted,
    #[error("step called after the episode terminated")]
    EpisodeFinished,
}
