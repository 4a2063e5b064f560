//! Learners that drive [`blackjack_core::env::Environment`] episodes.
//!
//! - `sarsa`: on-policy TD control with accumulating eligibility traces.
//! - `monte_carlo`: Monte-Carlo control with a belief over the dealer's
//!   hidden card.

pub mod monte_carlo;
pub mod sarsa;

pub use monte_carlo::{
    Episode, MonteCarloConfig, MonteCarloController, MonteCarloTables, VisitRule,
    generate_episode,
};
pub use sarsa::{SarsaConfig, SarsaLearner};

use blackjack_core::belief::BeliefError;
use blackjack_core::env::{EnvError, State};
use thiserror::Error;

/// Errors surfaced while training. None of them are retried.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LearnError {
    #[error("environment invariant violated: {0}")]
    Env(#[from] EnvError),
    #[error("belief update failed: {0}")]
    Belief(#[from] BeliefError),
    #[error("episode starting at {start} ended without revealing the hidden card")]
    MissingHiddenOutcome { start: State },
    #[error("{name} must lie in {range}, got {value}")]
    InvalidHyperparameter {
        name: &'static str,
        range: &'static str,
        value: f64,
    },
}

pub(crate) fn check_unit_interval(name: &'static str, value: f64) -> Result<(), LearnError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(LearnError::InvalidHyperparameter {
            name,
            range: "[0, 1]",
            value,
        })
    }
}

/// Episodes between progress events.
pub(crate) fn progress_interval(episodes: usize) -> usize {
    (episodes / 10).max(1)
}
