mod belief;
mod greedy;
mod select;

pub use belief::BeliefAgent;
pub use greedy::GreedyAgent;
pub use select::{epsilon_greedy, greedy, random_action};

use blackjack_core::env::{Action, State};
use rand::Rng;

/// Unified interface for playing a learned table
pub trait Agent {
    /// Called once per episode with the unadjusted starting state.
    fn begin<R: Rng + ?Sized>(&mut self, start: State, rng: &mut R);

    /// Choose the player's action at `state`
    fn act(&mut self, state: State) -> Action;
}
