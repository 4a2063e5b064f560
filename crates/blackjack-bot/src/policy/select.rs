use crate::tables::ActionValues;
use blackjack_core::env::{Action, State};
use rand::Rng;

/// Uniform draw over [`Action::ALL`].
pub fn random_action<R: Rng + ?Sized>(rng: &mut R) -> Action {
    Action::ALL[rng.gen_range(0..Action::COUNT)]
}

/// Highest-valued action at `state`, first one on ties.
pub fn greedy(state: State, q: &ActionValues) -> Action {
    q.best_action(state)
}

/// Explores with probability `epsilon`, otherwise exploits `q`.
///
/// `epsilon` must lie in `[0, 1]`.
pub fn epsilon_greedy<R: Rng + ?Sized>(
    state: State,
    q: &ActionValues,
    epsilon: f64,
    rng: &mut R,
) -> Action {
    if rng.gen_bool(epsilon) {
        random_action(rng)
    } else {
        greedy(state, q)
    }
}
