use super::Agent;
use crate::tables::PolicyTable;
use blackjack_core::belief::{BeliefMode, BeliefTable};
use blackjack_core::env::{Action, State};
use rand::Rng;

/// Follows a policy after folding an estimate of the dealer's hidden card
/// into every observed state.
///
/// The estimate is drawn once per episode from the belief row of the
/// unadjusted starting state and held fixed until the next `begin`.
#[derive(Debug, Clone, Copy)]
pub struct BeliefAgent<'a> {
    policy: &'a PolicyTable,
    belief: &'a BeliefTable,
    mode: BeliefMode,
    estimate: u8,
}

impl<'a> BeliefAgent<'a> {
    pub fn new(policy: &'a PolicyTable, belief: &'a BeliefTable, mode: BeliefMode) -> Self {
        Self {
            policy,
            belief,
            mode,
            estimate: 0,
        }
    }

    pub fn estimate(&self) -> u8 {
        self.estimate
    }

    /// State used as the policy key: dealer value plus the current estimate.
    pub fn adjust(&self, state: State) -> State {
        state.with_dealer_offset(self.estimate)
    }
}

impl Agent for BeliefAgent<'_> {
    fn begin<R: Rng + ?Sized>(&mut self, start: State, rng: &mut R) {
        self.estimate = self.belief.estimate(start, self.mode, rng);
    }

    fn act(&mut self, state: State) -> Action {
        self.policy.get(self.adjust(state))
    }
}
