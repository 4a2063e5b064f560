use super::Agent;
use crate::tables::ActionValues;
use blackjack_core::env::{Action, State};
use rand::Rng;

/// Plays the argmax of a Q-table with no exploration.
#[derive(Debug, Clone, Copy)]
pub struct GreedyAgent<'a> {
    q: &'a ActionValues,
}

impl<'a> GreedyAgent<'a> {
    pub fn new(q: &'a ActionValues) -> Self {
        Self { q }
    }
}

impl Agent for GreedyAgent<'_> {
    fn begin<R: Rng + ?Sized>(&mut self, _start: State, _rng: &mut R) {}

    fn act(&mut self, state: State) -> Action {
        self.q.best_action(state)
    }
}
