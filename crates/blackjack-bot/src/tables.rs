//! Dense tables keyed by `(state, action)` or by state alone.
//!
//! All tables cover the full `TABLE_SPAN x TABLE_SPAN` grid laid out
//! `[player][dealer]`, so a state produced by the environment (or a
//! belief-adjusted one) indexes every table the same way.

use blackjack_core::env::{Action, State, TABLE_SPAN};
use rand::Rng;
use serde::{Deserialize, Serialize};

const CELLS: usize = TABLE_SPAN * TABLE_SPAN;

/// One value per `(state, action)` pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StateActionTable<T> {
    cells: Vec<[T; Action::COUNT]>,
}

/// Return estimates `Q[s, a]`.
pub type ActionValues = StateActionTable<f64>;
/// Eligibility traces `E[s, a]`. Same shape as [`ActionValues`].
pub type Traces = StateActionTable<f64>;
/// Visit counts `N[s, a]` used as incremental-mean denominators.
pub type VisitCounts = StateActionTable<u32>;

impl<T: Copy + Default> StateActionTable<T> {
    pub fn new() -> Self {
        Self {
            cells: vec![[T::default(); Action::COUNT]; CELLS],
        }
    }

    pub fn get(&self, state: State, action: Action) -> T {
        self.cells[state.index()][action.index()]
    }

    pub fn get_mut(&mut self, state: State, action: Action) -> &mut T {
        &mut self.cells[state.index()][action.index()]
    }

    pub fn row(&self, state: State) -> &[T; Action::COUNT] {
        &self.cells[state.index()]
    }

    /// Every `(state, action, value)` triple, in grid order.
    pub fn entries(&self) -> impl Iterator<Item = (State, Action, T)> + '_ {
        self.cells.iter().enumerate().flat_map(|(index, row)| {
            let state = State::from_index(index);
            Action::ALL
                .into_iter()
                .map(move |action| (state, action, row[action.index()]))
        })
    }

    pub fn clear(&mut self) {
        for row in &mut self.cells {
            *row = [T::default(); Action::COUNT];
        }
    }
}

impl<T: Copy + Default> Default for StateActionTable<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl StateActionTable<f64> {
    /// `self += factor * other`, cell by cell.
    pub fn add_scaled(&mut self, other: &StateActionTable<f64>, factor: f64) {
        for (row, other_row) in self.cells.iter_mut().zip(&other.cells) {
            for (value, weight) in row.iter_mut().zip(other_row) {
                *value += factor * weight;
            }
        }
    }

    pub fn scale(&mut self, factor: f64) {
        for row in &mut self.cells {
            for value in row.iter_mut() {
                *value *= factor;
            }
        }
    }

    /// Action with the largest value at `state`; ties go to the earlier
    /// action in [`Action::ALL`].
    pub fn best_action(&self, state: State) -> Action {
        let row = self.row(state);
        let mut best = Action::ALL[0];
        for action in Action::ALL.iter().copied().skip(1) {
            if row[action.index()] > row[best.index()] {
                best = action;
            }
        }
        best
    }

    pub fn best_value(&self, state: State) -> f64 {
        self.get(state, self.best_action(state))
    }

    /// Greedy policy read off the table.
    pub fn greedy_policy(&self) -> PolicyTable {
        let mut policy = PolicyTable::filled(Action::ALL[0]);
        for index in 0..CELLS {
            let state = State::from_index(index);
            policy.set(state, self.best_action(state));
        }
        policy
    }
}

/// Deterministic policy over the whole state grid.
///
/// `rows()[player][dealer]` is the dense form handed to strategy renderers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicyTable {
    grid: [[Action; TABLE_SPAN]; TABLE_SPAN],
}

impl PolicyTable {
    pub fn filled(action: Action) -> Self {
        Self {
            grid: [[action; TABLE_SPAN]; TABLE_SPAN],
        }
    }

    /// Each cell drawn uniformly from [`Action::ALL`].
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut policy = Self::filled(Action::ALL[0]);
        for row in policy.grid.iter_mut() {
            for cell in row.iter_mut() {
                *cell = Action::ALL[rng.gen_range(0..Action::COUNT)];
            }
        }
        policy
    }

    pub fn get(&self, state: State) -> Action {
        self.grid[state.player as usize][state.dealer as usize]
    }

    pub fn set(&mut self, state: State, action: Action) {
        self.grid[state.player as usize][state.dealer as usize] = action;
    }

    pub fn rows(&self) -> &[[Action; TABLE_SPAN]; TABLE_SPAN] {
        &self.grid
    }

    pub fn count(&self, action: Action) -> usize {
        self.grid
            .iter()
            .flat_map(|row| row.iter())
            .filter(|&&cell| cell == action)
            .count()
    }
}
