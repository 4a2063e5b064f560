use crate::env::{State, TABLE_SPAN};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Number of values the hidden card can take, indexed by hard card value.
///
/// Slot 0 exists so that indices equal values; no card ever reports it.
pub const HIDDEN_DOMAIN: usize = 11;

/// Probability rows over the hidden card, one per initial state.
///
/// Rows start at zero and are never reset. Only the observed slot moves on an
/// update, so a row's sum can drift above one; [`BeliefTable::distribution`]
/// normalises through a softmax before anything is sampled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BeliefTable {
    rows: Vec<[f64; HIDDEN_DOMAIN]>,
    counts: Vec<u32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("hidden value {value} outside the belief domain (expected < {max})", max = HIDDEN_DOMAIN)]
pub struct BeliefError {
    pub value: u8,
}

impl BeliefTable {
    pub fn new() -> Self {
        Self {
            rows: vec![[0.0; HIDDEN_DOMAIN]; TABLE_SPAN * TABLE_SPAN],
            counts: vec![0; TABLE_SPAN * TABLE_SPAN],
        }
    }

    pub fn row(&self, state: State) -> &[f64; HIDDEN_DOMAIN] {
        &self.rows[state.index()]
    }

    /// Number of episodes that started in `state`.
    pub fn count(&self, state: State) -> u32 {
        self.counts[state.index()]
    }

    pub fn counts(&self) -> &[u32] {
        &self.counts
    }

    pub fn total_observations(&self) -> u64 {
        self.counts.iter().map(|&count| u64::from(count)).sum()
    }

    /// Records that an episode starting in `state` revealed `hidden`.
    ///
    /// `P[s][h] += (1 / n) * (1 - P[s][h])` where `n` counts episodes from
    /// `s`, including this one. Other slots are left as they are.
    pub fn observe(&mut self, state: State, hidden: u8) -> Result<(), BeliefError> {
        let slot = hidden as usize;
        if slot >= HIDDEN_DOMAIN {
            return Err(BeliefError { value: hidden });
        }
        let index = state.index();
        self.counts[index] += 1;
        let step = 1.0 / f64::from(self.counts[index]);
        let cell = &mut self.rows[index][slot];
        *cell += step * (1.0 - *cell);
        Ok(())
    }
}

impl Default for BeliefTable {
    fn default() -> Self {
        Self::new()
    }
}
