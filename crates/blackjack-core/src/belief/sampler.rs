//! Turning belief rows into sampling distributions and point estimates.

use super::table::{BeliefTable, HIDDEN_DOMAIN};
use crate::env::State;
use rand::Rng;
use rand::distributions::{Distribution, WeightedIndex};
use serde::{Deserialize, Serialize};

/// How a hidden-value estimate is read off a belief row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BeliefMode {
    /// Draw from the softmax of the row.
    Sample,
    /// Take the first slot holding the row's maximum.
    Max,
}

/// `exp(x_i) / sum_j exp(x_j)`, shifted by the maximum for stability.
pub fn softmax(values: &[f64]) -> Vec<f64> {
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let exps: Vec<f64> = values.iter().map(|value| (value - max).exp()).collect();
    let total: f64 = exps.iter().sum();
    exps.into_iter().map(|value| value / total).collect()
}

pub(crate) fn argmax(row: &[f64; HIDDEN_DOMAIN]) -> usize {
    let mut best = 0;
    for (slot, value) in row.iter().enumerate().skip(1) {
        if *value > row[best] {
            best = slot;
        }
    }
    best
}

impl BeliefTable {
    /// Softmax of the belief row for `state`.
    pub fn distribution(&self, state: State) -> Vec<f64> {
        softmax(self.row(state))
    }

    /// Estimates the hidden value for `state` under `mode`.
    pub fn estimate<R: Rng + ?Sized>(&self, state: State, mode: BeliefMode, rng: &mut R) -> u8 {
        match mode {
            BeliefMode::Max => argmax(self.row(state)) as u8,
            BeliefMode::Sample => {
                let weights = self.distribution(state);
                // WeightedIndex only rejects empty, negative, non-finite or
                // all-zero weights. Rows hold values in [0, 1], so the
                // softmax is strictly positive and the argmax arm never runs.
                match WeightedIndex::new(&weights) {
                    Ok(index) => index.sample(rng) as u8,
                    Err(_) => argmax(self.row(state)) as u8,
                }
            }
        }
    }
}
