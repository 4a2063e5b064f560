//! Belief tracking for the dealer's concealed second card.
//!
//! - `table`: per-state probability rows and their incremental update.
//! - `sampler`: softmax normalisation and hidden-value estimation.

mod sampler;
mod table;

pub use sampler::{BeliefMode, softmax};
pub use table::{BeliefError, BeliefTable, HIDDEN_DOMAIN};
