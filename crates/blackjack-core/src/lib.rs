pub mod belief;
pub mod env;
pub mod model;

pub use env::{Action, Blackjack, EnvError, Environment, Mode, State, TABLE_SPAN, Transition};
