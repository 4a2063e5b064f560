pub mod config;
pub mod logging;
pub mod runner;

pub use config::{ConfigError, LearnerConfig, TrainingConfig, ValidationError};
pub use runner::{LearnedTables, RunError, RunReport, TrainingRunner};
