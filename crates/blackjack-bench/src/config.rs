use blackjack_bot::{LearnError, MonteCarloConfig, SarsaConfig};
use blackjack_core::env::Mode;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::Level;

const DEFAULT_EVALUATION_EPISODES: usize = 1_000;
const RUN_ID_ALLOWED: &str = "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789._-";

/// Root training configuration loaded from YAML.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct TrainingConfig {
    pub run_id: String,
    /// Seeds the single random source of the run. Drawn at random when absent.
    #[serde(default)]
    pub seed: Option<u64>,
    pub mode: Mode,
    pub learner: LearnerConfig,
    #[serde(default)]
    pub evaluation: EvaluationConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl TrainingConfig {
    /// Load configuration from a YAML file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let path_buf = path.to_path_buf();
        let file = File::open(path).map_err(|source| ConfigError::Read {
            source,
            path: path_buf.clone(),
        })?;
        let reader = BufReader::new(file);
        let mut cfg: TrainingConfig =
            serde_yaml::from_reader(reader).map_err(|source| ConfigError::Parse {
                source,
                path: path_buf.clone(),
            })?;
        cfg.validate().map_err(|source| ConfigError::Invalid {
            path: path_buf,
            source,
        })?;
        Ok(cfg)
    }

    /// Validate the configuration without performing I/O.
    pub fn validate(&mut self) -> Result<(), ValidationError> {
        validate_run_id(&self.run_id)?;
        self.learner.validate(self.mode)?;
        self.logging.normalize();
        Ok(())
    }
}

/// Learner selection with its hyperparameters.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LearnerConfig {
    Sarsa(SarsaConfig),
    MonteCarlo(MonteCarloConfig),
}

impl LearnerConfig {
    pub const fn name(&self) -> &'static str {
        match self {
            LearnerConfig::Sarsa(_) => "sarsa",
            LearnerConfig::MonteCarlo(_) => "monte_carlo",
        }
    }

    pub const fn episodes(&self) -> usize {
        match self {
            LearnerConfig::Sarsa(config) => config.episodes,
            LearnerConfig::MonteCarlo(config) => config.episodes,
        }
    }

    fn validate(&self, mode: Mode) -> Result<(), ValidationError> {
        let checked = match self {
            LearnerConfig::Sarsa(config) => config.validate(),
            LearnerConfig::MonteCarlo(config) => {
                if mode != Mode::Pomdp {
                    return Err(ValidationError::InvalidField {
                        field: "mode".to_string(),
                        message: format!(
                            "monte_carlo learns from revealed hidden cards and requires mode pomdp, not {mode}"
                        ),
                    });
                }
                config.validate()
            }
        };
        checked.map_err(|err| match err {
            LearnError::InvalidHyperparameter { name, .. } => ValidationError::InvalidField {
                field: format!("learner.{name}"),
                message: err.to_string(),
            },
            other => ValidationError::InvalidField {
                field: "learner".to_string(),
                message: other.to_string(),
            },
        })
    }
}

/// Greedy-policy evaluation after training.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq)]
pub struct EvaluationConfig {
    #[serde(default = "default_evaluation_episodes")]
    pub episodes: usize,
}

impl Default for EvaluationConfig {
    fn default() -> Self {
        Self {
            episodes: DEFAULT_EVALUATION_EPISODES,
        }
    }
}

fn default_evaluation_episodes() -> usize {
    DEFAULT_EVALUATION_EPISODES
}

/// Logging configuration defaults to disabled structured logs.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct LoggingConfig {
    #[serde(default)]
    pub enable_structured: bool,
    #[serde(default = "default_tracing_level")]
    pub tracing_level: String,
    /// Per-episode environment events.
    #[serde(default)]
    pub episode_details: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enable_structured: false,
            tracing_level: default_tracing_level(),
            episode_details: false,
        }
    }
}

impl LoggingConfig {
    fn normalize(&mut self) {
        if self.tracing_level.trim().is_empty() {
            self.tracing_level = default_tracing_level();
        }
    }

    pub fn level(&self) -> Option<Level> {
        match self.tracing_level.to_ascii_lowercase().as_str() {
            "trace" => Some(Level::TRACE),
            "debug" => Some(Level::DEBUG),
            "info" => Some(Level::INFO),
            "warn" | "warning" => Some(Level::WARN),
            "error" => Some(Level::ERROR),
            _ => None,
        }
    }
}

fn default_tracing_level() -> String {
    "info".to_string()
}

fn validate_run_id(run_id: &str) -> Result<(), ValidationError> {
    if run_id.trim().is_empty() {
        return Err(ValidationError::InvalidField {
            field: "run_id".to_string(),
            message: "run_id must not be empty".to_string(),
        });
    }

    if !run_id.chars().all(|c| RUN_ID_ALLOWED.contains(c)) {
        return Err(ValidationError::InvalidField {
            field: "run_id".to_string(),
            message: "run_id may only contain alphanumeric characters, '.', '_' or '-'".to_string(),
        });
    }

    Ok(())
}

/// Errors surfaced when loading configuration files.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path:?}: {source}")]
    Read {
        #[source]
        source: std::io::Error,
        path: PathBuf,
    },
    #[error("failed to parse config {path:?}: {source}")]
    Parse {
        #[source]
        source: serde_yaml::Error,
        path: PathBuf,
    },
    #[error("invalid configuration in {path:?}: {source}")]
    Invalid {
        path: PathBuf,
        source: ValidationError,
    },
}

impl ConfigError {
    pub fn path(&self) -> &Path {
        match self {
            ConfigError::Read { path, .. }
            | ConfigError::Parse { path, .. }
            | ConfigError::Invalid { path, .. } => path.as_path(),
        }
    }
}

/// Validation failures captured with contextual metadata.
#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    #[error("{field}: {message}")]
    InvalidField { field: String, message: String },
}
