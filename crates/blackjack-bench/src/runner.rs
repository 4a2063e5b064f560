use crate::config::{LearnerConfig, TrainingConfig};
use blackjack_bot::{
    ActionValues, BeliefAgent, EvaluationSummary, GreedyAgent, LearnError, MonteCarloController,
    MonteCarloTables, PolicyTable, SarsaLearner, evaluate,
};
use blackjack_core::belief::BeliefMode;
use blackjack_core::env::{Blackjack, Mode};
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::Serialize;
use std::time::Instant;
use thiserror::Error;
use tracing::{Level, event};

/// Tables produced by a run, by learner.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LearnedTables {
    Sarsa { q: ActionValues },
    MonteCarlo(MonteCarloTables),
}

impl LearnedTables {
    /// Greedy policy over the full state grid.
    pub fn policy(&self) -> PolicyTable {
        match self {
            LearnedTables::Sarsa { q } => q.greedy_policy(),
            LearnedTables::MonteCarlo(tables) => tables.policy.clone(),
        }
    }
}

/// Summary of one training run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunReport {
    pub run_id: String,
    pub seed: u64,
    pub learner: &'static str,
    pub mode: Mode,
    pub episodes: usize,
    /// Hidden-card estimate used while evaluating a belief policy.
    pub estimate: Option<BeliefMode>,
    pub evaluation: EvaluationSummary,
    pub policy: PolicyTable,
    #[serde(skip)]
    pub tables: LearnedTables,
}

impl RunReport {
    /// One-line JSON form of the report without the raw tables.
    pub fn to_json_line(&self) -> Result<String, RunError> {
        serde_json::to_string(self).map_err(|source| RunError::Serialize { source })
    }
}

#[derive(Debug, Error)]
pub enum RunError {
    #[error("training failed: {0}")]
    Learn(#[from] LearnError),
    #[error("failed to serialize report: {source}")]
    Serialize {
        #[source]
        source: serde_json::Error,
    },
}

/// Trains and evaluates the configured learner from a single seeded source.
pub struct TrainingRunner {
    config: TrainingConfig,
}

impl TrainingRunner {
    pub fn new(config: TrainingConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &TrainingConfig {
        &self.config
    }

    pub fn run(&self) -> Result<RunReport, RunError> {
        let seed = self.config.seed.unwrap_or_else(rand::random);
        let mut rng = StdRng::seed_from_u64(seed);
        let mode = self.config.mode;
        let verbose = self.config.logging.episode_details;
        let factory = |mode: Mode| Blackjack::with_verbosity(mode, verbose);
        let eval_episodes = self.config.evaluation.episodes;
        let started = Instant::now();

        let (tables, estimate, evaluation) = match self.config.learner {
            LearnerConfig::Sarsa(config) => {
                let q = SarsaLearner::new(config).train(ActionValues::new(), mode, factory, &mut rng)?;
                let mut agent = GreedyAgent::new(&q);
                let evaluation = evaluate(&mut agent, mode, factory, eval_episodes, &mut rng)?;
                (LearnedTables::Sarsa { q }, None, evaluation)
            }
            LearnerConfig::MonteCarlo(config) => {
                let initial = MonteCarloTables::new(&mut rng);
                let tables = MonteCarloController::new(config).train(initial, factory, &mut rng)?;
                let mut agent = BeliefAgent::new(&tables.policy, &tables.belief, config.belief);
                let evaluation = evaluate(&mut agent, mode, factory, eval_episodes, &mut rng)?;
                (LearnedTables::MonteCarlo(tables), Some(config.belief), evaluation)
            }
        };

        event!(
            target: "blackjack_bench::runner",
            Level::INFO,
            run_id = %self.config.run_id,
            seed,
            learner = self.config.learner.name(),
            mode = %mode,
            episodes = self.config.learner.episodes(),
            eval_episodes,
            estimate = ?estimate,
            mean_reward = evaluation.mean_reward,
            win_rate = evaluation.win_rate(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "run complete"
        );

        Ok(RunReport {
            run_id: self.config.run_id.clone(),
            seed,
            learner: self.config.learner.name(),
            mode,
            episodes: self.config.learner.episodes(),
            estimate,
            evaluation,
            policy: tables.policy(),
            tables,
        })
    }
}
