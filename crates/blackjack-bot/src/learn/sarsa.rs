use super::{LearnError, check_unit_interval, progress_interval};
use crate::policy::{epsilon_greedy, random_action};
use crate::tables::{ActionValues, Traces};
use blackjack_core::env::{Environment, Mode};
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{Level, event};

/// Hyperparameters for SARSA(λ).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SarsaConfig {
    /// Trace decay.
    pub lambda: f64,
    /// Step size.
    #[serde(default = "default_alpha")]
    pub alpha: f64,
    #[serde(default = "default_gamma")]
    pub gamma: f64,
    /// Exploration rate for every action after the first of an episode.
    #[serde(default = "default_epsilon")]
    pub epsilon: f64,
    #[serde(default = "default_episodes")]
    pub episodes: usize,
}

fn default_alpha() -> f64 {
    0.01
}

fn default_gamma() -> f64 {
    1.0
}

fn default_epsilon() -> f64 {
    0.05
}

fn default_episodes() -> usize {
    1_000
}

impl Default for SarsaConfig {
    fn default() -> Self {
        Self {
            lambda: 0.5,
            alpha: default_alpha(),
            gamma: default_gamma(),
            epsilon: default_epsilon(),
            episodes: default_episodes(),
        }
    }
}

impl SarsaConfig {
    pub fn validate(&self) -> Result<(), LearnError> {
        if !(self.alpha > 0.0 && self.alpha <= 1.0) {
            return Err(LearnError::InvalidHyperparameter {
                name: "alpha",
                range: "(0, 1]",
                value: self.alpha,
            });
        }
        check_unit_interval("gamma", self.gamma)?;
        check_unit_interval("lambda", self.lambda)?;
        check_unit_interval("epsilon", self.epsilon)?;
        Ok(())
    }
}

/// On-policy TD control with accumulating eligibility traces.
#[derive(Debug, Clone, Copy)]
pub struct SarsaLearner {
    config: SarsaConfig,
}

impl SarsaLearner {
    pub const fn new(config: SarsaConfig) -> Self {
        Self { config }
    }

    pub const fn config(&self) -> SarsaConfig {
        self.config
    }

    /// Runs `config.episodes` episodes starting from `q` and returns the
    /// updated table. A fresh environment is built with `factory(mode)` for
    /// every episode.
    pub fn train<E, F, R>(
        &self,
        mut q: ActionValues,
        mode: Mode,
        mut factory: F,
        rng: &mut R,
    ) -> Result<ActionValues, LearnError>
    where
        E: Environment,
        F: FnMut(Mode) -> E,
        R: Rng + ?Sized,
    {
        self.config.validate()?;
        let mut traces = Traces::new();
        let interval = progress_interval(self.config.episodes);
        let mut window_reward = 0.0;

        for episode in 0..self.config.episodes {
            let mut env = factory(mode);
            window_reward += self.run_episode(&mut q, &mut traces, &mut env, rng)?;

            if (episode + 1) % interval == 0 {
                event!(
                    target: "blackjack_bot::sarsa",
                    Level::DEBUG,
                    episode = episode + 1,
                    mode = %mode,
                    mean_reward = window_reward / interval as f64,
                    "sarsa progress"
                );
                window_reward = 0.0;
            }
        }

        event!(
            target: "blackjack_bot::sarsa",
            Level::INFO,
            episodes = self.config.episodes,
            mode = %mode,
            lambda = self.config.lambda,
            alpha = self.config.alpha,
            "sarsa training complete"
        );
        Ok(q)
    }

    /// Plays one episode, updating `q` after every step. Returns the
    /// undiscounted episode reward.
    ///
    /// The configuration is checked before the environment is touched.
    pub fn run_episode<E, R>(
        &self,
        q: &mut ActionValues,
        traces: &mut Traces,
        env: &mut E,
        rng: &mut R,
    ) -> Result<f64, LearnError>
    where
        E: Environment,
        R: Rng + ?Sized,
    {
        self.config.validate()?;
        let SarsaConfig {
            lambda,
            alpha,
            gamma,
            epsilon,
            ..
        } = self.config;

        traces.clear();
        let mut state = Some(env.start(rng)?);
        // only the opening action skips the exploration policy
        let mut action = random_action(rng);
        let mut total = 0.0;

        while let Some(current) = state {
            let step = env.step(action)?;
            total += step.reward;

            // the terminal marker has no table entry; its value is zero
            let (next_value, next_action) = match step.next {
                Some(next) => {
                    let chosen = epsilon_greedy(next, q, epsilon, rng);
                    (q.get(next, chosen), chosen)
                }
                None => (0.0, action),
            };

            let delta = step.reward + gamma * next_value - q.get(current, action);
            *traces.get_mut(current, action) += 1.0;
            q.add_scaled(traces, alpha * delta);
            traces.scale(gamma * lambda);

            state = step.next;
            action = next_action;
        }

        Ok(total)
    }
}
