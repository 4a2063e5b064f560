//! Monte-Carlo control for the partially observed game.
//!
//! Each episode starts by estimating the dealer's concealed card from the
//! belief row of the starting state. The estimate is added to the dealer
//! component of every state the policy sees, so the policy and Q-table are
//! keyed by belief-adjusted states. When the episode ends the environment
//! reveals the true card and the belief row of the unadjusted start state is
//! moved towards it.

use super::{LearnError, check_unit_interval, progress_interval};
use crate::policy::{Agent, BeliefAgent};
use crate::tables::{ActionValues, PolicyTable, VisitCounts};
use blackjack_core::belief::{BeliefMode, BeliefTable};
use blackjack_core::env::{Action, Environment, Mode, State};
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{Level, event};

/// Which occurrences of a pair inside one episode update its estimate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VisitRule {
    /// Only the earliest occurrence of each `(state, action)` pair.
    #[default]
    First,
    /// Every occurrence.
    Every,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MonteCarloConfig {
    #[serde(default = "default_gamma")]
    pub gamma: f64,
    #[serde(default = "default_episodes")]
    pub episodes: usize,
    #[serde(default = "default_belief")]
    pub belief: BeliefMode,
    #[serde(default)]
    pub visits: VisitRule,
}

fn default_gamma() -> f64 {
    1.0
}

fn default_episodes() -> usize {
    1_000
}

fn default_belief() -> BeliefMode {
    BeliefMode::Sample
}

impl Default for MonteCarloConfig {
    fn default() -> Self {
        Self {
            gamma: default_gamma(),
            episodes: default_episodes(),
            belief: default_belief(),
            visits: VisitRule::default(),
        }
    }
}

impl MonteCarloConfig {
    pub fn validate(&self) -> Result<(), LearnError> {
        check_unit_interval("gamma", self.gamma)
    }
}

/// Everything the controller learns. Owned by the caller between runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonteCarloTables {
    pub policy: PolicyTable,
    pub q: ActionValues,
    pub visits: VisitCounts,
    /// Belief rows plus the per-start-state episode counts.
    pub belief: BeliefTable,
}

impl MonteCarloTables {
    /// Random policy, zeroed estimates and an empty belief.
    pub fn new<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::with_policy(PolicyTable::random(rng))
    }

    pub fn with_policy(policy: PolicyTable) -> Self {
        Self {
            policy,
            q: ActionValues::new(),
            visits: VisitCounts::new(),
            belief: BeliefTable::new(),
        }
    }
}

/// One generated episode.
#[derive(Debug, Clone, PartialEq)]
pub struct Episode {
    /// Unadjusted starting state; keys the belief update.
    pub start: State,
    /// Hidden-card estimate used for the whole episode.
    pub estimate: u8,
    /// Belief-adjusted states with the action the policy took there.
    pub steps: Vec<(State, Action)>,
    pub rewards: Vec<f64>,
    /// Revealed at termination; `None` unless the environment runs in
    /// [`Mode::Pomdp`].
    pub hidden: Option<u8>,
}

impl Episode {
    pub fn total_reward(&self) -> f64 {
        self.rewards.iter().sum()
    }
}

/// Plays one episode following `policy` on belief-adjusted states.
pub fn generate_episode<E, R>(
    env: &mut E,
    policy: &PolicyTable,
    belief: &BeliefTable,
    mode: BeliefMode,
    rng: &mut R,
) -> Result<Episode, LearnError>
where
    E: Environment,
    R: Rng + ?Sized,
{
    let start = env.start(rng)?;
    let mut agent = BeliefAgent::new(policy, belief, mode);
    agent.begin(start, rng);

    let mut steps = Vec::new();
    let mut rewards = Vec::new();
    let mut hidden = None;
    let mut state = Some(start);
    while let Some(current) = state {
        let action = agent.act(current);
        steps.push((agent.adjust(current), action));
        let step = env.step(action)?;
        rewards.push(step.reward);
        hidden = step.hidden;
        state = step.next;
    }

    Ok(Episode {
        start,
        estimate: agent.estimate(),
        steps,
        rewards,
        hidden,
    })
}

/// Jointly learns a deterministic policy and a belief over the dealer's
/// hidden card.
#[derive(Debug, Clone, Copy)]
pub struct MonteCarloController {
    config: MonteCarloConfig,
}

impl MonteCarloController {
    pub const fn new(config: MonteCarloConfig) -> Self {
        Self { config }
    }

    pub const fn config(&self) -> MonteCarloConfig {
        self.config
    }

    /// Runs `config.episodes` episodes in [`Mode::Pomdp`] and returns the
    /// updated tables.
    pub fn train<E, F, R>(
        &self,
        mut tables: MonteCarloTables,
        mut factory: F,
        rng: &mut R,
    ) -> Result<MonteCarloTables, LearnError>
    where
        E: Environment,
        F: FnMut(Mode) -> E,
        R: Rng + ?Sized,
    {
        self.config.validate()?;
        let interval = progress_interval(self.config.episodes);
        let mut window_reward = 0.0;

        for index in 0..self.config.episodes {
            let mut env = factory(Mode::Pomdp);
            let episode = generate_episode(
                &mut env,
                &tables.policy,
                &tables.belief,
                self.config.belief,
                rng,
            )?;
            window_reward += episode.total_reward();
            self.update(&mut tables, &episode)?;

            if (index + 1) % interval == 0 {
                event!(
                    target: "blackjack_bot::monte_carlo",
                    Level::DEBUG,
                    episode = index + 1,
                    mean_reward = window_reward / interval as f64,
                    belief_observations = tables.belief.total_observations(),
                    "monte carlo progress"
                );
                window_reward = 0.0;
            }
        }

        event!(
            target: "blackjack_bot::monte_carlo",
            Level::INFO,
            episodes = self.config.episodes,
            belief = ?self.config.belief,
            visits = ?self.config.visits,
            stick_cells = tables.policy.count(Action::Stick),
            "monte carlo training complete"
        );
        Ok(tables)
    }

    /// Folds one finished episode into the belief, the estimates and the
    /// policy.
    pub fn update(
        &self,
        tables: &mut MonteCarloTables,
        episode: &Episode,
    ) -> Result<(), LearnError> {
        let hidden = episode.hidden.ok_or(LearnError::MissingHiddenOutcome {
            start: episode.start,
        })?;
        tables.belief.observe(episode.start, hidden)?;

        let mut ret = 0.0;
        for t in (0..episode.steps.len()).rev() {
            ret = self.config.gamma * ret + episode.rewards[t];
            let pair = episode.steps[t];
            if self.config.visits == VisitRule::First && episode.steps[..t].contains(&pair) {
                continue;
            }
            let (state, action) = pair;
            let count = tables.visits.get_mut(state, action);
            *count += 1;
            let count = f64::from(*count);
            let estimate = tables.q.get_mut(state, action);
            *estimate += (ret - *estimate) / count;
            tables.policy.set(state, tables.q.best_action(state));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use blackjack_core::env::{EnvError, Transition};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    /// Replays a fixed script of transitions from a fixed start state.
    struct Scripted {
        start: State,
        script: Vec<Transition>,
        cursor: usize,
    }

    impl Scripted {
        fn new(start: State, script: Vec<Transition>) -> Self {
            Self {
                start,
                script,
                cursor: 0,
            }
        }
    }

    impl Environment for Scripted {
        fn start<R: Rng + ?Sized>(&mut self, _rng: &mut R) -> Result<State, EnvError> {
            self.cursor = 0;
            Ok(self.start)
        }

        fn step(&mut self, _action: Action) -> Result<Transition, EnvError> {
            let step = self
                .script
                .get(self.cursor)
                .copied()
                .ok_or(EnvError::EpisodeFinished)?;
            self.cursor += 1;
            Ok(step)
        }
    }

    fn terminal(reward: f64, hidden: Option<u8>) -> Transition {
        Transition {
            next: None,
            reward,
            hidden,
        }
    }

    fn run_returns(returns: &[f64]) -> MonteCarloTables {
        let start = State::new(18, 7);
        let controller = MonteCarloController::new(MonteCarloConfig {
            gamma: 1.0,
            episodes: 1,
            belief: BeliefMode::Max,
            visits: VisitRule::First,
        });
        let mut tables = MonteCarloTables::with_policy(PolicyTable::filled(Action::Stick));
        let mut rng = StdRng::seed_from_u64(0);
        for &ret in returns {
            // hidden slot 0 keeps the max estimate at zero, so every episode
            // visits the same adjusted state
            let mut env = Scripted::new(start, vec![terminal(ret, Some(0))]);
            let episode = generate_episode(
                &mut env,
                &tables.policy,
                &tables.belief,
                BeliefMode::Max,
                &mut rng,
            )
            .expect("episode");
            controller.update(&mut tables, &episode).expect("update");
        }
        tables
    }

    #[test]
    fn incremental_mean_is_order_independent() {
        let state = State::new(18, 7);
        let forward = run_returns(&[1.0, 2.0, 4.5]);
        let backward = run_returns(&[4.5, 1.0, 2.0]);
        let mean = (1.0 + 2.0 + 4.5) / 3.0;
        for tables in [&forward, &backward] {
            assert_eq!(tables.visits.get(state, Action::Stick), 3);
            assert!((tables.q.get(state, Action::Stick) - mean).abs() < 1e-12);
            assert_eq!(tables.policy.get(state), Action::Stick);
        }
    }

    #[test]
    fn returns_are_discounted_backwards() {
        let start = State::new(10, 5);
        let next = State::new(15, 5);
        let controller = MonteCarloController::new(MonteCarloConfig {
            gamma: 0.5,
            episodes: 1,
            belief: BeliefMode::Max,
            visits: VisitRule::First,
        });
        let mut tables = MonteCarloTables::with_policy(PolicyTable::filled(Action::Hit));
        let mut env = Scripted::new(
            start,
            vec![
                Transition {
                    next: Some(next),
                    reward: 0.0,
                    hidden: None,
                },
                terminal(1.0, Some(0)),
            ],
        );
        let mut rng = StdRng::seed_from_u64(0);
        let episode = generate_episode(
            &mut env,
            &tables.policy,
            &tables.belief,
            BeliefMode::Max,
            &mut rng,
        )
        .expect("episode");
        assert_eq!(episode.steps, vec![(start, Action::Hit), (next, Action::Hit)]);
        controller.update(&mut tables, &episode).expect("update");
        assert_eq!(tables.q.get(next, Action::Hit), 1.0);
        assert_eq!(tables.q.get(start, Action::Hit), 0.5);
    }

    #[test]
    fn first_visit_counts_repeated_pairs_once() {
        let start = State::new(15, 4);
        let script = vec![
            Transition {
                next: Some(start),
                reward: 0.0,
                hidden: None,
            },
            terminal(1.0, Some(0)),
        ];
        let mut counts = Vec::new();
        for visits in [VisitRule::First, VisitRule::Every] {
            let controller = MonteCarloController::new(MonteCarloConfig {
                gamma: 1.0,
                episodes: 1,
                belief: BeliefMode::Max,
                visits,
            });
            let tables = controller
                .train(
                    MonteCarloTables::with_policy(PolicyTable::filled(Action::Hit)),
                    |_| Scripted::new(start, script.clone()),
                    &mut StdRng::seed_from_u64(0),
                )
                .expect("train");
            assert_eq!(tables.q.get(start, Action::Hit), 1.0);
            counts.push(tables.visits.get(start, Action::Hit));
        }
        assert_eq!(counts, vec![1, 2]);
    }

    #[test]
    fn belief_row_of_unadjusted_start_is_updated() {
        let start = State::new(13, 9);
        let controller = MonteCarloController::new(MonteCarloConfig {
            episodes: 2,
            belief: BeliefMode::Max,
            ..MonteCarloConfig::default()
        });
        let tables = controller
            .train(
                MonteCarloTables::with_policy(PolicyTable::filled(Action::Stick)),
                |_| Scripted::new(start, vec![terminal(-1.0, Some(6))]),
                &mut StdRng::seed_from_u64(0),
            )
            .expect("train");
        assert_eq!(tables.belief.count(start), 2);
        assert_eq!(tables.belief.row(start)[6], 1.0);
        // second episode used the estimate 6, so it learned at the adjusted state
        assert_eq!(tables.visits.get(start, Action::Stick), 1);
        assert_eq!(tables.visits.get(State::new(13, 15), Action::Stick), 1);
    }

    #[test]
    fn missing_hidden_outcome_is_an_error() {
        let start = State::new(12, 2);
        let controller = MonteCarloController::new(MonteCarloConfig {
            episodes: 1,
            ..MonteCarloConfig::default()
        });
        let err = controller
            .train(
                MonteCarloTables::with_policy(PolicyTable::filled(Action::Stick)),
                |_| Scripted::new(start, vec![terminal(1.0, None)]),
                &mut StdRng::seed_from_u64(0),
            )
            .expect_err("hidden card never revealed");
        assert_eq!(err, LearnError::MissingHiddenOutcome { start });
    }

    #[test]
    fn zero_episodes_leave_tables_untouched() {
        let mut rng = StdRng::seed_from_u64(3);
        let initial = MonteCarloTables::new(&mut rng);
        let controller = MonteCarloController::new(MonteCarloConfig {
            episodes: 0,
            ..MonteCarloConfig::default()
        });
        let out = controller
            .train(
                initial.clone(),
                |_| Scripted::new(State::new(4, 2), Vec::new()),
                &mut rng,
            )
            .expect("train");
        assert_eq!(out, initial);
    }
}
