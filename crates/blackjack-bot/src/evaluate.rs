use crate::learn::LearnError;
use crate::policy::Agent;
use blackjack_core::env::{Environment, Mode};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Outcome tally for an agent played without learning.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EvaluationSummary {
    pub episodes: usize,
    pub wins: usize,
    pub losses: usize,
    pub mean_reward: f64,
}

impl EvaluationSummary {
    pub fn win_rate(&self) -> f64 {
        if self.episodes == 0 {
            0.0
        } else {
            self.wins as f64 / self.episodes as f64
        }
    }
}

/// Plays `episodes` episodes with `agent` and tallies the rewards.
pub fn evaluate<A, E, F, R>(
    agent: &mut A,
    mode: Mode,
    mut factory: F,
    episodes: usize,
    rng: &mut R,
) -> Result<EvaluationSummary, LearnError>
where
    A: Agent,
    E: Environment,
    F: FnMut(Mode) -> E,
    R: Rng + ?Sized,
{
    let mut wins = 0;
    let mut losses = 0;
    let mut total = 0.0;

    for _ in 0..episodes {
        let mut env = factory(mode);
        let start = env.start(rng)?;
        agent.begin(start, rng);
        let mut state = Some(start);
        let mut reward = 0.0;
        while let Some(current) = state {
            let step = env.step(agent.act(current))?;
            reward += step.reward;
            state = step.next;
        }
        if reward > 0.0 {
            wins += 1;
        } else if reward < 0.0 {
            losses += 1;
        }
        total += reward;
    }

    let mean_reward = if episodes == 0 {
        0.0
    } else {
        total / episodes as f64
    };
    Ok(EvaluationSummary {
        episodes,
        wins,
        losses,
        mean_reward,
    })
}
