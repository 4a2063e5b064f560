use blackjack_bot::learn::generate_episode;
use blackjack_bot::{
    ActionValues, BeliefAgent, MonteCarloConfig, MonteCarloController, MonteCarloTables,
    SarsaConfig, SarsaLearner, VisitRule, evaluate,
};
use blackjack_core::belief::{BeliefMode, HIDDEN_DOMAIN};
use blackjack_core::env::{Action, Blackjack, Mode, State, TABLE_SPAN};
use rand::SeedableRng;
use rand::rngs::StdRng;

fn sarsa(config: SarsaConfig, mode: Mode, seed: u64) -> ActionValues {
    let mut rng = StdRng::seed_from_u64(seed);
    SarsaLearner::new(config)
        .train(ActionValues::new(), mode, Blackjack::new, &mut rng)
        .expect("sarsa trains")
}

#[test]
fn sarsa_is_reproducible_from_a_seed() {
    let config = SarsaConfig {
        lambda: 0.7,
        episodes: 300,
        ..SarsaConfig::default()
    };
    assert_eq!(sarsa(config, Mode::Hidden, 5), sarsa(config, Mode::Hidden, 5));
    assert_ne!(sarsa(config, Mode::Hidden, 5), sarsa(config, Mode::Hidden, 6));
}

#[test]
fn sarsa_learns_not_to_hit_on_twenty() {
    let q = sarsa(
        SarsaConfig {
            lambda: 0.5,
            alpha: 0.05,
            gamma: 1.0,
            epsilon: 0.1,
            episodes: 5_000,
        },
        Mode::Full,
        2024,
    );
    let advantage: f64 = (0..TABLE_SPAN as u8)
        .map(|dealer| {
            let state = State::new(20, dealer);
            q.get(state, Action::Stick) - q.get(state, Action::Hit)
        })
        .sum();
    assert!(advantage > 0.0, "stick advantage on 20 was {advantage}");
    assert!(q.entries().all(|(_, _, value)| value.is_finite()));
}

#[test]
fn sarsa_hidden_mode_only_touches_first_card_columns() {
    let q = sarsa(
        SarsaConfig {
            episodes: 500,
            ..SarsaConfig::default()
        },
        Mode::Hidden,
        31,
    );
    for (state, _, value) in q.entries() {
        if state.dealer < 2 || state.dealer > 11 {
            assert_eq!(value, 0.0, "unreachable dealer column {state}");
        }
    }
}

#[test]
fn monte_carlo_tracks_one_belief_update_per_episode() {
    let mut rng = StdRng::seed_from_u64(17);
    let initial = MonteCarloTables::new(&mut rng);
    let controller = MonteCarloController::new(MonteCarloConfig {
        gamma: 1.0,
        episodes: 2_000,
        belief: BeliefMode::Sample,
        visits: VisitRule::First,
    });
    let tables = controller
        .train(initial, Blackjack::new, &mut rng)
        .expect("monte carlo trains");

    assert_eq!(tables.belief.total_observations(), 2_000);
    for index in 0..TABLE_SPAN * TABLE_SPAN {
        let state = State::from_index(index);
        let row = tables.belief.row(state);
        assert_eq!(row.len(), HIDDEN_DOMAIN);
        assert!(row.iter().all(|p| (0.0..=1.0).contains(p)));
        // slot 0 is never revealed by a real card
        assert_eq!(row[0], 0.0);
        if tables.belief.count(state) > 0 {
            assert!(row.iter().any(|p| *p == 1.0), "first observation saturates");
        }
    }
}

#[test]
fn monte_carlo_policy_is_greedy_wherever_it_learned() {
    let mut rng = StdRng::seed_from_u64(23);
    let controller = MonteCarloController::new(MonteCarloConfig {
        episodes: 1_500,
        belief: BeliefMode::Max,
        ..MonteCarloConfig::default()
    });
    let tables = controller
        .train(MonteCarloTables::new(&mut rng), Blackjack::new, &mut rng)
        .expect("monte carlo trains");
    for (state, action, count) in tables.visits.entries() {
        if count > 0 {
            assert_eq!(
                tables.policy.get(state),
                tables.q.best_action(state),
                "{state} visited via {action}"
            );
        }
    }
}

#[test]
fn belief_adjusted_states_stay_inside_the_tables() {
    let mut rng = StdRng::seed_from_u64(41);
    let mut tables = MonteCarloTables::new(&mut rng);
    for state in [State::new(12, 11), State::new(20, 11), State::new(4, 2)] {
        tables.belief.observe(state, 10).expect("in domain");
    }
    let controller = MonteCarloController::new(MonteCarloConfig {
        episodes: 1,
        belief: BeliefMode::Max,
        ..MonteCarloConfig::default()
    });
    for _ in 0..500 {
        let mut env = Blackjack::new(Mode::Pomdp);
        let episode = generate_episode(
            &mut env,
            &tables.policy,
            &tables.belief,
            BeliefMode::Max,
            &mut rng,
        )
        .expect("episode");
        for (state, _) in &episode.steps {
            assert!((state.dealer as usize) < TABLE_SPAN);
        }
        controller.update(&mut tables, &episode).expect("update");
    }
}

#[test]
fn learned_belief_policy_can_be_evaluated() {
    let mut rng = StdRng::seed_from_u64(8);
    let tables = MonteCarloController::new(MonteCarloConfig {
        episodes: 500,
        ..MonteCarloConfig::default()
    })
    .train(MonteCarloTables::new(&mut rng), Blackjack::new, &mut rng)
    .expect("monte carlo trains");
    let mut agent = BeliefAgent::new(&tables.policy, &tables.belief, BeliefMode::Max);
    let summary =
        evaluate(&mut agent, Mode::Pomdp, Blackjack::new, 200, &mut rng).expect("evaluate");
    assert_eq!(summary.wins + summary.losses, 200);
}
