pub mod evaluate;
pub mod learn;
pub mod policy;
pub mod tables;

pub use evaluate::{EvaluationSummary, evaluate};
pub use learn::{
    Episode, LearnError, MonteCarloConfig, MonteCarloController, MonteCarloTables, SarsaConfig,
    SarsaLearner, VisitRule,
};
pub use policy::{Agent, BeliefAgent, GreedyAgent};
pub use tables::{ActionValues, PolicyTable, StateActionTable, Traces, VisitCounts};
