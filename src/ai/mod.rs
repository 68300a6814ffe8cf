mod agent;
pub mod evaluator;
pub mod game_tree;
mod random;
mod search_agent;

pub use agent::Agent;
pub use evaluator::Evaluator;
pub use game_tree::{GameTreeSearch, PlayoutConfig};
pub use random::RandomAgent;
pub use search_agent::{AgentConfig, SearchAgent, Strategy};
