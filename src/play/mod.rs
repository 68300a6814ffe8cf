//! Running games between two agents and tallying the results.

pub mod episode;
pub mod metrics;

pub use episode::{play_match, MatchMove, MatchResult};
pub use metrics::MatchMetrics;
