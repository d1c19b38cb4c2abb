mod component_scorer;
mod component_scores;
mod percentile;
mod ranker;

pub use component_scorer::{ComponentScorer, Population, buzz_score, price_score, sentiment_score, utility_score};
pub use component_scores::ComponentScores;
pub use percentile::percentile;
pub use ranker::{Ranker, assign_ranks, final_score};

/// Score used whenever a tool has no data to say otherwise.
pub const NEUTRAL_SCORE: f64 = 50.0;

/// Log target for scoring
const LOG_TARGET: &str = "scoring";
