mod period;
#[expect(clippy::module_inception, reason = "I like it this way")]
mod snapshot;
pub mod store;

pub use period::Period;
pub use snapshot::{CategoryRanking, ListKey, RankedItem, RankingSnapshot};
