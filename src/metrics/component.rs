use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

/// The four per-tool scores blended into the final score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Component {
    Buzz,
    Sentiment,
    Utility,
    Price,
}
