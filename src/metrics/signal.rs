use crate::metrics::Component;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

/// A raw per-tool signal feeding one of the computed components.
///
/// Utility and price come straight from the manual rating tables and have no raw signals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Signal {
    GithubStars,
    GithubStarGrowth,
    HnMentions,
    RedditMentions,

    GithubIssueHealth,
    HnSentiment,
    RedditSentiment,
}

impl Signal {
    #[must_use]
    pub const fn component(self) -> Component {
        match self {
            Self::GithubStars | Self::GithubStarGrowth | Self::HnMentions | Self::RedditMentions => Component::Buzz,
            Self::GithubIssueHealth | Self::HnSentiment | Self::RedditSentiment => Component::Sentiment,
        }
    }
}
