use crate::metrics::Component;
use serde::{Deserialize, Serialize};

/// The four component scores of one tool, each in [0,100].
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ComponentScores {
    pub buzz: f64,
    pub sentiment: f64,
    pub utility: f64,
    pub price: f64,
}

impl ComponentScores {
    #[must_use]
    pub const fn get(&self, component: Component) -> f64 {
        match component {
            Component::Buzz => self.buzz,
            Component::Sentiment => self.sentiment,
            Component::Utility => self.utility,
            Component::Price => self.price,
        }
    }

    /// Scores rounded to one decimal, as published in snapshots.
    #[must_use]
    pub fn rounded(self) -> Self {
        Self {
            buzz: round1(self.buzz),
            sentiment: round1(self.sentiment),
            utility: round1(self.utility),
            price: round1(self.price),
        }
    }
}

pub(super) fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
