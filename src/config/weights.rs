//! Weight sets used to blend signals and components.

use crate::metrics::{Component, Signal};
use serde::{Deserialize, Serialize};

/// Tolerance used when checking that a weight set sums to one.
const SUM_TOLERANCE: f64 = 1e-6;

/// Common interface for all weight sets
pub trait Weights {
    /// Name of the configuration section holding this set, used in messages.
    const SECTION: &'static str;

    /// Every named weight in the set.
    fn entries(&self) -> Vec<(&'static str, f64)>;

    /// Check the set for unusable values and return warnings for suspicious ones.
    ///
    /// # Errors
    ///
    /// Returns an error if any weight is negative or not finite.
    fn validate(&self) -> anyhow::Result<Vec<String>> {
        let entries = self.entries();
        for (name, weight) in &entries {
            if !weight.is_finite() || *weight < 0.0 {
                anyhow::bail!("{}.{name} must be a finite, non-negative number, got {weight}", Self::SECTION);
            }
        }

        let mut warnings = Vec::new();
        let sum: f64 = entries.iter().map(|(_, weight)| weight).sum();
        if (sum - 1.0).abs() > SUM_TOLERANCE {
            warnings.push(format!("{}: weights sum to {sum:.4} instead of 1.0", Self::SECTION));
        }

        Ok(warnings)
    }
}

/// Weights blending the four components into the final score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CompositeWeights {
    pub buzz: f64,
    pub sentiment: f64,
    pub utility: f64,
    pub price: f64,
}

impl CompositeWeights {
    #[must_use]
    pub const fn weight(&self, component: Component) -> f64 {
        match component {
            Component::Buzz => self.buzz,
            Component::Sentiment => self.sentiment,
            Component::Utility => self.utility,
            Component::Price => self.price,
        }
    }
}

impl Default for CompositeWeights {
    fn default() -> Self {
        Self {
            buzz: 0.30,
            sentiment: 0.25,
            utility: 0.25,
            price: 0.20,
        }
    }
}

impl Weights for CompositeWeights {
    const SECTION: &'static str = "weights";

    fn entries(&self) -> Vec<(&'static str, f64)> {
        vec![
            ("buzz", self.buzz),
            ("sentiment", self.sentiment),
            ("utility", self.utility),
            ("price", self.price),
        ]
    }
}

/// Weights blending the percentile-normalized buzz signals.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BuzzWeights {
    pub github_stars: f64,
    pub github_star_growth: f64,
    pub hn_mentions: f64,
    pub reddit_mentions: f64,
}

impl BuzzWeights {
    /// Weight of a buzz signal; signals feeding other components weigh nothing here.
    #[must_use]
    pub const fn weight(&self, signal: Signal) -> f64 {
        match signal {
            Signal::GithubStars => self.github_stars,
            Signal::GithubStarGrowth => self.github_star_growth,
            Signal::HnMentions => self.hn_mentions,
            Signal::RedditMentions => self.reddit_mentions,
            Signal::GithubIssueHealth | Signal::HnSentiment | Signal::RedditSentiment => 0.0,
        }
    }
}

impl Default for BuzzWeights {
    fn default() -> Self {
        Self {
            github_stars: 0.4,
            github_star_growth: 0.3,
            hn_mentions: 0.15,
            reddit_mentions: 0.15,
        }
    }
}

impl Weights for BuzzWeights {
    const SECTION: &'static str = "buzz_weights";

    fn entries(&self) -> Vec<(&'static str, f64)> {
        vec![
            ("github_stars", self.github_stars),
            ("github_star_growth", self.github_star_growth),
            ("hn_mentions", self.hn_mentions),
            ("reddit_mentions", self.reddit_mentions),
        ]
    }
}

/// Weights blending issue health and community sentiment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SentimentWeights {
    pub github_issue_health: f64,
    pub hn_sentiment: f64,
    pub reddit_sentiment: f64,
}

impl SentimentWeights {
    /// Weight of a sentiment signal; signals feeding other components weigh nothing here.
    #[must_use]
    pub const fn weight(&self, signal: Signal) -> f64 {
        match signal {
            Signal::GithubIssueHealth => self.github_issue_health,
            Signal::HnSentiment => self.hn_sentiment,
            Signal::RedditSentiment => self.reddit_sentiment,
            Signal::GithubStars | Signal::GithubStarGrowth | Signal::HnMentions | Signal::RedditMentions => 0.0,
        }
    }
}

impl Default for SentimentWeights {
    fn default() -> Self {
        Self {
            github_issue_health: 0.3,
            hn_sentiment: 0.35,
            reddit_sentiment: 0.35,
        }
    }
}

impl Weights for SentimentWeights {
    const SECTION: &'static str = "sentiment_weights";

    fn entries(&self) -> Vec<(&'static str, f64)> {
        vec![
            ("github_issue_health", self.github_issue_health),
            ("hn_sentiment", self.hn_sentiment),
            ("reddit_sentiment", self.reddit_sentiment),
        ]
    }
}
