//! The four component scorers.
//!
//! Every scorer resolves to a number in [0,100]. Missing data falls back to documented defaults
//! and is reported through the log, never as an error.

use super::{ComponentScores, LOG_TARGET, NEUTRAL_SCORE, percentile};
use crate::config::{BuzzWeights, Config, SentimentWeights};
use crate::facts::{GithubData, ManualRatings, SentimentAnalyzer, SignalBundle, ToolSignals, corpus_sentiment};
use crate::metrics::{Component, Signal};
use strum::IntoEnumIterator;

/// Peer values of every buzz signal across the tools of one category.
#[derive(Debug, Clone, Default)]
pub struct Population {
    stars: Vec<Option<f64>>,
    star_growth: Vec<Option<f64>>,
    hn_mentions: Vec<Option<f64>>,
    reddit_mentions: Vec<Option<f64>>,
}

impl Population {
    /// Gather peer values. Tools without a usable star baseline are left out of the growth peers.
    #[must_use]
    pub fn from_bundles<'a>(bundles: impl IntoIterator<Item = &'a SignalBundle>) -> Self {
        let mut population = Self::default();
        for bundle in bundles {
            population.stars.push(buzz_value(bundle, Signal::GithubStars));
            population.star_growth.push(bundle.github.star_growth());
            population.hn_mentions.push(buzz_value(bundle, Signal::HnMentions));
            population.reddit_mentions.push(buzz_value(bundle, Signal::RedditMentions));
        }
        population
    }

    fn peers(&self, signal: Signal) -> &[Option<f64>] {
        match signal {
            Signal::GithubStars => &self.stars,
            Signal::GithubStarGrowth => &self.star_growth,
            Signal::HnMentions => &self.hn_mentions,
            Signal::RedditMentions => &self.reddit_mentions,
            Signal::GithubIssueHealth | Signal::HnSentiment | Signal::RedditSentiment => &[],
        }
    }
}

/// A tool's own value for a buzz signal.
///
/// A tool without growth history ranks with zero growth against the peers that do have it.
#[expect(clippy::cast_precision_loss, reason = "Counts are far below 2^52")]
fn buzz_value(bundle: &SignalBundle, signal: Signal) -> Option<f64> {
    match signal {
        Signal::GithubStars => Some(bundle.github.stars as f64),
        Signal::GithubStarGrowth => Some(bundle.github.star_growth().unwrap_or(0.0)),
        Signal::HnMentions => Some(bundle.hn.mentions_count as f64),
        Signal::RedditMentions => Some(bundle.reddit.mentions_count as f64),
        Signal::GithubIssueHealth | Signal::HnSentiment | Signal::RedditSentiment => None,
    }
}

/// Buzz in [0,100]: weighted percentiles of stars, star growth, and HN and Reddit mentions.
#[must_use]
pub fn buzz_score(bundle: &SignalBundle, population: &Population, weights: &BuzzWeights) -> f64 {
    let score: f64 = Signal::iter()
        .filter(|signal| signal.component() == Component::Buzz)
        .map(|signal| {
            let rank = percentile(buzz_value(bundle, signal), population.peers(signal).iter().copied());
            rank * weights.weight(signal)
        })
        .sum();

    score.clamp(0.0, 100.0)
}

/// Sentiment in [0,100] from issue health and the [0,1] HN and Reddit sentiments.
#[must_use]
pub fn sentiment_score(github: &GithubData, hn_sentiment: f64, reddit_sentiment: f64, weights: &SentimentWeights) -> f64 {
    let blended = github.issue_health() * weights.weight(Signal::GithubIssueHealth)
        + hn_sentiment * weights.weight(Signal::HnSentiment)
        + reddit_sentiment * weights.weight(Signal::RedditSentiment);

    (blended * 100.0).clamp(0.0, 100.0)
}

/// Utility in [0,100] from the manual features table; 50 when the tool isn't rated.
#[must_use]
pub fn utility_score(tool: &str, ratings: &ManualRatings) -> f64 {
    let Some(rating) = ratings.feature_rating(tool) else {
        log::warn!(target: LOG_TARGET, "No utility data for '{tool}', using default {NEUTRAL_SCORE}");
        return NEUTRAL_SCORE;
    };

    rating.score().unwrap_or_else(|| {
        log::warn!(target: LOG_TARGET, "Utility data for '{tool}' has no numeric ratings, using default {NEUTRAL_SCORE}");
        NEUTRAL_SCORE
    })
}

/// Price in [0,100] from the manual pricing table; 50 when the tool isn't rated.
#[must_use]
pub fn price_score(tool: &str, ratings: &ManualRatings) -> f64 {
    let Some(rating) = ratings.pricing_rating(tool) else {
        log::warn!(target: LOG_TARGET, "No pricing data for '{tool}', using default {NEUTRAL_SCORE}");
        return NEUTRAL_SCORE;
    };

    rating.score()
}

/// Computes the component scores of the tools of one category.
#[derive(Debug)]
pub struct ComponentScorer<'a> {
    config: &'a Config,
    ratings: &'a ManualRatings,
    analyzer: &'a dyn SentimentAnalyzer,
    population: Population,
}

impl<'a> ComponentScorer<'a> {
    #[must_use]
    pub const fn new(config: &'a Config, ratings: &'a ManualRatings, analyzer: &'a dyn SentimentAnalyzer, population: Population) -> Self {
        Self {
            config,
            ratings,
            analyzer,
            population,
        }
    }

    /// Score one tool against the population this scorer was built with.
    #[must_use]
    pub fn score(&self, tool: &ToolSignals) -> ComponentScores {
        let bundle = &tool.signals;
        let hn_sentiment = corpus_sentiment(self.analyzer, &bundle.hn.comments);
        let reddit_sentiment = corpus_sentiment(self.analyzer, &bundle.reddit.comments);

        let scores = ComponentScores {
            buzz: buzz_score(bundle, &self.population, &self.config.buzz_weights),
            sentiment: sentiment_score(&bundle.github, hn_sentiment, reddit_sentiment, &self.config.sentiment_weights),
            utility: utility_score(&tool.name, self.ratings),
            price: price_score(&tool.name, self.ratings),
        };

        log::debug!(
            target: LOG_TARGET,
            "'{}': buzz {:.1}, sentiment {:.1} (HN {hn_sentiment:.2}, Reddit {reddit_sentiment:.2}), utility {:.1}, price {:.1}",
            tool.name,
            scores.buzz,
            scores.sentiment,
            scores.utility,
            scores.price,
        );

        scores
    }
}
