//! Raw inputs of a scoring run: per-tool signals, manual ratings and sentiment.

mod ratings;
mod sentiment;
mod signal_bundle;
mod signals_document;

pub use ratings::{FeatureRating, ManualRatings, PriceTier, PricingRating};
pub use sentiment::{LexiconAnalyzer, SentimentAnalyzer, average_polarity, corpus_sentiment, normalize_polarity};
pub use signal_bundle::{GithubData, MentionData, SignalBundle};
pub use signals_document::{CategorySignals, SignalsDocument, ToolSignals};
