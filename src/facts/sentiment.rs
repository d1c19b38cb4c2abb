//! Sentiment of community discussion.
//!
//! Scoring only needs one number per corpus. The [`SentimentAnalyzer`] trait is the seam to
//! whatever model produces per-text polarity; [`LexiconAnalyzer`] is the built-in default.

use core::fmt::Debug;
use std::collections::HashMap;

/// Scores the polarity of a single text.
pub trait SentimentAnalyzer: Debug {
    /// Compound polarity of `text`, in [-1,1] where 1 is most positive.
    fn polarity(&self, text: &str) -> f64;
}

/// Mean polarity over the non-blank texts of a corpus, in [-1,1]; 0 for an empty corpus.
#[must_use]
#[expect(clippy::cast_precision_loss, reason = "Corpus sizes are far below 2^52")]
pub fn average_polarity(analyzer: &dyn SentimentAnalyzer, texts: &[String]) -> f64 {
    let scores: Vec<f64> = texts
        .iter()
        .filter(|text| !text.trim().is_empty())
        .map(|text| analyzer.polarity(text).clamp(-1.0, 1.0))
        .collect();

    if scores.is_empty() {
        return 0.0;
    }

    scores.iter().sum::<f64>() / scores.len() as f64
}

/// Rescale a polarity from [-1,1] to [0,1].
#[must_use]
pub fn normalize_polarity(score: f64) -> f64 {
    (score + 1.0) / 2.0
}

/// Sentiment of a corpus in [0,1]; an empty corpus is neutral (0.5).
#[must_use]
pub fn corpus_sentiment(analyzer: &dyn SentimentAnalyzer, texts: &[String]) -> f64 {
    normalize_polarity(average_polarity(analyzer, texts))
}

/// Normalization constant mapping an unbounded valence sum into (-1,1).
const NORMALIZATION_ALPHA: f64 = 15.0;

/// Scale applied to a word following a negation.
const NEGATION_SCALAR: f64 = -0.74;

/// How many preceding tokens are checked for a negation.
const NEGATION_WINDOW: usize = 3;

const NEGATIONS: &[&str] = &[
    "not", "no", "never", "neither", "nor", "none", "nothing", "nobody", "cannot", "can't", "don't", "doesn't", "didn't",
    "isn't", "aren't", "wasn't", "weren't", "won't", "wouldn't", "shouldn't", "couldn't", "hasn't", "haven't",
];

/// Word valences on the usual -4..4 scale.
const DEFAULT_LEXICON: &[(&str, f64)] = &[
    ("amazing", 2.8),
    ("awesome", 3.1),
    ("beautiful", 2.9),
    ("best", 3.2),
    ("better", 1.9),
    ("brilliant", 2.8),
    ("clean", 1.7),
    ("cool", 1.3),
    ("easy", 1.9),
    ("effective", 2.1),
    ("excellent", 2.7),
    ("excited", 2.2),
    ("fantastic", 2.6),
    ("favorite", 2.0),
    ("fun", 2.3),
    ("good", 1.9),
    ("great", 3.1),
    ("happy", 2.7),
    ("helpful", 1.7),
    ("impressed", 2.1),
    ("impressive", 2.3),
    ("incredible", 2.4),
    ("like", 1.5),
    ("love", 3.2),
    ("nice", 1.8),
    ("perfect", 2.7),
    ("powerful", 1.8),
    ("recommend", 1.5),
    ("solid", 1.3),
    ("thanks", 1.9),
    ("useful", 1.9),
    ("win", 2.8),
    ("wonderful", 2.7),
    ("worth", 0.9),
    ("annoying", -1.7),
    ("awful", -2.0),
    ("bad", -2.5),
    ("broken", -2.1),
    ("bug", -1.2),
    ("buggy", -1.8),
    ("confusing", -1.3),
    ("crash", -1.7),
    ("crashes", -1.7),
    ("disappointed", -1.9),
    ("disappointing", -2.2),
    ("fail", -2.5),
    ("failed", -2.3),
    ("frustrating", -1.9),
    ("garbage", -2.1),
    ("hate", -2.7),
    ("horrible", -2.5),
    ("overpriced", -1.6),
    ("pain", -2.3),
    ("poor", -2.1),
    ("problem", -1.7),
    ("scam", -2.6),
    ("slow", -1.0),
    ("terrible", -2.1),
    ("ugly", -2.3),
    ("useless", -1.8),
    ("waste", -1.8),
    ("worse", -2.1),
    ("worst", -3.1),
    ("wrong", -2.1),
];

/// Lexicon-based polarity scorer.
///
/// Sums word valences, flips words within a short window after a negation, and squashes the sum
/// with `x / sqrt(x² + 15)` into (-1,1).
#[derive(Debug, Clone)]
pub struct LexiconAnalyzer {
    lexicon: HashMap<String, f64>,
}

impl Default for LexiconAnalyzer {
    fn default() -> Self {
        Self {
            lexicon: DEFAULT_LEXICON.iter().map(|(word, valence)| ((*word).to_string(), *valence)).collect(),
        }
    }
}

impl SentimentAnalyzer for LexiconAnalyzer {
    fn polarity(&self, text: &str) -> f64 {
        let lowered = text.to_lowercase();
        let tokens: Vec<&str> = lowered
            .split(|c: char| !(c.is_alphanumeric() || c == '\''))
            .filter(|token| !token.is_empty())
            .collect();

        let mut sum = 0.0;
        for (i, token) in tokens.iter().enumerate() {
            let Some(&valence) = self.lexicon.get(*token) else {
                continue;
            };

            let negated = tokens[i.saturating_sub(NEGATION_WINDOW)..i].iter().any(|t| NEGATIONS.contains(t));
            sum += if negated { valence * NEGATION_SCALAR } else { valence };
        }

        (sum / (sum * sum + NORMALIZATION_ALPHA).sqrt()).clamp(-1.0, 1.0)
    }
}
