//! Composite scoring and rank assignment.

use super::component_scores::round1;
use super::{ComponentScorer, ComponentScores, LOG_TARGET, Population};
use crate::config::{CompositeWeights, Config};
use crate::facts::{CategorySignals, ManualRatings, SentimentAnalyzer, SignalsDocument};
use crate::metrics::Component;
use crate::snapshot::{CategoryRanking, ListKey, Period, RankedItem, RankingSnapshot};
use serde_json::Map;
use strum::IntoEnumIterator;

/// Blend the component scores into one number in [0,100].
///
/// The result is clamped whatever the inputs or weights are.
#[must_use]
pub fn final_score(scores: &ComponentScores, weights: &CompositeWeights) -> f64 {
    let total: f64 = Component::iter().map(|c| scores.get(c) * weights.weight(c)).sum();
    total.clamp(0.0, 100.0)
}

/// Sort items by final score, highest first, and number them from 1.
///
/// The sort is stable so equal scores keep their input order. Unscored items go last.
pub fn assign_ranks(items: &mut [RankedItem]) {
    let score = |item: &RankedItem| item.final_score.unwrap_or(f64::NEG_INFINITY);
    items.sort_by(|a, b| score(b).total_cmp(&score(a)));
    for (rank, item) in (1u32..).zip(items.iter_mut()) {
        item.rank = rank;
    }
}

/// Ranks the tools of each category.
#[derive(Debug)]
pub struct Ranker<'a> {
    config: &'a Config,
    ratings: &'a ManualRatings,
    analyzer: &'a dyn SentimentAnalyzer,
}

impl<'a> Ranker<'a> {
    #[must_use]
    pub const fn new(config: &'a Config, ratings: &'a ManualRatings, analyzer: &'a dyn SentimentAnalyzer) -> Self {
        Self { config, ratings, analyzer }
    }

    /// Score and rank one category. Its tools form the population for percentile ranking.
    #[must_use]
    pub fn rank_category(&self, category: &CategorySignals) -> CategoryRanking {
        let scorer = ComponentScorer::new(self.config, self.ratings, self.analyzer, Population::from_bundles(category.population()));

        let mut items: Vec<_> = category
            .tools
            .iter()
            .map(|tool| {
                let scores = scorer.score(tool);
                let total = final_score(&scores, &self.config.weights);
                RankedItem::new(&tool.name, &tool.provider, round1(total), scores.rounded())
            })
            .collect();

        assign_ranks(&mut items);

        if let Some(leader) = items.first() {
            log::info!(
                target: LOG_TARGET,
                "Ranked {} tools in '{}', leader is '{}' with {:.1}",
                items.len(),
                category.slug,
                leader.name,
                leader.final_score.unwrap_or_default()
            );
        } else {
            log::warn!(target: LOG_TARGET, "Category '{}' has no tools", category.slug);
        }

        CategoryRanking {
            slug: category.slug.clone(),
            name: category.name.clone(),
            items,
            list_key: ListKey::Items,
            extra: Map::new(),
        }
    }

    /// Rank every category of a signals document into a snapshot for `period`.
    #[must_use]
    pub fn rank_document(&self, document: &SignalsDocument, period: Period) -> RankingSnapshot {
        RankingSnapshot {
            period: period.to_string(),
            categories: document.categories.iter().map(|category| self.rank_category(category)).collect(),
            trend_analysis: None,
            extra: Map::new(),
        }
    }
}
