//! Stateless diff of two ranking snapshots.
//!
//! Trend state is never persisted; it is recomputed from the current snapshot and the previous
//! period's snapshot on every run.

use super::LOG_TARGET;
use super::name_key::{keys_match, normalize};
use super::{Trend, TrendAnalysis};
use crate::snapshot::{CategoryRanking, RankingSnapshot};
use std::collections::BTreeMap;

/// Classify every tool of `current` against `previous`.
#[must_use]
pub fn compare(current: &RankingSnapshot, previous: Option<&RankingSnapshot>) -> TrendAnalysis {
    let Some(previous) = previous else {
        log::info!(target: LOG_TARGET, "No previous rankings, every tool is new");
        let trends = current
            .categories
            .iter()
            .map(|category| (category.slug.clone(), all_new(category)))
            .collect();

        return TrendAnalysis {
            has_previous_data: false,
            previous_period: None,
            trends,
        };
    };

    let mut trends = BTreeMap::new();
    for category in &current.categories {
        let category_trends = match previous.category(&category.slug) {
            Some(previous_category) => compare_category(category, previous_category),
            None => {
                log::debug!(target: LOG_TARGET, "Category '{}' is new this period", category.slug);
                all_new(category)
            }
        };

        let _ = trends.insert(category.slug.clone(), category_trends);
    }

    let previous_period = if previous.period.is_empty() {
        "unknown".to_string()
    } else {
        previous.period.clone()
    };

    TrendAnalysis {
        has_previous_data: true,
        previous_period: Some(previous_period),
        trends,
    }
}

/// Attach trend annotations to every ranked item and the analysis to the snapshot itself.
pub fn annotate(snapshot: &mut RankingSnapshot, previous: Option<&RankingSnapshot>) {
    let analysis = compare(snapshot, previous);

    for category in &mut snapshot.categories {
        for item in &mut category.items {
            let trend = analysis.get(&category.slug, &item.name).copied().unwrap_or_else(Trend::new_entry);
            item.trend = Some(trend);
        }
    }

    snapshot.trend_analysis = Some(analysis);
}

fn all_new(category: &CategoryRanking) -> BTreeMap<String, Trend> {
    let mut trends = BTreeMap::new();
    for item in &category.items {
        record(&mut trends, category, &item.name, Trend::new_entry());
    }
    trends
}

/// Trends are keyed by display name, so a repeated name keeps only its last record.
fn record(trends: &mut BTreeMap<String, Trend>, category: &CategoryRanking, name: &str, trend: Trend) {
    if trends.insert(name.to_string(), trend).is_some() {
        log::warn!(
            target: LOG_TARGET,
            "'{name}' appears more than once in '{}', its entries share one trend record",
            category.slug
        );
    }
}

fn compare_category(current: &CategoryRanking, previous: &CategoryRanking) -> BTreeMap<String, Trend> {
    let current_keys: Vec<String> = current.items.iter().map(|item| normalize(&item.name)).collect();
    let previous_keys: Vec<String> = previous.items.iter().map(|item| normalize(&item.name)).collect();

    let mut trends = BTreeMap::new();

    for (item, key) in current.items.iter().zip(&current_keys) {
        let matched = previous
            .items
            .iter()
            .zip(&previous_keys)
            .find(|(_, previous_key)| keys_match(key, previous_key));

        let trend = match matched {
            Some((previous_item, _)) => Trend::moved(previous_item.rank, item.rank),
            None => Trend::new_entry(),
        };

        record(&mut trends, current, &item.name, trend);
    }

    for (previous_item, previous_key) in previous.items.iter().zip(&previous_keys) {
        let still_ranked = current_keys.iter().any(|key| keys_match(key, previous_key));
        if !still_ranked {
            log::debug!(target: LOG_TARGET, "'{}' dropped out of '{}'", previous_item.name, current.slug);
            let _ = trends
                .entry(previous_item.name.clone())
                .or_insert_with(|| Trend::disappeared(previous_item.rank));
        }
    }

    trends
}
