//! The persisted, period-tagged output of one scoring run.

use crate::metrics::Component;
use crate::ranking::ComponentScores;
use crate::trends::{Trend, TrendAnalysis, names_match};
use serde::de::{DeserializeOwned, Deserializer};
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashSet;

/// Minimum number of ranked items a category is expected to carry.
const MIN_ITEMS_PER_CATEGORY: usize = 3;

/// Rankings for every category of one period.
///
/// Fields this crate doesn't know about (summaries, evidence, medals from the LLM ranking step)
/// are kept in `extra` so rewriting a snapshot only ever adds trend annotations.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RankingSnapshot {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub period: String,

    #[serde(default)]
    pub categories: Vec<CategoryRanking>,

    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient")]
    pub trend_analysis: Option<TrendAnalysis>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// The key a category's ranked items are stored under.
///
/// The LLM ranking step writes `top3`; a rewrite keeps whichever key the file used.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ListKey {
    #[default]
    Items,
    Top3,
}

impl ListKey {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Items => "items",
            Self::Top3 => "top3",
        }
    }
}

/// The ordered ranking of one category.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(from = "CategoryRankingRepr")]
pub struct CategoryRanking {
    pub slug: String,
    pub name: String,
    pub items: Vec<RankedItem>,
    pub list_key: ListKey,
    pub extra: Map<String, Value>,
}

/// On-disk shape of a category, accepting either list key.
#[derive(Deserialize)]
struct CategoryRankingRepr {
    #[serde(default)]
    slug: String,

    #[serde(default)]
    name: String,

    #[serde(default)]
    items: Option<Vec<RankedItem>>,

    #[serde(default)]
    top3: Option<Vec<RankedItem>>,

    #[serde(flatten)]
    extra: Map<String, Value>,
}

impl From<CategoryRankingRepr> for CategoryRanking {
    fn from(repr: CategoryRankingRepr) -> Self {
        let mut extra = repr.extra;
        let (items, list_key) = match (repr.items, repr.top3) {
            (Some(items), top3) => {
                // Both lists present: rank from `items`, carry `top3` through untouched
                if let Some(value) = top3.and_then(|top3| serde_json::to_value(top3).ok()) {
                    let _ = extra.insert(ListKey::Top3.as_str().to_string(), value);
                }
                (items, ListKey::Items)
            }
            (None, Some(top3)) => (top3, ListKey::Top3),
            (None, None) => (Vec::new(), ListKey::Items),
        };

        Self {
            slug: repr.slug,
            name: repr.name,
            items,
            list_key,
            extra,
        }
    }
}

impl Serialize for CategoryRanking {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(None)?;
        if !self.slug.is_empty() {
            map.serialize_entry("slug", &self.slug)?;
        }
        if !self.name.is_empty() {
            map.serialize_entry("name", &self.name)?;
        }
        map.serialize_entry(self.list_key.as_str(), &self.items)?;
        for (key, value) in &self.extra {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

/// One ranked tool.
///
/// Scores are absent on items written by the LLM ranking step and stay absent on a rewrite.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RankedItem {
    #[serde(default)]
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub final_score: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub buzz: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sentiment: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub utility: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,

    #[serde(default)]
    pub rank: u32,

    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient")]
    pub trend: Option<Trend>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Old trend annotations are recomputed on every run, so a malformed one is dropped instead of
/// failing the whole document.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| serde_json::from_value(v).ok()))
}

impl RankedItem {
    /// Build an unranked item from its component scores.
    #[must_use]
    pub fn new(name: impl Into<String>, provider: impl Into<String>, final_score: f64, scores: ComponentScores) -> Self {
        let provider = provider.into();
        Self {
            name: name.into(),
            provider: (!provider.is_empty()).then_some(provider),
            final_score: Some(final_score),
            buzz: Some(scores.buzz),
            sentiment: Some(scores.sentiment),
            utility: Some(scores.utility),
            price: Some(scores.price),
            rank: 0,
            trend: None,
            extra: Map::new(),
        }
    }

    #[must_use]
    pub const fn component(&self, component: Component) -> Option<f64> {
        match component {
            Component::Buzz => self.buzz,
            Component::Sentiment => self.sentiment,
            Component::Utility => self.utility,
            Component::Price => self.price,
        }
    }
}

impl RankingSnapshot {
    /// Find a category by slug.
    #[must_use]
    pub fn category(&self, slug: &str) -> Option<&CategoryRanking> {
        self.categories.iter().find(|c| c.slug == slug)
    }

    /// Check the snapshot's shape and return human-readable issues.
    ///
    /// Issues never make a snapshot unusable; they are meant for logging.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut issues = Vec::new();

        if self.categories.is_empty() {
            issues.push("snapshot has no categories".to_string());
            return issues;
        }

        for category in &self.categories {
            let label = if category.name.is_empty() { &category.slug } else { &category.name };

            if category.slug.is_empty() {
                issues.push(format!("category '{label}' has no slug"));
            }

            if category.items.len() < MIN_ITEMS_PER_CATEGORY {
                issues.push(format!(
                    "category '{label}' has {} ranked item(s), expected at least {MIN_ITEMS_PER_CATEGORY}",
                    category.items.len()
                ));
            }

            let mut seen_ranks = HashSet::new();
            for item in &category.items {
                if item.name.trim().is_empty() {
                    issues.push(format!("item ranked #{} in '{label}' has no name", item.rank));
                }

                if !seen_ranks.insert(item.rank) {
                    issues.push(format!("rank #{} appears more than once in '{label}'", item.rank));
                }
            }

            for (i, item) in category.items.iter().enumerate() {
                for other in &category.items[i + 1..] {
                    if names_match(&item.name, &other.name) {
                        issues.push(format!(
                            "'{}' and '{}' in '{label}' match the same tool name, their trends can be mixed up",
                            item.name, other.name
                        ));
                    }
                }
            }
        }

        issues
    }
}
