//! Manual utility and pricing ratings.
//!
//! The tables are hand-maintained JSON maps from tool name to a loosely shaped record. They are
//! converted to typed records exactly once, here, so the scorers never look at raw JSON.

use camino::Utf8Path;
use serde_json::{Map, Value};
use std::collections::{BTreeMap, HashMap};
use std::fs;
use strum::{Display, EnumString};

const LOG_TARGET: &str = "ratings";

/// Field holding an explicit utility total.
const TOTAL_FIELD: &str = "total";

/// Field holding an explicit price score.
const SCORE_FIELD: &str = "score";

/// Field holding a pricing tier name.
const TIER_FIELD: &str = "tier";

/// A manual utility rating.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeatureRating {
    /// Explicit overall utility, used as-is when present.
    pub total: Option<f64>,

    /// Per-feature ratings, averaged when there is no total.
    pub features: BTreeMap<String, f64>,
}

impl FeatureRating {
    /// Convert a raw JSON record, keeping only numeric fields.
    #[must_use]
    pub fn from_json(fields: &Map<String, Value>) -> Self {
        Self {
            total: fields.get(TOTAL_FIELD).and_then(numeric),
            features: fields
                .iter()
                .filter(|(key, _)| key.as_str() != TOTAL_FIELD)
                .filter_map(|(key, value)| numeric(value).map(|n| (key.clone(), n)))
                .collect(),
        }
    }

    /// Utility in [0,100], or `None` when the record carries no numeric field at all.
    #[must_use]
    #[expect(clippy::cast_precision_loss, reason = "Feature counts are tiny")]
    pub fn score(&self) -> Option<f64> {
        if let Some(total) = self.total {
            return Some(total.clamp(0.0, 100.0));
        }

        if self.features.is_empty() {
            return None;
        }

        let sum: f64 = self.features.values().sum();
        Some((sum / self.features.len() as f64).clamp(0.0, 100.0))
    }
}

/// Named pricing tiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum PriceTier {
    Free,
    Freemium,
    Paid,
    Expensive,
}

impl PriceTier {
    /// Price score of the tier; cheaper is better.
    #[must_use]
    pub const fn points(self) -> f64 {
        match self {
            Self::Free => 100.0,
            Self::Freemium => 70.0,
            Self::Paid => 40.0,
            Self::Expensive => 20.0,
        }
    }
}

/// A manual pricing rating.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PricingRating {
    /// Explicit price score, used as-is when present.
    pub score: Option<f64>,

    /// Tier name as written in the table.
    pub tier: Option<String>,
}

impl PricingRating {
    /// Convert a raw JSON record.
    ///
    /// A non-string tier is kept in its JSON form so it reads as an unrecognized tier.
    #[must_use]
    pub fn from_json(fields: &Map<String, Value>) -> Self {
        Self {
            score: fields.get(SCORE_FIELD).and_then(numeric),
            tier: fields.get(TIER_FIELD).map(|value| match value {
                Value::String(text) => text.clone(),
                other => other.to_string(),
            }),
        }
    }

    /// Price in [0,100].
    ///
    /// An explicit score wins, then the tier. A record without a tier counts as `paid`; a tier
    /// that isn't recognized scores 50.
    #[must_use]
    pub fn score(&self) -> f64 {
        if let Some(score) = self.score {
            return score.clamp(0.0, 100.0);
        }

        match &self.tier {
            None => PriceTier::Paid.points(),
            Some(tier) => tier.trim().parse::<PriceTier>().map_or(50.0, PriceTier::points),
        }
    }
}

/// Read-only manual rating tables, passed explicitly to the scorers.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ManualRatings {
    features: HashMap<String, FeatureRating>,
    pricing: HashMap<String, PricingRating>,
}

impl ManualRatings {
    /// Convert raw JSON tables. Malformed tables and entries are skipped with a warning.
    #[must_use]
    pub fn from_json(features: &Value, pricing: &Value) -> Self {
        Self {
            features: convert_table("features", features, FeatureRating::from_json),
            pricing: convert_table("pricing", pricing, PricingRating::from_json),
        }
    }

    /// Load both tables from disk.
    ///
    /// A table that is not configured, missing or unreadable is treated as empty, so every tool
    /// falls back to the neutral default.
    #[must_use]
    pub fn load(features_path: Option<&Utf8Path>, pricing_path: Option<&Utf8Path>) -> Self {
        let features = read_table("features", features_path);
        let pricing = read_table("pricing", pricing_path);
        Self::from_json(&features, &pricing)
    }

    #[must_use]
    pub fn feature_rating(&self, tool: &str) -> Option<&FeatureRating> {
        self.features.get(tool)
    }

    #[must_use]
    pub fn pricing_rating(&self, tool: &str) -> Option<&PricingRating> {
        self.pricing.get(tool)
    }
}

fn numeric(value: &Value) -> Option<f64> {
    value.as_f64().filter(|n| n.is_finite())
}

fn read_table(table: &str, path: Option<&Utf8Path>) -> Value {
    let empty = Value::Object(Map::new());

    let Some(path) = path else {
        log::debug!(target: LOG_TARGET, "No {table} table configured");
        return empty;
    };

    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) => {
            log::warn!(target: LOG_TARGET, "Could not read {table} table '{path}': {e}");
            return empty;
        }
    };

    serde_json::from_str(&text).unwrap_or_else(|e| {
        log::warn!(target: LOG_TARGET, "Could not parse {table} table '{path}': {e}");
        empty
    })
}

fn convert_table<T>(table: &str, raw: &Value, convert: impl Fn(&Map<String, Value>) -> T) -> HashMap<String, T> {
    let Some(entries) = raw.as_object() else {
        log::warn!(target: LOG_TARGET, "The {table} table is not a JSON object, ignoring it");
        return HashMap::new();
    };

    let mut converted = HashMap::with_capacity(entries.len());
    for (tool, record) in entries {
        match record.as_object() {
            Some(fields) => {
                let _ = converted.insert(tool.clone(), convert(fields));
            }
            None => log::warn!(target: LOG_TARGET, "Ignoring {table} entry for '{tool}': not a JSON object"),
        }
    }

    converted
}

#[cfg(test)]
mod tests {
    use super::*;
    use camino::Utf8PathBuf;
    use serde_json::json;

    fn fields(value: &Value) -> &Map<String, Value> {
        value.as_object().unwrap()
    }

    #[test]
    fn test_feature_total_wins() {
        let raw = json!({"total": 85, "feature1": 90, "feature2": 80});
        let rating = FeatureRating::from_json(fields(&raw));
        assert_eq!(rating.total, Some(85.0));
        assert_eq!(rating.score(), Some(85.0));
    }

    #[test]
    fn test_feature_average() {
        let raw = json!({"feature1": 80, "feature2": 90, "feature3": 70, "notes": "solid"});
        let rating = FeatureRating::from_json(fields(&raw));
        assert_eq!(rating.features.len(), 3);
        assert_eq!(rating.score(), Some(80.0));
    }

    #[test]
    fn test_feature_total_is_clamped() {
        let raw = json!({"total": 150});
        assert_eq!(FeatureRating::from_json(fields(&raw)).score(), Some(100.0));
        let raw = json!({"total": -3});
        assert_eq!(FeatureRating::from_json(fields(&raw)).score(), Some(0.0));
    }

    #[test]
    fn test_feature_non_numeric_total_falls_back_to_average() {
        let raw = json!({"total": "high", "speed": 60, "accuracy": 80});
        let rating = FeatureRating::from_json(fields(&raw));
        assert_eq!(rating.total, None);
        assert_eq!(rating.score(), Some(70.0));
    }

    #[test]
    fn test_feature_without_numbers_has_no_score() {
        let raw = json!({"notes": "n/a", "beta": true});
        assert_eq!(FeatureRating::from_json(fields(&raw)).score(), None);
    }

    #[test]
    fn test_price_explicit_score() {
        let raw = json!({"score": 75, "tier": "freemium"});
        assert!((PricingRating::from_json(fields(&raw)).score() - 75.0).abs() < f64::EPSILON);
        let raw = json!({"score": 120});
        assert!((PricingRating::from_json(fields(&raw)).score() - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_price_tiers() {
        for (tier, expected) in [("free", 100.0), ("Freemium", 70.0), ("PAID", 40.0), ("expensive", 20.0), ("enterprise", 50.0)] {
            let raw = json!({ "tier": tier });
            let score = PricingRating::from_json(fields(&raw)).score();
            assert!((score - expected).abs() < f64::EPSILON, "{tier}: {score}");
        }
    }

    #[test]
    fn test_price_without_tier_counts_as_paid() {
        let raw = json!({"url": "https://example.com/pricing"});
        assert!((PricingRating::from_json(fields(&raw)).score() - 40.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_price_non_string_tier_is_unrecognized() {
        let raw = json!({"tier": 3});
        assert!((PricingRating::from_json(fields(&raw)).score() - 50.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_from_json_skips_malformed_entries() {
        let features = json!({"ToolX": {"total": 85}, "Broken": 12});
        let pricing = json!(["not", "a", "map"]);
        let ratings = ManualRatings::from_json(&features, &pricing);
        assert!(ratings.feature_rating("ToolX").is_some());
        assert!(ratings.feature_rating("Broken").is_none());
        assert!(ratings.pricing_rating("ToolX").is_none());
    }

    #[test]
    fn test_load_tolerates_missing_and_broken_files() {
        let tmp = tempfile::tempdir().unwrap();
        let root = Utf8PathBuf::try_from(tmp.path().to_path_buf()).unwrap();
        let broken = root.join("pricing.json");
        fs::write(&broken, "{ nope").unwrap();

        let ratings = ManualRatings::load(Some(&root.join("features.json")), Some(&broken));
        assert_eq!(ratings, ManualRatings::default());

        let ratings = ManualRatings::load(None, None);
        assert_eq!(ratings, ManualRatings::default());
    }

    #[test]
    fn test_load_reads_tables() {
        let tmp = tempfile::tempdir().unwrap();
        let root = Utf8PathBuf::try_from(tmp.path().to_path_buf()).unwrap();
        let features = root.join("features.json");
        let pricing = root.join("pricing.json");
        fs::write(&features, r#"{"Cursor": {"completion": 90, "chat": 80}}"#).unwrap();
        fs::write(&pricing, r#"{"Cursor": {"tier": "freemium"}}"#).unwrap();

        let ratings = ManualRatings::load(Some(&features), Some(&pricing));
        assert_eq!(ratings.feature_rating("Cursor").and_then(FeatureRating::score), Some(85.0));
        assert!((ratings.pricing_rating("Cursor").unwrap().score() - 70.0).abs() < f64::EPSILON);
    }
}
