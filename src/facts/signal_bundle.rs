use serde::de::{DeserializeOwned, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::Value;

const LOG_TARGET: &str = "signals";

/// Per-tool raw metrics from every data provider for one period.
///
/// Every sub-record is optional on the wire; a missing, `null` or malformed one reads as all-zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SignalBundle {
    #[serde(default, deserialize_with = "lenient_record")]
    pub github: GithubData,

    #[serde(default, deserialize_with = "lenient_record")]
    pub hn: MentionData,

    #[serde(default, deserialize_with = "lenient_record")]
    pub reddit: MentionData,
}

/// Repository statistics collected from GitHub.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GithubData {
    #[serde(deserialize_with = "lenient_count")]
    pub stars: u64,

    /// Star count roughly 30 days before collection, when history is available.
    #[serde(deserialize_with = "lenient_optional_count")]
    pub stars_30d_ago: Option<u64>,

    #[serde(deserialize_with = "lenient_count")]
    pub open_issues: u64,

    #[serde(deserialize_with = "lenient_count")]
    pub closed_issues: u64,
}

/// Mentions of a tool on a discussion site.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MentionData {
    #[serde(deserialize_with = "lenient_count")]
    pub mentions_count: u64,

    /// Raw comment and post text, fed to sentiment analysis.
    #[serde(deserialize_with = "lenient_texts")]
    pub comments: Vec<String>,
}

impl GithubData {
    /// Star growth over the last ~30 days, in percent.
    ///
    /// Only defined when a positive baseline is known; a missing or zero baseline is not zero growth.
    #[must_use]
    #[expect(clippy::cast_precision_loss, reason = "Star counts are far below 2^52")]
    pub fn star_growth(&self) -> Option<f64> {
        let baseline = self.stars_30d_ago.filter(|&stars| stars > 0)? as f64;
        Some((self.stars as f64 - baseline) / baseline * 100.0)
    }

    /// Share of closed issues, in [0,1]; 0.5 when the repository has no issues at all.
    #[must_use]
    #[expect(clippy::cast_precision_loss, reason = "Issue counts are far below 2^52")]
    pub fn issue_health(&self) -> f64 {
        let total = self.open_issues.saturating_add(self.closed_issues);
        if total == 0 {
            0.5
        } else {
            self.closed_issues as f64 / total as f64
        }
    }
}

/// Read a record, falling back to its default when it is `null` or has the wrong shape.
pub(super) fn lenient_record<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    if value.is_null() {
        return Ok(T::default());
    }

    Ok(T::deserialize(value).unwrap_or_else(|e| {
        log::warn!(target: LOG_TARGET, "Ignoring malformed signal record: {e}");
        T::default()
    }))
}

/// A non-negative count from an integer, an integral float or a numeric string.
#[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss, reason = "Range is checked before the cast")]
fn count_from_value(value: &Value) -> Option<u64> {
    match value {
        Value::Number(number) => number.as_u64().or_else(|| {
            number
                .as_f64()
                .filter(|f| f.is_finite() && *f >= 0.0 && f.fract() == 0.0 && *f < 2f64.powi(53))
                .map(|f| f as u64)
        }),
        Value::String(text) => text.trim().parse().ok(),
        _ => None,
    }
}

fn lenient_count<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(count_from_value(&value).unwrap_or_else(|| {
        log::warn!(target: LOG_TARGET, "Ignoring malformed count {value}, using 0");
        0
    }))
}

/// Like [`lenient_count`], but `null` means "not collected" and stays `None` quietly.
fn lenient_optional_count<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    if value.is_null() {
        return Ok(None);
    }

    let count = count_from_value(&value);
    if count.is_none() {
        log::warn!(target: LOG_TARGET, "Ignoring malformed count {value}");
    }
    Ok(count)
}

/// Keep the string entries of a text list and drop anything else.
fn lenient_texts<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    let texts = match value {
        Value::Null => Vec::new(),
        Value::Array(entries) => {
            let total = entries.len();
            let texts: Vec<String> = entries
                .into_iter()
                .filter_map(|entry| match entry {
                    Value::String(text) => Some(text),
                    _ => None,
                })
                .collect();
            if texts.len() < total {
                log::warn!(target: LOG_TARGET, "Ignoring {} non-text comment(s)", total - texts.len());
            }
            texts
        }
        other => {
            log::warn!(target: LOG_TARGET, "Ignoring malformed comment list {other}");
            Vec::new()
        }
    };
    Ok(texts)
}
