use core::cmp::Ordering;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use strum::{Display, EnumIter};

/// Movement of a tool between two consecutive snapshots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum TrendStatus {
    New,
    Rising,
    Falling,
    Stable,
    Disappeared,
}

/// Trend annotation attached to a ranked item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trend {
    pub status: TrendStatus,
    pub previous_rank: Option<u32>,

    /// Positive when the tool moved up (its rank number got smaller).
    pub rank_change: Option<i64>,
}

impl Trend {
    /// A tool with no counterpart in the previous period.
    #[must_use]
    pub const fn new_entry() -> Self {
        Self {
            status: TrendStatus::New,
            previous_rank: None,
            rank_change: None,
        }
    }

    /// A tool matched to its previous-period counterpart.
    #[must_use]
    pub fn moved(previous_rank: u32, current_rank: u32) -> Self {
        let rank_change = i64::from(previous_rank) - i64::from(current_rank);
        let status = match rank_change.cmp(&0) {
            Ordering::Greater => TrendStatus::Rising,
            Ordering::Less => TrendStatus::Falling,
            Ordering::Equal => TrendStatus::Stable,
        };

        Self {
            status,
            previous_rank: Some(previous_rank),
            rank_change: Some(rank_change),
        }
    }

    /// A previous-period tool missing from the current ranking.
    #[must_use]
    pub const fn disappeared(previous_rank: u32) -> Self {
        Self {
            status: TrendStatus::Disappeared,
            previous_rank: Some(previous_rank),
            rank_change: None,
        }
    }
}

/// Trend data for a whole snapshot, keyed by category slug then tool name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrendAnalysis {
    pub has_previous_data: bool,
    pub previous_period: Option<String>,
    pub trends: BTreeMap<String, BTreeMap<String, Trend>>,
}

impl TrendAnalysis {
    /// Look up the trend of a tool in a category.
    #[must_use]
    pub fn get(&self, slug: &str, name: &str) -> Option<&Trend> {
        self.trends.get(slug).and_then(|category| category.get(name))
    }

    /// Tools of a category that were ranked last period but not this one, best previous rank first.
    #[must_use]
    pub fn disappeared(&self, slug: &str) -> Vec<(&str, u32)> {
        let mut gone: Vec<_> = self
            .trends
            .get(slug)
            .into_iter()
            .flatten()
            .filter(|(_, trend)| trend.status == TrendStatus::Disappeared)
            .map(|(name, trend)| (name.as_str(), trend.previous_rank.unwrap_or(0)))
            .collect();
        gone.sort_by_key(|(_, rank)| *rank);
        gone
    }
}
