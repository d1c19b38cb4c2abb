//! The signals file handed over by the collection layer.

use super::SignalBundle;
use super::signal_bundle::lenient_record;
use crate::snapshot::Period;
use anyhow::{Context, Result};
use camino::Utf8Path;
use serde::{Deserialize, Serialize};
use std::fs;

/// Raw signals for every tracked tool of a run, grouped by category.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SignalsDocument {
    #[serde(default)]
    pub period: Option<Period>,

    #[serde(default)]
    pub categories: Vec<CategorySignals>,
}

/// The tracked tools of one category. Together they form the population for percentile ranking.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CategorySignals {
    pub slug: String,

    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub tools: Vec<ToolSignals>,
}

/// One tracked tool and its raw signals.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ToolSignals {
    pub name: String,

    #[serde(default)]
    pub provider: String,

    #[serde(default, deserialize_with = "lenient_record")]
    pub signals: SignalBundle,
}

impl SignalsDocument {
    /// Read a signals document from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not a valid signals document
    pub fn load(path: &Utf8Path) -> Result<Self> {
        let text = fs::read_to_string(path).with_context(|| format!("reading signals file '{path}'"))?;
        serde_json::from_str(&text).with_context(|| format!("parsing signals file '{path}'"))
    }

    /// Total number of tools across all categories.
    #[must_use]
    pub fn tool_count(&self) -> usize {
        self.categories.iter().map(|c| c.tools.len()).sum()
    }
}

impl CategorySignals {
    /// The signal bundles of every tool in the category, in input order.
    pub fn population(&self) -> impl Iterator<Item = &SignalBundle> {
        self.tools.iter().map(|tool| &tool.signals)
    }
}
