//! Matching keys for tool names that drift between periods.

use regex::Regex;
use std::sync::LazyLock;

/// A version token preceded by whitespace: " 3.5", " v2", " 4.0".
static VERSION_TOKEN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)\s+v?\d+\.?\d*").expect("version pattern must compile"));

/// Canonicalize a display name into a matching key.
///
/// The key is never displayed. Version tokens are dropped, whitespace is collapsed and the
/// result is lowercased, so `"Claude 3.5  Sonnet"` becomes `"claude sonnet"`.
#[must_use]
pub fn normalize(name: &str) -> String {
    let stripped = VERSION_TOKEN.replace_all(name, "");
    stripped.split_whitespace().collect::<Vec<_>>().join(" ").to_lowercase()
}

/// Loose identity check between two display names.
///
/// Names match when their keys are equal or one key contains the other. This favors recall over
/// precision: `"GPT"` matches `"GPT-4 Vision"` even when they are meant to be different tools.
/// An empty key only matches another empty key.
#[must_use]
pub fn names_match(a: &str, b: &str) -> bool {
    keys_match(&normalize(a), &normalize(b))
}

pub(super) fn keys_match(a: &str, b: &str) -> bool {
    if a.is_empty() || b.is_empty() {
        return a == b;
    }

    a == b || a.contains(b) || b.contains(a)
}
