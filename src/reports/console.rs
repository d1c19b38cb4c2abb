//! Plain-text summary of a ranking snapshot.

use crate::metrics::Component;
use crate::snapshot::{CategoryRanking, RankedItem, RankingSnapshot};
use crate::trends::{Trend, TrendAnalysis, TrendStatus};
use anyhow::Result;
use owo_colors::{OwoColorize, Style};
use std::io::Write;
use strum::IntoEnumIterator;

fn styled(text: &str, style: Style, use_colors: bool) -> String {
    if use_colors { text.style(style).to_string() } else { text.to_string() }
}

fn trend_marker(trend: Option<&Trend>, use_colors: bool) -> String {
    let Some(trend) = trend else {
        return String::new();
    };

    match (trend.status, trend.rank_change) {
        (TrendStatus::New, _) => styled("NEW", Style::new().cyan().bold(), use_colors),
        (TrendStatus::Rising, Some(change)) => styled(&format!("▲ +{change}"), Style::new().green(), use_colors),
        (TrendStatus::Falling, Some(change)) => styled(&format!("▼ {change}"), Style::new().red(), use_colors),
        (TrendStatus::Stable, _) => styled("=", Style::new().dimmed(), use_colors),
        (TrendStatus::Rising | TrendStatus::Falling, None) | (TrendStatus::Disappeared, _) => String::new(),
    }
}

fn item_label(item: &RankedItem) -> String {
    match item.provider.as_deref() {
        Some(provider) if !provider.is_empty() && provider != item.name => format!("{} ({provider})", item.name),
        _ => item.name.clone(),
    }
}

fn format_score(score: Option<f64>) -> String {
    score.map_or_else(|| "-".to_string(), |score| format!("{score:.1}"))
}

fn write_item(writer: &mut impl Write, item: &RankedItem, name_width: usize, use_colors: bool) -> Result<()> {
    let label = item_label(item);

    writeln!(
        writer,
        "  {:>3}. {label:<name_width$}  {:>5}  {}",
        item.rank,
        format_score(item.final_score),
        trend_marker(item.trend.as_ref(), use_colors)
    )?;

    // Items from the LLM ranking step carry no component scores
    let breakdown: Vec<_> = Component::iter()
        .filter_map(|component| item.component(component).map(|score| format!("{component} {score:.1}")))
        .collect();
    if !breakdown.is_empty() {
        writeln!(writer, "       {}", breakdown.join("  "))?;
    }

    Ok(())
}

fn write_category(writer: &mut impl Write, category: &CategoryRanking, analysis: Option<&TrendAnalysis>, use_colors: bool) -> Result<()> {
    let title = if category.name.is_empty() { &category.slug } else { &category.name };
    writeln!(writer, "{}", styled(title, Style::new().bold(), use_colors))?;

    if category.items.is_empty() {
        writeln!(writer, "  (no tools)")?;
    }

    let name_width = category
        .items
        .iter()
        .map(|item| item_label(item).chars().count())
        .max()
        .unwrap_or(0);

    for item in &category.items {
        write_item(writer, item, name_width, use_colors)?;
    }

    if let Some(analysis) = analysis {
        for (name, previous_rank) in analysis.disappeared(&category.slug) {
            writeln!(
                writer,
                "       {} {name} (was #{previous_rank})",
                styled("gone", Style::new().yellow(), use_colors)
            )?;
        }
    }

    writeln!(writer)?;
    Ok(())
}

/// Write a human-readable summary of `snapshot` to `writer`.
///
/// # Errors
///
/// Returns an error if writing fails
pub fn generate(snapshot: &RankingSnapshot, use_colors: bool, writer: &mut impl Write) -> Result<()> {
    let analysis = snapshot.trend_analysis.as_ref();

    match analysis {
        Some(analysis) if analysis.has_previous_data => writeln!(
            writer,
            "Rankings for {} (compared with {})",
            snapshot.period,
            analysis.previous_period.as_deref().unwrap_or("unknown")
        )?,
        _ => writeln!(writer, "Rankings for {}", snapshot.period)?,
    }
    writeln!(writer)?;

    for category in &snapshot.categories {
        write_category(writer, category, analysis, use_colors)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn item(name: &str, rank: u32, trend: Trend) -> RankedItem {
        RankedItem {
            name: name.to_string(),
            provider: Some("Acme".to_string()),
            rank,
            final_score: Some(90.0 - f64::from(rank)),
            buzz: Some(50.0),
            sentiment: Some(50.0),
            utility: Some(50.0),
            price: Some(50.0),
            trend: Some(trend),
            ..RankedItem::default()
        }
    }

    fn sample() -> RankingSnapshot {
        let mut trends = BTreeMap::new();
        let _ = trends.insert("Dropped".to_string(), Trend::disappeared(2));

        RankingSnapshot {
            period: "2025-03".to_string(),
            categories: vec![CategoryRanking {
                slug: "chat".to_string(),
                name: "Chat".to_string(),
                items: vec![
                    item("Climber", 1, Trend::moved(4, 1)),
                    item("Steady", 2, Trend::moved(2, 2)),
                    item("Slider", 3, Trend::moved(1, 3)),
                    item("Fresh", 4, Trend::new_entry()),
                ],
                ..CategoryRanking::default()
            }],
            trend_analysis: Some(TrendAnalysis {
                has_previous_data: true,
                previous_period: Some("2025-02".to_string()),
                trends: BTreeMap::from([("chat".to_string(), trends)]),
            }),
            ..RankingSnapshot::default()
        }
    }

    fn render(snapshot: &RankingSnapshot, use_colors: bool) -> String {
        let mut out = Vec::new();
        generate(snapshot, use_colors, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_plain_output() {
        let text = render(&sample(), false);
        assert!(text.starts_with("Rankings for 2025-03 (compared with 2025-02)\n"));
        assert!(text.contains("Climber (Acme)"));
        assert!(text.contains("▲ +3"));
        assert!(text.contains("▼ -2"));
        assert!(text.contains("NEW"));
        assert!(text.contains("buzz 50.0  sentiment 50.0  utility 50.0  price 50.0"));
        assert!(text.contains("gone Dropped (was #2)"));
        assert!(!text.contains('\u{1b}'));
    }

    #[test]
    fn test_colored_output() {
        let text = render(&sample(), true);
        assert!(text.contains('\u{1b}'));
        assert!(text.contains("NEW"));
    }

    #[test]
    fn test_without_previous_data() {
        let mut snapshot = sample();
        snapshot.trend_analysis = None;
        snapshot.categories[0].items.clear();
        let text = render(&snapshot, false);
        assert!(text.starts_with("Rankings for 2025-03\n"));
        assert!(text.contains("(no tools)"));
    }

    #[test]
    fn test_columns_fit_printed_labels() {
        let unscored = |name: &str, rank: u32| RankedItem {
            name: name.to_string(),
            rank,
            ..RankedItem::default()
        };
        let mut snapshot = sample();
        snapshot.trend_analysis = None;
        snapshot.categories[0].items = vec![unscored("Ab", 1), unscored("Abcd", 2)];
        snapshot.categories[0].items[0].final_score = Some(10.0);

        let text = render(&snapshot, false);
        assert!(text.contains("    1. Ab     10.0"), "{text}");
        assert!(text.contains("    2. Abcd      -"), "{text}");
        assert!(!text.contains("buzz"), "{text}");
    }
}
