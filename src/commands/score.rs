use super::Host;
use super::common::ConfigArgs;
use crate::facts::{LexiconAnalyzer, ManualRatings, SignalsDocument};
use crate::misc::ColorMode;
use crate::ranking::Ranker;
use crate::reports;
use crate::snapshot::{Period, store};
use crate::trends;
use anyhow::Result;
use camino::Utf8PathBuf;
use clap::Args;
use std::io::Write;

const LOG_TARGET: &str = "score";

#[derive(Args, Debug, Clone)]
pub struct ScoreArgs {
    /// Signals file produced by the collection step
    #[arg(long, value_name = "PATH")]
    pub signals: Utf8PathBuf,

    /// Period being ranked, as YYYY-MM (defaults to the signals file's period, then the current month)
    #[arg(long, value_name = "YYYY-MM")]
    pub period: Option<Period>,

    #[command(flatten)]
    pub config: ConfigArgs,

    /// Manual utility ratings (overrides `features_file` from the configuration)
    #[arg(long, value_name = "PATH")]
    pub features: Option<Utf8PathBuf>,

    /// Manual pricing ratings (overrides `pricing_file` from the configuration)
    #[arg(long, value_name = "PATH")]
    pub pricing: Option<Utf8PathBuf>,

    /// Directory for snapshots (overrides `output_dir` from the configuration)
    #[arg(long, value_name = "PATH")]
    pub output_dir: Option<Utf8PathBuf>,

    /// Compute and print rankings without writing the snapshot
    #[arg(long)]
    pub dry_run: bool,

    #[arg(long, value_enum, default_value_t = ColorMode::Auto)]
    pub color: ColorMode,
}

/// Rank every tool of a signals file, annotate trends against last month and save the snapshot.
///
/// # Errors
///
/// Returns an error if the configuration or signals file is unusable, or the snapshot can't be written
pub fn score_tools(host: &mut impl Host, args: &ScoreArgs) -> Result<()> {
    let config = args.config.load()?;
    let output_dir = args.output_dir.clone().unwrap_or_else(|| config.output_dir.clone());
    let ratings = ManualRatings::load(
        args.features.as_deref().or(config.features_file.as_deref()),
        args.pricing.as_deref().or(config.pricing_file.as_deref()),
    );

    let document = SignalsDocument::load(&args.signals)?;
    let period = args.period.or(document.period).unwrap_or_else(Period::current);
    log::info!(
        target: LOG_TARGET,
        "Scoring {} tools in {} categories for {period}",
        document.tool_count(),
        document.categories.len()
    );

    let analyzer = LexiconAnalyzer::default();
    let mut snapshot = Ranker::new(&config, &ratings, &analyzer).rank_document(&document, period);

    let previous = store::load_previous(&output_dir, period);
    trends::annotate(&mut snapshot, previous.as_ref());

    for issue in snapshot.validate() {
        log::warn!(target: LOG_TARGET, "{issue}");
    }

    reports::generate_console(&snapshot, args.color.enabled(), &mut host.output())?;

    if args.dry_run {
        return Ok(());
    }

    let path = store::save_snapshot(&output_dir, &snapshot)?;
    writeln!(host.output(), "Snapshot written to '{path}'")?;
    Ok(())
}
