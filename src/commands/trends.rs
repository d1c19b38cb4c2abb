use super::Host;
use super::common::parent_dir;
use crate::misc::ColorMode;
use crate::reports;
use crate::snapshot::{Period, store};
use anyhow::{Context, Result};
use camino::Utf8PathBuf;
use clap::Args;
use std::io::Write;

#[derive(Args, Debug, Clone)]
pub struct TrendsArgs {
    /// Snapshot to annotate in place
    #[arg(long, value_name = "PATH")]
    pub snapshot: Utf8PathBuf,

    /// Snapshot to compare against (defaults to last month's snapshot next to `--snapshot`)
    #[arg(long, value_name = "PATH")]
    pub previous: Option<Utf8PathBuf>,

    #[arg(long, value_enum, default_value_t = ColorMode::Auto)]
    pub color: ColorMode,
}

/// Recompute the trend annotations of a snapshot, for instance one produced by the LLM ranking step.
///
/// # Errors
///
/// Returns an error if a snapshot can't be read or written, or the snapshot's period is malformed
pub fn update_trends(host: &mut impl Host, args: &TrendsArgs) -> Result<()> {
    let mut snapshot = store::load_snapshot(&args.snapshot)?;

    let previous = if let Some(path) = &args.previous {
        Some(store::load_snapshot(path)?)
    } else {
        let period: Period = snapshot
            .period
            .parse()
            .with_context(|| format!("period of snapshot '{}'", args.snapshot))?;
        store::load_previous(parent_dir(&args.snapshot), period)
    };

    crate::trends::annotate(&mut snapshot, previous.as_ref());
    store::write_snapshot(&args.snapshot, &snapshot)?;

    reports::generate_console(&snapshot, args.color.enabled(), &mut host.output())?;
    writeln!(host.output(), "Snapshot updated at '{}'", args.snapshot)?;
    Ok(())
}
