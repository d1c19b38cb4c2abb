//! Reading and writing `rankings_<period>.json` files.

use super::{Period, RankingSnapshot};
use anyhow::{Context, Result};
use camino::{Utf8Path, Utf8PathBuf};
use std::fs;
use std::io;

const LOG_TARGET: &str = "snapshot";

/// File name of the snapshot for `period`.
#[must_use]
pub fn snapshot_file_name(period: Period) -> String {
    format!("rankings_{period}.json")
}

/// Sample snapshots shipped for bootstrapping carry an `_example` suffix.
fn example_file_name(period: Period) -> String {
    format!("rankings_{period}_example.json")
}

/// Path of the snapshot for `period` inside `output_dir`.
#[must_use]
pub fn snapshot_path(output_dir: &Utf8Path, period: Period) -> Utf8PathBuf {
    output_dir.join(snapshot_file_name(period))
}

/// Read a snapshot file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed
pub fn load_snapshot(path: &Utf8Path) -> Result<RankingSnapshot> {
    let text = fs::read_to_string(path).with_context(|| format!("reading snapshot '{path}'"))?;
    serde_json::from_str(&text).with_context(|| format!("parsing snapshot '{path}'"))
}

/// Find the snapshot of the month before `current`.
///
/// Returns `None` when there is no usable previous snapshot. Nothing here is fatal: a snapshot
/// that exists but can't be read or parsed is reported and then ignored.
#[must_use]
pub fn load_previous(output_dir: &Utf8Path, current: Period) -> Option<RankingSnapshot> {
    let previous = current.previous();

    for name in [snapshot_file_name(previous), example_file_name(previous)] {
        let path = output_dir.join(name);
        match fs::read_to_string(&path) {
            Ok(text) => {
                return match serde_json::from_str::<RankingSnapshot>(&text) {
                    Ok(mut snapshot) => {
                        if snapshot.period.is_empty() {
                            snapshot.period = previous.to_string();
                        }
                        log::info!(target: LOG_TARGET, "Comparing against previous snapshot '{path}'");
                        Some(snapshot)
                    }
                    Err(e) => {
                        log::warn!(target: LOG_TARGET, "Ignoring unparsable previous snapshot '{path}': {e}");
                        None
                    }
                };
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => {
                log::warn!(target: LOG_TARGET, "Ignoring unreadable previous snapshot '{path}': {e}");
                return None;
            }
        }
    }

    log::info!(target: LOG_TARGET, "No snapshot for {previous} in '{output_dir}', all tools will be new");
    None
}

/// Serialize a snapshot as pretty JSON with a trailing newline.
///
/// # Errors
///
/// Returns an error if the snapshot cannot be serialized
pub fn to_json(snapshot: &RankingSnapshot) -> Result<String> {
    let mut text = serde_json::to_string_pretty(snapshot).context("serializing snapshot")?;
    text.push('\n');
    Ok(text)
}

/// Write `snapshot` to `path`, creating parent directories as needed.
///
/// # Errors
///
/// Returns an error if the directory or file cannot be written
pub fn write_snapshot(path: &Utf8Path, snapshot: &RankingSnapshot) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_str().is_empty()
    {
        fs::create_dir_all(parent).with_context(|| format!("creating directory '{parent}'"))?;
    }

    fs::write(path, to_json(snapshot)?).with_context(|| format!("writing snapshot '{path}'"))?;
    log::info!(target: LOG_TARGET, "Wrote snapshot '{path}'");
    Ok(())
}

/// Write `snapshot` under its own period's file name in `output_dir`.
///
/// # Errors
///
/// Returns an error if the snapshot's period is malformed or the file cannot be written
pub fn save_snapshot(output_dir: &Utf8Path, snapshot: &RankingSnapshot) -> Result<Utf8PathBuf> {
    let period: Period = snapshot.period.parse().with_context(|| format!("snapshot period '{}'", snapshot.period))?;
    let path = snapshot_path(output_dir, period);
    write_snapshot(&path, snapshot)?;
    Ok(path)
}
