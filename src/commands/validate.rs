use super::Host;
use super::common::ConfigArgs;
use crate::snapshot::store;
use anyhow::Result;
use camino::Utf8PathBuf;
use clap::Args;
use std::io::Write;

#[derive(Args, Debug, Clone)]
pub struct ValidateArgs {
    #[command(flatten)]
    pub config: ConfigArgs,

    /// Snapshots to check as well
    #[arg(long, value_name = "PATH")]
    pub snapshot: Vec<Utf8PathBuf>,
}

/// Check the configuration and any given snapshots, listing what looks wrong.
///
/// Configuration errors fail the command. Weight sums and snapshot shape problems are reported
/// but don't.
///
/// # Errors
///
/// Returns an error if the configuration is invalid or a snapshot can't be read
pub fn validate_inputs(host: &mut impl Host, args: &ValidateArgs) -> Result<()> {
    let config = args.config.load()?;
    let mut out = host.output();

    let warnings = config.validate()?;
    let source = args.config.config.as_ref().map_or_else(|| "configuration".to_string(), |p| format!("'{p}'"));
    if warnings.is_empty() {
        writeln!(out, "{source} is valid")?;
    } else {
        writeln!(out, "{source} is valid with {} warning(s):", warnings.len())?;
        for warning in &warnings {
            writeln!(out, "  - {warning}")?;
        }
    }

    for path in &args.snapshot {
        let issues = store::load_snapshot(path)?.validate();
        if issues.is_empty() {
            writeln!(out, "'{path}' looks good")?;
        } else {
            writeln!(out, "'{path}' has {} issue(s):", issues.len())?;
            for issue in &issues {
                writeln!(out, "  - {issue}")?;
            }
        }
    }

    Ok(())
}
