use super::Host;
use crate::config::{CONFIG_FILE_NAME, Config};
use anyhow::{Result, bail};
use camino::Utf8PathBuf;
use clap::Args;
use std::io::Write;

#[derive(Args, Debug, Clone)]
pub struct InitArgs {
    /// Where to write the configuration
    #[arg(long, value_name = "PATH", default_value = CONFIG_FILE_NAME)]
    pub output: Utf8PathBuf,

    /// Overwrite an existing file
    #[arg(long)]
    pub force: bool,
}

/// Write the default configuration so it can be customized.
///
/// # Errors
///
/// Returns an error if the file exists and `--force` wasn't given, or it can't be written
pub fn init_config(host: &mut impl Host, args: &InitArgs) -> Result<()> {
    if args.output.exists() && !args.force {
        bail!("'{}' already exists, use --force to overwrite it", args.output);
    }

    Config::save_default(&args.output)?;
    writeln!(host.output(), "Default configuration written to '{}'", args.output)?;
    Ok(())
}
