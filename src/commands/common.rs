use crate::config::Config;
use anyhow::{Context, Result};
use camino::{Utf8Path, Utf8PathBuf};
use clap::Args;
use std::env;

/// Arguments shared by every command that reads configuration.
#[derive(Args, Debug, Clone, Default)]
pub struct ConfigArgs {
    /// Configuration file (defaults to `toolpulse.yaml` in the current directory)
    #[arg(long, value_name = "PATH")]
    pub config: Option<Utf8PathBuf>,
}

impl ConfigArgs {
    pub fn load(&self) -> Result<Config> {
        let base_dir = current_dir()?;
        Config::load(&base_dir, self.config.as_deref())
    }
}

pub fn current_dir() -> Result<Utf8PathBuf> {
    let dir = env::current_dir().context("determining the current directory")?;
    Utf8PathBuf::try_from(dir).context("the current directory is not valid UTF-8")
}

/// Directory a snapshot file lives in, for locating its predecessor.
pub fn parent_dir(path: &Utf8Path) -> &Utf8Path {
    path.parent().filter(|p| !p.as_str().is_empty()).unwrap_or_else(|| Utf8Path::new("."))
}
