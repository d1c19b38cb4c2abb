use crate::config::{BuzzWeights, CompositeWeights, SentimentWeights, Weights};
use anyhow::{Context, Result};
use camino::{Utf8Path, Utf8PathBuf};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;

/// The default configuration YAML content, embedded from `default_config.yaml`
pub const DEFAULT_CONFIG_YAML: &str = include_str!("../../default_config.yaml");

/// Name of the configuration file looked up when none is given explicitly.
pub const CONFIG_FILE_NAME: &str = "toolpulse.yaml";

const LOG_TARGET: &str = "config";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Weights blending the four components into the final score
    #[serde(default)]
    pub weights: CompositeWeights,

    /// Weights blending the buzz signals
    #[serde(default)]
    pub buzz_weights: BuzzWeights,

    /// Weights blending the sentiment signals
    #[serde(default)]
    pub sentiment_weights: SentimentWeights,

    /// Directory where ranking snapshots are written and looked up
    #[serde(default = "default_output_dir")]
    pub output_dir: Utf8PathBuf,

    /// Manual utility ratings table
    #[serde(default)]
    pub features_file: Option<Utf8PathBuf>,

    /// Manual pricing ratings table
    #[serde(default)]
    pub pricing_file: Option<Utf8PathBuf>,
}

fn default_output_dir() -> Utf8PathBuf {
    Utf8PathBuf::from("output")
}

impl Config {
    /// Load configuration from a file or use defaults
    ///
    /// Without an explicit path, `toolpulse.yaml` in `base_dir` is used when present.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed or fails validation
    pub fn load(base_dir: &Utf8Path, config_path: Option<&Utf8Path>) -> Result<Self> {
        let (final_path, text) = if let Some(path) = config_path {
            let text = fs::read_to_string(path).with_context(|| format!("reading configuration file '{path}'"))?;
            (path.to_path_buf(), text)
        } else {
            let path = base_dir.join(CONFIG_FILE_NAME);
            match fs::read_to_string(&path) {
                Ok(text) => (path, text),
                Err(e) if e.kind() == io::ErrorKind::NotFound => {
                    log::debug!(target: LOG_TARGET, "No '{path}' found, using the default configuration");
                    return Ok(Self::default());
                }
                Err(e) => return Err(e).with_context(|| format!("reading configuration file '{path}'")),
            }
        };

        let config: Self = serde_yaml::from_str(&text).with_context(|| format!("parsing configuration file '{final_path}'"))?;
        for warning in config.validate().with_context(|| format!("validating configuration file '{final_path}'"))? {
            log::warn!(target: LOG_TARGET, "{warning}");
        }

        Ok(config)
    }

    /// Save the default configuration to a YAML file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written
    pub fn save_default(output_path: &Utf8Path) -> Result<()> {
        fs::write(output_path, DEFAULT_CONFIG_YAML).with_context(|| format!("writing default configuration to '{output_path}'"))?;
        Ok(())
    }

    /// Validate configuration values and collect warnings
    ///
    /// # Errors
    ///
    /// Returns an error if a weight is negative or not finite
    pub fn validate(&self) -> Result<Vec<String>> {
        let mut warnings = self.weights.validate()?;
        warnings.extend(self.buzz_weights.validate()?);
        warnings.extend(self.sentiment_weights.validate()?);
        Ok(warnings)
    }
}

impl Default for Config {
    fn default() -> Self {
        serde_yaml::from_str(DEFAULT_CONFIG_YAML).expect("default_config.yaml should be valid YAML that deserializes to Config")
    }
}
