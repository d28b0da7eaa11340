// ⚙️ Configuration - JSON settings with built-in defaults
//
// Every field is optional in the file; missing fields take the defaults below.
// Command-line flags override whatever is loaded here.

use crate::analytics::REFERENCE_RISK_THRESHOLD;
use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

pub const DEFAULT_DATA_FILE: &str = "academic_records.csv";
pub const DEFAULT_REPORT_TOP_N: usize = 10;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Averages strictly below this count as at risk
    pub risk_threshold: f64,

    /// Interchange file the CLI loads and saves
    pub data_file: PathBuf,

    /// How many ranked students the text report shows
    pub report_top_n: usize,
}

impl Config {
    pub fn new() -> Self {
        Config {
            risk_threshold: REFERENCE_RISK_THRESHOLD,
            data_file: PathBuf::from(DEFAULT_DATA_FILE),
            report_top_n: DEFAULT_REPORT_TOP_N,
        }
    }

    /// Load config from JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {:?}", path.as_ref()))?;

        let config: Config =
            serde_json::from_str(&content).context("Failed to parse config JSON")?;
        config.validate()?;

        debug!(path = ?path.as_ref(), "config loaded");
        Ok(config)
    }

    /// Defaults when no path is given, otherwise the file (which must exist)
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::new()),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if !self.risk_threshold.is_finite() {
            bail!("risk_threshold must be a finite number");
        }
        if self.data_file.as_os_str().is_empty() {
            bail!("data_file must not be empty");
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = Config::load(None).unwrap();
        assert_eq!(config.risk_threshold, 3.0);
        assert_eq!(config.data_file, PathBuf::from("academic_records.csv"));
        assert_eq!(config.report_top_n, 10);
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"risk_threshold": 3.5}}"#).unwrap();

        let config = Config::from_file(file.path()).unwrap();

        assert_eq!(config.risk_threshold, 3.5);
        assert_eq!(config.report_top_n, 10);
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let err = Config::load(Some(Path::new("/no/such/config.json"))).unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }

    #[test]
    fn test_malformed_json_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{ not json").unwrap();

        let err = Config::from_file(file.path()).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config JSON"));
    }
}
