//! Runner configuration.
//!
//! Loaded from a TOML file such as
//!
//! ```toml
//! indent = "    "
//! format = "json"
//! ```
//!
//! Every field is optional; missing fields take their defaults.

use crate::error::TallyError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default indentation unit of the report: two spaces.
pub const DEFAULT_INDENT: &str = "  ";

/// How a front end presents finished runs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportFormat {
    /// The human-readable report only.
    #[default]
    Text,
    /// A JSON summary carrying the human-readable report as a field.
    Json,
}

/// Settings for a [`TestRunner`](crate::TestRunner).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunnerConfig {
    /// One level of report indentation.
    pub indent: String,
    pub format: ReportFormat,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            indent: DEFAULT_INDENT.to_string(),
            format: ReportFormat::Text,
        }
    }
}

impl RunnerConfig {
    /// Indent by `width` spaces per level.
    pub fn with_indent_width(mut self, width: usize) -> Self {
        self.indent = " ".repeat(width);
        self
    }

    /// Parse a TOML document; `origin` names it in errors.
    pub fn from_toml_str(text: &str, origin: &str) -> Result<Self, TallyError> {
        toml::from_str(text).map_err(|source| TallyError::Config {
            path: origin.to_string(),
            source,
        })
    }

    /// Read and parse a TOML file.
    pub fn load(path: &Path) -> Result<Self, TallyError> {
        let display = path.display().to_string();
        let text = std::fs::read_to_string(path).map_err(|source| TallyError::ReadConfig {
            path: display.clone(),
            source,
        })?;
        Self::from_toml_str(&text, &display)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_two_space_text() {
        let config = RunnerConfig::default();
        assert_eq!(config.indent, "  ");
        assert_eq!(config.format, ReportFormat::Text);
    }

    #[test]
    fn partial_documents_keep_defaults() {
        let config = RunnerConfig::from_toml_str("format = \"json\"\n", "inline").unwrap();
        assert_eq!(config.indent, DEFAULT_INDENT);
        assert_eq!(config.format, ReportFormat::Json);

        let config = RunnerConfig::from_toml_str("indent = \"\\t\"\n", "inline").unwrap();
        assert_eq!(config.indent, "\t");
    }

    #[test]
    fn indent_width() {
        assert_eq!(RunnerConfig::default().with_indent_width(4).indent, "    ");
        assert_eq!(RunnerConfig::default().with_indent_width(0).indent, "");
    }

    #[test]
    fn bad_documents_name_their_origin() {
        let err = RunnerConfig::from_toml_str("format = \"yaml\"\n", "tally.toml").unwrap_err();
        assert!(matches!(err, TallyError::Config { .. }));
        assert!(err.to_string().starts_with("invalid config at tally.toml"));
    }

    #[test]
    fn missing_files_are_read_errors() {
        let err = RunnerConfig::load(Path::new("/nonexistent/tally.toml")).unwrap_err();
        assert!(matches!(err, TallyError::ReadConfig { .. }));
    }
}
