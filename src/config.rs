//! Presentation settings for the rendered report
//!
//! The calculators never read configuration; these settings only affect
//! labels in the PDF and the attachment name used by the API.

use serde::Deserialize;
use std::env;
use std::fs;
use std::path::Path;

pub const DEFAULT_TITLE: &str = "Software Project Economic Analysis Report";
pub const DEFAULT_CURRENCY_LABEL: &str = "EUR";
pub const DEFAULT_FILENAME: &str = "software_project_analysis.pdf";
pub const DEFAULT_NEVER_LABEL: &str = "Never";

fn default_title() -> String {
    DEFAULT_TITLE.to_string()
}

fn default_currency_label() -> String {
    DEFAULT_CURRENCY_LABEL.to_string()
}

fn default_filename() -> String {
    DEFAULT_FILENAME.to_string()
}

fn default_never_label() -> String {
    DEFAULT_NEVER_LABEL.to_string()
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ReportConfig {
    /// Centered title on the first page
    #[serde(default = "default_title")]
    pub title: String,

    /// Prefix for the NPV value (e.g. "EUR", "USD")
    #[serde(default = "default_currency_label")]
    pub currency_label: String,

    /// Attachment filename for the report download
    #[serde(default = "default_filename")]
    pub filename: String,

    /// Text shown for a payback period that is never reached
    #[serde(default = "default_never_label")]
    pub never_label: String,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            title: default_title(),
            currency_label: default_currency_label(),
            filename: default_filename(),
            never_label: default_never_label(),
        }
    }
}

impl ReportConfig {
    /// Load from a JSON file. Missing keys keep their defaults.
    pub fn from_json_path(path: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        let text = fs::read_to_string(path)?;
        let config = serde_json::from_str(&text)?;
        Ok(config)
    }

    /// Defaults overridden by REPORT_TITLE, REPORT_CURRENCY and REPORT_FILENAME
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(title) = env::var("REPORT_TITLE") {
            config.title = title;
        }
        if let Ok(currency) = env::var("REPORT_CURRENCY") {
            config.currency_label = currency;
        }
        if let Ok(filename) = env::var("REPORT_FILENAME") {
            config.filename = filename;
        }
        config
    }
}
