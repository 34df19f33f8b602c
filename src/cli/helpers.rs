//! Shared helper functions for CLI commands
//!
//! This module contains utility functions that are used across multiple
//! command modules to avoid code duplication.

use console::style;
use miette::{IntoDiagnostic, Result};

use crate::cli::OutputFormat;
use crate::core::record::RegistrationRecord;
use crate::core::Config;
use crate::wizard::ValidationError;

/// Resolve `--format auto` against the configured default
///
/// Unknown configured values fall back to YAML.
pub fn resolve_format(format: OutputFormat, config: &Config) -> OutputFormat {
    match format {
        OutputFormat::Auto => match config.default_format.as_deref() {
            Some(f) if f.eq_ignore_ascii_case("json") => OutputFormat::Json,
            _ => OutputFormat::Yaml,
        },
        other => other,
    }
}

/// Serialize a record for stdout
pub fn render_record(record: &RegistrationRecord, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => serde_json::to_string_pretty(record).into_diagnostic(),
        OutputFormat::Yaml | OutputFormat::Auto => serde_yml::to_string(record).into_diagnostic(),
    }
}

/// One-line inline message shown under a rejected field
pub fn format_field_error(err: &ValidationError) -> String {
    format!(
        "{} {}: {}",
        style("✗").red(),
        style(err.field()).bold(),
        err
    )
}

/// Truncate a string to max_len characters, adding "..." if truncated
pub fn truncate_str(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::record::GstRecord;

    #[test]
    fn test_resolve_format() {
        let mut config = Config::default();
        assert_eq!(resolve_format(OutputFormat::Auto, &config), OutputFormat::Yaml);

        config.default_format = Some("JSON".to_string());
        assert_eq!(resolve_format(OutputFormat::Auto, &config), OutputFormat::Json);
        assert_eq!(resolve_format(OutputFormat::Yaml, &config), OutputFormat::Yaml);

        config.default_format = Some("toml".to_string());
        assert_eq!(resolve_format(OutputFormat::Auto, &config), OutputFormat::Yaml);
    }

    #[test]
    fn test_render_record_json() {
        let record = RegistrationRecord {
            gst: Some(GstRecord {
                gst_number: String::new(),
                is_registered: false,
            }),
            ..Default::default()
        };
        let json = render_record(&record, OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["gst"]["is_registered"], false);
        assert!(value["pan"].is_null());
    }

    #[test]
    fn test_format_field_error_names_field() {
        let msg = format_field_error(&ValidationError::MissingField { field: "Pincode" });
        assert!(msg.contains("Pincode"));
        assert!(msg.contains("is required"));
    }

    #[test]
    fn test_truncate_str() {
        assert_eq!(truncate_str("hello", 10), "hello");
        assert_eq!(truncate_str("hello world", 8), "hello...");
        assert_eq!(truncate_str("hi", 2), "hi");
    }
}
