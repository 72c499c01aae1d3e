//! Run configuration.
//!
//! Loaded from a JSON file shaped like:
//!
//! ```json
//! { "attorney": "Rodney M. Kernan", "startDate": "2026-01-12", "endDate": "2026-01-18" }
//! ```
//!
//! The optional `portal` section overrides the fixed portal constants.

use crate::error::{Result, ScrapeError};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarConfig {
    /// Display name used in the document title
    #[serde(default)]
    pub attorney: String,

    /// First hearing day, `YYYY-MM-DD`
    #[serde(default)]
    pub start_date: Option<String>,

    /// Last hearing day, `YYYY-MM-DD`
    #[serde(default)]
    pub end_date: Option<String>,

    #[serde(default)]
    pub portal: PortalConfig,
}

/// Fixed targets of the portal workflow
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PortalConfig {
    /// Splash page with the terms of use
    pub entry_url: String,

    /// Location assumed for the results page when it is replayed from the cache
    pub results_url: String,

    pub category_link_text: String,
    pub tab_text: String,
    pub judge_label: String,

    /// Class of the results table
    pub results_table_class: String,

    /// Literal that must appear in a detail-page row for the case to be kept
    pub attorney_filter: String,

    /// Number of result rows drilled into per run
    pub detail_row_limit: usize,
}

impl Default for PortalConfig {
    fn default() -> Self {
        Self {
            entry_url: "https://vmatrix1.brevardclerk.us/beca/beca_splash.cfm".to_string(),
            results_url: "https://vmatrix1.brevardclerk.us/beca/".to_string(),
            category_link_text: "General Public Court Records".to_string(),
            tab_text: "Judiciary".to_string(),
            judge_label: "TRAFFIC HEARING OFFICER".to_string(),
            results_table_class: "TFtable".to_string(),
            attorney_filter: "KERNAN RODNEY M".to_string(),
            detail_row_limit: 9,
        }
    }
}

impl CalendarConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| ScrapeError::Config(format!("Failed to read {}: {}", path.display(), e)))?;
        Self::from_json(&raw)
    }

    pub fn from_json(raw: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        for date in [&self.start_date, &self.end_date].into_iter().flatten() {
            parse_iso_date(date)?;
        }
        if self.portal.detail_row_limit == 0 {
            return Err(ScrapeError::Config("portal.detailRowLimit must be at least 1".to_string()));
        }
        Ok(())
    }

    /// The configured range as the portal's `MM/DD/YYYY` field values
    pub fn search_range(&self) -> Result<(String, String)> {
        match (&self.start_date, &self.end_date) {
            (Some(start), Some(end)) => Ok((portal_date(start)?, portal_date(end)?)),
            _ => Err(ScrapeError::Config("startDate and endDate are required for a live search".to_string())),
        }
    }
}

fn parse_iso_date(date: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map_err(|e| ScrapeError::Config(format!("Invalid date '{}': {}", date, e)))
}

fn portal_date(date: &str) -> Result<String> {
    Ok(parse_iso_date(date)?.format("%m/%d/%Y").to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_json_camel_case() {
        let config = CalendarConfig::from_json(
            r#"{"attorney": "Rodney Kernan", "startDate": "2026-01-12", "endDate": "2026-01-18"}"#,
        )
        .unwrap();

        assert_eq!(config.attorney, "Rodney Kernan");
        assert_eq!(config.start_date.as_deref(), Some("2026-01-12"));
        assert_eq!(config.portal.judge_label, "TRAFFIC HEARING OFFICER");
        assert_eq!(config.portal.detail_row_limit, 9);
    }

    #[test]
    fn test_portal_overrides() {
        let config = CalendarConfig::from_json(
            r#"{"attorney": "A", "portal": {"attorneyFilter": "SMITH JANE", "detailRowLimit": 3}}"#,
        )
        .unwrap();

        assert_eq!(config.portal.attorney_filter, "SMITH JANE");
        assert_eq!(config.portal.detail_row_limit, 3);
        assert_eq!(config.portal.tab_text, "Judiciary");
    }

    #[test]
    fn test_search_range_uses_portal_format() {
        let config = CalendarConfig {
            start_date: Some("2026-01-12".to_string()),
            end_date: Some("2026-01-18".to_string()),
            ..Default::default()
        };
        assert_eq!(config.search_range().unwrap(), ("01/12/2026".to_string(), "01/18/2026".to_string()));
    }

    #[test]
    fn test_search_range_requires_both_dates() {
        let config = CalendarConfig { start_date: Some("2026-01-12".to_string()), ..Default::default() };
        assert!(matches!(config.search_range(), Err(ScrapeError::Config(_))));
    }

    #[test]
    fn test_invalid_date_rejected() {
        let result = CalendarConfig::from_json(r#"{"attorney": "A", "startDate": "12/01/2026"}"#);
        assert!(matches!(result, Err(ScrapeError::Config(_))));
    }
}
