use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Path of an optional JSON file overriding the defaults below.
pub const CONFIG_ENV: &str = "INFLATION_VIEWER_CONFIG";

/// Overrides `source.url` after the config file has been applied.
pub const URL_ENV: &str = "INFLATION_VIEWER_URL";

pub const DEFAULT_DATA_URL: &str = "https://datahub.io/core/inflation/r/inflation-gdp.csv";

// ---------------------------------------------------------------------------
// Viewer configuration
// ---------------------------------------------------------------------------

/// Everything the viewer can be told, with defaults that reproduce the
/// stock inflation chart.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    pub source: DataSource,
    pub columns: ColumnSpec,
    pub chart: ChartConfig,
    pub empty_data: EmptyDataPolicy,
}

/// Where the CSV comes from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataSource {
    pub url: String,
    pub timeout_secs: u64,
}

impl Default for DataSource {
    fn default() -> Self {
        Self {
            url: DEFAULT_DATA_URL.to_string(),
            timeout_secs: 30,
        }
    }
}

/// Header names of the columns the viewer understands.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnSpec {
    pub category: String,
    pub year: String,
    pub metric: String,
    /// Suffix appended to metric values in tooltips.
    pub metric_unit: String,
}

impl Default for ColumnSpec {
    fn default() -> Self {
        Self {
            category: "Country".to_string(),
            year: "Year".to_string(),
            metric: "Inflation".to_string(),
            metric_unit: "%".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Margin {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Default for Margin {
    fn default() -> Self {
        Self {
            top: 20.0,
            right: 30.0,
            bottom: 30.0,
            left: 40.0,
        }
    }
}

/// Chart surface geometry. `width`/`height` include the margins.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    pub width: f64,
    pub height: f64,
    pub margin: Margin,
    pub point_radius: f64,
    pub line_width: f64,
    pub x_ticks: usize,
    pub y_ticks: usize,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 400.0,
            margin: Margin::default(),
            point_radius: 2.0,
            line_width: 1.5,
            x_ticks: 10,
            y_ticks: 10,
        }
    }
}

impl ChartConfig {
    /// Width of the plot area inside the margins (never negative).
    pub fn inner_width(&self) -> f64 {
        (self.width - self.margin.left - self.margin.right).max(0.0)
    }

    /// Height of the plot area inside the margins (never negative).
    pub fn inner_height(&self) -> f64 {
        (self.height - self.margin.top - self.margin.bottom).max(0.0)
    }
}

/// What a successfully parsed but empty dataset means.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmptyDataPolicy {
    /// Legitimate empty state: no default selection, disabled selector.
    #[default]
    Allow,
    /// Treat as a load error.
    Reject,
}

impl ViewerConfig {
    /// Defaults, then the optional config file, then the URL override.
    pub fn load() -> Result<Self> {
        let mut config = match std::env::var_os(CONFIG_ENV) {
            Some(path) => Self::from_file(Path::new(&path))?,
            None => Self::default(),
        };
        if let Ok(url) = std::env::var(URL_ENV) {
            if !url.trim().is_empty() {
                config.source.url = url;
            }
        }
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading viewer config {}", path.display()))?;
        serde_json::from_str(&text)
            .with_context(|| format!("parsing viewer config {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn defaults_match_stock_chart() {
        let cfg = ViewerConfig::default();
        assert_eq!(cfg.source.url, DEFAULT_DATA_URL);
        assert_eq!(cfg.columns.category, "Country");
        assert_eq!(cfg.chart.inner_width(), 730.0);
        assert_eq!(cfg.chart.inner_height(), 350.0);
        assert_eq!(cfg.empty_data, EmptyDataPolicy::Allow);
    }

    #[test]
    fn partial_file_keeps_remaining_defaults() {
        let mut temp = NamedTempFile::new().unwrap();
        temp.write_all(
            br#"{
                "columns": {"metric": "CPI"},
                "chart": {"margin": {"left": 60}},
                "empty_data": "reject"
            }"#,
        )
        .unwrap();
        let cfg = ViewerConfig::from_file(temp.path()).unwrap();
        assert_eq!(cfg.columns.metric, "CPI");
        assert_eq!(cfg.columns.year, "Year");
        assert_eq!(cfg.chart.margin.left, 60.0);
        assert_eq!(cfg.chart.margin.top, 20.0);
        assert_eq!(cfg.empty_data, EmptyDataPolicy::Reject);
    }

    #[test]
    fn malformed_file_reports_path() {
        let mut temp = NamedTempFile::new().unwrap();
        temp.write_all(b"{ not json").unwrap();
        let err = ViewerConfig::from_file(temp.path()).unwrap_err();
        assert!(format!("{err:#}").contains("parsing viewer config"));
    }

    #[test]
    fn inner_size_clamps_at_zero() {
        let chart = ChartConfig {
            width: 50.0,
            height: 10.0,
            ..ChartConfig::default()
        };
        assert_eq!(chart.inner_width(), 0.0);
        assert_eq!(chart.inner_height(), 0.0);
    }
}
