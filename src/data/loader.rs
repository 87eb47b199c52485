use std::collections::BTreeMap;
use std::time::Duration;

use thiserror::Error;

use super::model::{Dataset, Record};
use crate::config::{ColumnSpec, DataSource, EmptyDataPolicy, ViewerConfig};

/// Why a load produced no dataset. Terminal for the session.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("fetching CSV failed: {0}")]
    Fetch(#[from] reqwest::Error),
    #[error("malformed CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("CSV is missing the '{0}' column")]
    MissingColumn(String),
    #[error("dataset contains no rows")]
    EmptyDataset,
}

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Fetch, parse, and apply the empty-data policy. One attempt, no retry.
pub fn load_dataset(config: &ViewerConfig) -> Result<Dataset, LoadError> {
    log::info!("Fetching dataset from {}", config.source.url);
    let text = fetch_csv(&config.source)?;
    let dataset = parse_csv(&text, &config.columns)?;
    check_empty(dataset, config.empty_data)
}

/// Apply `policy` to a parsed dataset.
pub fn check_empty(dataset: Dataset, policy: EmptyDataPolicy) -> Result<Dataset, LoadError> {
    if dataset.is_empty() && policy == EmptyDataPolicy::Reject {
        return Err(LoadError::EmptyDataset);
    }
    Ok(dataset)
}

// ---------------------------------------------------------------------------
// Fetch
// ---------------------------------------------------------------------------

/// Blocking GET of the CSV body. Call off the UI thread.
pub fn fetch_csv(source: &DataSource) -> Result<String, LoadError> {
    let client = reqwest::blocking::Client::builder()
        .timeout(Duration::from_secs(source.timeout_secs))
        .build()?;
    let text = client
        .get(&source.url)
        .send()?
        .error_for_status()?
        .text()?;
    log::debug!("Fetched {} bytes", text.len());
    Ok(text)
}

// ---------------------------------------------------------------------------
// CSV parser
// ---------------------------------------------------------------------------

/// CSV layout: header row with column names, one record per later line.
/// The category, year and metric columns named by `columns` must exist;
/// every other column is kept verbatim in [`Record::fields`].
pub fn parse_csv(text: &str, columns: &ColumnSpec) -> Result<Dataset, LoadError> {
    let mut reader = csv::ReaderBuilder::new().from_reader(text.as_bytes());
    let headers: Vec<String> = reader.headers()?.iter().map(|h| h.to_string()).collect();

    let column_index = |name: &str| {
        headers
            .iter()
            .position(|h| h == name)
            .ok_or_else(|| LoadError::MissingColumn(name.to_string()))
    };
    let category_idx = column_index(&columns.category)?;
    let year_idx = column_index(&columns.year)?;
    let metric_idx = column_index(&columns.metric)?;

    let mut records = Vec::new();

    for (row_no, result) in reader.records().enumerate() {
        let row = result?;

        let category = row.get(category_idx).unwrap_or("").to_string();
        let year = row.get(year_idx).and_then(parse_number);
        let raw_metric = row.get(metric_idx).unwrap_or("");
        let value = normalize_metric(raw_metric);
        if value.is_none() && !raw_metric.trim().is_empty() {
            log::debug!("CSV row {row_no}: '{raw_metric}' is not numeric, leaving metric unset");
        }

        let fields: BTreeMap<String, String> = headers
            .iter()
            .zip(row.iter())
            .map(|(h, v)| (h.clone(), v.to_string()))
            .collect();

        if row_no == 0 {
            log::trace!("First row: {fields:?}");
        }

        records.push(Record {
            category,
            year,
            value,
            fields,
        });
    }

    Ok(Dataset::from_records(headers, records))
}

/// Metric normalisation: present values are parsed and rounded half-up,
/// absent values stay absent.
pub fn normalize_metric(raw: &str) -> Option<f64> {
    if raw.trim().is_empty() {
        return None;
    }
    parse_float_prefix(raw).map(round_half_up)
}

/// Nearest integer, ties towards positive infinity (`-2.5` → `-2`).
/// `v - floor(v)` is exact, so no intermediate rounding can push a value
/// just below a tie over it.
pub fn round_half_up(v: f64) -> f64 {
    let f = v.floor();
    if v - f >= 0.5 {
        f + 1.0
    } else {
        f
    }
}

/// Strict numeric parse of a whole cell, surrounding whitespace allowed.
fn parse_number(s: &str) -> Option<f64> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    s.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Parse the longest leading decimal literal, ignoring leading whitespace
/// and any trailing garbage (`"3.4%"` → 3.4).
fn parse_float_prefix(s: &str) -> Option<f64> {
    let s = s.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end += 1;
    }
    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digits = end - int_start;
    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        digits += frac_end - frac_start;
        if digits > 0 {
            end = frac_end;
        }
    }
    if digits == 0 {
        return None;
    }
    if end < bytes.len() && matches!(bytes[end], b'e' | b'E') {
        let mut exp_end = end + 1;
        if exp_end < bytes.len() && matches!(bytes[exp_end], b'+' | b'-') {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }
    s[..end].parse::<f64>().ok().filter(|v| v.is_finite())
}
