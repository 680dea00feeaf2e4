//! Load historical policy rates from the cleaned monthly macro CSV
//!
//! Expected columns: `Date,India_Policy,UK_Policy,Singapore_Policy`. Extra
//! columns (e.g. the FX averages) are ignored. Rows are ordered by date and
//! numbered from period 1; a blank or non-numeric rate drops that month for
//! that market only.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use csv::Reader;
use thiserror::Error;

use super::{HistoricalObservation, HistoricalRateSeries, HistoricalRates, Market};

/// Default location of the historical rates file
pub const DEFAULT_HISTORY_PATH: &str = "data/historical/policy_rates.csv";

/// Environment variable overriding the historical rates file
pub const HISTORY_PATH_ENV: &str = "POLICY_RATE_HISTORY";

#[derive(Debug, Error)]
pub enum HistoryError {
    #[error("failed to read historical rates: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed historical rates CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("row {row}: unparseable date '{value}'")]
    Date { row: usize, value: String },
}

/// Raw CSV row matching the cleaned macro data columns
#[derive(Debug, serde::Deserialize)]
struct CsvRow {
    #[serde(rename = "Date")]
    date: String,
    #[serde(rename = "India_Policy", default, deserialize_with = "csv::invalid_option")]
    india: Option<f64>,
    #[serde(rename = "UK_Policy", default, deserialize_with = "csv::invalid_option")]
    uk: Option<f64>,
    #[serde(rename = "Singapore_Policy", default, deserialize_with = "csv::invalid_option")]
    singapore: Option<f64>,
}

impl CsvRow {
    fn rate(&self, market: Market) -> Option<f64> {
        match market {
            Market::India => self.india,
            Market::Uk => self.uk,
            Market::Singapore => self.singapore,
        }
    }
}

/// Accepts `YYYY-MM-DD`, optionally followed by a time component
fn parse_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    let day = value.get(..10).unwrap_or(value);
    NaiveDate::parse_from_str(day, "%Y-%m-%d").ok()
}

/// Pick the historical file: explicit path, then `POLICY_RATE_HISTORY`, then
/// the default location if it exists
pub fn resolve_history_path(explicit: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path.to_path_buf());
    }
    if let Ok(path) = std::env::var(HISTORY_PATH_ENV) {
        if !path.is_empty() {
            return Some(PathBuf::from(path));
        }
    }
    let default = Path::new(DEFAULT_HISTORY_PATH);
    default.exists().then(|| default.to_path_buf())
}

/// Load historical rates from a CSV file
pub fn load_history<P: AsRef<Path>>(path: P) -> Result<HistoricalRates, HistoryError> {
    let file = std::fs::File::open(path.as_ref())?;
    load_history_from_reader(file)
}

/// Load historical rates from any reader (e.g., string buffer)
pub fn load_history_from_reader<R: std::io::Read>(
    reader: R,
) -> Result<HistoricalRates, HistoryError> {
    let mut csv_reader = Reader::from_reader(reader);
    let mut rows = Vec::new();

    for (i, result) in csv_reader.deserialize().enumerate() {
        let row: CsvRow = result?;
        let date = parse_date(&row.date).ok_or_else(|| HistoryError::Date {
            // 1-based, counting the header line
            row: i + 2,
            value: row.date.clone(),
        })?;
        rows.push((date, row));
    }

    rows.sort_by_key(|(date, _)| *date);

    let mut rates = HistoricalRates::new();
    for market in Market::ALL {
        let mut series = HistoricalRateSeries::new(market);
        for (i, (date, row)) in rows.iter().enumerate() {
            if let Some(rate) = row.rate(market) {
                series.push(HistoricalObservation {
                    period: i as u32 + 1,
                    date: Some(*date),
                    rate,
                });
            }
        }

        if series.is_empty() {
            log::debug!("no {} observations in historical data", market.column());
        } else {
            log::debug!("loaded {} observations for {}", series.len(), market);
            rates.insert(series);
        }
    }

    Ok(rates)
}
