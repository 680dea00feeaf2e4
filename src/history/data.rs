//! Historical policy rate reference data

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Markets with a simulated central bank
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Market {
    India,
    #[serde(rename = "UK", alias = "Uk")]
    Uk,
    Singapore,
}

impl Market {
    pub const ALL: [Market; 3] = [Market::India, Market::Uk, Market::Singapore];

    pub fn name(&self) -> &'static str {
        match self {
            Market::India => "India",
            Market::Uk => "UK",
            Market::Singapore => "Singapore",
        }
    }

    /// Policy rate column in the cleaned macro data file
    pub fn column(&self) -> &'static str {
        match self {
            Market::India => "India_Policy",
            Market::Uk => "UK_Policy",
            Market::Singapore => "Singapore_Policy",
        }
    }
}

impl fmt::Display for Market {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown market '{0}' (expected India, UK or Singapore)")]
pub struct UnknownMarket(pub String);

impl FromStr for Market {
    type Err = UnknownMarket;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "india" | "in" => Ok(Market::India),
            "uk" | "gb" | "united kingdom" => Ok(Market::Uk),
            "singapore" | "sg" => Ok(Market::Singapore),
            _ => Err(UnknownMarket(s.to_string())),
        }
    }
}

/// One observed policy rate
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HistoricalObservation {
    pub period: u32,
    #[serde(default)]
    pub date: Option<NaiveDate>,
    pub rate: f64,
}

/// Observed policy rates for one market, ordered by period
///
/// Periods need not be contiguous; a month without a reading is simply absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoricalRateSeries {
    pub market: Market,
    pub observations: Vec<HistoricalObservation>,
}

impl HistoricalRateSeries {
    pub fn new(market: Market) -> Self {
        Self {
            market,
            observations: Vec::new(),
        }
    }

    /// Undated series with periods `1..=rates.len()`
    pub fn from_rates(market: Market, rates: &[f64]) -> Self {
        Self {
            market,
            observations: rates
                .iter()
                .enumerate()
                .map(|(i, &rate)| HistoricalObservation {
                    period: i as u32 + 1,
                    date: None,
                    rate,
                })
                .collect(),
        }
    }

    pub fn push(&mut self, observation: HistoricalObservation) {
        self.observations.push(observation);
    }

    pub fn len(&self) -> usize {
        self.observations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    /// Highest period covered
    pub fn last_period(&self) -> Option<u32> {
        self.observations.iter().map(|o| o.period).max()
    }

    pub fn rate_at(&self, period: u32) -> Option<f64> {
        self.observations
            .iter()
            .find(|o| o.period == period)
            .map(|o| o.rate)
    }
}

/// Read-only source of historical series keyed by market
pub trait HistoricalRateSource {
    fn series(&self, market: Market) -> Option<&HistoricalRateSeries>;
}

/// In-memory historical rate store
#[derive(Debug, Clone, Default)]
pub struct HistoricalRates {
    series: BTreeMap<Market, HistoricalRateSeries>,
}

impl HistoricalRates {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register (or replace) a market's series
    pub fn insert(&mut self, series: HistoricalRateSeries) {
        self.series.insert(series.market, series);
    }

    pub fn with_series(mut self, series: HistoricalRateSeries) -> Self {
        self.insert(series);
        self
    }

    pub fn markets(&self) -> impl Iterator<Item = Market> + '_ {
        self.series.keys().copied()
    }
}

impl HistoricalRateSource for HistoricalRates {
    fn series(&self, market: Market) -> Option<&HistoricalRateSeries> {
        self.series.get(&market)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_market_from_str() {
        assert_eq!("India".parse::<Market>().unwrap(), Market::India);
        assert_eq!("uk".parse::<Market>().unwrap(), Market::Uk);
        assert_eq!(" SG ".parse::<Market>().unwrap(), Market::Singapore);
        assert!("Japan".parse::<Market>().is_err());
    }

    #[test]
    fn test_market_serde_names() {
        assert_eq!(serde_json::to_string(&Market::Uk).unwrap(), "\"UK\"");
        let m: Market = serde_json::from_str("\"Singapore\"").unwrap();
        assert_eq!(m, Market::Singapore);
    }

    #[test]
    fn test_series_lookup() {
        let s = HistoricalRateSeries::from_rates(Market::Uk, &[0.25, 0.5, 0.75]);
        assert_eq!(s.rate_at(2), Some(0.5));
        assert_eq!(s.rate_at(4), None);
        assert_eq!(s.last_period(), Some(3));
    }

    #[test]
    fn test_store_keyed_by_market() {
        let rates = HistoricalRates::new()
            .with_series(HistoricalRateSeries::from_rates(Market::India, &[4.0]));

        assert!(rates.series(Market::India).is_some());
        assert!(rates.series(Market::Singapore).is_none());
        assert_eq!(rates.markets().collect::<Vec<_>>(), vec![Market::India]);
    }
}
