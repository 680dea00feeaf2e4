//! Policy gap analysis: historical rate vs. model rate, in basis points
//!
//! A positive gap means the market's actual rate sits above the model
//! (over-tightened); negative means the bank is behind the curve. The label is
//! derived from the sign whenever it is asked for and never stored.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::history::HistoricalRateSeries;
use crate::projection::RateDecisionSeries;

/// Gap for one period present in both series
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PolicyGapResult {
    pub period: u32,
    pub historical_rate: f64,
    pub smoothed_rate: f64,
    pub gap_bps: f64,
}

impl PolicyGapResult {
    pub fn label(&self) -> GapLabel {
        GapLabel::from_gap(self.gap_bps)
    }
}

/// Qualitative reading of a gap's sign
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GapLabel {
    OverTightened,
    BehindTheCurve,
    Aligned,
}

impl GapLabel {
    pub fn from_gap(gap_bps: f64) -> Self {
        if gap_bps > 0.0 {
            GapLabel::OverTightened
        } else if gap_bps < 0.0 {
            GapLabel::BehindTheCurve
        } else {
            GapLabel::Aligned
        }
    }
}

impl fmt::Display for GapLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            GapLabel::OverTightened => "Over-tightened",
            GapLabel::BehindTheCurve => "Behind the curve",
            GapLabel::Aligned => "Aligned",
        })
    }
}

/// Pair model and historical rates by period
///
/// Periods found in only one of the two series are dropped. Output follows the
/// model series' period order.
pub fn analyze(
    model: &RateDecisionSeries,
    historical: &HistoricalRateSeries,
) -> Vec<PolicyGapResult> {
    let actual: HashMap<u32, f64> = historical
        .observations
        .iter()
        .map(|o| (o.period, o.rate))
        .collect();

    model
        .decisions
        .iter()
        .filter_map(|d| {
            actual.get(&d.period).map(|&historical_rate| PolicyGapResult {
                period: d.period,
                historical_rate,
                smoothed_rate: d.smoothed_rate,
                gap_bps: (historical_rate - d.smoothed_rate) * 100.0,
            })
        })
        .collect()
}

/// Aggregate view over a set of gaps
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GapSummary {
    pub paired_periods: usize,
    pub mean_gap_bps: f64,
    pub max_abs_gap_bps: f64,
    pub over_tightened_periods: usize,
    pub behind_curve_periods: usize,
    pub latest: Option<PolicyGapResult>,
}

impl GapSummary {
    pub fn from_results(results: &[PolicyGapResult]) -> Self {
        let n = results.len();
        let mean_gap_bps = if n == 0 {
            0.0
        } else {
            results.iter().map(|r| r.gap_bps).sum::<f64>() / n as f64
        };

        Self {
            paired_periods: n,
            mean_gap_bps,
            max_abs_gap_bps: results.iter().map(|r| r.gap_bps.abs()).fold(0.0, f64::max),
            over_tightened_periods: results
                .iter()
                .filter(|r| r.label() == GapLabel::OverTightened)
                .count(),
            behind_curve_periods: results
                .iter()
                .filter(|r| r.label() == GapLabel::BehindTheCurve)
                .count(),
            latest: results.last().copied(),
        }
    }
}

/// Gap results together with their summary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GapAnalysis {
    pub results: Vec<PolicyGapResult>,
    pub summary: GapSummary,
}

impl GapAnalysis {
    pub fn run(model: &RateDecisionSeries, historical: &HistoricalRateSeries) -> Self {
        let results = analyze(model, historical);
        let summary = GapSummary::from_results(&results);
        Self { results, summary }
    }
}
