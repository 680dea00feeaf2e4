//! Rate decision output structures

use serde::{Deserialize, Serialize};

use crate::economy::EconomicState;

/// How the smoothing recurrence was seeded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StartingRateSource {
    /// Supplied explicitly by the caller
    Supplied,
    /// First historical observation for the market
    Historical,
    /// Fair value of period 1
    FairValue,
}

/// A single period's model output
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RateDecision {
    pub period: u32,
    pub state: EconomicState,
    pub fair_value_rate: f64,
    pub smoothed_rate: f64,
}

/// Complete model output for one run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateDecisionSeries {
    pub starting_rate: f64,
    pub starting_rate_source: StartingRateSource,
    pub decisions: Vec<RateDecision>,
}

impl RateDecisionSeries {
    pub fn new(starting_rate: f64, starting_rate_source: StartingRateSource) -> Self {
        Self {
            starting_rate,
            starting_rate_source,
            decisions: Vec::new(),
        }
    }

    pub fn add_decision(&mut self, decision: RateDecision) {
        self.decisions.push(decision);
    }

    pub fn len(&self) -> usize {
        self.decisions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.decisions.is_empty()
    }

    pub fn get(&self, period: u32) -> Option<&RateDecision> {
        // Periods are contiguous from 1
        period
            .checked_sub(1)
            .and_then(|i| self.decisions.get(i as usize))
            .filter(|d| d.period == period)
    }

    pub fn fair_values(&self) -> Vec<f64> {
        self.decisions.iter().map(|d| d.fair_value_rate).collect()
    }

    /// Get summary statistics
    pub fn summary(&self) -> SeriesSummary {
        let periods = self.decisions.len() as u32;
        let final_fair_value = self.decisions.last().map(|d| d.fair_value_rate).unwrap_or(0.0);
        let final_rate = self
            .decisions
            .last()
            .map(|d| d.smoothed_rate)
            .unwrap_or(self.starting_rate);

        let mut rate_changes = 0;
        let mut total_hikes_bps = 0.0;
        let mut total_cuts_bps = 0.0;
        let mut prev = self.starting_rate;
        for d in &self.decisions {
            let change = d.smoothed_rate - prev;
            if change > 0.0 {
                total_hikes_bps += change * 100.0;
                rate_changes += 1;
            } else if change < 0.0 {
                total_cuts_bps -= change * 100.0;
                rate_changes += 1;
            }
            prev = d.smoothed_rate;
        }

        SeriesSummary {
            periods,
            starting_rate: self.starting_rate,
            final_rate,
            final_fair_value,
            residual_gap_bps: (final_fair_value - final_rate) * 100.0,
            rate_changes,
            total_hikes_bps,
            total_cuts_bps,
        }
    }
}

/// Summary statistics for a rate path
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesSummary {
    pub periods: u32,
    pub starting_rate: f64,
    pub final_rate: f64,
    pub final_fair_value: f64,
    /// Distance still to travel to fair value at the end of the run
    pub residual_gap_bps: f64,
    pub rate_changes: u32,
    pub total_hikes_bps: f64,
    pub total_cuts_bps: f64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn series(rates: &[(f64, f64)]) -> RateDecisionSeries {
        let state = EconomicState::new(2.0, 2.0, 0.0, 1.0);
        let mut s = RateDecisionSeries::new(5.0, StartingRateSource::Supplied);
        for (i, &(fair, smoothed)) in rates.iter().enumerate() {
            s.add_decision(RateDecision {
                period: i as u32 + 1,
                state,
                fair_value_rate: fair,
                smoothed_rate: smoothed,
            });
        }
        s
    }

    #[test]
    fn test_get_by_period() {
        let s = series(&[(6.0, 5.25), (6.0, 5.5)]);
        assert_eq!(s.get(2).unwrap().smoothed_rate, 5.5);
        assert!(s.get(0).is_none());
        assert!(s.get(3).is_none());
    }

    #[test]
    fn test_summary_counts_moves() {
        let s = series(&[(6.0, 5.25), (6.0, 5.25), (4.0, 5.0), (4.0, 4.75)]);
        let summary = s.summary();

        assert_eq!(summary.periods, 4);
        assert_eq!(summary.rate_changes, 3);
        assert_relative_eq!(summary.total_hikes_bps, 25.0);
        assert_relative_eq!(summary.total_cuts_bps, 50.0);
        assert_relative_eq!(summary.residual_gap_bps, -75.0);
    }

    #[test]
    fn test_summary_of_empty_series() {
        let summary = series(&[]).summary();
        assert_eq!(summary.periods, 0);
        assert_eq!(summary.final_rate, 5.0);
    }
}
