//! Taylor Rule fair-value calculation
//!
//! `rate = r* + π + λ_π·(π − π*) + λ_y·gap`, everything in percent. The
//! function is total: no inputs are rejected and nothing is rounded here.

use serde::{Deserialize, Serialize};

use crate::economy::EconomicState;
use crate::presets::CalibrationProfile;

/// Instantaneous fair-value policy rate for one period
pub fn fair_value_rate(state: &EconomicState, profile: &CalibrationProfile) -> f64 {
    decompose(state, profile).total()
}

/// Additive terms of the Taylor Rule, for explaining a reading
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TaylorComponents {
    /// r*
    pub neutral_real_rate: f64,
    /// π
    pub inflation: f64,
    /// λ_π·(π − π*)
    pub inflation_gap_term: f64,
    /// λ_y·gap
    pub output_gap_term: f64,
}

impl TaylorComponents {
    pub fn total(&self) -> f64 {
        self.neutral_real_rate + self.inflation + self.inflation_gap_term + self.output_gap_term
    }
}

pub fn decompose(state: &EconomicState, profile: &CalibrationProfile) -> TaylorComponents {
    TaylorComponents {
        neutral_real_rate: state.neutral_real_rate,
        inflation: state.inflation,
        inflation_gap_term: profile.inflation_weight * state.inflation_gap(),
        output_gap_term: profile.output_gap_weight * state.output_gap,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_stagflation_standard() {
        // 2 + 6 + 0.5*(6-2) + 0.5*(-3) = 8.5
        let state = EconomicState::new(6.0, 2.0, -3.0, 2.0);
        let rate = fair_value_rate(&state, CalibrationProfile::standard());
        assert_relative_eq!(rate, 8.5, epsilon = 1e-12);
    }

    #[test]
    fn test_zero_gap_identity() {
        let state = EconomicState::new(2.0, 2.0, 0.0, 0.5);
        for (lp, ly) in [(0.0, 0.0), (0.5, 0.5), (1.5, 0.25), (3.0, -2.0)] {
            let profile = CalibrationProfile::custom("t", lp, ly, 0.5);
            assert_eq!(fair_value_rate(&state, &profile), 2.5);
        }
    }

    #[test]
    fn test_deterministic() {
        let state = EconomicState::new(4.3, 2.0, -1.7, 0.8);
        let profile = CalibrationProfile::custom("t", 1.1, 0.7, 0.5);
        let first = fair_value_rate(&state, &profile);
        for _ in 0..100 {
            assert_eq!(fair_value_rate(&state, &profile).to_bits(), first.to_bits());
        }
    }

    #[test]
    fn test_extreme_inputs_are_accepted() {
        let state = EconomicState::new(80.0, 2.0, -25.0, -3.0);
        let rate = fair_value_rate(&state, CalibrationProfile::standard());
        assert_relative_eq!(rate, -3.0 + 80.0 + 39.0 - 12.5, epsilon = 1e-12);
    }

    #[test]
    fn test_components_sum_to_rate() {
        let state = EconomicState::new(1.5, 2.0, -4.0, 1.0);
        let profile = CalibrationProfile::custom("t", 1.5, 0.25, 0.6);
        let c = decompose(&state, &profile);

        assert_relative_eq!(c.inflation_gap_term, -0.75);
        assert_relative_eq!(c.output_gap_term, -1.0);
        assert_relative_eq!(c.total(), fair_value_rate(&state, &profile));
    }
}
