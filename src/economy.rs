//! Macroeconomic inputs for a single simulation period
//!
//! All values are in percent. Nothing here is bounds-checked: stress scenarios
//! are allowed to be economically implausible.

use serde::{Deserialize, Serialize};

/// Economic state driving the Taylor Rule for one period
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EconomicState {
    /// Headline inflation (π)
    pub inflation: f64,

    /// Central bank inflation target (π*)
    pub inflation_target: f64,

    /// Output gap, actual vs. potential output
    pub output_gap: f64,

    /// Neutral real rate (r*)
    pub neutral_real_rate: f64,
}

impl EconomicState {
    pub const fn new(
        inflation: f64,
        inflation_target: f64,
        output_gap: f64,
        neutral_real_rate: f64,
    ) -> Self {
        Self {
            inflation,
            inflation_target,
            output_gap,
            neutral_real_rate,
        }
    }

    /// Deviation of inflation from target (π − π*)
    pub fn inflation_gap(&self) -> f64 {
        self.inflation - self.inflation_target
    }

    /// Apply an override's populated fields on top of this state
    pub fn with_override(mut self, ov: &StateOverride) -> Self {
        if let Some(v) = ov.inflation {
            self.inflation = v;
        }
        if let Some(v) = ov.inflation_target {
            self.inflation_target = v;
        }
        if let Some(v) = ov.output_gap {
            self.output_gap = v;
        }
        if let Some(v) = ov.neutral_real_rate {
            self.neutral_real_rate = v;
        }
        self
    }
}

/// Time-varying change to a scenario, effective from `from_period` onward
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct StateOverride {
    pub from_period: u32,
    #[serde(default)]
    pub inflation: Option<f64>,
    #[serde(default)]
    pub inflation_target: Option<f64>,
    #[serde(default)]
    pub output_gap: Option<f64>,
    #[serde(default)]
    pub neutral_real_rate: Option<f64>,
}

impl StateOverride {
    /// Override with no fields set; fill in with struct update syntax
    pub const fn at(from_period: u32) -> Self {
        Self {
            from_period,
            inflation: None,
            inflation_target: None,
            output_gap: None,
            neutral_real_rate: None,
        }
    }
}

/// Template state plus overrides, resolved period by period
#[derive(Debug, Clone, Copy)]
pub struct ScenarioPath<'a> {
    base: EconomicState,
    overrides: &'a [StateOverride],
}

impl<'a> ScenarioPath<'a> {
    pub fn new(base: EconomicState, overrides: &'a [StateOverride]) -> Self {
        Self { base, overrides }
    }

    /// Path that holds `base` for every period
    pub fn constant(base: EconomicState) -> Self {
        Self { base, overrides: &[] }
    }

    /// State for a 1-indexed period
    ///
    /// Overrides apply in ascending `from_period` order regardless of how they
    /// were listed, so later overrides win on the fields they set.
    pub fn state_at(&self, period: u32) -> EconomicState {
        let mut active: Vec<&StateOverride> = self
            .overrides
            .iter()
            .filter(|ov| ov.from_period <= period)
            .collect();
        active.sort_by_key(|ov| ov.from_period);

        active
            .into_iter()
            .fold(self.base, |state, ov| state.with_override(ov))
    }

    /// States for periods `1..=periods`
    pub fn states(&self, periods: u32) -> Vec<EconomicState> {
        (1..=periods).map(|p| self.state_at(p)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: EconomicState = EconomicState::new(3.0, 2.0, 0.5, 1.0);

    #[test]
    fn test_constant_path() {
        let path = ScenarioPath::constant(BASE);
        assert_eq!(path.state_at(1), BASE);
        assert_eq!(path.state_at(100), BASE);
        assert_eq!(path.states(5).len(), 5);
    }

    #[test]
    fn test_overrides_apply_from_period() {
        let overrides = [
            StateOverride { inflation: Some(5.0), ..StateOverride::at(3) },
            StateOverride { output_gap: Some(-2.0), ..StateOverride::at(5) },
        ];
        let path = ScenarioPath::new(BASE, &overrides);

        assert_eq!(path.state_at(2), BASE);
        assert_eq!(path.state_at(3).inflation, 5.0);
        assert_eq!(path.state_at(3).output_gap, 0.5);

        // Earlier override persists alongside the later one
        let p5 = path.state_at(5);
        assert_eq!(p5.inflation, 5.0);
        assert_eq!(p5.output_gap, -2.0);
        assert_eq!(p5.neutral_real_rate, 1.0);
    }

    #[test]
    fn test_overrides_ordered_by_period_not_listing() {
        let overrides = [
            StateOverride { inflation: Some(4.0), ..StateOverride::at(6) },
            StateOverride { inflation: Some(9.0), ..StateOverride::at(2) },
        ];
        let path = ScenarioPath::new(BASE, &overrides);

        assert_eq!(path.state_at(3).inflation, 9.0);
        assert_eq!(path.state_at(6).inflation, 4.0);
    }

    #[test]
    fn test_inflation_gap() {
        assert_eq!(BASE.inflation_gap(), 1.0);
    }
}
