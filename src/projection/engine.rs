//! Policy inertia engine
//!
//! Turns a sequence of fair-value targets into the gradual rate path a central
//! bank would actually walk: `rₜ = ρ·rₜ₋₁ + (1−ρ)·fₜ`, optionally snapped to a
//! discrete increment after the recurrence.

use serde::{Deserialize, Serialize};

use super::state::SmoothingState;

/// Default snapping increment in percentage points (25 bps)
pub const DEFAULT_RATE_INCREMENT: f64 = 0.25;

/// Which value re-enters the recurrence when snapping is enabled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SnapFeedback {
    /// The snapped (displayed) rate feeds the next step, so the path is
    /// consistent with what is shown
    #[default]
    Rounded,
    /// The unsnapped rate feeds the next step; snapping is display-only
    Unrounded,
}

/// Discrete step-size policy
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RateStep {
    /// Increment in percentage points (0.25 = 25 bps)
    #[serde(default = "default_increment")]
    pub increment: f64,

    #[serde(default)]
    pub feedback: SnapFeedback,
}

fn default_increment() -> f64 {
    DEFAULT_RATE_INCREMENT
}

impl Default for RateStep {
    fn default() -> Self {
        Self {
            increment: DEFAULT_RATE_INCREMENT,
            feedback: SnapFeedback::default(),
        }
    }
}

impl RateStep {
    /// Round to the nearest increment (halves away from zero)
    ///
    /// A non-positive or non-finite increment leaves the rate unchanged.
    pub fn snap(&self, rate: f64) -> f64 {
        if !(self.increment.is_finite() && self.increment > 0.0) {
            return rate;
        }
        (rate / self.increment).round() * self.increment
    }
}

/// Configuration for one smoothing run
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SmoothingConfig {
    /// ρ; not validated, 0 and 1 are both meaningful
    pub smoothing_factor: f64,

    /// Snapping policy; `None` keeps the continuous path
    pub step: Option<RateStep>,
}

impl SmoothingConfig {
    pub fn continuous(smoothing_factor: f64) -> Self {
        Self {
            smoothing_factor,
            step: None,
        }
    }

    pub fn stepped(smoothing_factor: f64, step: RateStep) -> Self {
        Self {
            smoothing_factor,
            step: Some(step),
        }
    }
}

/// Output of a single smoothing step
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SmoothedStep {
    pub period: u32,
    pub target: f64,
    /// Recurrence output before snapping
    pub unrounded: f64,
    /// Rate to report (snapped if a step policy is set)
    pub rate: f64,
}

/// Stateful smoother; build a fresh one per run
pub struct SmoothingEngine {
    config: SmoothingConfig,
    state: SmoothingState,
}

impl SmoothingEngine {
    /// Create an engine starting from r₀
    pub fn new(config: SmoothingConfig, starting_rate: f64) -> Self {
        Self {
            config,
            state: SmoothingState::from_starting_rate(starting_rate),
        }
    }

    pub fn state(&self) -> &SmoothingState {
        &self.state
    }

    /// Consume the next fair-value target and emit the period's decision
    pub fn step(&mut self, target: f64) -> SmoothedStep {
        self.state.advance_period();

        let rho = self.config.smoothing_factor;
        let unrounded = rho * self.state.previous_rate + (1.0 - rho) * target;

        let (rate, feedback) = match self.config.step {
            Some(step) => {
                let snapped = step.snap(unrounded);
                match step.feedback {
                    SnapFeedback::Rounded => (snapped, snapped),
                    SnapFeedback::Unrounded => (snapped, unrounded),
                }
            }
            None => (unrounded, unrounded),
        };

        self.state.record(feedback);

        SmoothedStep {
            period: self.state.period,
            target,
            unrounded,
            rate,
        }
    }

    /// Run the engine over every target; ends when the targets are exhausted
    pub fn smooth<I>(mut self, targets: I) -> Vec<SmoothedStep>
    where
        I: IntoIterator<Item = f64>,
    {
        targets.into_iter().map(|t| self.step(t)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const TARGETS: [f64; 6] = [8.5, 7.25, 3.1, -0.4, 5.55, 12.0];

    fn rates(steps: &[SmoothedStep]) -> Vec<f64> {
        steps.iter().map(|s| s.rate).collect()
    }

    #[test]
    fn test_rho_zero_tracks_targets_exactly() {
        for start in [-2.0, 0.0, 4.5, 100.0] {
            let engine = SmoothingEngine::new(SmoothingConfig::continuous(0.0), start);
            assert_eq!(rates(&engine.smooth(TARGETS)), TARGETS.to_vec());
        }
    }

    #[test]
    fn test_rho_one_holds_starting_rate() {
        let engine = SmoothingEngine::new(SmoothingConfig::continuous(1.0), 4.75);
        let out = engine.smooth(TARGETS);
        assert!(out.iter().all(|s| s.rate == 4.75));
    }

    #[test]
    fn test_recurrence() {
        let mut engine = SmoothingEngine::new(SmoothingConfig::continuous(0.75), 6.5);

        let s1 = engine.step(8.5);
        assert_eq!(s1.period, 1);
        assert_relative_eq!(s1.rate, 0.75 * 6.5 + 0.25 * 8.5);

        let s2 = engine.step(8.5);
        assert_eq!(s2.period, 2);
        assert_relative_eq!(s2.rate, 0.75 * s1.rate + 0.25 * 8.5);
        assert_eq!(engine.state().previous_rate, s2.rate);
    }

    #[test]
    fn test_monotonic_convergence() {
        for (start, target) in [(0.0, 5.0), (9.0, 2.5)] {
            for rho in [0.1, 0.5, 0.9] {
                let engine = SmoothingEngine::new(SmoothingConfig::continuous(rho), start);
                let out = engine.smooth(std::iter::repeat(target).take(200));

                let mut prev_dist = (start - target).abs();
                let mut prev_rate = start;
                for s in &out {
                    let dist = (s.rate - target).abs();
                    assert!(dist <= prev_dist + 1e-12);
                    // Moves in one direction only and never overshoots
                    if target > start {
                        assert!(s.rate >= prev_rate);
                        assert!(s.rate <= target + 1e-12);
                    } else {
                        assert!(s.rate <= prev_rate);
                        assert!(s.rate >= target - 1e-12);
                    }
                    prev_dist = dist;
                    prev_rate = s.rate;
                }
                assert_relative_eq!(out.last().unwrap().rate, target, epsilon = 1e-6);
            }
        }
    }

    #[test]
    fn test_snap_nearest_increment() {
        let step = RateStep::default();
        assert_eq!(step.snap(6.99), 7.0);
        assert_eq!(step.snap(6.874), 6.75);
        assert_eq!(step.snap(6.875), 7.0);
        assert_eq!(step.snap(-0.13), -0.25);

        let off = RateStep { increment: 0.0, ..RateStep::default() };
        assert_eq!(off.snap(6.99), 6.99);
    }

    #[test]
    fn test_rounded_feedback_uses_displayed_rate() {
        let config = SmoothingConfig::stepped(0.5, RateStep::default());
        let mut engine = SmoothingEngine::new(config, 5.0);

        // 0.5*5 + 0.5*5.6 = 5.3 -> 5.25
        let s1 = engine.step(5.6);
        assert_relative_eq!(s1.unrounded, 5.3);
        assert_eq!(s1.rate, 5.25);
        assert_eq!(engine.state().previous_rate, 5.25);

        // 0.5*5.25 + 0.5*5.6 = 5.425 -> 5.5
        let s2 = engine.step(5.6);
        assert_relative_eq!(s2.unrounded, 5.425);
        assert_eq!(s2.rate, 5.5);
    }

    #[test]
    fn test_unrounded_feedback_keeps_continuous_path() {
        let step = RateStep { feedback: SnapFeedback::Unrounded, ..RateStep::default() };
        let stepped =
            SmoothingEngine::new(SmoothingConfig::stepped(0.5, step), 5.0).smooth(TARGETS);
        let continuous =
            SmoothingEngine::new(SmoothingConfig::continuous(0.5), 5.0).smooth(TARGETS);

        for (s, c) in stepped.iter().zip(&continuous) {
            assert_eq!(s.unrounded, c.rate);
            assert_eq!(s.rate, step.snap(c.rate));
        }
    }

    #[test]
    fn test_snapped_rates_are_on_grid() {
        let config = SmoothingConfig::stepped(0.8, RateStep::default());
        for s in SmoothingEngine::new(config, 3.0).smooth(TARGETS) {
            let units = s.rate / DEFAULT_RATE_INCREMENT;
            assert_relative_eq!(units, units.round(), epsilon = 1e-9);
        }
    }

    #[test]
    fn test_fresh_engines_are_independent() {
        let config = SmoothingConfig::continuous(0.6);
        let first = SmoothingEngine::new(config, 2.0).smooth(TARGETS);
        let second = SmoothingEngine::new(config, 2.0).smooth(TARGETS);
        assert_eq!(first, second);
    }

    #[test]
    fn test_empty_targets() {
        let out = SmoothingEngine::new(SmoothingConfig::continuous(0.5), 1.0).smooth(Vec::new());
        assert!(out.is_empty());
    }
}
