//! One end-to-end simulation per market
//!
//! Resolves the scenario and calibration, projects fair value per period,
//! smooths it with a fresh engine and, when the market has history, measures
//! the policy gap. Each call is an independent request/response; nothing is
//! carried between runs.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::economy::{EconomicState, ScenarioPath, StateOverride};
use crate::gap::{GapAnalysis, GapLabel};
use crate::history::{
    load_history, resolve_history_path, HistoricalRateSource, HistoricalRates, HistoryError,
    Market,
};
use crate::presets::{self, CalibrationProfile, RegistryError, ScenarioPreset};
use crate::projection::{
    fair_value_rate, RateDecision, RateDecisionSeries, RateStep, SeriesSummary, SmoothingConfig,
    SmoothingEngine, StartingRateSource,
};

/// Periods simulated when neither the request nor history says otherwise
pub const DEFAULT_PERIODS: u32 = 24;

pub const DEFAULT_SCENARIO: &str = "Soft Landing";
pub const DEFAULT_CALIBRATION: &str = "Standard";

#[derive(Debug, Clone, Error, PartialEq)]
pub enum SimulationError {
    #[error(transparent)]
    NotFound(#[from] RegistryError),

    #[error("no historical rates registered for {0}; gap analysis skipped")]
    UnsupportedMarket(Market),
}

/// Scenario choice: registry preset or caller-built path
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScenarioSelection {
    Preset(String),
    Custom {
        state: EconomicState,
        #[serde(default)]
        overrides: Vec<StateOverride>,
        /// Reported scenario name; "Custom" when absent
        #[serde(default)]
        name: Option<String>,
    },
}

impl ScenarioSelection {
    pub fn preset(name: impl Into<String>) -> Self {
        ScenarioSelection::Preset(name.into())
    }

    pub fn custom(state: EconomicState) -> Self {
        ScenarioSelection::Custom {
            state,
            overrides: Vec::new(),
            name: None,
        }
    }

    /// A preset's path with its template replaced by `state`
    ///
    /// The preset's time-varying overrides still apply from their periods on.
    pub fn adjusted_preset(preset: &ScenarioPreset, state: EconomicState) -> Self {
        ScenarioSelection::Custom {
            state,
            overrides: preset.overrides.to_vec(),
            name: Some(format!("{} (adjusted)", preset.name)),
        }
    }
}

impl Default for ScenarioSelection {
    fn default() -> Self {
        Self::preset(DEFAULT_SCENARIO)
    }
}

/// Calibration choice: registry preset or caller-built profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CalibrationSelection {
    Preset(String),
    Custom(CalibrationProfile),
}

impl CalibrationSelection {
    pub fn preset(name: impl Into<String>) -> Self {
        CalibrationSelection::Preset(name.into())
    }
}

impl Default for CalibrationSelection {
    fn default() -> Self {
        Self::preset(DEFAULT_CALIBRATION)
    }
}

/// Input record for a simulation run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationRequest {
    pub market: Market,

    #[serde(default)]
    pub scenario: ScenarioSelection,

    #[serde(default)]
    pub calibration: CalibrationSelection,

    /// Replaces the profile's ρ for this run only
    #[serde(default)]
    pub smoothing_factor_override: Option<f64>,

    /// r₀; defaults to the first historical rate, then to period-1 fair value
    #[serde(default)]
    pub starting_rate: Option<f64>,

    /// Number of periods; defaults to the market's history length
    #[serde(default)]
    pub periods: Option<u32>,

    /// Discrete step policy; `None` keeps the continuous path
    #[serde(default)]
    pub step: Option<RateStep>,
}

impl SimulationRequest {
    pub fn new(market: Market) -> Self {
        Self {
            market,
            scenario: ScenarioSelection::default(),
            calibration: CalibrationSelection::default(),
            smoothing_factor_override: None,
            starting_rate: None,
            periods: None,
            step: None,
        }
    }

    pub fn with_scenario(mut self, scenario: ScenarioSelection) -> Self {
        self.scenario = scenario;
        self
    }

    pub fn with_calibration(mut self, calibration: CalibrationSelection) -> Self {
        self.calibration = calibration;
        self
    }

    pub fn with_periods(mut self, periods: u32) -> Self {
        self.periods = Some(periods);
        self
    }

    pub fn with_starting_rate(mut self, rate: f64) -> Self {
        self.starting_rate = Some(rate);
        self
    }

    pub fn with_smoothing_factor(mut self, rho: f64) -> Self {
        self.smoothing_factor_override = Some(rho);
        self
    }

    pub fn with_step(mut self, step: RateStep) -> Self {
        self.step = Some(step);
        self
    }

    /// Same request for a different market
    pub fn for_market(&self, market: Market) -> Self {
        Self {
            market,
            ..self.clone()
        }
    }
}

/// Result of a run: the model series always, gap analysis when possible
#[derive(Debug, Clone)]
pub struct SimulationOutcome {
    pub market: Market,
    pub scenario: String,
    pub profile: CalibrationProfile,
    pub smoothing: SmoothingConfig,
    pub series: RateDecisionSeries,
    pub gap_analysis: Result<GapAnalysis, SimulationError>,
}

impl SimulationOutcome {
    pub fn gap(&self) -> Option<&GapAnalysis> {
        self.gap_analysis.as_ref().ok()
    }

    /// Non-fatal notice for the caller, if gap analysis was skipped
    pub fn notice(&self) -> Option<String> {
        self.gap_analysis.as_ref().err().map(|e| e.to_string())
    }

    pub fn report(&self) -> SimulationReport {
        SimulationReport {
            market: self.market,
            scenario: self.scenario.clone(),
            profile: self.profile.clone(),
            smoothing: self.smoothing,
            summary: self.series.summary(),
            series: self.series.clone(),
            gaps: self.gap().map(|g| {
                g.results
                    .iter()
                    .map(|r| GapRow {
                        period: r.period,
                        historical_rate: r.historical_rate,
                        smoothed_rate: r.smoothed_rate,
                        gap_bps: r.gap_bps,
                        label: r.label(),
                    })
                    .collect()
            }),
            gap_summary: self.gap().map(|g| g.summary.clone()),
            notice: self.notice(),
        }
    }
}

/// Gap row with its presentation label attached
#[derive(Debug, Clone, Serialize)]
pub struct GapRow {
    pub period: u32,
    pub historical_rate: f64,
    pub smoothed_rate: f64,
    pub gap_bps: f64,
    pub label: GapLabel,
}

/// Serializable view of an outcome for presentation layers
#[derive(Debug, Clone, Serialize)]
pub struct SimulationReport {
    pub market: Market,
    pub scenario: String,
    pub profile: CalibrationProfile,
    pub smoothing: SmoothingConfig,
    pub summary: SeriesSummary,
    pub series: RateDecisionSeries,
    pub gaps: Option<Vec<GapRow>>,
    pub gap_summary: Option<crate::gap::GapSummary>,
    pub notice: Option<String>,
}

/// Simulation session holding the read-only historical source
///
/// # Example
/// ```ignore
/// let session = MarketSimulationSession::from_csv_path("data/historical/policy_rates.csv")?;
/// let request = SimulationRequest::new(Market::India)
///     .with_scenario(ScenarioSelection::preset("Stagflation"));
/// let outcome = session.run(&request)?;
/// ```
#[derive(Debug, Clone, Default)]
pub struct MarketSimulationSession<S = HistoricalRates> {
    history: S,
}

impl MarketSimulationSession<HistoricalRates> {
    /// Session without any historical data
    pub fn new() -> Self {
        Self::default()
    }

    /// Session backed by the historical rates CSV at `path`
    pub fn from_csv_path<P: AsRef<std::path::Path>>(path: P) -> Result<Self, HistoryError> {
        Ok(Self {
            history: load_history(path)?,
        })
    }

    /// Load history from `explicit`, `POLICY_RATE_HISTORY` or the default
    /// file; with none of those available the session runs model-only
    pub fn discover(explicit: Option<&std::path::Path>) -> Result<Self, HistoryError> {
        match resolve_history_path(explicit) {
            Some(path) => {
                log::info!("loading historical rates from {}", path.display());
                Self::from_csv_path(path)
            }
            None => {
                log::info!("no historical rates file found; gap analysis unavailable");
                Ok(Self::new())
            }
        }
    }
}

impl<S: HistoricalRateSource> MarketSimulationSession<S> {
    pub fn with_history(history: S) -> Self {
        Self { history }
    }

    pub fn history(&self) -> &S {
        &self.history
    }

    /// Run one simulation
    ///
    /// Fails only when a preset name does not resolve. Missing history for the
    /// market is reported inside the outcome.
    pub fn run(&self, request: &SimulationRequest) -> Result<SimulationOutcome, SimulationError> {
        // Resolve every input before computing anything
        let (scenario, path) = resolve_scenario(&request.scenario)?;
        let mut profile = resolve_calibration(&request.calibration)?;
        if let Some(rho) = request.smoothing_factor_override {
            profile = profile.with_smoothing_factor(rho);
        }

        let market = request.market;
        let history = self.history.series(market);

        let periods = request
            .periods
            .or_else(|| history.and_then(|h| h.last_period()))
            .unwrap_or(DEFAULT_PERIODS);

        let states = path.states(periods);
        let targets: Vec<f64> = states.iter().map(|s| fair_value_rate(s, &profile)).collect();

        let (starting_rate, source) = match request.starting_rate {
            Some(rate) => (rate, StartingRateSource::Supplied),
            None => match history.and_then(|h| h.rate_at(1)) {
                Some(rate) => (rate, StartingRateSource::Historical),
                None => (
                    targets.first().copied().unwrap_or(0.0),
                    StartingRateSource::FairValue,
                ),
            },
        };
        log::debug!("{market}: starting rate {starting_rate:.2}% ({source:?})");

        let smoothing = SmoothingConfig {
            smoothing_factor: profile.smoothing_factor,
            step: request.step,
        };
        let steps = SmoothingEngine::new(smoothing, starting_rate).smooth(targets.iter().copied());

        let mut series = RateDecisionSeries::new(starting_rate, source);
        for (state, step) in states.into_iter().zip(steps) {
            series.add_decision(RateDecision {
                period: step.period,
                state,
                fair_value_rate: step.target,
                smoothed_rate: step.rate,
            });
        }

        let gap_analysis = match history {
            Some(h) => Ok(GapAnalysis::run(&series, h)),
            None => {
                log::warn!("no historical rates for {market}; returning model series only");
                Err(SimulationError::UnsupportedMarket(market))
            }
        };

        log::info!(
            "{market}: simulated {} periods ({scenario} / {})",
            series.len(),
            profile.name
        );

        Ok(SimulationOutcome {
            market,
            scenario,
            profile,
            smoothing,
            series,
            gap_analysis,
        })
    }

    /// Run the same request for several markets, one after another
    pub fn run_markets(
        &self,
        request: &SimulationRequest,
        markets: &[Market],
    ) -> Vec<Result<SimulationOutcome, SimulationError>> {
        markets
            .iter()
            .map(|&m| self.run(&request.for_market(m)))
            .collect()
    }
}

fn resolve_scenario(
    selection: &ScenarioSelection,
) -> Result<(String, ScenarioPath<'_>), SimulationError> {
    match selection {
        ScenarioSelection::Preset(name) => {
            let preset = presets::scenario(name)?;
            log::debug!("resolved scenario '{name}' -> {}", preset.name);
            Ok((preset.name.to_string(), preset.path()))
        }
        ScenarioSelection::Custom {
            state,
            overrides,
            name,
        } => Ok((
            name.clone().unwrap_or_else(|| "Custom".to_string()),
            ScenarioPath::new(*state, overrides),
        )),
    }
}

fn resolve_calibration(
    selection: &CalibrationSelection,
) -> Result<CalibrationProfile, SimulationError> {
    match selection {
        CalibrationSelection::Preset(name) => {
            let profile = presets::calibration(name)?;
            log::debug!("resolved calibration '{name}' -> {}", profile.name);
            Ok(profile.clone())
        }
        CalibrationSelection::Custom(profile) => Ok(profile.clone()),
    }
}
