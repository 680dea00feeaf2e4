//! Policy Rate Simulator - Taylor Rule fair value and policy inertia engine
//!
//! This library provides:
//! - Taylor Rule fair-value rates from inflation, output gap and neutral rate
//! - Inertia-adjusted rate paths with optional discrete (e.g. 25 bp) steps
//! - Fixed registries of calibration profiles and macro scenarios
//! - Policy gap analysis against historical rates for India, the UK and Singapore

pub mod economy;
pub mod gap;
pub mod history;
pub mod presets;
pub mod projection;
pub mod session;

// Re-export commonly used types
pub use economy::{EconomicState, ScenarioPath, StateOverride};
pub use gap::{GapAnalysis, GapLabel, PolicyGapResult};
pub use history::{HistoricalRateSeries, HistoricalRateSource, HistoricalRates, Market};
pub use presets::{CalibrationProfile, RegistryError, ScenarioPreset};
pub use projection::{RateDecisionSeries, RateStep, SmoothingConfig, SmoothingEngine, SnapFeedback};
pub use session::{
    CalibrationSelection, MarketSimulationSession, ScenarioSelection, SimulationError,
    SimulationOutcome, SimulationRequest,
};
