//! Fair-value and policy inertia projection

mod engine;
mod series;
mod state;
pub mod taylor;

pub use engine::{
    RateStep, SmoothedStep, SmoothingConfig, SmoothingEngine, SnapFeedback, DEFAULT_RATE_INCREMENT,
};
pub use series::{RateDecision, RateDecisionSeries, SeriesSummary, StartingRateSource};
pub use state::SmoothingState;
pub use taylor::{fair_value_rate, TaylorComponents};
