//! Historical policy rates, supplied to the engine as read-only reference data

mod data;
pub mod loader;

pub use data::{
    HistoricalObservation, HistoricalRateSeries, HistoricalRateSource, HistoricalRates, Market,
    UnknownMarket,
};
pub use loader::{load_history, load_history_from_reader, resolve_history_path, HistoryError};
