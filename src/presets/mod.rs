//! Fixed registries of calibration profiles and macro scenarios
//!
//! Both registries are `static` tables. Custom inputs are built as ordinary
//! values by the caller and never written back here.

mod calibration;
mod scenario;

pub use calibration::{CalibrationProfile, CALIBRATION_PROFILES};
pub use scenario::{ScenarioPreset, SCENARIO_PRESETS};

use thiserror::Error;

/// Registry lookup failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("unknown {kind} '{name}' (available: {available})")]
    NotFound {
        kind: &'static str,
        name: String,
        available: String,
    },
}

/// Canonical key for name matching: lowercase ASCII, no spaces, dashes or underscores
pub(crate) fn normalize_name(name: &str) -> String {
    name.chars()
        .filter(|c| !matches!(c, ' ' | '-' | '_'))
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// Look up a calibration profile by name
pub fn calibration(name: &str) -> Result<&'static CalibrationProfile, RegistryError> {
    calibration::lookup(name)
}

/// Look up a scenario preset by name
pub fn scenario(name: &str) -> Result<&'static ScenarioPreset, RegistryError> {
    scenario::lookup(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_name() {
        assert_eq!(normalize_name("Dual Mandate"), "dualmandate");
        assert_eq!(normalize_name("dual-mandate"), "dualmandate");
        assert_eq!(normalize_name("DUAL_MANDATE"), "dualmandate");
    }

    #[test]
    fn test_not_found_lists_available() {
        let err = calibration("Dove").unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("Dove"));
        assert!(msg.contains("Standard"));
    }
}
