//! Taylor Rule calibration profiles (coefficients and policy inertia)

use std::borrow::Cow;

use serde::{Deserialize, Serialize};

use super::{normalize_name, RegistryError};

/// Coefficient set for the Taylor Rule and the smoothing recurrence
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalibrationProfile {
    pub name: Cow<'static, str>,

    /// Response to the inflation gap (λ_π)
    pub inflation_weight: f64,

    /// Response to the output gap (λ_y)
    pub output_gap_weight: f64,

    /// Policy inertia ρ; 0 jumps straight to fair value, 1 never moves
    pub smoothing_factor: f64,
}

impl CalibrationProfile {
    /// Build an ad-hoc profile outside the registry
    pub fn custom(
        name: impl Into<String>,
        inflation_weight: f64,
        output_gap_weight: f64,
        smoothing_factor: f64,
    ) -> Self {
        Self {
            name: Cow::Owned(name.into()),
            inflation_weight,
            output_gap_weight,
            smoothing_factor,
        }
    }

    /// Copy of this profile with a different smoothing factor
    pub fn with_smoothing_factor(&self, smoothing_factor: f64) -> Self {
        Self {
            smoothing_factor,
            ..self.clone()
        }
    }

    /// Registry entry matching the default "Standard" calibration
    pub fn standard() -> &'static CalibrationProfile {
        &CALIBRATION_PROFILES[0]
    }
}

/// Registered calibration profiles
pub static CALIBRATION_PROFILES: [CalibrationProfile; 3] = [
    // Classic Taylor (1993) weights
    CalibrationProfile {
        name: Cow::Borrowed("Standard"),
        inflation_weight: 0.5,
        output_gap_weight: 0.5,
        smoothing_factor: 0.75,
    },
    // Inflation-first; moves faster
    CalibrationProfile {
        name: Cow::Borrowed("Hawk"),
        inflation_weight: 1.5,
        output_gap_weight: 0.25,
        smoothing_factor: 0.6,
    },
    // Equal emphasis on employment; more gradual
    CalibrationProfile {
        name: Cow::Borrowed("Dual Mandate"),
        inflation_weight: 0.5,
        output_gap_weight: 1.0,
        smoothing_factor: 0.85,
    },
];

pub(super) fn lookup(name: &str) -> Result<&'static CalibrationProfile, RegistryError> {
    let key = normalize_name(name);
    CALIBRATION_PROFILES
        .iter()
        .find(|p| normalize_name(&p.name) == key)
        .ok_or_else(|| RegistryError::NotFound {
            kind: "calibration profile",
            name: name.to_string(),
            available: CALIBRATION_PROFILES
                .iter()
                .map(|p| p.name.as_ref())
                .collect::<Vec<_>>()
                .join(", "),
        })
}
