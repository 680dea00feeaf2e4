//! Named macro scenarios for stress-testing the rule

use crate::economy::{EconomicState, ScenarioPath, StateOverride};

use super::{normalize_name, RegistryError};

/// A named macro scenario: template state plus optional time-varying path
#[derive(Debug, Clone)]
pub struct ScenarioPreset {
    pub name: &'static str,
    pub description: &'static str,
    /// Extra lookup keys besides `name`
    pub aliases: &'static [&'static str],
    pub state: EconomicState,
    pub overrides: &'static [StateOverride],
}

impl ScenarioPreset {
    pub fn path(&self) -> ScenarioPath<'static> {
        ScenarioPath::new(self.state, self.overrides)
    }
}

/// Registered scenario presets
pub static SCENARIO_PRESETS: [ScenarioPreset; 3] = [
    ScenarioPreset {
        name: "Stagflation",
        description: "High inflation with a contracting economy",
        aliases: &[],
        state: EconomicState::new(6.0, 2.0, -3.0, 2.0),
        overrides: &[],
    },
    ScenarioPreset {
        name: "Global Recession",
        description: "Demand collapse, inflation undershoots, gradual recovery",
        aliases: &["Recession"],
        state: EconomicState::new(1.5, 2.0, -4.0, 1.0),
        overrides: &[
            StateOverride {
                inflation: Some(0.5),
                output_gap: Some(-6.0),
                ..StateOverride::at(4)
            },
            StateOverride {
                inflation: Some(1.0),
                output_gap: Some(-3.0),
                ..StateOverride::at(10)
            },
        ],
    },
    ScenarioPreset {
        name: "Soft Landing",
        description: "Inflation eases back to target without a downturn",
        aliases: &[],
        state: EconomicState::new(3.0, 2.0, 0.5, 1.0),
        overrides: &[
            StateOverride {
                inflation: Some(2.4),
                output_gap: Some(0.0),
                ..StateOverride::at(7)
            },
            StateOverride {
                inflation: Some(2.0),
                ..StateOverride::at(13)
            },
        ],
    },
];

pub(super) fn lookup(name: &str) -> Result<&'static ScenarioPreset, RegistryError> {
    let key = normalize_name(name);
    SCENARIO_PRESETS
        .iter()
        .find(|s| {
            normalize_name(s.name) == key || s.aliases.iter().any(|a| normalize_name(a) == key)
        })
        .ok_or_else(|| RegistryError::NotFound {
            kind: "scenario",
            name: name.to_string(),
            available: SCENARIO_PRESETS
                .iter()
                .map(|s| s.name)
                .collect::<Vec<_>>()
                .join(", "),
        })
}
