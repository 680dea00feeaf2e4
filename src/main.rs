//! Policy Rate Simulator CLI
//!
//! Runs one market through a scenario and calibration, prints the rate path
//! and writes the full series to CSV.

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};

use policy_rate_simulator::presets::{self, CALIBRATION_PROFILES, SCENARIO_PRESETS};
use policy_rate_simulator::projection::taylor::decompose;
use policy_rate_simulator::{
    CalibrationProfile, CalibrationSelection, EconomicState, HistoricalRateSource, Market,
    MarketSimulationSession, RateStep, ScenarioSelection, SimulationOutcome, SimulationRequest,
    SnapFeedback,
};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Feedback {
    Rounded,
    Unrounded,
}

impl From<Feedback> for SnapFeedback {
    fn from(f: Feedback) -> Self {
        match f {
            Feedback::Rounded => SnapFeedback::Rounded,
            Feedback::Unrounded => SnapFeedback::Unrounded,
        }
    }
}

#[derive(Parser, Debug)]
#[command(
    name = "policy-rate",
    about = "Taylor Rule fair value vs. actual policy rates with policy inertia"
)]
struct Cli {
    /// India, UK or Singapore
    #[arg(long, default_value = "India")]
    market: Market,

    /// Scenario preset name, or "custom" to start from a neutral economy
    #[arg(long, default_value = "Soft Landing")]
    scenario: String,

    /// Calibration profile name, or "custom" (requires both weights)
    #[arg(long, default_value = "Standard")]
    calibration: String,

    /// Inflation in percent; overrides the scenario template
    #[arg(long)]
    inflation: Option<f64>,

    /// Inflation target in percent
    #[arg(long)]
    inflation_target: Option<f64>,

    /// Output gap in percent
    #[arg(long)]
    output_gap: Option<f64>,

    /// Neutral real rate in percent
    #[arg(long)]
    neutral_rate: Option<f64>,

    /// λ_π; replaces the named profile's weight
    #[arg(long)]
    inflation_weight: Option<f64>,

    /// λ_y; replaces the named profile's weight
    #[arg(long)]
    output_gap_weight: Option<f64>,

    /// Smoothing factor ρ override
    #[arg(long)]
    smoothing: Option<f64>,

    /// Starting rate r₀ in percent
    #[arg(long)]
    start_rate: Option<f64>,

    /// Number of periods to simulate
    #[arg(long)]
    periods: Option<u32>,

    /// Snap decisions to this many basis points (e.g. 25)
    #[arg(long)]
    step_bps: Option<f64>,

    /// Which rate feeds the next step when snapping
    #[arg(long, value_enum, default_value_t = Feedback::Rounded)]
    snap_feedback: Feedback,

    /// Historical rates CSV (default: $POLICY_RATE_HISTORY or data/historical/policy_rates.csv)
    #[arg(long)]
    history: Option<PathBuf>,

    /// Output CSV path
    #[arg(long, default_value = "policy_rate_output.csv")]
    output: PathBuf,

    /// Print the report as JSON instead of a table
    #[arg(long)]
    json: bool,

    /// List registered scenarios and calibrations, then exit
    #[arg(long)]
    list: bool,
}

const NEUTRAL_ECONOMY: EconomicState = EconomicState::new(2.0, 2.0, 0.0, 1.0);

fn is_custom(name: &str) -> bool {
    name.eq_ignore_ascii_case("custom")
}

fn build_request(cli: &Cli) -> Result<SimulationRequest> {
    let state_flags_given = cli.inflation.is_some()
        || cli.inflation_target.is_some()
        || cli.output_gap.is_some()
        || cli.neutral_rate.is_some();

    let adjust = |base: EconomicState| EconomicState {
        inflation: cli.inflation.unwrap_or(base.inflation),
        inflation_target: cli.inflation_target.unwrap_or(base.inflation_target),
        output_gap: cli.output_gap.unwrap_or(base.output_gap),
        neutral_real_rate: cli.neutral_rate.unwrap_or(base.neutral_real_rate),
    };

    let scenario = if is_custom(&cli.scenario) {
        ScenarioSelection::custom(adjust(NEUTRAL_ECONOMY))
    } else if state_flags_given {
        let preset = presets::scenario(&cli.scenario)?;
        ScenarioSelection::adjusted_preset(preset, adjust(preset.state))
    } else {
        ScenarioSelection::preset(&cli.scenario)
    };

    let weight_flags_given = cli.inflation_weight.is_some() || cli.output_gap_weight.is_some();

    let calibration = if is_custom(&cli.calibration) {
        let (Some(lp), Some(ly)) = (cli.inflation_weight, cli.output_gap_weight) else {
            anyhow::bail!("--calibration custom needs --inflation-weight and --output-gap-weight");
        };
        let rho = CalibrationProfile::standard().smoothing_factor;
        CalibrationSelection::Custom(CalibrationProfile::custom("Custom", lp, ly, rho))
    } else if weight_flags_given {
        let seed = presets::calibration(&cli.calibration)?;
        CalibrationSelection::Custom(CalibrationProfile::custom(
            format!("{} (adjusted)", seed.name),
            cli.inflation_weight.unwrap_or(seed.inflation_weight),
            cli.output_gap_weight.unwrap_or(seed.output_gap_weight),
            seed.smoothing_factor,
        ))
    } else {
        CalibrationSelection::preset(&cli.calibration)
    };

    Ok(SimulationRequest {
        market: cli.market,
        scenario,
        calibration,
        smoothing_factor_override: cli.smoothing,
        starting_rate: cli.start_rate,
        periods: cli.periods,
        step: cli.step_bps.map(|bps| RateStep {
            increment: bps / 100.0,
            feedback: cli.snap_feedback.into(),
        }),
    })
}

fn print_registries() {
    println!("Scenarios:");
    for s in SCENARIO_PRESETS.iter() {
        println!(
            "  {:<18} π={:>5.2} π*={:>5.2} gap={:>5.2} r*={:>5.2}  {}",
            s.name,
            s.state.inflation,
            s.state.inflation_target,
            s.state.output_gap,
            s.state.neutral_real_rate,
            s.description
        );
    }
    println!("\nCalibrations:");
    for p in CALIBRATION_PROFILES.iter() {
        println!(
            "  {:<18} λ_π={:.2} λ_y={:.2} ρ={:.2}",
            p.name,
            p.inflation_weight,
            p.output_gap_weight,
            p.smoothing_factor
        );
    }
}

fn write_csv(
    path: &Path,
    outcome: &SimulationOutcome,
    session: &MarketSimulationSession,
) -> Result<()> {
    let mut file =
        File::create(path).with_context(|| format!("unable to create {}", path.display()))?;
    let history = session.history().series(outcome.market);

    writeln!(
        file,
        "Period,Inflation,InflationTarget,OutputGap,NeutralRate,FairValue,Smoothed,Historical,GapBps"
    )?;
    for d in &outcome.series.decisions {
        let historical = history.and_then(|h| h.rate_at(d.period));
        let gap = outcome
            .gap()
            .and_then(|g| g.results.iter().find(|r| r.period == d.period));
        writeln!(
            file,
            "{},{:.4},{:.4},{:.4},{:.4},{:.6},{:.6},{},{}",
            d.period,
            d.state.inflation,
            d.state.inflation_target,
            d.state.output_gap,
            d.state.neutral_real_rate,
            d.fair_value_rate,
            d.smoothed_rate,
            historical.map(|r| format!("{r:.4}")).unwrap_or_default(),
            gap.map(|g| format!("{:.2}", g.gap_bps)).unwrap_or_default(),
        )?;
    }
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    if cli.list {
        print_registries();
        return Ok(());
    }

    let session = MarketSimulationSession::discover(cli.history.as_deref())?;
    let request = build_request(&cli)?;
    let outcome = session.run(&request)?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&outcome.report())?);
        return Ok(());
    }

    println!("Policy Rate Simulator v{}", env!("CARGO_PKG_VERSION"));
    println!("==========================\n");
    println!("Market:      {}", outcome.market);
    println!("Scenario:    {}", outcome.scenario);
    println!(
        "Calibration: {} (λ_π={:.2}, λ_y={:.2}, ρ={:.2})",
        outcome.profile.name,
        outcome.profile.inflation_weight,
        outcome.profile.output_gap_weight,
        outcome.profile.smoothing_factor
    );
    if let Some(step) = outcome.smoothing.step {
        println!(
            "Step:        {:.0} bps ({:?} feedback)",
            step.increment * 100.0,
            step.feedback
        );
    }
    println!(
        "Start rate:  {:.2}% ({:?})",
        outcome.series.starting_rate, outcome.series.starting_rate_source
    );

    if let Some(first) = outcome.series.decisions.first() {
        let c = decompose(&first.state, &outcome.profile);
        println!(
            "\nPeriod 1 fair value {:.2}% = r* {:.2} + π {:.2} + inflation gap {:+.2} + output gap {:+.2}",
            c.total(),
            c.neutral_real_rate,
            c.inflation,
            c.inflation_gap_term,
            c.output_gap_term
        );
    }

    println!(
        "\n{:>6} {:>8} {:>8} {:>10} {:>10} {:>10} {:>9}  {}",
        "Period", "π", "Gap", "FairValue", "Smoothed", "Actual", "GapBps", "Reading"
    );
    println!("{}", "-".repeat(84));
    for d in &outcome.series.decisions {
        let gap = outcome
            .gap()
            .and_then(|g| g.results.iter().find(|r| r.period == d.period));
        println!(
            "{:>6} {:>8.2} {:>8.2} {:>10.3} {:>10.3} {:>10} {:>9}  {}",
            d.period,
            d.state.inflation,
            d.state.output_gap,
            d.fair_value_rate,
            d.smoothed_rate,
            gap.map(|g| format!("{:.2}", g.historical_rate)).unwrap_or_else(|| "-".into()),
            gap.map(|g| format!("{:+.0}", g.gap_bps)).unwrap_or_else(|| "-".into()),
            gap.map(|g| g.label().to_string()).unwrap_or_default(),
        );
    }

    let summary = outcome.series.summary();
    println!("\nSummary:");
    println!("  Periods:         {}", summary.periods);
    println!("  Final rate:      {:.2}%", summary.final_rate);
    println!("  Final fair value:{:>7.2}%", summary.final_fair_value);
    println!("  Still to move:   {:+.0} bps", summary.residual_gap_bps);
    println!(
        "  Moves:           {} ({:.0} bps hikes, {:.0} bps cuts)",
        summary.rate_changes, summary.total_hikes_bps, summary.total_cuts_bps
    );

    match (outcome.gap(), outcome.notice()) {
        (Some(g), _) => {
            let s = &g.summary;
            println!("\nPolicy gap vs. actual ({} paired periods):", s.paired_periods);
            println!("  Mean gap:     {:+.0} bps", s.mean_gap_bps);
            println!("  Largest |gap|: {:.0} bps", s.max_abs_gap_bps);
            if let Some(latest) = s.latest {
                println!(
                    "  Latest:       period {} {:+.0} bps, {}",
                    latest.period,
                    latest.gap_bps,
                    latest.label()
                );
            }
        }
        (None, Some(notice)) => println!("\nNote: {notice}"),
        (None, None) => {}
    }

    write_csv(&cli.output, &outcome, &session)?;
    println!("\nFull results written to: {}", cli.output.display());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cli(args: &[&str]) -> Cli {
        Cli::parse_from(std::iter::once("policy-rate").chain(args.iter().copied()))
    }

    #[test]
    fn test_plain_preset_passes_through() {
        let request = build_request(&cli(&["--scenario", "Stagflation"])).unwrap();
        assert_eq!(request.scenario, ScenarioSelection::preset("Stagflation"));
        assert_eq!(request.calibration, CalibrationSelection::preset("Standard"));
    }

    #[test]
    fn test_state_flag_keeps_preset_overrides() {
        let request = build_request(&cli(&[
            "--market",
            "UK",
            "--scenario",
            "Global Recession",
            "--neutral-rate",
            "1.0",
            "--periods",
            "12",
        ]))
        .unwrap();
        let outcome = MarketSimulationSession::new().run(&request).unwrap();

        assert_eq!(outcome.scenario, "Global Recession (adjusted)");
        let d = &outcome.series.decisions;
        assert_eq!(d[2].state.output_gap, -4.0);
        assert_eq!(d[3].state.output_gap, -6.0);
        assert_eq!(d[3].state.inflation, 0.5);
        assert_eq!(d[9].state.output_gap, -3.0);
        assert!(d.iter().all(|x| x.state.neutral_real_rate == 1.0));
    }

    #[test]
    fn test_custom_scenario_starts_from_neutral_economy() {
        let request = build_request(&cli(&["--scenario", "custom", "--inflation", "4"])).unwrap();
        assert_eq!(
            request.scenario,
            ScenarioSelection::custom(EconomicState {
                inflation: 4.0,
                ..NEUTRAL_ECONOMY
            })
        );
    }

    #[test]
    fn test_state_flag_with_unknown_scenario_fails() {
        let err = build_request(&cli(&["--scenario", "Boom", "--inflation", "4"])).unwrap_err();
        assert!(err.to_string().contains("Boom"));
    }

    #[test]
    fn test_custom_calibration_requires_both_weights() {
        let args = ["--calibration", "custom", "--inflation-weight", "1.0"];
        assert!(build_request(&cli(&args)).is_err());

        let args = [
            "--calibration",
            "custom",
            "--inflation-weight",
            "1.0",
            "--output-gap-weight",
            "0.0",
        ];
        let CalibrationSelection::Custom(profile) = build_request(&cli(&args)).unwrap().calibration
        else {
            panic!("expected a custom calibration");
        };
        assert_eq!(profile.inflation_weight, 1.0);
        assert_eq!(profile.output_gap_weight, 0.0);
        assert_eq!(profile.smoothing_factor, 0.75);
    }

    #[test]
    fn test_weight_flag_adjusts_named_profile() {
        let args = ["--calibration", "Hawk", "--output-gap-weight", "1.0"];
        let CalibrationSelection::Custom(profile) = build_request(&cli(&args)).unwrap().calibration
        else {
            panic!("weight flag was ignored");
        };
        assert_eq!(profile.name, "Hawk (adjusted)");
        assert_eq!(profile.inflation_weight, 1.5);
        assert_eq!(profile.output_gap_weight, 1.0);
        assert_eq!(profile.smoothing_factor, 0.6);
    }

    #[test]
    fn test_step_bps_converts_to_percent() {
        let args = ["--step-bps", "25", "--snap-feedback", "unrounded"];
        let step = build_request(&cli(&args)).unwrap().step.unwrap();
        assert_eq!(step.increment, 0.25);
        assert_eq!(step.feedback, SnapFeedback::Unrounded);
    }
}
