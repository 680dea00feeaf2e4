//! Run one scenario/calibration across every market and compare policy gaps
//!
//! Outputs one row per market plus a period-by-period CSV for charting.

use std::fs::File;
use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use policy_rate_simulator::{
    CalibrationSelection, Market, MarketSimulationSession, ScenarioSelection, SimulationRequest,
};

#[derive(Parser, Debug)]
#[command(name = "compare_markets", about = "Compare model vs. actual policy rates across markets")]
struct Cli {
    #[arg(long, default_value = "Stagflation")]
    scenario: String,

    #[arg(long, default_value = "Standard")]
    calibration: String,

    #[arg(long)]
    periods: Option<u32>,

    #[arg(long)]
    history: Option<PathBuf>,

    #[arg(long, default_value = "market_comparison.csv")]
    output: PathBuf,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let session = MarketSimulationSession::discover(cli.history.as_deref())?;
    let mut request = SimulationRequest::new(Market::India)
        .with_scenario(ScenarioSelection::preset(&cli.scenario))
        .with_calibration(CalibrationSelection::preset(&cli.calibration));
    request.periods = cli.periods;

    let mut outcomes = Vec::new();
    for result in session.run_markets(&request, &Market::ALL) {
        outcomes.push(result?);
    }

    println!("Scenario: {} / Calibration: {}\n", cli.scenario, cli.calibration);
    println!(
        "{:<10} {:>8} {:>10} {:>10} {:>10} {:>10}  {}",
        "Market", "Periods", "Start", "Final", "MeanGap", "MaxGap", "Latest reading"
    );
    println!("{}", "-".repeat(80));

    for outcome in &outcomes {
        let summary = outcome.series.summary();
        match outcome.gap() {
            Some(g) => println!(
                "{:<10} {:>8} {:>10.2} {:>10.2} {:>10.0} {:>10.0}  {}",
                outcome.market.name(),
                summary.periods,
                summary.starting_rate,
                summary.final_rate,
                g.summary.mean_gap_bps,
                g.summary.max_abs_gap_bps,
                g.summary
                    .latest
                    .map(|l| format!("{} ({:+.0} bps)", l.label(), l.gap_bps))
                    .unwrap_or_else(|| "-".into()),
            ),
            None => println!(
                "{:<10} {:>8} {:>10.2} {:>10.2} {:>10} {:>10}  {}",
                outcome.market.name(),
                summary.periods,
                summary.starting_rate,
                summary.final_rate,
                "-",
                "-",
                outcome.notice().unwrap_or_default(),
            ),
        }
    }

    let mut file = File::create(&cli.output)
        .with_context(|| format!("failed to create {}", cli.output.display()))?;
    writeln!(file, "Market,Period,FairValue,Smoothed,Historical,GapBps")?;
    for outcome in &outcomes {
        for d in &outcome.series.decisions {
            let gap = outcome
                .gap()
                .and_then(|g| g.results.iter().find(|r| r.period == d.period));
            writeln!(
                file,
                "{},{},{:.6},{:.6},{},{}",
                outcome.market,
                d.period,
                d.fair_value_rate,
                d.smoothed_rate,
                gap.map(|g| format!("{:.4}", g.historical_rate)).unwrap_or_default(),
                gap.map(|g| format!("{:.2}", g.gap_bps)).unwrap_or_default(),
            )?;
        }
    }

    println!("\nOutput written to {}", cli.output.display());
    Ok(())
}
