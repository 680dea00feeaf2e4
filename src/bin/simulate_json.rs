//! JSON request/response front end for presentation layers
//!
//! Reads a `SimulationRequest` as JSON (from a file argument or stdin) and
//! writes the `SimulationReport` as JSON to stdout. Unknown preset names
//! produce `{"error": ...}` and a non-zero exit code.
//!
//! Example request:
//!   {"market": "UK", "scenario": {"preset": "Stagflation"}, "step": {"increment": 0.25}}

use std::io::Read;
use std::process::ExitCode;

use anyhow::{Context, Result};
use serde::Serialize;

use policy_rate_simulator::{MarketSimulationSession, SimulationRequest};

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

fn read_request() -> Result<SimulationRequest> {
    let body = match std::env::args().nth(1) {
        Some(path) => std::fs::read_to_string(&path).with_context(|| format!("reading {path}"))?,
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };
    serde_json::from_str(&body).context("invalid simulation request")
}

fn run() -> Result<String> {
    let request = read_request()?;
    let session = MarketSimulationSession::discover(None)?;
    let outcome = session.run(&request)?;
    Ok(serde_json::to_string_pretty(&outcome.report())?)
}

fn main() -> ExitCode {
    env_logger::init();

    match run() {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            let response = ErrorResponse { error: format!("{err:#}") };
            match serde_json::to_string(&response) {
                Ok(json) => println!("{json}"),
                Err(_) => eprintln!("{err:#}"),
            }
            ExitCode::FAILURE
        }
    }
}
