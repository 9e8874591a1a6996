//! Replay runner entry point.

use annotated_app::{Scenario, run};
use std::process::ExitCode;

fn main() -> ExitCode {
    env_logger::init();

    let mut json = false;
    let mut path = None;
    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "--json" => json = true,
            _ => path = Some(arg),
        }
    }
    let Some(path) = path else {
        eprintln!("usage: annotated-replay [--json] <scenario.json>");
        return ExitCode::FAILURE;
    };

    let scenario = match Scenario::load(&path) {
        Ok(scenario) => scenario,
        Err(e) => {
            log::error!("Failed to load {}: {}", path, e);
            return ExitCode::FAILURE;
        }
    };
    log::info!("Replaying {} ({} events)", path, scenario.events.len());

    let report = run(scenario);
    if json {
        match serde_json::to_string_pretty(&report) {
            Ok(text) => println!("{text}"),
            Err(e) => {
                log::error!("Failed to serialize report: {}", e);
                return ExitCode::FAILURE;
            }
        }
    } else {
        print!("{report}");
    }
    ExitCode::SUCCESS
}
