use std::path::Path;
use std::process::ExitCode;

use anyhow::Context;
use log::{error, info};
use social_risk_index::{PipelineConfig, run};

fn main() -> ExitCode {
    // Setup logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match run_pipeline() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run_pipeline() -> anyhow::Result<()> {
    let config = PipelineConfig::default().with_base_dir(Path::new("."));
    info!("{config}");

    let output = run(&config).map_err(|e| {
        let stage = e
            .stage()
            .map_or_else(|| "unknown".to_string(), |s| s.to_string());
        anyhow::Error::new(e).context(format!("Pipeline failed in the {stage} stage"))
    })?;

    let red = output.risk.red_alerts();
    info!(
        "{} district-years indexed, {} RED alerts",
        output.risk.len(),
        red.len()
    );
    println!("{}", output.report);

    std::io::Write::flush(&mut std::io::stdout()).context("Failed to flush report")?;
    Ok(())
}
