//! End-to-end pipeline
//!
//! Stages run strictly in order, each consuming the previous stage's output:
//! income and unemployment panels, the joined risk panel, the Parquet
//! export, then boundaries and presentation. Any failure is tagged with the
//! stage it aborted.

use std::time::Instant;

use crate::algorithm::build_risk_panel;
use crate::config::PipelineConfig;
use crate::error::{Result, Stage, StageContext};
use crate::export::write_risk_panel;
use crate::models::{IncomePanel, RiskPanel, UnemploymentPanel};
use crate::presentation::{PresentationAdapter, SvgPresenter};
use crate::report::RunReport;
use crate::source::load_boundaries;
use crate::transform::{load_income_panel, load_unemployment_panel};

/// Everything a run produced
#[derive(Debug)]
pub struct PipelineOutput {
    pub income: IncomePanel,
    pub unemployment: UnemploymentPanel,
    pub risk: RiskPanel,
    pub report: RunReport,
}

/// Build the three panels without writing anything
///
/// # Errors
/// Any source or transform error, tagged with its stage.
pub fn compute_panels(config: &PipelineConfig) -> Result<(IncomePanel, UnemploymentPanel, RiskPanel)> {
    let income = load_income_panel(&config.income).stage(Stage::Income)?;
    let unemployment = load_unemployment_panel(&config.unemployment).stage(Stage::Unemployment)?;
    let risk = build_risk_panel(&income, &unemployment, &config.risk).stage(Stage::RiskIndex)?;
    Ok((income, unemployment, risk))
}

/// Run every stage, rendering through `presenter`
///
/// # Errors
/// The first failing stage's error, tagged with that stage.
pub fn run_with<P: PresentationAdapter>(config: &PipelineConfig, presenter: &P) -> Result<PipelineOutput> {
    let start = Instant::now();
    log::info!("Starting risk index pipeline");
    log::debug!("{config}");

    let (income, unemployment, risk) = compute_panels(config)?;

    write_risk_panel(&risk, &config.export_path).stage(Stage::Export)?;

    let boundaries = load_boundaries(
        &config.presentation.boundaries_path,
        &config.presentation.name_property,
    )
    .stage(Stage::Boundaries)?;

    let mut artifacts = presenter
        .present(&risk, &boundaries)
        .stage(Stage::Presentation)?;
    artifacts.insert(0, config.export_path.clone());

    let report =
        RunReport::from_panels(config, &income, &unemployment, &risk).with_artifacts(artifacts);
    log::info!("{report}");
    log::info!("Pipeline finished in {:?}", start.elapsed());

    Ok(PipelineOutput {
        income,
        unemployment,
        risk,
        report,
    })
}

/// Run every stage with the SVG presenter
///
/// # Errors
/// See [`run_with`].
pub fn run(config: &PipelineConfig) -> Result<PipelineOutput> {
    let presenter = SvgPresenter::new(config.presentation.clone());
    run_with(config, &presenter)
}
