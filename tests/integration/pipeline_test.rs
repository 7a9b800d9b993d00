//! End-to-end tests of the pipeline over synthetic sources

use std::fs;

use social_risk_index::export::{read_risk_panel, read_risk_records};
use social_risk_index::{AlertLevel, IrsError, Stage, compute_panels, run};

use crate::utils::write_fixtures;

const INCOME_YEARS: [i32; 4] = [2020, 2021, 2022, 2023];
const UNEMPLOYMENT_YEARS: [i32; 5] = [2020, 2021, 2022, 2023, 2024];

#[test]
fn test_full_run_writes_export_and_artifacts() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_fixtures(dir.path(), &INCOME_YEARS, &UNEMPLOYMENT_YEARS);

    let output = run(&config).unwrap();

    // Panels
    assert_eq!(output.income.len(), 44);
    assert_eq!(output.unemployment.records.len(), 5);
    assert_eq!(output.risk.len(), 44);
    assert_eq!(output.risk.districts().len(), 11);
    assert_eq!(output.risk.years(), INCOME_YEARS.to_vec());
    assert!(output.risk.incomplete_joins.is_empty());
    for record in output.risk.for_year(2020) {
        assert_eq!(record.irs_prev, None);
        assert_eq!(record.alert_level, AlertLevel::Ok);
    }

    // Report
    let report = &output.report;
    assert!(report.income_complete());
    assert_eq!(report.unemployment_files, 2);
    assert_eq!(report.risk_rows, 44);
    assert_eq!(report.red_total, output.risk.red_alerts().len());
    assert_eq!(report.artifacts.len(), 5);
    assert!(report.to_string().contains("Risk Panel: 44 rows, 11 districts, years 2020-2023"));

    // Parquet export
    assert_eq!(report.artifacts[0], config.export_path);
    let rows: usize = read_risk_panel(&config.export_path)
        .unwrap()
        .iter()
        .map(|b| b.num_rows())
        .sum();
    assert_eq!(rows, 44);
    assert_eq!(read_risk_records(&config.export_path).unwrap(), output.risk.records);

    // Charts and map
    let names = &config.presentation.artifacts;
    for name in [&names.ranking, &names.series, &names.table, &names.map] {
        let path = config.presentation.artifact_path(name);
        assert!(report.artifacts.contains(&path), "{} not reported", path.display());
        let svg = fs::read_to_string(&path).unwrap();
        assert!(svg.contains("<svg"), "{} is not an SVG", path.display());
    }
}

#[test]
fn test_missing_unemployment_year_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_fixtures(dir.path(), &INCOME_YEARS, &[2020, 2021, 2022, 2024]);

    let (income, _, risk) = compute_panels(&config).unwrap();
    assert_eq!(income.len(), 44);
    assert_eq!(risk.len(), 33);
    assert_eq!(risk.incomplete_joins.len(), 11);
    assert!(risk.incomplete_joins.iter().all(|join| join.year == 2023));
    assert!(matches!(
        risk.incomplete_joins[0].to_error(),
        IrsError::IncompleteJoin { year: 2023, .. }
    ));

    // The ranking year has no index, so presentation fails
    let err = run(&config).unwrap_err();
    assert_eq!(err.stage(), Some(Stage::Presentation));
    assert!(matches!(
        err,
        IrsError::Stage { source, .. } if matches!(*source, IrsError::NoData { .. })
    ));
}

#[test]
fn test_failing_stage_is_named() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_fixtures(dir.path(), &INCOME_YEARS, &UNEMPLOYMENT_YEARS);

    fs::remove_file(&config.income.path).unwrap();
    let err = run(&config).unwrap_err();
    assert_eq!(err.stage(), Some(Stage::Income));
    assert!(err.to_string().starts_with("income stage failed"));

    let config = write_fixtures(dir.path(), &INCOME_YEARS, &UNEMPLOYMENT_YEARS);
    fs::remove_file(&config.presentation.boundaries_path).unwrap();
    let err = run(&config).unwrap_err();
    assert_eq!(err.stage(), Some(Stage::Boundaries));
    assert!(matches!(
        err,
        IrsError::Stage { source, .. } if matches!(*source, IrsError::SourceNotFound { .. })
    ));
}
