//! Tests for the unemployment transform over multi-file sources

use social_risk_index::IrsError;
use social_risk_index::config::UnemploymentSourceConfig;
use social_risk_index::transform::{derive_year, load_unemployment_panel};

use crate::utils::{unemployment_row, write_unemployment_file, write_unemployment_sources};

fn config_for(dir: &std::path::Path) -> UnemploymentSourceConfig {
    UnemploymentSourceConfig {
        directory: dir.to_path_buf(),
        ..UnemploymentSourceConfig::default()
    }
}

#[test]
fn test_period_code_scenarios() {
    assert_eq!(derive_year("202103").unwrap(), 2021);
    assert!(matches!(
        derive_year("21"),
        Err(IrsError::MalformedPeriod { .. })
    ));
}

#[test]
fn test_yearly_means_across_files() {
    let dir = tempfile::tempdir().unwrap();
    write_unemployment_sources(dir.path(), &[2019, 2020, 2021, 2022, 2023, 2024]);

    let panel = load_unemployment_panel(&config_for(dir.path())).unwrap();
    assert_eq!(panel.files_read, 2);
    assert_eq!(panel.years(), vec![2020, 2021, 2022, 2023, 2024]);

    let totals: Vec<f64> = panel.records.iter().map(|r| r.unemployment_total).collect();
    assert_eq!(totals, vec![71_000.0, 68_000.0, 65_000.0, 60_000.0, 58_000.0]);

    // One non-numeric row per month of the fixture
    assert_eq!(panel.dropped_values, 2 + 1 + 3 + 1 + 1);

    assert_eq!(panel.norm_for_year(2020), Some(1.0));
    assert_eq!(panel.norm_for_year(2024), Some(0.0));
    approx::assert_abs_diff_eq!(
        panel.norm_for_year(2021).unwrap(),
        10_000.0 / 13_000.0,
        epsilon = 1e-12
    );
}

#[test]
fn test_malformed_period_aborts_the_source() {
    let dir = tempfile::tempdir().unwrap();
    write_unemployment_file(
        dir.path(),
        "Paro_por_municipios_2021.csv",
        &[
            unemployment_row("202101", "Sevilla", "68000"),
            unemployment_row("21", "Sevilla", "67000"),
        ],
    );

    assert!(matches!(
        load_unemployment_panel(&config_for(dir.path())),
        Err(IrsError::MalformedPeriod { code }) if code == "21"
    ));
}

#[test]
fn test_other_municipalities_do_not_need_valid_periods() {
    let dir = tempfile::tempdir().unwrap();
    write_unemployment_file(
        dir.path(),
        "Paro_por_municipios_2021.csv",
        &[
            unemployment_row("202101", "Sevilla", "68000"),
            unemployment_row("2x", "Écija", "3000"),
            unemployment_row("202201", "Sevilla", "66000"),
        ],
    );

    let panel = load_unemployment_panel(&config_for(dir.path())).unwrap();
    assert_eq!(panel.years(), vec![2021, 2022]);
}

#[test]
fn test_empty_directory_is_no_data() {
    let dir = tempfile::tempdir().unwrap();
    assert!(matches!(
        load_unemployment_panel(&config_for(dir.path())),
        Err(IrsError::NoData { .. })
    ));
}

#[test]
fn test_missing_directory_is_not_found() {
    let dir = tempfile::tempdir().unwrap();
    assert!(matches!(
        load_unemployment_panel(&config_for(&dir.path().join("Proyecto"))),
        Err(IrsError::SourceNotFound { .. })
    ));
}
