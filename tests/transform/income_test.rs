//! Tests for the income transform over a full synthetic source

use std::collections::HashSet;

use social_risk_index::config::IncomeSourceConfig;
use social_risk_index::transform::{load_income_panel, parse_locale_decimal};
use social_risk_index::{District, IrsError};

use crate::utils::{
    INCOME_HEADER, MEDIAN_INDICATOR, district_label, income_row, latin1, synthetic_income,
    write_income_source,
};

fn config_for(path: std::path::PathBuf) -> IncomeSourceConfig {
    IncomeSourceConfig {
        path,
        ..IncomeSourceConfig::default()
    }
}

#[test]
fn test_locale_decimal_scenarios() {
    assert_eq!(parse_locale_decimal("1.500,50"), Some(1500.50));
    assert_eq!(parse_locale_decimal("2.000"), Some(2000.0));
    assert_eq!(parse_locale_decimal("3000"), Some(3000.0));
    assert_eq!(parse_locale_decimal(".."), None);
    assert_eq!(parse_locale_decimal(""), None);
}

#[test]
fn test_full_panel_has_one_row_per_district_year() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("renta_ine_sevilla.csv");
    write_income_source(&path, &[2019, 2020, 2021, 2022, 2023]);

    let panel = load_income_panel(&config_for(path)).unwrap();
    assert_eq!(panel.len(), 44);
    assert_eq!(panel.dropped_values, 0);
    assert_eq!(panel.collapsed_duplicates, 0);

    let keys: HashSet<(&str, i32)> = panel
        .records
        .iter()
        .map(|r| (r.district.as_str(), r.year))
        .collect();
    assert_eq!(keys.len(), panel.len());
    assert!(panel.records.iter().all(|r| (2020..=2023).contains(&r.year)));

    for record in &panel.records {
        assert!((0.0..=1.0).contains(&record.income_norm));
        approx::assert_abs_diff_eq!(record.income_risk, 1.0 - record.income_norm);
    }

    // Lowest income (district 01, 2020) carries the highest risk
    let casco = district_label(District::CascoAntiguo);
    let first = &panel.records[0];
    assert_eq!(first.district, casco);
    assert_eq!(first.year, 2020);
    assert_eq!(
        first.median_income,
        f64::from(synthetic_income(District::CascoAntiguo, 2020))
    );
    assert_eq!(first.income_risk, 1.0);

    let norte = panel
        .records
        .iter()
        .find(|r| r.district == district_label(District::Norte) && r.year == 2023)
        .unwrap();
    assert_eq!(norte.income_risk, 0.0);
}

#[test]
fn test_short_panel_still_builds() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("renta_ine_sevilla.csv");
    write_income_source(&path, &[2022, 2023]);

    // Size check only warns
    let panel = load_income_panel(&config_for(path)).unwrap();
    assert_eq!(panel.len(), 22);
}

#[test]
fn test_no_year_in_window_is_no_data() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("renta_ine_sevilla.csv");
    write_income_source(&path, &[2018, 2019]);

    assert!(matches!(
        load_income_panel(&config_for(path)),
        Err(IrsError::NoData { .. })
    ));
}

#[test]
fn test_district_outside_the_fixed_set_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("renta_ine_sevilla.csv");
    let lines = [
        INCOME_HEADER.to_string(),
        income_row("41091 Sevilla", &district_label(District::CascoAntiguo), MEDIAN_INDICATOR, 2020, "10.000"),
        income_row("41091 Sevilla", "4109112 Sevilla distrito 12", MEDIAN_INDICATOR, 2020, "12.000"),
    ];
    std::fs::write(&path, latin1(&lines.join("\n"))).unwrap();

    match load_income_panel(&config_for(path)) {
        Err(IrsError::UnknownDistrict { code }) => assert_eq!(code, "4109112 Sevilla distrito 12"),
        other => panic!("expected an unknown district, got {other:?}"),
    }
}
