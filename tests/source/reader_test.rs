//! Tests for delimited source reading and file discovery

use std::fs;

use social_risk_index::IrsError;
use social_risk_index::source::{Encoding, SourceSpec, discover_files, read_source};

use crate::utils::{latin1, unemployment_row, write_unemployment_file};

#[test]
fn test_unemployment_file_headers_are_cleaned() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_unemployment_file(
        dir.path(),
        "Paro_por_municipios_2021.csv",
        &[unemployment_row("202103", "Sevilla", "68000")],
    );

    let rows = read_source(&path, &SourceSpec::new(b';', Encoding::Latin1, 1)).unwrap();
    assert_eq!(rows.headers()[0], "Código mes");
    assert_eq!(rows.headers()[3], "Comunidad Autónoma");
    rows.require_columns(&["Código mes", "Provincia", "Municipio", "total Paro Registrado"])
        .unwrap();

    let rows: Vec<_> = rows.collect::<Result<_, _>>().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].get("Código mes"), Some("202103"));
    assert_eq!(rows[0].get("Provincia"), Some("Sevilla "));
    assert_eq!(rows[0].get("total Paro Registrado"), Some("68000"));

    let map = rows[0].to_map();
    assert_eq!(map.get("Municipio").map(String::as_str), Some("Sevilla"));
}

#[test]
fn test_embedded_newline_in_header_is_removed() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("renta.csv");
    fs::write(&path, latin1("\"Indicadores de renta\nmedia y mediana\"\tTotal\nMediana\t1\n")).unwrap();

    let rows = read_source(&path, &SourceSpec::new(b'\t', Encoding::Latin1, 0)).unwrap();
    assert_eq!(rows.headers()[0], "Indicadores de rentamedia y mediana");
}

#[test]
fn test_missing_column_names_file_and_column() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_unemployment_file(dir.path(), "Paro_por_municipios_2021.csv", &[]);

    let rows = read_source(&path, &SourceSpec::new(b';', Encoding::Latin1, 1)).unwrap();
    match rows.require_columns(&["Provincia", "Paro total"]) {
        Err(IrsError::MissingColumn { path: p, column }) => {
            assert_eq!(p, path);
            assert_eq!(column, "Paro total");
        }
        other => panic!("expected a missing column, got {other:?}"),
    }
}

#[test]
fn test_invalid_utf8_is_a_format_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("utf8.csv");
    fs::write(&path, b"Provincia;Municipio\nSEVILLA;\xe9cija\n").unwrap();

    let err = read_source(&path, &SourceSpec::new(b';', Encoding::Utf8, 0)).err();
    assert!(matches!(err, Some(IrsError::SourceFormat { .. })));

    // The same bytes are fine as Latin-1
    let rows = read_source(&path, &SourceSpec::new(b';', Encoding::Latin1, 0)).unwrap();
    let rows: Vec<_> = rows.collect::<Result<_, _>>().unwrap();
    assert_eq!(rows[0].get("Municipio"), Some("écija"));
}

#[test]
fn test_missing_source_is_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let err = read_source(
        &dir.path().join("renta_ine_sevilla.csv"),
        &SourceSpec::new(b'\t', Encoding::Latin1, 0),
    )
    .err();
    assert!(matches!(err, Some(IrsError::SourceNotFound { .. })));
}

#[test]
fn test_discovery_sorts_by_file_name() {
    let dir = tempfile::tempdir().unwrap();
    for name in [
        "Paro_por_municipios_2023.csv",
        "Paro_por_municipios_2020.csv",
        "Paro_por_municipios_2021.csv",
        "Paro_por_provincias_2021.csv",
    ] {
        fs::write(dir.path().join(name), "").unwrap();
    }
    fs::create_dir(dir.path().join("Paro_por_municipios_old.csv")).unwrap();

    let files = discover_files(dir.path(), "Paro_por_municipios_*.csv").unwrap();
    let names: Vec<_> = files
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(
        names,
        vec![
            "Paro_por_municipios_2020.csv",
            "Paro_por_municipios_2021.csv",
            "Paro_por_municipios_2023.csv",
        ]
    );
}

#[test]
fn test_discovery_empty_match_and_missing_dir() {
    let dir = tempfile::tempdir().unwrap();
    assert!(discover_files(dir.path(), "*.csv").unwrap().is_empty());

    assert!(matches!(
        discover_files(&dir.path().join("Proyecto"), "*.csv"),
        Err(IrsError::SourceNotFound { .. })
    ));
}
