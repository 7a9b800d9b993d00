//! Fixture writers shared by the integration tests

use std::fs;
use std::path::{Path, PathBuf};

use social_risk_index::{District, PipelineConfig};

/// Indicator kept by the income transform
pub const MEDIAN_INDICATOR: &str = "Mediana de la renta por unidad de consumo";

/// Income source header, tab separated
pub const INCOME_HEADER: &str =
    "Municipios\tDistritos\tSecciones\tIndicadores de renta media y mediana\tPeriodo\tTotal";

/// Unemployment header, the month code column carries a trailing space as
/// in the published files
pub const UNEMPLOYMENT_HEADER: &str = "Código mes ;Mes;Código de CA;Comunidad Autónoma;Codigo Provincia;Provincia;Código Municipio;Municipio;total Paro Registrado";

/// Encode text as ISO-8859-1
///
/// # Panics
/// On characters outside Latin-1.
#[must_use]
pub fn latin1(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| u8::try_from(u32::from(c)).expect("character outside Latin-1"))
        .collect()
}

/// Income source label of a district, e.g. `4109102 Sevilla distrito 02`
#[must_use]
pub fn district_label(district: District) -> String {
    format!(
        "41091{:02} Sevilla distrito {:02}",
        district.number(),
        district.number()
    )
}

/// Spanish formatted thousands, e.g. 12345 -> `12.345`
#[must_use]
pub fn spanish_thousands(value: u32) -> String {
    if value >= 1000 {
        format!("{}.{:03}", value / 1000, value % 1000)
    } else {
        value.to_string()
    }
}

/// One income data row
#[must_use]
pub fn income_row(municipality: &str, district: &str, indicator: &str, year: i32, total: &str) -> String {
    format!("{municipality}\t{district}\t\t{indicator}\t{year}\t{total}")
}

/// Synthetic median income of a district in a year
///
/// Rises with the district number and with the year.
#[must_use]
pub fn synthetic_income(district: District, year: i32) -> u32 {
    let year_offset = u32::try_from(year - 2020).unwrap_or(0);
    10_000 + u32::from(district.number()) * 1_000 + year_offset * 200
}

/// Write the income source for every district and `years`
pub fn write_income_source(path: &Path, years: &[i32]) {
    let mut lines = vec![INCOME_HEADER.to_string()];
    for &year in years {
        // Municipality aggregate with a blank district
        lines.push(income_row("41091 Sevilla", " ", MEDIAN_INDICATOR, year, "99.999"));
        // Another municipality of the province
        lines.push(income_row(
            "41038 Dos Hermanas",
            "4103801 Dos Hermanas distrito 01",
            MEDIAN_INDICATOR,
            year,
            "1.000",
        ));
        for district in District::ALL {
            let label = district_label(district);
            lines.push(income_row(
                "41091 Sevilla",
                &label,
                "Renta neta media por persona",
                year,
                "50.000",
            ));
            lines.push(income_row(
                "41091 Sevilla",
                &label,
                MEDIAN_INDICATOR,
                year,
                &spanish_thousands(synthetic_income(district, year)),
            ));
        }
    }
    let mut text = lines.join("\n");
    text.push('\n');
    fs::write(path, latin1(&text)).expect("write income source");
}

/// One unemployment data row for a municipality of Sevilla province
#[must_use]
pub fn unemployment_row(period: &str, municipality: &str, total: &str) -> String {
    format!("{period};marzo;01;Andalucía;41;Sevilla ;41091;{municipality};{total}")
}

/// Write one unemployment file with a descriptive first line
pub fn write_unemployment_file(dir: &Path, name: &str, rows: &[String]) -> PathBuf {
    let mut text = String::from("Paro registrado por municipios (datos mensuales)\n");
    text.push_str(UNEMPLOYMENT_HEADER);
    text.push('\n');
    for row in rows {
        text.push_str(row);
        text.push('\n');
    }
    let path = dir.join(name);
    fs::write(&path, latin1(&text)).expect("write unemployment file");
    path
}

/// Monthly totals used by the fixture files, per year
#[must_use]
pub fn synthetic_unemployment(year: i32) -> &'static [u32] {
    match year {
        2020 => &[70_000, 72_000],
        2021 => &[68_000],
        2022 => &[65_000, 64_000, 66_000],
        2023 => &[60_000],
        2024 => &[58_000],
        _ => &[],
    }
}

/// Write unemployment files split in two chunks, plus a file the pattern
/// must ignore
pub fn write_unemployment_sources(dir: &Path, years: &[i32]) {
    fs::create_dir_all(dir).expect("create unemployment dir");
    let (first, second): (Vec<i32>, Vec<i32>) = years.iter().copied().partition(|&y| y <= 2021);
    for (name, chunk) in [
        ("Paro_por_municipios_2020_2021.csv", first),
        ("Paro_por_municipios_2022_2024.csv", second),
    ] {
        let mut rows = Vec::new();
        for year in chunk {
            for (month, total) in synthetic_unemployment(year).iter().enumerate() {
                let period = format!("{year}{:02}", month + 1);
                rows.push(unemployment_row(&period, "Sevilla", &total.to_string()));
                rows.push(unemployment_row(&period, "Dos Hermanas", "9000"));
                rows.push(unemployment_row(&period, "  sevilla ", "no disponible"));
            }
        }
        write_unemployment_file(dir, name, &rows);
    }
    fs::write(dir.join("leeme.txt"), "not a source").expect("write stray file");
}

/// GeoJSON with one square per district plus one unknown feature
#[must_use]
pub fn boundaries_geojson() -> String {
    let mut features = Vec::new();
    for district in District::ALL {
        let x = f64::from(district.number());
        features.push(format!(
            r#"{{"type":"Feature","properties":{{"Distri_11D":"{}"}},"geometry":{{"type":"Polygon","coordinates":[[[{x},37.0],[{x1},37.0],[{x1},37.9],[{x},37.9],[{x},37.0]]]}}}}"#,
            district.name(),
            x1 = x + 0.9
        ));
    }
    features.push(
        r#"{"type":"Feature","properties":{"Distri_11D":"Aeropuerto"},"geometry":{"type":"MultiPolygon","coordinates":[[[[12.0,37.0],[12.5,37.0],[12.5,37.5]]]]}}"#
            .to_string(),
    );
    format!(
        r#"{{"type":"FeatureCollection","features":[{}]}}"#,
        features.join(",")
    )
}

/// Write every fixture under `base` and return a configuration rooted there
pub fn write_fixtures(base: &Path, income_years: &[i32], unemployment_years: &[i32]) -> PipelineConfig {
    let config = PipelineConfig::default()
        .with_base_dir(base)
        .with_output_dir(base.join("figures"));

    write_income_source(&config.income.path, income_years);
    write_unemployment_sources(&config.unemployment.directory, unemployment_years);
    fs::write(&config.presentation.boundaries_path, boundaries_geojson())
        .expect("write boundaries");

    config
}
