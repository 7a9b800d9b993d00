//! Configuration for the risk index pipeline.
//!
//! Every path, column name, filter value and weight the pipeline uses lives
//! here. The defaults describe the Seville income (INE) and registered
//! unemployment (SEPE) extracts the index was designed around.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::models::district::District;
use crate::source::{Encoding, SourceSpec};

/// Inclusive range of calendar years
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearRange {
    /// First year (inclusive)
    pub start: i32,
    /// Last year (inclusive)
    pub end: i32,
}

impl YearRange {
    /// Create a new inclusive year range
    #[must_use]
    pub const fn new(start: i32, end: i32) -> Self {
        Self { start, end }
    }

    /// Check if a year falls inside the range
    #[must_use]
    pub const fn contains(&self, year: i32) -> bool {
        year >= self.start && year <= self.end
    }

    /// Number of years covered
    #[must_use]
    pub fn len(&self) -> usize {
        usize::try_from(self.end - self.start + 1).unwrap_or(0)
    }

    /// Whether the range covers no year at all
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterate over the years in the range
    pub fn years(&self) -> impl Iterator<Item = i32> {
        self.start..=self.end
    }
}

impl fmt::Display for YearRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

/// Municipality code and name as they appear in the income source,
/// e.g. `41091 Sevilla`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MunicipalityPattern {
    /// Numeric municipality code
    pub code: String,
    /// Municipality name following the code
    pub name: String,
}

impl MunicipalityPattern {
    /// Regular expression source matching `<code><whitespace><name>` at the
    /// start of a field
    #[must_use]
    pub fn regex_source(&self) -> String {
        format!(
            r"^{}\s+{}",
            regex::escape(&self.code),
            regex::escape(&self.name)
        )
    }
}

/// Configuration for the district income source
#[derive(Debug, Clone)]
pub struct IncomeSourceConfig {
    /// Path to the income table
    pub path: PathBuf,
    /// How to read the table
    pub spec: SourceSpec,
    /// Municipality column
    pub municipality_column: String,
    /// District column
    pub district_column: String,
    /// Indicator column
    pub indicator_column: String,
    /// Period (year) column
    pub period_column: String,
    /// Value column
    pub value_column: String,
    /// Municipality to keep
    pub municipality: MunicipalityPattern,
    /// Indicator label to keep
    pub indicator: String,
    /// Years to keep
    pub years: YearRange,
    /// Number of districts expected per year, used for the panel size check
    pub expected_districts: usize,
}

impl Default for IncomeSourceConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("renta_ine_sevilla.csv"),
            spec: SourceSpec::new(b'\t', Encoding::Latin1, 0),
            municipality_column: "Municipios".to_string(),
            district_column: "Distritos".to_string(),
            indicator_column: "Indicadores de renta media y mediana".to_string(),
            period_column: "Periodo".to_string(),
            value_column: "Total".to_string(),
            municipality: MunicipalityPattern {
                code: "41091".to_string(),
                name: "Sevilla".to_string(),
            },
            indicator: "Mediana de la renta por unidad de consumo".to_string(),
            years: YearRange::new(2020, 2023),
            expected_districts: District::ALL.len(),
        }
    }
}

impl IncomeSourceConfig {
    /// Mandatory columns of the income source
    #[must_use]
    pub fn required_columns(&self) -> [&str; 5] {
        [
            self.municipality_column.as_str(),
            self.district_column.as_str(),
            self.indicator_column.as_str(),
            self.period_column.as_str(),
            self.value_column.as_str(),
        ]
    }
}

/// Configuration for the municipal unemployment sources
#[derive(Debug, Clone)]
pub struct UnemploymentSourceConfig {
    /// Directory holding one file per reporting period
    pub directory: PathBuf,
    /// Glob pattern matching the files inside `directory`
    pub file_pattern: String,
    /// How to read each file
    pub spec: SourceSpec,
    /// Province column
    pub province_column: String,
    /// Municipality column
    pub municipality_column: String,
    /// Year-month code column (YYYYMM)
    pub period_column: String,
    /// Total registered unemployment column
    pub value_column: String,
    /// Province to keep, compared uppercase
    pub province: String,
    /// Municipality to keep, compared uppercase
    pub municipality: String,
    /// Years to keep
    pub years: YearRange,
}

impl Default for UnemploymentSourceConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("Proyecto"),
            file_pattern: "Paro_por_municipios_*.csv".to_string(),
            spec: SourceSpec::new(b';', Encoding::Latin1, 1),
            province_column: "Provincia".to_string(),
            municipality_column: "Municipio".to_string(),
            period_column: "Código mes".to_string(),
            value_column: "total Paro Registrado".to_string(),
            province: "SEVILLA".to_string(),
            municipality: "SEVILLA".to_string(),
            years: YearRange::new(2020, 2024),
        }
    }
}

impl UnemploymentSourceConfig {
    /// Mandatory columns of each unemployment file
    #[must_use]
    pub fn required_columns(&self) -> [&str; 4] {
        [
            self.province_column.as_str(),
            self.municipality_column.as_str(),
            self.period_column.as_str(),
            self.value_column.as_str(),
        ]
    }
}

/// Weights and threshold of the risk index
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RiskConfig {
    /// Weight of the structural (income) component
    pub income_weight: f64,
    /// Weight of the cyclical (unemployment) component
    pub unemployment_weight: f64,
    /// Year-over-year relative increase above which a row is RED
    pub alert_threshold: f64,
}

impl Default for RiskConfig {
    fn default() -> Self {
        Self {
            income_weight: 0.7,
            unemployment_weight: 0.3,
            alert_threshold: 0.20,
        }
    }
}

/// Output file names of the four artifacts
#[derive(Debug, Clone)]
pub struct ArtifactNames {
    pub ranking: String,
    pub series: String,
    pub table: String,
    pub map: String,
}

impl Default for ArtifactNames {
    fn default() -> Self {
        Self {
            ranking: "fig1_ranking_IRS_2023.svg".to_string(),
            series: "fig2_serie_IRS_2020_2023.svg".to_string(),
            table: "fig3_tabla_variacion_IRS.svg".to_string(),
            map: "fig4_mapa_IRS_Sevilla_2023.svg".to_string(),
        }
    }
}

/// Configuration for charts and map
#[derive(Debug, Clone)]
pub struct PresentationConfig {
    /// Directory the artifacts are written to
    pub output_dir: PathBuf,
    /// District boundary GeoJSON
    pub boundaries_path: PathBuf,
    /// Feature property holding the district name
    pub name_property: String,
    /// Year shown by the ranking chart and the map
    pub focus_year: i32,
    /// Districts drawn in the time series chart
    pub focus_districts: Vec<District>,
    /// Years shown by the time series chart
    pub series_years: YearRange,
    /// Years listed in the variation table
    pub table_years: YearRange,
    /// Maximum number of rows in the variation table
    pub table_rows: usize,
    /// Artifact file names
    pub artifacts: ArtifactNames,
}

impl Default for PresentationConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("."),
            boundaries_path: PathBuf::from(
                "Proyecto/Distritos_de_Sevilla_7789076463007029926.geojson",
            ),
            name_property: "Distri_11D".to_string(),
            focus_year: 2023,
            focus_districts: vec![
                District::Macarena,
                District::CerroAmate,
                District::Sur,
                District::SanPabloSantaJusta,
                District::Nervion,
                District::Norte,
            ],
            series_years: YearRange::new(2020, 2023),
            table_years: YearRange::new(2021, 2023),
            table_rows: 20,
            artifacts: ArtifactNames::default(),
        }
    }
}

impl PresentationConfig {
    /// Full path of an artifact file name
    #[must_use]
    pub fn artifact_path(&self, name: &str) -> PathBuf {
        self.output_dir.join(name)
    }
}

/// Configuration for a full pipeline run
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Income source
    pub income: IncomeSourceConfig,
    /// Unemployment sources
    pub unemployment: UnemploymentSourceConfig,
    /// Index weights and alert threshold
    pub risk: RiskConfig,
    /// Charts and map
    pub presentation: PresentationConfig,
    /// Parquet file receiving the final panel
    pub export_path: PathBuf,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            income: IncomeSourceConfig::default(),
            unemployment: UnemploymentSourceConfig::default(),
            risk: RiskConfig::default(),
            presentation: PresentationConfig::default(),
            export_path: PathBuf::from("irs_panel.parquet"),
        }
    }
}

impl PipelineConfig {
    /// Create a new configuration with default settings
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve every input and output path against a base directory
    #[must_use]
    pub fn with_base_dir(mut self, base: &Path) -> Self {
        self.income.path = base.join(&self.income.path);
        self.unemployment.directory = base.join(&self.unemployment.directory);
        self.presentation.boundaries_path = base.join(&self.presentation.boundaries_path);
        self.presentation.output_dir = base.join(&self.presentation.output_dir);
        self.export_path = base.join(&self.export_path);
        self
    }

    /// Set the income source path
    #[must_use]
    pub fn with_income_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.income.path = path.into();
        self
    }

    /// Set the unemployment source directory
    #[must_use]
    pub fn with_unemployment_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.unemployment.directory = dir.into();
        self
    }

    /// Set the district boundary GeoJSON path
    #[must_use]
    pub fn with_boundaries_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.presentation.boundaries_path = path.into();
        self
    }

    /// Set the directory charts and map are written to
    #[must_use]
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.presentation.output_dir = dir.into();
        self
    }

    /// Set the Parquet export path
    #[must_use]
    pub fn with_export_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.export_path = path.into();
        self
    }

    /// Set the index weights and alert threshold
    #[must_use]
    pub const fn with_risk(mut self, risk: RiskConfig) -> Self {
        self.risk = risk;
        self
    }
}

impl fmt::Display for PipelineConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Pipeline Configuration:")?;
        writeln!(f, "  Income Source: {}", self.income.path.display())?;
        writeln!(
            f,
            "  Income Filter: {} {} / {}",
            self.income.municipality.code, self.income.municipality.name, self.income.indicator
        )?;
        writeln!(f, "  Income Years: {}", self.income.years)?;
        writeln!(
            f,
            "  Unemployment Sources: {}/{}",
            self.unemployment.directory.display(),
            self.unemployment.file_pattern
        )?;
        writeln!(f, "  Unemployment Years: {}", self.unemployment.years)?;
        writeln!(
            f,
            "  Weights: income {} / unemployment {}",
            self.risk.income_weight, self.risk.unemployment_weight
        )?;
        writeln!(f, "  Alert Threshold: {}", self.risk.alert_threshold)?;
        writeln!(
            f,
            "  Boundaries: {}",
            self.presentation.boundaries_path.display()
        )?;
        writeln!(f, "  Output Directory: {}", self.presentation.output_dir.display())?;
        writeln!(f, "  Panel Export: {}", self.export_path.display())
    }
}
