//! Charts and map built from the final risk panel
//!
//! Presentation only reads the panel. [`PresentationAdapter`] is the seam
//! between the pipeline and whatever renders its output; [`SvgPresenter`]
//! writes the four standard artifacts as SVG files.

pub mod map;
pub mod palette;
pub mod ranking;
pub mod series;
pub mod table;

use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use crate::config::PresentationConfig;
use crate::error::Result;
use crate::models::RiskPanel;
use crate::source::DistrictBoundaries;

/// Consumer of the final panel producing output artifacts
pub trait PresentationAdapter {
    /// Render the panel
    ///
    /// # Returns
    /// Paths of every artifact written
    fn present(&self, panel: &RiskPanel, boundaries: &DistrictBoundaries) -> Result<Vec<PathBuf>>;
}

/// Writes ranking chart, time series chart, variation table and map as SVG
#[derive(Debug, Clone, Default)]
pub struct SvgPresenter {
    config: PresentationConfig,
}

impl SvgPresenter {
    /// Create a presenter for the given configuration
    #[must_use]
    pub const fn new(config: PresentationConfig) -> Self {
        Self { config }
    }

    /// Presentation settings in use
    #[must_use]
    pub const fn config(&self) -> &PresentationConfig {
        &self.config
    }
}

impl PresentationAdapter for SvgPresenter {
    fn present(&self, panel: &RiskPanel, boundaries: &DistrictBoundaries) -> Result<Vec<PathBuf>> {
        let start = Instant::now();
        let config = &self.config;
        fs::create_dir_all(&config.output_dir)?;

        let ranking = config.artifact_path(&config.artifacts.ranking);
        ranking::draw_ranking(panel, config.focus_year, &ranking)?;
        log::info!("Wrote ranking chart to {}", ranking.display());

        let series = config.artifact_path(&config.artifacts.series);
        series::draw_series(panel, &config.focus_districts, config.series_years, &series)?;
        log::info!("Wrote time series chart to {}", series.display());

        let table = config.artifact_path(&config.artifacts.table);
        table::draw_table(panel, config.table_years, config.table_rows, &table)?;
        log::info!("Wrote variation table to {}", table.display());

        let map = config.artifact_path(&config.artifacts.map);
        map::draw_map(panel, boundaries, config.focus_year, &map)?;
        log::info!("Wrote district map to {}", map.display());

        log::info!("Rendered 4 artifacts in {:?}", start.elapsed());
        Ok(vec![ranking, series, table, map])
    }
}
