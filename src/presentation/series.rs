//! Time series chart of the index for a few districts

use std::path::Path;

use plotters::prelude::*;

use crate::config::YearRange;
use crate::error::{Result, render_error};
use crate::models::{District, RiskPanel};
use crate::utils::logging::log_warning;

const SIZE: (u32, u32) = (1000, 600);

/// One line of the chart
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesLine {
    pub district: District,
    /// (year, IRS) in year order
    pub points: Vec<(i32, f64)>,
}

/// Points of every focus district inside `years`
///
/// Focus districts absent from the panel are skipped with a warning.
///
/// # Errors
/// `UnknownDistrict` for a label in `years` outside the eleven districts.
pub fn series_lines(
    panel: &RiskPanel,
    focus: &[District],
    years: YearRange,
) -> Result<Vec<SeriesLine>> {
    let mut resolved = Vec::new();
    for record in panel.records.iter().filter(|r| years.contains(r.year)) {
        resolved.push((District::from_label(&record.district)?, record.year, record.irs));
    }

    let mut lines = Vec::with_capacity(focus.len());
    for &district in focus {
        let points: Vec<(i32, f64)> = resolved
            .iter()
            .filter(|(d, _, _)| *d == district)
            .map(|&(_, year, irs)| (year, irs))
            .collect();
        if points.is_empty() {
            log_warning(&format!("No index values for {district} in {years}"), None);
            continue;
        }
        lines.push(SeriesLine { district, points });
    }
    Ok(lines)
}

/// Draw the time series chart to `path`
///
/// # Errors
/// `UnknownDistrict` as in [`series_lines`], `Render` on drawing failures.
pub fn draw_series(
    panel: &RiskPanel,
    focus: &[District],
    years: YearRange,
    path: &Path,
) -> Result<()> {
    let lines = series_lines(panel, focus, years)?;
    let x_end = years.end.max(years.start + 1);

    let root = SVGBackend::new(path, SIZE).into_drawing_area();
    root.fill(&WHITE).map_err(render_error)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(
            format!("Evolución del IRS (Sevilla) - Distritos seleccionados ({years})"),
            ("sans-serif", 20),
        )
        .margin(20)
        .x_label_area_size(40)
        .y_label_area_size(50)
        .build_cartesian_2d(years.start..x_end, 0.0..1.0_f64)
        .map_err(render_error)?;

    chart
        .configure_mesh()
        .x_labels(years.len().max(2))
        .x_label_formatter(&|year| year.to_string())
        .x_desc("Año")
        .y_desc("IRS (0-1)")
        .draw()
        .map_err(render_error)?;

    for (idx, line) in lines.iter().enumerate() {
        let color = Palette99::pick(idx).mix(0.9);
        chart
            .draw_series(LineSeries::new(
                line.points.iter().copied(),
                color.stroke_width(2),
            ))
            .map_err(render_error)?
            .label(line.district.to_string())
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2)));
        chart
            .draw_series(
                line.points
                    .iter()
                    .map(|&point| Circle::new(point, 4, color.filled())),
            )
            .map_err(render_error)?;
    }

    if !lines.is_empty() {
        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperRight)
            .label_font(("sans-serif", 12))
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .draw()
            .map_err(render_error)?;
    }

    root.present().map_err(render_error)?;
    Ok(())
}
