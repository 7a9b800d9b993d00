//! Ranking chart: index per district for one year, highest first

use std::path::Path;

use plotters::prelude::*;

use crate::error::{IrsError, Result, render_error};
use crate::models::RiskPanel;

const SIZE: (u32, u32) = (1000, 600);

/// (district label, IRS) for `year`, highest index first
#[must_use]
pub fn ranking_rows(panel: &RiskPanel, year: i32) -> Vec<(String, f64)> {
    let mut rows: Vec<(String, f64)> = panel
        .for_year(year)
        .map(|r| (r.district.clone(), r.irs))
        .collect();
    rows.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    rows
}

/// Draw the ranking chart to `path`
///
/// # Errors
/// `NoData` when the panel has no record for `year`, `Render` on drawing
/// failures.
pub fn draw_ranking(panel: &RiskPanel, year: i32, path: &Path) -> Result<()> {
    let rows = ranking_rows(panel, year);
    if rows.is_empty() {
        return Err(IrsError::no_data(format!("no index values for {year} to rank")));
    }
    let n = rows.len();
    // Slot 0 is the bottom of the axis, so the highest index goes to slot n - 1
    let label_of = |slot: usize| {
        n.checked_sub(slot + 1)
            .and_then(|rank| rows.get(rank))
            .map(|(label, _)| label.clone())
            .unwrap_or_default()
    };

    let root = SVGBackend::new(path, SIZE).into_drawing_area();
    root.fill(&WHITE).map_err(render_error)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(format!("IRS por distrito (Sevilla) - {year}"), ("sans-serif", 22))
        .margin(15)
        .x_label_area_size(40)
        .y_label_area_size(240)
        .build_cartesian_2d(0.0..1.0_f64, (0..n).into_segmented())
        .map_err(render_error)?;

    chart
        .configure_mesh()
        .disable_y_mesh()
        .y_labels(n)
        .y_label_formatter(&|value| match value {
            SegmentValue::CenterOf(slot) => label_of(*slot),
            _ => String::new(),
        })
        .x_desc("IRS (0-1)")
        .y_desc("Distrito")
        .draw()
        .map_err(render_error)?;

    chart
        .draw_series(rows.iter().enumerate().map(|(rank, (_, irs))| {
            let slot = n - 1 - rank;
            Rectangle::new(
                [
                    (0.0, SegmentValue::Exact(slot)),
                    (*irs, SegmentValue::Exact(slot + 1)),
                ],
                BLUE.mix(0.7).filled(),
            )
        }))
        .map_err(render_error)?;

    root.present().map_err(render_error)?;
    Ok(())
}
