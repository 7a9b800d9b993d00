//! Variation table rendered as an image

use std::path::Path;

use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};

use crate::config::YearRange;
use crate::error::{Result, render_error};
use crate::models::{AlertLevel, RiskIndexRecord, RiskPanel};
use crate::presentation::palette::{ALERT_ROW, HEADER_ROW};

const MARGIN: i32 = 20;
const TITLE_HEIGHT: i32 = 50;
const ROW_HEIGHT: i32 = 26;
const COLUMNS: [(&str, i32); 5] = [
    ("distrito", 320),
    ("year", 80),
    ("IRS", 100),
    ("IRS_var_pct", 140),
    ("nivel_alerta", 120),
];

/// Rows of the table: records of `years`, ordered by year then variation
/// ascending, at most `limit`
///
/// Records without a variation sort last within their year.
#[must_use]
pub fn table_rows(panel: &RiskPanel, years: YearRange, limit: usize) -> Vec<&RiskIndexRecord> {
    let mut rows: Vec<&RiskIndexRecord> = panel
        .records
        .iter()
        .filter(|r| years.contains(r.year))
        .collect();
    rows.sort_by(|a, b| {
        a.year.cmp(&b.year).then_with(|| {
            let av = a.irs_var_pct.unwrap_or(f64::INFINITY);
            let bv = b.irs_var_pct.unwrap_or(f64::INFINITY);
            av.total_cmp(&bv)
        })
    });
    rows.truncate(limit);
    rows
}

/// Cell texts of one record
#[must_use]
pub fn format_row(record: &RiskIndexRecord) -> [String; 5] {
    [
        record.district.clone(),
        record.year.to_string(),
        format!("{:.3}", record.irs),
        record
            .irs_var_pct
            .map_or_else(|| "n/a".to_string(), |v| format!("{:.2}", v * 100.0)),
        record.alert_level.to_string(),
    ]
}

fn table_width() -> i32 {
    COLUMNS.iter().map(|(_, w)| w).sum::<i32>() + 2 * MARGIN
}

fn draw_cells<DB: DrawingBackend>(
    area: &DrawingArea<DB, plotters::coord::Shift>,
    top: i32,
    cells: &[String],
    fill: RGBColor,
) -> Result<()> {
    let style = TextStyle::from(("sans-serif", 13).into_font()).pos(Pos::new(HPos::Left, VPos::Center));
    let mut left = MARGIN;
    for ((_, width), text) in COLUMNS.iter().zip(cells) {
        let cell = [(left, top), (left + width, top + ROW_HEIGHT)];
        area.draw(&Rectangle::new(cell, fill.filled()))
            .map_err(render_error)?;
        area.draw(&Rectangle::new(cell, BLACK.stroke_width(1)))
            .map_err(render_error)?;
        area.draw(&Text::new(
            text.clone(),
            (left + 6, top + ROW_HEIGHT / 2),
            style.clone(),
        ))
        .map_err(render_error)?;
        left += width;
    }
    Ok(())
}

/// Draw the variation table to `path`
///
/// RED rows are highlighted. An empty selection still produces the header.
///
/// # Errors
/// `Render` on drawing failures.
pub fn draw_table(panel: &RiskPanel, years: YearRange, limit: usize, path: &Path) -> Result<()> {
    let rows = table_rows(panel, years, limit);
    let row_count = i32::try_from(rows.len()).unwrap_or(i32::MAX - 1);
    let width = table_width();
    let height = TITLE_HEIGHT + (row_count + 1) * ROW_HEIGHT + MARGIN;

    let root = SVGBackend::new(
        path,
        (
            u32::try_from(width).unwrap_or(800),
            u32::try_from(height).unwrap_or(600),
        ),
    )
    .into_drawing_area();
    root.fill(&WHITE).map_err(render_error)?;

    let title = format!(
        "Variación anual del IRS (top {limit} filas por mayor caída) - {} a {}",
        years.start, years.end
    );
    root.draw(&Text::new(
        title,
        (width / 2, TITLE_HEIGHT / 2),
        TextStyle::from(("sans-serif", 17).into_font()).pos(Pos::new(HPos::Center, VPos::Center)),
    ))
    .map_err(render_error)?;

    let header: Vec<String> = COLUMNS.iter().map(|(name, _)| (*name).to_string()).collect();
    draw_cells(&root, TITLE_HEIGHT, &header, HEADER_ROW)?;

    let mut top = TITLE_HEIGHT + ROW_HEIGHT;
    for record in rows {
        let fill = match record.alert_level {
            AlertLevel::Red => ALERT_ROW,
            AlertLevel::Ok => WHITE,
        };
        draw_cells(&root, top, &format_row(record), fill)?;
        top += ROW_HEIGHT;
    }

    root.present().map_err(render_error)?;
    Ok(())
}
