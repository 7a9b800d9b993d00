//! Choropleth map of the index by district

use std::collections::BTreeMap;
use std::path::Path;

use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};

use crate::error::{IrsError, Result, render_error};
use crate::models::{District, RiskPanel};
use crate::presentation::palette::{MISSING, viridis};
use crate::source::{DistrictBoundaries, DistrictShape};

const SIZE: (u32, u32) = (1000, 800);
const MAP_WIDTH: i32 = 880;
const COLOR_BAR_STEPS: i32 = 100;

/// Index per district for `year`
///
/// Several labels resolving to the same district are averaged.
///
/// # Errors
/// `UnknownDistrict` for a label outside the eleven districts.
pub fn irs_by_district(panel: &RiskPanel, year: i32) -> Result<BTreeMap<District, f64>> {
    let mut grouped: BTreeMap<District, Vec<f64>> = BTreeMap::new();
    for record in panel.for_year(year) {
        let district = District::from_label(&record.district)?;
        grouped.entry(district).or_default().push(record.irs);
    }
    Ok(grouped
        .into_iter()
        .map(|(district, values)| {
            let mean = values.iter().sum::<f64>() / values.len() as f64;
            (district, mean)
        })
        .collect())
}

/// Fill colour of a boundary shape
#[must_use]
pub fn shape_color(shape: &DistrictShape, values: &BTreeMap<District, f64>) -> RGBColor {
    shape
        .district
        .and_then(|district| values.get(&district))
        .map_or(MISSING, |&irs| viridis(irs))
}

fn draw_color_bar<DB: DrawingBackend>(
    area: &DrawingArea<DB, plotters::coord::Shift>,
) -> Result<()> {
    let (_, height) = area.dim_in_pixel();
    let height = i32::try_from(height).unwrap_or(800);
    let top = height / 8;
    let bottom = height - height / 8;
    let (left, right) = (20, 45);
    let step = f64::from(bottom - top) / f64::from(COLOR_BAR_STEPS);

    for i in 0..COLOR_BAR_STEPS {
        let value = f64::from(i) / f64::from(COLOR_BAR_STEPS - 1);
        let y1 = bottom - (f64::from(i) * step) as i32;
        let y0 = bottom - (f64::from(i + 1) * step) as i32;
        area.draw(&Rectangle::new([(left, y0), (right, y1)], viridis(value).filled()))
            .map_err(render_error)?;
    }
    area.draw(&Rectangle::new([(left, top), (right, bottom)], BLACK.stroke_width(1)))
        .map_err(render_error)?;

    let tick_style =
        TextStyle::from(("sans-serif", 12).into_font()).pos(Pos::new(HPos::Left, VPos::Center));
    for tick in [0.0, 0.25, 0.5, 0.75, 1.0_f64] {
        let y = bottom - (tick * f64::from(bottom - top)) as i32;
        area.draw(&PathElement::new(vec![(right, y), (right + 5, y)], BLACK.stroke_width(1)))
            .map_err(render_error)?;
        area.draw(&Text::new(format!("{tick:.2}"), (right + 8, y), tick_style.clone()))
            .map_err(render_error)?;
    }
    area.draw(&Text::new(
        "IRS (0-1)",
        (left, top - 20),
        TextStyle::from(("sans-serif", 13).into_font()).pos(Pos::new(HPos::Left, VPos::Center)),
    ))
    .map_err(render_error)?;
    Ok(())
}

/// Draw the choropleth map to `path`
///
/// Shapes are filled on a fixed [0, 1] viridis scale, grey when the
/// district has no value for `year`, and labelled at the centroid of each
/// exterior ring.
///
/// # Errors
/// `NoData` when the boundaries contain no coordinates, `UnknownDistrict`
/// for a panel label outside the eleven districts, `Render` on drawing
/// failures.
pub fn draw_map(
    panel: &RiskPanel,
    boundaries: &DistrictBoundaries,
    year: i32,
    path: &Path,
) -> Result<()> {
    let (x0, x1, y0, y1) = boundaries
        .bounds()
        .ok_or_else(|| IrsError::no_data("district boundaries without coordinates"))?;
    let pad_x = ((x1 - x0) * 0.03).max(1e-6);
    let pad_y = ((y1 - y0) * 0.03).max(1e-6);

    let values = irs_by_district(panel, year)?;
    for district in District::ALL {
        if !values.contains_key(&district) {
            log::debug!("{district} has no index value for {year}, drawn grey");
        }
    }

    let root = SVGBackend::new(path, SIZE).into_drawing_area();
    root.fill(&WHITE).map_err(render_error)?;
    let (map_area, bar_area) = root.split_horizontally(MAP_WIDTH);

    let mut chart = ChartBuilder::on(&map_area)
        .caption(
            format!("Índice de Riesgo Social (IRS) por distrito - Sevilla ({year})"),
            ("sans-serif", 20),
        )
        .margin(20)
        .build_cartesian_2d((x0 - pad_x)..(x1 + pad_x), (y0 - pad_y)..(y1 + pad_y))
        .map_err(render_error)?;

    for shape in &boundaries.shapes {
        let color = shape_color(shape, &values);
        chart
            .draw_series(
                shape
                    .rings
                    .iter()
                    .map(|ring| Polygon::new(ring.clone(), color.filled())),
            )
            .map_err(render_error)?;
        chart
            .draw_series(shape.rings.iter().map(|ring| {
                let mut outline = ring.clone();
                if let Some(&first) = ring.first() {
                    outline.push(first);
                }
                PathElement::new(outline, BLACK.stroke_width(1))
            }))
            .map_err(render_error)?;
    }

    let label_style =
        TextStyle::from(("sans-serif", 11).into_font()).pos(Pos::new(HPos::Center, VPos::Center));
    for shape in &boundaries.shapes {
        chart
            .draw_series(shape.rings.iter().filter_map(|ring| {
                DistrictShape::ring_centroid(ring)
                    .map(|centroid| Text::new(shape.name.clone(), centroid, label_style.clone()))
            }))
            .map_err(render_error)?;
    }

    draw_color_bar(&bar_area)?;

    root.present().map_err(render_error)?;
    Ok(())
}
