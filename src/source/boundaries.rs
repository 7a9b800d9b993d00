//! District boundaries from GeoJSON
//!
//! Only what the map needs is kept: the district name of each feature and
//! the exterior ring of each of its polygons, as (longitude, latitude) pairs.

use std::path::Path;

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::error::util::read_bytes;
use crate::error::{IrsError, Result};
use crate::models::District;
use crate::utils::logging::{log_operation_start, log_warning};

#[derive(Debug, Deserialize)]
struct FeatureCollection {
    features: Vec<Feature>,
}

#[derive(Debug, Deserialize)]
struct Feature {
    #[serde(default)]
    properties: Option<Map<String, Value>>,
    #[serde(default)]
    geometry: Option<Geometry>,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type")]
enum Geometry {
    Polygon {
        coordinates: Vec<Vec<Vec<f64>>>,
    },
    MultiPolygon {
        coordinates: Vec<Vec<Vec<Vec<f64>>>>,
    },
    #[serde(other)]
    Unsupported,
}

/// Convert a GeoJSON ring into (lon, lat) pairs, ignoring extra dimensions
fn ring_points(ring: &[Vec<f64>]) -> Vec<(f64, f64)> {
    ring.iter()
        .filter(|position| position.len() >= 2)
        .map(|position| (position[0], position[1]))
        .collect()
}

/// Exterior rings of a geometry, `None` for unsupported types
fn exterior_rings(geometry: &Geometry) -> Option<Vec<Vec<(f64, f64)>>> {
    match geometry {
        Geometry::Polygon { coordinates } => Some(
            coordinates
                .first()
                .map(|ring| vec![ring_points(ring)])
                .unwrap_or_default(),
        ),
        Geometry::MultiPolygon { coordinates } => Some(
            coordinates
                .iter()
                .filter_map(|polygon| polygon.first())
                .map(|ring| ring_points(ring))
                .collect(),
        ),
        Geometry::Unsupported => None,
    }
}

/// Outline of one district
#[derive(Debug, Clone, PartialEq)]
pub struct DistrictShape {
    /// Name as found in the boundary file
    pub name: String,
    /// Resolved district, `None` when the name is not a known district
    pub district: Option<District>,
    /// Exterior ring of every polygon
    pub rings: Vec<Vec<(f64, f64)>>,
}

impl DistrictShape {
    /// Arithmetic mean of a ring's vertices, used as label anchor
    #[must_use]
    pub fn ring_centroid(ring: &[(f64, f64)]) -> Option<(f64, f64)> {
        if ring.is_empty() {
            return None;
        }
        let n = ring.len() as f64;
        let (sx, sy) = ring
            .iter()
            .fold((0.0, 0.0), |(sx, sy), (x, y)| (sx + x, sy + y));
        Some((sx / n, sy / n))
    }
}

/// All district outlines of the boundary file
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DistrictBoundaries {
    pub shapes: Vec<DistrictShape>,
}

impl DistrictBoundaries {
    /// Bounding box as `(min_lon, max_lon, min_lat, max_lat)`
    #[must_use]
    pub fn bounds(&self) -> Option<(f64, f64, f64, f64)> {
        self.shapes
            .iter()
            .flat_map(|shape| shape.rings.iter().flatten())
            .fold(None, |acc, &(x, y)| match acc {
                None => Some((x, x, y, y)),
                Some((x0, x1, y0, y1)) => Some((x0.min(x), x1.max(x), y0.min(y), y1.max(y))),
            })
    }
}

/// Parse boundary GeoJSON text
///
/// # Arguments
/// * `json` - GeoJSON `FeatureCollection`
/// * `name_property` - Feature property holding the district name
/// * `origin` - Path used in errors
///
/// # Errors
/// `Json` for invalid GeoJSON, `SourceFormat` when a feature lacks the
/// name property.
pub fn parse_boundaries(json: &[u8], name_property: &str, origin: &Path) -> Result<DistrictBoundaries> {
    let collection: FeatureCollection = serde_json::from_slice(json)?;

    let mut shapes = Vec::with_capacity(collection.features.len());
    for (idx, feature) in collection.features.into_iter().enumerate() {
        let name = feature
            .properties
            .as_ref()
            .and_then(|props| props.get(name_property))
            .and_then(Value::as_str)
            .ok_or_else(|| {
                IrsError::source_format(
                    origin,
                    format!("feature {idx} has no '{name_property}' property"),
                )
            })?
            .to_string();

        let Some(rings) = feature.geometry.as_ref().and_then(exterior_rings) else {
            log::debug!("Skipping feature '{name}': no polygon geometry");
            continue;
        };

        let district = match District::from_name(&name) {
            Ok(district) => Some(district),
            Err(e) => {
                log_warning(&format!("Boundary feature not matched: {e}"), Some(origin));
                None
            }
        };

        shapes.push(DistrictShape {
            name,
            district,
            rings,
        });
    }

    Ok(DistrictBoundaries { shapes })
}

/// Read district boundaries from a GeoJSON file
///
/// # Errors
/// `SourceNotFound` when the file is missing, plus the errors of
/// [`parse_boundaries`].
pub fn load_boundaries(path: &Path, name_property: &str) -> Result<DistrictBoundaries> {
    log_operation_start("Reading district boundaries", path);
    let bytes = read_bytes(path, "reading district boundaries")?;
    let boundaries = parse_boundaries(&bytes, name_property, path)?;
    log::info!(
        "Loaded {} district shapes from {}",
        boundaries.shapes.len(),
        path.display()
    );
    Ok(boundaries)
}
