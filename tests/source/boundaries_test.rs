//! Tests for district boundary loading

use std::fs;

use social_risk_index::source::{DistrictShape, load_boundaries};
use social_risk_index::{District, IrsError};

use crate::utils::boundaries_geojson;

#[test]
fn test_every_district_resolves() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("distritos.geojson");
    fs::write(&path, boundaries_geojson()).unwrap();

    let boundaries = load_boundaries(&path, "Distri_11D").unwrap();
    assert_eq!(boundaries.shapes.len(), 12);

    let resolved: Vec<District> = boundaries.shapes.iter().filter_map(|s| s.district).collect();
    assert_eq!(resolved, District::ALL.to_vec());

    let unknown = &boundaries.shapes[11];
    assert_eq!(unknown.name, "Aeropuerto");
    assert_eq!(unknown.district, None);

    // Closed square ring: the repeated first vertex weighs twice
    let nervion = &boundaries.shapes[2];
    assert_eq!(nervion.district, Some(District::Nervion));
    let (cx, cy) = DistrictShape::ring_centroid(&nervion.rings[0]).unwrap();
    approx::assert_abs_diff_eq!(cx, (3.0 + 3.9 + 3.9 + 3.0 + 3.0) / 5.0, epsilon = 1e-12);
    approx::assert_abs_diff_eq!(cy, (37.0 + 37.0 + 37.9 + 37.9 + 37.0) / 5.0, epsilon = 1e-12);
}

#[test]
fn test_invalid_json_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("distritos.geojson");
    fs::write(&path, "{\"type\": \"FeatureCollection\"").unwrap();

    assert!(matches!(
        load_boundaries(&path, "Distri_11D"),
        Err(IrsError::Json(_))
    ));
}
