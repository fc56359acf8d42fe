//! # Spatial query engine
//!
//! Resolves flybys/segments and named surface features from points or rectangles in
//! latitude/longitude (degrees; latitude −90–90, longitude in the archive's 0–360 convention).
//!
//! Two different intersection rules coexist here, both inherited from the archive's published
//! behavior and kept deliberately separate:
//!
//! - **Swath queries** ([`flybys_in_rectangle`]): latitude uses the standard axis-aligned
//!   *overlap* test, longitude requires the query range to lie *within* the swath's recorded
//!   coverage ([`swath_longitude_contains`]).
//! - **Feature queries** ([`features_in_rectangle`]): both axes use a symmetric three-way
//!   *overlap* test ([`ranges_intersect`]).
//!
//! Do not unify the two; they are independent contracts (see DESIGN.md).

use log::info;

use crate::constants::{Degree, FlybySegments};
use crate::reference_tables::{
    load_feature_records, load_swath_records, FeatureRecord, TableSource,
};
use crate::tidar_errors::TidarError;
use crate::validation::{check_point, check_rectangle};

/// Latitude rule for swath queries: axis-aligned interval overlap.
pub(crate) fn swath_latitude_overlaps(
    row_min: Degree,
    row_max: Degree,
    query_min: Degree,
    query_max: Degree,
) -> bool {
    row_min <= query_max && row_max >= query_min
}

/// Longitude rule for swath queries: the query range must lie within the row's coverage.
pub(crate) fn swath_longitude_contains(
    row_min: Degree,
    row_max: Degree,
    query_min: Degree,
    query_max: Degree,
) -> bool {
    row_min <= query_min && row_max >= query_max
}

/// Three-way interval overlap used by feature queries: either endpoint of `a` falls inside `b`,
/// or `a` fully contains `b`.
pub(crate) fn ranges_intersect(
    a_min: Degree,
    a_max: Degree,
    b_min: Degree,
    b_max: Degree,
) -> bool {
    let min_inside = a_min <= b_max && a_min >= b_min;
    let max_inside = a_max >= b_min && a_max <= b_max;
    let contains = a_min <= b_min && a_max >= b_max;
    min_inside || max_inside || contains
}

/// Python-style title casing: the first cased character of every run is upper-cased, the rest
/// lower-cased (`"ontario lacus"` → `"Ontario Lacus"`). Used to make feature-name lookup
/// insensitive to input case while matching the gazetteer's stored form.
pub(crate) fn title_case(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut prev_alphabetic = false;
    for ch in input.chars() {
        if ch.is_alphabetic() {
            if prev_alphabetic {
                out.extend(ch.to_lowercase());
            } else {
                out.extend(ch.to_uppercase());
            }
            prev_alphabetic = true;
        } else {
            out.push(ch);
            prev_alphabetic = false;
        }
    }
    out
}

/// The canonical `(min_lat, max_lat, min_lon, max_lon)` rectangle of a gazetteer row, or `None`
/// when any coordinate field is missing (such rows are excluded from spatial queries).
fn feature_rectangle(feature: &FeatureRecord) -> Option<(Degree, Degree, Degree, Degree)> {
    feature.center_latitude?;
    feature.center_longitude?;
    let (min_latitude, max_latitude) = feature.latitude_bounds()?;
    let (min_longitude, max_longitude) = feature.longitude_bounds()?;
    Some((min_latitude, max_latitude, min_longitude, max_longitude))
}

/// Flybys/segments whose recorded coverage matches the query rectangle.
///
/// For every swath row: latitude ranges must overlap, and the query longitude range must lie
/// within the row's recorded longitude coverage. Segment lists keep first-match order with
/// duplicates suppressed (one segment appears once per archived product in the table).
///
/// An empty result is not an error; it logs an informational notice with the query bounds.
pub fn flybys_in_rectangle(
    source: &TableSource,
    min_latitude: Degree,
    max_latitude: Degree,
    min_longitude: Degree,
    max_longitude: Degree,
) -> Result<FlybySegments, TidarError> {
    check_rectangle(min_latitude, max_latitude, min_longitude, max_longitude)?;

    let rows = load_swath_records(source)?;
    let mut flybys = FlybySegments::new();
    for row in &rows {
        if !swath_latitude_overlaps(
            row.minimum_latitude,
            row.maximum_latitude,
            min_latitude,
            max_latitude,
        ) {
            continue;
        }
        let (row_min_longitude, row_max_longitude) = row.longitude_bounds();
        if swath_longitude_contains(
            row_min_longitude,
            row_max_longitude,
            min_longitude,
            max_longitude,
        ) {
            let segments = flybys.entry(row.flyby_id.clone()).or_default();
            let segment = row.segment_id();
            if !segments.contains(&segment) {
                segments.push(segment);
            }
        }
    }

    if flybys.is_empty() {
        info!(
            "No flyby IDs found at latitude from {min_latitude} to {max_latitude} \
             and longitude from {min_longitude} to {max_longitude}"
        );
    }
    Ok(flybys)
}

/// Flybys/segments covering a single point (a zero-width rectangle).
pub fn flybys_at_point(
    source: &TableSource,
    latitude: Degree,
    longitude: Degree,
) -> Result<FlybySegments, TidarError> {
    check_point(latitude, longitude)?;
    flybys_in_rectangle(source, latitude, latitude, longitude, longitude)
}

/// Named surface features whose extent overlaps the query rectangle, in gazetteer order.
///
/// Both axes use the symmetric [`ranges_intersect`] test (not the swath containment rule).
/// Gazetteer rows missing any coordinate field are silently skipped.
pub fn features_in_rectangle(
    source: &TableSource,
    min_latitude: Degree,
    max_latitude: Degree,
    min_longitude: Degree,
    max_longitude: Degree,
) -> Result<Vec<String>, TidarError> {
    check_rectangle(min_latitude, max_latitude, min_longitude, max_longitude)?;

    let features = load_feature_records(source)?;
    let mut names = Vec::new();
    for feature in &features {
        let Some((feature_min_lat, feature_max_lat, feature_min_lon, feature_max_lon)) =
            feature_rectangle(feature)
        else {
            continue;
        };
        if ranges_intersect(feature_min_lat, feature_max_lat, min_latitude, max_latitude)
            && ranges_intersect(
                feature_min_lon,
                feature_max_lon,
                min_longitude,
                max_longitude,
            )
        {
            names.push(feature.name.clone());
        }
    }

    if names.is_empty() {
        info!(
            "No features found at latitude from {min_latitude} to {max_latitude} \
             and longitude from {min_longitude} to {max_longitude}"
        );
    }
    Ok(names)
}

/// Named surface features covering a single point.
pub fn features_at_point(
    source: &TableSource,
    latitude: Degree,
    longitude: Degree,
) -> Result<Vec<String>, TidarError> {
    check_point(latitude, longitude)?;
    features_in_rectangle(source, latitude, latitude, longitude, longitude)
}

/// Flybys/segments covering a named surface feature.
///
/// The input is title-cased (`"ontario lacus"` → `"Ontario Lacus"`), the feature's stored
/// north/south and east/west extents are normalized into a canonical rectangle, and the swath
/// query runs over that rectangle. An unknown name yields [`TidarError::UnknownFeatureName`]
/// carrying every feature name usable in spatial queries.
pub fn flybys_for_feature(
    source: &TableSource,
    feature_name: &str,
) -> Result<FlybySegments, TidarError> {
    let wanted = title_case(feature_name);
    let features = load_feature_records(source)?;

    let found = features
        .iter()
        .filter(|feature| feature.name == wanted)
        .find_map(feature_rectangle);
    let Some((min_latitude, max_latitude, min_longitude, max_longitude)) = found else {
        return Err(TidarError::UnknownFeatureName {
            name: wanted,
            available: features
                .iter()
                .filter(|feature| feature_rectangle(feature).is_some())
                .map(|feature| feature.name.clone())
                .collect(),
        });
    };

    flybys_in_rectangle(source, min_latitude, max_latitude, min_longitude, max_longitude)
}

#[cfg(test)]
mod spatial_tests {
    use super::*;

    #[test]
    fn test_latitude_overlap_is_symmetric_overlap() {
        assert!(swath_latitude_overlaps(-84.2, -58.3, -82.0, -72.0));
        assert!(swath_latitude_overlaps(-75.0, -60.0, -82.0, -72.0));
        assert!(!swath_latitude_overlaps(-52.1, -18.9, -82.0, -72.0));
    }

    #[test]
    fn test_longitude_rule_requires_containment_not_overlap() {
        // Overlapping but not containing: rejected.
        assert!(!swath_longitude_contains(184.0, 250.0, 183.0, 185.0));
        // Containing the query range: accepted.
        assert!(swath_longitude_contains(160.2, 259.8, 183.0, 185.0));
        // Zero-width query point inside coverage: accepted.
        assert!(swath_longitude_contains(160.2, 259.8, 183.0, 183.0));
    }

    #[test]
    fn test_ranges_intersect_three_way() {
        // Partial overlap from either side.
        assert!(ranges_intersect(170.0, 184.0, 183.0, 185.0));
        assert!(ranges_intersect(184.0, 200.0, 183.0, 185.0));
        // One range containing the other, both directions.
        assert!(ranges_intersect(180.0, 190.0, 183.0, 185.0));
        assert!(ranges_intersect(183.5, 184.0, 183.0, 185.0));
        // Disjoint.
        assert!(!ranges_intersect(100.0, 150.0, 183.0, 185.0));
    }

    #[test]
    fn test_title_case_matches_stored_names() {
        assert_eq!(title_case("ontario lacus"), "Ontario Lacus");
        assert_eq!(title_case("ONTARIO LACUS"), "Ontario Lacus");
        assert_eq!(title_case("huygens landing site"), "Huygens Landing Site");
        // Runs restart after any non-alphabetic character.
        assert_eq!(title_case("ching-tu"), "Ching-Tu");
    }

    #[test]
    fn test_rectangle_query_validates_before_load() {
        let source = TableSource::DataDir("/nonexistent/tidar-data".into());
        let err = flybys_in_rectangle(&source, -91.0, -72.0, 183.0, 185.0).unwrap_err();
        assert!(err.is_validation());
        let err = flybys_at_point(&source, -72.0, 361.0).unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_unknown_feature_lists_alternatives() {
        let err = flybys_for_feature(&TableSource::Packaged, "Atlantis").unwrap_err();
        match err {
            TidarError::UnknownFeatureName { name, available } => {
                assert_eq!(name, "Atlantis");
                assert!(available.contains(&"Ontario Lacus".to_string()));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
