use tidar::{MissionTime, Tidar, TidarError};

/// A context whose table directory does not exist: any query that reaches the table loader
/// fails with `TableUnavailable`, so a validation error proves the check ran first.
fn unloadable() -> Tidar {
    Tidar::from_data_dir("/nonexistent/tidar-data")
}

#[test]
fn test_validation_runs_before_any_table_access() {
    let tidar = unloadable();

    // Malformed arguments: the validation error surfaces, never TableUnavailable.
    let err = tidar.flybys_in_rectangle(-91.0, -72.0, 183.0, 185.0).unwrap_err();
    assert!(err.is_validation(), "expected validation error, got {err:?}");
    let err = tidar.flybys_at_point(-72.0, 361.0).unwrap_err();
    assert!(err.is_validation());
    let err = tidar
        .flybys_at_time(&MissionTime::new(2005, 400))
        .unwrap_err();
    assert!(err.is_validation());

    // Well-formed arguments reach the loader and report the missing tables.
    let err = tidar.flybys_in_rectangle(-82.0, -72.0, 183.0, 185.0).unwrap_err();
    assert!(matches!(err, TidarError::TableUnavailable { .. }));
    let err = tidar.flybys_at_time(&MissionTime::new(2005, 301)).unwrap_err();
    assert!(matches!(err, TidarError::TableUnavailable { .. }));
}

#[test]
fn test_latitude_bounds_name_the_field() {
    let tidar = Tidar::new();
    let err = tidar.flybys_in_rectangle(-91.0, 90.0, 10.0, 20.0).unwrap_err();
    assert_eq!(
        err,
        TidarError::LatitudeOutOfRange {
            field: "min_latitude",
            value: -91.0
        }
    );
    let err = tidar.flybys_in_rectangle(-90.0, 91.0, 10.0, 20.0).unwrap_err();
    assert_eq!(
        err,
        TidarError::LatitudeOutOfRange {
            field: "max_latitude",
            value: 91.0
        }
    );
}

#[test]
fn test_longitude_bounds_name_the_field() {
    let tidar = Tidar::new();
    let err = tidar.flybys_in_rectangle(-90.0, 90.0, -1.0, 20.0).unwrap_err();
    assert_eq!(
        err,
        TidarError::LongitudeOutOfRange {
            field: "min_longitude",
            value: -1.0
        }
    );
    let err = tidar.features_in_rectangle(-90.0, 90.0, 10.0, 361.0).unwrap_err();
    assert_eq!(
        err,
        TidarError::LongitudeOutOfRange {
            field: "max_longitude",
            value: 361.0
        }
    );
}

#[test]
fn test_inverted_ranges_are_rejected_per_axis() {
    let tidar = Tidar::new();
    let err = tidar.flybys_in_rectangle(80.0, 70.0, 10.0, 20.0).unwrap_err();
    assert_eq!(
        err,
        TidarError::InvertedRange {
            axis: "latitude",
            min_field: "min_latitude",
            max_field: "max_latitude",
        }
    );
    let err = tidar.flybys_in_rectangle(70.0, 80.0, 20.0, 10.0).unwrap_err();
    assert_eq!(
        err,
        TidarError::InvertedRange {
            axis: "longitude",
            min_field: "min_longitude",
            max_field: "max_longitude",
        }
    );
}

#[test]
fn test_point_query_validates_its_own_field_names() {
    let tidar = Tidar::new();
    let err = tidar.flybys_at_point(-91.0, 182.0).unwrap_err();
    assert_eq!(
        err,
        TidarError::LatitudeOutOfRange {
            field: "latitude",
            value: -91.0
        }
    );
    let err = tidar.features_at_point(-72.0, 361.0).unwrap_err();
    assert_eq!(
        err,
        TidarError::LongitudeOutOfRange {
            field: "longitude",
            value: 361.0
        }
    );
}

#[test]
fn test_time_fields_are_range_checked_with_endpoint_names() {
    let tidar = Tidar::new();

    let err = tidar
        .flybys_at_time(&MissionTime::new(2005, 301).with_hour(24))
        .unwrap_err();
    assert_eq!(
        err,
        TidarError::FieldOutOfRange {
            field: "hour",
            value: 24,
            min: 0,
            max: 23,
        }
    );

    let err = tidar
        .flybys_in_time_range(&MissionTime::new(2005, 366), &MissionTime::new(2005, 365))
        .unwrap_err();
    assert_eq!(
        err,
        TidarError::FieldOutOfRange {
            field: "start_doy",
            value: 366,
            min: 0,
            max: 365,
        }
    );

    let err = tidar
        .flybys_in_time_range(
            &MissionTime::new(2005, 1),
            &MissionTime::new(2005, 2).with_minute(60),
        )
        .unwrap_err();
    assert_eq!(
        err,
        TidarError::FieldOutOfRange {
            field: "end_minute",
            value: 60,
            min: 0,
            max: 59,
        }
    );
}

#[test]
fn test_unknown_feature_name_lists_known_features() {
    let tidar = Tidar::new();
    let err = tidar.flybys_for_feature("ligeria mare").unwrap_err();
    match err {
        TidarError::UnknownFeatureName { name, available } => {
            assert_eq!(name, "Ligeria Mare");
            assert!(available.contains(&"Ligeia Mare".to_string()));
            // Rows with missing coordinates are not usable in spatial queries and are not
            // offered as alternatives.
            assert!(!available.contains(&"Sotra Facula".to_string()));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}
