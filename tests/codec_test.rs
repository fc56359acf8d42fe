use tidar::{Tidar, TidarError};

#[test]
fn test_designator_observation_round_trip_over_whole_catalog() {
    let tidar = Tidar::new();
    let (ids, numbers) = tidar.available_flybys().unwrap();
    assert_eq!(ids.len(), numbers.len());
    assert!(!ids.is_empty());

    for (id, number) in ids.iter().zip(&numbers) {
        let resolved_number = tidar.designator_to_observation_number(id).unwrap();
        assert_eq!(&resolved_number, number);
        let resolved_id = tidar.observation_number_to_designator(number).unwrap();
        assert_eq!(&resolved_id, id);
    }
}

#[test]
fn test_observation_numbers_are_always_four_digits() {
    let tidar = Tidar::new();
    let (_, numbers) = tidar.available_flybys().unwrap();
    for number in &numbers {
        assert_eq!(number.len(), 4, "not 4 digits: {number}");
        assert!(number.chars().all(|c| c.is_ascii_digit()));
    }
    // Feeding an already-padded number back in is a no-op.
    assert_eq!(
        tidar.observation_number_to_designator("0211").unwrap(),
        tidar.observation_number_to_designator("211").unwrap(),
    );
}

#[test]
fn test_t65_maps_to_0211_both_ways() {
    let tidar = Tidar::new();
    assert_eq!(tidar.designator_to_observation_number("T65").unwrap(), "0211");
    assert_eq!(tidar.observation_number_to_designator("0211").unwrap(), "T65");
}

#[test]
fn test_designator_lookup_does_not_normalize_case() {
    let tidar = Tidar::new();
    let err = tidar.designator_to_observation_number("t65").unwrap_err();
    match err {
        TidarError::UnknownFlybyId { id, available } => {
            assert_eq!(id, "t65");
            assert!(available.contains(&"T65".to_string()));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn test_most_recent_archive_version_wins() {
    let tidar = Tidar::new();
    // Three archived copies of observation 0211 exist; the last row is canonical.
    assert_eq!(
        tidar.most_recent_archive_id("0211").unwrap(),
        "CORADR_0211_V03"
    );
    // Unpadded input resolves identically.
    assert_eq!(
        tidar.most_recent_archive_id("211").unwrap(),
        "CORADR_0211_V03"
    );
    // Single-version observations resolve to their only row.
    assert_eq!(tidar.most_recent_archive_id("0059").unwrap(), "CORADR_0059");
}

#[test]
fn test_unknown_observation_number_lists_alternatives() {
    let tidar = Tidar::new();
    let err = tidar.observation_number_to_designator("9999").unwrap_err();
    match err {
        TidarError::UnknownObservationNumber { number, available } => {
            assert_eq!(number, "9999");
            assert!(available.contains(&"0059".to_string()));
            assert!(available.contains(&"0211".to_string()));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn test_observations_without_bidr_matches_archive_gaps() {
    let tidar = Tidar::new();
    let numbers = tidar.observations_without_bidr().unwrap();
    assert_eq!(numbers, vec!["0048", "0186", "0189", "0209", "0234"]);
}

#[test]
fn test_segment_options_from_swath_table() {
    let tidar = Tidar::new();
    assert_eq!(
        tidar.segment_options().unwrap(),
        vec!["S01", "S02", "S03", "S04", "S05"]
    );
}
