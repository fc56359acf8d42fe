//! # Identifier codec
//!
//! Bidirectional mapping between the human flyby designator (e.g. `"T65"`) and the 4-digit
//! archive observation number (e.g. `"0211"`), plus resolution of the canonical CORADR archive
//! version for an observation.
//!
//! Designator lookup is **case-sensitive as stored**: normalization (upper-casing `"t65"`) is the
//! responsibility of the public entry points that accept free-form user input, not of this codec.
//!
//! ## Version selection policy
//!
//! Several archived copies of one observation may exist (`CORADR_0211`, `CORADR_0211_V02`,
//! `CORADR_0211_V03`). The canonical one is chosen by [`latest_archive_version`]: the **last**
//! matching row in table file order. The archive catalog is written sorted by id, which makes the
//! last row the most recent re-release; table order is significant and preserved by the loader.

use itertools::Itertools;
use log::info;

use crate::constants::{FlybyId, ObservationNumber, SegmentId};
use crate::reference_tables::{
    load_coradr_entries, load_flyby_records, load_swath_records, TableSource,
};
use crate::tidar_errors::TidarError;

/// Left-pad an observation number with `'0'` to 4 digits (`"211"` → `"0211"`).
///
/// Feeding an already-padded number back in is a no-op.
pub fn pad_observation_number(raw: &str) -> ObservationNumber {
    format!("{raw:0>4}")
}

/// The archive-version selection policy: **last entry wins**.
///
/// Candidates are in table file order; the last one is the canonical/current version. This is
/// deliberately not "numerically highest version": the policy follows file order, and changing it
/// means changing this one function.
pub(crate) fn latest_archive_version(candidates: &[String]) -> Option<&String> {
    candidates.last()
}

/// Designators and 4-digit observation numbers of every cataloged flyby, in catalog order.
pub fn available_flybys(
    source: &TableSource,
) -> Result<(Vec<FlybyId>, Vec<ObservationNumber>), TidarError> {
    let records = load_flyby_records(source)?;
    let ids = records.iter().map(|r| r.flyby_id.clone()).collect();
    let numbers = records.iter().map(|r| r.observation_number()).collect();
    Ok((ids, numbers))
}

/// Resolve a flyby designator to its 4-digit observation number.
///
/// The match is exact and case-sensitive. An unknown designator yields
/// [`TidarError::UnknownFlybyId`] carrying every valid designator.
pub fn designator_to_observation_number(
    source: &TableSource,
    designator: &str,
) -> Result<ObservationNumber, TidarError> {
    let records = load_flyby_records(source)?;
    for record in &records {
        if record.flyby_id == designator {
            return Ok(record.observation_number());
        }
    }
    Err(TidarError::UnknownFlybyId {
        id: designator.to_string(),
        available: records.iter().map(|r| r.flyby_id.clone()).collect(),
    })
}

/// Resolve an observation number to its flyby designator.
///
/// The input is left-padded to 4 digits before lookup, so `"211"` and `"0211"` are equivalent.
/// An unknown number yields [`TidarError::UnknownObservationNumber`] carrying every valid
/// observation number.
pub fn observation_number_to_designator(
    source: &TableSource,
    observation_number: &str,
) -> Result<FlybyId, TidarError> {
    let padded = pad_observation_number(observation_number);
    let records = load_flyby_records(source)?;
    for record in &records {
        if record.observation_number() == padded {
            return Ok(record.flyby_id.clone());
        }
    }
    Err(TidarError::UnknownObservationNumber {
        number: padded,
        available: records.iter().map(|r| r.observation_number()).collect(),
    })
}

/// Resolve the canonical CORADR archive id for an observation number.
///
/// Filters archive-catalog rows whose id contains `CORADR_{observation_number}` and applies the
/// [`latest_archive_version`] policy over the file-ordered candidates.
pub fn most_recent_archive_id(
    source: &TableSource,
    observation_number: &str,
) -> Result<String, TidarError> {
    let padded = pad_observation_number(observation_number);
    let wanted = format!("CORADR_{padded}");
    let entries = load_coradr_entries(source)?;
    let candidates: Vec<String> = entries
        .iter()
        .filter(|entry| entry.coradr_id.contains(&wanted))
        .map(|entry| entry.coradr_id.clone())
        .collect();

    match latest_archive_version(&candidates) {
        Some(version) => {
            info!("Most recent CORADR version is {version} from the available list {candidates:?}");
            Ok(version.clone())
        }
        None => {
            let (_, available) = available_flybys(source)?;
            Err(TidarError::UnknownObservationNumber {
                number: padded,
                available,
            })
        }
    }
}

/// Observation numbers of Titan flybys whose base archive volume carries no BIDR data.
///
/// Version rows (`_V` suffix) are skipped; only base volumes are examined. These observations
/// exist because of downlink gaps or altered instrument modes, and the fetch layer reports them
/// to the user instead of attempting a BIDR download.
pub fn observations_without_bidr(
    source: &TableSource,
) -> Result<Vec<ObservationNumber>, TidarError> {
    let entries = load_coradr_entries(source)?;
    let mut numbers = Vec::new();
    for entry in &entries {
        if entry.is_titan_flyby && !entry.is_version_row() && !entry.contains_bidr {
            if let Some(number) = entry.observation_number() {
                numbers.push(number.to_string());
            }
        }
    }
    Ok(numbers)
}

/// Distinct segment ids present in the swath coverage table, in `S0N` form and first-occurrence
/// order.
pub fn segment_options(source: &TableSource) -> Result<Vec<SegmentId>, TidarError> {
    let rows = load_swath_records(source)?;
    Ok(rows
        .iter()
        .map(|row| row.segment_number)
        .unique()
        .map(|number| {
            if number < 10 {
                format!("S0{number}")
            } else {
                format!("S{number}")
            }
        })
        .collect())
}
