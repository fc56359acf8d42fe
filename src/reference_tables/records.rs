use serde::{Deserialize, Deserializer};

use crate::constants::{Degree, ObservationNumber, SegmentId};
use crate::identifiers::pad_observation_number;

/// One row of the flyby catalog: a mission flyby with its radar data take number.
///
/// The take number is stored the way the source table writes it (`"Take 211"`); use
/// [`FlybyRecord::observation_number`] for the 4-digit archive key.
#[derive(Debug, Clone, Deserialize)]
pub struct FlybyRecord {
    #[serde(rename = "Titan flyby id")]
    pub flyby_id: String,
    #[serde(rename = "Radar Data Take Number")]
    pub radar_data_take: String,
    #[serde(rename = "Sequence number")]
    pub sequence_number: String,
    #[serde(rename = "Orbit Number/ID")]
    pub orbit_number: String,
}

impl FlybyRecord {
    /// The 4-digit zero-padded observation number (`"Take 211"` → `"0211"`).
    pub fn observation_number(&self) -> ObservationNumber {
        let take = self
            .radar_data_take
            .split_whitespace()
            .last()
            .unwrap_or_default();
        pad_observation_number(take)
    }
}

/// One row of the CORADR archive catalog.
///
/// Re-released volumes appear as separate rows (`CORADR_0211`, `CORADR_0211_V02`, …); the table
/// is sorted by `coradr_id`, so the canonical version of an observation is the **last** matching
/// row.
#[derive(Debug, Clone, Deserialize)]
pub struct CoradrEntry {
    #[serde(rename = "CORADR ID")]
    pub coradr_id: String,
    #[serde(rename = "Is a Titan Flyby", deserialize_with = "python_bool")]
    pub is_titan_flyby: bool,
    #[serde(rename = "Contains ABDR", deserialize_with = "python_bool")]
    pub contains_abdr: bool,
    #[serde(rename = "Contains ASUM", deserialize_with = "python_bool")]
    pub contains_asum: bool,
    #[serde(rename = "Contains BIDR", deserialize_with = "python_bool")]
    pub contains_bidr: bool,
    #[serde(rename = "Contains LBDR", deserialize_with = "python_bool")]
    pub contains_lbdr: bool,
    #[serde(rename = "Contains SBDR", deserialize_with = "python_bool")]
    pub contains_sbdr: bool,
    #[serde(rename = "Contains STDR", deserialize_with = "python_bool")]
    pub contains_stdr: bool,
}

impl CoradrEntry {
    /// The observation number embedded in the id (`"CORADR_0211_V03"` → `"0211"`).
    pub fn observation_number(&self) -> Option<&str> {
        self.coradr_id.split('_').nth(1)
    }

    /// Whether this row is a re-release (`_V` suffix) rather than a base volume.
    pub fn is_version_row(&self) -> bool {
        self.coradr_id.contains('V')
    }
}

/// One row of the swath coverage table: one archived BIDR product of one (flyby, segment).
///
/// A single flyby segment appears once per archived product (resolution/data-type variants), so
/// consumers must suppress duplicates. Rows are not guaranteed sorted; no ordering may be assumed
/// across rows.
#[derive(Debug, Clone, Deserialize)]
pub struct SwathRecord {
    #[serde(rename = "CORADR ID")]
    pub coradr_id: String,
    #[serde(rename = "FLYBY ID")]
    pub flyby_id: String,
    #[serde(rename = "SEGMENT NUMBER")]
    pub segment_number: u8,
    #[serde(rename = "FILENAME")]
    pub filename: String,
    #[serde(rename = "DATE TYPE SYMBOL")]
    pub data_type_symbol: String,
    #[serde(rename = "DATE TYPE")]
    pub data_type: String,
    #[serde(rename = "RESOLUTION (pixels/degrees)")]
    pub resolution: u16,
    #[serde(rename = "TARGET_NAME")]
    pub target_name: String,
    #[serde(rename = "MAXIMUM_LATITUDE (Degrees)")]
    pub maximum_latitude: Degree,
    #[serde(rename = "MINIMUM_LATITUDE (Degrees)")]
    pub minimum_latitude: Degree,
    #[serde(rename = "EASTERNMOST_LONGITUDE (Degrees)")]
    pub easternmost_longitude: Degree,
    #[serde(rename = "WESTERNMOST_LONGITUDE (Degrees)")]
    pub westernmost_longitude: Degree,
    #[serde(rename = "START_TIME")]
    pub start_time: String,
    #[serde(rename = "STOP_TIME")]
    pub stop_time: String,
}

impl SwathRecord {
    /// The segment id in `S0N` form.
    pub fn segment_id(&self) -> SegmentId {
        format!("S0{}", self.segment_number)
    }

    /// Easternmost/westernmost normalized into `(min, max)` — the table does not fix which of
    /// the two columns is numerically smaller.
    pub fn longitude_bounds(&self) -> (Degree, Degree) {
        (
            self.easternmost_longitude.min(self.westernmost_longitude),
            self.easternmost_longitude.max(self.westernmost_longitude),
        )
    }
}

/// One row of the feature gazetteer.
///
/// Coordinate fields are optional: the nomenclature database has entries with no published
/// extent, and such rows are silently excluded from spatial queries.
#[derive(Debug, Clone, Deserialize)]
pub struct FeatureRecord {
    #[serde(rename = "Feature Name")]
    pub name: String,
    #[serde(rename = "Northernmost Latitude")]
    pub northernmost_latitude: Option<Degree>,
    #[serde(rename = "Southernmost Latitude")]
    pub southernmost_latitude: Option<Degree>,
    #[serde(rename = "Easternmost Longitude")]
    pub easternmost_longitude: Option<Degree>,
    #[serde(rename = "Westernmost Longitude")]
    pub westernmost_longitude: Option<Degree>,
    #[serde(rename = "Center Latitude")]
    pub center_latitude: Option<Degree>,
    #[serde(rename = "Center Longitude")]
    pub center_longitude: Option<Degree>,
    #[serde(rename = "Origin of Name")]
    pub origin: Option<String>,
}

impl FeatureRecord {
    /// North/south normalized into `(min, max)`, `None` when either is missing.
    pub fn latitude_bounds(&self) -> Option<(Degree, Degree)> {
        let north = self.northernmost_latitude?;
        let south = self.southernmost_latitude?;
        Some((north.min(south), north.max(south)))
    }

    /// East/west normalized into `(min, max)`, `None` when either is missing.
    pub fn longitude_bounds(&self) -> Option<(Degree, Degree)> {
        let east = self.easternmost_longitude?;
        let west = self.westernmost_longitude?;
        Some((east.min(west), east.max(west)))
    }
}

/// The refresh tool writes booleans the pandas way (`True`/`False`); accept both casings.
fn python_bool<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = String::deserialize(deserializer)?;
    match value.as_str() {
        "True" | "true" => Ok(true),
        "False" | "false" => Ok(false),
        other => Err(serde::de::Error::custom(format!(
            "expected a boolean, got '{other}'"
        ))),
    }
}

#[cfg(test)]
mod records_tests {
    use super::*;

    #[test]
    fn test_flyby_record_observation_number() {
        let record = FlybyRecord {
            flyby_id: "T65".into(),
            radar_data_take: "Take 211".into(),
            sequence_number: "S56".into(),
            orbit_number: "Rev 125".into(),
        };
        assert_eq!(record.observation_number(), "0211");

        let record = FlybyRecord {
            flyby_id: "Ta".into(),
            radar_data_take: "Take 35".into(),
            sequence_number: "S05".into(),
            orbit_number: "Rev A".into(),
        };
        assert_eq!(record.observation_number(), "0035");
    }

    #[test]
    fn test_coradr_entry_parses_pandas_booleans() {
        let csv = "CORADR ID,Is a Titan Flyby,Contains ABDR,Contains ASUM,Contains BIDR,\
                   Contains LBDR,Contains SBDR,Contains STDR\n\
                   CORADR_0211_V03,True,True,False,True,True,True,False\n";
        let mut reader = csv::Reader::from_reader(csv.as_bytes());
        let entry: CoradrEntry = reader.deserialize().next().unwrap().unwrap();
        assert!(entry.is_titan_flyby);
        assert!(!entry.contains_asum);
        assert!(entry.contains_bidr);
        assert_eq!(entry.observation_number(), Some("0211"));
        assert!(entry.is_version_row());
    }

    #[test]
    fn test_feature_record_missing_coordinates() {
        let csv = "Feature Name,Northernmost Latitude,Southernmost Latitude,\
                   Easternmost Longitude,Westernmost Longitude,Center Latitude,\
                   Center Longitude,Origin of Name\n\
                   Sotra Facula,,,,,,,dropped from the table\n";
        let mut reader = csv::Reader::from_reader(csv.as_bytes());
        let feature: FeatureRecord = reader.deserialize().next().unwrap().unwrap();
        assert!(feature.latitude_bounds().is_none());
        assert!(feature.longitude_bounds().is_none());
    }

    #[test]
    fn test_swath_record_longitude_bounds_normalize() {
        let record = SwathRecord {
            coradr_id: "CORADR_0211_V03".into(),
            flyby_id: "T65".into(),
            segment_number: 1,
            filename: "BIBQI67S176_D211_T065S01_V03.LBL".into(),
            data_type_symbol: "B".into(),
            data_type: "Primary Dataset in Unsigned Byte Format (Normalized dB)".into(),
            resolution: 256,
            target_name: "TITAN".into(),
            maximum_latitude: -67.3,
            minimum_latitude: -84.9,
            easternmost_longitude: 145.6,
            westernmost_longitude: 219.4,
            start_time: "2010-012T10:05:13.321".into(),
            stop_time: "2010-012T11:27:48.009".into(),
        };
        assert_eq!(record.longitude_bounds(), (145.6, 219.4));
        assert_eq!(record.segment_id(), "S01");
    }
}
