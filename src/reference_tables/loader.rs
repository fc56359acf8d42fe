use std::borrow::Cow;
use std::fs;

use camino::Utf8PathBuf;
use serde::de::DeserializeOwned;

use crate::reference_tables::records::{CoradrEntry, FeatureRecord, FlybyRecord, SwathRecord};
use crate::tidar_errors::TidarError;

/// The four reference tables the crate consumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReferenceTable {
    CassiniFlyby,
    CoradrJplOptions,
    SwathCoverage,
    FeatureNameDetails,
}

impl ReferenceTable {
    /// File name of the table inside a data directory.
    pub fn file_name(self) -> &'static str {
        match self {
            ReferenceTable::CassiniFlyby => "cassini_flyby.csv",
            ReferenceTable::CoradrJplOptions => "coradr_jpl_options.csv",
            ReferenceTable::SwathCoverage => "swath_coverage_by_time_position.csv",
            ReferenceTable::FeatureNameDetails => "feature_name_details.csv",
        }
    }

    /// The copy of the table embedded in the crate.
    fn packaged_contents(self) -> &'static str {
        match self {
            ReferenceTable::CassiniFlyby => include_str!("../../data/cassini_flyby.csv"),
            ReferenceTable::CoradrJplOptions => include_str!("../../data/coradr_jpl_options.csv"),
            ReferenceTable::SwathCoverage => {
                include_str!("../../data/swath_coverage_by_time_position.csv")
            }
            ReferenceTable::FeatureNameDetails => {
                include_str!("../../data/feature_name_details.csv")
            }
        }
    }
}

/// Where reference tables are read from.
///
/// `Packaged` uses the copies embedded at compile time; `DataDir` reads the same file names from
/// a directory, for deployments that refresh tables without rebuilding (and for tests that need
/// load failures).
#[derive(Debug, Clone)]
pub enum TableSource {
    Packaged,
    DataDir(Utf8PathBuf),
}

impl TableSource {
    /// Raw contents of one table, or [`TidarError::TableUnavailable`] when the backing file is
    /// missing.
    pub fn read(&self, table: ReferenceTable) -> Result<Cow<'static, str>, TidarError> {
        match self {
            TableSource::Packaged => Ok(Cow::Borrowed(table.packaged_contents())),
            TableSource::DataDir(dir) => {
                let path = dir.join(table.file_name());
                fs::read_to_string(&path)
                    .map(Cow::Owned)
                    .map_err(|err| TidarError::TableUnavailable {
                        table: table.file_name(),
                        detail: format!("{path}: {err}"),
                    })
            }
        }
    }
}

/// Deserialize every row of a table, preserving file order. A malformed row surfaces as
/// [`TidarError::TableUnavailable`]; partial loads are never returned.
fn load_rows<T: DeserializeOwned>(
    source: &TableSource,
    table: ReferenceTable,
) -> Result<Vec<T>, TidarError> {
    let contents = source.read(table)?;
    let mut reader = csv::Reader::from_reader(contents.as_bytes());
    reader
        .deserialize()
        .map(|row| {
            row.map_err(|err| TidarError::TableUnavailable {
                table: table.file_name(),
                detail: err.to_string(),
            })
        })
        .collect()
}

/// Load the flyby catalog in file order.
pub fn load_flyby_records(source: &TableSource) -> Result<Vec<FlybyRecord>, TidarError> {
    load_rows(source, ReferenceTable::CassiniFlyby)
}

/// Load the CORADR archive catalog in file order (order is significant for version resolution).
pub fn load_coradr_entries(source: &TableSource) -> Result<Vec<CoradrEntry>, TidarError> {
    load_rows(source, ReferenceTable::CoradrJplOptions)
}

/// Load the swath coverage table in file order.
pub fn load_swath_records(source: &TableSource) -> Result<Vec<SwathRecord>, TidarError> {
    load_rows(source, ReferenceTable::SwathCoverage)
}

/// Load the feature gazetteer in file order.
pub fn load_feature_records(source: &TableSource) -> Result<Vec<FeatureRecord>, TidarError> {
    load_rows(source, ReferenceTable::FeatureNameDetails)
}

#[cfg(test)]
mod loader_tests {
    use super::*;

    #[test]
    fn test_packaged_tables_load() {
        let source = TableSource::Packaged;
        assert!(!load_flyby_records(&source).unwrap().is_empty());
        assert!(!load_coradr_entries(&source).unwrap().is_empty());
        assert!(!load_swath_records(&source).unwrap().is_empty());
        assert!(!load_feature_records(&source).unwrap().is_empty());
    }

    #[test]
    fn test_missing_data_dir_is_table_unavailable() {
        let source = TableSource::DataDir("/nonexistent/tidar-data".into());
        let err = load_flyby_records(&source).unwrap_err();
        assert!(matches!(err, TidarError::TableUnavailable { .. }));
        assert!(!err.is_validation());
    }

    #[test]
    fn test_swath_rows_keep_file_order() {
        let rows = load_swath_records(&TableSource::Packaged).unwrap();
        // Sorted by CORADR ID by the refresh tool; spot-check the sort survived the load.
        let first = &rows.first().unwrap().coradr_id;
        let last = &rows.last().unwrap().coradr_id;
        assert!(first <= last);
    }
}
