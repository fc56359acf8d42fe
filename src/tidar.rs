//! # Tidar: reference tables, identifier codec, and archive access
//!
//! This module defines the [`Tidar`] struct, the central façade that wires together:
//!
//! 1. **Reference tables** ([`TableSource`](crate::reference_tables::TableSource)) — the four
//!    packaged catalogs every query runs over.
//! 2. **Identifier codec** — designator ↔ observation number ↔ canonical CORADR archive version.
//! 3. **Spatial queries** — flybys/segments and named features by point or rectangle.
//! 4. **Temporal queries** — flybys/segments by mission timestamp or timestamp range.
//! 5. **Archive fetch** — downloading a flyby's AAREADME/BIDR/SBDR products from the PDS node.
//!
//! Every query is an independent, side-effect-free function of its arguments and the reference
//! tables (aside from diagnostic logging): arguments are validated first, the relevant table is
//! loaded fresh, and the scan runs over the loaded rows. Nothing is cached between calls, so a
//! `Tidar` may be shared freely across threads.
//!
//! ## Typical usage
//!
//! ```rust
//! use tidar::Tidar;
//!
//! let tidar = Tidar::new();
//!
//! // Identifier resolution
//! let observation = tidar.designator_to_observation_number("T65").unwrap();
//! assert_eq!(observation, "0211");
//!
//! // Which flybys imaged Ontario Lacus?
//! let flybys = tidar.flybys_for_feature("ontario lacus").unwrap();
//! assert!(flybys.contains_key("T65"));
//! ```
//!
//! ## Notes
//!
//! - Designator lookup through the codec is case-sensitive; the fetch entry point normalizes
//!   free-form input (`"t65"` → `"T65"`) before resolving.
//! - Empty spatial/temporal results are not errors; they return empty collections and log an
//!   informational notice.

use camino::Utf8PathBuf;

use crate::archive::{fetch_flyby_products, FetchOptions};
use crate::constants::{Degree, FlybyId, FlybySegments, ObservationNumber, SegmentId};
use crate::env_state::TidarEnv;
use crate::identifiers;
use crate::reference_tables::TableSource;
use crate::spatial;
use crate::temporal::{self, MissionTime};
use crate::tidar_errors::TidarError;

/// Façade over the reference tables and the archive fetch layer.
#[derive(Debug, Clone)]
pub struct Tidar {
    env_state: TidarEnv,
    tables: TableSource,
}

impl Default for Tidar {
    fn default() -> Self {
        Self::new()
    }
}

impl Tidar {
    /// Construct a context over the reference tables packaged with the crate.
    pub fn new() -> Self {
        Tidar {
            env_state: TidarEnv::new(),
            tables: TableSource::Packaged,
        }
    }

    /// Construct a context reading the reference tables from a directory instead of the
    /// packaged copies (for externally refreshed tables).
    pub fn from_data_dir(data_dir: impl Into<Utf8PathBuf>) -> Self {
        Tidar {
            env_state: TidarEnv::new(),
            tables: TableSource::DataDir(data_dir.into()),
        }
    }

    /// The table source queries run over.
    pub fn tables(&self) -> &TableSource {
        &self.tables
    }

    // ---------------------------------------------------------------------------------------------
    // Identifier codec
    // ---------------------------------------------------------------------------------------------

    /// Resolve a flyby designator (e.g. `"T65"`) to its 4-digit observation number.
    /// Case-sensitive; see [`identifiers::designator_to_observation_number`].
    pub fn designator_to_observation_number(
        &self,
        designator: &str,
    ) -> Result<ObservationNumber, TidarError> {
        identifiers::designator_to_observation_number(&self.tables, designator)
    }

    /// Resolve an observation number (padded to 4 digits if needed) to its flyby designator.
    pub fn observation_number_to_designator(
        &self,
        observation_number: &str,
    ) -> Result<FlybyId, TidarError> {
        identifiers::observation_number_to_designator(&self.tables, observation_number)
    }

    /// Resolve the canonical (most recent) CORADR archive id for an observation number.
    pub fn most_recent_archive_id(&self, observation_number: &str) -> Result<String, TidarError> {
        identifiers::most_recent_archive_id(&self.tables, observation_number)
    }

    /// Designators and observation numbers of every cataloged flyby, in catalog order.
    pub fn available_flybys(
        &self,
    ) -> Result<(Vec<FlybyId>, Vec<ObservationNumber>), TidarError> {
        identifiers::available_flybys(&self.tables)
    }

    /// Observation numbers of Titan flybys with no BIDR data in the archive.
    pub fn observations_without_bidr(&self) -> Result<Vec<ObservationNumber>, TidarError> {
        identifiers::observations_without_bidr(&self.tables)
    }

    /// Distinct segment ids present in the swath coverage table.
    pub fn segment_options(&self) -> Result<Vec<SegmentId>, TidarError> {
        identifiers::segment_options(&self.tables)
    }

    // ---------------------------------------------------------------------------------------------
    // Spatial queries
    // ---------------------------------------------------------------------------------------------

    /// Flybys/segments whose recorded coverage matches the query rectangle
    /// (latitude overlap, longitude containment — see [`crate::spatial`]).
    pub fn flybys_in_rectangle(
        &self,
        min_latitude: Degree,
        max_latitude: Degree,
        min_longitude: Degree,
        max_longitude: Degree,
    ) -> Result<FlybySegments, TidarError> {
        spatial::flybys_in_rectangle(
            &self.tables,
            min_latitude,
            max_latitude,
            min_longitude,
            max_longitude,
        )
    }

    /// Flybys/segments covering a single point.
    pub fn flybys_at_point(
        &self,
        latitude: Degree,
        longitude: Degree,
    ) -> Result<FlybySegments, TidarError> {
        spatial::flybys_at_point(&self.tables, latitude, longitude)
    }

    /// Named surface features overlapping the query rectangle, in gazetteer order.
    pub fn features_in_rectangle(
        &self,
        min_latitude: Degree,
        max_latitude: Degree,
        min_longitude: Degree,
        max_longitude: Degree,
    ) -> Result<Vec<String>, TidarError> {
        spatial::features_in_rectangle(
            &self.tables,
            min_latitude,
            max_latitude,
            min_longitude,
            max_longitude,
        )
    }

    /// Named surface features covering a single point.
    pub fn features_at_point(
        &self,
        latitude: Degree,
        longitude: Degree,
    ) -> Result<Vec<String>, TidarError> {
        spatial::features_at_point(&self.tables, latitude, longitude)
    }

    /// Flybys/segments covering a named surface feature (input title-cased before lookup).
    pub fn flybys_for_feature(&self, feature_name: &str) -> Result<FlybySegments, TidarError> {
        spatial::flybys_for_feature(&self.tables, feature_name)
    }

    // ---------------------------------------------------------------------------------------------
    // Temporal queries
    // ---------------------------------------------------------------------------------------------

    /// Flybys/segments whose acquisition interval contains the given mission time.
    pub fn flybys_at_time(&self, at: &MissionTime) -> Result<FlybySegments, TidarError> {
        temporal::flybys_at_time(&self.tables, at)
    }

    /// Flybys/segments whose acquisition interval overlaps `[start, end]`.
    pub fn flybys_in_time_range(
        &self,
        start: &MissionTime,
        end: &MissionTime,
    ) -> Result<FlybySegments, TidarError> {
        temporal::flybys_in_time_range(&self.tables, start, end)
    }

    // ---------------------------------------------------------------------------------------------
    // Archive fetch
    // ---------------------------------------------------------------------------------------------

    /// Fetch one flyby's archived products into `tidar_results/{CORADR}_{segment}/`.
    /// See [`crate::archive::fetch_flyby_products`].
    pub fn fetch_flyby_products(
        &self,
        options: &FetchOptions,
    ) -> Result<Utf8PathBuf, TidarError> {
        fetch_flyby_products(&self.env_state, &self.tables, options)
    }
}
