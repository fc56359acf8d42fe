//! # Packaged reference tables
//!
//! The crate ships four denormalized reference tables as flat CSV files, regenerated by an
//! external refresh tool and consumed read-only here:
//!
//! 1. **Flyby catalog** (`cassini_flyby.csv`) — designator ↔ radar data take number.
//! 2. **Archive catalog** (`coradr_jpl_options.csv`) — one row per CORADR volume (re-release
//!    versions included), with the data-type directories each volume contains.
//! 3. **Swath coverage** (`swath_coverage_by_time_position.csv`) — one row per archived BIDR
//!    product, with the segment's coverage rectangle and acquisition interval.
//! 4. **Feature gazetteer** (`feature_name_details.csv`) — named Titan surface features from the
//!    USGS planetary nomenclature database.
//!
//! Tables are reloaded on every query; correctness never depends on caching, only on the file
//! content. **Row order is load-order and significant** — archive version resolution picks the
//! last matching row, and query results list segments in first-match order.

pub mod loader;
pub mod records;

pub use loader::{
    load_coradr_entries, load_feature_records, load_flyby_records, load_swath_records,
    ReferenceTable, TableSource,
};
pub use records::{CoradrEntry, FeatureRecord, FlybyRecord, SwathRecord};
