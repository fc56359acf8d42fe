//! # Constants and type definitions for tidar
//!
//! This module centralizes the **archive catalogs**, **conversion tables**, and **common type
//! definitions** used throughout the `tidar` library.
//!
//! ## Overview
//!
//! - Identifier type aliases used across the crate
//! - Resolution and data-file type catalogs of the CORADR archive
//! - The PDS imaging node base URL for Cassini orbiter data
//!
//! These definitions are used by all main modules, including the identifier codec, the
//! spatial/temporal query engines, and the archive fetch layer.

use std::collections::BTreeMap;

// -------------------------------------------------------------------------------------------------
// Type aliases
// -------------------------------------------------------------------------------------------------

/// Angle in degrees
pub type Degree = f64;
/// Human flyby designator (e.g. `"T65"`)
pub type FlybyId = String;
/// Zero-padded 4-digit observation number (e.g. `"0211"`)
pub type ObservationNumber = String;
/// Swath segment identifier (e.g. `"S01"`)
pub type SegmentId = String;

/// Query result: flyby designator → segment ids in first-match order, duplicates suppressed.
pub type FlybySegments = BTreeMap<FlybyId, Vec<SegmentId>>;

// -------------------------------------------------------------------------------------------------
// CORADR archive catalogs
// -------------------------------------------------------------------------------------------------

/// BIDR resolution letters, lowest to highest: 2, 8, 32, 128, 256 pixels/degree.
pub const RESOLUTION_TYPES: [char; 5] = ['B', 'D', 'F', 'H', 'I'];

/// Data-file type directories a CORADR volume may contain.
pub const DATAFILE_TYPES: [&str; 6] = ["ABDR", "ASUM", "BIDR", "LBDR", "SBDR", "STDR"];

/// BIDR product letters eligible for download filtering (`BI<LETTER>Q<RESOLUTION>`).
pub const BIDR_PRODUCT_LETTERS: [char; 6] = ['B', 'E', 'T', 'N', 'M', 'L'];

/// Root of the Cassini orbiter RADAR archive at the PDS imaging node.
pub const PDS_CASSINI_BASE_URL: &str =
    "https://planetarydata.jpl.nasa.gov/img/data/cassini/cassini_orbiter";

/// Directory created under the working directory to hold fetched products.
pub const RESULTS_DIR: &str = "tidar_results";

/// Pixels/degree for a BIDR resolution letter, `None` for an unknown letter.
pub fn resolution_pixels_per_degree(letter: char) -> Option<u16> {
    match letter {
        'B' => Some(2),
        'D' => Some(8),
        'F' => Some(32),
        'H' => Some(128),
        'I' => Some(256),
        _ => None,
    }
}
