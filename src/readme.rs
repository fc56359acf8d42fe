//! # AAREADME and .LBL section reading
//!
//! Fetched CORADR volumes carry an `AAREADME.TXT` and per-product `.LBL` label files: flat,
//! line-oriented PDS text whose entries are either `NAME = value` lines or prose sections under
//! a header. This module extracts one entry or section by name from a results directory, using
//! the catalogs of known entry/section names below as scan markers — a requested name's slice
//! runs from its marker line to the next known marker.
//!
//! Lookup retries the upper-cased (and, for the AAREADME, title-cased) form of the requested
//! name before giving up, so `"pds_version_id"` finds `PDS_VERSION_ID`.

use std::fs;

use camino::Utf8Path;
use log::info;

use crate::spatial::title_case;
use crate::tidar_errors::TidarError;

/// AAREADME `NAME = value` style entries, in file order.
pub const AAREADME_GENERAL_OPTIONS: [&str; 7] = [
    "PDS_VERSION_ID",
    "RECORD_TYPE",
    "INSTRUMENT_HOST_NAME",
    "INSTRUMENT_NAME",
    "PUBLICATION_DATE",
    "NOTE",
    "Volume",
];

/// AAREADME prose section headers, in file order.
pub const AAREADME_SECTION_OPTIONS: [&str; 8] = [
    "Introduction",
    "Disk Format",
    "File Formats",
    "Volume Contents",
    "Recommended DVD Drives and Driver Software",
    "Errata and Disclaimer",
    "Version Status",
    "Contact Information",
];

/// `.LBL` `NAME = value` style entries, in file order.
pub const LBL_GENERAL_OPTIONS: [&str; 78] = [
    "PDS_VERSION_ID",
    "DATA_SET_ID",
    "DATA_SET_NAME",
    "PRODUCER_INSTITUTION_NAME",
    "PRODUCER_ID",
    "PRODUCER_FULL_NAME",
    "PRODUCT_ID",
    "PRODUCT_VERSION_ID",
    "INSTRUMENT_HOST_NAME",
    "INSTRUMENT_HOST_ID",
    "INSTRUMENT_NAME",
    "INSTRUMENT_ID",
    "TARGET_NAME",
    "START_TIME",
    "STOP_TIME",
    "SPACECRAFT_CLOCK_START_COUNT",
    "SPACECRAFT_CLOCK_STOP_COUNT",
    "PRODUCT_CREATION_TIME",
    "SOURCE_PRODUCT_ID",
    "MISSION_PHASE_NAME",
    "MISSION_NAME",
    "SOFTWARE_VERSION_ID",
    "FILE_NAME COMPRESSED",
    "RECORD_TYPE COMPRESSED",
    "ENCODING_TYPE",
    "INTERCHANGE_FORMAT",
    "UNCOMPRESSED_FILE_NAME",
    "REQUIRED_STORAGE_BYTES",
    "^DESCRIPTION",
    "FILE_NAME UNCOMPRESSED",
    "RECORD_TYPE UNCOMPRESSED",
    "RECORD_BYTES",
    "FILE_RECORDS",
    "LABEL_RECORDS",
    "^IMAGE",
    "LINES",
    "LINE_SAMPLES",
    "SAMPLE_TYPE",
    "SAMPLE_BITS",
    "CHECKSUM",
    "SCALING_FACTOR",
    "OFFSET",
    "MISSING_CONSTANT",
    "NOTE",
    "^DATA_SET_MAP_PROJECTION",
    "MAP_PROJECTION_TYPE",
    "FIRST_STANDARD_PARALLEL",
    "SECOND_STANDARD_PARALLEL",
    "A_AXIS_RADIUS",
    "B_AXIS_RADIUS",
    "C_AXIS_RADIUS",
    "POSITIVE_LONGITUDE_DIRECTION",
    "CENTER_LATITUDE",
    "CENTER_LONGITUDE",
    "REFERENCE_LATITUDE",
    "REFERENCE_LONGITUDE",
    "LINE_FIRST_PIXEL",
    "LINE_LAST_PIXEL",
    "SAMPLE_FIRST_PIXEL",
    "SAMPLE_LAST_PIXEL",
    "MAP_PROJECTION_ROTATION",
    "MAP_RESOLUTION",
    "MAP_SCALE",
    "MAXIMUM_LATITUDE",
    "MINIMUM_LATITUDE",
    "EASTERNMOST_LONGITUDE",
    "WESTERNMOST_LONGITUDE",
    "LINE_PROJECTION_OFFSET",
    "SAMPLE_PROJECTION_OFFSET",
    "OBLIQUE_PROJ_POLE_LATITUDE",
    "OBLIQUE_PROJ_POLE_LONGITUDE",
    "OBLIQUE_PROJ_POLE_ROTATION",
    "OBLIQUE_PROJ_X_AXIS_VECTOR",
    "OBLIQUE_PROJ_Y_AXIS_VECTOR",
    "OBLIQUE_PROJ_Z_AXIS_VECTOR",
    "LOOK_DIRECTION",
    "COORDINATE_SYSTEM_NAME",
    "COORDINATE_SYSTEM_TYPE",
];

/// `.LBL` prose section headers, in file order.
pub const LBL_SECTION_OPTIONS: [&str; 4] = [
    "PRODUCT DESCRIPTION",
    "DESCRIPTION OF COMPRESSED AND UNCOMPRESSED FILES",
    "POINTERS TO START RECORDS OF OBJECTS IN FILE",
    "DESCRIPTION OF OBJECTS CONTAINED IN FILE",
];

/// Log and return the AAREADME option catalogs (line-by-line entries, section headers).
pub fn aareadme_options() -> (&'static [&'static str], &'static [&'static str]) {
    info!("Line-By-Line Options: {AAREADME_GENERAL_OPTIONS:?}");
    info!("Section Header Options: {AAREADME_SECTION_OPTIONS:?}");
    (&AAREADME_GENERAL_OPTIONS, &AAREADME_SECTION_OPTIONS)
}

/// Log and return the `.LBL` option catalogs (line-by-line entries, section headers).
pub fn lbl_options() -> (&'static [&'static str], &'static [&'static str]) {
    info!("Line-By-Line Options: {LBL_GENERAL_OPTIONS:?}");
    info!("Section Header Options: {LBL_SECTION_OPTIONS:?}");
    (&LBL_GENERAL_OPTIONS, &LBL_SECTION_OPTIONS)
}

/// Find the catalog a (possibly re-cased) section name belongs to, returning the canonical name
/// and its catalog.
fn resolve_section<'a>(
    section: &str,
    lists: &[&'a [&'static str]],
    casings: &[fn(&str) -> String],
) -> Option<(&'static str, &'a [&'static str])> {
    for casing in casings {
        let candidate = casing(section);
        for list in lists {
            if let Some(found) = list.iter().find(|entry| **entry == candidate) {
                return Some((*found, *list));
            }
        }
    }
    None
}

/// The marker the scan stops at: the next catalog entry, or for the last line-by-line entry the
/// first section header (`None` means read to end of file).
fn end_marker(
    canonical: &str,
    list: &[&'static str],
    following_sections: Option<&'static str>,
) -> Option<&'static str> {
    let index = list.iter().position(|entry| *entry == canonical)?;
    match list.get(index + 1) {
        Some(next) => Some(*next),
        None => following_sections,
    }
}

/// Slice the lines between a start marker and an optional end marker.
///
/// The `Volume` entry of the AAREADME needs a guard: the bare word appears throughout the file,
/// so its marker only matches lines also naming a Titan flyby.
fn slice_aareadme(contents: &str, start: &str, end: Option<&str>) -> String {
    let marker_matches = |marker: &str, line: &str| {
        line.contains(marker) && (marker != "Volume" || line.contains("Titan Flyby T"))
    };

    let mut output = String::new();
    let mut within_section = false;
    for line in contents.lines() {
        if marker_matches(start, line) {
            within_section = true;
        }
        if let Some(end) = end {
            if within_section && marker_matches(end, line) && !marker_matches(start, line) {
                break;
            }
        }
        if within_section && !line.contains("OBJECT") && !line.contains("END") {
            output.push_str(line);
            output.push('\n');
        }
    }
    output
}

/// Read one entry or section from a downloaded volume's `AAREADME.TXT`.
///
/// `NAME = value` entries return the value only; prose sections return the whole slice.
pub fn read_aareadme_section(
    results_directory: &Utf8Path,
    section: &str,
) -> Result<String, TidarError> {
    let lists: [&[&'static str]; 2] = [&AAREADME_GENERAL_OPTIONS, &AAREADME_SECTION_OPTIONS];
    let casings: [fn(&str) -> String; 3] =
        [|s| s.to_string(), |s| s.to_uppercase(), |s| title_case(s)];
    let Some((canonical, list)) = resolve_section(section, &lists, &casings) else {
        return Err(TidarError::UnknownReadmeSection {
            section: section.to_string(),
        });
    };

    let readme_path = results_directory.join("AAREADME.TXT");
    if !readme_path.is_file() {
        return Err(TidarError::MissingAareadme {
            directory: results_directory.to_string(),
        });
    }
    let contents = fs::read_to_string(&readme_path)?;

    let end = end_marker(canonical, list, Some(AAREADME_SECTION_OPTIONS[0]));
    let output = slice_aareadme(&contents, canonical, end);
    let output = output.trim_end();

    let is_line_entry = AAREADME_GENERAL_OPTIONS.contains(&canonical);
    let value = if is_line_entry && output.contains('=') && canonical != "Volume" {
        output.split('=').nth(1).unwrap_or(output).trim()
    } else {
        output.trim()
    };
    info!("{value}");
    Ok(value.to_string())
}

/// Read one entry or section from the single `.LBL` label file in a results directory.
///
/// `FILE_NAME`/`RECORD_TYPE` appear twice in a label (compressed and uncompressed objects) and
/// must be qualified; `DESCRIPTION`, `IMAGE`, and `DATA_SET_MAP_PROJECTION` are pointer lines
/// and get their `^` prefix repaired automatically.
pub fn read_lbl_section(
    results_directory: &Utf8Path,
    section: &str,
) -> Result<String, TidarError> {
    if section == "FILE_NAME" || section == "RECORD_TYPE" {
        return Err(TidarError::AmbiguousReadmeSection {
            section: section.to_string(),
        });
    }
    let section = match section {
        "DESCRIPTION" | "IMAGE" | "DATA_SET_MAP_PROJECTION" => format!("^{section}"),
        other => other.to_string(),
    };

    let lists: [&[&'static str]; 2] = [&LBL_GENERAL_OPTIONS, &LBL_SECTION_OPTIONS];
    let casings: [fn(&str) -> String; 2] = [|s| s.to_string(), |s| s.to_uppercase()];
    let Some((canonical, list)) = resolve_section(&section, &lists, &casings) else {
        return Err(TidarError::UnknownReadmeSection { section });
    };

    let contents = read_single_lbl(results_directory)?;

    // The compressed/uncompressed FILE_NAME and RECORD_TYPE entries are located through the
    // unambiguous neighbors around each of the two object blocks.
    let (start, end) = match canonical {
        "FILE_NAME COMPRESSED" | "RECORD_TYPE COMPRESSED" => {
            ("SOFTWARE_VERSION_ID", Some("INTERCHANGE_FORMAT"))
        }
        "FILE_NAME UNCOMPRESSED" | "RECORD_TYPE UNCOMPRESSED" => {
            ("REQUIRED_STORAGE_BYTES", Some("FILE_RECORDS"))
        }
        other => (other, end_marker(other, list, None)),
    };

    let is_section = LBL_SECTION_OPTIONS.contains(&canonical);
    let qualified = canonical.contains(' ');
    let mut output = String::new();
    let mut within_section = false;
    for line in contents.lines() {
        if line.contains(start) {
            within_section = true;
        }
        if let Some(end) = end {
            if within_section && line.contains(end) && !line.contains(start) {
                break;
            }
        }
        if within_section {
            if !is_section && line.contains("/*") && !qualified {
                break;
            }
            output.push_str(line);
            output.push('\n');
        }
    }

    // Entries whose token also appears in other lines: keep only the line naming the token.
    let base_token = canonical.split(' ').next().unwrap_or(canonical);
    if matches!(
        base_token,
        "FILE_NAME" | "RECORD_TYPE" | "^DESCRIPTION" | "COORDINATE_SYSTEM_TYPE"
    ) {
        if let Some(line) = output.lines().find(|line| line.contains(base_token)) {
            output = line.to_string();
        }
    }

    if canonical == "NOTE" {
        let mut joined = String::new();
        for line in output.lines() {
            if line.contains("END_OBJECT") {
                break;
            }
            joined.push(' ');
            joined.push_str(line.trim());
            joined.push(' ');
        }
        output = joined;
    }

    let output = output.trim_end();
    let value = if !is_section {
        output.split('=').nth(1).unwrap_or(output).trim()
    } else {
        output.trim()
    };
    info!("{value}");
    Ok(value.to_string())
}

/// Locate the single `.LBL` file of a results directory and read it.
fn read_single_lbl(results_directory: &Utf8Path) -> Result<String, TidarError> {
    let mut lbl_files = Vec::new();
    for entry in results_directory.read_dir_utf8()? {
        let entry = entry?;
        if entry.file_name().ends_with(".LBL") {
            lbl_files.push(entry.path().to_path_buf());
        }
    }
    match lbl_files.as_slice() {
        [] => Err(TidarError::LblFileNotFound {
            directory: results_directory.to_string(),
        }),
        [single] => Ok(fs::read_to_string(single)?),
        many => Err(TidarError::MultipleLblFiles {
            files: many.iter().map(|path| path.to_string()).collect(),
        }),
    }
}
