//! # Input validation
//!
//! The uniform check layer run by every public entry point **before** any reference table is
//! read. Checks apply in a fixed order: presence → domain range → cross-field consistency.
//! (Type checks are compile-time in Rust; the remaining runtime checks live here.)
//!
//! Every failure names the offending field and the violated constraint; no entry point proceeds
//! partially after a failed check.

use crate::constants::{Degree, RESOLUTION_TYPES};
use crate::temporal::MissionTime;
use crate::tidar_errors::TidarError;

/// Field names used when validating one [`MissionTime`] endpoint, so that errors from a range
/// query name `start_doy`/`end_doy` rather than a bare `doy`.
pub(crate) struct TimeFields {
    pub year: &'static str,
    pub doy: &'static str,
    pub hour: &'static str,
    pub minute: &'static str,
    pub second: &'static str,
    pub millisecond: &'static str,
}

pub(crate) const TIME_FIELDS: TimeFields = TimeFields {
    year: "year",
    doy: "doy",
    hour: "hour",
    minute: "minute",
    second: "second",
    millisecond: "millisecond",
};

pub(crate) const START_TIME_FIELDS: TimeFields = TimeFields {
    year: "start_year",
    doy: "start_doy",
    hour: "start_hour",
    minute: "start_minute",
    second: "start_second",
    millisecond: "start_millisecond",
};

pub(crate) const END_TIME_FIELDS: TimeFields = TimeFields {
    year: "end_year",
    doy: "end_doy",
    hour: "end_hour",
    minute: "end_minute",
    second: "end_second",
    millisecond: "end_millisecond",
};

/// Latitude must lie in [-90, 90] degrees.
pub(crate) fn check_latitude(field: &'static str, value: Degree) -> Result<(), TidarError> {
    if !(-90.0..=90.0).contains(&value) {
        return Err(TidarError::LatitudeOutOfRange { field, value });
    }
    Ok(())
}

/// Longitude must lie in [0, 360] degrees (the archive's positive-west 0–360 convention).
pub(crate) fn check_longitude(field: &'static str, value: Degree) -> Result<(), TidarError> {
    if !(0.0..=360.0).contains(&value) {
        return Err(TidarError::LongitudeOutOfRange { field, value });
    }
    Ok(())
}

/// Validate a query rectangle: each bound in its domain, then `max >= min` per axis.
/// A point query is the degenerate `min == max` rectangle and passes.
pub(crate) fn check_rectangle(
    min_latitude: Degree,
    max_latitude: Degree,
    min_longitude: Degree,
    max_longitude: Degree,
) -> Result<(), TidarError> {
    check_latitude("min_latitude", min_latitude)?;
    check_latitude("max_latitude", max_latitude)?;
    check_longitude("min_longitude", min_longitude)?;
    check_longitude("max_longitude", max_longitude)?;
    if max_latitude < min_latitude {
        return Err(TidarError::InvertedRange {
            axis: "latitude",
            min_field: "min_latitude",
            max_field: "max_latitude",
        });
    }
    if max_longitude < min_longitude {
        return Err(TidarError::InvertedRange {
            axis: "longitude",
            min_field: "min_longitude",
            max_field: "max_longitude",
        });
    }
    Ok(())
}

/// Validate a point query.
pub(crate) fn check_point(latitude: Degree, longitude: Degree) -> Result<(), TidarError> {
    check_latitude("latitude", latitude)?;
    check_longitude("longitude", longitude)?;
    Ok(())
}

fn check_int_field(
    field: &'static str,
    value: i64,
    min: i64,
    max: i64,
) -> Result<(), TidarError> {
    if value < min || value > max {
        return Err(TidarError::FieldOutOfRange {
            field,
            value,
            min,
            max,
        });
    }
    Ok(())
}

/// Validate one mission-time endpoint: year positive, doy an offset in [0, 365], optional
/// sub-day fields in their clock domains.
pub(crate) fn check_mission_time(
    time: &MissionTime,
    fields: &TimeFields,
) -> Result<(), TidarError> {
    check_int_field(fields.year, i64::from(time.year), 1, 9999)?;
    check_int_field(fields.doy, i64::from(time.doy), 0, 365)?;
    if let Some(hour) = time.hour {
        check_int_field(fields.hour, i64::from(hour), 0, 23)?;
    }
    if let Some(minute) = time.minute {
        check_int_field(fields.minute, i64::from(minute), 0, 59)?;
    }
    if let Some(second) = time.second {
        check_int_field(fields.second, i64::from(second), 0, 59)?;
    }
    if let Some(millisecond) = time.millisecond {
        check_int_field(fields.millisecond, i64::from(millisecond), 0, 999)?;
    }
    Ok(())
}

/// Validate a BIDR resolution letter against the archive's catalog.
pub(crate) fn check_resolution(resolution: char) -> Result<(), TidarError> {
    if !RESOLUTION_TYPES.contains(&resolution) {
        return Err(TidarError::InvalidResolution {
            resolution,
            valid: RESOLUTION_TYPES.to_vec(),
        });
    }
    Ok(())
}

/// Validate a top-N-resolutions request: in [1, 5] and mutually exclusive with a fixed
/// resolution letter.
pub(crate) fn check_resolution_selection(
    resolution: Option<char>,
    top_x_resolutions: Option<usize>,
) -> Result<(), TidarError> {
    if resolution.is_some() && top_x_resolutions.is_some() {
        return Err(TidarError::MutuallyExclusive {
            first: "resolution",
            second: "top_x_resolutions",
        });
    }
    if let Some(resolution) = resolution {
        check_resolution(resolution)?;
    }
    if let Some(top_x) = top_x_resolutions {
        check_int_field("top_x_resolutions", top_x as i64, 1, 5)?;
    }
    Ok(())
}
