//! # Temporal query engine
//!
//! Resolves flybys/segments from points or ranges in mission time. Mission timestamps are
//! expressed as year + day-of-year + optional sub-day fields, where **day-of-year is an additive
//! offset from January 1st** — `doy = 1` means Jan 2, not Jan 1. The archive's fixed-width
//! `START_TIME`/`STOP_TIME` strings follow the same convention, and it must be preserved exactly
//! for results to line up with the published coverage table.
//!
//! Epoch arithmetic is done in TAI so that "Jan 1 plus N days" is pure calendar math; UTC would
//! insert leap seconds into the offsets and shift row instants against the table.
//!
//! ## Granularity widening
//!
//! A sub-day field the caller leaves unset does not just default the query side to zero: it also
//! zeroes the **row's** corresponding field for the comparison. Querying by day compares whole
//! days; adding `hour` compares at hour resolution, and so on.

use std::fmt;

use hifitime::{Epoch, TimeScale, Unit};
use log::info;

use crate::constants::FlybySegments;
use crate::reference_tables::{load_swath_records, TableSource};
use crate::tidar_errors::TidarError;
use crate::validation::{
    check_mission_time, END_TIME_FIELDS, START_TIME_FIELDS, TIME_FIELDS,
};

/// A point in mission time: year + day-of-year offset, with optional sub-day fields.
///
/// Unset sub-day fields select day-resolution comparison (see module docs).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MissionTime {
    pub year: i32,
    pub doy: u16,
    pub hour: Option<u8>,
    pub minute: Option<u8>,
    pub second: Option<u8>,
    pub millisecond: Option<u16>,
}

impl MissionTime {
    pub fn new(year: i32, doy: u16) -> Self {
        MissionTime {
            year,
            doy,
            hour: None,
            minute: None,
            second: None,
            millisecond: None,
        }
    }

    pub fn with_hour(mut self, hour: u8) -> Self {
        self.hour = Some(hour);
        self
    }

    pub fn with_minute(mut self, minute: u8) -> Self {
        self.minute = Some(minute);
        self
    }

    pub fn with_second(mut self, second: u8) -> Self {
        self.second = Some(second);
        self
    }

    pub fn with_millisecond(mut self, millisecond: u16) -> Self {
        self.millisecond = Some(millisecond);
        self
    }

    /// The instant this mission time denotes, unset sub-day fields read as zero.
    pub fn epoch(&self) -> Epoch {
        day_of_year_offset_epoch(
            self.year,
            self.doy,
            self.hour.unwrap_or(0),
            self.minute.unwrap_or(0),
            self.second.unwrap_or(0),
            u32::from(self.millisecond.unwrap_or(0)),
        )
    }
}

impl fmt::Display for MissionTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}-{:03}T{:02}:{:02}:{:02}.{:03}",
            self.year,
            self.doy,
            self.hour.unwrap_or(0),
            self.minute.unwrap_or(0),
            self.second.unwrap_or(0),
            self.millisecond.unwrap_or(0),
        )
    }
}

/// The named day-of-year-offset convention: January 1st of `year`, advanced by `doy` days and
/// the sub-day fields.
pub fn day_of_year_offset_epoch(
    year: i32,
    doy: u16,
    hour: u8,
    minute: u8,
    second: u8,
    millisecond: u32,
) -> Epoch {
    let jan_first = Epoch::from_gregorian(year, 1, 1, 0, 0, 0, 0, TimeScale::TAI);
    jan_first
        + Unit::Day * i64::from(doy)
        + Unit::Hour * i64::from(hour)
        + Unit::Minute * i64::from(minute)
        + Unit::Second * i64::from(second)
        + Unit::Millisecond * i64::from(millisecond)
}

/// A `START_TIME`/`STOP_TIME` cell split into its fixed-width fields
/// (`YYYY-DDDThh:mm:ss.fff`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct PdsTimestamp {
    pub year: i32,
    pub doy: u16,
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
    pub millisecond: u32,
}

/// Parse a fixed-width archive timestamp: year `[0:4]`, doy `[5:8]`, hour `[9:11]`,
/// minute `[12:14]`, second `[15:17]`, millisecond `[18:]`.
pub(crate) fn parse_pds_timestamp(value: &str) -> Result<PdsTimestamp, TidarError> {
    fn field<T: std::str::FromStr>(value: &str, start: usize, end: usize) -> Option<T> {
        value.get(start..end)?.parse().ok()
    }

    let parsed = (|| {
        Some(PdsTimestamp {
            year: field(value, 0, 4)?,
            doy: field(value, 5, 8)?,
            hour: field(value, 9, 11)?,
            minute: field(value, 12, 14)?,
            second: field(value, 15, 17)?,
            millisecond: value.get(18..)?.parse().ok()?,
        })
    })();
    parsed.ok_or_else(|| TidarError::TimestampParse {
        value: value.to_string(),
    })
}

/// The row instant used for comparison against one query endpoint: row fields below the
/// caller's granularity are forced to zero.
fn widened_epoch(row: &PdsTimestamp, endpoint: &MissionTime) -> Epoch {
    day_of_year_offset_epoch(
        row.year,
        row.doy,
        if endpoint.hour.is_none() { 0 } else { row.hour },
        if endpoint.minute.is_none() { 0 } else { row.minute },
        if endpoint.second.is_none() { 0 } else { row.second },
        if endpoint.millisecond.is_none() {
            0
        } else {
            row.millisecond
        },
    )
}

/// Flybys/segments whose acquisition interval contains the given instant.
pub fn flybys_at_time(source: &TableSource, at: &MissionTime) -> Result<FlybySegments, TidarError> {
    check_mission_time(at, &TIME_FIELDS)?;
    scan_time_range(source, at, at)
}

/// Flybys/segments whose acquisition interval overlaps `[start, end]`.
pub fn flybys_in_time_range(
    source: &TableSource,
    start: &MissionTime,
    end: &MissionTime,
) -> Result<FlybySegments, TidarError> {
    check_mission_time(start, &START_TIME_FIELDS)?;
    check_mission_time(end, &END_TIME_FIELDS)?;
    scan_time_range(source, start, end)
}

fn scan_time_range(
    source: &TableSource,
    start: &MissionTime,
    end: &MissionTime,
) -> Result<FlybySegments, TidarError> {
    let query_start = start.epoch();
    let query_end = end.epoch();

    let rows = load_swath_records(source)?;
    let mut flybys = FlybySegments::new();
    for row in &rows {
        let row_start = widened_epoch(&parse_pds_timestamp(&row.start_time)?, start);
        let row_stop = widened_epoch(&parse_pds_timestamp(&row.stop_time)?, end);
        if row_start <= query_end && row_stop >= query_start {
            let segments = flybys.entry(row.flyby_id.clone()).or_default();
            let segment = row.segment_id();
            if !segments.contains(&segment) {
                segments.push(segment);
            }
        }
    }

    if flybys.is_empty() {
        if query_start == query_end {
            info!("No flyby IDs found at timestamp: {start}");
        } else {
            info!("No flyby IDs found at timestamp range: {start} to {end}");
        }
    }
    Ok(flybys)
}

#[cfg(test)]
mod temporal_tests {
    use super::*;

    #[test]
    fn test_day_of_year_is_an_offset_from_january_first() {
        // doy 0 is Jan 1 itself; doy 1 is Jan 2.
        let jan_first = day_of_year_offset_epoch(2005, 0, 0, 0, 0, 0);
        assert_eq!(
            jan_first,
            Epoch::from_gregorian(2005, 1, 1, 0, 0, 0, 0, TimeScale::TAI)
        );
        let jan_second = day_of_year_offset_epoch(2005, 1, 0, 0, 0, 0);
        assert_eq!(jan_second - jan_first, Unit::Day * 1_i64);
        // doy 301 of 2005 lands on Oct 29, one day past the calendar's day 301.
        assert_eq!(
            day_of_year_offset_epoch(2005, 301, 0, 0, 0, 0),
            Epoch::from_gregorian(2005, 10, 29, 0, 0, 0, 0, TimeScale::TAI)
        );
    }

    #[test]
    fn test_parse_pds_timestamp_fixed_widths() {
        let stamp = parse_pds_timestamp("2005-301T02:31:12.187").unwrap();
        assert_eq!(
            stamp,
            PdsTimestamp {
                year: 2005,
                doy: 301,
                hour: 2,
                minute: 31,
                second: 12,
                millisecond: 187,
            }
        );
    }

    #[test]
    fn test_parse_pds_timestamp_rejects_short_values() {
        assert!(parse_pds_timestamp("2005-301").is_err());
        assert!(parse_pds_timestamp("").is_err());
        assert!(parse_pds_timestamp("2005-301T02:31:12.").is_err());
    }

    #[test]
    fn test_widening_zeroes_row_fields_below_caller_granularity() {
        let row = parse_pds_timestamp("2005-301T02:31:12.187").unwrap();

        let day_only = MissionTime::new(2005, 301);
        assert_eq!(
            widened_epoch(&row, &day_only),
            day_of_year_offset_epoch(2005, 301, 0, 0, 0, 0)
        );

        let with_hour = MissionTime::new(2005, 301).with_hour(3);
        assert_eq!(
            widened_epoch(&row, &with_hour),
            day_of_year_offset_epoch(2005, 301, 2, 0, 0, 0)
        );

        let full = MissionTime::new(2005, 301)
            .with_hour(3)
            .with_minute(0)
            .with_second(0)
            .with_millisecond(0);
        assert_eq!(
            widened_epoch(&row, &full),
            day_of_year_offset_epoch(2005, 301, 2, 31, 12, 187)
        );
    }

    #[test]
    fn test_mission_time_display() {
        let time = MissionTime::new(2005, 301).with_hour(3);
        assert_eq!(time.to_string(), "2005-301T03:00:00.000");
    }

    #[test]
    fn test_time_query_rejects_bad_fields_before_load() {
        let source = TableSource::DataDir("/nonexistent/tidar-data".into());
        let err = flybys_at_time(&source, &MissionTime::new(2005, 400)).unwrap_err();
        assert!(err.is_validation());
    }
}
